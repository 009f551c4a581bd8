use crate::{
    breeding::{BreedStrategy, CombinatorialBreedStrategy},
    error::{GeneticError, Result},
    oracle::DistanceOracle,
    rng::RandomNumberGenerator,
};

use super::{EvolutionLauncher, EvolutionOptions};

/// Fluent construction of an [`EvolutionLauncher`].
///
/// The oracle is required. Options default to [`EvolutionOptions::default`] with
/// `num_points` taken from the oracle when it reports a size, the strategy to
/// [`CombinatorialBreedStrategy`] and the random number generator to an
/// entropy-seeded one.
///
/// ```rust
/// use genroute::evolution::{EvolutionLauncherBuilder, EvolutionOptions, NoopObserver};
/// use genroute::oracle::{Point, Scene};
///
/// let scene = Scene::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 0.0),
///     Point::new(3.0, 4.0),
/// ])
/// .unwrap();
///
/// let mut launcher = EvolutionLauncherBuilder::new()
///     .with_options(
///         EvolutionOptions::builder()
///             .num_points(scene.num_points())
///             .population_size(10)
///             .num_selected(2)
///             .max_generations(5)
///             .distance_threshold(0.0)
///             .build(),
///     )
///     .with_oracle(scene)
///     .with_seed(7)
///     .build()
///     .unwrap();
///
/// let result = launcher.run(&mut NoopObserver).unwrap();
/// assert_eq!(result.best_distance, 12.0);
/// ```
#[derive(Debug)]
pub struct EvolutionLauncherBuilder<O, B>
where
    O: DistanceOracle,
    B: BreedStrategy,
{
    options: Option<EvolutionOptions>,
    oracle: Option<O>,
    strategy: B,
    rng: Option<RandomNumberGenerator>,
}

impl<O> EvolutionLauncherBuilder<O, CombinatorialBreedStrategy>
where
    O: DistanceOracle,
{
    pub fn new() -> Self {
        Self {
            options: None,
            oracle: None,
            strategy: CombinatorialBreedStrategy,
            rng: None,
        }
    }
}

impl<O> Default for EvolutionLauncherBuilder<O, CombinatorialBreedStrategy>
where
    O: DistanceOracle,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<O, B> EvolutionLauncherBuilder<O, B>
where
    O: DistanceOracle,
    B: BreedStrategy,
{
    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_oracle(mut self, oracle: O) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Replaces the breeding strategy, changing the builder's strategy type.
    pub fn with_strategy<B2: BreedStrategy>(self, strategy: B2) -> EvolutionLauncherBuilder<O, B2> {
        EvolutionLauncherBuilder {
            options: self.options,
            oracle: self.oracle,
            strategy,
            rng: self.rng,
        }
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(RandomNumberGenerator::from_seed(seed))
    }

    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] if no oracle was given or the
    /// options fail validation.
    pub fn build(self) -> Result<EvolutionLauncher<O, B>> {
        let oracle = self
            .oracle
            .ok_or_else(|| GeneticError::Configuration("Distance oracle not specified".to_string()))?;

        let options = match self.options {
            Some(options) => options,
            None => {
                let mut options = EvolutionOptions::default();
                if let Some(num_points) = oracle.num_points() {
                    options.set_num_points(num_points);
                }
                options
            }
        };

        EvolutionLauncher::with_strategy(
            options,
            oracle,
            self.strategy,
            self.rng.unwrap_or_default(),
        )
    }
}
