use std::mem;

use tracing::{debug, info, warn};

use super::{
    observer::{GenerationObserver, GenerationReport},
    options::{EvolutionOptions, LogLevel},
};
use crate::{
    breeding::{BreedStrategy, CombinatorialBreedStrategy},
    error::{GeneticError, OptionExt, Result},
    oracle::DistanceOracle,
    population::Population,
    rng::RandomNumberGenerator,
    selection::ElitistSelection,
    tour::Tour,
};

/// Why a run ended.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The generation cap was reached.
    MaxGenerations,
    /// The best distance fell to or below the configured threshold.
    DistanceThreshold,
}

/// What happened in a single call to [`EvolutionLauncher::run_generation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// A new population has been bred and the run can go on.
    Continue,
    /// A stopping condition fired; no further generation will be produced.
    Stopped(StopReason),
}

/// Represents the result of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The shortest tour found in any generation.
    pub best: Tour,
    /// Its distance.
    pub best_distance: f64,
    /// Number of generations evaluated.
    pub generations: usize,
    pub stop_reason: StopReason,
}

/// Drives the generational loop over a distance oracle.
///
/// The launcher owns the population, the random number generator and the run
/// state (generation counter and best distance). Each call to
/// [`run_generation`](Self::run_generation) evaluates, ranks and, unless a stopping
/// condition fires, replaces the population; [`run`](Self::run) repeats that until
/// the run ends.
///
/// # Example
///
/// ```rust
/// use genroute::evolution::{EvolutionLauncher, EvolutionOptions, NoopObserver, StopReason};
/// use genroute::oracle::{Point, Scene};
/// use genroute::rng::RandomNumberGenerator;
///
/// let scene = Scene::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 10.0),
///     Point::new(10.0, 0.0),
/// ])
/// .unwrap();
/// let options = EvolutionOptions::new(scene.num_points(), 50, 5, 200, 40.01);
///
/// let mut launcher =
///     EvolutionLauncher::new(options, scene, RandomNumberGenerator::from_seed(1)).unwrap();
/// let result = launcher.run(&mut NoopObserver).unwrap();
///
/// assert_eq!(result.stop_reason, StopReason::DistanceThreshold);
/// assert!((result.best_distance - 40.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct EvolutionLauncher<O, B = CombinatorialBreedStrategy>
where
    O: DistanceOracle,
    B: BreedStrategy,
{
    options: EvolutionOptions,
    oracle: O,
    strategy: B,
    selection: ElitistSelection,
    rng: RandomNumberGenerator,
    population: Population,
    generation: usize,
    best_distance: f64,
    best: Option<Tour>,
    stopped: Option<StopReason>,
}

impl<O> EvolutionLauncher<O, CombinatorialBreedStrategy>
where
    O: DistanceOracle,
{
    /// Creates a launcher with the default breeding strategy.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] if `options` fail validation.
    pub fn new(options: EvolutionOptions, oracle: O, rng: RandomNumberGenerator) -> Result<Self> {
        Self::with_strategy(options, oracle, CombinatorialBreedStrategy, rng)
    }
}

impl<O, B> EvolutionLauncher<O, B>
where
    O: DistanceOracle,
    B: BreedStrategy,
{
    /// Creates a launcher with a custom breeding strategy.
    ///
    /// The options are validated and the first generation is drawn at random.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] if `options` fail validation or
    /// `num_points` disagrees with the size the oracle reports.
    pub fn with_strategy(
        options: EvolutionOptions,
        oracle: O,
        strategy: B,
        mut rng: RandomNumberGenerator,
    ) -> Result<Self> {
        if let Err(e) = options.validate() {
            warn!(error = %e, "Rejected evolution options");
            return Err(e);
        }

        if let Some(oracle_points) = oracle.num_points() {
            if oracle_points != options.get_num_points() {
                let e = GeneticError::Configuration(format!(
                    "Options describe {} points but the oracle has {}",
                    options.get_num_points(),
                    oracle_points
                ));
                warn!(error = %e, "Rejected evolution options");
                return Err(e);
            }
        }

        let population = Population::random(
            options.get_population_size(),
            options.get_num_points(),
            &mut rng,
        );
        let selection = ElitistSelection::new(options.get_num_selected());

        Ok(Self {
            options,
            oracle,
            strategy,
            selection,
            rng,
            population,
            generation: 0,
            best_distance: f64::INFINITY,
            best: None,
            stopped: None,
        })
    }

    /// Runs one evaluate, rank, select, refill cycle.
    ///
    /// The observer is called once the generation is ranked, whether or not the run
    /// stops on it. After the run has stopped further calls do nothing and return
    /// the same stop reason.
    ///
    /// # Errors
    ///
    /// Oracle failures and invariant violations abort the generation; the launcher
    /// should not be used afterwards.
    pub fn run_generation<Obs>(&mut self, observer: &mut Obs) -> Result<GenerationOutcome>
    where
        Obs: GenerationObserver + ?Sized,
    {
        if let Some(reason) = self.stopped {
            return Ok(GenerationOutcome::Stopped(reason));
        }

        self.generation += 1;
        let log_level = *self.options.get_log_level();

        self.population
            .evaluate(&self.oracle, self.options.get_parallel_threshold())?;

        if log_level == LogLevel::Verbose {
            for tour in self.population.tours() {
                debug!(
                    generation = self.generation,
                    fitness = tour.fitness(),
                    "Evaluated {:?}",
                    tour.sequence()
                );
            }
        }

        self.population.rank(&self.selection)?;
        let leader = self.population.best()?.clone();
        let generation_best = leader.fitness().ok_or_else_genetic(|| {
            GeneticError::Evolution("Best tour of a ranked generation has no fitness".to_string())
        })?;

        if generation_best < self.best_distance {
            self.best_distance = generation_best;
            self.best = Some(leader.clone());
        }

        if log_level != LogLevel::None {
            info!(
                generation = self.generation,
                generation_best,
                best_distance = self.best_distance,
                "Generation complete"
            );
        }

        let stop = self.stop_reason();
        observer.on_generation_complete(&GenerationReport {
            generation: self.generation,
            best_sequence: leader.sequence(),
            generation_best,
            best_distance: self.best_distance,
            finished: stop.is_some(),
        });

        if let Some(reason) = stop {
            if log_level != LogLevel::None {
                match reason {
                    StopReason::MaxGenerations => info!(
                        "Stopping: Reached maximum generations: {}",
                        self.options.get_max_generations()
                    ),
                    StopReason::DistanceThreshold => info!(
                        "Stopping: Reached desired distance threshold: {}",
                        self.options.get_distance_threshold()
                    ),
                }
            }
            self.stopped = Some(reason);
            return Ok(GenerationOutcome::Stopped(reason));
        }

        let current = mem::take(&mut self.population);
        self.population = current.next_generation(
            &self.selection,
            &self.strategy,
            &self.options,
            &mut self.rng,
        )?;

        if log_level == LogLevel::Verbose {
            debug!(
                generation = self.generation,
                size = self.population.len(),
                "Bred next generation"
            );
        }

        Ok(GenerationOutcome::Continue)
    }

    /// Runs generations until a stopping condition fires.
    ///
    /// # Errors
    ///
    /// Propagates the first generation error.
    pub fn run<Obs>(&mut self, observer: &mut Obs) -> Result<EvolutionResult>
    where
        Obs: GenerationObserver + ?Sized,
    {
        loop {
            if let GenerationOutcome::Stopped(reason) = self.run_generation(observer)? {
                return self.result(reason);
            }
        }
    }

    fn stop_reason(&self) -> Option<StopReason> {
        if self.generation >= self.options.get_max_generations() {
            Some(StopReason::MaxGenerations)
        } else if self.best_distance <= self.options.get_distance_threshold() {
            Some(StopReason::DistanceThreshold)
        } else {
            None
        }
    }

    fn result(&self, stop_reason: StopReason) -> Result<EvolutionResult> {
        let best = self.best.clone().ok_or_else_genetic(|| {
            GeneticError::Evolution("Run stopped before any generation was evaluated".to_string())
        })?;

        Ok(EvolutionResult {
            best,
            best_distance: self.best_distance,
            generations: self.generation,
            stop_reason,
        })
    }

    /// Number of generations evaluated so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best distance seen so far; infinite before the first generation.
    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    /// Shortest tour seen so far.
    pub fn best(&self) -> Option<&Tour> {
        self.best.as_ref()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}
