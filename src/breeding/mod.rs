//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines how the non-elite part of the next generation
//! is produced from the elites of the current one.
pub mod combinatorial;

use std::fmt::Debug;

use crate::{
    error::Result, evolution::options::EvolutionOptions, rng::RandomNumberGenerator, tour::Tour,
};

/// Produces offspring tours from the elites of a ranked generation.
pub trait BreedStrategy
where
    Self: Debug + Clone + Send + Sync,
{
    /// Breeds `population_size - elites.len()` new, unevaluated tours.
    ///
    /// ## Parameters
    ///
    /// - `elites`: the best tours of the current generation, best first.
    /// - `options`: population size and mutation probabilities.
    /// - `rng`: the run's random number generator.
    ///
    /// ## Errors
    ///
    /// This method can fail if:
    /// - there are too few elites to pick parents from
    /// - an operator produces a sequence that is not a valid tour
    fn breed(
        &self,
        elites: &[Tour],
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Tour>>;
}

pub use combinatorial::CombinatorialBreedStrategy;
