//! # Combinatorial Breeding
//!
//! Refills a generation with a mix of fresh random tours and crossover children of
//! two distinct elites.

use super::BreedStrategy;
use crate::error::{GeneticError, Result};
use crate::evolution::options::EvolutionOptions;
use crate::operators::mix;
use crate::rng::RandomNumberGenerator;
use crate::tour::Tour;

/// The refill strategy of the tour optimizer.
///
/// For each open slot, with probability `mutation_rate` a brand new random tour is
/// injected; otherwise two different elites are drawn uniformly and recombined with
/// [`mix`], which also applies the per-gene mutation pass.
///
/// Every child is checked against the tour invariants before it is returned.
#[derive(Debug, Clone, Default)]
pub struct CombinatorialBreedStrategy;

impl CombinatorialBreedStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Draws two different indices below `num_elites`.
    fn pick_parents(num_elites: usize, rng: &mut RandomNumberGenerator) -> (usize, usize) {
        let first = rng.gen_index(0..num_elites);
        let mut second = rng.gen_index(0..num_elites);

        // Ensure the second parent is different from the first
        while second == first {
            second = rng.gen_index(0..num_elites);
        }

        (first, second)
    }
}

impl BreedStrategy for CombinatorialBreedStrategy {
    fn breed(
        &self,
        elites: &[Tour],
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Tour>> {
        if elites.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        if elites.len() < 2 {
            return Err(GeneticError::Configuration(
                "Crossover needs at least two elites".to_string(),
            ));
        }

        let num_points = elites[0].num_points();
        let num_offspring = options.get_population_size().saturating_sub(elites.len());
        let mut offspring = Vec::with_capacity(num_offspring);

        for _ in 0..num_offspring {
            if rng.chance(options.get_mutation_rate()) {
                offspring.push(Tour::random(num_points, rng));
                continue;
            }

            let (first, second) = Self::pick_parents(elites.len(), rng);
            let child = mix(
                elites[first].sequence(),
                elites[second].sequence(),
                options.get_gene_mutation_rate(),
                rng,
            )?;

            offspring.push(Tour::from_sequence(child)?);
        }

        Ok(offspring)
    }
}
