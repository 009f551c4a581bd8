//! # Operators
//!
//! Pure functions that produce or perturb tour sequences: random initialization,
//! crossover and mutation. Every operator keeps the sequence a permutation of the
//! non-home identifiers followed by home, so no repair step is ever needed.
pub mod crossover;
pub mod mutation;

use crate::{rng::RandomNumberGenerator, tour::HOME};

pub use crossover::{mix, transfer_genes, GENE_TRANSFER_PROBABILITY};
pub use mutation::{mutate, mutate_with, relocate, swap_genes, MutationRates};

/// Draws a uniformly random visiting order over `num_points` points.
///
/// Identifiers in `[1, num_points)` are drawn one at a time and rejected if already
/// placed, then home is appended. A count of zero or one yields `[0]`.
pub fn random_sequence(num_points: usize, rng: &mut RandomNumberGenerator) -> Vec<usize> {
    let num_points = num_points.max(1);
    let mut sequence = Vec::with_capacity(num_points);
    let mut placed = vec![false; num_points];

    while sequence.len() < num_points - 1 {
        let id = rng.gen_index(1..num_points);
        if !placed[id] {
            placed[id] = true;
            sequence.push(id);
        }
    }

    sequence.push(HOME);
    sequence
}

/// Index of `value` in `sequence`.
pub(crate) fn position_of(sequence: &[usize], value: usize) -> Option<usize> {
    sequence.iter().position(|&gene| gene == value)
}
