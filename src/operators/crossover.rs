//! # Crossover
//!
//! Recombines two parent sequences into a child. Genes are moved from the second
//! parent into a copy of the first by transposition, never by overwrite, so the
//! child is a valid permutation whatever the random draws.

use super::{mutation::mutate, position_of};
use crate::{
    error::{GeneticError, Result},
    rng::RandomNumberGenerator,
};

/// Probability that a given position takes its gene from the second parent.
pub const GENE_TRANSFER_PROBABILITY: f64 = 0.5;

/// Copies `dna1` and pulls genes of `dna2` into it, position by position.
///
/// For each non-home position `i`, with probability [`GENE_TRANSFER_PROBABILITY`],
/// the value `dna2[i]` is located in the child and swapped into position `i`.
///
/// # Errors
///
/// Returns [`GeneticError::InvariantViolation`] if the parents differ in length or
/// are not permutations of the same identifiers.
pub fn transfer_genes(
    dna1: &[usize],
    dna2: &[usize],
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<usize>> {
    if dna1.len() != dna2.len() {
        return Err(GeneticError::InvariantViolation(format!(
            "Parents have different lengths ({} and {})",
            dna1.len(),
            dna2.len()
        )));
    }

    let mut child = dna1.to_vec();
    let last = child.len().saturating_sub(1);

    for i in 0..last {
        if !rng.chance(GENE_TRANSFER_PROBABILITY) {
            continue;
        }

        let wanted = dna2[i];
        let found = position_of(&child, wanted).ok_or_else(|| {
            GeneticError::InvariantViolation(format!(
                "Gene {} of the second parent is missing from {:?}",
                wanted, dna1
            ))
        })?;
        child.swap(i, found);
    }

    Ok(child)
}

/// Produces a child from two parents: gene transfer followed by a mutation pass.
pub fn mix(
    dna1: &[usize],
    dna2: &[usize],
    gene_mutation_rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<usize>> {
    let mut child = transfer_genes(dna1, dna2, rng)?;
    mutate(&mut child, gene_mutation_rate, rng)?;
    Ok(child)
}
