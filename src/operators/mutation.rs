//! # Mutation
//!
//! Two per-position perturbations of a sequence, both of which keep it a valid tour:
//!
//! - **swap**: exchange the gene at a position with a randomly chosen gene.
//! - **relocation**: pull a randomly chosen gene out and splice it back in at a
//!   position, shifting the genes in between.
//!
//! At most one kind fires per position per pass. The home gene in the last slot
//! is never drawn and never moved.

use super::position_of;
use crate::{
    error::{GeneticError, Result},
    rng::RandomNumberGenerator,
    tour::HOME,
};

/// Per-position probabilities of the two mutation kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationRates {
    pub swap: f64,
    pub relocation: f64,
}

impl MutationRates {
    /// Same probability for both kinds.
    pub fn uniform(rate: f64) -> Self {
        Self {
            swap: rate,
            relocation: rate,
        }
    }
}

/// Runs one mutation pass using `gene_mutation_rate` for both kinds.
pub fn mutate(
    sequence: &mut [usize],
    gene_mutation_rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<()> {
    mutate_with(sequence, MutationRates::uniform(gene_mutation_rate), rng)
}

/// Runs one mutation pass over every non-home position.
///
/// At position `i` a swap fires with probability `rates.swap`; only if it did not,
/// a relocation fires with probability `rates.relocation`. Either way the moved
/// gene is drawn uniformly from `[1, N)`.
pub fn mutate_with(
    sequence: &mut [usize],
    rates: MutationRates,
    rng: &mut RandomNumberGenerator,
) -> Result<()> {
    let num_points = sequence.len();
    for i in 0..num_points.saturating_sub(1) {
        if rng.chance(rates.swap) {
            let value = rng.gen_index(1..num_points);
            swap_genes(sequence, i, value)?;
        } else if rng.chance(rates.relocation) {
            let value = rng.gen_index(1..num_points);
            relocate(sequence, value, i)?;
        }
    }
    Ok(())
}

/// Moves `value` into `position`, sending the gene that was there to `value`'s old slot.
pub fn swap_genes(sequence: &mut [usize], position: usize, value: usize) -> Result<()> {
    let (found, _) = locate_movable(sequence, value, position)?;
    sequence.swap(position, found);
    Ok(())
}

/// Takes `value` out of the sequence and splices it back in ahead of `target`.
///
/// This reproduces "insert at `target`, then remove the original occurrence":
///
/// - `from < target`: the genes in `from + 1..target` shift left and `value` ends
///   up at `target - 1`.
/// - `from > target`: the genes in `target..from` shift right and `value` ends up
///   at `target`.
/// - `from == target`: nothing changes.
///
/// Only the slice between the two indices is rotated; the home gene and anything
/// outside that range keep their positions.
pub fn relocate(sequence: &mut [usize], value: usize, target: usize) -> Result<()> {
    let (from, target) = locate_movable(sequence, value, target)?;
    if from < target {
        sequence[from..target].rotate_left(1);
    } else if from > target {
        sequence[target..=from].rotate_right(1);
    }
    Ok(())
}

/// Finds `value` and checks that both it and `position` lie in the movable prefix.
fn locate_movable(sequence: &[usize], value: usize, position: usize) -> Result<(usize, usize)> {
    let last = sequence.len().saturating_sub(1);
    if value == HOME {
        return Err(GeneticError::InvariantViolation(
            "The home gene cannot be moved".to_string(),
        ));
    }
    if position >= last {
        return Err(GeneticError::InvariantViolation(format!(
            "Position {} is outside the movable range of a {}-point tour",
            position,
            sequence.len()
        )));
    }
    let found = position_of(sequence, value).ok_or_else(|| {
        GeneticError::InvariantViolation(format!("Gene {} is missing from {:?}", value, sequence))
    })?;
    Ok((found, position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::random_sequence;
    use crate::tour::validate_sequence;

    /// Insert-then-remove on a `Vec`, the literal form of a relocation.
    fn relocate_by_insert(sequence: &[usize], value: usize, target: usize) -> Vec<usize> {
        let mut out = sequence.to_vec();
        let prev = out.iter().position(|&g| g == value).unwrap();
        out.insert(target, value);
        if target >= prev {
            out.remove(prev);
        } else {
            out.remove(prev + 1);
        }
        out
    }

    #[test]
    fn test_relocate_forward() {
        let mut sequence = vec![4, 1, 2, 3, 5, 0];
        relocate(&mut sequence, 1, 3).unwrap();
        assert_eq!(sequence, vec![4, 2, 1, 3, 5, 0]);
    }

    #[test]
    fn test_relocate_backward() {
        let mut sequence = vec![4, 1, 2, 3, 5, 0];
        relocate(&mut sequence, 3, 1).unwrap();
        assert_eq!(sequence, vec![4, 3, 1, 2, 5, 0]);
    }

    #[test]
    fn test_relocate_adjacent() {
        let mut sequence = vec![4, 1, 2, 3, 5, 0];
        relocate(&mut sequence, 1, 2).unwrap();
        assert_eq!(sequence, vec![4, 1, 2, 3, 5, 0]);

        relocate(&mut sequence, 2, 1).unwrap();
        assert_eq!(sequence, vec![4, 2, 1, 3, 5, 0]);
    }

    #[test]
    fn test_relocate_to_own_index_is_noop() {
        let original = vec![3, 5, 1, 4, 2, 0];
        for (idx, &value) in original[..5].iter().enumerate() {
            let mut sequence = original.clone();
            relocate(&mut sequence, value, idx).unwrap();
            assert_eq!(sequence, original);
        }
    }

    #[test]
    fn test_relocate_matches_insert_remove_for_every_ordering() {
        let original = vec![3, 5, 1, 4, 2, 0];
        for from in 0..5 {
            for target in 0..5 {
                let value = original[from];
                let mut sequence = original.clone();
                relocate(&mut sequence, value, target).unwrap();
                assert_eq!(
                    sequence,
                    relocate_by_insert(&original, value, target),
                    "from {} to {}",
                    from,
                    target
                );
                assert_eq!(sequence[5], HOME);
            }
        }
    }

    #[test]
    fn test_relocate_rejects_home() {
        let mut sequence = vec![1, 2, 0];
        assert!(relocate(&mut sequence, HOME, 0).is_err());
        assert!(relocate(&mut sequence, 1, 2).is_err());
        assert_eq!(sequence, vec![1, 2, 0]);
    }

    #[test]
    fn test_swap_genes() {
        let mut sequence = vec![1, 2, 3, 4, 0];
        swap_genes(&mut sequence, 0, 3).unwrap();
        assert_eq!(sequence, vec![3, 2, 1, 4, 0]);

        swap_genes(&mut sequence, 1, 2).unwrap();
        assert_eq!(sequence, vec![3, 2, 1, 4, 0]);

        assert!(swap_genes(&mut sequence, 0, 9).is_err());
    }

    #[test]
    fn test_swap_pass_keeps_permutation() {
        let rates = MutationRates {
            swap: 0.5,
            relocation: 0.0,
        };
        for seed in 0..200 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let mut sequence = random_sequence(10, &mut rng);
            mutate_with(&mut sequence, rates, &mut rng).unwrap();
            assert!(validate_sequence(&sequence, 10).is_ok(), "{:?}", sequence);
        }
    }

    #[test]
    fn test_relocation_pass_keeps_permutation() {
        let rates = MutationRates {
            swap: 0.0,
            relocation: 0.5,
        };
        for seed in 0..200 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let mut sequence = random_sequence(10, &mut rng);
            mutate_with(&mut sequence, rates, &mut rng).unwrap();
            assert!(validate_sequence(&sequence, 10).is_ok(), "{:?}", sequence);
        }
    }

    #[test]
    fn test_zero_rate_leaves_sequence_alone() {
        let mut rng = RandomNumberGenerator::from_seed(6);
        let original = random_sequence(8, &mut rng);
        let mut sequence = original.clone();
        mutate(&mut sequence, 0.0, &mut rng).unwrap();
        assert_eq!(sequence, original);
    }

    #[test]
    fn test_full_rate_on_tiny_tours() {
        let mut rng = RandomNumberGenerator::from_seed(6);
        for n in 1..=3 {
            let mut sequence = random_sequence(n, &mut rng);
            mutate(&mut sequence, 1.0, &mut rng).unwrap();
            assert!(validate_sequence(&sequence, n).is_ok());
        }
    }
}
