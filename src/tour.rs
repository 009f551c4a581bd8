//! # Tour
//!
//! A `Tour` is one candidate solution: the order in which the points are visited,
//! plus the total distance once it has been evaluated.
//!
//! The sequence always has one entry per point. Every non-home identifier appears
//! exactly once in the first `N - 1` slots and the last slot is home (`0`), so the
//! walk starts at home, visits everything, and comes back.
//!
//! ## Example
//!
//! ```rust
//! use genroute::oracle::{Point, Scene};
//! use genroute::tour::Tour;
//!
//! let scene = Scene::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 10.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(10.0, 0.0),
//! ])
//! .unwrap();
//!
//! let mut tour = Tour::from_sequence(vec![1, 2, 3, 0]).unwrap();
//! assert_eq!(tour.evaluate(&scene).unwrap(), 40.0);
//! assert_eq!(tour.fitness(), Some(40.0));
//! ```

use crate::{
    error::{GeneticError, Result},
    operators::random_sequence,
    oracle::DistanceOracle,
    rng::RandomNumberGenerator,
};

/// Identifier of the point every tour starts from and returns to.
pub const HOME: usize = 0;

/// A closed route through every point.
///
/// With the `serde` feature a deserialized tour is validated like
/// [`Tour::from_sequence`], and a cached fitness must be a finite, non-negative
/// distance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TourRecord"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    sequence: Vec<usize>,
    fitness: Option<f64>,
}

/// Unchecked wire form of a [`Tour`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TourRecord {
    sequence: Vec<usize>,
    fitness: Option<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<TourRecord> for Tour {
    type Error = GeneticError;

    fn try_from(record: TourRecord) -> Result<Self> {
        let mut tour = Tour::from_sequence(record.sequence)?;
        if let Some(fitness) = record.fitness {
            if !fitness.is_finite() || fitness < 0.0 {
                return Err(GeneticError::FitnessCalculation(format!(
                    "Tour {:?} carries invalid fitness {}",
                    tour.sequence, fitness
                )));
            }
            tour.fitness = Some(fitness);
        }
        Ok(tour)
    }
}

impl Tour {
    /// Creates an unevaluated tour with a uniformly random visiting order.
    pub fn random(num_points: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            sequence: random_sequence(num_points, rng),
            fitness: None,
        }
    }

    /// Wraps an existing sequence after checking the tour invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::InvariantViolation`] if the sequence is not a valid
    /// closed tour over `sequence.len()` points.
    pub fn from_sequence(sequence: Vec<usize>) -> Result<Self> {
        validate_sequence(&sequence, sequence.len())?;
        Ok(Self {
            sequence,
            fitness: None,
        })
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn into_sequence(self) -> Vec<usize> {
        self.sequence
    }

    pub fn num_points(&self) -> usize {
        self.sequence.len()
    }

    /// Total distance, or `None` if the tour has not been evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Marks the tour as unevaluated so it can be scored again next generation.
    pub fn reset_fitness(&mut self) {
        self.fitness = None;
    }

    /// Computes and caches the total distance of the tour, starting from home.
    ///
    /// # Errors
    ///
    /// - [`GeneticError::Evolution`] if the tour already carries a fitness.
    ///   Call [`Tour::reset_fitness`] first.
    /// - Any oracle error, and [`GeneticError::FitnessCalculation`] for negative
    ///   or non-finite distances.
    pub fn evaluate<O: DistanceOracle + ?Sized>(&mut self, oracle: &O) -> Result<f64> {
        if let Some(fitness) = self.fitness {
            return Err(GeneticError::Evolution(format!(
                "Tour {:?} is already evaluated (fitness {})",
                self.sequence, fitness
            )));
        }

        let total = path_length(&self.sequence, oracle)?;
        self.fitness = Some(total);
        Ok(total)
    }
}

/// Sums the distances of walking `sequence` in order, starting from home.
///
/// # Errors
///
/// Propagates oracle failures and rejects negative or non-finite distances.
pub fn path_length<O: DistanceOracle + ?Sized>(sequence: &[usize], oracle: &O) -> Result<f64> {
    let mut position = HOME;
    let mut total = 0.0;

    for &next in sequence {
        let leg = oracle.distance(position, next)?;
        if !leg.is_finite() || leg < 0.0 {
            return Err(GeneticError::FitnessCalculation(format!(
                "Distance from {} to {} is {}",
                position, next, leg
            )));
        }
        total += leg;
        position = next;
    }

    Ok(total)
}

/// Checks that `sequence` is a closed tour over `num_points` points.
///
/// # Errors
///
/// Returns [`GeneticError::InvariantViolation`] describing the first problem found.
pub fn validate_sequence(sequence: &[usize], num_points: usize) -> Result<()> {
    if num_points == 0 {
        return Err(GeneticError::InvariantViolation(
            "A tour needs at least the home point".to_string(),
        ));
    }

    if sequence.len() != num_points {
        return Err(GeneticError::InvariantViolation(format!(
            "Sequence {:?} has length {}, expected {}",
            sequence,
            sequence.len(),
            num_points
        )));
    }

    if sequence[num_points - 1] != HOME {
        return Err(GeneticError::InvariantViolation(format!(
            "Sequence {:?} does not end at home",
            sequence
        )));
    }

    let mut seen = vec![false; num_points];
    for (idx, &id) in sequence[..num_points - 1].iter().enumerate() {
        if id == HOME || id >= num_points {
            return Err(GeneticError::InvariantViolation(format!(
                "Sequence {:?} has invalid identifier {} at position {}",
                sequence, id, idx
            )));
        }
        if seen[id] {
            return Err(GeneticError::InvariantViolation(format!(
                "Sequence {:?} visits {} twice",
                sequence, id
            )));
        }
        seen[id] = true;
    }

    Ok(())
}
