use crate::error::{GeneticError, Result};
use crate::tour::Tour;

/// Ranks evaluated tours by distance and picks the best ones as elites.
///
/// Lower distance is better. Ranking is stable, so tours with equal distance keep
/// their relative order. Elites come back with their fitness cleared so the next
/// generation evaluates them afresh.
///
/// # Examples
///
/// ```
/// use genroute::oracle::{Point, Scene};
/// use genroute::selection::ElitistSelection;
/// use genroute::tour::Tour;
/// use genroute::error::Result;
///
/// fn main() -> Result<()> {
///     let scene = Scene::new(vec![
///         Point::new(0.0, 0.0),
///         Point::new(0.0, 10.0),
///         Point::new(10.0, 10.0),
///         Point::new(10.0, 0.0),
///     ])?;
///
///     let mut tours = vec![
///         Tour::from_sequence(vec![2, 1, 3, 0])?,
///         Tour::from_sequence(vec![1, 2, 3, 0])?,
///         Tour::from_sequence(vec![1, 3, 2, 0])?,
///     ];
///     for tour in tours.iter_mut() {
///         tour.evaluate(&scene)?;
///     }
///
///     let selection = ElitistSelection::new(2);
///     selection.rank(&mut tours)?;
///     assert_eq!(tours[0].sequence(), &[1, 2, 3, 0]);
///
///     let elites = selection.select(&tours)?;
///     assert_eq!(elites.len(), 2);
///     assert!(elites.iter().all(|t| !t.is_evaluated()));
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElitistSelection {
    /// How many of the best tours survive into the next generation.
    num_selected: usize,
}

impl ElitistSelection {
    /// Creates a new ElitistSelection keeping `num_selected` tours.
    pub fn new(num_selected: usize) -> Self {
        Self { num_selected }
    }

    pub fn num_selected(&self) -> usize {
        self.num_selected
    }

    /// Sorts `tours` by ascending distance.
    ///
    /// # Errors
    ///
    /// - [`GeneticError::EmptyPopulation`] if there is nothing to rank.
    /// - [`GeneticError::Evolution`] if any tour has not been evaluated.
    pub fn rank(&self, tours: &mut [Tour]) -> Result<()> {
        if tours.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        if let Some(idx) = tours.iter().position(|t| !t.is_evaluated()) {
            return Err(GeneticError::Evolution(format!(
                "Cannot rank: tour {} has not been evaluated",
                idx
            )));
        }

        tours.sort_by(|a, b| {
            let a = a.fitness().unwrap_or(f64::INFINITY);
            let b = b.fitness().unwrap_or(f64::INFINITY);
            a.total_cmp(&b)
        });

        Ok(())
    }

    /// Copies the first `num_selected` tours of an already ranked slice.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] if fewer tours than `num_selected`
    /// are available.
    pub fn select(&self, ranked: &[Tour]) -> Result<Vec<Tour>> {
        if ranked.len() < self.num_selected {
            return Err(GeneticError::Configuration(format!(
                "Cannot select {} elites from {} tours",
                self.num_selected,
                ranked.len()
            )));
        }

        Ok(ranked
            .iter()
            .take(self.num_selected)
            .map(|tour| {
                let mut elite = tour.clone();
                elite.reset_fitness();
                elite
            })
            .collect())
    }
}
