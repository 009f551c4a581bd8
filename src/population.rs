//! # Population
//!
//! One generation of tours and the steps that turn it into the next one:
//! evaluate every tour, rank them, keep the elites and refill the rest.
//!
//! A `Population` is consumed by [`Population::next_generation`]; the previous
//! generation's non-elite tours are dropped at that point.

use rayon::prelude::*;

use crate::{
    breeding::BreedStrategy,
    error::{GeneticError, OptionExt, Result},
    evolution::options::EvolutionOptions,
    oracle::DistanceOracle,
    rng::RandomNumberGenerator,
    selection::ElitistSelection,
    tour::{validate_sequence, Tour},
};

#[derive(Debug, Clone, Default)]
pub struct Population {
    tours: Vec<Tour>,
    ranked: bool,
}

impl Population {
    /// Creates `size` random tours over `num_points` points.
    pub fn random(size: usize, num_points: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            tours: (0..size).map(|_| Tour::random(num_points, rng)).collect(),
            ranked: false,
        }
    }

    /// Wraps existing tours, checking they all cover the same points.
    ///
    /// # Errors
    ///
    /// - [`GeneticError::EmptyPopulation`] if `tours` is empty.
    /// - [`GeneticError::InvariantViolation`] if any tour is invalid or the tours
    ///   differ in length.
    pub fn from_tours(tours: Vec<Tour>) -> Result<Self> {
        let num_points = tours
            .first()
            .map(Tour::num_points)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

        for tour in &tours {
            validate_sequence(tour.sequence(), num_points)?;
        }

        Ok(Self {
            tours,
            ranked: false,
        })
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Whether the tours are currently sorted best first.
    pub fn is_ranked(&self) -> bool {
        self.ranked
    }

    /// Evaluates every tour against `oracle`.
    ///
    /// Populations of at least `parallel_threshold` tours are evaluated in parallel
    /// with Rayon; evaluation has no side effects beyond each tour's own fitness,
    /// so the result is the same either way.
    ///
    /// # Errors
    ///
    /// Propagates the first evaluation error. Tours that already carry a fitness
    /// are rejected with [`GeneticError::Evolution`].
    pub fn evaluate<O>(&mut self, oracle: &O, parallel_threshold: usize) -> Result<()>
    where
        O: DistanceOracle + ?Sized,
    {
        if self.tours.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        if self.tours.len() >= parallel_threshold {
            self.tours
                .par_iter_mut()
                .map(|tour| tour.evaluate(oracle).map(|_| ()))
                .collect::<Result<()>>()?;
        } else {
            for tour in self.tours.iter_mut() {
                tour.evaluate(oracle)?;
            }
        }

        self.ranked = false;
        Ok(())
    }

    /// Sorts the evaluated tours best first.
    pub fn rank(&mut self, selection: &ElitistSelection) -> Result<()> {
        selection.rank(&mut self.tours)?;
        self.ranked = true;
        Ok(())
    }

    /// The best tour of a ranked population.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Evolution`] if the population has not been ranked.
    pub fn best(&self) -> Result<&Tour> {
        if !self.ranked {
            return Err(GeneticError::Evolution(
                "Population must be ranked before asking for its best tour".to_string(),
            ));
        }
        self.tours
            .first()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// Builds the next generation: the elites of this ranked population followed
    /// by the offspring `strategy` breeds from them.
    ///
    /// # Errors
    ///
    /// - [`GeneticError::Evolution`] if the population has not been ranked, or the
    ///   strategy does not fill the population back to its configured size.
    /// - Any selection or breeding error.
    pub fn next_generation<B: BreedStrategy>(
        self,
        selection: &ElitistSelection,
        strategy: &B,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        if !self.ranked {
            return Err(GeneticError::Evolution(
                "Population must be ranked before breeding the next generation".to_string(),
            ));
        }

        let mut tours = selection.select(&self.tours)?;
        let offspring = strategy.breed(&tours, options, rng)?;
        tours.extend(offspring);

        if tours.len() != options.get_population_size() {
            return Err(GeneticError::Evolution(format!(
                "Next generation has {} tours, expected {}",
                tours.len(),
                options.get_population_size()
            )));
        }

        Ok(Population {
            tours,
            ranked: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breeding::CombinatorialBreedStrategy;
    use crate::oracle::{DistanceMatrix, Point, Scene};

    fn ring(num_points: usize) -> Scene {
        let points = (0..num_points)
            .map(|i| {
                let angle = i as f64 / num_points as f64 * std::f64::consts::TAU;
                Point::new(100.0 * angle.cos(), 100.0 * angle.sin())
            })
            .collect();
        Scene::new(points).unwrap()
    }

    fn options(num_points: usize) -> EvolutionOptions {
        EvolutionOptions::builder()
            .num_points(num_points)
            .population_size(30)
            .num_selected(3)
            .build()
    }

    #[test]
    fn test_evaluate_and_rank() {
        let scene = ring(7);
        let mut rng = RandomNumberGenerator::from_seed(12);
        let mut population = Population::random(30, 7, &mut rng);

        population.evaluate(&scene, 1000).unwrap();
        assert!(population.tours().iter().all(Tour::is_evaluated));
        assert!(population.best().is_err());

        population.rank(&ElitistSelection::new(3)).unwrap();
        let fitness: Vec<f64> = population
            .tours()
            .iter()
            .map(|t| t.fitness().unwrap())
            .collect();
        assert!(fitness.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(population.best().unwrap().fitness(), Some(fitness[0]));
    }

    #[test]
    fn test_parallel_evaluation_matches_sequential() {
        let scene = ring(9);
        let mut rng = RandomNumberGenerator::from_seed(99);
        let mut sequential = Population::random(64, 9, &mut rng);
        let mut parallel = sequential.clone();

        sequential.evaluate(&scene, usize::MAX).unwrap();
        parallel.evaluate(&scene, 1).unwrap();

        let a: Vec<Option<f64>> = sequential.tours().iter().map(Tour::fitness).collect();
        let b: Vec<Option<f64>> = parallel.tours().iter().map(Tour::fitness).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_evaluation_propagates_oracle_failure() {
        // The population covers 6 points but the scene only knows 5
        let scene = ring(5);
        let mut rng = RandomNumberGenerator::from_seed(4);
        let mut population = Population::random(16, 6, &mut rng);
        assert!(matches!(
            population.evaluate(&scene, 1),
            Err(GeneticError::Oracle { .. })
        ));
    }

    #[test]
    fn test_next_generation_keeps_elites() {
        let scene = ring(6);
        let matrix = DistanceMatrix::from_scene(&scene).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(8);
        let selection = ElitistSelection::new(3);
        let options = options(6);

        let mut population = Population::random(30, 6, &mut rng);
        population.evaluate(&matrix, 1000).unwrap();
        population.rank(&selection).unwrap();
        let top: Vec<Vec<usize>> = population.tours()[..3]
            .iter()
            .map(|t| t.sequence().to_vec())
            .collect();

        let next = population
            .next_generation(&selection, &CombinatorialBreedStrategy, &options, &mut rng)
            .unwrap();

        assert_eq!(next.len(), 30);
        assert!(!next.is_ranked());
        assert!(next.tours().iter().all(|t| !t.is_evaluated()));
        for (elite, expected) in next.tours()[..3].iter().zip(top.iter()) {
            assert_eq!(elite.sequence(), expected.as_slice());
        }
    }

    #[test]
    fn test_next_generation_requires_ranking() {
        let mut rng = RandomNumberGenerator::from_seed(8);
        let population = Population::random(30, 6, &mut rng);
        let result = population.next_generation(
            &ElitistSelection::new(3),
            &CombinatorialBreedStrategy,
            &options(6),
            &mut rng,
        );
        assert!(matches!(result, Err(GeneticError::Evolution(_))));
    }

    #[test]
    fn test_evaluate_twice_without_breeding() {
        let scene = ring(4);
        let mut rng = RandomNumberGenerator::from_seed(2);
        let mut population = Population::random(10, 4, &mut rng);
        population.evaluate(&scene, 1000).unwrap();
        assert!(matches!(
            population.evaluate(&scene, 1000),
            Err(GeneticError::Evolution(_))
        ));
    }

    #[test]
    fn test_from_tours() {
        let tours = vec![
            Tour::from_sequence(vec![1, 2, 0]).unwrap(),
            Tour::from_sequence(vec![2, 1, 0]).unwrap(),
        ];
        assert_eq!(Population::from_tours(tours).unwrap().len(), 2);

        let mixed = vec![
            Tour::from_sequence(vec![1, 2, 0]).unwrap(),
            Tour::from_sequence(vec![1, 0]).unwrap(),
        ];
        assert!(matches!(
            Population::from_tours(mixed),
            Err(GeneticError::InvariantViolation(_))
        ));
        assert!(matches!(
            Population::from_tours(Vec::new()),
            Err(GeneticError::EmptyPopulation)
        ));
    }
}
