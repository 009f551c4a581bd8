//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds every tunable of a run: problem size,
//! population shape, mutation probabilities, stopping conditions and logging.
//!
//! ## Example
//!
//! ```rust
//! use genroute::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Positional constructor; rates keep their defaults
//! let options = EvolutionOptions::new(4, 50, 5, 200, 40.01);
//! assert!(options.validate().is_ok());
//!
//! // Fluent builder
//! let options = EvolutionOptions::builder()
//!     .num_points(12)
//!     .population_size(80)
//!     .num_selected(8)
//!     .mutation_rate(0.05)
//!     .gene_mutation_rate(0.2)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//! assert_eq!(options.get_population_size(), 80);
//! ```
//!
//! ## Defaults
//!
//! | option | default |
//! |---|---|
//! | `num_points` | 2 |
//! | `population_size` | 50 |
//! | `num_selected` | 5 |
//! | `mutation_rate` | 0.1 |
//! | `gene_mutation_rate` | 0.1 |
//! | `max_generations` | 1000 |
//! | `distance_threshold` | 10.0 |
//! | `log_level` | `LogLevel::None` |
//! | `parallel_threshold` | 1000 |

use crate::error::{GeneticError, Result};

const DEFAULT_NUM_POINTS: usize = 2;
const DEFAULT_POPULATION_SIZE: usize = 50;
const DEFAULT_NUM_SELECTED: usize = 5;
const DEFAULT_MUTATION_RATE: f64 = 0.1;
const DEFAULT_GENE_MUTATION_RATE: f64 = 0.1;
const DEFAULT_MAX_GENERATIONS: usize = 1000;
const DEFAULT_DISTANCE_THRESHOLD: f64 = 10.0;
const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// How much the launcher reports through `tracing` while it runs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Per-generation summary plus a line for every evaluated tour.
    Verbose,
    /// Per-generation summary and the stop reason.
    Minimal,
    /// No per-generation output.
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    /// Number of points including home.
    num_points: usize,
    population_size: usize,
    /// Elites carried into the next generation.
    num_selected: usize,
    /// Chance that a refill slot gets a fresh random tour instead of a crossover child.
    mutation_rate: f64,
    /// Per-position chance of each mutation kind.
    gene_mutation_rate: f64,
    max_generations: usize,
    /// Stop once the best distance is at or below this value.
    distance_threshold: f64,
    log_level: LogLevel,
    /// Minimum population size for evaluating tours in parallel.
    parallel_threshold: usize,
}

impl EvolutionOptions {
    pub fn new(
        num_points: usize,
        population_size: usize,
        num_selected: usize,
        max_generations: usize,
        distance_threshold: f64,
    ) -> Self {
        Self {
            num_points,
            population_size,
            num_selected,
            max_generations,
            distance_threshold,
            ..Self::default()
        }
    }

    /// Checks every option and reports the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] when:
    /// - `num_points` is zero
    /// - `population_size` is zero
    /// - `num_selected` is below 2 or not below `population_size`
    /// - either rate is outside `[0, 1]`
    /// - `max_generations` is zero
    /// - `distance_threshold` is negative or NaN
    pub fn validate(&self) -> Result<()> {
        if self.num_points == 0 {
            return Err(GeneticError::Configuration(
                "Number of points cannot be zero".to_string(),
            ));
        }

        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        // Crossover draws two distinct elites
        if self.num_selected < 2 {
            return Err(GeneticError::Configuration(format!(
                "At least 2 elites are required, got {}",
                self.num_selected
            )));
        }

        if self.num_selected >= self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Number of elites ({}) must be smaller than the population size ({})",
                self.num_selected, self.population_size
            )));
        }

        check_probability("mutation_rate", self.mutation_rate)?;
        check_probability("gene_mutation_rate", self.gene_mutation_rate)?;

        if self.max_generations == 0 {
            return Err(GeneticError::Configuration(
                "Maximum number of generations cannot be zero".to_string(),
            ));
        }

        if self.distance_threshold.is_nan() || self.distance_threshold < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Distance threshold must be non-negative, got {}",
                self.distance_threshold
            )));
        }

        Ok(())
    }

    pub fn get_num_points(&self) -> usize {
        self.num_points
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_num_selected(&self) -> usize {
        self.num_selected
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_gene_mutation_rate(&self) -> f64 {
        self.gene_mutation_rate
    }

    pub fn get_max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn get_distance_threshold(&self) -> f64 {
        self.distance_threshold
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    /// Returns the minimum population size for evaluating tours in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_num_points(&mut self, num_points: usize) {
        self.num_points = num_points;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_num_selected(&mut self, num_selected: usize) {
        self.num_selected = num_selected;
    }

    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    pub fn set_gene_mutation_rate(&mut self, gene_mutation_rate: f64) {
        self.gene_mutation_rate = gene_mutation_rate;
    }

    pub fn set_max_generations(&mut self, max_generations: usize) {
        self.max_generations = max_generations;
    }

    pub fn set_distance_threshold(&mut self, distance_threshold: f64) {
        self.distance_threshold = distance_threshold;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GeneticError::Configuration(format!(
            "{} must be a probability in [0, 1], got {}",
            name, value
        )))
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
            population_size: DEFAULT_POPULATION_SIZE,
            num_selected: DEFAULT_NUM_SELECTED,
            mutation_rate: DEFAULT_MUTATION_RATE,
            gene_mutation_rate: DEFAULT_GENE_MUTATION_RATE,
            max_generations: DEFAULT_MAX_GENERATIONS,
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            log_level: LogLevel::None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields fall back to the defaults listed in the module docs.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_points: Option<usize>,
    population_size: Option<usize>,
    num_selected: Option<usize>,
    mutation_rate: Option<f64>,
    gene_mutation_rate: Option<f64>,
    max_generations: Option<usize>,
    distance_threshold: Option<f64>,
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn num_points(mut self, value: usize) -> Self {
        self.num_points = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn num_selected(mut self, value: usize) -> Self {
        self.num_selected = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn gene_mutation_rate(mut self, value: f64) -> Self {
        self.gene_mutation_rate = Some(value);
        self
    }

    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    pub fn distance_threshold(mut self, value: f64) -> Self {
        self.distance_threshold = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance. Validation happens when a launcher
    /// is created from it.
    pub fn build(self) -> EvolutionOptions {
        let default = EvolutionOptions::default();
        EvolutionOptions {
            num_points: self.num_points.unwrap_or(default.num_points),
            population_size: self.population_size.unwrap_or(default.population_size),
            num_selected: self.num_selected.unwrap_or(default.num_selected),
            mutation_rate: self.mutation_rate.unwrap_or(default.mutation_rate),
            gene_mutation_rate: self
                .gene_mutation_rate
                .unwrap_or(default.gene_mutation_rate),
            max_generations: self.max_generations.unwrap_or(default.max_generations),
            distance_threshold: self
                .distance_threshold
                .unwrap_or(default.distance_threshold),
            log_level: self.log_level.unwrap_or(default.log_level),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(default.parallel_threshold),
        }
    }
}
