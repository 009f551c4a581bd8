pub mod breeding;
pub mod error;
pub mod evolution;
pub mod operators;
pub mod oracle;
pub mod population;
pub mod rng;
pub mod selection;
pub mod tour;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionLauncher, EvolutionOptions, EvolutionResult, StopReason};
pub use oracle::{DistanceOracle, Point, Scene};
pub use tour::Tour;
