//! # Error Types
//!
//! This module defines the error type shared by every part of the optimizer.
//! Configuration problems are reported when a launcher is built, oracle failures
//! and invariant violations abort the generation that produced them.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genroute::error::{GeneticError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if (0.0..=1.0).contains(&rate) {
//!         Ok(rate)
//!     } else {
//!         Err(GeneticError::Configuration(format!("rate {} is not a probability", rate)))
//!     }
//! }
//!
//! assert!(check_rate(0.1).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genroute::error::{GeneticError, OptionExt};
//!
//! fn shortest(distances: &[f64]) -> genroute::error::Result<f64> {
//!     distances
//!         .iter()
//!         .cloned()
//!         .reduce(f64::min)
//!         .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert_eq!(shortest(&[3.0, 1.0, 2.0]).unwrap(), 1.0);
//! assert!(shortest(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while evolving tours.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when a tour sequence is not a valid closed tour.
    ///
    /// Operators are written so that this never happens; seeing it means a bug
    /// in an operator or a hand-built sequence.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Error that occurs when the distance oracle cannot answer for a pair of points.
    #[error("Distance oracle failed for ({from}, {to}): {reason}")]
    Oracle {
        from: usize,
        to: usize,
        reason: String,
    },

    /// Error that occurs when the oracle hands back a distance that cannot be summed.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when the evolution state is used out of order.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,
}

/// A specialized Result type for optimizer operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
