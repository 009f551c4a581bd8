//! # Generation Observers
//!
//! After every generation the launcher hands a [`GenerationReport`] to a
//! [`GenerationObserver`]. Observers are where rendering or progress output hooks
//! in; nothing they do feeds back into the run.
//!
//! Any `FnMut(&GenerationReport)` closure is an observer:
//!
//! ```rust
//! use genroute::evolution::{GenerationObserver, GenerationReport};
//!
//! let mut history = Vec::new();
//! let mut observer = |report: &GenerationReport<'_>| history.push(report.best_distance);
//!
//! observer.on_generation_complete(&GenerationReport {
//!     generation: 1,
//!     best_sequence: &[2, 1, 0],
//!     generation_best: 12.5,
//!     best_distance: 12.5,
//!     finished: false,
//! });
//! assert_eq!(history, vec![12.5]);
//! ```

use tracing::info;

/// What the launcher knows at the end of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport<'a> {
    /// 1-based number of the generation just evaluated.
    pub generation: usize,
    /// Visiting order of this generation's best tour.
    pub best_sequence: &'a [usize],
    /// Distance of this generation's best tour.
    pub generation_best: f64,
    /// Best distance seen in any generation so far.
    pub best_distance: f64,
    /// Whether a stopping condition fired on this generation.
    pub finished: bool,
}

/// Receives a report after every generation.
pub trait GenerationObserver {
    fn on_generation_complete(&mut self, report: &GenerationReport<'_>);
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationReport<'_>),
{
    fn on_generation_complete(&mut self, report: &GenerationReport<'_>) {
        self(report)
    }
}

/// Ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn on_generation_complete(&mut self, _report: &GenerationReport<'_>) {}
}

/// Logs progress through `tracing`.
///
/// Every generation gets a one-line summary. Every `detail_every` generations, and
/// on the final one, the full visiting order of the best tour is logged as well.
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    detail_every: usize,
}

impl TracingObserver {
    /// `detail_every == 0` disables the periodic detail line.
    pub fn new(detail_every: usize) -> Self {
        Self { detail_every }
    }

    /// Whether `report` gets the detailed line.
    pub fn wants_detail(&self, report: &GenerationReport<'_>) -> bool {
        report.finished || (self.detail_every > 0 && report.generation % self.detail_every == 0)
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl GenerationObserver for TracingObserver {
    fn on_generation_complete(&mut self, report: &GenerationReport<'_>) {
        info!(
            generation = report.generation,
            "Generation: {} Shortest distance: {:.2} units", report.generation, report.best_distance
        );

        if self.wants_detail(report) {
            info!(
                generation = report.generation,
                generation_best = report.generation_best,
                "Best route {:?}",
                report.best_sequence
            );
        }
    }
}
