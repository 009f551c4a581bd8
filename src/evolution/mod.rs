pub mod builder;
pub mod launcher;
pub mod observer;
pub mod options;

pub use builder::EvolutionLauncherBuilder;
pub use launcher::{EvolutionLauncher, EvolutionResult, GenerationOutcome, StopReason};
pub use observer::{GenerationObserver, GenerationReport, NoopObserver, TracingObserver};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
