pub mod elitist;

pub use elitist::ElitistSelection;
