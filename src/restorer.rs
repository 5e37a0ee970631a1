//! Reconstruction of truncated water level readings
//!
//! Historical sheets hold one column per month and one row per day. Most readings
//! were keyed in as their fractional digits only ("17" for ".17"); the integer part
//! is recovered from the last full reading in the same column.

pub mod classifier;
pub mod coordinates;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod tracker;

// Re-export commonly used items
pub use classifier::{classify, reconstruct, CellOutcome, CellText};
pub use coordinates::{day_of, month_of};
pub use engine::WaterLevelRestorer;
pub use error::RestoreError;
pub use outcome::ProcessingOutcome;
pub use tracker::ContinuityTracker;
