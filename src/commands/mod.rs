//! Command implementations for prophage-merger.

pub mod combine;
pub mod merge;

pub use combine::{CombineCommand, CombineStats};
pub use merge::{MergeCommand, MergeOutcome};
