//! prophage-merger: consensus prophage regions from multiple predictors
//!
//! This library normalizes prophage predictions from VirSorter2 + CheckV,
//! geNomad and VIBRANT into one interval schema and merges overlapping
//! predictions on each host sequence into non-redundant consensus regions.
//!
//! # Features
//!
//! - **One adapter per tool**: each upstream format is parsed by name-indexed
//!   columns or an explicit header grammar
//! - **Running-maximum sweep**: a single pass per chromosome after a stable sort
//! - **Parallel processing**: chromosomes are swept with Rayon on large inputs
//!
//! # Example
//!
//! ```rust,no_run
//! use prophage_merger::commands::CombineCommand;
//! use prophage_merger::config::InputPaths;
//!
//! let inputs = InputPaths::new(
//!     "final-viral-boundary.tsv",
//!     "proviruses.fna",
//!     "genome_provirus.tsv",
//!     "VIBRANT_integrated_prophage_coordinates.tsv",
//! );
//! let stats = CombineCommand::new(inputs).run().unwrap();
//! println!("{}", stats);
//! ```

pub mod adapters;
pub mod commands;
pub mod config;
pub mod error;
pub mod interval;
pub mod output;
pub mod parallel;
pub mod table;

// Re-export commonly used types
pub use error::{MergerError, Result};
pub use interval::{CanonicalInterval, ConsensusRegion, Method};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::adapters::{
        GeNomadAdapter, PredictionAdapter, VibrantAdapter, VirSorter2CheckVAdapter,
    };
    pub use crate::commands::{CombineCommand, CombineStats, MergeCommand, MergeOutcome};
    pub use crate::config::{InputPaths, OutputPaths};
    pub use crate::error::{MergerError, Result};
    pub use crate::interval::{CanonicalInterval, ConsensusRegion, Method};
}
