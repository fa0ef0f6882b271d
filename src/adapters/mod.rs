//! Format adapters, one per upstream prediction tool.
//!
//! Each adapter reads its tool's native output completely and returns the
//! predictions as [`CanonicalInterval`]s tagged with the tool's [`Method`].
//! Adapters are independent and share no state. An input that holds no
//! predictions yields an empty vector, never an error.

pub mod genomad;
pub mod vibrant;
pub mod virsorter2;

pub use genomad::GeNomadAdapter;
pub use vibrant::VibrantAdapter;
pub use virsorter2::{BoundaryTable, ProvirusHeader, VirSorter2CheckVAdapter};

use crate::error::Result;
use crate::interval::{CanonicalInterval, Method};

/// A reader that turns one tool's output into canonical intervals.
pub trait PredictionAdapter {
    /// Provenance tag applied to every emitted interval.
    const METHOD: Method;

    /// Read and normalize all predictions.
    fn read(&self) -> Result<Vec<CanonicalInterval>>;
}
