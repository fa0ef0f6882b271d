//! Core interval types for prophage coordinates.
//!
//! All positions here are 1-based and inclusive, the convention the
//! upstream prediction tools report in. Conversion to 0-based half-open
//! coordinates happens only when the BED artifact is written.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{MergerError, Result};

/// The prediction tool an interval came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    VirSorter2CheckV,
    GeNomad,
    Vibrant,
}

impl Method {
    /// Label written to the `method` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::VirSorter2CheckV => "VirSorter2 + CheckV",
            Method::GeNomad => "GeNomad",
            Method::Vibrant => "Vibrant",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single prophage prediction after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalInterval {
    /// Host sequence the prediction lies on. Always kept as text, even when
    /// the name looks numeric.
    pub chrom: String,
    /// Tool-specific name of the predicted (sub-)sequence.
    pub seq_name: String,
    /// Sub-sequence index, only reported by VirSorter2 + CheckV.
    pub seq_id: Option<String>,
    pub start: u64,
    pub end: u64,
    pub method: Method,
}

impl CanonicalInterval {
    /// Create a validated interval.
    ///
    /// Rejects `start > end` and `start == 0`; the merge sweep is only
    /// defined over well-formed 1-based intervals.
    pub fn new(
        chrom: impl Into<String>,
        seq_name: impl Into<String>,
        start: u64,
        end: u64,
        method: Method,
    ) -> Result<Self> {
        let chrom = chrom.into();
        if start == 0 || start > end {
            return Err(MergerError::InvalidInterval { chrom, start, end });
        }
        Ok(Self {
            chrom,
            seq_name: seq_name.into(),
            seq_id: None,
            start,
            end,
            method,
        })
    }

    /// Attach a sub-sequence index.
    pub fn with_seq_id(mut self, seq_id: impl Into<String>) -> Self {
        self.seq_id = Some(seq_id.into());
        self
    }

    /// Number of bases covered.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false for a validated interval.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Ordering used for the combined table: chromosome, then start.
    ///
    /// Ties are left to the (stable) sort so that adapter order survives.
    #[inline]
    pub fn cmp_position(&self, other: &Self) -> Ordering {
        self.chrom
            .cmp(&other.chrom)
            .then(self.start.cmp(&other.start))
    }
}

/// A merged, non-redundant prophage region on one chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusRegion {
    pub chrom: String,
    /// 1-based index of the region within its chromosome.
    pub index: usize,
    pub start: u64,
    pub end: u64,
}

impl ConsensusRegion {
    pub fn new(chrom: impl Into<String>, index: usize, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            index,
            start,
            end,
        }
    }

    /// Region label, e.g. `region_3`.
    pub fn region_id(&self) -> String {
        format!("region_{}", self.index)
    }

    /// Inclusive length, `end - start + 1`.
    #[inline]
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Start in 0-based half-open coordinates.
    #[inline]
    pub fn start_0based(&self) -> u64 {
        self.start - 1
    }
}
