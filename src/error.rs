//! Error type shared by the adapters, the merger and the writers.

use std::io;
use thiserror::Error;

/// Errors that abort a run.
///
/// A run either produces all three artifacts or none: every variant here
/// is raised before any output file is persisted.
#[derive(Error, Debug)]
pub enum MergerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error in {source_file} at line {line}: {message}")]
    Parse {
        source_file: String,
        line: usize,
        message: String,
    },

    #[error("Missing required column '{column}' in {source_file}")]
    MissingColumn { source_file: String, column: String },

    #[error("Malformed CheckV header in {source_file}, record {record} ('{header}'): {reason}")]
    MalformedHeader {
        source_file: String,
        record: usize,
        header: String,
        reason: HeaderError,
    },

    #[error("No VirSorter2 boundary row with seqname_new '{key}'")]
    UnmatchedJoinKey { key: String },

    #[error("Invalid interval on {chrom}: start ({start}) must be >= 1 and <= end ({end})")]
    InvalidInterval { chrom: String, start: u64, end: u64 },

    #[error(
        "Cannot place CheckV provirus {seq_name} ({start}-{end}) at trim_bp_start {trim_bp_start}"
    )]
    CoordinateShift {
        seq_name: String,
        trim_bp_start: u64,
        start: u64,
        end: u64,
    },

    #[error("FASTA error in {source_file}: {message}")]
    Fasta { source_file: String, message: String },
}

impl MergerError {
    /// Convenience constructor for malformed-record errors.
    pub fn parse(source_file: &str, line: usize, message: impl Into<String>) -> Self {
        MergerError::Parse {
            source_file: source_file.to_string(),
            line,
            message: message.into(),
        }
    }
}

/// The extraction step of the CheckV header grammar that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("missing coordinate token after the sequence name")]
    MissingCoordinates,

    #[error("sequence name has no '||' separating the parent sequence")]
    MissingParentDelimiter,

    #[error("sequence name has no '_' before the sub-sequence index")]
    MissingIndexDelimiter,

    #[error("coordinate token has no '/' before the input length")]
    MissingLengthDelimiter,

    #[error("coordinate range has no '-' between start and end")]
    MissingRangeDelimiter,

    #[error("invalid {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, MergerError>;
