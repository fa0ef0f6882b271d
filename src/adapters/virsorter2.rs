//! VirSorter2 + CheckV adapter.
//!
//! VirSorter2 writes a boundary table with the trim offset of every viral
//! sub-sequence it cut out of a host contig. CheckV then trims host
//! flanks from those sub-sequences and writes them to a FASTA file whose
//! headers carry the local coordinates:
//!
//! ```text
//! >NODE_1||0_partial_1 1501-20800/31000
//! ```
//!
//! The header is read with an explicit grammar, the sub-sequence name is
//! joined to the boundary table and the local coordinates are shifted by
//! the trim offset onto the host contig.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use noodles::fasta;
use rustc_hash::FxHashMap;

use super::PredictionAdapter;
use crate::error::{HeaderError, MergerError, Result};
use crate::interval::{CanonicalInterval, Method};
use crate::table::TableReader;

const SEQNAME_COLUMN: &str = "seqname_new";
const TRIM_START_COLUMN: &str = "trim_bp_start";

/// Trim offsets keyed by VirSorter2 sub-sequence name.
#[derive(Debug, Clone, Default)]
pub struct BoundaryTable {
    offsets: FxHashMap<String, u64>,
}

impl BoundaryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a VirSorter2 `final-viral-boundary.tsv`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_table(TableReader::from_path(path)?)
    }

    /// Load from an already-opened table.
    pub fn from_table<R: Read>(table: TableReader<R>) -> Result<Self> {
        let mut boundaries = Self::new();
        if !table.has_header() {
            return Ok(boundaries);
        }

        let source = table.source().to_string();
        let name_col = table.column(SEQNAME_COLUMN)?;
        let trim_col = table.column(TRIM_START_COLUMN)?;

        for row in table.rows() {
            let row = row?;
            let name = row.get(&source, name_col, SEQNAME_COLUMN)?.trim();
            let offset = row.get_u64(&source, trim_col, TRIM_START_COLUMN)?;

            if let Some(&previous) = boundaries.offsets.get(name) {
                if previous != offset {
                    return Err(MergerError::parse(
                        &source,
                        row.line,
                        format!(
                            "Conflicting {} for '{}': {} and {}",
                            TRIM_START_COLUMN, name, previous, offset
                        ),
                    ));
                }
                continue;
            }
            boundaries.insert(name.to_string(), offset);
        }

        Ok(boundaries)
    }

    /// Register a trim offset.
    pub fn insert(&mut self, seqname: String, trim_bp_start: u64) {
        self.offsets.insert(seqname, trim_bp_start);
    }

    /// Trim offset for a sub-sequence.
    #[inline]
    pub fn trim_start(&self, seqname: &str) -> Option<u64> {
        self.offsets.get(seqname).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// The fields packed into a CheckV provirus header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvirusHeader {
    /// Host contig, the part of the name before the last `||`.
    pub chrom: String,
    /// VirSorter2 sub-sequence name, the join key into the boundary table.
    pub seq_name: String,
    /// CheckV provirus index within the sub-sequence.
    pub seq_id: String,
    /// 1-based start within the sub-sequence.
    pub start: u64,
    /// 1-based inclusive end within the sub-sequence.
    pub end: u64,
    /// Length of the sub-sequence CheckV was given.
    pub input_length: u64,
}

impl ProvirusHeader {
    /// Parse `<name> <start>-<end>/<length> ...`.
    ///
    /// Each step checks its delimiter before splitting so that a malformed
    /// header reports which part is missing.
    pub fn parse(header: &str) -> std::result::Result<Self, HeaderError> {
        let mut tokens = header.split_whitespace();
        let name = tokens.next().unwrap_or("");
        let coords = tokens.next().ok_or(HeaderError::MissingCoordinates)?;

        let (chrom, _) = name
            .rsplit_once("||")
            .ok_or(HeaderError::MissingParentDelimiter)?;
        let (seq_name, seq_id) = name
            .rsplit_once('_')
            .ok_or(HeaderError::MissingIndexDelimiter)?;

        let (range, input_length) = coords
            .split_once('/')
            .ok_or(HeaderError::MissingLengthDelimiter)?;
        let (start, end) = range
            .split_once('-')
            .ok_or(HeaderError::MissingRangeDelimiter)?;

        Ok(Self {
            chrom: chrom.trim().to_string(),
            seq_name: seq_name.trim().to_string(),
            seq_id: seq_id.trim().to_string(),
            start: parse_number(start, "start")?,
            end: parse_number(end, "end")?,
            input_length: parse_number(input_length, "input length")?,
        })
    }

    /// Project the local coordinates onto the host contig.
    pub fn to_interval(&self, trim_bp_start: u64) -> Result<CanonicalInterval> {
        let shift = |local: u64| trim_bp_start.checked_add(local).and_then(|v| v.checked_sub(1));
        match (shift(self.start), shift(self.end)) {
            (Some(start), Some(end)) => Ok(CanonicalInterval::new(
                self.chrom.clone(),
                self.seq_name.clone(),
                start,
                end,
                Method::VirSorter2CheckV,
            )?
            .with_seq_id(self.seq_id.clone())),
            _ => Err(MergerError::CoordinateShift {
                seq_name: self.seq_name.clone(),
                trim_bp_start,
                start: self.start,
                end: self.end,
            }),
        }
    }
}

fn parse_number(value: &str, field: &'static str) -> std::result::Result<u64, HeaderError> {
    value
        .trim()
        .parse()
        .map_err(|_| HeaderError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Read all CheckV provirus headers from a FASTA stream.
pub fn read_provirus_headers<R: BufRead>(
    reader: R,
    source: &str,
) -> Result<Vec<ProvirusHeader>> {
    let mut fasta_reader = fasta::io::Reader::new(reader);
    let mut headers = Vec::new();

    for (i, result) in fasta_reader.records().enumerate() {
        let record = result.map_err(|e| MergerError::Fasta {
            source_file: source.to_string(),
            message: format!("Failed to parse FASTA record: {e}"),
        })?;

        let name = String::from_utf8_lossy(record.name());
        let header = match record.description() {
            Some(description) => format!("{} {}", name, String::from_utf8_lossy(description)),
            None => name.to_string(),
        };

        let parsed = ProvirusHeader::parse(&header).map_err(|reason| {
            MergerError::MalformedHeader {
                source_file: source.to_string(),
                record: i + 1,
                header: header.clone(),
                reason,
            }
        })?;
        headers.push(parsed);
    }

    Ok(headers)
}

/// Join parsed headers to the boundary table.
///
/// Returns nothing when either side is empty. Otherwise every header must
/// find its trim offset.
pub fn join_boundaries(
    headers: &[ProvirusHeader],
    boundaries: &BoundaryTable,
) -> Result<Vec<CanonicalInterval>> {
    if headers.is_empty() || boundaries.is_empty() {
        return Ok(Vec::new());
    }

    headers
        .iter()
        .map(|header| {
            let trim = boundaries.trim_start(&header.seq_name).ok_or_else(|| {
                MergerError::UnmatchedJoinKey {
                    key: header.seq_name.clone(),
                }
            })?;
            header.to_interval(trim)
        })
        .collect()
}

/// Adapter over a VirSorter2 boundary table and a CheckV provirus FASTA.
#[derive(Debug, Clone)]
pub struct VirSorter2CheckVAdapter {
    pub boundary_path: PathBuf,
    pub provirus_path: PathBuf,
}

impl VirSorter2CheckVAdapter {
    pub fn new(boundary_path: impl Into<PathBuf>, provirus_path: impl Into<PathBuf>) -> Self {
        Self {
            boundary_path: boundary_path.into(),
            provirus_path: provirus_path.into(),
        }
    }
}

impl PredictionAdapter for VirSorter2CheckVAdapter {
    const METHOD: Method = Method::VirSorter2CheckV;

    fn read(&self) -> Result<Vec<CanonicalInterval>> {
        let boundaries = BoundaryTable::from_path(&self.boundary_path)?;

        let file = File::open(&self.provirus_path)?;
        let source = self.provirus_path.display().to_string();
        let headers = read_provirus_headers(BufReader::new(file), &source)?;

        debug!(
            "{}: {} boundary rows, {} CheckV proviruses",
            Self::METHOD,
            boundaries.len(),
            headers.len()
        );
        if !headers.is_empty() && boundaries.is_empty() {
            warn!(
                "{}: boundary table {} is empty, ignoring {} CheckV proviruses",
                Self::METHOD,
                self.boundary_path.display(),
                headers.len()
            );
        }

        join_boundaries(&headers, &boundaries)
    }
}
