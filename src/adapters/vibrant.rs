//! VIBRANT adapter for `VIBRANT_integrated_prophage_coordinates*.tsv`.
//!
//! VIBRANT copies the full FASTA definition line into its `scaffold`
//! column, so the contig name is cut at the first whitespace to match the
//! names the other tools report.

use std::io::Read;
use std::path::PathBuf;

use log::debug;

use super::PredictionAdapter;
use crate::error::{MergerError, Result};
use crate::interval::{CanonicalInterval, Method};
use crate::table::TableReader;

/// Adapter over a VIBRANT integrated prophage table.
#[derive(Debug, Clone)]
pub struct VibrantAdapter {
    pub path: PathBuf,
}

impl VibrantAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read intervals from an opened table.
    pub fn from_table<R: Read>(table: TableReader<R>) -> Result<Vec<CanonicalInterval>> {
        if !table.has_header() {
            return Ok(Vec::new());
        }

        let source = table.source().to_string();
        let scaffold_col = table.column("scaffold")?;
        let fragment_col = table.column("fragment")?;
        let start_col = table.column("nucleotide start")?;
        let stop_col = table.column("nucleotide stop")?;

        table
            .rows()
            .map(|row| {
                let row = row?;
                let scaffold = row.get(&source, scaffold_col, "scaffold")?;
                let chrom = scaffold_name(scaffold).ok_or_else(|| {
                    MergerError::parse(&source, row.line, "Empty scaffold name")
                })?;

                CanonicalInterval::new(
                    chrom,
                    row.get(&source, fragment_col, "fragment")?,
                    row.get_u64(&source, start_col, "nucleotide start")?,
                    row.get_u64(&source, stop_col, "nucleotide stop")?,
                    Self::METHOD,
                )
            })
            .collect()
    }
}

/// First whitespace-delimited token of a scaffold field.
pub fn scaffold_name(scaffold: &str) -> Option<&str> {
    scaffold.split_whitespace().next()
}

impl PredictionAdapter for VibrantAdapter {
    const METHOD: Method = Method::Vibrant;

    fn read(&self) -> Result<Vec<CanonicalInterval>> {
        let intervals = Self::from_table(TableReader::from_path(&self.path)?)?;
        debug!("{}: {} prophages", Self::METHOD, intervals.len());
        Ok(intervals)
    }
}
