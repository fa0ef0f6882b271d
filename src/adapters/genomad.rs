//! geNomad adapter for `*_provirus.tsv`.

use std::io::Read;
use std::path::PathBuf;

use log::debug;

use super::PredictionAdapter;
use crate::error::Result;
use crate::interval::{CanonicalInterval, Method};
use crate::table::TableReader;

/// Adapter over a geNomad provirus table.
#[derive(Debug, Clone)]
pub struct GeNomadAdapter {
    pub path: PathBuf,
}

impl GeNomadAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read intervals from an opened table.
    ///
    /// `source_seq` is kept verbatim as text so contigs named `1`, `2`, ...
    /// sort and print exactly as the other tools report them.
    pub fn from_table<R: Read>(table: TableReader<R>) -> Result<Vec<CanonicalInterval>> {
        if !table.has_header() {
            return Ok(Vec::new());
        }

        let source = table.source().to_string();
        let chrom_col = table.column("source_seq")?;
        let name_col = table.column("seq_name")?;
        let start_col = table.column("start")?;
        let end_col = table.column("end")?;

        table
            .rows()
            .map(|row| {
                let row = row?;
                CanonicalInterval::new(
                    row.get(&source, chrom_col, "source_seq")?,
                    row.get(&source, name_col, "seq_name")?,
                    row.get_u64(&source, start_col, "start")?,
                    row.get_u64(&source, end_col, "end")?,
                    Self::METHOD,
                )
            })
            .collect()
    }
}

impl PredictionAdapter for GeNomadAdapter {
    const METHOD: Method = Method::GeNomad;

    fn read(&self) -> Result<Vec<CanonicalInterval>> {
        let intervals = Self::from_table(TableReader::from_path(&self.path)?)?;
        debug!("{}: {} proviruses", Self::METHOD, intervals.len());
        Ok(intervals)
    }
}
