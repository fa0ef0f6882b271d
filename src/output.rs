//! Writers for the three coordinate artifacts.
//!
//! Uses itoa for integer formatting. All artifacts are rendered into
//! memory, staged as temporary files beside their destinations, and renamed
//! into place only once every one of them was written. A failed run never
//! leaves one file updated and the others stale.

use crate::commands::merge::MergeOutcome;
use crate::config::OutputPaths;
use crate::error::Result;
use crate::interval::{CanonicalInterval, ConsensusRegion};
use log::debug;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Sole content of every artifact when no prediction was found.
pub const NO_REGIONS_SENTINEL: &str = "NO PROPHAGE REGIONS FOUND";

const ALL_COORDINATES_HEADER: [&str; 5] = ["chr_name", "seq_name", "start", "end", "method"];
const FINAL_COORDINATES_HEADER: &str = "chr\tregion\tstart\tend\tlength";

/// Tab-separated coordinate writer.
///
/// Writes go straight to the sink; wrap a file in a `BufWriter` first.
pub struct CoordinateWriter<W: Write> {
    writer: W,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> CoordinateWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            writer: output,
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write a text field.
    #[inline]
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.writer.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Write an integer using itoa.
    #[inline]
    pub fn write_int<I: itoa::Integer>(&mut self, n: I) -> Result<()> {
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    #[inline]
    pub fn write_tab(&mut self) -> Result<()> {
        self.writer.write_all(b"\t")?;
        Ok(())
    }

    #[inline]
    pub fn write_newline(&mut self) -> Result<()> {
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// The un-merged, position-sorted interval table.
    ///
    /// A `seq_id` column follows `seq_name` only when some interval carries
    /// a sub-sequence index.
    pub fn write_all_coordinates(&mut self, intervals: &[CanonicalInterval]) -> Result<()> {
        let with_seq_id = intervals.iter().any(|i| i.seq_id.is_some());

        for (i, column) in ALL_COORDINATES_HEADER.iter().enumerate() {
            if i > 0 {
                self.write_tab()?;
            }
            self.write_str(column)?;
            if with_seq_id && *column == "seq_name" {
                self.write_str("\tseq_id")?;
            }
        }
        self.write_newline()?;

        for interval in intervals {
            self.write_str(&interval.chrom)?;
            self.write_tab()?;
            self.write_str(&interval.seq_name)?;
            if with_seq_id {
                self.write_tab()?;
                self.write_str(interval.seq_id.as_deref().unwrap_or(""))?;
            }
            self.write_tab()?;
            self.write_int(interval.start)?;
            self.write_tab()?;
            self.write_int(interval.end)?;
            self.write_tab()?;
            self.write_str(interval.method.as_str())?;
            self.write_newline()?;
        }
        Ok(())
    }

    /// Consensus regions, 1-based inclusive, with header.
    pub fn write_final_coordinates(&mut self, regions: &[ConsensusRegion]) -> Result<()> {
        self.write_str(FINAL_COORDINATES_HEADER)?;
        self.write_newline()?;

        for region in regions {
            self.write_str(&region.chrom)?;
            self.write_str("\tregion_")?;
            self.write_int(region.index)?;
            self.write_tab()?;
            self.write_int(region.start)?;
            self.write_tab()?;
            self.write_int(region.end)?;
            self.write_tab()?;
            self.write_int(region.length())?;
            self.write_newline()?;
        }
        Ok(())
    }

    /// Consensus regions as headerless BED (0-based start, end unchanged).
    pub fn write_bed(&mut self, regions: &[ConsensusRegion]) -> Result<()> {
        for region in regions {
            self.write_str(&region.chrom)?;
            self.write_tab()?;
            self.write_int(region.start_0based())?;
            self.write_tab()?;
            self.write_int(region.end)?;
            self.write_str("\tregion_")?;
            self.write_int(region.index)?;
            self.write_newline()?;
        }
        Ok(())
    }

    /// The no-prediction marker.
    pub fn write_sentinel(&mut self) -> Result<()> {
        self.write_str(NO_REGIONS_SENTINEL)?;
        self.write_newline()
    }

    /// Return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Rendered content of the three artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutputs {
    pub all_coordinates: Vec<u8>,
    pub final_coordinates: Vec<u8>,
    pub bed: Vec<u8>,
}

impl RenderedOutputs {
    /// Render a merge outcome.
    pub fn render(outcome: &MergeOutcome) -> Result<Self> {
        let mut all = CoordinateWriter::new(Vec::new());
        let mut fin = CoordinateWriter::new(Vec::new());
        let mut bed = CoordinateWriter::new(Vec::new());

        match outcome {
            MergeOutcome::Regions { intervals, regions } => {
                all.write_all_coordinates(intervals)?;
                fin.write_final_coordinates(regions)?;
                bed.write_bed(regions)?;
            }
            MergeOutcome::NoRegionsFound => {
                all.write_sentinel()?;
                fin.write_sentinel()?;
                bed.write_sentinel()?;
            }
        }

        Ok(Self {
            all_coordinates: all.into_inner(),
            final_coordinates: fin.into_inner(),
            bed: bed.into_inner(),
        })
    }

    /// Write every artifact to its destination.
    ///
    /// Nothing is renamed into place until all three are staged, and a
    /// staged file that is never persisted is removed on drop.
    pub fn write_to(&self, paths: &OutputPaths) -> Result<()> {
        let staged = [
            (stage(&paths.all_coordinates, &self.all_coordinates)?, &paths.all_coordinates),
            (stage(&paths.final_coordinates, &self.final_coordinates)?, &paths.final_coordinates),
            (stage(&paths.bed_file, &self.bed)?, &paths.bed_file),
        ];

        for (temp, path) in staged {
            temp.persist(path).map_err(|e| e.error)?;
            debug!("Wrote {}", path.display());
        }
        Ok(())
    }
}

/// Write `content` to a temporary file in the directory of `path`.
fn stage(path: &Path, content: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".prophage-merger-")
        .tempfile_in(dir)?;
    temp.write_all(content)?;
    temp.flush()?;
    set_output_permissions(temp.as_file())?;
    debug!("Staged {} bytes for {}", content.len(), path.display());
    Ok(temp)
}

// Temporary files are created owner-only; outputs get the usual 0644.
#[cfg(unix)]
fn set_output_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_output_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}

/// Render and write all artifacts for a merge outcome.
pub fn write_outputs(outcome: &MergeOutcome, paths: &OutputPaths) -> Result<()> {
    RenderedOutputs::render(outcome)?.write_to(paths)
}
