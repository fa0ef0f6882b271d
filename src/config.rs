//! Input and output locations for a run.
//!
//! A run is a pure function of these paths; nothing here is global.

use std::path::{Path, PathBuf};

/// Default name of the un-merged interval table.
pub const DEFAULT_ALL_COORDINATES: &str = "all_coordinates.txt";
/// Default name of the consensus region table.
pub const DEFAULT_FINAL_COORDINATES: &str = "final_coordinates.txt";
/// Default name of the 0-based BED file.
pub const DEFAULT_BED_FILE: &str = "final_coordinates_0-based.bed";

/// The four upstream prediction files. All are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// VirSorter2 `final-viral-boundary.tsv`
    pub virsorter2: PathBuf,
    /// CheckV `proviruses.fna`
    pub checkv: PathBuf,
    /// geNomad `*_provirus.tsv`
    pub genomad: PathBuf,
    /// VIBRANT integrated prophage coordinates table
    pub vibrant: PathBuf,
}

impl InputPaths {
    pub fn new(
        virsorter2: impl Into<PathBuf>,
        checkv: impl Into<PathBuf>,
        genomad: impl Into<PathBuf>,
        vibrant: impl Into<PathBuf>,
    ) -> Self {
        Self {
            virsorter2: virsorter2.into(),
            checkv: checkv.into(),
            genomad: genomad.into(),
            vibrant: vibrant.into(),
        }
    }
}

/// Destinations of the three artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub all_coordinates: PathBuf,
    pub final_coordinates: PathBuf,
    pub bed_file: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            all_coordinates: PathBuf::from(DEFAULT_ALL_COORDINATES),
            final_coordinates: PathBuf::from(DEFAULT_FINAL_COORDINATES),
            bed_file: PathBuf::from(DEFAULT_BED_FILE),
        }
    }
}

impl OutputPaths {
    /// Default file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            all_coordinates: dir.join(DEFAULT_ALL_COORDINATES),
            final_coordinates: dir.join(DEFAULT_FINAL_COORDINATES),
            bed_file: dir.join(DEFAULT_BED_FILE),
        }
    }

    /// Override any subset of the defaults.
    pub fn with_overrides(
        all_coordinates: Option<PathBuf>,
        final_coordinates: Option<PathBuf>,
        bed_file: Option<PathBuf>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            all_coordinates: all_coordinates.unwrap_or(defaults.all_coordinates),
            final_coordinates: final_coordinates.unwrap_or(defaults.final_coordinates),
            bed_file: bed_file.unwrap_or(defaults.bed_file),
        }
    }
}
