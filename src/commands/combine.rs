//! Combine command: read all four tools, merge, write the artifacts.
//!
//! # Algorithm
//!
//! 1. Run every adapter to completion
//! 2. Concatenate the intervals (VirSorter2 + CheckV, geNomad, VIBRANT)
//! 3. Sort and sweep-merge per chromosome
//! 4. Render all three artifacts, then write them
//!
//! Any malformed input aborts the run before step 4, so no output file is
//! touched.

use crate::adapters::{
    GeNomadAdapter, PredictionAdapter, VibrantAdapter, VirSorter2CheckVAdapter,
};
use crate::commands::merge::{MergeCommand, MergeOutcome};
use crate::config::{InputPaths, OutputPaths};
use crate::error::Result;
use crate::interval::CanonicalInterval;
use crate::output::write_outputs;
use log::{info, warn};
use rustc_hash::FxHashSet;
use std::fmt;

/// Combine command configuration.
#[derive(Debug, Clone)]
pub struct CombineCommand {
    pub inputs: InputPaths,
    pub outputs: OutputPaths,
    pub merge: MergeCommand,
}

impl CombineCommand {
    /// Combine `inputs` into the default output files.
    pub fn new(inputs: InputPaths) -> Self {
        Self {
            inputs,
            outputs: OutputPaths::default(),
            merge: MergeCommand::new(),
        }
    }

    /// Set the output destinations.
    pub fn with_outputs(mut self, outputs: OutputPaths) -> Self {
        self.outputs = outputs;
        self
    }

    /// Set the merge configuration.
    pub fn with_merge(mut self, merge: MergeCommand) -> Self {
        self.merge = merge;
        self
    }

    /// Read every input and return the concatenated intervals.
    pub fn collect_intervals(&self) -> Result<(Vec<CanonicalInterval>, CombineStats)> {
        let vs2 = read_adapter(&VirSorter2CheckVAdapter::new(
            &self.inputs.virsorter2,
            &self.inputs.checkv,
        ))?;
        let genomad = read_adapter(&GeNomadAdapter::new(&self.inputs.genomad))?;
        let vibrant = read_adapter(&VibrantAdapter::new(&self.inputs.vibrant))?;

        let stats = CombineStats {
            virsorter2: vs2.len(),
            genomad: genomad.len(),
            vibrant: vibrant.len(),
            ..Default::default()
        };

        let mut intervals = vs2;
        intervals.extend(genomad);
        intervals.extend(vibrant);
        Ok((intervals, stats))
    }

    /// Read, merge and return the outcome without writing anything.
    pub fn compute(&self) -> Result<(MergeOutcome, CombineStats)> {
        let (intervals, mut stats) = self.collect_intervals()?;
        stats.chromosomes = intervals
            .iter()
            .map(|i| i.chrom.as_str())
            .collect::<FxHashSet<_>>()
            .len();

        let outcome = self.merge.merge(intervals)?;
        stats.intervals = outcome.interval_count();
        stats.regions = outcome.region_count();
        Ok((outcome, stats))
    }

    /// Execute the full run.
    pub fn run(&self) -> Result<CombineStats> {
        let (outcome, stats) = self.compute()?;

        if matches!(outcome, MergeOutcome::NoRegionsFound) {
            warn!("No prophage regions found by any tool");
        }
        write_outputs(&outcome, &self.outputs)?;

        info!("{}", stats);
        Ok(stats)
    }
}

fn read_adapter<A: PredictionAdapter>(adapter: &A) -> Result<Vec<CanonicalInterval>> {
    let intervals = adapter.read()?;
    if intervals.is_empty() {
        warn!("{}: no predictions", A::METHOD);
    }
    Ok(intervals)
}

/// Counts reported after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombineStats {
    /// Intervals from VirSorter2 + CheckV
    pub virsorter2: usize,
    /// Intervals from geNomad
    pub genomad: usize,
    /// Intervals from VIBRANT
    pub vibrant: usize,
    /// Total intervals merged
    pub intervals: usize,
    /// Consensus regions written
    pub regions: usize,
    /// Distinct chromosomes carrying a prediction
    pub chromosomes: usize,
}

impl fmt::Display for CombineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} intervals (VirSorter2 + CheckV: {}, GeNomad: {}, Vibrant: {}) merged into {} regions on {} chromosomes",
            self.intervals,
            self.virsorter2,
            self.genomad,
            self.vibrant,
            self.regions,
            self.chromosomes
        )
    }
}
