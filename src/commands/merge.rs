//! Consensus merge of prophage predictions.
//!
//! Uses a stable (chromosome, start) sort followed by a single-pass
//! running-maximum sweep per chromosome.

use crate::error::{MergerError, Result};
use crate::interval::{CanonicalInterval, ConsensusRegion};
use crate::parallel::{process_chromosomes, sort_by_position, PARALLEL_THRESHOLD};

/// Result of a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// At least one prediction was found.
    Regions {
        /// Every input interval, sorted by (chromosome, start).
        intervals: Vec<CanonicalInterval>,
        /// Consensus regions in chromosome order, then region order.
        regions: Vec<ConsensusRegion>,
    },
    /// No adapter produced any prediction.
    NoRegionsFound,
}

impl MergeOutcome {
    /// Number of consensus regions.
    pub fn region_count(&self) -> usize {
        match self {
            MergeOutcome::Regions { regions, .. } => regions.len(),
            MergeOutcome::NoRegionsFound => 0,
        }
    }

    /// Number of input intervals.
    pub fn interval_count(&self) -> usize {
        match self {
            MergeOutcome::Regions { intervals, .. } => intervals.len(),
            MergeOutcome::NoRegionsFound => 0,
        }
    }
}

/// Merge command configuration.
#[derive(Debug, Clone)]
pub struct MergeCommand {
    /// Interval count from which sorting and sweeping run in parallel
    pub parallel_threshold: usize,
}

impl Default for MergeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeCommand {
    pub fn new() -> Self {
        Self {
            parallel_threshold: PARALLEL_THRESHOLD,
        }
    }

    /// Set the parallelization threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sort the union of all adapter outputs and merge it into regions.
    pub fn merge(&self, mut intervals: Vec<CanonicalInterval>) -> Result<MergeOutcome> {
        if intervals.is_empty() {
            return Ok(MergeOutcome::NoRegionsFound);
        }

        if let Some(bad) = intervals.iter().find(|i| i.start == 0 || i.start > i.end) {
            return Err(MergerError::InvalidInterval {
                chrom: bad.chrom.clone(),
                start: bad.start,
                end: bad.end,
            });
        }

        sort_by_position(&mut intervals, self.parallel_threshold);
        let regions = self.merge_sorted(&intervals);

        Ok(MergeOutcome::Regions { intervals, regions })
    }

    /// Merge intervals already sorted by (chromosome, start).
    pub fn merge_sorted(&self, sorted: &[CanonicalInterval]) -> Vec<ConsensusRegion> {
        process_chromosomes(sorted, self.parallel_threshold, merge_chromosome)
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Running-maximum sweep over one chromosome's start-sorted intervals.
///
/// An interval opens a new region when its start lies strictly past the
/// largest end seen so far on the chromosome; otherwise it shares at least
/// one base with the current region and is absorbed. Comparing against the
/// running maximum rather than the previous interval's end keeps a short
/// interval nested inside a long one from splitting the region.
pub fn merge_chromosome(chrom: &str, intervals: &[CanonicalInterval]) -> Vec<ConsensusRegion> {
    let mut regions = Vec::new();
    let mut running_max: u64 = 0;
    let mut current: Option<(u64, u64)> = None;

    for interval in intervals {
        // start >= 1, so the first interval always opens a region
        if interval.start > running_max {
            if let Some((start, end)) = current.take() {
                regions.push(ConsensusRegion::new(chrom, regions.len() + 1, start, end));
            }
            current = Some((interval.start, interval.end));
        } else if let Some((start, end)) = current.as_mut() {
            *start = (*start).min(interval.start);
            *end = (*end).max(interval.end);
        }

        running_max = running_max.max(interval.end);
    }

    if let Some((start, end)) = current {
        regions.push(ConsensusRegion::new(chrom, regions.len() + 1, start, end));
    }

    regions
}
