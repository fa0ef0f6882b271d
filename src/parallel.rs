//! Sorting and chromosome grouping, parallelized with Rayon.

use crate::interval::CanonicalInterval;
use rayon::prelude::*;

/// Minimum number of intervals before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Stable sort by (chromosome, start).
///
/// Intervals with equal keys keep the order the adapters produced them in.
pub fn sort_by_position(intervals: &mut [CanonicalInterval], threshold: usize) {
    if intervals.len() >= threshold {
        intervals.par_sort_by(|a, b| a.cmp_position(b));
    } else {
        intervals.sort_by(|a, b| a.cmp_position(b));
    }
}

/// Split a position-sorted slice into one run per chromosome.
pub fn chromosome_runs(sorted: &[CanonicalInterval]) -> Vec<(&str, &[CanonicalInterval])> {
    sorted
        .chunk_by(|a, b| a.chrom == b.chrom)
        .map(|run| (run[0].chrom.as_str(), run))
        .collect()
}

/// Apply `f` to every chromosome run, in parallel above `threshold`.
///
/// Results come back in chromosome order either way.
pub fn process_chromosomes<F, T>(sorted: &[CanonicalInterval], threshold: usize, f: F) -> Vec<T>
where
    F: Fn(&str, &[CanonicalInterval]) -> T + Sync + Send,
    T: Send,
{
    let runs = chromosome_runs(sorted);
    if sorted.len() >= threshold {
        runs.into_par_iter()
            .map(|(chrom, run)| f(chrom, run))
            .collect()
    } else {
        runs.into_iter().map(|(chrom, run)| f(chrom, run)).collect()
    }
}
