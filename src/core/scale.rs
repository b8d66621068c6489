//! Resolution rescaling
//!
//! Merges runs of `fold` adjacent records into one coarser summary record,
//! per chromosome and per haplotype, producing a brand-new [`SpatialIndex`]
//! at `resolution * fold`. Coverage gaps close groups early; spacing that is
//! neither one step nor a clear gap means the input resolution is not
//! uniform and aborts the run.

use crate::core::error::{ScaleError, ScaleResult};
use crate::core::index::SpatialIndex;
use crate::core::record::{G3dRecord, Haplotype};
use log::{debug, info};

/// Rescales a [`SpatialIndex`] to a coarser resolution
#[derive(Debug, Clone, Copy)]
pub struct ScaleEngine {
    fold: u64,
}

impl ScaleEngine {
    /// Create an engine with the given aggregation factor
    ///
    /// `fold == 1` is valid and degenerates to re-binning the input
    /// unchanged.
    pub fn new(fold: u64) -> ScaleResult<Self> {
        if fold == 0 {
            return Err(ScaleError::InvalidFold(fold));
        }
        Ok(Self { fold })
    }

    /// Aggregation factor
    pub fn fold(&self) -> u64 {
        self.fold
    }

    /// Produce a new index at `index.resolution() * fold`
    ///
    /// The input index is not mutated; on error no partial result is
    /// returned.
    pub fn scale(&self, index: &SpatialIndex) -> ScaleResult<SpatialIndex> {
        let steplen = index.resolution();
        if steplen == 0 {
            return Err(ScaleError::InvalidResolution(steplen));
        }
        info!(
            "scaling {} records from resolution {} by fold {}",
            index.len(),
            steplen,
            self.fold
        );

        let mut scaled = SpatialIndex::new(steplen * self.fold);
        for chrom in index.chroms() {
            let mut streams: [Vec<G3dRecord>; 3] = [Vec::new(), Vec::new(), Vec::new()];
            for record in index.query_chrom(chrom) {
                let slot = match record.haplotype {
                    Haplotype::Paternal => 0,
                    Haplotype::Maternal => 1,
                    Haplotype::Shared => 2,
                };
                streams[slot].push(record.clone());
            }

            for stream in streams.iter_mut() {
                if stream.is_empty() {
                    continue;
                }
                stream.sort_by_key(|r| r.start);
                for group in chunk_stream(stream, steplen, self.fold)? {
                    scaled.insert(summarize(group)?);
                }
            }
        }

        debug!(
            "scaled index holds {} records at resolution {}",
            scaled.len(),
            scaled.resolution()
        );
        Ok(scaled)
    }
}

/// Split a start-sorted stream into summary groups of up to `fold` records
///
/// Iterative cursor walk (no recursion, so chromosomes with many gaps stay
/// cheap). For a candidate at distance `d` from the group anchor:
/// - `d <= steplen * (fold - 1)`: joins the current group;
/// - `d >= steplen * fold`: a gap, the group closes early and the candidate
///   anchors a new one;
/// - anything in between: the spacing contradicts the declared resolution
///   and the whole run fails.
///
/// Tail runs shorter than `fold` are kept, never dropped.
fn chunk_stream(records: &[G3dRecord], steplen: u64, fold: u64) -> ScaleResult<Vec<&[G3dRecord]>> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < records.len() {
        let anchor = &records[i];
        let mut j = i + 1;
        while j < records.len() && (j - i) < fold as usize {
            let distance = records[j].start - anchor.start;
            if distance <= steplen * (fold - 1) {
                j += 1;
            } else if distance >= steplen * fold {
                break;
            } else {
                return Err(ScaleError::InconsistentSpacing {
                    chrom: anchor.chrom.clone(),
                    anchor_start: anchor.start,
                    start: records[j].start,
                    distance,
                    resolution: steplen,
                });
            }
        }
        groups.push(&records[i..j]);
        i = j;
    }
    Ok(groups)
}

/// Collapse one group into a single summary record
///
/// Chromosome and haplotype come from the first member, the interval spans
/// first start to last end, and x/y/z are unweighted means.
fn summarize(group: &[G3dRecord]) -> ScaleResult<G3dRecord> {
    let (first, last) = match (group.first(), group.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(ScaleError::EmptySummary),
    };
    let n = group.len() as f64;
    Ok(G3dRecord {
        chrom: first.chrom.clone(),
        start: first.start,
        end: last.end,
        x: group.iter().map(|r| r.x).sum::<f64>() / n,
        y: group.iter().map(|r| r.y).sum::<f64>() / n,
        z: group.iter().map(|r| r.z).sum::<f64>() / n,
        haplotype: first.haplotype,
    })
}
