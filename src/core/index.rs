//! Spatial index over 3D genome records
//!
//! Two-level sparse mapping: chromosome -> bin -> records, with bins
//! computed by the hierarchical binning scheme. Range queries collect every
//! record from the candidate bins and are deliberately over-inclusive:
//! neighboring intervals in the same bin may be returned even when they do
//! not overlap the query. Callers that need exact overlap use
//! [`SpatialIndex::query_range_exact`].

use crate::core::binning::{reg2bin, reg2bins};
use crate::core::error::{RecordError, ThreedgParseError, ThreedgResult};
use crate::core::record::G3dRecord;
use log::warn;
use std::collections::HashMap;
use std::io::{self, Write};

/// Policy for malformed records during a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Abort the whole load on the first malformed record
    #[default]
    Strict,
    /// Skip malformed records and keep loading (each skip is logged)
    Lenient,
}

/// In-memory spatial index of [`G3dRecord`]s at one resolution
///
/// Every record is registered under exactly one key,
/// `(record.chrom, reg2bin(record.start, record.end))`. Insertion order is
/// preserved within a bin until [`SpatialIndex::sort_each_bin`] is called.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    /// chrom -> bin -> records (sparse on both levels)
    bins: HashMap<String, HashMap<u32, Vec<G3dRecord>>>,
    /// Coordinate span one base-level record represents
    resolution: u64,
    /// Total record count
    count: usize,
}

impl SpatialIndex {
    /// Create an empty index at the given resolution
    pub fn new(resolution: u64) -> Self {
        Self {
            bins: HashMap::new(),
            resolution,
            count: 0,
        }
    }

    /// Bulk-load validated records
    ///
    /// In [`LoadMode::Strict`] the first malformed record aborts the load
    /// and no index is returned. In [`LoadMode::Lenient`] malformed records
    /// are skipped with a warning.
    pub fn from_records<I>(records: I, resolution: u64, mode: LoadMode) -> ThreedgResult<Self>
    where
        I: IntoIterator<Item = G3dRecord>,
    {
        let mut index = Self::new(resolution);
        for (i, record) in records.into_iter().enumerate() {
            match record.validate() {
                Ok(()) => index.insert(record),
                Err(e) => match mode {
                    LoadMode::Strict => {
                        return Err(ThreedgParseError::MalformedRecord {
                            line: i + 1,
                            source: e,
                        })
                    }
                    LoadMode::Lenient => {
                        warn!("skipping malformed record {}: {}", i + 1, e);
                    }
                },
            }
        }
        Ok(index)
    }

    /// Insert a record under its computed bin
    ///
    /// The record is trusted to be well-formed (see [`G3dRecord::validate`]);
    /// no deduplication is performed.
    pub fn insert(&mut self, record: G3dRecord) {
        let bin = reg2bin(record.start, record.end);
        self.bins
            .entry(record.chrom.clone())
            .or_default()
            .entry(bin)
            .or_default()
            .push(record);
        self.count += 1;
    }

    /// Validate and insert a single record
    pub fn insert_checked(&mut self, record: G3dRecord) -> Result<(), RecordError> {
        record.validate()?;
        self.insert(record);
        Ok(())
    }

    /// Query records near the range `[start, end)` on one chromosome
    ///
    /// Returns the full content of every candidate bin: a superset of the
    /// records that actually overlap the range. False positives from
    /// neighboring intervals are possible and intentional; there are no
    /// false negatives.
    pub fn query_range(&self, chrom: &str, start: u64, end: u64) -> Vec<&G3dRecord> {
        let mut results = Vec::new();
        let Some(chrom_bins) = self.bins.get(chrom) else {
            return results;
        };
        for bin in reg2bins(start, end) {
            if let Some(records) = chrom_bins.get(&bin) {
                results.extend(records.iter());
            }
        }
        results
    }

    /// Query records that actually overlap `[start, end)`
    ///
    /// Exact-overlap layer on top of [`SpatialIndex::query_range`].
    pub fn query_range_exact(&self, chrom: &str, start: u64, end: u64) -> Vec<&G3dRecord> {
        let mut results = self.query_range(chrom, start, end);
        results.retain(|r| r.start < end && r.end > start);
        results
    }

    /// All records on one chromosome (unordered across bins)
    pub fn query_chrom(&self, chrom: &str) -> Vec<&G3dRecord> {
        let mut results = Vec::new();
        if let Some(chrom_bins) = self.bins.get(chrom) {
            for records in chrom_bins.values() {
                results.extend(records.iter());
            }
        }
        results
    }

    /// All records in the index (unordered)
    pub fn query_all(&self) -> Vec<&G3dRecord> {
        let mut results = Vec::with_capacity(self.count);
        for chrom_bins in self.bins.values() {
            for records in chrom_bins.values() {
                results.extend(records.iter());
            }
        }
        results
    }

    /// Sort every bin's record list ascending by start (stable)
    ///
    /// Idempotent; bin membership is unchanged.
    pub fn sort_each_bin(&mut self) {
        for chrom_bins in self.bins.values_mut() {
            for records in chrom_bins.values_mut() {
                records.sort_by_key(|r| r.start);
            }
        }
    }

    /// Total record count across all chromosomes and bins
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if the index holds no records
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Coordinate span one record represents
    pub fn resolution(&self) -> u64 {
        self.resolution
    }

    /// Chromosome names present in the index
    pub fn chroms(&self) -> impl Iterator<Item = &str> {
        self.bins.keys().map(|s| s.as_str())
    }

    /// Number of occupied bins on one chromosome
    pub fn bin_count(&self, chrom: &str) -> usize {
        self.bins.get(chrom).map(|b| b.len()).unwrap_or(0)
    }

    /// Write every record as one tab-separated line
    ///
    /// Order is stable within a run but chromosomes and bins are not sorted;
    /// call [`SpatialIndex::sort_each_bin`] first for sorted bins.
    pub fn dump<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for chrom_bins in self.bins.values() {
            for records in chrom_bins.values() {
                for record in records {
                    writeln!(writer, "{}", record)?;
                }
            }
        }
        Ok(())
    }
}
