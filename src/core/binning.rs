//! Hierarchical interval binning
//!
//! Maps a genomic interval to integer bin identifiers using the classic
//! five-level binning scheme (as in tabix/UCSC indices). Bins act as coarse
//! locality keys: records whose intervals are close on the chromosome land
//! in the same or neighboring bins, which makes range queries cheap without
//! a full interval tree.
//!
//! # Bin layout
//!
//! ```text
//! level  shift  bin range
//! 0      26     1..=8          (64 Mb buckets)
//! 1      23     9..=72         (8 Mb buckets)
//! 2      20     73..=584       (1 Mb buckets)
//! 3      17     585..=4680     (128 kb buckets)
//! 4      14     4681..=37448   (16 kb buckets)
//! ```
//!
//! Bin 0 is the root and covers the whole coordinate space.

/// Maximum coordinate the scheme can address (2^29 = 512 Mb).
///
/// Query ends beyond this are clamped so bin enumeration stays bounded.
pub const MAX_COORD: u64 = 1 << 29;

/// Level base offsets, finest to coarsest, paired with their bit shifts.
const LEVELS: [(u32, u32); 5] = [(4681, 14), (585, 17), (73, 20), (9, 23), (1, 26)];

/// Compute the single bin containing the interval `[start, end)`.
///
/// The interval is treated as closed by decrementing `end` first. Returns
/// the finest bin whose bucket contains both endpoints, or bin 0 when the
/// interval spans a coarser boundary at every level.
///
/// Well-formed input (`end > start`) never fails.
pub fn reg2bin(start: u64, end: u64) -> u32 {
    let end = end - 1;
    for (base, shift) in LEVELS {
        if start >> shift == end >> shift {
            return base + (start >> shift) as u32;
        }
    }
    0
}

/// Enumerate every bin that could hold a record overlapping `[start, end)`.
///
/// Always includes bin 0. An empty or inverted interval (`start >= end`)
/// yields only `[0]`. The end coordinate is clamped to [`MAX_COORD`].
///
/// For any `start < end`, the result contains `reg2bin(start, end)` — the
/// property that makes range queries free of false negatives.
pub fn reg2bins(start: u64, end: u64) -> Vec<u32> {
    let mut bins = vec![0u32];
    if start >= end {
        return bins;
    }
    let end = end.min(MAX_COORD) - 1;
    for &(base, shift) in LEVELS.iter().rev() {
        for k in (base + (start >> shift) as u32)..=(base + (end >> shift) as u32) {
            bins.push(k);
        }
    }
    bins
}
