//! FastG3d - High-performance 3D genome structure indexing
//!
//! A Rust reimplementation of the g3d tooling core: a binning-based spatial
//! index over .3dg structure records and a resolution rescaling engine.
//!
//! # Features
//!
//! - Hierarchical interval binning (tabix-style five-level scheme)
//! - In-memory spatial index with coarse and exact range queries
//! - Gap-aware rescaling to coarser resolutions, per haplotype
//! - Support for compressed .3dg files (gzip, bzip2)
//!
//! # Example
//!
//! ```ignore
//! use fast_g3d::{ScaleEngine, ThreedgOptions};
//! use fast_g3d::formats::parse_threedg_file;
//!
//! // Load a .3dg file at 20 kb resolution
//! let index = parse_threedg_file("cell1.3dg.txt.gz", &ThreedgOptions::default())?;
//!
//! // Range query on chr1
//! let hits = index.query_range("chr1", 1_000_000, 2_000_000);
//!
//! // Rescale to 40 kb
//! let coarse = ScaleEngine::new(2)?.scale(&index)?;
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    reg2bin, reg2bins, FastG3dError, G3dRecord, Haplotype, LoadMode, RecordError, Result,
    ScaleEngine, ScaleError, SpatialIndex, ThreedgParseError,
};
pub use crate::formats::{threedg, ThreedgOptions};
