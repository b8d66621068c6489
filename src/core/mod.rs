//! Core indexing and rescaling functionality
//!
//! This module contains the hierarchical binning scheme, the in-memory
//! spatial index, and the resolution rescaling engine.

pub mod binning;
mod error;
mod index;
mod record;
mod scale;

pub use binning::{reg2bin, reg2bins, MAX_COORD};
pub use error::{
    FastG3dError, RecordError, Result, ScaleError, ScaleResult, ThreedgParseError, ThreedgResult,
};
pub use index::{LoadMode, SpatialIndex};
pub use record::{G3dRecord, Haplotype};
pub use scale::ScaleEngine;
