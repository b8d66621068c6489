//! Error types for FastG3d
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for FastG3d operations
#[derive(Debug, Error)]
pub enum FastG3dError {
    /// Malformed record errors
    #[error("Malformed record: {0}")]
    Record(#[from] RecordError),

    /// .3dg parsing errors
    #[error("3dg parse error: {0}")]
    ThreedgParse(#[from] ThreedgParseError),

    /// Rescaling errors
    #[error("Scale error: {0}")]
    Scale(#[from] ScaleError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A record violating the data-model constraints
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    /// Chromosome name must be non-empty
    #[error("empty chromosome name")]
    EmptyChrom,

    /// Interval must satisfy start < end
    #[error("inverted interval: start ({start}) >= end ({end})")]
    InvertedInterval { start: u64, end: u64 },

    /// Spatial coordinates must be finite
    #[error("non-finite {axis} coordinate: {value}")]
    NonFiniteCoordinate { axis: &'static str, value: f64 },
}

/// Errors that can occur while parsing a .3dg file
#[derive(Debug, Error)]
pub enum ThreedgParseError {
    /// Too few tab-separated fields on a data line
    #[error("line {line}: expected at least {expected} fields, got {found}")]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A field that should be numeric failed to parse
    #[error("line {line}: invalid {field} value '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Non-UTF-8 bytes in a field
    #[error("line {line}: invalid UTF-8 in {field}")]
    InvalidUtf8 { line: usize, field: &'static str },

    /// A parsed record violated the data-model constraints (strict mode)
    #[error("line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: RecordError,
    },

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during resolution rescaling
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScaleError {
    /// Aggregation factor must be at least 1
    #[error("invalid fold: {0} (must be >= 1)")]
    InvalidFold(u64),

    /// Input index resolution must be positive
    #[error("invalid input resolution: {0} (must be >= 1)")]
    InvalidResolution(u64),

    /// Record spacing is neither one step nor a clear gap
    #[error(
        "inconsistent spacing on {chrom}: {start} is {distance} bp from anchor {anchor_start}, \
         incompatible with resolution {resolution}"
    )]
    InconsistentSpacing {
        chrom: String,
        anchor_start: u64,
        start: u64,
        distance: u64,
        resolution: u64,
    },

    /// Internal invariant: a summary group must never be empty
    #[error("attempted to summarize an empty record group")]
    EmptySummary,
}

/// Result type alias for FastG3d operations
pub type Result<T> = std::result::Result<T, FastG3dError>;

/// Result type alias for .3dg parsing operations
pub type ThreedgResult<T> = std::result::Result<T, ThreedgParseError>;

/// Result type alias for rescaling operations
pub type ScaleResult<T> = std::result::Result<T, ScaleError>;
