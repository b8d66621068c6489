//! File format adapters
//!
//! The .3dg text reader and the line-oriented output sinks.

pub mod output;
pub mod threedg;

pub use output::create_line_sink;
pub use threedg::{
    detect_compression, parse_threedg_bytes, parse_threedg_file, parse_threedg_reader,
    CompressionFormat, ThreedgOptions, DEFAULT_RESOLUTION,
};
