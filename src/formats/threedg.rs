//! .3dg format reader
//!
//! Parses the text format produced by single-cell 3D genome reconstruction
//! pipelines (dip-c and friends).
//!
//! # .3dg format
//!
//! ```text
//! 1(pat)   1420000   0.791336   7.067414   -3.548617
//! 1(pat)   1440000   0.871246   7.234254   -3.369943
//! ```
//!
//! Tab-separated: chromosome with a parenthesized haplotype tag, bin start,
//! then x/y/z. Bin ends are implied by the reconstruction resolution.
//! Chromosome names without a `chr` prefix get one.

use crate::core::{G3dRecord, Haplotype, LoadMode, SpatialIndex, ThreedgParseError, ThreedgResult};
use log::{info, warn};
use memchr::memchr;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Default reconstruction resolution of published .3dg files (20 kb)
pub const DEFAULT_RESOLUTION: u64 = 20000;

/// Options controlling a .3dg load
#[derive(Debug, Clone)]
pub struct ThreedgOptions {
    /// Coordinate span of one input record (sets `end = start + resolution`)
    pub resolution: u64,
    /// Malformed-line policy
    pub mode: LoadMode,
    /// Only load records from this chromosome
    pub chrom: Option<String>,
    /// Skip the first line
    pub skip_header: bool,
}

impl Default for ThreedgOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            mode: LoadMode::default(),
            chrom: None,
            skip_header: false,
        }
    }
}

/// Compression format of a .3dg file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression from file extension and magic bytes
pub fn detect_compression(path: &Path) -> ThreedgResult<CompressionFormat> {
    use std::fs::File;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    // BZ2 magic: "BZh"
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

/// Parse a .3dg file into a [`SpatialIndex`]
///
/// Automatically handles gzip and bzip2 compression.
pub fn parse_threedg_file<P: AsRef<Path>>(
    path: P,
    options: &ThreedgOptions,
) -> ThreedgResult<SpatialIndex> {
    use std::fs::File;

    let path = path.as_ref();
    let format = detect_compression(path)?;
    let file = File::open(path)?;

    match format {
        CompressionFormat::Gzip => {
            let decoder = flate2::read::GzDecoder::new(file);
            let reader = BufReader::with_capacity(128 * 1024, decoder);
            parse_threedg_reader(reader, options)
        }
        CompressionFormat::Bzip2 => {
            let decoder = bzip2::read::BzDecoder::new(file);
            let reader = BufReader::with_capacity(128 * 1024, decoder);
            parse_threedg_reader(reader, options)
        }
        CompressionFormat::Plain => {
            let reader = BufReader::with_capacity(128 * 1024, file);
            parse_threedg_reader(reader, options)
        }
    }
}

/// Parse .3dg data from any `BufRead` source
pub fn parse_threedg_reader<R: BufRead>(
    reader: R,
    options: &ThreedgOptions,
) -> ThreedgResult<SpatialIndex> {
    let mut index = SpatialIndex::new(options.resolution);
    let mut count = 0usize;

    for (i, line_result) in reader.lines().enumerate() {
        let line_number = i + 1;
        let line = line_result?;
        let trimmed = line.trim();
        if trimmed.is_empty() || (options.skip_header && line_number == 1) {
            continue;
        }

        let record = match parse_threedg_line(trimmed, line_number, options.resolution) {
            Ok(r) => r,
            Err(e) => match options.mode {
                LoadMode::Strict => return Err(e),
                LoadMode::Lenient => {
                    warn!("skipping {}", e);
                    continue;
                }
            },
        };

        if let Some(ref only) = options.chrom {
            if record.chrom != *only {
                continue;
            }
        }

        if let Err(e) = record.validate() {
            match options.mode {
                LoadMode::Strict => {
                    return Err(ThreedgParseError::MalformedRecord {
                        line: line_number,
                        source: e,
                    })
                }
                LoadMode::Lenient => {
                    warn!("skipping line {}: {}", line_number, e);
                    continue;
                }
            }
        }

        index.insert(record);
        count += 1;
    }

    info!("read {} records at resolution {}", count, options.resolution);
    Ok(index)
}

/// Parse .3dg data from a byte slice (for testing)
pub fn parse_threedg_bytes(data: &[u8], options: &ThreedgOptions) -> ThreedgResult<SpatialIndex> {
    parse_threedg_reader(BufReader::new(data), options)
}

/// Parse one .3dg data line
fn parse_threedg_line(
    line: &str,
    line_number: usize,
    resolution: u64,
) -> ThreedgResult<G3dRecord> {
    let fields = split_fields(line.as_bytes());
    if fields.len() < 5 {
        return Err(ThreedgParseError::TooFewFields {
            line: line_number,
            expected: 5,
            found: fields.len(),
        });
    }

    let name = std::str::from_utf8(fields[0])
        .map_err(|_| ThreedgParseError::InvalidUtf8 { line: line_number, field: "chrom" })?;
    let (chrom, haplotype) = parse_name_field(name);

    let start = parse_u64(fields[1], "start", line_number)?;
    let x = parse_f64(fields[2], "x", line_number)?;
    let y = parse_f64(fields[3], "y", line_number)?;
    let z = parse_f64(fields[4], "z", line_number)?;

    Ok(G3dRecord {
        chrom,
        start,
        end: start + resolution,
        x,
        y,
        z,
        haplotype,
    })
}

/// Split a line on tab characters using memchr
fn split_fields(line: &[u8]) -> Vec<&[u8]> {
    let mut fields = Vec::with_capacity(5);
    let mut pos = 0;
    while pos <= line.len() {
        match memchr(b'\t', &line[pos..]) {
            Some(tab) => {
                fields.push(&line[pos..pos + tab]);
                pos += tab + 1;
            }
            None => {
                fields.push(&line[pos..]);
                break;
            }
        }
    }
    fields
}

/// Split `1(pat)` into a `chr`-prefixed chromosome name and a haplotype
///
/// A name without a parenthesized tag is treated as unphased.
fn parse_name_field(name: &str) -> (String, Haplotype) {
    let (base, tag) = match name.find('(') {
        Some(open) => {
            let tag = name[open + 1..].trim_end_matches(')');
            (&name[..open], tag)
        }
        None => (name, ""),
    };
    let chrom = if base.starts_with("chr") {
        base.to_string()
    } else {
        format!("chr{}", base)
    };
    (chrom, Haplotype::from_tag(tag))
}

fn parse_u64(bytes: &[u8], field: &'static str, line: usize) -> ThreedgResult<u64> {
    let s = std::str::from_utf8(bytes)
        .map_err(|_| ThreedgParseError::InvalidUtf8 { line, field })?;
    s.parse().map_err(|_| ThreedgParseError::InvalidNumber {
        line,
        field,
        value: s.to_string(),
    })
}

fn parse_f64(bytes: &[u8], field: &'static str, line: usize) -> ThreedgResult<f64> {
    let s = std::str::from_utf8(bytes)
        .map_err(|_| ThreedgParseError::InvalidUtf8 { line, field })?;
    s.parse().map_err(|_| ThreedgParseError::InvalidNumber {
        line,
        field,
        value: s.to_string(),
    })
}
