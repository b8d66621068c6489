//! 3D genome structure records
//!
//! A `G3dRecord` ties one genomic bin to a point in 3D space, tagged with
//! the parental chromosome copy it was reconstructed from. Records are
//! created once (by the .3dg parser or by rescaling) and never mutated.

use crate::core::error::RecordError;
use std::fmt;

/// Parental origin of a structure record
///
/// Modeled as a closed enum instead of the free-form tags found in .3dg
/// files, so downstream partitioning cannot silently miss a spelling
/// variant. Anything that is not recognizably paternal or maternal falls
/// into [`Haplotype::Shared`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Haplotype {
    /// Paternal chromosome copy ("pat" / "p")
    Paternal,
    /// Maternal chromosome copy ("mat" / "m")
    Maternal,
    /// Unphased or shared between both copies (anything else)
    Shared,
}

impl Haplotype {
    /// Parse a .3dg haplotype tag
    ///
    /// Unrecognized tags map to `Shared`, matching how unphased input is
    /// conventionally labeled (".", "both", empty).
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "pat" | "p" => Haplotype::Paternal,
            "mat" | "m" => Haplotype::Maternal,
            _ => Haplotype::Shared,
        }
    }

    /// Canonical tag used in text output
    pub fn as_str(&self) -> &'static str {
        match self {
            Haplotype::Paternal => "pat",
            Haplotype::Maternal => "mat",
            Haplotype::Shared => "both",
        }
    }
}

impl fmt::Display for Haplotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One genomic bin with its reconstructed spatial position
#[derive(Debug, Clone, PartialEq)]
pub struct G3dRecord {
    /// Chromosome name (non-empty)
    pub chrom: String,
    /// Start position (0-based, inclusive)
    pub start: u64,
    /// End position (exclusive, > start)
    pub end: u64,
    /// X coordinate (finite)
    pub x: f64,
    /// Y coordinate (finite)
    pub y: f64,
    /// Z coordinate (finite)
    pub z: f64,
    /// Parental origin
    pub haplotype: Haplotype,
}

impl G3dRecord {
    /// Interval length in bases
    pub fn length(&self) -> u64 {
        self.end - self.start
    }

    /// Check the data-model constraints
    ///
    /// The upstream parser is trusted for numeric syntax; this only guards
    /// the structural invariants: non-empty chromosome, `start < end`, and
    /// finite coordinates.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.chrom.is_empty() {
            return Err(RecordError::EmptyChrom);
        }
        if self.start >= self.end {
            return Err(RecordError::InvertedInterval {
                start: self.start,
                end: self.end,
            });
        }
        for (axis, v) in [("x", self.x), ("y", self.y), ("z", self.z)] {
            if !v.is_finite() {
                return Err(RecordError::NonFiniteCoordinate { axis, value: v });
            }
        }
        Ok(())
    }
}

impl fmt::Display for G3dRecord {
    /// Tab-separated text form: chrom, start, end, x, y, z, haplotype
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom, self.start, self.end, self.x, self.y, self.z, self.haplotype
        )
    }
}
