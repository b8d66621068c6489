//! Line-oriented output sinks
//!
//! Opens the writer the dump operations feed: a file (gzip-encoded when the
//! path ends in `.gz`) or stdout when no path is given. The sink owns its
//! lifecycle; dropping it flushes and closes.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Open a line sink for the given path, or stdout when `None`
pub fn create_line_sink(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            if path.extension().and_then(|e| e.to_str()) == Some("gz") {
                let encoder = GzEncoder::new(file, Compression::default());
                Ok(Box::new(BufWriter::with_capacity(128 * 1024, encoder)))
            } else {
                Ok(Box::new(BufWriter::with_capacity(128 * 1024, file)))
            }
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_plain_sink_writes_lines() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.g3d.txt");
        {
            let mut sink = create_line_sink(Some(&path))?;
            writeln!(sink, "chr1\t0\t20000")?;
        }
        let content = std::fs::read_to_string(&path)?;
        assert_eq!(content, "chr1\t0\t20000\n");
        Ok(())
    }

    #[test]
    fn test_gz_sink_round_trips() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.txt.gz");
        {
            let mut sink = create_line_sink(Some(&path))?;
            writeln!(sink, "chr1\t0\t20000")?;
        }
        let file = File::open(&path)?;
        let mut decoder = flate2::read::GzDecoder::new(file);
        let mut content = String::new();
        decoder.read_to_string(&mut content)?;
        assert_eq!(content, "chr1\t0\t20000\n");
        Ok(())
    }
}
