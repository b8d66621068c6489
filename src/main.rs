//! FastG3d CLI entry point
//!
//! High-performance indexing, querying and rescaling of .3dg 3D genome
//! structure files.

use anyhow::Context;
use clap::{Parser, Subcommand};
use fast_g3d::core::{LoadMode, ScaleEngine, SpatialIndex};
use fast_g3d::formats::{self, ThreedgOptions, DEFAULT_RESOLUTION};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fast-g3d")]
#[command(about = "High-performance 3D genome structure indexing and rescaling tool")]
#[command(version)]
#[command(author = "FastG3d Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rescale a .3dg file to a coarser resolution
    Scale {
        /// Input .3dg file (plain, .gz or .bz2)
        input: PathBuf,
        /// Output file (optional, stdout if not specified; .gz compresses)
        output: Option<PathBuf>,
        /// Input resolution in bp
        #[arg(short = 's', long, default_value_t = DEFAULT_RESOLUTION)]
        resolution: u64,
        /// Aggregation factor (output resolution = resolution * fold)
        #[arg(short = 'f', long, default_value = "2")]
        fold: u64,
        /// Skip malformed lines instead of aborting
        #[arg(long)]
        lenient: bool,
        /// Sort each bin by start before writing
        #[arg(long)]
        sort: bool,
    },
    /// Query records overlapping a region
    Query {
        /// Input .3dg file (plain, .gz or .bz2)
        input: PathBuf,
        /// Region to query, as chrom:start-end (e.g. chr1:1000000-2000000)
        region: String,
        /// Output file (optional, stdout if not specified; .gz compresses)
        output: Option<PathBuf>,
        /// Input resolution in bp
        #[arg(short = 's', long, default_value_t = DEFAULT_RESOLUTION)]
        resolution: u64,
        /// Return only records that actually overlap the region
        #[arg(long)]
        exact: bool,
        /// Skip malformed lines instead of aborting
        #[arg(long)]
        lenient: bool,
    },
    /// Print record and bin counts for a .3dg file
    Stats {
        /// Input .3dg file (plain, .gz or .bz2)
        input: PathBuf,
        /// Input resolution in bp
        #[arg(short = 's', long, default_value_t = DEFAULT_RESOLUTION)]
        resolution: u64,
        /// Skip malformed lines instead of aborting
        #[arg(long)]
        lenient: bool,
    },
}

fn load_index(input: &PathBuf, resolution: u64, lenient: bool) -> anyhow::Result<SpatialIndex> {
    let start = Instant::now();
    eprintln!("Loading .3dg file: {:?}", input);

    let options = ThreedgOptions {
        resolution,
        mode: if lenient { LoadMode::Lenient } else { LoadMode::Strict },
        ..Default::default()
    };
    let index = formats::parse_threedg_file(input, &options)
        .with_context(|| format!("Failed to load .3dg file {:?}", input))?;

    eprintln!(
        "Loaded {} records in {:.2}s",
        index.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(index)
}

/// Parse a region string of the form chrom:start-end
fn parse_region(region: &str) -> anyhow::Result<(String, u64, u64)> {
    let (chrom, range) = region
        .rsplit_once(':')
        .with_context(|| format!("Invalid region '{}': expected chrom:start-end", region))?;
    let (start, end) = range
        .split_once('-')
        .with_context(|| format!("Invalid region '{}': expected chrom:start-end", region))?;
    let start: u64 = start
        .parse()
        .with_context(|| format!("Invalid region start '{}'", start))?;
    let end: u64 = end
        .parse()
        .with_context(|| format!("Invalid region end '{}'", end))?;
    anyhow::ensure!(start < end, "Region start ({}) must be below end ({})", start, end);
    Ok((chrom.to_string(), start, end))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Scale { input, output, resolution, fold, lenient, sort } => {
            let index = load_index(&input, resolution, lenient)?;

            let engine = ScaleEngine::new(fold)?;
            let mut scaled = engine.scale(&index)?;
            if sort {
                scaled.sort_each_bin();
            }

            let mut sink = formats::create_line_sink(output.as_deref())?;
            scaled.dump(&mut sink)?;

            eprintln!("\n=== Scale Statistics ===");
            eprintln!("Input records:    {}", index.len());
            eprintln!("Output records:   {}", scaled.len());
            eprintln!("Output resolution: {}", scaled.resolution());
            eprintln!("Time elapsed:     {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Query { input, region, output, resolution, exact, lenient } => {
            let (chrom, qstart, qend) = parse_region(&region)?;
            let index = load_index(&input, resolution, lenient)?;

            let results = if exact {
                index.query_range_exact(&chrom, qstart, qend)
            } else {
                index.query_range(&chrom, qstart, qend)
            };

            use std::io::Write;
            let mut sink = formats::create_line_sink(output.as_deref())?;
            for record in &results {
                writeln!(sink, "{}", record)?;
            }

            eprintln!("\n=== Query Statistics ===");
            eprintln!("Region:          {}:{}-{}", chrom, qstart, qend);
            eprintln!("Records found:   {}", results.len());
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Stats { input, resolution, lenient } => {
            let index = load_index(&input, resolution, lenient)?;

            let mut chroms: Vec<&str> = index.chroms().collect();
            chroms.sort_unstable();

            eprintln!("\n=== Index Statistics ===");
            eprintln!("Resolution:      {}", index.resolution());
            eprintln!("Total records:   {}", index.len());
            eprintln!("Chromosomes:     {}", chroms.len());
            for chrom in chroms {
                eprintln!(
                    "  {:<8} {:>10} records in {:>6} bins",
                    chrom,
                    index.query_chrom(chrom).len(),
                    index.bin_count(chrom)
                );
            }
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
