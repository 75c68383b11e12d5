use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use flate2::Compression;
use flate2::write::GzEncoder;

use protanno::cli;
use protanno::filter::{DEFAULT_TAXA, filter_by_taxonomy};
use protanno::logging::init_logging;
use protanno::source::open_text;

#[derive(Parser)]
#[command(name = "filter_dat", about = "Keep DAT records of selected species")]
struct Cli {
    /// Input DAT file (plain or gzip)
    #[arg(short = 'i', long = "in")]
    input: PathBuf,

    /// Output DAT file (gzip)
    #[arg(short = 'o', long = "out")]
    out: PathBuf,

    /// NCBI taxonomy number to keep; repeat for several species
    #[arg(short = 't', long = "taxon")]
    taxa: Vec<u32>,

    /// Log every filtered record
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();
    init_logging(cli_args.verbose);

    cli::banner("Filter DAT");

    let taxa: HashSet<u32> = if cli_args.taxa.is_empty() {
        DEFAULT_TAXA.into_iter().collect()
    } else {
        cli_args.taxa.iter().copied().collect()
    };
    let mut sorted_taxa: Vec<u32> = taxa.iter().copied().collect();
    sorted_taxa.sort_unstable();

    cli::section("Configuration");
    cli::kv("Input", &cli_args.input.display().to_string());
    cli::kv("Output", &cli_args.out.display().to_string());
    cli::kv(
        "Taxa",
        &sorted_taxa
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    );
    eprintln!();

    cli::section("Filtering");

    let reader = open_text(&cli_args.input)
        .with_context(|| format!("failed to open input: {}", cli_args.input.display()))?;
    let out_file = File::create(&cli_args.out)
        .with_context(|| format!("failed to create output: {}", cli_args.out.display()))?;
    let mut encoder = GzEncoder::new(BufWriter::new(out_file), Compression::default());

    let stats = filter_by_taxonomy(reader, &mut encoder, &taxa)
        .with_context(|| format!("failed to filter {}", cli_args.input.display()))?;
    encoder
        .finish()
        .and_then(|mut inner| inner.flush())
        .context("failed to finish gzip output")?;

    cli::kv("Records read", &stats.total.to_string());
    cli::kv("Records kept", &cli::format_share(stats.kept, stats.total));
    if stats.kept == 0 {
        cli::warning("no records matched the selected taxa");
    } else {
        cli::success(&format!("wrote {}", cli_args.out.display()));
    }

    cli::print_summary(start);

    Ok(())
}
