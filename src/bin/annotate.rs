use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use protanno::cli;
use protanno::config::AnnotateConfig;
use protanno::dat::parse_dat;
use protanno::keywords::KeywordCatalog;
use protanno::logging::init_logging;
use protanno::lookup::{annotate, parse_accession_list};
use protanno::report::CategoryReports;
use protanno::source::open_text;
use protanno::table::AnnotationTable;

#[derive(Parser)]
#[command(name = "annotate", about = "Annotate UniProt accessions from a Swiss-Prot DAT file")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: PathBuf,

    /// Accession list, one per line
    #[arg(short = 'i', long = "in")]
    input: PathBuf,

    /// Output annotation table (tab-separated)
    #[arg(short = 'o', long = "out")]
    out: PathBuf,

    /// Log field fallbacks and other diagnostics
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();
    init_logging(cli_args.verbose);

    cli::banner("Annotate");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = AnnotateConfig::from_file(&cli_args.config)?;
    cli::kv("Config", &cli_args.config.display().to_string());
    for (name, path) in config.source_files() {
        cli::kv(name, &path.display().to_string());
    }
    cli::kv("Accessions", &cli_args.input.display().to_string());
    cli::kv("Output", &cli_args.out.display().to_string());

    eprintln!();

    // ── Keyword List ─────────────────────────────────────
    let catalog = match config.keyword_file {
        Some(ref path) => {
            cli::section("Keyword List");
            let reader = open_text(path)
                .with_context(|| format!("failed to open keyword list: {}", path.display()))?;
            let catalog = KeywordCatalog::parse(reader)
                .with_context(|| format!("failed to parse keyword list: {}", path.display()))?;
            cli::kv("Keywords", &catalog.len().to_string());
            cli::kv("Categories", &catalog.categories().len().to_string());
            eprintln!();
            Some(catalog)
        }
        None => {
            if config.columns.keywords {
                cli::warning("no keyword list configured, skipping keyword category columns");
                eprintln!();
            }
            None
        }
    };

    // ── DAT Parsing ──────────────────────────────────────
    cli::section("DAT Parsing");

    let reader = open_text(&config.dat_file)
        .with_context(|| format!("failed to open DAT file: {}", config.dat_file.display()))?;
    let parsed = parse_dat(reader, &config.extract_options())
        .with_context(|| format!("failed to parse DAT file: {}", config.dat_file.display()))?;
    let stats = parsed.stats;

    cli::kv("Records", &stats.records.to_string());
    cli::kv("Index keys", &parsed.corpus.key_count().to_string());
    if stats.skipped_records > 0 {
        cli::warning(&format!("{} records skipped (no identifier or accession)", stats.skipped_records));
    }
    if stats.field_failures > 0 {
        cli::kv("Defaulted fields", &stats.field_failures.to_string().yellow().to_string());
    }

    eprintln!();

    // ── Lookup ───────────────────────────────────────────
    cli::section("Lookup");

    let text = std::fs::read_to_string(&cli_args.input)
        .with_context(|| format!("failed to read accession list: {}", cli_args.input.display()))?;
    let queries = parse_accession_list(&text);
    let (lookups, summary) = annotate(&parsed.corpus, &queries);

    cli::kv("Queries", &summary.total().to_string());
    cli::kv("Found", &cli::format_share(summary.found, summary.total()));
    if summary.failed > 0 {
        cli::warning(&format!(
            "{} accessions not found",
            cli::format_share(summary.failed, summary.total())
        ));
    }

    let out_file = File::create(&cli_args.out)
        .with_context(|| format!("failed to create output: {}", cli_args.out.display()))?;
    let table = AnnotationTable::new(config.columns, catalog.as_ref());
    let rows = table.write(BufWriter::new(out_file), &lookups)?;
    cli::success(&format!("wrote {rows} rows to {}", cli_args.out.display()));

    eprintln!();

    // ── Reports ──────────────────────────────────────────
    if let Some(ref dir) = config.report_dir {
        cli::section("Reports");

        let reports = CategoryReports::build(lookups.iter().filter_map(|l| l.record));
        let paths = reports
            .write_all(dir, catalog.as_ref(), config.min_report_frequency)
            .with_context(|| format!("failed to write reports to {}", dir.display()))?;
        for path in &paths {
            cli::success(&path.display().to_string());
        }

        eprintln!();
    }

    cli::print_summary(start);

    Ok(())
}
