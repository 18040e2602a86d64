//! Versewell main entry point
//!
//! Command-line interface for the scripture translation harvester.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use versewell::config::load_config;
use versewell::harvest::harvest;
use versewell::output::print_report;

/// Versewell: a scripture translation harvester
///
/// Versewell walks a translation site's hierarchy (translations, books,
/// chapters), extracts verse body text, and writes one concatenated
/// plain-text file per translation. Translations that already have an
/// output file are skipped, so re-runs are cheap and idempotent.
#[derive(Parser, Debug)]
#[command(name = "versewell")]
#[command(version = "1.0.0")]
#[command(about = "A scripture translation harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Harvest every allow-listed translation instead of stopping after
    /// the first success
    #[arg(long)]
    all: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.all {
        config.harvest.stop_after_first = false;
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    let report = harvest(config).await.context("harvest failed")?;
    print_report(&report);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("versewell=info,warn"),
            1 => EnvFilter::new("versewell=debug,info"),
            2 => EnvFilter::new("versewell=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the harvest plan
fn handle_dry_run(config: &versewell::config::Config) -> anyhow::Result<()> {
    println!("=== Versewell Dry Run ===\n");

    println!("Harvest:");
    println!("  Root URL: {}", config.harvest.root_url);
    println!(
        "  Policy: {}",
        if config.harvest.stop_after_first {
            "stop after first successful translation"
        } else {
            "sweep all allow-listed translations"
        }
    );

    println!("\nAllow-list ({}):", config.harvest.translations.len());
    for code in &config.harvest.translations {
        println!("  - {}", code);
    }

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!(
        "  Timeouts: {}s request, {}s connect",
        config.fetcher.request_timeout_secs, config.fetcher.connect_timeout_secs
    );

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir);

    let existing = versewell::output::list_artifacts(std::path::Path::new(&config.output.data_dir))?;
    if existing.is_empty() {
        println!("  No artifacts materialized yet");
    } else {
        println!("  Already materialized (will be skipped):");
        for id in existing {
            println!("    - {}", id);
        }
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}
