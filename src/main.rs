//! Node descriptor dumper - Main Entry Point
//!
//! Loads a reflection catalog snapshot and writes the Full, Essentials and
//! Debug descriptor documents next to the given base path.

use anyhow::Context;
use clap::Parser;
use nodedump_rs::{
    config::{self, DumpConfig},
    Bucket, InMemoryCatalog,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "nodedump-rs")]
#[command(about = "Dump graph node descriptors from a reflection catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// Output location; documents are written into this directory, or next to this file
    base_path: PathBuf,

    /// Catalog snapshot (JSON)
    #[arg(short = 'c', long = "catalog")]
    catalog: PathBuf,

    /// Dump configuration (TOML); defaults to the platform config directory
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Write single-line JSON documents
    #[arg(long = "compact")]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,nodedump_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut dump_config = match &cli.config {
        Some(path) => DumpConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match config::default_config_path() {
            Some(path) => DumpConfig::load_or_default(path),
            None => DumpConfig::default(),
        },
    };

    if cli.compact {
        dump_config.output.pretty = false;
    }

    tracing::info!("Loading catalog from {}", cli.catalog.display());
    let catalog = InMemoryCatalog::load(&cli.catalog)
        .with_context(|| format!("Failed to load catalog {}", cli.catalog.display()))?;

    let stats = catalog.stats();
    if stats.orphaned_parents > 0 {
        tracing::warn!(
            "{} types reference a parent missing from the catalog",
            stats.orphaned_parents
        );
    }

    let report = nodedump_rs::dump_all_nodes(&catalog, &cli.base_path, &dump_config)?;

    for &bucket in Bucket::all() {
        println!("{:<10} {:>6} descriptors", bucket.name(), report.count(bucket));
    }
    for (bucket, path) in &report.written {
        println!("wrote {} -> {}", bucket, path.display());
    }
    for (bucket, message) in &report.failed {
        eprintln!("failed {}: {}", bucket, message);
    }
    if report.skipped > 0 || report.degraded > 0 {
        println!(
            "{} members skipped, {} degraded",
            report.skipped, report.degraded
        );
    }

    Ok(())
}
