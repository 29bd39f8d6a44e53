//! Pagevault main entry point
//!
//! Command-line interface for the Pagevault website archiver.

use anyhow::Context;
use clap::{ArgGroup, Parser};
use pagevault::config::load_config_with_hash;
use pagevault::storage::FsStore;
use pagevault::{service, Config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagevault: a point-in-time website archiver
///
/// Pagevault crawls a bounded same-origin neighborhood of a seed URL and
/// writes a self-contained, timestamped snapshot of the pages and their
/// assets, with internal links rewritten for later replay.
#[derive(Parser, Debug)]
#[command(name = "pagevault")]
#[command(version)]
#[command(about = "A point-in-time website archiver", long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["archive", "list", "list_all", "show"])
))]
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

    /// Archive the given seed URL into a new snapshot
    #[arg(long, value_name = "URL")]
    archive: Option<String>,

    /// List snapshot timestamps for a "domain[/path]" key
    #[arg(long, value_name = "KEY")]
    list: Option<String>,

    /// List every snapshot in the store
    #[arg(long)]
    list_all: bool,

    /// Print the archived HTML for a "domain[/path]" key (needs --timestamp)
    #[arg(long, value_name = "KEY", requires = "timestamp")]
    show: Option<String>,

    /// Snapshot timestamp for --show (14 digits, YYYYMMDDHHMMSS)
    #[arg(long, value_name = "TIMESTAMP")]
    timestamp: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    let store = FsStore::new(&config.storage.root_path);

    if let Some(seed) = cli.archive.as_deref() {
        handle_archive(&config, &store, seed).await?;
    } else if let Some(key) = cli.list.as_deref() {
        handle_list(&store, key)?;
    } else if cli.list_all {
        handle_list_all(&store)?;
    } else if let Some(key) = cli.show.as_deref() {
        // --timestamp is enforced by clap's `requires`
        let timestamp = cli.timestamp.as_deref().unwrap_or_default();
        handle_show(&store, key, timestamp)?;
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagevault=info,warn"),
            1 => EnvFilter::new("pagevault=debug,info"),
            2 => EnvFilter::new("pagevault=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles --archive: runs one full crawl and reports the new snapshot
async fn handle_archive(config: &Config, store: &FsStore, seed: &str) -> anyhow::Result<()> {
    let outcome = service::start_archive(config, store, seed)
        .await
        .with_context(|| format!("failed to archive {}", seed))?;

    println!("Archived {}", seed);
    println!("  domain:    {}", outcome.domain);
    println!("  timestamp: {}", outcome.timestamp);
    println!("  index:     {}", outcome.root_index_path.display());
    Ok(())
}

/// Handles --list: prints snapshot timestamps for one store key
fn handle_list(store: &FsStore, key: &str) -> anyhow::Result<()> {
    let timestamps = service::list_snapshots(store, key)?;
    if timestamps.is_empty() {
        println!("No snapshots for {}", key);
        return Ok(());
    }
    for timestamp in timestamps {
        println!("{}", timestamp);
    }
    Ok(())
}

/// Handles --list-all: prints every snapshot in the store
fn handle_list_all(store: &FsStore) -> anyhow::Result<()> {
    let all = service::list_all_snapshots(store)?;
    if all.is_empty() {
        println!("Store is empty: {}", store.root().display());
        return Ok(());
    }
    for (key, timestamps) in all {
        println!("{} ({})", key, timestamps.len());
        for timestamp in timestamps {
            println!("  {}", timestamp);
        }
    }
    Ok(())
}

/// Handles --show: prints the archived HTML of one snapshot
fn handle_show(store: &FsStore, key: &str, timestamp: &str) -> anyhow::Result<()> {
    let (domain, path) = match key.split_once('/') {
        Some((domain, path)) => (domain, Some(path)),
        None => (key, None),
    };

    let bytes = service::read_snapshot(store, domain, path, timestamp)
        .with_context(|| format!("no snapshot {} at {}", key, timestamp))?;
    print!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}
