//! Javadoc-Harvest main entry point
//!
//! This is the command-line interface for the Javadoc type-signature harvester.

use anyhow::Context;
use clap::Parser;
use javadoc_harvest::config::{load_config_with_hash, Config};
use javadoc_harvest::crawler::{Coordinator, PageCache};
use javadoc_harvest::output::{load_types, print_report, print_statistics, HarvestStatistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Javadoc-Harvest: a type-signature harvester for Javadoc API references
///
/// Javadoc-Harvest walks a Javadoc documentation tree from its module index
/// down to every class page and writes the fields, constructors and methods
/// of each type as one JSON array.
#[derive(Parser, Debug)]
#[command(name = "javadoc-harvest")]
#[command(version)]
#[command(about = "A type-signature harvester for Javadoc API references", long_about = None)]
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

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long, conflicts_with_all = ["stats", "type_page", "clear_cache"])]
    dry_run: bool,

    /// Show statistics for the existing types artifact and exit
    #[arg(long, conflicts_with_all = ["dry_run", "type_page", "clear_cache"])]
    stats: bool,

    /// Harvest a single type page (absolute or root-relative URL) and print it as JSON
    #[arg(long, value_name = "URL", conflicts_with_all = ["dry_run", "stats"])]
    type_page: Option<String>,

    /// Delete the page cache before doing anything else
    #[arg(long)]
    clear_cache: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    if cli.stats {
        return handle_stats(&config);
    }

    if cli.clear_cache {
        handle_clear_cache(&config).await?;
    }

    match cli.type_page {
        Some(page) => handle_type_page(config, &page).await,
        None => handle_harvest(config).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("javadoc_harvest=info,warn"),
            1 => EnvFilter::new("javadoc_harvest=debug,info"),
            2 => EnvFilter::new("javadoc_harvest=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be harvested
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Javadoc-Harvest Dry Run ===\n");

    println!("Documentation:");
    println!("  Root URL: {}", config.docs.root()?.as_url());
    println!("  Index page: {}", config.docs.index_url()?);
    println!("  Module prefix: {}", config.docs.module_prefix);

    println!("\nCrawler Configuration:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    match config.crawler.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: none"),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nCache:");
    println!("  Directory: {}", config.cache.directory.display());

    println!("\nOutput:");
    println!("  Types: {}", config.output.types_path.display());
    if let Some(report_path) = &config.output.report_path {
        println!("  Report: {}", report_path.display());
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --stats mode: summarizes the existing types artifact
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let path = &config.output.types_path;
    println!("Artifact: {}\n", path.display());

    let types = load_types(path).with_context(|| format!("Failed to load {}", path.display()))?;
    print_statistics(&HarvestStatistics::from_types(&types));

    Ok(())
}

async fn handle_clear_cache(config: &Config) -> anyhow::Result<()> {
    let cache = PageCache::new(&config.cache.directory);
    cache
        .clear()
        .await
        .with_context(|| format!("Failed to clear cache at {}", cache.directory().display()))?;
    tracing::info!("Cleared cache at {}", cache.directory().display());
    Ok(())
}

/// Handles the --type-page mode: harvests one page and prints its record
async fn handle_type_page(config: Config, page: &str) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config)?;
    let (descriptor, soft_errors) = coordinator
        .harvest_single(page)
        .await
        .with_context(|| format!("Failed to harvest {}", page))?;

    println!("{}", serde_json::to_string_pretty(&descriptor)?);

    for error in &soft_errors {
        eprintln!("soft parse error: {}", error);
    }

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Harvesting modules matching '{}' under {}",
        config.docs.module_prefix,
        config.docs.root_url
    );

    let coordinator = Coordinator::new(config)?;
    let report = coordinator.run().await.context("Harvest failed")?;

    tracing::info!("Harvest completed in {}s", report.duration_seconds());
    print_report(&report);

    Ok(())
}
