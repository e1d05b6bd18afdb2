//! webc main entry point
//!
//! This is the command-line interface for the webc crawler.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use webc::config::{load_config, validate, Config};
use webc::crawler::{crawl_to_completion, Coordinator, CrawlOptions, HttpFetcher};
use webc::output::{print_report, report_to_json};

/// webc: a depth-bounded concurrent web crawler
///
/// Starting from a seed address, webc fetches each page, extracts its
/// absolute HTTP(S) links and follows every address it has not seen yet
/// until the depth budget runs out.
#[derive(Parser, Debug)]
#[command(name = "webc")]
#[command(version)]
#[command(about = "A depth-bounded concurrent web crawler", long_about = None)]
struct Cli {
    /// Seed address to start crawling from
    #[arg(value_name = "URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum crawl depth (0 fetches nothing, 1 fetches only the seed)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Maximum number of fetches in flight at once
    #[arg(long)]
    concurrency: Option<u32>,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Cancel the whole crawl after this many seconds
    #[arg(long, value_name = "SECS")]
    deadline_secs: Option<u64>,

    /// Resolve relative links against the page address instead of dropping them
    #[arg(long)]
    resolve_relative: bool,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&cli.seed, &config);
        return Ok(());
    }

    handle_crawl(&cli.seed, &config, cli.format).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout only carries the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webc=info,warn"),
            1 => EnvFilter::new("webc=debug,info"),
            2 => EnvFilter::new("webc=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), applies command-line overrides and validates
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.crawler.request_timeout_ms = timeout_ms;
    }
    if let Some(deadline_secs) = cli.deadline_secs {
        config.crawler.deadline_secs = Some(deadline_secs);
    }
    if cli.resolve_relative {
        config.crawler.resolve_relative = true;
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(seed: &str, config: &Config) {
    println!("=== webc Dry Run ===\n");

    println!("Seed: {}", seed);

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Request timeout: {}ms", config.crawler.request_timeout_ms);
    println!("  Connect timeout: {}ms", config.crawler.connect_timeout_ms);
    match config.crawler.deadline_secs {
        Some(secs) => println!("  Deadline: {}s", secs),
        None => println!("  Deadline: none"),
    }
    println!("  Resolve relative links: {}", config.crawler.resolve_relative);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(seed: &str, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::from_config(config).context("failed to build HTTP client")?;
    let coordinator = Coordinator::new(Arc::new(fetcher), CrawlOptions::from(&config.crawler));

    // Ctrl-C cancels cooperatively; the partial report is still printed
    let cancel = coordinator.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling crawl");
            cancel.cancel();
        }
    });

    let report = crawl_to_completion(&coordinator, seed, config.crawler.max_depth).await;

    match format {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => println!("{}", report_to_json(&report)?),
    }

    Ok(())
}
