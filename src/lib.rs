//! webc: a depth-bounded concurrent web crawler
//!
//! This crate fetches a seed address, extracts its outbound links and follows
//! every unseen HTTP(S) link until the depth budget runs out. Each distinct
//! address is fetched at most once per coordinator, fetches run on a bounded
//! worker pool, and a failure in one branch never aborts its siblings.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawl setup and reporting
///
/// Per-address failures are not represented here: they are recorded as
/// [`crawler::FetchError`] values inside the crawl report.
#[derive(Debug, Error)]
pub enum WebcError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for webc operations
pub type Result<T> = std::result::Result<T, WebcError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator, CrawlOptions, Fetch, FetchError, FetchErrorKind};
pub use output::{CrawlOutcome, CrawlRecord, CrawlReport};
pub use state::{VisitState, VisitedSet};
