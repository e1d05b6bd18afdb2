//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetch` trait
//! - HTML parsing and link extraction
//! - The frontier, concurrency limiting and the join barrier
//! - Overall crawl coordination

mod barrier;
mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use barrier::{JoinBarrier, WorkUnit};
pub use coordinator::{crawl_to_completion, run_crawl, Coordinator, CrawlOptions};
pub use fetcher::{build_http_client, Fetch, FetchError, FetchErrorKind, HttpFetcher};
pub use parser::{
    extract_links, extract_links_resolved, parse_page, parse_page_resolved, ParsedPage,
};
pub use scheduler::{CrawlTask, Frontier, ScheduledTask, Scheduler};
