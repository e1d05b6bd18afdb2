//! Output module for crawl results
//!
//! - `report`: the per-address records and the aggregate report
//! - `stats`: text and JSON rendering for the CLI

mod report;
mod stats;

pub use report::{CrawlOutcome, CrawlRecord, CrawlReport};
pub use stats::{format_report, print_report, report_to_json, ReportSummary};
