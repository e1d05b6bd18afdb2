//! Structured crawl results
//!
//! Every fetch-and-expand unit produces exactly one [`CrawlRecord`]; the
//! coordinator hands them back as a [`CrawlReport`] when the crawl drains.

use crate::crawler::{CrawlTask, FetchError};
use crate::state::VisitState;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How one unit of work ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlOutcome {
    /// Fetched, and its links were handed back to the coordinator
    Succeeded,

    /// The fetch failed; the branch stops here
    Failed,

    /// The crawl was cancelled before or during the fetch
    Cancelled,
}

impl CrawlOutcome {
    /// The terminal visit state this outcome leaves the address in
    pub fn visit_state(&self) -> VisitState {
        match self {
            Self::Succeeded => VisitState::Succeeded,
            Self::Failed | Self::Cancelled => VisitState::Failed,
        }
    }
}

/// Result of one fetch-and-expand unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlRecord {
    /// The address this unit was responsible for
    pub address: String,

    /// Depth budget the unit ran with
    pub remaining_depth: u32,

    pub outcome: CrawlOutcome,

    /// Why the fetch failed, for `Failed` records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FetchError>,

    /// Page title, when one was present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Every HTTP(S) link target found on the page, in document order
    pub discovered_links: Vec<String>,

    pub finished_at: DateTime<Utc>,
}

impl CrawlRecord {
    pub fn succeeded(task: &CrawlTask, title: Option<String>, links: Vec<String>) -> Self {
        Self::new(task, CrawlOutcome::Succeeded, None, title, links)
    }

    pub fn failed(task: &CrawlTask, error: FetchError) -> Self {
        Self::new(task, CrawlOutcome::Failed, Some(error), None, Vec::new())
    }

    pub fn cancelled(task: &CrawlTask) -> Self {
        Self::new(task, CrawlOutcome::Cancelled, None, None, Vec::new())
    }

    fn new(
        task: &CrawlTask,
        outcome: CrawlOutcome,
        error: Option<FetchError>,
        title: Option<String>,
        discovered_links: Vec<String>,
    ) -> Self {
        Self {
            address: task.address().to_string(),
            remaining_depth: task.remaining_depth(),
            outcome,
            error,
            title,
            discovered_links,
            finished_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == CrawlOutcome::Succeeded
    }
}

/// Aggregate of every unit that finished during one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,

    /// Records in completion order
    pub records: Vec<CrawlRecord>,
}

impl CrawlReport {
    /// Builds a report and tallies outcomes
    pub fn new(records: Vec<CrawlRecord>) -> Self {
        let mut report = Self {
            records,
            ..Self::default()
        };

        for record in &report.records {
            match record.outcome {
                CrawlOutcome::Succeeded => report.succeeded += 1,
                CrawlOutcome::Failed => report.failed += 1,
                CrawlOutcome::Cancelled => report.cancelled += 1,
            }
        }

        report
    }

    /// Total number of units that ran
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when at least one unit ran and none of them failed or was cancelled
    pub fn all_succeeded(&self) -> bool {
        !self.is_empty() && self.failed == 0 && self.cancelled == 0
    }

    /// Looks up the record for an address
    pub fn get(&self, address: &str) -> Option<&CrawlRecord> {
        self.records.iter().find(|r| r.address == address)
    }

    /// Records whose fetch failed
    pub fn failures(&self) -> impl Iterator<Item = &CrawlRecord> {
        self.records
            .iter()
            .filter(|r| r.outcome == CrawlOutcome::Failed)
    }

    /// Addresses of every unit that ran, sorted
    pub fn addresses(&self) -> Vec<&str> {
        let mut addresses: Vec<&str> = self.records.iter().map(|r| r.address.as_str()).collect();
        addresses.sort_unstable();
        addresses
    }
}
