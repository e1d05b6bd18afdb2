//! Human-readable and JSON rendering of a crawl report

use crate::output::{CrawlOutcome, CrawlReport};
use crate::WebcError;
use std::fmt;

/// Text summary of a crawl report
pub struct ReportSummary<'a>(pub &'a CrawlReport);

impl fmt::Display for ReportSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "=== Crawl Report ===\n")?;
        writeln!(f, "Overview:")?;
        writeln!(f, "  Addresses crawled: {}", report.total())?;
        writeln!(f, "  Succeeded: {}", report.succeeded)?;
        writeln!(f, "  Failed: {}", report.failed)?;
        writeln!(f, "  Cancelled: {}", report.cancelled)?;
        writeln!(
            f,
            "  Links discovered: {}",
            report
                .records
                .iter()
                .map(|r| r.discovered_links.len())
                .sum::<usize>()
        )?;
        writeln!(f)?;

        let mut visited: Vec<_> = report
            .records
            .iter()
            .filter(|r| r.outcome == CrawlOutcome::Succeeded)
            .collect();
        visited.sort_by(|a, b| a.address.cmp(&b.address));

        if !visited.is_empty() {
            writeln!(f, "Visited:")?;
            for record in visited {
                match &record.title {
                    Some(title) => writeln!(f, "  {} ({})", record.address, title)?,
                    None => writeln!(f, "  {}", record.address)?,
                }
            }
            writeln!(f)?;
        }

        let mut failures: Vec<_> = report.failures().collect();
        failures.sort_by(|a, b| a.address.cmp(&b.address));

        if !failures.is_empty() {
            writeln!(f, "Errors:")?;
            for record in failures {
                match &record.error {
                    Some(error) => writeln!(f, "  {}: {}", record.address, error.kind)?,
                    None => writeln!(f, "  {}: unknown error", record.address)?,
                }
            }
            writeln!(f)?;
        }

        let success_rate = if report.total() > 0 {
            (report.succeeded as f64 / report.total() as f64) * 100.0
        } else {
            0.0
        };

        writeln!(
            f,
            "Success Rate: {:.1}% ({} / {} addresses fetched successfully)",
            success_rate,
            report.succeeded,
            report.total()
        )
    }
}

/// Renders the report as the text the CLI prints
pub fn format_report(report: &CrawlReport) -> String {
    ReportSummary(report).to_string()
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}

/// Serializes the report as pretty-printed JSON
pub fn report_to_json(report: &CrawlReport) -> Result<String, WebcError> {
    Ok(serde_json::to_string_pretty(report)?)
}
