//! Run report
//!
//! The report is the user-visible account of one harvest: how many class
//! pages became records, which ones failed and why, and which records were
//! degraded by soft parse errors.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A class page that produced no record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub url: String,
    pub message: String,
}

/// A soft parse error and the page it was recorded on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoftErrorRecord {
    pub url: String,
    pub message: String,
}

/// Summary of one completed harvest
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub types_written: usize,
    pub successes: usize,
    pub errors: usize,
    pub failures: Vec<FailureRecord>,
    pub soft_errors: Vec<SoftErrorRecord>,
}

impl CrawlReport {
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Prints the report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Harvest Report ===\n");

    println!("Started:  {}", report.started_at.to_rfc3339());
    println!("Finished: {}", report.finished_at.to_rfc3339());
    println!("Duration: {}s", report.duration_seconds());
    println!();

    println!("Types written: {}", report.types_written);
    println!("Successes: {}, errors: {}", report.successes, report.errors);
    println!("Soft parse errors: {}", report.soft_errors.len());

    if !report.failures.is_empty() {
        println!("\nFailed pages ({}):", report.failures.len());
        for failure in &report.failures {
            println!("  - {}: {}", failure.url, failure.message);
        }
    }
}
