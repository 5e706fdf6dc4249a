//! Output module for the harvested artifact and run reports
//!
//! This module handles:
//! - Writing the JSON array of type descriptors (once per run)
//! - Loading an existing artifact back for statistics
//! - Writing and printing run reports

mod report;
pub mod stats;

pub use report::{print_report, CrawlReport, FailureRecord, SoftErrorRecord};
pub use stats::{print_statistics, HarvestStatistics};

use crate::model::TypeDescriptor;
use crate::HarvestError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes the type descriptors as one JSON array
///
/// Parent directories are created as needed; an existing file is replaced.
pub fn write_types(path: &Path, types: &[TypeDescriptor]) -> Result<(), HarvestError> {
    write_json(path, types)
}

/// Loads a previously written types artifact
pub fn load_types(path: &Path) -> Result<Vec<TypeDescriptor>, HarvestError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes a run report as pretty-printed JSON
pub fn write_report(path: &Path, report: &CrawlReport) -> Result<(), HarvestError> {
    write_json(path, report)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
