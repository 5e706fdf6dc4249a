//! Run-level accumulation of class outcomes
//!
//! Class pages are extracted concurrently across packages and modules, so the
//! collector is shared: counters are atomics and the record lists sit behind
//! mutexes that are only held for a push.

use crate::model::TypeDescriptor;
use crate::output::{FailureRecord, SoftErrorRecord};
use crate::{HarvestError, SoftParseError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use url::Url;

/// Result of extracting one class page
#[derive(Debug)]
pub enum ClassOutcome {
    /// The page became a record, possibly degraded by soft errors
    Completed {
        url: Url,
        descriptor: TypeDescriptor,
        soft_errors: Vec<SoftParseError>,
    },

    /// The page produced no record
    Failed { url: Url, error: HarvestError },
}

/// Everything a finished harvest produced
#[derive(Debug, Default)]
pub struct Harvest {
    pub types: Vec<TypeDescriptor>,
    pub successes: usize,
    pub errors: usize,
    pub failures: Vec<FailureRecord>,
    pub soft_errors: Vec<SoftErrorRecord>,
}

/// Thread-safe accumulator for class outcomes
#[derive(Debug, Default)]
pub struct Collector {
    types: Mutex<Vec<TypeDescriptor>>,
    failures: Mutex<Vec<FailureRecord>>,
    soft_errors: Mutex<Vec<SoftErrorRecord>>,
    successes: AtomicUsize,
    errors: AtomicUsize,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one outcome; failures are counted and logged, never raised
    pub fn record(&self, outcome: ClassOutcome) {
        match outcome {
            ClassOutcome::Completed {
                url,
                descriptor,
                soft_errors,
            } => {
                if !soft_errors.is_empty() {
                    let mut records = self
                        .soft_errors
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner);
                    records.extend(soft_errors.iter().map(|error| SoftErrorRecord {
                        url: url.to_string(),
                        message: error.to_string(),
                    }));
                }

                self.types
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(descriptor);
                self.successes.fetch_add(1, Ordering::Relaxed);
            }

            ClassOutcome::Failed { url, error } => {
                tracing::error!("Failed to harvest {}: {}", url, error);
                self.failures
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(FailureRecord {
                        url: url.to_string(),
                        message: error.to_string(),
                    });
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    /// Consumes the collector once every task has finished
    pub fn into_harvest(self) -> Harvest {
        Harvest {
            types: self.types.into_inner().unwrap_or_else(PoisonError::into_inner),
            successes: self.successes.into_inner(),
            errors: self.errors.into_inner(),
            failures: self.failures.into_inner().unwrap_or_else(PoisonError::into_inner),
            soft_errors: self
                .soft_errors
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }
}
