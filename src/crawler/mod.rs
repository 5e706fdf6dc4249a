//! Crawler module for documentation retrieval and orchestration
//!
//! This module contains the harvesting machinery, including:
//! - A cache-backed fetcher with bounded network concurrency
//! - Module, package and class link discovery
//! - Concurrent fan-out with per-class failure isolation
//! - Aggregation of records, counters and soft errors

mod cache;
mod collector;
mod coordinator;
mod discovery;
mod fetcher;

pub use cache::PageCache;
pub use collector::{ClassOutcome, Collector, Harvest};
pub use coordinator::{run_harvest, Coordinator};
pub use discovery::{class_links, module_links, package_links};
pub use fetcher::{build_http_client, Fetcher};
