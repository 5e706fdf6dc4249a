//! URL handling module for Javadoc-Harvest
//!
//! This module provides the documentation root (which decides whether a URL
//! may be fetched and where it lands in the cache) and relative-link
//! resolution for discovered anchors.

mod resolve;
mod root;

pub use resolve::resolve_link;
pub use root::DocRoot;
