//! Javadoc-Harvest: a type-signature harvester for Javadoc API references
//!
//! This crate crawls a Javadoc documentation tree (module index, module pages,
//! package pages, class pages) and turns every class page into a structured
//! [`model::TypeDescriptor`] with its fields, constructors and methods.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;
pub mod url;

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Non-success status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Cache error at {}: {source}", path.display())]
    Cache {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unexpected page structure at {url}: {message}")]
    PageStructure { url: String, message: String },

    #[error("Output serialization error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Returns the HTTP status for a non-success response, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
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

    #[error("URL {url} is outside the documentation root {root}")]
    OutsideRoot { url: String, root: String },
}

/// Non-fatal extraction failures
///
/// These never abort a page: the affected table comes back empty, or the
/// affected callable keeps its raw name without decomposed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SoftParseError {
    #[error("{row_kind} table reports {arity} columns")]
    TableLayout {
        row_kind: extract::RowKind,
        arity: usize,
    },

    #[error("can't decompose signature '{text}'")]
    Signature { text: String },
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::Coordinator;
pub use extract::{normalize, parse_signature, strip_generics};
pub use model::{CallableDescriptor, FieldDescriptor, Parameter, TypeDescriptor, TypeKind};
