//! Extraction of type signatures from Javadoc pages
//!
//! This module contains everything that turns page HTML into records:
//! - Text normalization and generics stripping
//! - Summary-table extraction into typed rows
//! - Callable signature decomposition
//! - Assembly of a whole class page into a `TypeDescriptor`
//!
//! Nothing here performs I/O. Recoverable problems are recorded in
//! [`Diagnostics`] instead of being returned as errors.

mod signature;
mod table;
mod text;
mod type_page;

pub use signature::{decompose, parse_signature, Signature};
pub use table::{column_arity, extract_rows, Row};
pub use text::{normalize, strip_generics};
pub use type_page::parse_type_page;

use crate::SoftParseError;
use serde::Serialize;
use std::fmt;

/// Logical kind of a summary-table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Field,
    Constructor,
    Method,
}

impl RowKind {
    /// Returns true if a table with `arity` columns is legal for this kind
    ///
    /// Only constructor tables may omit the modifier column.
    pub fn accepts_arity(&self, arity: usize) -> bool {
        match self {
            Self::Constructor => arity == 2 || arity == 3,
            Self::Field | Self::Method => arity == 3,
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Field => "field",
            Self::Constructor => "constructor",
            Self::Method => "method",
        };
        f.write_str(name)
    }
}

/// Soft errors recorded while extracting one page
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    errors: Vec<SoftParseError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a soft error and logs it
    pub fn record(&mut self, error: SoftParseError) {
        tracing::warn!("{}", error);
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[SoftParseError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<SoftParseError> {
        self.errors
    }
}
