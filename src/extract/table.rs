//! Summary-table extraction
//!
//! Javadoc renders member summaries as a flat `div.summary-table` whose
//! children are the cells, header cells first, in row-major order. The
//! number of columns is only recorded as a class on the table
//! (`two-column-summary`, `three-column-summary`, ...).

use crate::extract::text::clean_cell;
use crate::extract::{Diagnostics, RowKind};
use crate::model::{CallableDescriptor, FieldDescriptor};
use crate::SoftParseError;
use scraper::ElementRef;

/// One decoded table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Field(FieldDescriptor),
    Constructor(CallableDescriptor),
    Method(CallableDescriptor),
}

impl Row {
    pub fn into_field(self) -> Option<FieldDescriptor> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn into_callable(self) -> Option<CallableDescriptor> {
        match self {
            Self::Constructor(callable) | Self::Method(callable) => Some(callable),
            Self::Field(_) => None,
        }
    }
}

/// Reads the column count from the table's layout class; defaults to 3
pub fn column_arity(table: &ElementRef<'_>) -> usize {
    for class in table.value().classes() {
        match class {
            "two-column-summary" => return 2,
            "three-column-summary" => return 3,
            "four-column-summary" => return 4,
            _ => {}
        }
    }
    3
}

/// Extracts typed rows from a summary table
///
/// A layout that is illegal for `kind` (e.g. a two-column method table)
/// yields no rows and records a [`SoftParseError::TableLayout`]. Otherwise
/// the first `arity` cells are skipped as headers and the rest are read in
/// `arity`-sized strides; a trailing partial stride is ignored.
pub fn extract_rows(table: ElementRef<'_>, kind: RowKind, diagnostics: &mut Diagnostics) -> Vec<Row> {
    let arity = column_arity(&table);
    if !kind.accepts_arity(arity) {
        diagnostics.record(SoftParseError::TableLayout {
            row_kind: kind,
            arity,
        });
        return Vec::new();
    }

    let cells: Vec<ElementRef<'_>> = table
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "div")
        .collect();

    if cells.len() <= arity {
        return Vec::new();
    }

    cells[arity..]
        .chunks_exact(arity)
        .filter_map(|chunk| {
            let texts: Vec<String> = chunk.iter().map(cell_text).collect();
            decode_row(kind, &texts)
        })
        .collect()
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    let raw: String = cell.text().collect();
    clean_cell(&raw)
}

fn decode_row(kind: RowKind, cells: &[String]) -> Option<Row> {
    match (kind, cells) {
        (RowKind::Field, [modifiers_and_type, name, description]) => {
            Some(Row::Field(decode_field(modifiers_and_type, name, description)))
        }
        (RowKind::Constructor, [name, description]) => {
            Some(Row::Constructor(decode_constructor(None, name, description)))
        }
        (RowKind::Constructor, [modifier, name, description]) => Some(Row::Constructor(
            decode_constructor(Some(modifier), name, description),
        )),
        (RowKind::Method, [modifiers_and_type, name, description]) => {
            Some(Row::Method(decode_method(modifiers_and_type, name, description)))
        }
        _ => None,
    }
}

fn decode_field(modifiers_and_type: &str, name: &str, description: &str) -> FieldDescriptor {
    let (modifiers, field_type) = split_modifiers_and_type(modifiers_and_type);
    FieldDescriptor {
        name: name.to_string(),
        modifiers,
        field_type,
        description: description.to_string(),
    }
}

fn decode_constructor(modifier: Option<&String>, name: &str, description: &str) -> CallableDescriptor {
    let modifiers = modifier
        .filter(|m| !m.is_empty())
        .map(|m| vec![m.clone()])
        .unwrap_or_default();

    CallableDescriptor {
        name: name.to_string(),
        modifiers,
        return_type: None,
        description: description.to_string(),
        parameters: None,
    }
}

fn decode_method(modifiers_and_type: &str, name: &str, description: &str) -> CallableDescriptor {
    let (modifiers, return_type) = split_modifiers_and_type(modifiers_and_type);
    CallableDescriptor {
        name: name.to_string(),
        modifiers,
        return_type: Some(return_type),
        description: description.to_string(),
        parameters: None,
    }
}

/// "static final String" -> (["static", "final"], "String")
fn split_modifiers_and_type(cell: &str) -> (Vec<String>, String) {
    let mut tokens: Vec<String> = cell.split_whitespace().map(str::to_string).collect();
    let last = tokens.pop().unwrap_or_default();
    (tokens, last)
}
