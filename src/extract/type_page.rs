//! Assembly of one class page into a `TypeDescriptor`

use crate::extract::signature::decompose;
use crate::extract::table::{extract_rows, Row};
use crate::extract::text::clean_cell;
use crate::extract::{Diagnostics, RowKind};
use crate::model::{TypeDescriptor, TypeKind, TypeRef};
use crate::HarvestError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

const FIELD_TABLE: &str = ".field-summary .summary-table";
const CONSTRUCTOR_TABLE: &str = ".constructor-summary .summary-table";
const METHOD_TABLE: &str = ".method-summary .summary-table";
const METHOD_TABLE_FALLBACK: &str = "#method-summary-table .summary-table";

static SUPERTYPES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:extends (.+?))?\s*(?:implements (.+?))?\s*(?:permits .+)?$").unwrap()
});

/// Parses a Javadoc class/interface page
///
/// # Page Structure
///
/// - `h1.title`: "Class HashMap<K,V>", "Enum Class TimeUnit", ...
/// - `.header > .sub-title`: labelled module and package links
/// - `.type-signature .extends-implements`: supertype clause
/// - `.field-summary`, `.constructor-summary`, `.method-summary`: member tables
///
/// A missing title or an unrecognizable supertype clause is a hard error for
/// the page. Table and signature problems only degrade the record and are
/// recorded in `diagnostics`.
pub fn parse_type_page(
    html: &str,
    page_url: &Url,
    diagnostics: &mut Diagnostics,
) -> Result<TypeDescriptor, HarvestError> {
    let document = Html::parse_document(html);
    let structure_error = |message: String| HarvestError::PageStructure {
        url: page_url.to_string(),
        message,
    };

    let (kind, name) = parse_title(&document).map_err(structure_error)?;
    let (module_name, package_name) = parse_sub_titles(&document);
    let (extends_types, implements_types) = parse_supertypes(&document).map_err(structure_error)?;

    tracing::debug!("Getting type data for {} {}.{}", kind, package_name, name);

    let fields = table_rows(&document, FIELD_TABLE, RowKind::Field, diagnostics)
        .unwrap_or_default()
        .into_iter()
        .filter_map(Row::into_field)
        .collect();

    let constructors = table_rows(&document, CONSTRUCTOR_TABLE, RowKind::Constructor, diagnostics)
        .unwrap_or_default()
        .into_iter()
        .filter_map(Row::into_callable)
        .map(|callable| decompose(callable, diagnostics))
        .collect();

    let methods = method_rows(&document, diagnostics)
        .into_iter()
        .filter_map(Row::into_callable)
        .map(|callable| decompose(callable, diagnostics))
        .collect();

    Ok(TypeDescriptor {
        kind,
        name,
        package_name,
        module_name,
        extends_types,
        implements_types,
        fields,
        constructors,
        methods,
    })
}

fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    let found = scope.select(&selector).next();
    found
}

fn clean_text(element: &ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    clean_cell(&raw)
}

/// Rows of the first table matching `css`, or None if there is no such table
fn table_rows(
    document: &Html,
    css: &str,
    kind: RowKind,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<Row>> {
    let table = select_first(document.root_element(), css)?;
    Some(extract_rows(table, kind, diagnostics))
}

/// Method rows, trying the fallback table when the primary one yields none
///
/// The fallback is skipped when both selectors land on the same element, so
/// a malformed table records its soft error only once.
fn method_rows(document: &Html, diagnostics: &mut Diagnostics) -> Vec<Row> {
    let primary = select_first(document.root_element(), METHOD_TABLE);
    let rows = primary
        .map(|table| extract_rows(table, RowKind::Method, diagnostics))
        .unwrap_or_default();
    if !rows.is_empty() {
        return rows;
    }

    match select_first(document.root_element(), METHOD_TABLE_FALLBACK) {
        Some(fallback) if primary.map(|table| table.id()) != Some(fallback.id()) => {
            extract_rows(fallback, RowKind::Method, diagnostics)
        }
        _ => rows,
    }
}

fn parse_title(document: &Html) -> Result<(TypeKind, String), String> {
    let title = select_first(document.root_element(), "h1.title")
        .map(|h1| clean_text(&h1))
        .ok_or_else(|| "missing h1.title".to_string())?;

    let words: Vec<&str> = title.split(' ').collect();
    let (first, name) = match words.as_slice() {
        [first, .., name] => (*first, *name),
        _ => return Err(format!("can't read kind and name from title '{}'", title)),
    };

    let kind = TypeKind::from_title_word(first)
        .ok_or_else(|| format!("unknown type kind in title '{}'", title))?;

    Ok((kind, name.to_string()))
}

/// Returns (module, package); either is empty when the page doesn't say
fn parse_sub_titles(document: &Html) -> (String, String) {
    let mut module_name = String::new();
    let mut package_name = String::new();

    let Ok(selector) = Selector::parse(".header > .sub-title") else {
        return (module_name, package_name);
    };

    for sub_title in document.select(&selector) {
        let label = select_first(sub_title, "span").map(|span| clean_text(&span));
        let content = select_first(sub_title, "a").map(|a| clean_text(&a));

        if let (Some(label), Some(content)) = (label, content) {
            match label.trim_end_matches(':').to_lowercase().as_str() {
                "module" => module_name = content,
                "package" => package_name = content,
                _ => {}
            }
        }
    }

    (module_name, package_name)
}

type Supertypes = (Option<Vec<TypeRef>>, Option<Vec<TypeRef>>);

fn parse_supertypes(document: &Html) -> Result<Supertypes, String> {
    let Some(clause) = select_first(document.root_element(), ".type-signature .extends-implements")
    else {
        return Ok((None, None));
    };

    parse_supertype_clause(&clean_text(&clause))
}

/// Splits "extends A implements B, C" into its two type lists
fn parse_supertype_clause(clause: &str) -> Result<Supertypes, String> {
    let captures = SUPERTYPES_RE
        .captures(clause)
        .ok_or_else(|| format!("can't parse extends-implements section '{}'", clause))?;

    let type_list = |index: usize| {
        captures
            .get(index)
            .map(|m| parse_type_list(m.as_str()))
            .filter(|types| !types.is_empty())
    };

    Ok((type_list(1), type_list(2)))
}

fn parse_type_list(list: &str) -> Vec<TypeRef> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
