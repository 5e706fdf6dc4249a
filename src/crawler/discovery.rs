//! Link discovery on index, module and package pages
//!
//! Each level of the documentation tree lists its children in a summary
//! table. Links are resolved against the page that declares them, so the
//! depth of a page never breaks relative-link resolution.

use crate::url::resolve_link;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Module anchors on the module index page
pub const MODULE_LINKS: &str = "#all-modules-table .summary-table .col-first a";

/// Package anchors on a module page
pub const PACKAGE_LINKS: &str = "#package-summary-table .summary-table .col-first a";

/// Class and interface anchors on a package page
pub const CLASS_LINKS: &str = "#class-summary .summary-table .col-first a";

/// Links to module pages whose display name starts with `prefix`
///
/// # Example
///
/// ```
/// use javadoc_harvest::crawler::module_links;
/// use url::Url;
///
/// let html = r#"<div id="all-modules-table"><div class="summary-table">
///   <div class="col-first"><a href="java.base/module-summary.html">java.base</a></div>
///   <div class="col-first"><a href="jdk.jshell/module-summary.html">jdk.jshell</a></div>
/// </div></div>"#;
/// let index = Url::parse("https://docs.example.com/api/index.html").unwrap();
///
/// let links = module_links(html, &index, "java.");
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://docs.example.com/api/java.base/module-summary.html");
/// ```
pub fn module_links(html: &str, page_url: &Url, prefix: &str) -> Vec<Url> {
    extract_links(html, page_url, MODULE_LINKS, |text| text.starts_with(prefix))
}

/// Links to the package pages of a module
pub fn package_links(html: &str, page_url: &Url) -> Vec<Url> {
    extract_links(html, page_url, PACKAGE_LINKS, |_| true)
}

/// Links to the class pages of a package
pub fn class_links(html: &str, page_url: &Url) -> Vec<Url> {
    extract_links(html, page_url, CLASS_LINKS, |_| true)
}

/// Resolves matching anchors, keeping page order and dropping duplicates
fn extract_links<F>(html: &str, page_url: &Url, css: &str, accept: F) -> Vec<Url>
where
    F: Fn(&str) -> bool,
{
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&selector) {
        let text: String = anchor.text().collect();
        if !accept(text.trim()) {
            continue;
        }

        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        match resolve_link(href, page_url) {
            Some(url) => {
                if seen.insert(url.clone()) {
                    links.push(url);
                }
            }
            None => tracing::debug!("Skipping unresolvable link '{}' on {}", href, page_url),
        }
    }

    links
}
