use url::Url;

/// Resolves an anchor href against the page that declares it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel:, data: schemes
/// - fragment-only links (same page anchors)
/// - invalid URLs
/// - non-HTTP(S) URLs after resolution
///
/// The fragment of the resolved URL is dropped, since it never changes which
/// page is fetched.
///
/// # Examples
///
/// ```
/// use javadoc_harvest::url::resolve_link;
/// use url::Url;
///
/// let page = Url::parse("https://docs.example.com/api/java.base/module-summary.html").unwrap();
/// let link = resolve_link("java/util/package-summary.html", &page).unwrap();
/// assert_eq!(
///     link.as_str(),
///     "https://docs.example.com/api/java.base/java/util/package-summary.html"
/// );
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url)
}
