//! Text cleanup applied to every extracted cell

/// Collapses whitespace runs (including non-breaking spaces) to one space
///
/// # Examples
///
/// ```
/// use javadoc_harvest::normalize;
///
/// assert_eq!(normalize(" a\u{a0}\u{a0}b\n "), "a b");
/// ```
pub fn normalize(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes angle-bracketed generic parameter lists, honoring nesting
///
/// Characters inside `<...>` at any depth are dropped; everything at depth 0
/// is kept in order. When the brackets don't balance the text probably
/// wasn't generics at all, so it is returned unchanged with a warning.
///
/// # Examples
///
/// ```
/// use javadoc_harvest::strip_generics;
///
/// assert_eq!(strip_generics("addAll(Collection<List<A,B>,C> c)"), "addAll(Collection c)");
/// assert_eq!(strip_generics("a < b"), "a < b");
/// ```
pub fn strip_generics(text: &str) -> String {
    if !text.contains(['<', '>']) {
        return text.to_string();
    }

    let mut depth = 0usize;
    let mut stripped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '<' => depth += 1,
            '>' if depth == 0 => {
                tracing::warn!("Angle brackets don't match up: {}", text);
                return text.to_string();
            }
            '>' => depth -= 1,
            _ if depth == 0 => stripped.push(ch),
            _ => {}
        }
    }

    if depth != 0 {
        tracing::warn!("Angle brackets don't match up: {}", text);
        return text.to_string();
    }

    stripped
}

/// Cleans raw cell text: zero-width spaces removed, generics stripped, then normalized
///
/// Javadoc inserts U+200B as a line-break hint inside long signatures.
pub(crate) fn clean_cell(raw: &str) -> String {
    let without_breaks: String = raw.chars().filter(|&c| c != '\u{200b}').collect();
    normalize(&strip_generics(&without_breaks))
}
