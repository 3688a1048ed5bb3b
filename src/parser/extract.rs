//! Address and display-name extraction for recipient-style headers.
//!
//! Patterns are compiled once per process and shared read-only.

use std::sync::LazyLock;

use regex::Regex;

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_.%+-]+@[A-Za-z0-9_.-]+\.[A-Za-z]{2,}")
        .expect("address pattern is valid")
});

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ0-9 ()-]+$").expect("name pattern is valid"));

/// `<...>` routes, e.g. `</O=ENRON/OU=NA/CN=RECIPIENTS/CN=JDOE>` or `<a@b.com>`.
static ANGLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("angle pattern is valid"));

/// All email addresses in `text`, in order of appearance.
pub fn addresses(text: &str) -> Vec<String> {
    ADDRESS_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Display-name tokens in `text`, in order of appearance.
///
/// The text is split into list entries; from each entry the angle-bracket
/// route and any bare address are removed, and what remains is kept only if
/// it is a plain name (Latin letters including diacritics, digits, spaces,
/// parentheses, hyphens).
pub fn names(text: &str) -> Vec<String> {
    split_list(text)
        .into_iter()
        .filter_map(|entry| {
            let without_route = ANGLE_RE.replace_all(entry, " ");
            let without_address = ADDRESS_RE.replace_all(&without_route, " ");
            let candidate = strip_quotes(&without_address);
            (!candidate.is_empty() && NAME_RE.is_match(&candidate)).then_some(candidate)
        })
        .collect()
}

/// Addresses followed by names, the stored value of an extracted field.
pub fn addresses_and_names(text: &str) -> Vec<String> {
    let mut values = addresses(text);
    values.extend(names(text));
    values
}

/// Split on commas and trim each piece. Empty pieces are dropped.
pub fn split_commas(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a recipient list on commas that are outside quotes and angle brackets.
///
/// `"Last, First" <a@b.com>, other@c.com` yields two entries.
fn split_list(raw: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut in_angle = false;

    for (i, ch) in raw.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '<' if !in_quotes => in_angle = true,
            '>' if !in_quotes => in_angle = false,
            ',' if !in_quotes && !in_angle => {
                entries.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&raw[start..]);

    entries
}

/// Strip surrounding double-quotes and trim whitespace.
fn strip_quotes(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}
