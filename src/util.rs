//! Small string helpers shared by routing, listings and the TOC.

use pulldown_cmark::escape::escape_html;

/// Normalizes `s` the way category links and heading anchors are built:
/// lowercased, with every run of whitespace collapsed into a single `-`.
/// Leading and trailing whitespace is kept as a hyphen, not trimmed.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
        } else {
            in_space = false;
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Turns a slug back into a readable label: first character uppercased,
/// hyphens replaced by spaces. Every hyphen is replaced, not just the first,
/// so `mis-notas-viejas` reads `Mis notas viejas`.
pub fn capitalize(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars)
            .map(|c| if c == '-' { ' ' } else { c })
            .collect(),
    }
}

/// HTML-escapes `s` into a fresh string.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // Writing into a `String` never fails.
    let _ = escape_html(&mut out, s);
    out
}
