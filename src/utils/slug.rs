//! String slugification for URLs and tag anchors.
//!
//! Converts arbitrary titles to lowercase, hyphen-separated ASCII slugs.

use deunicode::deunicode;

/// Characters stripped before slugification
const REMOVED_CHARS: &[char] = &[
    '#', ',', '&', '+', '(', ')', '$', '~', '%', '.', '\'', '"', ':', '*', '?', '<', '>', '{', '}',
];

/// Convert text to a URL-safe slug.
///
/// Transliterates to ASCII, strips punctuation, collapses whitespace and
/// hyphen runs into single hyphens, and lowercases.
///
/// # Examples
/// ```ignore
/// assert_eq!(slugify("Hello, World"), "hello-world");
/// assert_eq!(slugify("Rust & WebAssembly"), "rust-webassembly");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let cleaned: String = ascii
        .chars()
        .filter(|c| !REMOVED_CHARS.contains(c))
        .collect();

    cleaned
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
