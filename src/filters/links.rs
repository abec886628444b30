//! Link hygiene: tracking-parameter removal, URL absolutization, and
//! feed-safe ampersand escaping.

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

/// A `utm_*` query parameter together with the `?` or `&` that introduces it
static UTM_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[?&]utm_[^&=]+=[^&#]*").unwrap());

/// Entity body directly after an ampersand: named, decimal, or hex form
static ENTITY_AFTER_AMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-zA-Z]+|#[0-9]+|#x[0-9a-fA-F]+);").unwrap());

/// Remove `utm_*` tracking parameters from a URL.
pub fn strip_utm(url: &str) -> Cow<'_, str> {
    UTM_PARAM.replace_all(url, "")
}

/// Resolve `url` against `base` unless it already carries a scheme.
///
/// Without a base the URL passes through unchanged.
pub fn absolute_url(url: &str, base: Option<&str>) -> String {
    if url.contains("://") || url.starts_with("//") {
        return url.to_string();
    }
    let Some(base) = base else {
        return url.to_string();
    };
    let base = base.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{base}{url}")
    } else {
        format!("{base}/{url}")
    }
}

/// Escape each `&` that does not already begin a character entity.
pub fn encode_amp(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if ENTITY_AFTER_AMP.is_match(after) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
        rest = after;
    }
    out.push_str(rest);
    Cow::Owned(out)
}

// ============================================================================
// Tests
// ============================================================================
