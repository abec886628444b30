//! Hashtag formatting and share-tag lookups.

use crate::config::TagsConfig;
use std::collections::BTreeMap;

/// Tags rendered with their given casing rather than capitalized
const KEEP_CASE: [&str; 3] = ["ios", "macos", "rss"];

/// Drop the structural "posts" tag from a display list.
pub fn filter_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|tag| !tag.eq_ignore_ascii_case("posts"))
        .cloned()
        .collect()
}

/// Render a tag as a hashtag: "web dev" becomes "#WebDev".
///
/// Tags in [`KEEP_CASE`] keep their casing, so "iOS" stays "#iOS".
pub fn format_tag(tag: &str) -> String {
    if KEEP_CASE.contains(&tag.to_lowercase().as_str()) {
        return format!("#{tag}");
    }
    if !tag.contains(' ') {
        return format!("#{}", capitalize(tag));
    }
    let pascal: String = tag.split(' ').map(capitalize).collect();
    format!("#{pascal}")
}

/// Share tags for a URL: host rules win, then the per-URL tag map.
/// Unknown URLs yield an empty string.
pub fn tag_lookup(url: &str, tag_map: &BTreeMap<String, String>, config: &TagsConfig) -> String {
    for host in &config.hosts {
        if url.contains(&host.pattern) {
            return host.tags.clone();
        }
    }
    tag_map.get(url).cloned().unwrap_or_default()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================
