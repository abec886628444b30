//! Feed entry normalization.
//!
//! Aggregated feeds arrive as loosely-shaped JSON from several upstream
//! sources. Normalization reduces each entry to the fields templates
//! render, absolutizes relative URLs, and resolves the excerpt.

use crate::{
    config::SiteConfig, filters::links::absolute_url, log, utils::date::DateTimeUtc,
};
use pulldown_cmark::{Parser, html};
use serde::Serialize;
use serde_json::Value;

/// A feed entry reduced to the fields templates render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub excerpt: String,
}

/// Normalize raw feed entries.
///
/// The first field whose key mentions "date" provides the timestamp,
/// serialized back out as ISO 8601. A `data.post_excerpt` field
/// overrides the description as the excerpt and is rendered from
/// Markdown. Entries without a `url` are skipped.
pub fn normalize_entries(entries: &[Value], config: &SiteConfig) -> Vec<FeedEntry> {
    let mut normalized = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(url) = entry.get("url").and_then(Value::as_str) else {
            log!("feeds"; "Skipping a feed entry without a url");
            continue;
        };

        let date = entry
            .as_object()
            .and_then(|fields| {
                fields
                    .iter()
                    .find(|(key, _)| key.contains("date"))
                    .and_then(|(_, value)| value.as_str())
            })
            .and_then(DateTimeUtc::parse)
            .map(DateTimeUtc::to_iso8601);

        let description = entry.get("description").and_then(Value::as_str);
        let excerpt = match entry.pointer("/data/post_excerpt").and_then(Value::as_str) {
            Some(markdown) => render_markdown(markdown),
            None => description.unwrap_or_default().to_string(),
        };

        let title = entry
            .pointer("/data/title")
            .and_then(Value::as_str)
            .or_else(|| entry.get("title").and_then(Value::as_str))
            .map(str::to_string);

        normalized.push(FeedEntry {
            title,
            url: resolve_url(url, config),
            content: description.map(str::to_string),
            date,
            excerpt,
        });
    }
    normalized
}

fn resolve_url(url: &str, config: &SiteConfig) -> String {
    if url.contains("http") {
        url.to_string()
    } else {
        absolute_url(url, config.site.url.as_deref())
    }
}

fn render_markdown(input: &str) -> String {
    let mut rendered = String::new();
    html::push_html(&mut rendered, Parser::new(input));
    rendered
}

// ============================================================================
// Tests
// ============================================================================
