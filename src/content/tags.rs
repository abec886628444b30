//! Tag indexes derived from the post and link collections.
//!
//! Three views are produced: a sorted unique tag list, a per-URL share
//! string map (tags mapped through the alias table), and a by-count
//! ranking with configured names removed.

use crate::{
    config::SiteConfig,
    content::post::{Link, Post},
};
use regex::Regex;
use serde::Serialize;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::LazyLock,
};

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// All tag indexes, serialized together by the `tags` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagReport {
    pub tag_list: Vec<String>,
    pub tag_map: BTreeMap<String, String>,
    pub tags_sorted_by_count: Vec<String>,
}

/// Build every tag index in one call.
pub fn build_report(posts: &[Post], links: &[Link], config: &SiteConfig) -> TagReport {
    TagReport {
        tag_list: tag_list(posts, config),
        tag_map: tag_map(posts, links, config),
        tags_sorted_by_count: tags_sorted_by_count(posts, config),
    }
}

/// Unique tags across all posts, sorted, minus the hidden names.
pub fn tag_list(posts: &[Post], config: &SiteConfig) -> Vec<String> {
    let mut tags = BTreeSet::new();
    for post in posts {
        for tag in &post.tags {
            if config.tags.hidden.iter().any(|hidden| hidden == tag) {
                continue;
            }
            tags.insert(tag.clone());
        }
    }
    tags.into_iter().collect()
}

/// Share strings keyed by absolute URL, for posts and shared links.
///
/// Tags map through the alias table; entries whose tags all lack an alias
/// are omitted.
pub fn tag_map(posts: &[Post], links: &[Link], config: &SiteConfig) -> BTreeMap<String, String> {
    let aliases = &config.tags.aliases;
    let mut map = BTreeMap::new();

    for post in posts {
        let url = absolutize(&post.url, config.site.url.as_deref());
        if let Some(share) = share_string(&post.tags, aliases, true) {
            map.insert(url, share);
        }
    }

    for link in links {
        if let Some(share) = share_string(&link.tags, aliases, false) {
            map.insert(link.url.clone(), share);
        }
    }

    map
}

/// Tag names ranked by post count, descending, minus the dropped names.
/// Ties keep first-seen order.
pub fn tags_sorted_by_count(posts: &[Post], config: &SiteConfig) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for post in posts {
        for tag in &post.tags {
            match counts.iter_mut().find(|(name, _)| name == tag) {
                Some((_, count)) => *count += 1,
                None => counts.push((tag.clone(), 1)),
            }
        }
    }

    counts.retain(|(name, _)| !config.tags.dropped.iter().any(|dropped| dropped == name));
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(name, _)| name).collect()
}

/// Map tags through the alias table and join into one share string.
/// Lookup is by lowercased tag name; unaliased tags drop out.
fn share_string(
    tags: &[String],
    aliases: &BTreeMap<String, String>,
    dedup_values: bool,
) -> Option<String> {
    let mut mapped: Vec<String> = Vec::new();
    for tag in tags {
        let Some(alias) = aliases.get(&tag.to_lowercase()) else {
            continue;
        };
        if dedup_values && mapped.contains(alias) {
            continue;
        }
        mapped.push(alias.clone());
    }

    let joined = mapped.join(" ");
    let share = WHITESPACE_RUN.replace_all(joined.trim(), " ").to_string();
    (!share.is_empty()).then_some(share)
}

/// Prefix relative URLs with the site base. URLs already carrying a scheme
/// pass through.
fn absolutize(url: &str, base: Option<&str>) -> String {
    match base {
        Some(base) if !url.contains("http") => {
            format!("{}{url}", base.trim_end_matches('/'))
        }
        _ => url.to_string(),
    }
}
