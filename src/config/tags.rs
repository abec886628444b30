//! `[tags]` section configuration.
//!
//! Controls tag normalization: share-string aliases, per-host overrides,
//! and the tag names excluded from the derived indexes.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `[tags]` section in inkstone.toml - tag index behavior.
///
/// # Example
/// ```toml
/// [tags]
/// hidden = ["posts", "all"]
/// dropped = ["posts", "politics"]
///
/// [tags.aliases]
/// "web dev" = "#WebDev"
///
/// [[tags.hosts]]
/// pattern = "thestorygraph.com"
/// tags = "#Books #NowReading #TheStoryGraph"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    /// Tag names excluded from the unique tag list.
    #[serde(default = "defaults::tags::hidden")]
    #[educe(Default = defaults::tags::hidden())]
    pub hidden: Vec<String>,

    /// Tag names removed from the by-count ranking.
    #[serde(default = "defaults::tags::dropped")]
    #[educe(Default = defaults::tags::dropped())]
    pub dropped: Vec<String>,

    /// Lowercase tag name to share string (e.g., "web dev" -> "#WebDev").
    /// Tags without an alias are omitted from the tag map.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Host-specific share strings, checked before the per-URL tag map.
    #[serde(default = "defaults::tags::hosts")]
    #[educe(Default = defaults::tags::hosts())]
    pub hosts: Vec<HostTags>,
}

/// One `[[tags.hosts]]` entry mapping a URL substring to a share string.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct HostTags {
    /// Substring matched against the looked-up URL.
    pub pattern: String,

    /// Space-separated hashtag string returned on a match.
    pub tags: String,
}
