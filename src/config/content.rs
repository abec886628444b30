//! `[content]` section configuration.
//!
//! Locates the Markdown post tree and the optional shared-links data file.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in inkstone.toml - content source locations.
///
/// # Example
/// ```toml
/// [content]
/// posts = "src/posts"
/// links = "src/data/links.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::content::root")]
    #[educe(Default = defaults::content::root())]
    pub root: Option<PathBuf>,

    /// Directory scanned recursively for `.md` / `.markdown` posts.
    #[serde(default = "defaults::content::posts")]
    #[educe(Default = defaults::content::posts())]
    pub posts: PathBuf,

    /// Optional JSON array of shared links (`[{ "url": "...", "tags": [...] }]`).
    /// Link entries participate in the tag map alongside posts.
    #[serde(default = "defaults::content::links")]
    #[educe(Default = defaults::content::links())]
    pub links: Option<PathBuf>,
}
