//! Post and link collection loading.
//!
//! Posts are Markdown files with YAML front matter, discovered by walking
//! the configured posts directory. Links come from an optional JSON data
//! file and only participate in tag indexing.

use crate::{config::SiteConfig, log, utils::date::DateTimeUtc, utils::slug::slugify};
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use walkdir::WalkDir;

/// Leading `YYYY-MM-DD-` filename prefix, stripped before slug derivation.
static DATE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}-").unwrap());

/// One published post, ordered by publish date.
#[derive(Debug, Clone)]
pub struct Post {
    pub title: String,
    pub description: Option<String>,
    pub date: DateTimeUtc,
    pub path: PathBuf,
    pub url: String,
    pub tags: Vec<String>,
}

/// One shared link from the links data file.
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// YAML front matter fields recognized on posts.
/// Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FrontMatter {
    title: String,
    description: Option<String>,
    date: Option<String>,
    tags: Option<TagField>,
    draft: bool,
    url: Option<String>,
}

/// `tags:` accepts either a single string or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagField {
    One(String),
    Many(Vec<String>),
}

impl TagField {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(tag) => vec![tag],
            Self::Many(tags) => tags,
        }
    }
}

/// Load all publishable posts, sorted ascending by publish date.
///
/// Drafts and posts without a date are skipped. A missing posts directory
/// yields an empty collection rather than an error.
pub fn load_posts(config: &SiteConfig) -> Result<Vec<Post>> {
    let dir = &config.content.posts;
    if !dir.exists() {
        log!("content"; "No posts directory at `{}`", dir.display());
        return Ok(Vec::new());
    }

    let mut posts = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if !matches!(ext, "md" | "markdown") {
            continue;
        }

        match load_post(path) {
            Ok(Some(post)) => posts.push(post),
            Ok(None) => {}
            Err(err) => log!("error"; "{err:#}"),
        }
    }

    posts.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(posts)
}

/// Load a single post file. Returns `None` for drafts and undated posts.
fn load_post(path: &Path) -> Result<Option<Post>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read `{}`", path.display()))?;
    let front = parse_front_matter(&content)
        .with_context(|| format!("Invalid front matter in `{}`", path.display()))?;

    if front.draft {
        return Ok(None);
    }
    let Some(date) = front.date else {
        log!("content"; "Skipping `{}`: no date in front matter", path.display());
        return Ok(None);
    };
    let date = DateTimeUtc::parse(&date)
        .with_context(|| format!("Invalid date in `{}`", path.display()))?;

    let url = front.url.unwrap_or_else(|| derive_url(path));

    Ok(Some(Post {
        title: front.title,
        description: front.description,
        date,
        path: path.to_path_buf(),
        url,
        tags: front.tags.map(TagField::into_vec).unwrap_or_default(),
    }))
}

/// Parse the leading `---`-delimited front matter block.
/// A file without one yields the default (empty) front matter.
fn parse_front_matter(content: &str) -> Result<FrontMatter> {
    let mut lines = content.lines();
    if lines.next() != Some("---") {
        return Ok(FrontMatter::default());
    }

    let block = lines
        .take_while(|line| *line != "---")
        .collect::<Vec<_>>()
        .join("\n");
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    Ok(serde_yaml::from_str(&block)?)
}

/// Derive a post URL from its filename: `2024-01-05-hello-world.md` -> `/posts/hello-world/`.
fn derive_url(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let stem = DATE_PREFIX.replace(stem, "");
    format!("/posts/{}/", slugify(&stem))
}

/// Load the shared links collection, if a links file is configured.
pub fn load_links(config: &SiteConfig) -> Result<Vec<Link>> {
    let Some(path) = &config.content.links else {
        return Ok(Vec::new());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read `{}`", path.display()))?;
    let links: Vec<Link> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid links data in `{}`", path.display()))?;
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_post(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        write!(file, "{content}").unwrap();
    }

    fn config_with_posts(dir: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.content.posts = dir.to_path_buf();
        config
    }

    #[test]
    fn test_parse_front_matter_basic() {
        let front = parse_front_matter(
            "---\ntitle: Hello\ndescription: A greeting\ndate: 2024-01-05\ntags:\n  - posts\n  - music\n---\nbody",
        )
        .unwrap();

        assert_eq!(front.title, "Hello");
        assert_eq!(front.description.as_deref(), Some("A greeting"));
        assert_eq!(front.date.as_deref(), Some("2024-01-05"));
        assert_eq!(
            front.tags.map(TagField::into_vec),
            Some(vec!["posts".to_string(), "music".to_string()])
        );
        assert!(!front.draft);
    }

    #[test]
    fn test_parse_front_matter_missing() {
        let front = parse_front_matter("just prose, no delimiters").unwrap();

        assert_eq!(front.title, "");
        assert_eq!(front.date, None);
    }

    #[test]
    fn test_parse_front_matter_empty_block() {
        let front = parse_front_matter("---\n---\nbody").unwrap();

        assert_eq!(front.title, "");
    }

    #[test]
    fn test_parse_front_matter_single_tag_string() {
        let front = parse_front_matter("---\ntags: posts\n---\n").unwrap();

        assert_eq!(
            front.tags.map(TagField::into_vec),
            Some(vec!["posts".to_string()])
        );
    }

    #[test]
    fn test_parse_front_matter_inline_tag_list() {
        let front = parse_front_matter("---\ntags: [\"posts\", \"tech\"]\n---\n").unwrap();

        assert_eq!(
            front.tags.map(TagField::into_vec),
            Some(vec!["posts".to_string(), "tech".to_string()])
        );
    }

    #[test]
    fn test_derive_url_strips_date_prefix() {
        assert_eq!(
            derive_url(Path::new("/posts/2024-01-05-hello-world.md")),
            "/posts/hello-world/"
        );
    }

    #[test]
    fn test_derive_url_plain_name() {
        assert_eq!(
            derive_url(Path::new("/posts/On Tags & Aliases.md")),
            "/posts/on-tags-aliases/"
        );
    }

    #[test]
    fn test_load_posts_sorted_by_date() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "b.md", "---\ntitle: B\ndate: 2023-05-01\n---\nb");
        write_post(dir.path(), "a.md", "---\ntitle: A\ndate: 2022-01-01\n---\na");
        write_post(dir.path(), "c.md", "---\ntitle: C\ndate: 2024-12-31\n---\nc");

        let posts = load_posts(&config_with_posts(dir.path())).unwrap();

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].title, "A");
        assert_eq!(posts[1].title, "B");
        assert_eq!(posts[2].title, "C");
    }

    #[test]
    fn test_load_posts_skips_drafts_and_undated() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "draft.md",
            "---\ntitle: D\ndate: 2024-01-01\ndraft: true\n---\n",
        );
        write_post(dir.path(), "undated.md", "---\ntitle: U\n---\n");
        write_post(dir.path(), "ok.md", "---\ntitle: OK\ndate: 2024-01-02\n---\n");

        let posts = load_posts(&config_with_posts(dir.path())).unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "OK");
    }

    #[test]
    fn test_load_posts_ignores_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "note.txt", "---\ntitle: T\ndate: 2024-01-01\n---\n");
        write_post(
            dir.path(),
            "post.markdown",
            "---\ntitle: M\ndate: 2024-01-01\n---\n",
        );

        let posts = load_posts(&config_with_posts(dir.path())).unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "M");
    }

    #[test]
    fn test_load_posts_missing_dir() {
        let config = config_with_posts(Path::new("/nonexistent/posts"));
        let posts = load_posts(&config).unwrap();

        assert!(posts.is_empty());
    }

    #[test]
    fn test_load_posts_url_override() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "2024-01-05-some-post.md",
            "---\ntitle: P\ndate: 2024-01-05\nurl: /elsewhere/\n---\n",
        );
        write_post(
            dir.path(),
            "2024-01-06-other-post.md",
            "---\ntitle: Q\ndate: 2024-01-06\n---\n",
        );

        let posts = load_posts(&config_with_posts(dir.path())).unwrap();

        assert_eq!(posts[0].url, "/elsewhere/");
        assert_eq!(posts[1].url, "/posts/other-post/");
    }

    #[test]
    fn test_load_links() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"url": "https://example.com/a", "tags": ["music"], "title": "ignored"}}]"#
        )
        .unwrap();

        let mut config = SiteConfig::default();
        config.content.links = Some(file.path().to_path_buf());

        let links = load_links(&config).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com/a");
        assert_eq!(links[0].tags, vec!["music"]);
    }

    #[test]
    fn test_load_links_none_configured() {
        let links = load_links(&SiteConfig::default()).unwrap();
        assert!(links.is_empty());
    }
}
