//! Per-post text metrics: characters, words, paragraphs, code blocks.
//!
//! The extraction pipeline strips the leading front matter block and all
//! blank lines, counts fenced code blocks, removes them, then measures the
//! remaining prose. Because blank lines are removed first, each surviving
//! line corresponds to one source paragraph.

use regex::Regex;
use std::{fs, path::Path, path::PathBuf, sync::LazyLock};
use thiserror::Error;

/// Leading front matter block: a `---` line, arbitrary content, a `---` line.
static FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\n.*?\n---").unwrap());

/// Blank or whitespace-only lines.
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[\r\n]").unwrap());

/// Fenced code block, for counting (matches empty fences too).
static CODE_BLOCKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

/// Fenced code block, for removal (requires non-empty content).
static CODE_BLOCK_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.+?```").unwrap());

/// Errors produced while deriving metrics from a post file.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Prose metrics for a single post body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostMetrics {
    /// Characters in the processed body, including spaces and newlines.
    pub character_count: usize,
    /// Fenced code blocks found before removal.
    pub code_block_count: usize,
    /// Non-empty lines in the processed body.
    pub paragraph_count: usize,
    /// Whitespace-delimited tokens in the processed body.
    pub word_count: usize,
}

/// Read a post file and derive its metrics.
///
/// The caller decides how to handle a failed read; the aggregation pass
/// substitutes zeroed metrics so one unreadable file never aborts it.
pub fn read_metrics(path: &Path) -> Result<PostMetrics, MetricsError> {
    let content = fs::read_to_string(path).map_err(|source| MetricsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_metrics(&content))
}

/// Derive metrics from a raw post body.
pub fn extract_metrics(content: &str) -> PostMetrics {
    let content = FRONT_MATTER.replace(content, "");
    let content = BLANK_LINES.replace_all(&content, "");

    let code_block_count = CODE_BLOCKS.find_iter(&content).count();
    let content = CODE_BLOCK_STRIP.replace_all(&content, "");

    PostMetrics {
        character_count: content.chars().count(),
        code_block_count,
        paragraph_count: content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count(),
        word_count: content.split_whitespace().count(),
    }
}
