//! Writing statistics aggregation.
//!
//! A single forward pass over the date-sorted post collection derives
//! per-year and all-time aggregates. A year bucket closes when the walk
//! crosses a calendar-year boundary, and the gap between the last post of
//! one year and the first post of the next is attributed to the new year.
//!
//! `yearProgress` compares each closing year against the highest yearly
//! post count seen up to that point in the walk (a running maximum, not
//! the global maximum), so the first year always reads 100.

use crate::{
    content::metrics::{PostMetrics, read_metrics},
    content::post::Post,
    log,
    utils::date::DateTimeUtc,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Seconds per day, for fractional day-gap arithmetic.
const DAY_SECONDS: f64 = 86_400.0;

/// Aggregates finalized for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStats {
    pub year: u16,
    pub days_in_year: u16,
    pub post_count: usize,
    pub word_count: usize,
    pub code_block_count: usize,
    pub avg_days: f64,
    pub avg_character_count: f64,
    pub avg_code_block_count: f64,
    pub avg_paragraph_count: f64,
    pub avg_word_count: f64,
    pub year_progress: f64,
}

/// All-time aggregates plus the per-year sequence and day buckets.
///
/// Field names and rounding are part of the rendered output contract.
/// Averages are rounded to two decimals; `year_progress` is not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    pub avg_days: f64,
    pub avg_character_count: f64,
    pub avg_code_block_count: f64,
    pub avg_paragraph_count: f64,
    pub avg_word_count: f64,
    pub total_word_count: usize,
    pub total_code_block_count: usize,
    pub post_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_post_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_post_date: Option<String>,
    pub high_post_count: usize,
    pub years: Vec<YearStats>,
    pub posts_by_day: BTreeMap<String, usize>,
}

/// Running sums for the year currently being walked.
#[derive(Default)]
struct YearAccumulator {
    character_count: usize,
    code_block_count: usize,
    paragraph_count: usize,
    word_count: usize,
    post_count: usize,
    post_days: f64,
}

/// Fold a date-sorted post collection into aggregate statistics.
///
/// An empty collection yields the zeroed structure. Unreadable post files
/// contribute zeroed metrics but still count toward `post_count`.
pub fn aggregate(posts: &[Post]) -> PostStats {
    let mut stats = PostStats::default();

    if posts.is_empty() {
        log!("stats"; "No posts found");
        return stats;
    }

    stats.post_count = posts.len();
    stats.first_post_date = Some(posts[0].date.to_iso8601());
    stats.last_post_date = Some(posts[posts.len() - 1].date.to_iso8601());

    let mut total_days = 0.0;
    let mut total_character_count = 0;
    let mut total_code_block_count = 0;
    let mut total_paragraph_count = 0;
    let mut total_word_count = 0;

    let mut prev_date = posts[0].date;
    let mut current_year = prev_date.year;
    let mut acc = YearAccumulator::default();
    let mut high_post_count = 0;

    for post in posts {
        let date = post.date;
        *stats.posts_by_day.entry(day_key(&date)).or_insert(0) += 1;

        let days_between = (date.epoch_seconds() - prev_date.epoch_seconds()) as f64 / DAY_SECONDS;

        // Close the previous year before this post's metrics are folded in;
        // the boundary-spanning gap belongs to the new year.
        if date.year != current_year {
            stats
                .years
                .push(finalize_year(current_year, &acc, &mut high_post_count));
            acc = YearAccumulator::default();
            current_year = date.year;
        }

        prev_date = date;
        total_days += days_between;
        acc.post_days += days_between;
        acc.post_count += 1;

        let metrics = post_metrics(post);
        total_character_count += metrics.character_count;
        acc.character_count += metrics.character_count;
        total_code_block_count += metrics.code_block_count;
        acc.code_block_count += metrics.code_block_count;
        total_paragraph_count += metrics.paragraph_count;
        acc.paragraph_count += metrics.paragraph_count;
        total_word_count += metrics.word_count;
        acc.word_count += metrics.word_count;
    }

    if acc.post_count > 0 {
        stats
            .years
            .push(finalize_year(current_year, &acc, &mut high_post_count));
    }

    let post_count = posts.len() as f64;
    stats.avg_days = round2(total_days / post_count);
    stats.avg_character_count = round2(total_character_count as f64 / post_count);
    stats.avg_code_block_count = round2(total_code_block_count as f64 / post_count);
    stats.avg_paragraph_count = round2(total_paragraph_count as f64 / post_count);
    stats.avg_word_count = round2(total_word_count as f64 / post_count);
    stats.total_word_count = total_word_count;
    stats.total_code_block_count = total_code_block_count;
    stats.high_post_count = high_post_count;

    stats
}

/// Bucket key for calendar-heatmap rendering: `year-ordinal`, both unpadded.
fn day_key(date: &DateTimeUtc) -> String {
    format!("{}-{}", date.year, date.ordinal())
}

/// Close one year bucket, updating the running maximum as a side effect.
fn finalize_year(year: u16, acc: &YearAccumulator, high_post_count: &mut usize) -> YearStats {
    let post_count = acc.post_count as f64;
    *high_post_count = (*high_post_count).max(acc.post_count);

    YearStats {
        year,
        days_in_year: DateTimeUtc::days_in_year(year),
        post_count: acc.post_count,
        word_count: acc.word_count,
        code_block_count: acc.code_block_count,
        avg_days: round2(acc.post_days / post_count),
        avg_character_count: round2(acc.character_count as f64 / post_count),
        avg_code_block_count: round2(acc.code_block_count as f64 / post_count),
        avg_paragraph_count: round2(acc.paragraph_count as f64 / post_count),
        avg_word_count: round2(acc.word_count as f64 / post_count),
        year_progress: acc.post_count as f64 / *high_post_count as f64 * 100.0,
    }
}

/// Metrics for one post, zeroed when the file cannot be read.
fn post_metrics(post: &Post) -> PostMetrics {
    match read_metrics(&post.path) {
        Ok(metrics) => metrics,
        Err(err) => {
            log!("error"; "{err}");
            PostMetrics::default()
        }
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path, path::PathBuf};

    fn make_post(dir: &Path, name: &str, date: &str, body: &str) -> Post {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        Post {
            title: name.to_string(),
            description: None,
            date: DateTimeUtc::parse(date).unwrap(),
            path,
            url: format!("/posts/{name}/"),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_aggregate_empty() {
        let stats = aggregate(&[]);

        assert_eq!(stats.post_count, 0);
        assert!(stats.years.is_empty());
        assert!(stats.posts_by_day.is_empty());
        assert_eq!(stats.first_post_date, None);
        assert_eq!(stats.last_post_date, None);
        assert_eq!(stats, PostStats::default());
    }

    #[test]
    fn test_aggregate_single_post() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![make_post(
            dir.path(),
            "only.md",
            "2023-03-15",
            "---\ntitle: t\n---\none two three",
        )];

        let stats = aggregate(&posts);

        assert_eq!(stats.post_count, 1);
        assert_eq!(stats.total_word_count, 3);
        assert_eq!(stats.avg_word_count, 3.0);
        assert_eq!(stats.avg_character_count, 13.0);
        assert_eq!(stats.avg_days, 0.0);
        assert_eq!(stats.high_post_count, 1);
        assert_eq!(stats.years.len(), 1);
        assert_eq!(stats.years[0].year, 2023);
        assert_eq!(stats.years[0].year_progress, 100.0);
        assert_eq!(stats.first_post_date.as_deref(), Some("2023-03-15T00:00:00Z"));
        assert_eq!(stats.last_post_date.as_deref(), Some("2023-03-15T00:00:00Z"));
    }

    #[test]
    fn test_year_boundary_crossing() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![
            make_post(dir.path(), "a.md", "2022-01-01", "a"),
            make_post(dir.path(), "b.md", "2022-06-01", "b"),
            make_post(dir.path(), "c.md", "2023-01-01", "c"),
        ];

        let stats = aggregate(&posts);

        assert_eq!(stats.years.len(), 2);
        assert_eq!(stats.years[0].post_count, 2);
        assert_eq!(stats.years[1].post_count, 1);
        assert_eq!(stats.high_post_count, 2);

        // Jan 1 -> Jun 1 is 151 days, both inside 2022
        assert_eq!(stats.years[0].avg_days, 75.5);
        // The 214-day gap spanning the boundary lands in 2023
        assert_eq!(stats.years[1].avg_days, 214.0);
        assert_eq!(stats.avg_days, round2(365.0 / 3.0));

        assert_eq!(stats.years[0].year_progress, 100.0);
        assert_eq!(stats.years[1].year_progress, 50.0);
    }

    #[test]
    fn test_sum_of_year_post_counts_equals_total() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![
            make_post(dir.path(), "a.md", "2021-02-01", "one"),
            make_post(dir.path(), "b.md", "2021-07-04", "two words"),
            make_post(dir.path(), "c.md", "2022-01-15", "three words here"),
            make_post(dir.path(), "d.md", "2024-05-20", "four"),
            make_post(dir.path(), "e.md", "2024-11-11", "five"),
        ];

        let stats = aggregate(&posts);

        let year_sum: usize = stats.years.iter().map(|y| y.post_count).sum();
        assert_eq!(year_sum, stats.post_count);
        assert_eq!(stats.post_count, 5);
    }

    #[test]
    fn test_days_in_year_per_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![
            make_post(dir.path(), "a.md", "2023-06-01", "a"),
            make_post(dir.path(), "b.md", "2024-06-01", "b"),
        ];

        let stats = aggregate(&posts);

        assert_eq!(stats.years[0].days_in_year, 365);
        assert_eq!(stats.years[1].days_in_year, 366);
    }

    #[test]
    fn test_running_max_year_progress() {
        let dir = tempfile::tempdir().unwrap();
        let mut posts = vec![make_post(dir.path(), "a.md", "2020-03-01", "a")];
        for (i, date) in ["2021-01-01", "2021-05-01", "2021-09-01"].iter().enumerate() {
            posts.push(make_post(dir.path(), &format!("b{i}.md"), date, "b"));
        }
        for (i, date) in ["2022-02-01", "2022-08-01"].iter().enumerate() {
            posts.push(make_post(dir.path(), &format!("c{i}.md"), date, "c"));
        }

        let stats = aggregate(&posts);

        // Counts per year: 1, 3, 2. Each year closes against the max so far.
        assert_eq!(stats.years[0].year_progress, 100.0);
        assert_eq!(stats.years[1].year_progress, 100.0);
        assert_eq!(stats.years[2].year_progress, 2.0 / 3.0 * 100.0);
        assert_eq!(stats.high_post_count, 3);
    }

    #[test]
    fn test_posts_by_day_buckets() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![
            make_post(dir.path(), "a.md", "2023-01-01", "a"),
            make_post(dir.path(), "b.md", "2023-01-01T09:30:00Z", "b"),
            make_post(dir.path(), "c.md", "2024-12-31", "c"),
        ];

        let stats = aggregate(&posts);

        assert_eq!(stats.posts_by_day.get("2023-1"), Some(&2));
        assert_eq!(stats.posts_by_day.get("2024-366"), Some(&1));
        assert_eq!(stats.posts_by_day.len(), 2);
    }

    #[test]
    fn test_unreadable_file_counts_with_zero_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let mut posts = vec![make_post(dir.path(), "ok.md", "2023-01-01", "one two three")];
        posts.push(Post {
            title: "gone".to_string(),
            description: None,
            date: DateTimeUtc::parse("2023-02-01").unwrap(),
            path: PathBuf::from("/nonexistent/gone.md"),
            url: "/posts/gone/".to_string(),
            tags: Vec::new(),
        });

        let stats = aggregate(&posts);

        assert_eq!(stats.post_count, 2);
        assert_eq!(stats.total_word_count, 3);
        assert_eq!(stats.years[0].post_count, 2);
    }

    #[test]
    fn test_aggregate_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![
            make_post(dir.path(), "a.md", "2022-01-01", "alpha beta"),
            make_post(dir.path(), "b.md", "2023-04-01", "gamma"),
        ];

        let first = aggregate(&posts);
        let second = aggregate(&posts);

        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![make_post(dir.path(), "a.md", "2023-01-01", "a")];

        let value = serde_json::to_value(aggregate(&posts)).unwrap();

        assert!(value.get("avgDays").is_some());
        assert!(value.get("totalWordCount").is_some());
        assert!(value.get("highPostCount").is_some());
        assert!(value.get("postsByDay").is_some());
        assert!(value.get("firstPostDate").is_some());

        let year = &value["years"][0];
        assert!(year.get("daysInYear").is_some());
        assert!(year.get("yearProgress").is_some());
        assert!(year.get("avgCharacterCount").is_some());
    }
}
