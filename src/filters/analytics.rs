//! Popularity ranking from page-visit analytics.

use crate::content::post::Post;
use serde::Deserialize;
use std::cmp::Reverse;

/// One analytics row: a page URL and its visitor count.
#[derive(Debug, Clone, Deserialize)]
pub struct PageVisits {
    pub page: String,
    pub visitors: u64,
}

/// Posts that appear in the analytics data, most visited first.
/// Ties keep the original post order.
pub fn popular_posts<'a>(posts: &'a [Post], analytics: &[PageVisits]) -> Vec<&'a Post> {
    let mut ranked: Vec<&Post> = posts
        .iter()
        .filter(|post| analytics.iter().any(|row| row.page == post.url))
        .collect();
    ranked.sort_by_key(|post| Reverse(visitors(analytics, &post.url)));
    ranked
}

/// Visitor count for a URL; the last matching row wins.
fn visitors(analytics: &[PageVisits], url: &str) -> u64 {
    analytics
        .iter()
        .filter(|row| row.page == url)
        .next_back()
        .map_or(0, |row| row.visitors)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::DateTimeUtc;
    use std::path::PathBuf;

    fn post(url: &str) -> Post {
        Post {
            title: url.to_string(),
            description: None,
            date: DateTimeUtc::from_ymd(2024, 1, 1),
            path: PathBuf::new(),
            url: url.to_string(),
            tags: Vec::new(),
        }
    }

    fn row(page: &str, visitors: u64) -> PageVisits {
        PageVisits {
            page: page.to_string(),
            visitors,
        }
    }

    #[test]
    fn test_popular_posts_sorts_by_visitors() {
        let posts = vec![post("/posts/a/"), post("/posts/b/"), post("/posts/c/")];
        let analytics = vec![
            row("/posts/a/", 10),
            row("/posts/b/", 500),
            row("/posts/c/", 42),
        ];
        let ranked = popular_posts(&posts, &analytics);
        let urls: Vec<&str> = ranked.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["/posts/b/", "/posts/c/", "/posts/a/"]);
    }

    #[test]
    fn test_popular_posts_drops_untracked() {
        let posts = vec![post("/posts/a/"), post("/posts/b/")];
        let analytics = vec![row("/posts/b/", 5)];
        let ranked = popular_posts(&posts, &analytics);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].url, "/posts/b/");
    }

    #[test]
    fn test_popular_posts_last_row_wins() {
        let posts = vec![post("/posts/a/"), post("/posts/b/")];
        let analytics = vec![
            row("/posts/a/", 1),
            row("/posts/b/", 10),
            row("/posts/a/", 100),
        ];
        let ranked = popular_posts(&posts, &analytics);
        assert_eq!(ranked[0].url, "/posts/a/");
    }

    #[test]
    fn test_popular_posts_ties_keep_post_order() {
        let posts = vec![post("/posts/a/"), post("/posts/b/")];
        let analytics = vec![row("/posts/a/", 7), row("/posts/b/", 7)];
        let ranked = popular_posts(&posts, &analytics);
        let urls: Vec<&str> = ranked.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["/posts/a/", "/posts/b/"]);
    }
}
