//! Content collections and the indexes derived from them.
//!
//! `post` loads the raw collections, `metrics` measures a single post
//! body, `stats` folds the collection into aggregate statistics, and
//! `tags` builds the tag indexes.

pub mod metrics;
pub mod post;
pub mod stats;
pub mod tags;
