//! Value transforms applied to content before it reaches templates,
//! feeds, or share text.
//!
//! | Module | Covers |
//! |-----------|-----------------------------------------------|
//! | analytics | Popularity ranking from page-visit data |
//! | dates | Readable, ISO, and RFC 822 date renderings |
//! | feeds | Feed entry normalization |
//! | links | URL cleanup and HTML-safe ampersands |
//! | media | Card fields for media grids |
//! | tags | Hashtag formatting and share-tag lookups |
//! | text | Base64 and line-wrapping helpers |

pub mod analytics;
pub mod dates;
pub mod feeds;
pub mod links;
pub mod media;
pub mod tags;
pub mod text;
