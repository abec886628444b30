//! Inkstone - Writing stats, tag indexes, and an asset pipeline for blogs.
//!
//! This crate is the content layer of a statically generated blog. `content`
//! loads the post collection and derives the writing statistics and tag
//! indexes, `filters` holds the transforms a templating layer applies while
//! rendering, `assets` generates responsive image variants and minifies
//! svg/js, and `config` ties everything to `inkstone.toml`. The `inkstone`
//! binary is a thin driver over these modules.

pub mod assets;
pub mod cli;
pub mod config;
pub mod content;
pub mod filters;
pub mod logger;
pub mod utils;
