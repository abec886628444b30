//! Utility modules shared across the site tooling.

pub mod date;
pub mod exec;
pub mod slug;
