//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inkstone content pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Posts directory path (relative to project root)
    #[arg(short, long)]
    pub posts: Option<PathBuf>,

    /// Minify generated markup
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Config file name (default: inkstone.toml)
    #[arg(short = 'C', long, default_value = "inkstone.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared report arguments for Stats and Tags commands
#[derive(clap::Args, Debug, Clone)]
pub struct ReportArgs {
    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub pretty: Option<bool>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Aggregate writing statistics across all posts
    Stats {
        #[command(flatten)]
        report_args: ReportArgs,
    },

    /// Build the tag indexes (unique list, share map, by-count ranking)
    Tags {
        #[command(flatten)]
        report_args: ReportArgs,
    },

    /// Process assets: responsive images, social previews, client scripts
    Assets {
        /// generate responsive image variants (enabled by default)
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        images: Option<bool>,

        /// rasterize social preview svgs (enabled by default)
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        social: Option<bool>,

        /// minify client scripts in place (enabled by default)
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        scripts: Option<bool>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_stats(&self) -> bool {
        matches!(self.command, Commands::Stats { .. })
    }
    pub const fn is_tags(&self) -> bool {
        matches!(self.command, Commands::Tags { .. })
    }
    pub const fn is_assets(&self) -> bool {
        matches!(self.command, Commands::Assets { .. })
    }
}
