//! Inkstone - Writing stats, tag indexes, and an asset pipeline for blogs.

use anyhow::{Context, Result};
use clap::Parser;
use inkstone::assets;
use inkstone::cli::{Cli, Commands, ReportArgs};
use inkstone::config::SiteConfig;
use inkstone::content::{post, stats, tags};
use serde::Serialize;
use std::{fs, path::Path};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Stats { report_args } => {
            let posts = post::load_posts(config)?;
            write_report(&stats::aggregate(&posts), report_args)
        }
        Commands::Tags { report_args } => {
            let posts = post::load_posts(config)?;
            let links = post::load_links(config)?;
            write_report(&tags::build_report(&posts, &links, config), report_args)
        }
        Commands::Assets {
            images,
            social,
            scripts,
        } => assets::process_all(
            config,
            images.unwrap_or(true),
            social.unwrap_or(true),
            scripts.unwrap_or(true),
        ),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Serialize a report as JSON and write it to the requested destination.
fn write_report<T: Serialize>(report: &T, args: &ReportArgs) -> Result<()> {
    let json = if args.pretty.unwrap_or(false) {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };

    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write report to `{}`", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
