//! Site configuration management for `inkstone.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[site]`    | Site metadata (title, author, url)             |
//! | `[content]` | Content sources (posts directory, links file)  |
//! | `[tags]`    | Tag aliases, host overrides, excluded names    |
//! | `[assets]`  | Image cache, social previews, script minify    |
//! | `[extra]`   | User-defined custom fields                     |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Blog"
//! description = "A personal blog"
//! url = "https://example.com"
//!
//! [content]
//! posts = "src/posts"
//! links = "src/data/links.json"
//!
//! [tags.aliases]
//! "web dev" = "#WebDev"
//!
//! [assets.images]
//! widths = [320, 880, 1248]
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```

mod assets;
mod content;
pub mod defaults;
mod error;
mod site;
mod tags;

// Re-export public types used by other modules
pub use assets::{AssetsConfig, ImageFormat, ImagesConfig, ScriptsConfig, SocialConfig};
pub use content::ContentConfig;
pub use site::SiteMeta;
pub use tags::{HostTags, TagsConfig};

// Internal imports used in this module
use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing inkstone.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub site: SiteMeta,

    /// Content source locations
    #[serde(default)]
    pub content: ContentConfig,

    /// Tag index behavior
    #[serde(default)]
    pub tags: TagsConfig,

    /// Asset pipeline settings
    #[serde(default)]
    pub assets: AssetsConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.content.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.content.root = Some(path.to_path_buf())
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        self.set_root(&root);
        self.update_path_with_root(&root);

        Self::update_option(&mut self.assets.minify, cli.minify.as_ref());
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.get_cli();

        // Apply CLI overrides first
        Self::update_option(&mut self.content.posts, cli.posts.as_ref());

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        // Normalize all directory paths
        self.content.posts = Self::normalize_path(&root.join(&self.content.posts));
        self.assets.images.source = Self::normalize_path(&root.join(&self.assets.images.source));
        self.assets.images.output = Self::normalize_path(&root.join(&self.assets.images.output));
        self.assets.social.source = Self::normalize_path(&root.join(&self.assets.social.source));
        self.assets.scripts.source = Self::normalize_path(&root.join(&self.assets.scripts.source));

        // Normalize links path (with tilde expansion)
        if let Some(links) = &self.content.links {
            let expanded = shellexpand::tilde(links.to_str().unwrap()).into_owned();
            let path = PathBuf::from(expanded);
            self.content.links = Some(if path.is_relative() {
                Self::normalize_path(&root.join(path))
            } else {
                Self::normalize_path(&path)
            });
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        let cli = self.get_cli();

        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if let Some(url) = &self.site.url
            && !url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        if self.assets.images.widths.is_empty() {
            bail!(ConfigError::Validation(
                "[assets.images.widths] must have at least one element".into()
            ));
        }

        if self.assets.images.formats.is_empty() {
            bail!(ConfigError::Validation(
                "[assets.images.formats] must have at least one element".into()
            ));
        }

        if !(1.0..=100.0).contains(&self.assets.images.quality) {
            bail!(ConfigError::Validation(
                "[assets.images.quality] must be between 1 and 100".into()
            ));
        }

        if self.assets.images.speed > 10 {
            bail!(ConfigError::Validation(
                "[assets.images.speed] must be between 0 and 10".into()
            ));
        }

        match &cli.command {
            Commands::Stats { .. } | Commands::Tags { .. } => {
                match &self.content.links {
                    Some(path) if !path.exists() => {
                        bail!(ConfigError::Validation("[content.links] not found".into()))
                    }
                    Some(path) if !path.is_file() => {
                        bail!(ConfigError::Validation(
                            "[content.links] is not a file".into()
                        ))
                    }
                    _ => {}
                }
            }
            Commands::Assets { social, .. } => {
                if social.unwrap_or(true) {
                    Self::check_command_installed(
                        "[assets.social.command]",
                        &self.assets.social.command,
                    )?;
                }
            }
        }

        Ok(())
    }

    /// Check if a command is installed and available
    fn check_command_installed(field: &str, command: &[String]) -> Result<()> {
        if command.is_empty() {
            bail!(ConfigError::Validation(format!(
                "{field} must have at least one element"
            )));
        }

        let cmd = &command[0];
        which::which(cmd)
            .with_context(|| format!("`{cmd}` not found. Please install it first."))?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
