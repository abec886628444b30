//! `[assets]` section configuration.
//!
//! Contains asset pipeline settings: responsive image cache, social preview
//! rasterization, and client script minification.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// Output format for cached image variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// AV1 still image, smallest output.
    Avif,
    /// Lossless WebP re-encode.
    Webp,
    /// Baseline JPEG, used as the fallback `src`.
    Jpeg,
}

impl ImageFormat {
    /// File extension without the leading dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Avif => "avif",
            Self::Webp => "webp",
            Self::Jpeg => "jpeg",
        }
    }

    /// MIME type for `<source type="...">` attributes.
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Avif => "image/avif",
            Self::Webp => "image/webp",
            Self::Jpeg => "image/jpeg",
        }
    }
}

// ============================================================================
// Main AssetsConfig
// ============================================================================

/// `[assets]` section in inkstone.toml - asset pipeline configuration.
///
/// # Example
/// ```toml
/// [assets]
/// minify = true
///
/// [assets.images]
/// source = "src/assets/img"
/// widths = [320, 880, 1248]
///
/// [assets.social]
/// command = ["magick"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Minify generated picture markup (removes whitespace).
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Responsive image cache settings.
    #[serde(default)]
    pub images: ImagesConfig,

    /// Social preview rasterization settings.
    #[serde(default)]
    pub social: SocialConfig,

    /// Client script minification settings.
    #[serde(default)]
    pub scripts: ScriptsConfig,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[assets.images]` section - responsive variant generation.
///
/// Every source image is resized to each width in `widths` (capped at
/// `max_width` and the source's own width) and re-encoded in each format
/// in `formats`. The JPEG variants back the `<img>` fallback.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    /// Directory scanned recursively for source images.
    #[serde(default = "defaults::assets::images::source")]
    #[educe(Default = defaults::assets::images::source())]
    pub source: PathBuf,

    /// Directory the resized variants are written to.
    #[serde(default = "defaults::assets::images::output")]
    #[educe(Default = defaults::assets::images::output())]
    pub output: PathBuf,

    /// URL prefix the variants are served under.
    #[serde(default = "defaults::assets::images::url_path")]
    #[educe(Default = defaults::assets::images::url_path())]
    pub url_path: String,

    /// Candidate widths in pixels, ascending.
    #[serde(default = "defaults::assets::images::widths")]
    #[educe(Default = defaults::assets::images::widths())]
    pub widths: Vec<u32>,

    /// Upper bound applied to `widths`.
    #[serde(default = "defaults::assets::images::max_width")]
    #[educe(Default = defaults::assets::images::max_width())]
    pub max_width: u32,

    /// Output formats, in `<source>` order.
    #[serde(default = "defaults::assets::images::formats")]
    #[educe(Default = defaults::assets::images::formats())]
    pub formats: Vec<ImageFormat>,

    /// Encoder quality, 1-100.
    #[serde(default = "defaults::assets::images::quality")]
    #[educe(Default = defaults::assets::images::quality())]
    pub quality: f32,

    /// AVIF encoder speed, 0 (slowest) to 10 (fastest).
    #[serde(default = "defaults::assets::images::speed")]
    #[educe(Default = defaults::assets::images::speed())]
    pub speed: u8,

    /// Value emitted in `sizes` attributes.
    #[serde(default = "defaults::assets::images::sizes")]
    #[educe(Default = defaults::assets::images::sizes())]
    pub sizes: String,
}

/// `[assets.social]` section - SVG social preview rasterization.
///
/// Each `.svg` in `source` is rendered to a sibling `.jpeg` by piping the
/// optimized SVG through the configured external command.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SocialConfig {
    /// Directory containing the social preview SVGs.
    #[serde(default = "defaults::assets::social::source")]
    #[educe(Default = defaults::assets::social::source())]
    pub source: PathBuf,

    /// Rasterizer command and arguments.
    #[serde(default = "defaults::assets::social::command")]
    #[educe(Default = defaults::assets::social::command())]
    pub command: Vec<String>,

    /// Canvas background passed to the rasterizer.
    #[serde(default = "defaults::assets::social::background")]
    #[educe(Default = defaults::assets::social::background())]
    pub background: String,

    /// Render density (DPI) passed to the rasterizer.
    #[serde(default = "defaults::assets::social::density")]
    #[educe(Default = defaults::assets::social::density())]
    pub density: String,
}

/// `[assets.scripts]` section - client script minification.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ScriptsConfig {
    /// Directory containing the `.js` files minified in place.
    #[serde(default = "defaults::assets::scripts::source")]
    #[educe(Default = defaults::assets::scripts::source())]
    pub source: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::ImageFormat;
    use std::path::PathBuf;

    #[test]
    fn test_assets_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert!(config.assets.minify);
        assert_eq!(config.assets.images.source, PathBuf::from("src/assets/img"));
        assert_eq!(
            config.assets.images.output,
            PathBuf::from("_site/assets/img/cache")
        );
        assert_eq!(config.assets.images.url_path, "/assets/img/cache/");
        assert_eq!(
            config.assets.images.widths,
            vec![200, 320, 570, 880, 1024, 1248]
        );
        assert_eq!(config.assets.images.max_width, 1248);
        assert_eq!(
            config.assets.images.formats,
            vec![ImageFormat::Avif, ImageFormat::Webp, ImageFormat::Jpeg]
        );
        assert_eq!(config.assets.images.quality, 90.);
        assert_eq!(config.assets.images.speed, 4);
        assert_eq!(config.assets.images.sizes, "90vw");
    }

    #[test]
    fn test_social_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(
            config.assets.social.source,
            PathBuf::from("_site/assets/img/social-preview")
        );
        assert_eq!(config.assets.social.command, vec!["magick"]);
        assert_eq!(config.assets.social.background, "none");
        assert_eq!(config.assets.social.density, "300");
        assert_eq!(
            config.assets.scripts.source,
            PathBuf::from("_site/assets/scripts/components")
        );
    }

    #[test]
    fn test_assets_config_custom() {
        let config = r#"
            [assets]
            minify = false

            [assets.images]
            source = "static/img"
            widths = [400, 800]
            max_width = 800
            formats = ["webp", "jpeg"]
            quality = 75.0
            speed = 8

            [assets.scripts]
            source = "static/js"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(!config.assets.minify);
        assert_eq!(config.assets.images.source, PathBuf::from("static/img"));
        assert_eq!(config.assets.images.widths, vec![400, 800]);
        assert_eq!(
            config.assets.images.formats,
            vec![ImageFormat::Webp, ImageFormat::Jpeg]
        );
        assert_eq!(config.assets.images.quality, 75.);
        assert_eq!(config.assets.images.speed, 8);
        assert_eq!(config.assets.scripts.source, PathBuf::from("static/js"));
    }

    #[test]
    fn test_image_format_lowercase_names() {
        let config = r#"
            [assets.images]
            formats = ["AVIF"]
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        // Format names are lowercase in config
        assert!(result.is_err());
    }

    #[test]
    fn test_image_format_extension() {
        assert_eq!(ImageFormat::Avif.extension(), "avif");
        assert_eq!(ImageFormat::Webp.extension(), "webp");
        assert_eq!(ImageFormat::Jpeg.extension(), "jpeg");
    }

    #[test]
    fn test_image_format_mime_type() {
        assert_eq!(ImageFormat::Avif.mime_type(), "image/avif");
        assert_eq!(ImageFormat::Webp.mime_type(), "image/webp");
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_social_command_with_args() {
        let config = r##"
            [assets.social]
            command = ["magick", "-colorspace", "sRGB"]
            background = "#ffffff"
            density = "150"
        "##;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(
            config.assets.social.command,
            vec!["magick", "-colorspace", "sRGB"]
        );
        assert_eq!(config.assets.social.background, "#ffffff");
        assert_eq!(config.assets.social.density, "150");
    }

    #[test]
    fn test_assets_unknown_field_rejection() {
        let config = r#"
            [assets.images]
            lossless = true
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
    }
}
