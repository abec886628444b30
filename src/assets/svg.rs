//! SVG minification and social-preview rasterization.
//!
//! Social share images are authored as SVG and converted to JPEG by an
//! external rasterizer (ImageMagick by default), fed over stdin. The
//! SVG is re-serialized through usvg first to drop editor noise.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    config::{SiteConfig, SocialConfig},
    exec_with_stdin, log,
};

/// Re-serialize SVG data with no indentation.
pub fn minify_svg(data: &[u8]) -> Result<Vec<u8>> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &opt).context("Failed to parse SVG")?;

    let write_opt = usvg::WriteOptions {
        indent: usvg::Indent::None,
        ..Default::default()
    };
    Ok(tree.to_string(&write_opt).into_bytes())
}

/// Convert each `.svg` in the social-preview directory to `{stem}.jpeg`
/// through the configured rasterizer command.
///
/// A missing or empty directory is a notice, not an error.
pub fn rasterize_social_images(config: &SiteConfig) -> Result<()> {
    let social = &config.assets.social;

    let Ok(entries) = fs::read_dir(&social.source) else {
        log!("assets"; "No social images found");
        return Ok(());
    };

    let svgs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
        })
        .collect();

    if svgs.is_empty() {
        log!("assets"; "No social images found");
        return Ok(());
    }

    svgs.par_iter()
        .try_for_each(|svg_path| rasterize_svg(svg_path, social))
}

fn rasterize_svg(svg_path: &Path, social: &SocialConfig) -> Result<()> {
    let data = fs::read(svg_path)
        .with_context(|| format!("Failed to read `{}`", svg_path.display()))?;
    let optimized = minify_svg(&data)
        .with_context(|| format!("Failed to optimize `{}`", svg_path.display()))?;

    let output = svg_path.with_extension("jpeg");
    if let Some(name) = output.file_name() {
        log!("assets"; "{}", name.to_string_lossy());
    }

    let mut proc = exec_with_stdin!(
        &social.command;
        "-background", social.background.as_str(),
        "-density", social.density.as_str(),
        "-", &output
    )?;
    if let Some(stdin) = proc.stdin() {
        stdin.write_all(&optimized)?;
    }
    proc.wait()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
  <rect x="0" y="0" width="100" height="50" fill="#336699"/>
</svg>"##;

    #[test]
    fn test_minify_svg_drops_indentation() {
        let minified = minify_svg(SAMPLE_SVG.as_bytes()).unwrap();
        let text = String::from_utf8(minified).unwrap();
        assert!(!text.contains("\n  "));
        assert!(text.contains("<svg"));
    }

    #[test]
    fn test_minify_svg_rejects_garbage() {
        assert!(minify_svg(b"not an svg at all").is_err());
    }

    #[test]
    fn test_rasterize_missing_dir_is_soft() {
        let tmp = TempDir::new().unwrap();
        let mut config = SiteConfig::from_str("").unwrap();
        config.assets.social.source = tmp.path().join("does-not-exist");

        assert!(rasterize_social_images(&config).is_ok());
    }

    #[test]
    fn test_rasterize_empty_dir_is_soft() {
        let tmp = TempDir::new().unwrap();
        let mut config = SiteConfig::from_str("").unwrap();
        config.assets.social.source = tmp.path().to_path_buf();
        fs::write(tmp.path().join("readme.txt"), "no svgs here").unwrap();

        assert!(rasterize_social_images(&config).is_ok());
    }
}
