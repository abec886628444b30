//! Asset pipeline: responsive images, social previews, and scripts.
//!
//! | Module | Covers |
//! |---------|--------------------------------------------------|
//! | images | Width variants, format encoding, picture markup |
//! | svg | SVG minification, social-preview rasterization |
//! | scripts | In-place JS component minification |
//!
//! Image work runs in parallel with the svg and script passes, which
//! share the external-tool and filesystem side of the pipeline.

pub mod images;
pub mod scripts;
pub mod svg;

use anyhow::Result;

use crate::{config::SiteConfig, logger::ProgressBars};

/// Run the asset transforms selected by the caller.
pub fn process_all(config: &SiteConfig, images: bool, social: bool, scripts: bool) -> Result<()> {
    let sources = if images {
        images::collect_sources(&config.assets.images.source)
    } else {
        Vec::new()
    };

    let bars = ProgressBars::new_filtered(&[("assets", sources.len())]);

    let (images_result, other_result) = rayon::join(
        || {
            if images {
                images::process_images(&sources, config, bars.as_ref())
            } else {
                Ok(())
            }
        },
        || {
            if social {
                svg::rasterize_social_images(config)?;
            }
            if scripts {
                scripts::minify_scripts(config)?;
            }
            Ok(())
        },
    );

    if let Some(bars) = &bars {
        bars.finish();
    }

    images_result?;
    other_result
}

// ============================================================================
// Tests
// ============================================================================
