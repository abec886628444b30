//! Responsive image variants and `<picture>` markup.
//!
//! Every raster image in the configured source directory is resized to
//! the configured widths and encoded in the configured formats, named
//! `{stem}-{width}w.{format}` in the cache directory. Outputs newer
//! than their source are left alone.

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader, imageops::FilterType};
use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, Event},
};
use rayon::prelude::*;
use std::{
    borrow::Cow,
    fs,
    io::{BufWriter, Cursor},
    path::{Path, PathBuf},
    time::SystemTime,
};
use walkdir::WalkDir;

use crate::{
    config::{ImageFormat, ImagesConfig, SiteConfig},
    log,
    logger::ProgressBars,
};

/// Source extensions with decoders compiled in
const RASTER_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// One generated width variant of a source image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageVariant {
    pub url: String,
    pub path: PathBuf,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

// ============================================================================
// Variant Generation
// ============================================================================

/// Collect raster images under the source directory.
pub fn collect_sources(source_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(source_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| RASTER_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        })
        .collect()
}

/// Generate variants for every source image, in parallel.
pub fn process_images(
    sources: &[PathBuf],
    config: &SiteConfig,
    bars: Option<&ProgressBars>,
) -> Result<()> {
    if sources.is_empty() {
        log!("assets"; "No images found in `{}`", config.assets.images.source.display());
        return Ok(());
    }

    fs::create_dir_all(&config.assets.images.output).with_context(|| {
        format!(
            "Failed to create `{}`",
            config.assets.images.output.display()
        )
    })?;

    sources.par_iter().try_for_each(|source| {
        generate_variants(source, config)
            .with_context(|| format!("Failed to process `{}`", source.display()))?;
        if let Some(bars) = bars {
            bars.inc_by_name("assets");
        }
        Ok(())
    })
}

/// Generate all width/format variants for one source image.
///
/// Returns variant metadata whether or not files had to be rewritten,
/// so callers can render markup from a warm cache.
pub fn generate_variants(source: &Path, config: &SiteConfig) -> Result<Vec<ImageVariant>> {
    let images = &config.assets.images;
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Invalid image filename `{}`", source.display()))?;

    let (source_width, source_height) = image::image_dimensions(source)
        .with_context(|| format!("Failed to read dimensions of `{}`", source.display()))?;
    let source_mtime = source.metadata().and_then(|m| m.modified()).ok();

    let widths = variant_widths(images, source_width);

    let all_fresh = widths.iter().all(|&width| {
        images
            .formats
            .iter()
            .all(|&format| is_fresh(&variant_path(images, stem, width, format), source_mtime))
    });

    let mut variants = Vec::with_capacity(widths.len() * images.formats.len());

    if all_fresh {
        for &width in &widths {
            let height = scaled_height(source_width, source_height, width);
            for &format in &images.formats {
                variants.push(variant_meta(images, stem, width, height, format));
            }
        }
        return Ok(variants);
    }

    let img = ImageReader::open(source)?
        .decode()
        .with_context(|| format!("Failed to decode `{}`", source.display()))?;

    for &width in &widths {
        let resized = img.resize(width, u32::MAX, FilterType::Lanczos3);
        for &format in &images.formats {
            let variant = variant_meta(images, stem, width, resized.height(), format);
            if !is_fresh(&variant.path, source_mtime) {
                log!("assets"; "{stem}-{width}w.{}", format.extension());
                encode(&resized, &variant.path, format, images)?;
            }
            variants.push(variant);
        }
    }

    Ok(variants)
}

/// Configured widths that fit both the width cap and the source image.
/// When none fit, the source width is the only variant.
fn variant_widths(images: &ImagesConfig, source_width: u32) -> Vec<u32> {
    let widths: Vec<u32> = images
        .widths
        .iter()
        .copied()
        .filter(|&w| w <= images.max_width && w <= source_width)
        .collect();
    if widths.is_empty() {
        vec![source_width]
    } else {
        widths
    }
}

fn variant_path(images: &ImagesConfig, stem: &str, width: u32, format: ImageFormat) -> PathBuf {
    images
        .output
        .join(format!("{stem}-{width}w.{}", format.extension()))
}

fn variant_meta(
    images: &ImagesConfig,
    stem: &str,
    width: u32,
    height: u32,
    format: ImageFormat,
) -> ImageVariant {
    let filename = format!("{stem}-{width}w.{}", format.extension());
    ImageVariant {
        url: format!("{}{filename}", images.url_path),
        path: images.output.join(filename),
        format,
        width,
        height,
    }
}

/// Proportional height for a target width, matching the resize math.
fn scaled_height(source_width: u32, source_height: u32, width: u32) -> u32 {
    let height = f64::from(source_height) * f64::from(width) / f64::from(source_width);
    height.round().max(1.0) as u32
}

fn is_fresh(output: &Path, source_mtime: Option<SystemTime>) -> bool {
    if let Some(source_time) = source_mtime
        && let Ok(output_time) = output.metadata().and_then(|m| m.modified())
        && output_time >= source_time
    {
        return true;
    }
    false
}

// ============================================================================
// Encoders
// ============================================================================

fn encode(
    img: &DynamicImage,
    output: &Path,
    format: ImageFormat,
    images: &ImagesConfig,
) -> Result<()> {
    match format {
        ImageFormat::Avif => encode_avif(img, output, images),
        ImageFormat::Webp => encode_webp(img, output),
        ImageFormat::Jpeg => encode_jpeg(img, output, images),
    }
}

/// Encode AVIF through ravif.
fn encode_avif(img: &DynamicImage, output: &Path, images: &ImagesConfig) -> Result<()> {
    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);

    let pixmap: Vec<_> = rgba
        .as_raw()
        .chunks_exact(4)
        .map(|c| ravif::RGBA8::new(c[0], c[1], c[2], c[3]))
        .collect();

    let encoded = ravif::Encoder::new()
        .with_quality(images.quality)
        .with_speed(images.speed)
        .encode_rgba(ravif::Img::new(&pixmap, width, height))?;

    fs::write(output, encoded.avif_file)?;
    Ok(())
}

fn encode_webp(img: &DynamicImage, output: &Path) -> Result<()> {
    let file = fs::File::create(output)?;
    let encoder = image::codecs::webp::WebPEncoder::new_lossless(BufWriter::new(file));
    img.to_rgba8().write_with_encoder(encoder)?;
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Quality is validated to 1..=100
fn encode_jpeg(img: &DynamicImage, output: &Path, images: &ImagesConfig) -> Result<()> {
    let file = fs::File::create(output)?;
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(BufWriter::new(file), images.quality as u8);
    img.to_rgb8().write_with_encoder(encoder)?;
    Ok(())
}

// ============================================================================
// Picture Markup
// ============================================================================

/// Render a `<picture>` element for a variant set.
///
/// One `<source>` per configured format carries the joined srcset; the
/// `<img>` fallback uses the largest jpeg variant. Minified when asset
/// minification is enabled.
pub fn picture_markup(
    variants: &[ImageVariant],
    alt: &str,
    class: Option<&str>,
    loading: &str,
    config: &SiteConfig,
) -> Result<String> {
    let sizes = &config.assets.images.sizes;

    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(512)));
    writer.write_event(Event::Start(BytesStart::new("picture")))?;

    for &format in &config.assets.images.formats {
        let srcset = variants
            .iter()
            .filter(|v| v.format == format)
            .map(|v| format!("{} {}w", v.url, v.width))
            .collect::<Vec<_>>()
            .join(", ");
        if srcset.is_empty() {
            continue;
        }

        let mut source = BytesStart::new("source");
        source.push_attribute(("type", format.mime_type()));
        source.push_attribute(("srcset", srcset.as_str()));
        source.push_attribute(("sizes", sizes.as_str()));
        writer.write_event(Event::Empty(source))?;
    }

    let fallback = variants
        .iter()
        .filter(|v| v.format == ImageFormat::Jpeg)
        .next_back()
        .context("No jpeg variant to use as the img fallback")?;

    let mut img = BytesStart::new("img");
    img.push_attribute(("src", fallback.url.as_str()));
    img.push_attribute(("width", fallback.width.to_string().as_str()));
    img.push_attribute(("height", fallback.height.to_string().as_str()));
    img.push_attribute(("alt", alt));
    if let Some(class) = class {
        img.push_attribute(("class", class));
    }
    img.push_attribute(("loading", loading));
    img.push_attribute(("decoding", "async"));
    writer.write_event(Event::Empty(img))?;

    writer.write_event(Event::End(BytesEnd::new("picture")))?;

    let html = writer.into_inner().into_inner();
    let html = minify_markup(&html, config);
    String::from_utf8(html.into_owned()).context("Picture markup is not valid UTF-8")
}

/// Minify markup when enabled, pass through otherwise.
fn minify_markup<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if !config.assets.minify {
        return Cow::Borrowed(html);
    }
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    Cow::Owned(minify_html::minify(html, &cfg))
}

// ============================================================================
// Tests
// ============================================================================
