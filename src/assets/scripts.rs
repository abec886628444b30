//! In-place minification of standalone script components.

use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path, path::PathBuf};

use crate::{config::SiteConfig, log};

/// Minify every `.js` file in the components directory in place.
///
/// A missing or empty directory is a notice, not an error.
pub fn minify_scripts(config: &SiteConfig) -> Result<()> {
    let scripts = &config.assets.scripts;

    let Ok(entries) = fs::read_dir(&scripts.source) else {
        log!("assets"; "No script components found");
        return Ok(());
    };

    let files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("js"))
        })
        .collect();

    if files.is_empty() {
        log!("assets"; "No script components found");
        return Ok(());
    }

    for path in &files {
        minify_script(path)?;
        if let Some(name) = path.file_name() {
            log!("assets"; "{}", name.to_string_lossy());
        }
    }
    Ok(())
}

fn minify_script(path: &Path) -> Result<()> {
    let source =
        fs::read(path).with_context(|| format!("Failed to read `{}`", path.display()))?;

    let session = minify_js::Session::new();
    let mut minified = Vec::with_capacity(source.len());
    minify_js::minify(
        &session,
        minify_js::TopLevelMode::Global,
        &source,
        &mut minified,
    )
    .map_err(|err| anyhow!("Failed to minify `{}`: {err:?}", path.display()))?;

    fs::write(path, minified).with_context(|| format!("Failed to write `{}`", path.display()))
}

// ============================================================================
// Tests
// ============================================================================
