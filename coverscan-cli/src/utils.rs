//! Common utility functions shared across CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use tracing::debug;

/// File extensions the catalog indexer and identify command accept.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Whether the path looks like a supported reference image.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Read and decode an image file.
///
/// The error contexts ("Failed to read" / "Failed to decode") drive the
/// exit-code classification in `exit_codes`.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read image file");

    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("Failed to decode image: {}", path.display()))?;
    debug!(
        width = image.width(),
        height = image.height(),
        "Decoded image"
    );
    Ok(image)
}
