//! Index command implementation: build the feature catalog.
//!
//! Hashes every supported image in a directory and writes the catalog JSON
//! the `identify` command matches against. Entries are sorted by filename so
//! rebuilding from the same directory always produces the same file (and the
//! same tie-break order).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::{info, warn};

use coverscan_core::{phash_image, Catalog, CatalogEntry};

use crate::utils::{is_supported_image, load_image};

/// Execute the index command.
pub fn execute(dir: PathBuf, output: PathBuf, quiet: bool) -> Result<()> {
    let mut image_paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();
    image_paths.sort();

    if image_paths.is_empty() {
        bail!("no supported images found in {}", dir.display());
    }

    let mut entries = Vec::with_capacity(image_paths.len());
    let mut skipped = 0usize;
    for path in &image_paths {
        let image = match load_image(path) {
            Ok(image) => image,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable image");
                if !quiet {
                    eprintln!("{}", format!("Skipping {}: {e:#}", path.display()).yellow());
                }
                skipped += 1;
                continue;
            }
        };

        let phash = phash_image(&image)
            .with_context(|| format!("Failed to hash image: {}", path.display()))?;
        let identifier = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .with_context(|| format!("non-UTF-8 filename: {}", path.display()))?;

        info!(identifier = %identifier, phash = %phash, "Hashed reference cover");
        entries.push(CatalogEntry { identifier, phash });
    }

    if entries.is_empty() {
        bail!("none of the images in {} could be decoded", dir.display());
    }

    let catalog = Catalog::from_entries(entries)?;
    std::fs::write(&output, catalog.to_json_pretty())
        .with_context(|| format!("Failed to write catalog: {}", output.display()))?;

    info!(path = %output.display(), entries = catalog.len(), "Catalog written");

    if !quiet {
        println!();
        println!("{}", "Catalog built!".green().bold());
        println!();
        println!("   {} {}", "Catalog saved:".dimmed(), output.display());
        println!("   {} {}", "Covers indexed:".dimmed(), catalog.len());
        if skipped > 0 {
            println!("   {} {}", "Skipped:".dimmed(), skipped);
        }
    }

    Ok(())
}
