//! Hash command implementation: print an image's perceptual hash.
//!
//! The debugging view used while curating a catalog - the printed value is
//! exactly what `index` would store.

use std::path::PathBuf;

use anyhow::Result;
use coverscan_core::{center_crop, phash_image};

use crate::utils::load_image;

/// Execute the hash command.
pub fn execute(image_path: PathBuf, crop: Option<f64>) -> Result<()> {
    let mut image = load_image(&image_path)?;
    if let Some(factor) = crop {
        image = center_crop(&image, factor);
    }

    let hash = phash_image(&image)?;
    println!("{hash}");
    Ok(())
}
