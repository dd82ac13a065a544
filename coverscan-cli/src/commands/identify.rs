//! Identify command implementation: recognize a photographed cover.
//!
//! Pipeline: load photo → central crop → pHash → linear catalog scan →
//! render the outcome and, on a match, the associated media URL.

use std::path::PathBuf;

use anyhow::{bail, Result};
use colored::Colorize;
use tracing::{debug, info};

use coverscan_core::{
    center_crop, find_best_match, phash_image, Catalog, MatchOutcome, MediaLibrary,
};

/// Execute the identify command.
pub fn execute(
    photo: PathBuf,
    catalog_path: PathBuf,
    media_path: Option<PathBuf>,
    crop: f64,
    threshold: u32,
    quiet: bool,
) -> Result<()> {
    let catalog = Catalog::load(&catalog_path)?;
    let media = media_path.as_deref().map(MediaLibrary::load).transpose()?;

    let image = crate::utils::load_image(&photo)?;
    let cropped = center_crop(&image, crop);
    debug!(
        crop,
        width = cropped.width(),
        height = cropped.height(),
        "Cropped central region"
    );

    let query = phash_image(&cropped)?;
    info!(phash = %query, "Hashed query photo");

    match find_best_match(query, &catalog, threshold) {
        MatchOutcome::Matched {
            identifier,
            distance,
        } => {
            info!(identifier = %identifier, distance, "Cover recognized");
            let url = media.as_ref().and_then(|m| m.url(&identifier));

            if quiet {
                match url {
                    Some(url) => println!("{identifier}\t{distance}\t{url}"),
                    None => println!("{identifier}\t{distance}"),
                }
            } else {
                println!();
                println!("{}", "╔════════════════════════════════════════╗".green());
                println!(
                    "{}",
                    "║              RECOGNIZED                ║".green().bold()
                );
                println!("{}", "╚════════════════════════════════════════╝".green());
                println!();
                println!("   {} {}", "Cover:".dimmed(), identifier.green());
                println!(
                    "   {} {} of {} bits (threshold {})",
                    "Distance:".dimmed(),
                    distance,
                    coverscan_core::PHASH_BITS,
                    threshold
                );
                match url {
                    Some(url) => println!("   {} {}", "Media:".dimmed(), url),
                    None if media.is_some() => {
                        println!("   {} {}", "Media:".dimmed(), "no media available".yellow())
                    }
                    None => {}
                }
            }
            Ok(())
        }
        MatchOutcome::NoMatch { best_distance } => {
            if !quiet {
                println!();
                println!("{}", "╔════════════════════════════════════════╗".red());
                println!(
                    "{}",
                    "║            NOT RECOGNIZED              ║".red().bold()
                );
                println!("{}", "╚════════════════════════════════════════╝".red());
                println!();
                if let Some(distance) = best_distance {
                    println!(
                        "   {} {} of {} bits (threshold {})",
                        "Nearest:".dimmed(),
                        distance,
                        coverscan_core::PHASH_BITS,
                        threshold
                    );
                }
                println!(
                    "   {}",
                    "Try another photo: fill the frame with the cover.".dimmed()
                );
            }
            match best_distance {
                Some(distance) => bail!(
                    "cover not recognized (nearest distance {} > threshold {})",
                    distance,
                    threshold
                ),
                None => bail!("cover not recognized (catalog is empty)"),
            }
        }
    }
}
