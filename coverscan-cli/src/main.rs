//! CoverScan CLI - album cover recognition tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_codes;
mod utils;

use exit_codes::ExitCode;

/// Default central-crop factor for camera photos: the cover usually fills
/// about the middle 60% of the frame.
const DEFAULT_CROP: f64 = 0.6;

#[derive(Parser)]
#[command(name = "coverscan")]
#[command(author, version, about = "Album cover recognition via perceptual hashing", long_about = None)]
#[command(after_help = "Exit codes:\n  0   success\n  65  cover not recognized\n  66  unreadable input file\n  74  cannot write output")]
struct Cli {
    /// Suppress decorative output (machine-readable results only)
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify a photographed cover against the catalog
    Identify {
        /// Path to the photo to identify
        #[arg(value_name = "PHOTO")]
        photo: PathBuf,

        /// Path to the feature catalog JSON
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Path to the catalog-to-media URL map JSON
        #[arg(short, long, value_name = "FILE")]
        media: Option<PathBuf>,

        /// Central square crop factor applied before hashing (0-1)
        #[arg(long, default_value_t = DEFAULT_CROP)]
        crop: f64,

        /// Maximum Hamming distance (of 64 bits) still counted as a match
        #[arg(short, long, default_value_t = coverscan_core::DEFAULT_THRESHOLD)]
        threshold: u32,
    },

    /// Build the feature catalog from a directory of reference covers
    Index {
        /// Directory containing the reference cover images
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Where to write the catalog JSON
        #[arg(short, long, value_name = "FILE", default_value = "album_features.json")]
        output: PathBuf,
    },

    /// Print the perceptual hash of an image
    Hash {
        /// Path to the image
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Optional central square crop factor applied before hashing (0-1)
        #[arg(long)]
        crop: Option<f64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let quiet = cli.quiet;

    let result = match cli.command {
        Commands::Identify {
            photo,
            catalog,
            media,
            crop,
            threshold,
        } => commands::identify::execute(photo, catalog, media, crop, threshold, quiet),
        Commands::Index { dir, output } => commands::index::execute(dir, output, quiet),
        Commands::Hash { image, crop } => commands::hash::execute(image, crop),
    };

    if let Err(err) = result {
        let exit = ExitCode::from_anyhow(&err);
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(exit.code);
    }
}
