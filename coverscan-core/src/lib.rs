//! CoverScan Core - Album cover recognition library
//!
//! This crate identifies a photographed album cover against a small fixed
//! catalog of reference covers using 64-bit DCT perceptual hashes compared
//! by Hamming distance, then lets callers surface an associated media link.
//!
//! # Features
//!
//! - DCT perceptual hashing (pHash) robust to re-encoding, resizing, and
//!   lighting changes
//! - Read-only JSON feature catalog with load-order-stable iteration
//! - Pure linear-scan matcher with an inclusive distance threshold and a
//!   deterministic first-entry tie-break
//! - Static catalog-to-media URL mapping with non-fatal misses
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use coverscan_core::{
//!     center_crop, find_best_match, phash_image, Catalog, MatchOutcome, DEFAULT_THRESHOLD,
//! };
//!
//! # fn example() -> coverscan_core::Result<()> {
//! let catalog = Catalog::load(Path::new("album_features.json"))?;
//!
//! let photo = image::open("shot.jpg").expect("decodable photo");
//! let query = phash_image(&center_crop(&photo, 0.6))?;
//!
//! match find_best_match(query, &catalog, DEFAULT_THRESHOLD) {
//!     MatchOutcome::Matched { identifier, distance } => {
//!         println!("recognized {identifier} at distance {distance}");
//!     }
//!     MatchOutcome::NoMatch { best_distance } => {
//!         println!("not recognized (nearest: {best_distance:?})");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod media;
pub mod phash;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogEntry};
pub use error::{Result, ScanError};
pub use matcher::{find_best_match, MatchOutcome, DEFAULT_THRESHOLD};
pub use media::MediaLibrary;
pub use phash::{center_crop, phash_bytes, phash_image, Phash64, PHASH_BITS};
