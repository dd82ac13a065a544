//! Perceptual hashing for album cover images.
//!
//! # Algorithm
//!
//! Classic DCT pHash: the image is downscaled to a 32×32 grayscale grid,
//! transformed with a 2-D DCT-II, and the 8×8 low-frequency block is
//! binarized against its median to produce a 64-bit fingerprint. The hash is
//! deterministic for a given pixel input and robust to re-encoding,
//! resizing, and lighting changes, which is why it is used instead of exact
//! pixel comparison.
//!
//! The hex encoding (16 lowercase characters, most-significant bit first)
//! matches the precomputed catalog format, so hashes computed here compare
//! directly against stored catalog entries.
//!
//! # Usage
//!
//! ```no_run
//! use coverscan_core::phash::{phash_bytes, Phash64};
//!
//! let photo = std::fs::read("cover.jpg").unwrap();
//! let hash = phash_bytes(&photo).unwrap();
//! let reference = Phash64::from_hex("a3c1e5f709b2d486").unwrap();
//! let distance = hash.distance(reference);
//! ```

use std::f64::consts::PI;
use std::fmt;

use image::{imageops::FilterType, DynamicImage};

use crate::error::{Result, ScanError};

/// Downscale target fed to the DCT (hash grid × high-frequency factor 4).
const INPUT_SIZE: usize = 32;

/// Side of the retained low-frequency block; 8×8 = 64 bits.
const GRID_SIZE: usize = 8;

/// Hash width in bits.
pub const PHASH_BITS: u32 = (GRID_SIZE * GRID_SIZE) as u32;

/// A 64-bit perceptual hash, packed row-major, most-significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Phash64(u64);

impl Phash64 {
    /// The all-zero hash.
    pub const ZERO: Phash64 = Phash64(0);

    /// Wrap a raw 64-bit hash value.
    pub fn from_bits(bits: u64) -> Self {
        Phash64(bits)
    }

    /// The raw 64-bit hash value.
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Hamming distance to another hash: the number of differing bit
    /// positions. Symmetric, and always in `0..=64`.
    pub fn distance(self, other: Phash64) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Render as 16 lowercase hex characters, most-significant bit first.
    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }

    /// Parse a 16-character hex string (case-insensitive).
    ///
    /// Fails with [`ScanError::Catalog`] when the string is not exactly 16
    /// hex digits, since malformed hashes only ever come from a feature
    /// table.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != 16 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ScanError::Catalog(format!(
                "pHash must be exactly 16 hex characters, got {:?}",
                hex
            )));
        }
        let bits = u64::from_str_radix(hex, 16)
            .map_err(|e| ScanError::Catalog(format!("unparseable pHash {:?}: {}", hex, e)))?;
        Ok(Phash64(bits))
    }
}

impl fmt::Display for Phash64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Compute the perceptual hash of a decoded image.
///
/// Fails with [`ScanError::InvalidImage`] when the image has zero area.
pub fn phash_image(image: &DynamicImage) -> Result<Phash64> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ScanError::InvalidImage(
            "image has zero area, nothing to hash".into(),
        ));
    }

    let gray = image
        .resize_exact(INPUT_SIZE as u32, INPUT_SIZE as u32, FilterType::Lanczos3)
        .to_luma8();

    let mut pixels = [[0.0f64; INPUT_SIZE]; INPUT_SIZE];
    for (x, y, pixel) in gray.enumerate_pixels() {
        pixels[y as usize][x as usize] = f64::from(pixel[0]);
    }

    let spectrum = dct_2d(&pixels);

    // Low-frequency block, DC coefficient included; the median binarization
    // keeps the hash invariant under uniform brightness scaling.
    let mut low = [0.0f64; GRID_SIZE * GRID_SIZE];
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            low[row * GRID_SIZE + col] = spectrum[row][col];
        }
    }

    let med = median(&low);
    let mut bits = 0u64;
    for (i, &coeff) in low.iter().enumerate() {
        if coeff > med {
            bits |= 1 << (63 - i);
        }
    }

    Ok(Phash64(bits))
}

/// Decode raw image bytes (JPEG, PNG, GIF, WebP) and compute their hash.
///
/// Fails with [`ScanError::InvalidImage`] when the bytes are not a decodable
/// image.
pub fn phash_bytes(data: &[u8]) -> Result<Phash64> {
    let image = image::load_from_memory(data)
        .map_err(|e| ScanError::InvalidImage(format!("failed to decode image: {}", e)))?;
    phash_image(&image)
}

/// Crop the central square region of a camera frame.
///
/// `factor` scales the square's side relative to the shorter image dimension
/// and is clamped to `(0, 1]`. Camera photos of a cover include background
/// around the sleeve; hashing only the central region is what makes the
/// catalog comparison meaningful. Zero-area images are returned unchanged
/// and rejected later by [`phash_image`].
pub fn center_crop(image: &DynamicImage, factor: f64) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return image.clone();
    }

    let factor = factor.clamp(0.0, 1.0);
    let side = ((f64::from(width.min(height)) * factor) as u32).max(1);
    let left = (width - side) / 2;
    let top = (height - side) / 2;
    image.crop_imm(left, top, side, side)
}

/// Unnormalized 1-D DCT-II. A uniform scale factor is irrelevant here
/// because binarization compares coefficients against their own median.
fn dct_1d(input: &[f64; INPUT_SIZE]) -> [f64; INPUT_SIZE] {
    let n = INPUT_SIZE as f64;
    let mut output = [0.0f64; INPUT_SIZE];
    for (k, out) in output.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (i, &x) in input.iter().enumerate() {
            sum += x * (PI / n * (i as f64 + 0.5) * k as f64).cos();
        }
        *out = sum;
    }
    output
}

/// Separable 2-D DCT-II: transform rows, then columns.
fn dct_2d(pixels: &[[f64; INPUT_SIZE]; INPUT_SIZE]) -> [[f64; INPUT_SIZE]; INPUT_SIZE] {
    let mut rows = [[0.0f64; INPUT_SIZE]; INPUT_SIZE];
    for (y, row) in pixels.iter().enumerate() {
        rows[y] = dct_1d(row);
    }

    let mut out = [[0.0f64; INPUT_SIZE]; INPUT_SIZE];
    let mut column = [0.0f64; INPUT_SIZE];
    for x in 0..INPUT_SIZE {
        for y in 0..INPUT_SIZE {
            column[y] = rows[y][x];
        }
        let transformed = dct_1d(&column);
        for y in 0..INPUT_SIZE {
            out[y][x] = transformed[y];
        }
    }
    out
}

/// Median of the low-frequency block; for the even-length block this is the
/// mean of the two middle values, matching the catalog generator.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("DCT coefficients are finite"));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
