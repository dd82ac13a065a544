//! The feature store: precomputed perceptual hashes for the reference covers.
//!
//! The catalog is a small (tens of entries) read-only table mapping a cover
//! image filename to its 64-bit pHash, loaded once at startup from a JSON
//! file of the form:
//!
//! ```json
//! {
//!     "album1.png": { "pHash": "a3c1e5f709b2d486" },
//!     "album2.png": { "pHash": "5d2e91c4b07a3f68" }
//! }
//! ```
//!
//! Entry order is the file's key order and is observable: the matcher's
//! tie-break contract ("first entry wins on equal distance") is defined in
//! terms of it. The catalog is a plain owned value; callers decide how long
//! to keep it around (typically for the whole process, since it never
//! changes underneath them).

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ScanError};
use crate::phash::Phash64;

/// One reference cover: its catalog identifier (the source image filename)
/// and its precomputed perceptual hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub identifier: String,
    pub phash: Phash64,
}

/// The immutable reference table the matcher scans.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    ///
    /// Fails with [`ScanError::Catalog`] when the file is missing or any
    /// entry lacks a valid 16-hex-character `pHash` field.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            ScanError::Catalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_slice(&bytes)?;
        debug!(
            path = %path.display(),
            entries = catalog.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from in-memory JSON, preserving key order.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let root: Value = serde_json::from_slice(bytes)
            .map_err(|e| ScanError::Catalog(format!("catalog is not valid JSON: {}", e)))?;
        let map = root
            .as_object()
            .ok_or_else(|| ScanError::Catalog("catalog root must be a JSON object".into()))?;

        let mut entries = Vec::with_capacity(map.len());
        for (identifier, features) in map {
            let hex = features
                .get("pHash")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ScanError::Catalog(format!(
                        "entry {:?} has no \"pHash\" string field",
                        identifier
                    ))
                })?;
            let phash = Phash64::from_hex(hex).map_err(|e| {
                ScanError::Catalog(format!("entry {:?}: {}", identifier, e))
            })?;
            entries.push(CatalogEntry {
                identifier: identifier.clone(),
                phash,
            });
        }

        Ok(Catalog { entries })
    }

    /// Build a catalog from already-hashed entries, keeping their order.
    ///
    /// Fails with [`ScanError::Catalog`] on duplicate identifiers, which
    /// would make match results ambiguous.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i]
                .iter()
                .any(|e| e.identifier == entry.identifier)
            {
                return Err(ScanError::Catalog(format!(
                    "duplicate catalog identifier {:?}",
                    entry.identifier
                )));
            }
        }
        Ok(Catalog { entries })
    }

    /// Serialize to the catalog JSON format, in entry order.
    pub fn to_json_pretty(&self) -> String {
        let mut map = serde_json::Map::with_capacity(self.entries.len());
        for entry in &self.entries {
            let mut features = serde_json::Map::with_capacity(1);
            features.insert("pHash".into(), Value::String(entry.phash.to_hex()));
            map.insert(entry.identifier.clone(), Value::Object(features));
        }
        serde_json::to_string_pretty(&Value::Object(map))
            .expect("catalog maps serialize infallibly")
    }

    /// Entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Look up an entry by identifier.
    pub fn get(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "album1.png": { "pHash": "a3c1e5f709b2d486" },
        "album2.png": { "pHash": "5d2e91c4b07a3f68", "title": "ignored" },
        "album3.png": { "pHash": "0000000000000000" }
    }"#;

    #[test]
    fn test_parse_preserves_order() {
        let catalog = Catalog::from_json_slice(SAMPLE.as_bytes()).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(ids, ["album1.png", "album2.png", "album3.png"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_parse_reads_hashes() {
        let catalog = Catalog::from_json_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            catalog.get("album1.png").unwrap().phash,
            Phash64::from_hex("a3c1e5f709b2d486").unwrap()
        );
        assert!(catalog.get("album9.png").is_none());
    }

    #[test]
    fn test_unknown_sibling_fields_ignored() {
        let catalog = Catalog::from_json_slice(SAMPLE.as_bytes()).unwrap();
        assert!(catalog.get("album2.png").is_some());
    }

    #[test]
    fn test_rejects_non_object_root() {
        let err = Catalog::from_json_slice(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ScanError::Catalog(_)));
    }

    #[test]
    fn test_rejects_missing_phash_field() {
        let err =
            Catalog::from_json_slice(br#"{"album1.png": {"title": "x"}}"#).unwrap_err();
        assert!(err.to_string().contains("pHash"));
    }

    #[test]
    fn test_rejects_malformed_hash() {
        let err =
            Catalog::from_json_slice(br#"{"album1.png": {"pHash": "xyz"}}"#).unwrap_err();
        assert!(matches!(err, ScanError::Catalog(_)));
        assert!(err.to_string().contains("album1.png"));
    }

    #[test]
    fn test_rejects_corrupt_json() {
        let err = Catalog::from_json_slice(b"{ not json").unwrap_err();
        assert!(matches!(err, ScanError::Catalog(_)));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::from_json_slice(b"{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/album_features.json")).unwrap_err();
        assert!(matches!(err, ScanError::Catalog(_)));
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let entry = CatalogEntry {
            identifier: "a.png".into(),
            phash: Phash64::ZERO,
        };
        let err = Catalog::from_entries(vec![entry.clone(), entry]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_json_round_trip_keeps_order_and_format() {
        let catalog = Catalog::from_json_slice(SAMPLE.as_bytes()).unwrap();
        let json = catalog.to_json_pretty();
        let reparsed = Catalog::from_json_slice(json.as_bytes()).unwrap();
        let ids: Vec<&str> = reparsed.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(ids, ["album1.png", "album2.png", "album3.png"]);
        assert!(json.contains("\"pHash\": \"a3c1e5f709b2d486\""));
    }
}
