//! Catalog-to-media mapping: which video to surface for a recognized cover.
//!
//! A static JSON object mapping catalog filenames to playable URLs:
//!
//! ```json
//! {
//!     "album1.png": "https://youtu.be/i8adbqn6ZAo",
//!     "album2.png": "https://youtu.be/vmULD6h-K9Q"
//! }
//! ```
//!
//! Consulted only after a successful match. A matched cover with no mapping
//! is a normal "no media available" condition, never an error.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ScanError};

/// The static filename → URL table.
#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
    urls: HashMap<String, String>,
}

impl MediaLibrary {
    /// Load the mapping from a JSON file of string-to-string pairs.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            ScanError::Catalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        let urls: HashMap<String, String> = serde_json::from_slice(&bytes).map_err(|e| {
            ScanError::Catalog(format!(
                "media map {} must be a JSON object of URLs: {}",
                path.display(),
                e
            ))
        })?;
        debug!(path = %path.display(), entries = urls.len(), "Loaded media map");
        Ok(MediaLibrary { urls })
    }

    /// The playable URL for a catalog identifier, if one is registered.
    pub fn url(&self, identifier: &str) -> Option<&str> {
        self.urls.get(identifier).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lookup_and_missing_entry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"album1.png": "https://youtu.be/i8adbqn6ZAo"}}"#
        )
        .unwrap();

        let media = MediaLibrary::load(file.path()).unwrap();
        assert_eq!(media.url("album1.png"), Some("https://youtu.be/i8adbqn6ZAo"));
        // Absent mapping is "no media available", not an error.
        assert_eq!(media.url("album2.png"), None);
    }

    #[test]
    fn test_missing_file_is_catalog_error() {
        let err = MediaLibrary::load(Path::new("/nonexistent/media.json")).unwrap_err();
        assert!(matches!(err, ScanError::Catalog(_)));
    }

    #[test]
    fn test_rejects_non_string_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"album1.png": 42}}"#).unwrap();
        assert!(MediaLibrary::load(file.path()).is_err());
    }
}
