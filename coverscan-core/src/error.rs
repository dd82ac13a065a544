use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    /// The catalog or media file is missing, unreadable, or malformed.
    /// Fatal at startup: recognition cannot proceed without a feature table.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// The input image could not be decoded or has zero area.
    /// Recoverable: the caller should prompt for another photo.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
