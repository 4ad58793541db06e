//! Errors raised while reading a dataset from disk

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading manifests and frames.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to decode image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("image {} is {}x{}, expected {}x{}", .path.display(), .found.0, .found.1, .expected.0, .expected.1)]
    DimensionMismatch {
        path: PathBuf,
        expected: (u32, u32),
        found: (u32, u32),
    },
}
