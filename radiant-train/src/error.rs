//! Errors raised by dataset construction and ray queries

use radiant_data::DataError;
use thiserror::Error;

/// Errors that can occur while building or querying a [`crate::CameraDataset`].
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("load error: {0}")]
    Load(#[from] DataError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dataset contains no frames")]
    EmptyDataset,

    #[error("image index {index} out of range for {len} images")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("resolution level {level} is invalid for a {width}x{height} image")]
    InvalidResolution { level: u32, width: u32, height: u32 },

    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    #[error("interpolation ratio {0} outside [0, 1]")]
    InvalidRatio(f32),

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("{origins} ray origins paired with {directions} directions")]
    LengthMismatch { origins: usize, directions: usize },
}
