//! Data ingestion module
//!
//! Builds a [`CameraDataset`] from a Blender-style dataset directory:
//! - [`DatasetConfig`]: where to read from and where results should live
//! - [`CameraDataset`]: the immutable, normalized dataset and its accessors

pub mod config;
pub mod dataset;

pub use config::{DatasetConfig, Device};
pub use dataset::CameraDataset;
