//! Radiant Training Crate
//!
//! Supplies training signal for volumetric neural rendering: a posed image
//! dataset loaded from a Blender-style manifest, and the camera-ray geometry
//! that samples it.
//!
//! ## Modules
//!
//! - [`ingest`]: Dataset configuration and loading
//! - [`camera`]: Pinhole intrinsics, pose conventions and pose interpolation
//! - [`rays`]: Full-frame, random-batch and interpolated ray generation, near/far bounds

pub mod camera;
pub mod error;
pub mod ingest;
pub mod rays;

pub use camera::Intrinsics;
pub use error::DatasetError;
pub use ingest::{CameraDataset, DatasetConfig, Device};
pub use rays::{DepthBounds, RayBatch, RayBundle, RaySample, near_far_from_sphere};
