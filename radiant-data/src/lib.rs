//! Radiant Data Crate
//!
//! Loading utilities for Blender-style posed image datasets: the
//! `transforms_*.json` manifest, RGBA frame decoding and the small value types
//! shared with the ray engine. This crate is GPU-agnostic and does no geometry
//! beyond reading matrices.

pub mod error;
pub mod frame;
pub mod manifest;
pub mod types;

pub use error::DataError;
pub use frame::{FrameImage, decode_frame_image};
pub use manifest::{Manifest, ManifestFrame, Split, load_manifest};
pub use types::{Aabb, Frame};
