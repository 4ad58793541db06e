//! Core data types for posed frames and scene bounds.
//!
//! These are CPU-side representations shared by the loader and the ray engine.

use glam::{Mat4, Vec3};
use std::path::PathBuf;

/// One posed image from a dataset manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Absolute (or data-dir relative) path of the RGBA image.
    pub image_path: PathBuf,
    /// Camera-to-world transform as stored in the manifest.
    pub camera_to_world: Mat4,
}

impl Frame {
    /// Create a new frame from an image path and a camera-to-world matrix.
    pub fn new(image_path: impl Into<PathBuf>, camera_to_world: Mat4) -> Self {
        Self {
            image_path: image_path.into(),
            camera_to_world,
        }
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.camera_to_world.w_axis.truncate()
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A cube centred on the origin with the given half extent.
    pub fn cube(half_extent: f32) -> Self {
        Self {
            min: Vec3::splat(-half_extent),
            max: Vec3::splat(half_extent),
        }
    }

    /// Compute the center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Compute the size of the box along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check whether a point lies inside the box (inclusive).
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl Default for Aabb {
    /// Region of interest used for mesh extraction after scene normalization.
    fn default() -> Self {
        Self::cube(1.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_position() {
        let frame = Frame::new(
            "train/r_0.png",
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
        );
        assert_eq!(frame.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_default_region_of_interest() {
        let bbox = Aabb::default();
        assert_eq!(bbox.min, Vec3::splat(-1.01));
        assert_eq!(bbox.max, Vec3::splat(1.01));
        assert_eq!(bbox.center(), Vec3::ZERO);
    }

    #[test]
    fn test_aabb_contains() {
        let bbox = Aabb::new(Vec3::ZERO, Vec3::new(3.0, 2.0, 1.0));
        assert!(bbox.contains(Vec3::new(1.0, 1.0, 0.5)));
        assert!(bbox.contains(Vec3::new(3.0, 2.0, 1.0)));
        assert!(!bbox.contains(Vec3::new(3.1, 1.0, 0.5)));
        assert_eq!(bbox.extent(), Vec3::new(3.0, 2.0, 1.0));
    }
}
