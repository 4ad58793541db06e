//! Near/far sampling bounds around the unit sphere

use crate::error::DatasetError;
use glam::Vec3;

/// Directions shorter than this are treated as degenerate.
const MIN_DIRECTION_LENGTH_SQUARED: f32 = 1e-12;

/// Parametric sampling range `[near, far]` along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBounds {
    pub near: f32,
    pub far: f32,
}

impl DepthBounds {
    /// A window of width 2 centred on the ray parameter closest to the origin.
    ///
    /// This assumes the scene has been normalized into the unit sphere; rays
    /// that miss the sphere still get a window.
    pub fn from_ray(origin: Vec3, direction: Vec3) -> Result<Self, DatasetError> {
        let a = direction.length_squared();
        if !(a > MIN_DIRECTION_LENGTH_SQUARED) {
            return Err(DatasetError::DegenerateGeometry(format!(
                "ray direction {direction} has no usable length"
            )));
        }
        let b = 2.0 * origin.dot(direction);
        let mid = 0.5 * -b / a;
        Ok(Self {
            near: mid - 1.0,
            far: mid + 1.0,
        })
    }

    pub fn width(&self) -> f32 {
        self.far - self.near
    }
}

/// Near/far bounds for matched pairs of origins and directions.
pub fn near_far_from_sphere(
    origins: &[Vec3],
    directions: &[Vec3],
) -> Result<Vec<DepthBounds>, DatasetError> {
    if origins.len() != directions.len() {
        return Err(DatasetError::LengthMismatch {
            origins: origins.len(),
            directions: directions.len(),
        });
    }
    origins
        .iter()
        .zip(directions)
        .map(|(&o, &d)| DepthBounds::from_ray(o, d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_towards_origin() {
        let bounds = DepthBounds::from_ray(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z).unwrap();
        assert_eq!(bounds.near, 2.0);
        assert_eq!(bounds.far, 4.0);
        assert_eq!(bounds.width(), 2.0);
    }

    #[test]
    fn test_unnormalized_direction() {
        let bounds = DepthBounds::from_ray(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -2.0)).unwrap();
        assert_eq!(bounds.near, 0.5);
        assert_eq!(bounds.far, 2.5);
    }

    #[test]
    fn test_window_width_is_two() {
        let origins = [
            Vec3::new(0.3, -0.8, 0.1),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-0.25, 0.5, 0.75),
        ];
        let directions = [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.5, -0.5, -0.5).normalize(),
        ];
        for bounds in near_far_from_sphere(&origins, &directions).unwrap() {
            assert!(bounds.near <= bounds.far);
            assert_eq!(bounds.width(), 2.0);
        }
    }

    #[test]
    fn test_rejects_zero_direction() {
        assert!(matches!(
            DepthBounds::from_ray(Vec3::ONE, Vec3::ZERO),
            Err(DatasetError::DegenerateGeometry(_))
        ));
        assert!(DepthBounds::from_ray(Vec3::ONE, Vec3::splat(f32::NAN)).is_err());
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let err = near_far_from_sphere(&[Vec3::ZERO], &[]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::LengthMismatch {
                origins: 1,
                directions: 0
            }
        ));
    }
}
