//! Pinhole intrinsics shared by every frame of a dataset

use crate::error::DatasetError;
use glam::{Mat3, Mat4, Vec3, Vec4};
use std::f64::consts::PI;

/// Pinhole camera with a single focal length and a principal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    /// Focal length in pixels (fx = fy).
    pub focal: f32,
    /// Principal point x in pixels.
    pub cx: f32,
    /// Principal point y in pixels.
    pub cy: f32,
}

impl Intrinsics {
    pub fn new(focal: f32, cx: f32, cy: f32) -> Self {
        Self { focal, cx, cy }
    }

    /// Derive intrinsics from a horizontal field of view.
    ///
    /// `focal = 0.5 * width / tan(0.5 * camera_angle_x)` and the principal
    /// point sits at the image centre.
    pub fn from_fov_x(camera_angle_x: f32, width: u32, height: u32) -> Result<Self, DatasetError> {
        let angle = camera_angle_x as f64;
        if !angle.is_finite() || angle <= 0.0 || angle >= PI {
            return Err(DatasetError::DegenerateGeometry(format!(
                "field of view {camera_angle_x} rad yields no finite focal length"
            )));
        }
        if width == 0 || height == 0 {
            return Err(DatasetError::DegenerateGeometry(format!(
                "image size {width}x{height} is empty"
            )));
        }

        let focal = 0.5 * width as f64 / (0.5 * angle).tan();
        Ok(Self {
            focal: focal as f32,
            cx: 0.5 * width as f32,
            cy: 0.5 * height as f32,
        })
    }

    /// 4x4 intrinsics matrix: `diag(f, f, 1, 1)` with the principal point in
    /// the third column.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols(
            Vec4::new(self.focal, 0.0, 0.0, 0.0),
            Vec4::new(0.0, self.focal, 0.0, 0.0),
            Vec4::new(self.cx, self.cy, 1.0, 0.0),
            Vec4::W,
        )
    }

    /// Closed-form inverse of [`Self::matrix`].
    pub fn inverse_matrix(&self) -> Mat4 {
        let inv_focal = 1.0 / self.focal;
        Mat4::from_cols(
            Vec4::new(inv_focal, 0.0, 0.0, 0.0),
            Vec4::new(0.0, inv_focal, 0.0, 0.0),
            Vec4::new(-self.cx / self.focal, -self.cy / self.focal, 1.0, 0.0),
            Vec4::W,
        )
    }

    /// Camera-space ray through pixel `(x, y)` using an inverse intrinsics
    /// matrix. The result has unit length.
    pub fn unproject(inverse: &Mat4, x: f32, y: f32) -> Result<Vec3, DatasetError> {
        let p = Mat3::from_mat4(*inverse) * Vec3::new(x, y, 1.0);
        p.try_normalize().ok_or_else(|| {
            DatasetError::DegenerateGeometry(format!(
                "pixel ({x}, {y}) unprojects to a zero-length direction"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focal_from_fov() {
        let intrinsics = Intrinsics::from_fov_x(2.0 * 0.5_f32.atan(), 100, 80).unwrap();
        assert!((intrinsics.focal - 100.0).abs() < 1e-3);
        assert_eq!(intrinsics.cx, 50.0);
        assert_eq!(intrinsics.cy, 40.0);
    }

    #[test]
    fn test_matrix_inverse() {
        let intrinsics = Intrinsics::new(100.0, 50.0, 40.0);
        let product = intrinsics.matrix() * intrinsics.inverse_matrix();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_inverse_layout() {
        let intrinsics = Intrinsics::new(200.0, 50.0, 40.0);
        let inverse = intrinsics.inverse_matrix();
        assert_eq!(inverse.x_axis, Vec4::new(0.005, 0.0, 0.0, 0.0));
        assert_eq!(inverse.y_axis, Vec4::new(0.0, 0.005, 0.0, 0.0));
        assert_eq!(inverse.z_axis, Vec4::new(-0.25, -0.2, 1.0, 0.0));
        assert_eq!(inverse.w_axis, Vec4::W);
    }

    #[test]
    fn test_unproject_principal_point() {
        let intrinsics = Intrinsics::new(100.0, 50.0, 40.0);
        let dir = Intrinsics::unproject(&intrinsics.inverse_matrix(), 50.0, 40.0).unwrap();
        assert!(dir.abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn test_unproject_corner() {
        let intrinsics = Intrinsics::new(10.0, 10.0, 10.0);
        let dir = Intrinsics::unproject(&intrinsics.inverse_matrix(), 0.0, 20.0).unwrap();
        let expected = Vec3::new(-1.0, 1.0, 1.0).normalize();
        assert!(dir.abs_diff_eq(expected, 1e-6));
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_invalid_fov() {
        assert!(Intrinsics::from_fov_x(0.0, 100, 100).is_err());
        assert!(Intrinsics::from_fov_x(std::f32::consts::PI, 100, 100).is_err());
        assert!(Intrinsics::from_fov_x(f32::NAN, 100, 100).is_err());
    }
}
