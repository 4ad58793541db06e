//! Camera pose conventions, scene normalization and pose interpolation

use crate::error::DatasetError;
use glam::{Mat3, Mat4, Quat, Vec4};

/// Right-multiplied onto a Blender camera-to-world matrix, negates the camera
/// y and z axes so the camera looks down +z with y pointing down.
pub const OPENGL_TO_OPENCV: Mat4 = Mat4::from_cols(Vec4::X, Vec4::NEG_Y, Vec4::NEG_Z, Vec4::W);

/// Convert a camera-to-world matrix to the ray generator's convention.
pub fn flip_axes(camera_to_world: Mat4) -> Mat4 {
    camera_to_world * OPENGL_TO_OPENCV
}

/// Rescale every camera translation by `1 / max ||t||`.
///
/// Returns the normalized poses together with the applied scale. Rotations are
/// untouched, so relative geometry is preserved.
pub fn normalize_translations(poses: &[Mat4]) -> Result<(Vec<Mat4>, f32), DatasetError> {
    let max_norm = poses
        .iter()
        .map(|pose| pose.w_axis.truncate().length())
        .fold(0.0_f32, f32::max);

    if !max_norm.is_finite() || max_norm <= f32::EPSILON {
        return Err(DatasetError::DegenerateGeometry(format!(
            "farthest camera lies {max_norm} from the origin, cannot normalize the scene"
        )));
    }

    let scale = 1.0 / max_norm;
    let normalized = poses
        .iter()
        .map(|pose| {
            let mut pose = *pose;
            pose.w_axis = (pose.w_axis.truncate() * scale).extend(pose.w_axis.w);
            pose
        })
        .collect();

    Ok((normalized, scale))
}

/// Interpolate between two camera-to-world poses.
///
/// Both poses are inverted to world-to-camera; their rotations are slerped
/// along the shortest arc and their translations lerped, then the result is
/// inverted back. `ratio = 0` reproduces `from`, `ratio = 1` reproduces `to`.
pub fn interpolate_pose(from: Mat4, to: Mat4, ratio: f32) -> Result<Mat4, DatasetError> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(DatasetError::InvalidRatio(ratio));
    }

    let world_to_cam_0 = from.inverse();
    let world_to_cam_1 = to.inverse();

    let rotation_0 = rotation_of(&world_to_cam_0)?;
    let rotation_1 = rotation_of(&world_to_cam_1)?;
    let rotation = rotation_0.slerp(rotation_1, ratio);

    let translation = world_to_cam_0
        .w_axis
        .truncate()
        .lerp(world_to_cam_1.w_axis.truncate(), ratio);

    Ok(Mat4::from_rotation_translation(rotation, translation).inverse())
}

fn rotation_of(world_to_cam: &Mat4) -> Result<Quat, DatasetError> {
    let block = Mat3::from_mat4(*world_to_cam);
    let det = block.determinant();
    if !det.is_finite() || det <= 0.0 {
        return Err(DatasetError::DegenerateGeometry(format!(
            "pose rotation has determinant {det}, expected a proper rotation"
        )));
    }
    Ok(Quat::from_mat3(&block).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn orbit_pose(angle: f32, radius: f32) -> Mat4 {
        let eye = Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.5);
        flip_axes(Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Z).inverse())
    }

    #[test]
    fn test_flip_identity() {
        let pose = flip_axes(Mat4::IDENTITY);
        let rotation = Mat3::from_mat4(pose);
        assert_eq!(rotation, Mat3::from_diagonal(Vec3::new(1.0, -1.0, -1.0)));
        assert_eq!(pose.w_axis, Vec4::W);
    }

    #[test]
    fn test_flip_keeps_translation() {
        let pose = flip_axes(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(pose.w_axis, Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_normalize_translations() {
        let poses = vec![
            Mat4::from_translation(Vec3::new(0.0, 0.0, 4.0)),
            Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)),
        ];
        let (normalized, scale) = normalize_translations(&poses).unwrap();
        assert!((scale - 0.25).abs() < 1e-7);
        assert!(normalized[0].w_axis.abs_diff_eq(Vec4::new(0.0, 0.0, 1.0, 1.0), 1e-6));
        assert!(normalized[1].w_axis.abs_diff_eq(Vec4::new(0.5, 0.0, 0.0, 1.0), 1e-6));

        let max = normalized
            .iter()
            .map(|p| p.w_axis.truncate().length())
            .fold(0.0_f32, f32::max);
        assert!((max - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_rejects_origin_cameras() {
        let poses = vec![Mat4::IDENTITY, flip_axes(Mat4::IDENTITY)];
        assert!(matches!(
            normalize_translations(&poses),
            Err(DatasetError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_interpolate_endpoints() {
        let from = orbit_pose(0.0, 1.0);
        let to = orbit_pose(1.2, 1.0);
        assert!(interpolate_pose(from, to, 0.0).unwrap().abs_diff_eq(from, 1e-5));
        assert!(interpolate_pose(from, to, 1.0).unwrap().abs_diff_eq(to, 1e-5));
    }

    #[test]
    fn test_interpolate_identical_poses() {
        let pose = orbit_pose(0.7, 1.0);
        assert!(interpolate_pose(pose, pose, 0.5).unwrap().abs_diff_eq(pose, 1e-5));
    }

    #[test]
    fn test_interpolate_midpoint_stays_on_orbit() {
        let from = orbit_pose(0.0, 1.0);
        let to = orbit_pose(std::f32::consts::FRAC_PI_2, 1.0);
        let mid = interpolate_pose(from, to, 0.5).unwrap();
        let position = mid.w_axis.truncate();
        assert!((position.length() - from.w_axis.truncate().length()).abs() < 1e-5);

        let forward = Mat3::from_mat4(mid) * Vec3::Z;
        assert!(forward.abs_diff_eq(-position.normalize(), 1e-5));
    }

    #[test]
    fn test_interpolate_rejects_ratio_out_of_range() {
        let pose = orbit_pose(0.0, 1.0);
        assert!(matches!(
            interpolate_pose(pose, pose, 1.5),
            Err(DatasetError::InvalidRatio(_))
        ));
        assert!(interpolate_pose(pose, pose, f32::NAN).is_err());
    }

    #[test]
    fn test_interpolate_rejects_reflection() {
        let pose = orbit_pose(0.0, 1.0);
        let mirrored = Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0));
        assert!(matches!(
            interpolate_pose(pose, mirrored, 0.5),
            Err(DatasetError::DegenerateGeometry(_))
        ));
    }
}
