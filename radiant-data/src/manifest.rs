//! `transforms_{split}.json` manifest loading

use crate::error::DataError;
use crate::types::Frame;
use glam::Mat4;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which manifest of a Blender-style dataset to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    #[default]
    Train,
    Val,
    Test,
}

impl Split {
    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }

    /// File name of the manifest for this split.
    pub fn manifest_name(self) -> String {
        format!("transforms_{}.json", self.as_str())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single frame entry. Extra keys (e.g. `rotation`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestFrame {
    /// Image path relative to the data directory, without extension.
    pub file_path: String,
    /// Camera-to-world matrix, row-major.
    pub transform_matrix: [[f32; 4]; 4],
}

impl ManifestFrame {
    /// Camera-to-world matrix. The manifest stores rows, glam stores columns.
    pub fn camera_to_world(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.transform_matrix).transpose()
    }
}

/// Parsed dataset manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Horizontal field of view in radians, shared by every frame.
    pub camera_angle_x: f32,
    pub frames: Vec<ManifestFrame>,
}

impl Manifest {
    /// Parse a manifest from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let manifest: Manifest = serde_json::from_str(json).map_err(|source| DataError::Json {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check the field of view and that every matrix is finite.
    pub fn validate(&self) -> Result<(), DataError> {
        if !self.camera_angle_x.is_finite() || self.camera_angle_x <= 0.0 || self.camera_angle_x >= PI {
            return Err(DataError::InvalidManifest(format!(
                "camera_angle_x must lie in (0, pi), got {}",
                self.camera_angle_x
            )));
        }
        if self.frames.is_empty() {
            return Err(DataError::InvalidManifest("manifest lists no frames".to_string()));
        }
        for (i, frame) in self.frames.iter().enumerate() {
            if frame.transform_matrix.iter().flatten().any(|v| !v.is_finite()) {
                return Err(DataError::InvalidManifest(format!(
                    "non-finite transform_matrix at frame {} ({})",
                    i, frame.file_path
                )));
            }
        }
        Ok(())
    }

    /// Resolve every entry against `data_dir`, appending `extension` to the
    /// stored path. An empty extension leaves the path untouched.
    pub fn frames(&self, data_dir: &Path, extension: &str) -> Vec<Frame> {
        self.frames
            .iter()
            .map(|frame| {
                let file = if extension.is_empty() {
                    frame.file_path.clone()
                } else {
                    format!("{}.{}", frame.file_path, extension)
                };
                Frame::new(data_dir.join(file), frame.camera_to_world())
            })
            .collect()
    }
}

/// Load and validate `transforms_{split}.json` from a dataset directory.
#[tracing::instrument(skip_all, fields(data_dir = %data_dir.display(), split = %split))]
pub fn load_manifest(data_dir: &Path, split: Split) -> Result<Manifest, DataError> {
    let path = data_dir.join(split.manifest_name());
    debug!("Loading manifest from: {}", path.display());

    let file = File::open(&path).map_err(|source| DataError::Io {
        path: path.clone(),
        source,
    })?;
    let manifest: Manifest = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| DataError::Json {
            path: path.clone(),
            source,
        })?;
    manifest.validate()?;

    info!(
        "Manifest parsed: {} frames, camera_angle_x = {:.4}",
        manifest.frames.len(),
        manifest.camera_angle_x
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const MANIFEST: &str = r#"{
        "camera_angle_x": 0.6911112070083618,
        "frames": [
            {
                "file_path": "./train/r_0",
                "rotation": 0.012566370614359171,
                "transform_matrix": [
                    [1.0, 0.0, 0.0, 0.5],
                    [0.0, 1.0, 0.0, -1.5],
                    [0.0, 0.0, 1.0, 4.0],
                    [0.0, 0.0, 0.0, 1.0]
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::from_json_str(MANIFEST).unwrap();
        assert_eq!(manifest.frames.len(), 1);
        assert!((manifest.camera_angle_x - 0.691_111_2).abs() < 1e-6);
        assert_eq!(manifest.frames[0].file_path, "./train/r_0");
    }

    #[test]
    fn test_transform_is_row_major() {
        let manifest = Manifest::from_json_str(MANIFEST).unwrap();
        let pose = manifest.frames[0].camera_to_world();
        assert_eq!(pose.w_axis, Vec4::new(0.5, -1.5, 4.0, 1.0));
        assert_eq!(pose.x_axis, Vec4::X);
    }

    #[test]
    fn test_frames_append_extension() {
        let manifest = Manifest::from_json_str(MANIFEST).unwrap();
        let frames = manifest.frames(Path::new("/data/lego"), "png");
        assert_eq!(frames[0].image_path, Path::new("/data/lego/./train/r_0.png"));

        let bare = manifest.frames(Path::new("/data/lego"), "");
        assert_eq!(bare[0].image_path, Path::new("/data/lego/./train/r_0"));
    }

    #[test]
    fn test_rejects_bad_matrix_shape() {
        let json = r#"{"camera_angle_x": 0.5, "frames": [
            {"file_path": "a", "transform_matrix": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]}
        ]}"#;
        assert!(matches!(
            Manifest::from_json_str(json),
            Err(DataError::Json { .. })
        ));
    }

    #[test]
    fn test_rejects_degenerate_fov() {
        let json = r#"{"camera_angle_x": 0.0, "frames": [
            {"file_path": "a", "transform_matrix": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]}
        ]}"#;
        assert!(matches!(
            Manifest::from_json_str(json),
            Err(DataError::InvalidManifest(_))
        ));
    }

    #[test]
    fn test_rejects_empty_frames() {
        let json = r#"{"camera_angle_x": 0.7, "frames": []}"#;
        assert!(matches!(
            Manifest::from_json_str(json),
            Err(DataError::InvalidManifest(_))
        ));
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(dir.path(), Split::Val).unwrap_err();
        match err {
            DataError::Io { path, .. } => assert!(path.ends_with("transforms_val.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_manifest_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("transforms_train.json"), MANIFEST).unwrap();
        let manifest = load_manifest(dir.path(), Split::Train).unwrap();
        assert_eq!(manifest.frames.len(), 1);
    }

    #[test]
    fn test_split_names() {
        assert_eq!(Split::default(), Split::Train);
        assert_eq!(Split::Test.manifest_name(), "transforms_test.json");
        assert_eq!(Split::Val.to_string(), "val");
    }
}
