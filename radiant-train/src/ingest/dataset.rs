//! Posed image dataset loaded from a Blender-style manifest

use crate::camera::{Intrinsics, flip_axes, normalize_translations};
use crate::error::DatasetError;
use crate::ingest::config::{DatasetConfig, Device};
use crate::rays::{DepthBounds, PixelGrid, near_far_from_sphere};
use glam::{Mat4, Vec3};
use image::RgbImage;
use image::imageops::{self, FilterType};
use radiant_data::{Aabb, DataError, Frame, FrameImage, decode_frame_image, load_manifest};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// N posed images with shared intrinsics, normalized into the unit sphere.
///
/// Built once and read-only afterwards, so it can be shared across threads.
#[derive(Debug, Clone)]
pub struct CameraDataset {
    image_paths: Vec<PathBuf>,
    images: Vec<FrameImage>,
    pose_all: Vec<Mat4>,
    intrinsics: Intrinsics,
    intrinsics_all: Vec<Mat4>,
    intrinsics_all_inv: Vec<Mat4>,
    width: u32,
    height: u32,
    scale: f32,
    object_bbox: Aabb,
    device: Device,
}

impl CameraDataset {
    /// Load the manifest and every frame it lists.
    ///
    /// Fails without producing a dataset if the manifest is missing or
    /// malformed, an image cannot be decoded, or frame sizes differ.
    #[tracing::instrument(skip_all, fields(data_dir = %config.data_dir.display(), split = %config.split))]
    pub fn load(config: &DatasetConfig) -> Result<Self, DatasetError> {
        config.validate()?;
        info!("Load data: begin");

        let manifest = load_manifest(&config.data_dir, config.split)?;
        let frames = manifest
            .frames(&config.data_dir, &config.image_extension)
            .into_iter()
            .step_by(config.frame_stride)
            .map(|frame| decode_frame_image(&frame.image_path).map(|image| (frame, image)))
            .collect::<Result<Vec<_>, DataError>>()?;

        let dataset = Self::from_frames(frames, manifest.camera_angle_x, config.device)?;
        info!("Load data: end");
        Ok(dataset)
    }

    /// Assemble a dataset from already decoded frames.
    ///
    /// Applies the axis flip, rescales translations so the farthest camera
    /// sits at unit distance and derives shared intrinsics from the field of
    /// view.
    pub fn from_frames(
        frames: Vec<(Frame, FrameImage)>,
        camera_angle_x: f32,
        device: Device,
    ) -> Result<Self, DatasetError> {
        let Some((first, first_image)) = frames.first() else {
            return Err(DatasetError::EmptyDataset);
        };
        let (width, height) = first_image.dimensions();
        debug!("Reference frame {} is {}x{}", first.image_path.display(), width, height);

        for (frame, image) in &frames {
            if image.dimensions() != (width, height) {
                return Err(DataError::DimensionMismatch {
                    path: frame.image_path.clone(),
                    expected: (width, height),
                    found: image.dimensions(),
                }
                .into());
            }
        }

        let flipped: Vec<Mat4> = frames
            .iter()
            .map(|(frame, _)| flip_axes(frame.camera_to_world))
            .collect();
        let (pose_all, scale) = normalize_translations(&flipped)?;

        let intrinsics = Intrinsics::from_fov_x(camera_angle_x, width, height)?;
        let n_images = frames.len();
        let intrinsics_all = vec![intrinsics.matrix(); n_images];
        let intrinsics_all_inv = vec![intrinsics.inverse_matrix(); n_images];

        let (image_paths, images) = frames
            .into_iter()
            .map(|(frame, image)| (frame.image_path, image))
            .unzip();

        info!(
            "Dataset ready: {} images at {}x{}, focal {:.3}, scale {:.5}, device {}",
            n_images, width, height, intrinsics.focal, scale, device
        );

        Ok(Self {
            image_paths,
            images,
            pose_all,
            intrinsics,
            intrinsics_all,
            intrinsics_all_inv,
            width,
            height,
            scale,
            object_bbox: Aabb::default(),
            device,
        })
    }

    pub fn n_images(&self) -> usize {
        self.images.len()
    }

    /// Image dimensions (width, height), shared by every frame.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels per image.
    pub fn image_pixels(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn focal(&self) -> f32 {
        self.intrinsics.focal
    }

    pub fn intrinsics(&self) -> Intrinsics {
        self.intrinsics
    }

    pub fn intrinsics_all(&self) -> &[Mat4] {
        &self.intrinsics_all
    }

    pub fn intrinsics_all_inv(&self) -> &[Mat4] {
        &self.intrinsics_all_inv
    }

    /// Normalized camera-to-world matrices.
    pub fn pose_all(&self) -> &[Mat4] {
        &self.pose_all
    }

    /// Scale applied to every camera translation during loading.
    pub fn normalization_scale(&self) -> f32 {
        self.scale
    }

    /// Premultiplied colors and masks, index-aligned with [`Self::pose_all`].
    pub fn images(&self) -> &[FrameImage] {
        &self.images
    }

    pub fn image_paths(&self) -> &[PathBuf] {
        &self.image_paths
    }

    /// Region of interest for mesh extraction.
    pub fn object_bbox(&self) -> Aabb {
        self.object_bbox
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// Near/far bounds for rays against the normalized unit sphere.
    pub fn near_far_from_sphere(
        &self,
        origins: &[Vec3],
        directions: &[Vec3],
    ) -> Result<Vec<DepthBounds>, DatasetError> {
        near_far_from_sphere(origins, directions)
    }

    /// Re-decode the source image at `index` and resize it to
    /// `(W / level, H / level)`.
    ///
    /// Reads from disk on every call and ignores the premultiplied copy.
    pub fn image_at(&self, index: usize, level: u32) -> Result<RgbImage, DatasetError> {
        self.check_index(index)?;
        let grid = PixelGrid::new(self.width, self.height, level)?;
        let path: &Path = &self.image_paths[index];

        let image = image::open(path).map_err(|source| DataError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Re-read {} for display", path.display());

        Ok(imageops::resize(
            &image.to_rgb8(),
            grid.cols() as u32,
            grid.rows() as u32,
            FilterType::Triangle,
        ))
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), DatasetError> {
        if index >= self.images.len() {
            return Err(DatasetError::IndexOutOfRange {
                index,
                len: self.images.len(),
            });
        }
        Ok(())
    }
}
