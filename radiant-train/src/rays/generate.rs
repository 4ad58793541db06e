//! Ray queries against a loaded [`CameraDataset`]

use crate::camera::{Intrinsics, interpolate_pose};
use crate::error::DatasetError;
use crate::ingest::{CameraDataset, Device};
use crate::rays::{PixelGrid, RayBatch, RayBundle, RaySample};
use glam::{Mat3, Mat4, Vec3};
use rand::Rng;
use tracing::{debug, warn};

impl CameraDataset {
    /// World-space rays for every pixel of a `(H / level, W / level)` grid
    /// seen from camera `index`.
    pub fn gen_rays_at(&self, index: usize, level: u32) -> Result<RayBundle, DatasetError> {
        self.check_index(index)?;
        let grid = self.pixel_grid(level)?;
        let bundle = cast_grid(
            &grid,
            &self.intrinsics_all_inv()[index],
            &self.pose_all()[index],
            self.device(),
        )?;
        debug!("Generated {} rays for image {}", bundle.len(), index);
        Ok(bundle)
    }

    /// `batch_size` rays through uniformly drawn pixels of image `index`,
    /// using the thread-local random source.
    pub fn gen_random_rays_at(
        &self,
        index: usize,
        batch_size: usize,
    ) -> Result<RayBatch, DatasetError> {
        self.gen_random_rays_at_with(index, batch_size, &mut rand::thread_rng())
    }

    /// Like [`Self::gen_random_rays_at`] with an explicit random source.
    ///
    /// Pixels are drawn with replacement; each sample carries the stored
    /// premultiplied color and mask of its pixel.
    pub fn gen_random_rays_at_with<R: Rng + ?Sized>(
        &self,
        index: usize,
        batch_size: usize,
        rng: &mut R,
    ) -> Result<RayBatch, DatasetError> {
        self.check_index(index)?;
        if batch_size == 0 {
            return Err(DatasetError::InvalidBatchSize);
        }

        let (width, height) = self.dimensions();
        let image = &self.images()[index];
        let inverse = &self.intrinsics_all_inv()[index];
        let pose = &self.pose_all()[index];
        let rotation = Mat3::from_mat4(*pose);
        let origin = pose.w_axis.truncate();

        let samples = (0..batch_size)
            .map(|_| {
                let x = rng.gen_range(0..width);
                let y = rng.gen_range(0..height);
                Intrinsics::unproject(inverse, x as f32, y as f32).map(|d| RaySample {
                    origin,
                    direction: rotation * d,
                    color: image.color_at(x, y),
                    mask: image.mask_at(x, y),
                })
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;

        debug!("Sampled {} random rays from image {}", samples.len(), index);
        Ok(RayBatch::new(samples, self.device()))
    }

    /// Full-frame rays from a pose interpolated between cameras `from` and
    /// `to`: rotation slerped, world-to-camera translation lerped.
    ///
    /// Intrinsics are shared, so camera 0's inverse is used.
    pub fn gen_rays_between(
        &self,
        from: usize,
        to: usize,
        ratio: f32,
        level: u32,
    ) -> Result<RayBundle, DatasetError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let grid = self.pixel_grid(level)?;

        let pose = interpolate_pose(self.pose_all()[from], self.pose_all()[to], ratio)?;
        let bundle = cast_grid(&grid, &self.intrinsics_all_inv()[0], &pose, self.device())?;
        debug!(
            "Generated {} rays between images {} and {} at ratio {:.3}",
            bundle.len(),
            from,
            to,
            ratio
        );
        Ok(bundle)
    }

    fn pixel_grid(&self, level: u32) -> Result<PixelGrid, DatasetError> {
        let (width, height) = self.dimensions();
        let grid = PixelGrid::new(width, height, level)?;
        if width % level != 0 || height % level != 0 {
            warn!(
                "Resolution level {} does not divide {}x{}, grid is {}x{}",
                level,
                width,
                height,
                grid.cols(),
                grid.rows()
            );
        }
        Ok(grid)
    }
}

fn cast_grid(
    grid: &PixelGrid,
    inverse: &Mat4,
    camera_to_world: &Mat4,
    device: Device,
) -> Result<RayBundle, DatasetError> {
    let rotation = Mat3::from_mat4(*camera_to_world);
    let origin: Vec3 = camera_to_world.w_axis.truncate();

    let directions = grid
        .pixels()
        .map(|(x, y)| Intrinsics::unproject(inverse, x, y).map(|d| rotation * d))
        .collect::<Result<Vec<_>, DatasetError>>()?;

    Ok(RayBundle::from_directions(
        grid.rows(),
        grid.cols(),
        origin,
        directions,
        device,
    ))
}
