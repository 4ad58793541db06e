//! Ray containers handed to the renderer

use crate::ingest::Device;
use glam::Vec3;

/// Number of `f32` columns in a flattened [`RaySample`].
pub const RAY_SAMPLE_WIDTH: usize = 10;

/// A full frame of rays, stored row-major with `rows x cols` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct RayBundle {
    rows: usize,
    cols: usize,
    origins: Vec<Vec3>,
    directions: Vec<Vec3>,
    device: Device,
}

impl RayBundle {
    /// Bundle rays sharing a single origin.
    pub(crate) fn from_directions(
        rows: usize,
        cols: usize,
        origin: Vec3,
        directions: Vec<Vec3>,
        device: Device,
    ) -> Self {
        debug_assert_eq!(rows * cols, directions.len());
        Self {
            rows,
            cols,
            origins: vec![origin; directions.len()],
            directions,
            device,
        }
    }

    /// Grid shape `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    pub fn origins(&self) -> &[Vec3] {
        &self.origins
    }

    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }

    /// Ray origin at `(row, col)`.
    ///
    /// Panics if the position lies outside the bundle.
    pub fn origin(&self, row: usize, col: usize) -> Vec3 {
        self.origins[self.offset(row, col)]
    }

    /// Unit ray direction at `(row, col)`.
    ///
    /// Panics if the position lies outside the bundle.
    pub fn direction(&self, row: usize, col: usize) -> Vec3 {
        self.directions[self.offset(row, col)]
    }

    /// Where the consumer should place this bundle.
    pub fn device(&self) -> Device {
        self.device
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.origins.iter().copied().zip(self.directions.iter().copied())
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "ray ({row}, {col}) outside {}x{} bundle",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

/// One randomly sampled training ray with its ground truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySample {
    pub origin: Vec3,
    /// Unit direction in world space.
    pub direction: Vec3,
    /// Premultiplied color of the sampled pixel.
    pub color: Vec3,
    /// Occupancy of the sampled pixel, `0.0` or `1.0`.
    pub mask: f32,
}

impl RaySample {
    /// `[origin, direction, color, mask]` flattened to ten floats.
    pub fn to_row(&self) -> [f32; RAY_SAMPLE_WIDTH] {
        [
            self.origin.x,
            self.origin.y,
            self.origin.z,
            self.direction.x,
            self.direction.y,
            self.direction.z,
            self.color.x,
            self.color.y,
            self.color.z,
            self.mask,
        ]
    }
}

/// A batch of random training rays.
#[derive(Debug, Clone, PartialEq)]
pub struct RayBatch {
    samples: Vec<RaySample>,
    device: Device,
}

impl RayBatch {
    pub(crate) fn new(samples: Vec<RaySample>, device: Device) -> Self {
        Self { samples, device }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[RaySample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RaySample> {
        self.samples.iter()
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// The batch as a `(B, 10)` table.
    pub fn to_rows(&self) -> Vec<[f32; RAY_SAMPLE_WIDTH]> {
        self.samples.iter().map(RaySample::to_row).collect()
    }

    pub fn origins(&self) -> Vec<Vec3> {
        self.samples.iter().map(|s| s.origin).collect()
    }

    pub fn directions(&self) -> Vec<Vec3> {
        self.samples.iter().map(|s| s.direction).collect()
    }
}

impl<'a> IntoIterator for &'a RayBatch {
    type Item = &'a RaySample;
    type IntoIter = std::slice::Iter<'a, RaySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
