//! RGBA frame decoding into premultiplied color and occupancy mask

use crate::error::DataError;
use glam::Vec3;
use image::RgbaImage;
use std::path::Path;
use tracing::{debug, warn};

/// A decoded training frame.
///
/// Colors are alpha-premultiplied and normalized to `[0, 1]`; the mask holds
/// `1.0` wherever alpha is non-zero and `0.0` elsewhere. Both are stored
/// row-major (`y * width + x`).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameImage {
    width: u32,
    height: u32,
    colors: Vec<Vec3>,
    mask: Vec<f32>,
}

impl FrameImage {
    /// Build a frame from an 8-bit RGBA raster.
    pub fn from_rgba(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let mut colors = Vec::with_capacity((width * height) as usize);
        let mut mask = Vec::with_capacity((width * height) as usize);

        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = a as f32 / 255.0;
            let rgb = Vec3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
            colors.push(rgb * alpha);
            mask.push(if a > 0 { 1.0 } else { 0.0 });
        }

        Self {
            width,
            height,
            colors,
            mask,
        }
    }

    /// Image dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.colors.len()
    }

    /// Premultiplied color at pixel `(x, y)`.
    ///
    /// Panics if the pixel lies outside the image.
    pub fn color_at(&self, x: u32, y: u32) -> Vec3 {
        self.colors[self.offset(x, y)]
    }

    /// Mask value at pixel `(x, y)`, either `0.0` or `1.0`.
    ///
    /// Panics if the pixel lies outside the image.
    pub fn mask_at(&self, x: u32, y: u32) -> f32 {
        self.mask[self.offset(x, y)]
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn mask(&self) -> &[f32] {
        &self.mask
    }

    /// Fraction of pixels covered by the mask.
    pub fn coverage(&self) -> f32 {
        if self.mask.is_empty() {
            return 0.0;
        }
        self.mask.iter().sum::<f32>() / self.mask.len() as f32
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }
}

/// Decode an image file, keeping its alpha channel.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn decode_frame_image(path: &Path) -> Result<FrameImage, DataError> {
    let image = image::open(path).map_err(|source| DataError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    let frame = FrameImage::from_rgba(&image.to_rgba8());

    debug!(
        "Decoded {}x{} frame, coverage {:.3}",
        frame.width,
        frame.height,
        frame.coverage()
    );
    if frame.coverage() == 0.0 {
        warn!("Frame has an empty alpha channel: {}", path.display());
    }
    Ok(frame)
}
