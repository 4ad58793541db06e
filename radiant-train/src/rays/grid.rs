//! Regular pixel grids for full-frame ray generation

use crate::error::DatasetError;

/// `steps` evenly spaced samples from `start` to `end` inclusive. A single
/// step yields `start`.
pub fn linspace(start: f32, end: f32, steps: usize) -> Vec<f32> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps - 1) as f32;
            (0..steps).map(|i| start + step * i as f32).collect()
        }
    }
}

/// Pixel coordinates sampled at `1 / level` of the full resolution.
///
/// The grid spans `[0, W-1] x [0, H-1]` with `W / level` columns and
/// `H / level` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, level: u32) -> Result<Self, DatasetError> {
        let invalid = DatasetError::InvalidResolution {
            level,
            width,
            height,
        };
        if level == 0 {
            return Err(invalid);
        }
        let cols = width / level;
        let rows = height / level;
        if cols == 0 || rows == 0 {
            return Err(invalid);
        }

        Ok(Self {
            xs: linspace(0.0, (width - 1) as f32, cols as usize),
            ys: linspace(0.0, (height - 1) as f32, rows as usize),
        })
    }

    pub fn rows(&self) -> usize {
        self.ys.len()
    }

    pub fn cols(&self) -> usize {
        self.xs.len()
    }

    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixel coordinates `(x, y)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.ys
            .iter()
            .flat_map(move |&y| self.xs.iter().map(move |&x| (x, y)))
    }
}
