//! Camera ray generation
//!
//! Rays are produced in world space: origins at the camera centre and unit
//! directions through pixel coordinates. Full frames come back as a
//! [`RayBundle`] laid out `[row, col]`; stochastic training batches as a
//! [`RayBatch`] whose rows carry ground-truth color and mask.

pub mod bounds;
pub mod bundle;
mod generate;
pub mod grid;

pub use bounds::{DepthBounds, near_far_from_sphere};
pub use bundle::{RAY_SAMPLE_WIDTH, RayBatch, RayBundle, RaySample};
pub use grid::{PixelGrid, linspace};
