//! Camera models for posed datasets
//!
//! Intrinsics are derived analytically from a field of view; extrinsics are
//! camera-to-world matrices in the OpenCV convention (x right, y down,
//! z forward) after [`pose::flip_axes`].

pub mod intrinsics;
pub mod pose;

pub use intrinsics::Intrinsics;
pub use pose::{OPENGL_TO_OPENCV, flip_axes, interpolate_pose, normalize_translations};
