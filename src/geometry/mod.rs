//! Geometry utilities: frame conversions and look rotations.

pub mod frames;
pub mod rotation;

pub use frames::{TransformedPose, transform, transform_sample};
pub use rotation::look_rotation;
