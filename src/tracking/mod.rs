//! Tracking: pose intake and the velocity / facing filters.
//!
//! - Pose samples pushed by the motion-tracking service (`sample`, `pose_slot`)
//! - Throttled planar velocity (`velocity`)
//! - Facing rotation with freeze support (`look_rotation`)

pub mod look_rotation;
pub mod pose_slot;
pub mod sample;
pub mod state;
pub mod velocity;

pub use look_rotation::LookRotationTracker;
pub use pose_slot::{PoseListener, PoseSlot};
pub use sample::{CoordinateFrame, PoseSample, PoseStatus, RawPose};
pub use state::TrackingState;
pub use velocity::VelocityEstimator;
