//! Latest-pose slot fed by the tracking service callback.
//!
//! The service pushes poses from its own thread; the controller reads the
//! most recent sample once per tick. Poses for other frame pairs are
//! ignored and leave the slot untouched.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, trace, warn};

use crate::tracking::TrackingState;
use crate::tracking::sample::{PoseSample, RawPose};

/// Receiver of pose callbacks.
pub trait PoseListener: Send + Sync {
    fn on_pose_available(&self, pose: &RawPose);
}

struct SlotInner {
    sample: PoseSample,
    state: TrackingState,
    received: u64,
}

/// Holds the most recent device pose.
///
/// Starts with the lost-tracking sentinel so a tick before the first
/// callback sees no motion and neutral facing.
pub struct PoseSlot {
    inner: Mutex<SlotInner>,
}

impl PoseSlot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(SlotInner {
                sample: PoseSample::lost(),
                state: TrackingState::default(),
                received: 0,
            }),
        })
    }

    /// Most recent sample.
    pub fn latest(&self) -> PoseSample {
        self.inner.lock().sample
    }

    pub fn state(&self) -> TrackingState {
        self.inner.lock().state
    }

    /// Number of accepted device poses.
    pub fn received(&self) -> u64 {
        self.inner.lock().received
    }
}

impl PoseListener for PoseSlot {
    fn on_pose_available(&self, pose: &RawPose) {
        if !pose.is_device_in_service() {
            trace!(
                base = ?pose.base_frame,
                target = ?pose.target_frame,
                "ignoring pose for other frame pair"
            );
            return;
        }

        let sample = PoseSample::from_raw(pose);
        let state = TrackingState::from_validity(sample.valid);

        let mut inner = self.inner.lock();
        if inner.state != state {
            match state {
                TrackingState::Lost => warn!(
                    timestamp_s = pose.timestamp_s,
                    status = ?pose.status,
                    "motion tracking lost"
                ),
                _ => info!(timestamp_s = pose.timestamp_s, "motion tracking acquired"),
            }
        }
        inner.sample = sample;
        inner.state = state;
        inner.received += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::sample::{CoordinateFrame, PoseStatus};
    use nalgebra::{UnitQuaternion, Vector3};

    fn valid_pose(translation: [f64; 3]) -> RawPose {
        RawPose::device_in_service(0.0, PoseStatus::Valid, translation, [0.0, 0.0, 0.0, 1.0])
    }

    #[test]
    fn test_starts_with_sentinel() {
        let slot = PoseSlot::new();

        assert_eq!(slot.latest(), PoseSample::lost());
        assert_eq!(slot.state(), TrackingState::Waiting);
        assert_eq!(slot.received(), 0);
    }

    #[test]
    fn test_accepts_device_in_service() {
        let slot = PoseSlot::new();
        slot.on_pose_available(&valid_pose([1.0, 2.0, 3.0]));

        let sample = slot.latest();
        assert!(sample.valid);
        assert_eq!(sample.translation, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(slot.state(), TrackingState::Tracking);
        assert_eq!(slot.received(), 1);
    }

    #[test]
    fn test_ignores_other_frame_pairs() {
        let slot = PoseSlot::new();
        slot.on_pose_available(&valid_pose([1.0, 2.0, 3.0]));

        let mut other = valid_pose([9.0, 9.0, 9.0]);
        other.base_frame = CoordinateFrame::AreaDescription;
        slot.on_pose_available(&other);

        assert_eq!(slot.latest().translation, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(slot.received(), 1);
    }

    #[test]
    fn test_lost_tracking_resets_to_origin() {
        let slot = PoseSlot::new();
        slot.on_pose_available(&valid_pose([1.0, 2.0, 3.0]));
        slot.on_pose_available(&RawPose::device_in_service(
            0.1,
            PoseStatus::Invalid,
            [1.0, 2.0, 3.0],
            [0.3, 0.3, 0.3, 0.3],
        ));

        let sample = slot.latest();
        assert!(!sample.valid);
        assert_eq!(sample.translation, Vector3::zeros());
        assert_eq!(sample.rotation, UnitQuaternion::identity());
        assert_eq!(slot.state(), TrackingState::Lost);
    }

    #[test]
    fn test_callbacks_from_another_thread() {
        let slot = PoseSlot::new();
        let listener: Arc<dyn PoseListener> = slot.clone();

        std::thread::spawn(move || {
            for i in 0..10 {
                listener.on_pose_available(&valid_pose([i as f64, 0.0, 0.0]));
            }
        })
        .join()
        .unwrap();

        assert_eq!(slot.received(), 10);
        assert_eq!(slot.latest().translation, Vector3::new(9.0, 0.0, 0.0));
    }
}
