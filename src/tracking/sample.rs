//! Pose samples as delivered by the motion-tracking service.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::Deserialize;

/// Coordinate frames the tracking service can report poses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateFrame {
    /// Origin where the service was started.
    StartOfService,
    /// Origin of a previously learned area.
    AreaDescription,
    /// The device itself.
    Device,
}

/// Status reported with each raw pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoseStatus {
    Initializing,
    Valid,
    Invalid,
    Unknown,
}

/// Raw pose callback payload.
#[derive(Debug, Clone, Copy)]
pub struct RawPose {
    pub timestamp_s: f64,
    pub base_frame: CoordinateFrame,
    pub target_frame: CoordinateFrame,
    pub status: PoseStatus,
    /// Translation of `target_frame` in `base_frame` (meters).
    pub translation: [f64; 3],
    /// Orientation quaternion as (x, y, z, w).
    pub orientation: [f64; 4],
}

impl RawPose {
    /// Device pose relative to the start of service.
    pub fn device_in_service(
        timestamp_s: f64,
        status: PoseStatus,
        translation: [f64; 3],
        orientation: [f64; 4],
    ) -> Self {
        Self {
            timestamp_s,
            base_frame: CoordinateFrame::StartOfService,
            target_frame: CoordinateFrame::Device,
            status,
            translation,
            orientation,
        }
    }

    /// Whether this pose describes the device relative to the start of service.
    pub fn is_device_in_service(&self) -> bool {
        self.base_frame == CoordinateFrame::StartOfService
            && self.target_frame == CoordinateFrame::Device
    }
}

/// Single pose reading in the Service frame.
///
/// Lost tracking is not an error channel: it is carried as a sample at the
/// origin with identity rotation and `valid == false`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    pub translation: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
    pub valid: bool,
}

impl PoseSample {
    pub fn new(translation: Vector3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self {
            translation,
            rotation,
            valid: true,
        }
    }

    /// Sentinel sample for lost tracking.
    pub fn lost() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            valid: false,
        }
    }

    /// Convert a raw payload. Statuses other than `Valid` give the sentinel.
    ///
    /// The orientation is taken as-is, without renormalization.
    pub fn from_raw(raw: &RawPose) -> Self {
        if raw.status != PoseStatus::Valid {
            return Self::lost();
        }

        let [x, y, z, w] = raw.orientation;
        Self::new(
            Vector3::from(raw.translation),
            UnitQuaternion::new_unchecked(Quaternion::new(w, x, y, z)),
        )
    }
}

impl Default for PoseSample {
    fn default() -> Self {
        Self::lost()
    }
}
