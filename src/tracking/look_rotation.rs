//! Facing rotation from the tracked camera axes.

use nalgebra::{UnitQuaternion, Vector3};
use tracing::debug;

use crate::geometry::look_rotation;

/// Facing filter with a freeze toggle.
///
/// While unfrozen the output follows the look rotation of the tracked axes.
/// On the first frozen update the current look rotation is captured as the
/// reference; the output is held until the toggle is released.
///
/// With `apply_reference_offset`, unfrozen output is expressed relative to
/// the captured reference (`reference⁻¹ · look`), so facing resumes from
/// where the freeze started instead of snapping to the tracked heading.
pub struct LookRotationTracker {
    apply_reference_offset: bool,
    /// Look rotation captured at the start of the last freeze.
    reference: UnitQuaternion<f64>,
    reference_captured: bool,
    /// Last returned facing.
    facing: UnitQuaternion<f64>,
}

impl LookRotationTracker {
    pub fn new(apply_reference_offset: bool) -> Self {
        Self {
            apply_reference_offset,
            reference: UnitQuaternion::identity(),
            reference_captured: false,
            facing: UnitQuaternion::identity(),
        }
    }

    /// Fold one pair of camera axes into the tracker and return the facing.
    pub fn update(
        &mut self,
        forward: &Vector3<f64>,
        up: &Vector3<f64>,
        rotation_frozen: bool,
    ) -> UnitQuaternion<f64> {
        let look = look_rotation(forward, up);

        if !rotation_frozen {
            self.facing = if self.apply_reference_offset {
                self.reference.inverse() * look
            } else {
                look
            };
            self.reference_captured = false;
        } else if !self.reference_captured {
            self.reference = look;
            self.reference_captured = true;
            if !self.apply_reference_offset {
                self.facing = look;
            }
            debug!(
                angle_deg = look.angle().to_degrees(),
                "captured facing reference"
            );
        }

        self.facing
    }

    /// Last returned facing.
    pub fn facing(&self) -> UnitQuaternion<f64> {
        self.facing
    }

    pub fn reference(&self) -> UnitQuaternion<f64> {
        self.reference
    }

    pub fn reference_captured(&self) -> bool {
        self.reference_captured
    }

    pub fn applies_reference_offset(&self) -> bool {
        self.apply_reference_offset
    }

    /// Forget the captured reference and held facing.
    pub fn reset(&mut self) {
        self.reference = UnitQuaternion::identity();
        self.reference_captured = false;
        self.facing = UnitQuaternion::identity();
    }
}

impl Default for LookRotationTracker {
    fn default() -> Self {
        Self::new(true)
    }
}
