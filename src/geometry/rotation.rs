//! Look rotation construction.
//!
//! Builds the orientation of an observer at the origin looking along a
//! forward axis, with the up axis resolving roll:
//!
//! ```text
//! z = normalize(forward)
//! x = normalize(up × z)
//! y = z × x
//! R = [x | y | z]
//! ```

use std::f64::consts::PI;

use nalgebra::{UnitQuaternion, Vector3};

/// Length below which an axis is treated as zero.
const DEGENERATE_AXIS_THRESHOLD: f64 = 1e-6;

/// Rotation mapping local +Z onto `forward` and local +Y towards `up`.
///
/// Degenerate inputs never produce NaN:
/// - zero `forward` gives the identity;
/// - `up` zero or parallel to `forward` falls back to the shortest arc
///   from +Z to `forward`.
pub fn look_rotation(forward: &Vector3<f64>, up: &Vector3<f64>) -> UnitQuaternion<f64> {
    if forward.norm() < DEGENERATE_AXIS_THRESHOLD {
        return UnitQuaternion::identity();
    }

    if up.cross(forward).norm() < DEGENERATE_AXIS_THRESHOLD * forward.norm() {
        return shortest_arc_from_z(forward);
    }

    UnitQuaternion::face_towards(forward, up)
}

/// Shortest rotation carrying +Z onto `dir`.
fn shortest_arc_from_z(dir: &Vector3<f64>) -> UnitQuaternion<f64> {
    // `rotation_between` has no unique answer for opposite vectors.
    UnitQuaternion::rotation_between(&Vector3::z(), dir)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI))
}
