//! Coordinate frame definitions and the pose transform into the world frame.
//!
//! # Overview
//!
//! Poses arrive from the tracking service as `T_service_device`: the device
//! pose expressed in the *start of service* frame. The application consumes
//! them in the world frame, with the camera looking down its local +Z.
//!
//! There are three frames involved:
//!
//! 1. **Service Frame** - where the tracking service reports poses
//! 2. **World Frame** - where the controller applies velocity and facing
//! 3. **Camera Frame** - the device frame with its optical axis flipped
//!
//! ## Service Frame (right-handed, Z-up)
//! ```text
//!        +Z (up)
//!         |
//!         |
//!         +------ +X (right)
//!        /
//!       /
//!      +Y (forward, away from the user)
//! ```
//!
//! ## World Frame (left-handed, Y-up)
//! ```text
//!        +Y (up)
//!         |
//!         |
//!         +------ +X (right)
//!        /
//!       /
//!      +Z (forward)
//! ```
//!
//! # Transformation Pipeline
//!
//! ```text
//! T_world_camera = T_world_service * T_service_device * T_device_camera
//! ```
//!
//! - `T_world_service` swaps the Y and Z axes.
//! - `T_service_device` is the TRS matrix built from the pose sample.
//! - `T_device_camera` negates Z so the camera looks down +Z.
//!
//! Columns of the result are read directly:
//! - column 1: camera up axis in world
//! - column 2: camera forward axis in world
//! - column 3: camera position in world
//!
//! # Transformation Naming Convention
//!
//! As elsewhere in this crate, `T_target_source` maps a point from
//! `source` into `target`:
//! ```text
//! p_world = T_world_service * p_service
//! ```

use nalgebra::{Matrix4, UnitQuaternion, Vector3};

use crate::tracking::PoseSample;

// ============================================================================
// Fixed Basis Changes
// ============================================================================

/// Fixed basis change from the Service frame to the World frame.
///
/// Maps:
/// - Service +X → World +X
/// - Service +Y → World +Z
/// - Service +Z → World +Y
#[rustfmt::skip]
pub fn world_from_service() -> Matrix4<f64> {
    // Columns are where service axes go in world frame.
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Fixed basis change from the Camera frame to the Device frame.
///
/// Negates Z: the device looks down its -Z, the camera down its +Z.
#[rustfmt::skip]
pub fn device_from_camera() -> Matrix4<f64> {
    Matrix4::new(
        1.0, 0.0,  0.0, 0.0,
        0.0, 1.0,  0.0, 0.0,
        0.0, 0.0, -1.0, 0.0,
        0.0, 0.0,  0.0, 1.0,
    )
}

// ============================================================================
// Pose Transform
// ============================================================================

/// Build the homogeneous transform of a scale, then a rotation, then a
/// translation.
pub fn trs(
    translation: &Vector3<f64>,
    rotation: &UnitQuaternion<f64>,
    scale: &Vector3<f64>,
) -> Matrix4<f64> {
    let mut m = rotation.to_homogeneous() * Matrix4::new_nonuniform_scaling(scale);
    m.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
    m
}

/// Transform a service-frame pose into the World frame.
///
/// Returns `T_world_camera = T_world_service * TRS * T_device_camera`.
///
/// A non-unit `rotation` is not renormalized; callers feeding lost-tracking
/// samples pass the identity rotation instead.
pub fn transform(
    translation: &Vector3<f64>,
    rotation: &UnitQuaternion<f64>,
    scale: &Vector3<f64>,
) -> Matrix4<f64> {
    world_from_service() * trs(translation, rotation, scale) * device_from_camera()
}

/// Camera pose in the World frame, reduced to what the filters consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformedPose {
    /// Camera position in world (column 3).
    pub position: Vector3<f64>,
    /// Camera forward axis in world (column 2).
    pub forward_axis: Vector3<f64>,
    /// Camera up axis in world (column 1).
    pub up_axis: Vector3<f64>,
}

impl TransformedPose {
    /// Read position and basis axes out of a `T_world_camera` matrix.
    pub fn from_matrix(t_world_camera: &Matrix4<f64>) -> Self {
        Self {
            position: t_world_camera.fixed_view::<3, 1>(0, 3).into_owned(),
            forward_axis: t_world_camera.fixed_view::<3, 1>(0, 2).into_owned(),
            up_axis: t_world_camera.fixed_view::<3, 1>(0, 1).into_owned(),
        }
    }
}

/// Transform a pose sample with unit scale.
pub fn transform_sample(sample: &PoseSample) -> TransformedPose {
    let t_world_camera = transform(&sample.translation, &sample.rotation, &Vector3::repeat(1.0));
    TransformedPose::from_matrix(&t_world_camera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector4};

    fn sample_rotation() -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(0.3, -0.7, 1.1)
    }

    #[test]
    fn test_world_from_service_swaps_y_and_z() {
        let p = world_from_service() * Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert_relative_eq!(p, Vector4::new(1.0, 3.0, 2.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_identity_pose_is_fixed_product() {
        let m = transform(
            &Vector3::zeros(),
            &UnitQuaternion::identity(),
            &Vector3::repeat(1.0),
        );
        let expected = world_from_service() * device_from_camera();

        assert_relative_eq!(m, expected, epsilon = 1e-12);
        assert_relative_eq!(
            m.column(3).into_owned(),
            Vector4::new(0.0, 0.0, 0.0, 1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_transform_matches_direct_product() {
        let t = Vector3::new(0.4, -1.2, 2.5);
        let q = sample_rotation();

        let direct = world_from_service()
            * Matrix4::new_translation(&t)
            * q.to_homogeneous()
            * device_from_camera();

        assert_relative_eq!(
            transform(&t, &q, &Vector3::repeat(1.0)),
            direct,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_transform_is_rigid() {
        let m = transform(
            &Vector3::new(3.0, 1.0, -2.0),
            &sample_rotation(),
            &Vector3::repeat(1.0),
        );
        let r: Matrix3<f64> = m.fixed_view::<3, 3>(0, 0).into_owned();

        assert_relative_eq!(r.transpose() * r, Matrix3::identity(), epsilon = 1e-5);
        assert_relative_eq!(r.determinant().abs(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(
            m.row(3).into_owned(),
            Matrix4::<f64>::identity().row(3).into_owned(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_trs_applies_scale_before_rotation() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        let m = trs(&Vector3::new(1.0, 0.0, 0.0), &q, &Vector3::new(2.0, 1.0, 1.0));

        // Unit X is scaled to length 2, rotated onto +Y, then translated.
        let p = m * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p, Vector4::new(1.0, 2.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_transform_sample_extracts_columns() {
        let sample = PoseSample::new(Vector3::new(1.0, 0.0, 2.0), UnitQuaternion::identity());
        let pose = transform_sample(&sample);

        // Service Y/Z are swapped into world.
        assert_relative_eq!(pose.position, Vector3::new(1.0, 2.0, 0.0), epsilon = 1e-12);
        // Camera +Z is device -Z, which is service -Z and so world -Y.
        assert_relative_eq!(pose.forward_axis, Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(pose.up_axis, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }
}
