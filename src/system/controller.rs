//! Pose controller: one tick per host frame.
//!
//! ```text
//! PoseSample ──► transform ──► TransformedPose ─┬─► VelocityEstimator ──► velocity
//!                                               └─► LookRotationTracker ─► facing
//! ```
//!
//! `tick` takes every external input as a parameter. `update` is the host
//! entry point: it reads the latest sample from the pose slot and the
//! injected toggles, then ticks.

use std::sync::Arc;

use nalgebra::{UnitQuaternion, Vector3};
use tracing::{info, trace};

use crate::config::ControllerConfig;
use crate::geometry::transform_sample;
use crate::system::toggles::Toggles;
use crate::tracking::{LookRotationTracker, PoseListener, PoseSample, PoseSlot, VelocityEstimator};

/// What the host applies after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Velocity for the rigid body (y is always 0).
    pub velocity: Vector3<f64>,
    /// Orientation for the controlled object.
    pub facing: UnitQuaternion<f64>,
}

/// Owns the filters and the collaborators resolved at setup.
pub struct PoseController {
    velocity: VelocityEstimator,
    look: LookRotationTracker,
    poses: Arc<PoseSlot>,
    toggles: Toggles,
    tick_count: u64,
}

impl PoseController {
    /// Build a controller. Present toggles are switched off.
    pub fn new(config: &ControllerConfig, poses: Arc<PoseSlot>, toggles: Toggles) -> Self {
        toggles.reset();

        info!(
            speed = config.speed,
            movement_scale = config.movement_scale,
            sample_interval = config.sample_interval,
            apply_reference_offset = config.apply_reference_offset,
            movement_toggle = toggles.has_movement(),
            rotation_toggle = toggles.has_rotation(),
            "pose controller ready"
        );

        Self {
            velocity: VelocityEstimator::from_config(config),
            look: LookRotationTracker::new(config.apply_reference_offset),
            poses,
            toggles,
            tick_count: 0,
        }
    }

    /// Controller with its own pose slot and no toggles.
    pub fn standalone(config: &ControllerConfig) -> Self {
        Self::new(config, PoseSlot::new(), Toggles::none())
    }

    /// Fold one pose sample and the toggle states into the filters.
    pub fn tick(
        &mut self,
        sample: &PoseSample,
        movement_frozen: bool,
        rotation_frozen: bool,
    ) -> TickOutput {
        let pose = transform_sample(sample);

        let velocity = self.velocity.update(&pose.position, movement_frozen);
        let facing = self
            .look
            .update(&pose.forward_axis, &pose.up_axis, rotation_frozen);

        self.tick_count += 1;
        trace!(
            tick = self.tick_count,
            valid = sample.valid,
            movement_frozen,
            rotation_frozen,
            vx = velocity.x,
            vz = velocity.z,
            "tick"
        );

        TickOutput { velocity, facing }
    }

    /// Tick with the latest pose and the current toggle states.
    pub fn update(&mut self) -> TickOutput {
        let sample = self.poses.latest();
        let movement_frozen = self.toggles.movement_frozen();
        let rotation_frozen = self.toggles.rotation_frozen();
        self.tick(&sample, movement_frozen, rotation_frozen)
    }

    /// Listener to register with the tracking service.
    pub fn pose_listener(&self) -> Arc<dyn PoseListener> {
        self.poses.clone()
    }

    pub fn pose_slot(&self) -> &Arc<PoseSlot> {
        &self.poses
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn velocity_estimator(&self) -> &VelocityEstimator {
        &self.velocity
    }

    pub fn look_tracker(&self) -> &LookRotationTracker {
        &self.look
    }
}
