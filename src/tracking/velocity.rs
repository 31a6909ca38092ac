//! Throttled planar velocity from tracked positions.

use nalgebra::{Vector2, Vector3};
use tracing::debug;

use crate::config::ControllerConfig;

/// Scale applied to planar displacement before `speed` is added.
pub const DEFAULT_MOVEMENT_SCALE: f64 = 5.0;

/// Number of updates per displacement window.
///
/// Tracked motion between two consecutive samples is too small to drive a
/// velocity, so displacement is measured over whole windows.
pub const DEFAULT_SAMPLE_INTERVAL: usize = 5;

/// Planar (x, z) velocity estimator.
///
/// The velocity is a step function: it changes once every
/// `sample_interval` non-frozen updates and is held in between. While
/// movement is frozen the reference position keeps following the tracked
/// position, so resuming never produces a jump.
pub struct VelocityEstimator {
    /// Planar position (x, z) at the start of the current window.
    /// None until the first update.
    previous_planar: Option<Vector2<f64>>,
    /// Non-frozen updates since the last window closed.
    sample_counter: usize,
    sample_interval: usize,
    movement_scale: f64,
    /// Added to `movement_scale`, not multiplied.
    speed: f64,
    /// Whether a frozen update zeroes the held velocity.
    zero_on_freeze: bool,
    /// Last returned velocity.
    velocity: Vector3<f64>,
}

impl VelocityEstimator {
    pub fn new(speed: f64) -> Self {
        Self {
            previous_planar: None,
            sample_counter: 0,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            movement_scale: DEFAULT_MOVEMENT_SCALE,
            speed,
            zero_on_freeze: true,
            velocity: Vector3::zeros(),
        }
    }

    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            sample_interval: config.sample_interval,
            movement_scale: config.movement_scale,
            zero_on_freeze: config.zero_velocity_on_freeze,
            ..Self::new(config.speed)
        }
    }

    /// Fold one transformed position into the estimator.
    ///
    /// Returns the velocity to apply this tick; its y component is always 0.
    pub fn update(&mut self, position: &Vector3<f64>, movement_frozen: bool) -> Vector3<f64> {
        let planar = Vector2::new(position.x, position.z);
        let previous = *self.previous_planar.get_or_insert(planar);

        if movement_frozen {
            self.previous_planar = Some(planar);
            if self.zero_on_freeze {
                self.velocity = Vector3::zeros();
            }
            return self.velocity;
        }

        self.sample_counter += 1;
        if self.sample_counter >= self.sample_interval {
            let diff = planar - previous;
            self.velocity = Vector3::new(diff.x, 0.0, diff.y) * self.effective_scale();
            self.previous_planar = Some(planar);
            self.sample_counter = 0;

            debug!(
                dx = diff.x,
                dz = diff.y,
                vx = self.velocity.x,
                vz = self.velocity.z,
                "velocity window closed"
            );
        }

        self.velocity
    }

    /// Multiplier applied to planar displacement.
    pub fn effective_scale(&self) -> f64 {
        self.movement_scale + self.speed
    }

    /// Last returned velocity.
    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    pub fn sample_counter(&self) -> usize {
        self.sample_counter
    }

    pub fn previous_planar_position(&self) -> Option<Vector2<f64>> {
        self.previous_planar
    }

    /// Reset the estimator, keeping its parameters.
    pub fn reset(&mut self) {
        self.previous_planar = None;
        self.sample_counter = 0;
        self.velocity = Vector3::zeros();
    }
}

impl Default for VelocityEstimator {
    fn default() -> Self {
        Self::new(0.0)
    }
}
