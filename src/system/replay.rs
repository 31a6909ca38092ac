//! Deterministic replay of recorded pose logs through a controller.
//!
//! Drives the controller exactly as a host would: deliver the pose
//! callback, set the toggles, then call `update`.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::config::ControllerConfig;
use crate::io::PoseLogEntry;
use crate::system::controller::{PoseController, TickOutput};
use crate::system::toggles::{Toggle, Toggles, shared_toggle};
use crate::tracking::PoseSlot;

pub struct Replay {
    controller: PoseController,
    movement: Arc<AtomicBool>,
    rotation: Arc<AtomicBool>,
}

impl Replay {
    pub fn new(config: &ControllerConfig) -> Self {
        let movement = shared_toggle();
        let rotation = shared_toggle();
        let toggles = Toggles::new(Some(movement.clone()), Some(rotation.clone()));
        Self {
            controller: PoseController::new(config, PoseSlot::new(), toggles),
            movement,
            rotation,
        }
    }

    /// Replay one log row.
    pub fn step(&mut self, entry: &PoseLogEntry) -> TickOutput {
        self.controller.pose_listener().on_pose_available(&entry.pose);
        self.movement.set_on(entry.movement_frozen);
        self.rotation.set_on(entry.rotation_frozen);
        self.controller.update()
    }

    /// Replay a whole log.
    pub fn run(&mut self, entries: &[PoseLogEntry]) -> Vec<TickOutput> {
        entries.iter().map(|e| self.step(e)).collect()
    }

    pub fn controller(&self) -> &PoseController {
        &self.controller
    }
}
