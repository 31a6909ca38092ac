//! Freeze toggles injected into the controller.
//!
//! A toggle that is "on" freezes its filter. Toggles are optional: a
//! controller built without one behaves as if it were off.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Boolean toggle shared with whatever drives it (UI, replay, tests).
pub trait Toggle: Send + Sync {
    fn is_on(&self) -> bool;
    fn set_on(&self, on: bool);
}

impl Toggle for AtomicBool {
    fn is_on(&self) -> bool {
        self.load(Ordering::SeqCst)
    }

    fn set_on(&self, on: bool) {
        self.store(on, Ordering::SeqCst);
    }
}

/// Create a toggle handle that starts off.
pub fn shared_toggle() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}

/// The movement and rotation freeze toggles.
#[derive(Clone, Default)]
pub struct Toggles {
    movement: Option<Arc<dyn Toggle>>,
    rotation: Option<Arc<dyn Toggle>>,
}

impl Toggles {
    pub fn new(movement: Option<Arc<dyn Toggle>>, rotation: Option<Arc<dyn Toggle>>) -> Self {
        Self { movement, rotation }
    }

    /// No toggles: movement and rotation are never frozen.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn movement_frozen(&self) -> bool {
        self.movement.as_ref().is_some_and(|t| t.is_on())
    }

    pub fn rotation_frozen(&self) -> bool {
        self.rotation.as_ref().is_some_and(|t| t.is_on())
    }

    pub fn has_movement(&self) -> bool {
        self.movement.is_some()
    }

    pub fn has_rotation(&self) -> bool {
        self.rotation.is_some()
    }

    /// Switch every present toggle off.
    pub fn reset(&self) {
        for toggle in [&self.movement, &self.rotation].into_iter().flatten() {
            toggle.set_on(false);
        }
    }
}
