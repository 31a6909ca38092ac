//! Controller orchestration.
//!
//! `PoseController` owns the filters and the collaborators injected at
//! setup (pose slot, toggles). `Replay` drives it from recorded logs.

pub mod controller;
pub mod replay;
pub mod toggles;

pub use controller::{PoseController, TickOutput};
pub use replay::Replay;
pub use toggles::{Toggle, Toggles, shared_toggle};
