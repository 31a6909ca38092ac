pub mod pose_log;

pub use pose_log::{PoseLogEntry, TickWriter, load_pose_log, read_pose_log};
