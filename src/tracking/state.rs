//! Tracking state as seen from the pose callbacks.

/// State of the motion-tracking feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// No device pose received yet.
    Waiting,
    /// Receiving valid poses.
    Tracking,
    /// Last pose was not valid; samples fall back to origin/identity.
    Lost,
}

impl TrackingState {
    pub fn from_validity(valid: bool) -> Self {
        if valid { Self::Tracking } else { Self::Lost }
    }
}

impl Default for TrackingState {
    fn default() -> Self {
        Self::Waiting
    }
}
