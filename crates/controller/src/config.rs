use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of numeric hotkey slots (`1`..`9`). Templates past the ninth are
/// reachable through the inventory only.
pub const HOTKEY_SLOTS: usize = 9;

/// Maximum number of commands kept in the undo stack by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Roughly five seconds at 60 FPS.
pub const DEFAULT_EXECUTOR_TIMEOUT_FRAMES: u32 = 300;

/// Tunables for the controller. Every field has a default, so a JSON document
/// only needs to name the values it overrides.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Undo entries kept before the oldest is dropped.
    pub history_capacity: usize,
    /// Angle applied by one rotate step (key press or long-press).
    pub rotation_step_degrees: f32,
    /// How long a touch must be held before it counts as a long-press.
    pub long_press_secs: f32,
    /// Maximum pointer travel, in logical pixels, for a touch to stay a tap.
    pub tap_max_travel: f32,
    /// How long a status message stays visible.
    pub status_duration_secs: f32,
    /// Frames to wait for an executor response before the request is
    /// abandoned and new actions are accepted again. Zero waits forever.
    pub executor_timeout_frames: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            rotation_step_degrees: 90.0,
            long_press_secs: 0.5,
            tap_max_travel: 12.0,
            status_duration_secs: 3.0,
            executor_timeout_frames: DEFAULT_EXECUTOR_TIMEOUT_FRAMES,
        }
    }
}

impl ControllerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn rotation_step_radians(&self) -> f32 {
        self.rotation_step_degrees.to_radians()
    }
}
