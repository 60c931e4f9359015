//! Presentation-facing state: the status line, inventory visibility and grid
//! snap flag. The UI layer reads these; it never writes mode state directly.

use bevy::prelude::*;

use crate::ControllerSet;

/// Status message shown briefly on screen.
#[derive(Resource, Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub timer: f32,
    pub is_error: bool,
    duration: f32,
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::with_duration(3.0)
    }
}

impl StatusMessage {
    pub fn with_duration(duration: f32) -> Self {
        Self {
            text: String::new(),
            timer: 0.0,
            is_error: false,
            duration,
        }
    }

    pub fn set(&mut self, text: impl Into<String>, is_error: bool) {
        self.text = text.into();
        self.timer = self.duration;
        self.is_error = is_error;
    }

    pub fn active(&self) -> bool {
        self.timer > 0.0
    }
}

/// Whether the template inventory panel is open. Numeric hotkeys only work
/// while it is.
#[derive(Resource, Debug, Default)]
pub struct InventoryState {
    pub visible: bool,
}

/// Grid snap mode. The snapping itself happens in the placement-transform
/// collaborator; the controller only owns the toggle.
#[derive(Resource, Debug, Default)]
pub struct GridSnap {
    pub enabled: bool,
}

pub fn tick_status_message(time: Res<Time>, mut status: ResMut<StatusMessage>) {
    if status.timer > 0.0 {
        status.timer -= time.delta_secs();
    }
}

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StatusMessage>()
            .init_resource::<InventoryState>()
            .init_resource::<GridSnap>()
            .add_systems(Update, tick_status_message.in_set(ControllerSet::Present));
    }
}
