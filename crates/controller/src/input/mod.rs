//! Input capture and routing.

pub mod capture;
pub mod router;
pub mod touch;
pub mod types;

use bevy::prelude::*;

use crate::ControllerSet;

pub use capture::{capture_device_input, keyboard_actions};
pub use router::{route_input, RouterContext};
pub use touch::{TouchGesture, TouchTracker};
pub use types::{
    ControllerInput, InputAction, InputCapture, RouteLog, RouteOutcome, RouteResult,
};

pub struct ControllerInputPlugin;

impl Plugin for ControllerInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputCapture>()
            .init_resource::<TouchTracker>()
            .init_resource::<RouteLog>()
            .add_event::<ControllerInput>()
            .add_systems(Update, capture_device_input.in_set(ControllerSet::Capture))
            .add_systems(Update, route_input.in_set(ControllerSet::Route));
    }
}
