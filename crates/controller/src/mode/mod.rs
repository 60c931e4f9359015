//! Mode state machine and the two mode-owned sessions.

pub mod machine;
pub mod sessions;


use bevy::prelude::*;

use crate::ControllerSet;

pub use machine::{Mode, ModeChanged, ModeMachine};
pub use sessions::{
    update_deletion_target, ActivePlacement, DeletionSession, HoveredObject, PlacementCursor,
    PlacementSession, PreparedPlacement, RotationAxis, RotationDirection, SessionId,
};

pub struct ModePlugin;

impl Plugin for ModePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModeMachine>()
            .init_resource::<PlacementSession>()
            .init_resource::<DeletionSession>()
            .init_resource::<PlacementCursor>()
            .init_resource::<HoveredObject>()
            .add_event::<ModeChanged>()
            .add_systems(Update, update_deletion_target.in_set(ControllerSet::Capture));
    }
}
