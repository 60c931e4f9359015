//! Uniform request/response wrapper around the authoritative executor.

pub mod pending;
pub mod resolve;
pub mod types;

use bevy::prelude::*;

use crate::ControllerSet;

pub use pending::ActionBridge;
pub use resolve::{expire_pending_action, resolve_executor_responses};
pub use types::{
    ActionPurpose, ActionResultLog, ExecutorOp, ExecutorOutcome, ExecutorRequest, ExecutorResponse,
    PendingAction, Ticket,
};

/// Registers the bridge, its events and the response resolver.
pub struct BridgePlugin;

impl Plugin for BridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionBridge>()
            .init_resource::<ActionResultLog>()
            .add_event::<ExecutorRequest>()
            .add_event::<ExecutorResponse>()
            .add_systems(
                Update,
                (resolve_executor_responses, expire_pending_action)
                    .chain()
                    .in_set(ControllerSet::Resolve),
            );
    }
}
