//! Client-side control layer for an interactive object-placement tool.
//!
//! The controller owns three things:
//! - which interaction [`mode::Mode`] is active (`None`, `Place`, `Delete`),
//! - how raw input becomes mode-specific intents ([`input`]),
//! - a reversible history of committed placements and removals
//!   ([`history`]) that is replayed through the authoritative executor
//!   ([`bridge`]).
//!
//! Geometry, previews, picking and the executor's own validation live
//! outside this crate and talk to it through resources and events.

use bevy::prelude::*;

pub mod bridge;
pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod input;
pub mod keybindings;
pub mod mode;
pub mod objects;
pub mod presentation;
pub mod ring_log;
pub mod templates;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

pub use config::ControllerConfig;
pub use error::{ControllerError, ExecutorError};
pub use history::{BuildAction, CommandHistory};
pub use input::{ControllerInput, InputAction};
pub use mode::{Mode, ModeMachine};
pub use objects::{ObjectRef, PlacedObject};

/// Ordering of the controller's per-frame work. Each input event is fully
/// routed before any executor response is resolved in the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    /// Device capture, hotkey index rebuild, deletion targeting.
    Capture,
    /// Intent routing into the mode machine, history and bridge.
    Route,
    /// Reserved for the authoritative executor (local or remote adapter).
    Execute,
    /// Executor responses are applied to history.
    Resolve,
    /// Status decay and other presentation upkeep.
    Present,
}

/// Registers every controller resource, event and system.
///
/// Insert a [`ControllerConfig`] before adding the plugin to override the
/// defaults; the history capacity and status duration are read at build time.
pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world_mut()
            .get_resource_or_insert_with(ControllerConfig::default)
            .clone();

        app.configure_sets(
            Update,
            (
                ControllerSet::Capture,
                ControllerSet::Route,
                ControllerSet::Execute,
                ControllerSet::Resolve,
                ControllerSet::Present,
            )
                .chain(),
        );

        app.insert_resource(CommandHistory::with_capacity(config.history_capacity))
            .insert_resource(presentation::StatusMessage::with_duration(
                config.status_duration_secs,
            ));

        app.add_plugins((
            keybindings::KeyBindingsPlugin,
            templates::TemplatesPlugin,
            presentation::PresentationPlugin,
            mode::ModePlugin,
            bridge::BridgePlugin,
            input::ControllerInputPlugin,
        ));
    }
}
