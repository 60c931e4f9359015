use bevy::prelude::*;

use crate::error::ControllerError;
use crate::mode::RotationDirection;
use crate::ring_log::RingLog;

/// A device-independent intent. Keyboard, mouse, touch and UI widgets all
/// produce these; only the router interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    ToggleInventory,
    ToggleGridSnap,
    ToggleDeleteMode,
    Undo,
    Redo,
    /// Numeric hotkey, `1..=9`.
    Hotkey(u8),
    /// Inventory click on a template tile.
    SelectTemplate(String),
    Rotate(RotationDirection),
    CycleAxis,
    CancelSession,
    /// Primary pointer action.
    Commit,
    Tap,
    LongPress,
    Exit,
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ControllerInput {
    pub action: InputAction,
    /// Already consumed by another layer (usually UI). The router drops these.
    pub handled_upstream: bool,
}

impl ControllerInput {
    pub fn new(action: InputAction) -> Self {
        Self {
            action,
            handled_upstream: false,
        }
    }

    pub fn handled(action: InputAction) -> Self {
        Self {
            action,
            handled_upstream: true,
        }
    }
}

impl From<InputAction> for ControllerInput {
    fn from(action: InputAction) -> Self {
        Self::new(action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Handled,
    /// Not applicable in the current state; nothing changed.
    Ignored,
}

/// Set by the UI layer while it owns the keyboard or pointer, e.g. when a
/// text field has focus or the cursor is over a panel. Device input captured
/// during that time is tagged as handled upstream.
#[derive(Resource, Debug, Default)]
pub struct InputCapture {
    pub keyboard: bool,
    pub pointer: bool,
}

pub type RouteResult = Result<RouteOutcome, ControllerError>;

/// Recent intents and how the router handled them.
pub type RouteLog = RingLog<(InputAction, RouteResult)>;
