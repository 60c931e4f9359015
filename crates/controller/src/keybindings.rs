//! Configurable keyboard shortcuts for the controller.
//!
//! Systems read from [`KeyBindings`] instead of hardcoding `KeyCode` values.
//! Numeric hotkeys are not rebindable: they always follow `Digit1..Digit9`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::input::InputAction;
use crate::mode::RotationDirection;
use crate::ControllerSet;

// =============================================================================
// Bindable Action enum
// =============================================================================

/// Every controller action that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindableAction {
    ToggleInventory,
    ToggleGridSnap,
    ToggleDeleteMode,
    Undo,
    Redo,
    RedoAlt,
    RotateClockwise,
    RotateCounterClockwise,
    CycleAxis,
    CancelSession,
    ExitMode,
}

impl BindableAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::ToggleInventory => "Toggle Inventory",
            Self::ToggleGridSnap => "Toggle Grid Snap",
            Self::ToggleDeleteMode => "Toggle Delete Mode",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::RedoAlt => "Redo (alternate)",
            Self::RotateClockwise => "Rotate Clockwise",
            Self::RotateCounterClockwise => "Rotate Counter-Clockwise",
            Self::CycleAxis => "Cycle Rotation Axis",
            Self::CancelSession => "Cancel Placement",
            Self::ExitMode => "Exit Mode",
        }
    }

    /// Category for grouping in a settings screen.
    pub fn category(self) -> &'static str {
        match self {
            Self::ToggleInventory | Self::ToggleGridSnap => "Panels",
            Self::ToggleDeleteMode | Self::ExitMode => "Modes",
            Self::Undo | Self::Redo | Self::RedoAlt => "History",
            Self::RotateClockwise
            | Self::RotateCounterClockwise
            | Self::CycleAxis
            | Self::CancelSession => "Placement",
        }
    }

    /// The intent a press of this binding produces.
    pub fn intent(self) -> InputAction {
        match self {
            Self::ToggleInventory => InputAction::ToggleInventory,
            Self::ToggleGridSnap => InputAction::ToggleGridSnap,
            Self::ToggleDeleteMode => InputAction::ToggleDeleteMode,
            Self::Undo => InputAction::Undo,
            Self::Redo | Self::RedoAlt => InputAction::Redo,
            Self::RotateClockwise => InputAction::Rotate(RotationDirection::Clockwise),
            Self::RotateCounterClockwise => {
                InputAction::Rotate(RotationDirection::CounterClockwise)
            }
            Self::CycleAxis => InputAction::CycleAxis,
            Self::CancelSession => InputAction::CancelSession,
            Self::ExitMode => InputAction::Exit,
        }
    }

    /// All bindable actions in display order.
    pub const ALL: &'static [BindableAction] = &[
        Self::ToggleInventory,
        Self::ToggleGridSnap,
        Self::ToggleDeleteMode,
        Self::Undo,
        Self::Redo,
        Self::RedoAlt,
        Self::RotateClockwise,
        Self::RotateCounterClockwise,
        Self::CycleAxis,
        Self::CancelSession,
        Self::ExitMode,
    ];
}

// =============================================================================
// Key binding definition
// =============================================================================

/// A single key binding: a key code plus modifier flags. Modifiers must match
/// exactly, so `Ctrl+Z` and `Ctrl+Shift+Z` never fire together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: KeyCode,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyBinding {
    pub const fn simple(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub const fn ctrl(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
        }
    }

    pub const fn ctrl_shift(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: true,
            shift: true,
        }
    }

    /// True on the frame the key goes down with exactly this modifier state.
    pub fn just_pressed(self, keys: &ButtonInput<KeyCode>) -> bool {
        if !keys.just_pressed(self.key) {
            return false;
        }
        let ctrl_held = keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight);
        let shift_held = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
        ctrl_held == self.ctrl && shift_held == self.shift
    }

    /// Human-readable label (e.g. "Ctrl+Z", "Ctrl+Shift+Z", "Esc").
    pub fn display_label(self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(keycode_label(self.key));
        parts.join("+")
    }
}

// =============================================================================
// KeyBindings resource
// =============================================================================

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub toggle_inventory: KeyBinding,
    pub toggle_grid_snap: KeyBinding,
    pub toggle_delete_mode: KeyBinding,
    pub undo: KeyBinding,
    pub redo: KeyBinding,
    pub redo_alt: KeyBinding,
    pub rotate_clockwise: KeyBinding,
    pub rotate_counter_clockwise: KeyBinding,
    pub cycle_axis: KeyBinding,
    pub cancel_session: KeyBinding,
    pub exit_mode: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_inventory: KeyBinding::simple(KeyCode::KeyB),
            toggle_grid_snap: KeyBinding::simple(KeyCode::KeyG),
            toggle_delete_mode: KeyBinding::simple(KeyCode::KeyX),
            undo: KeyBinding::ctrl(KeyCode::KeyZ),
            redo: KeyBinding::ctrl(KeyCode::KeyY),
            redo_alt: KeyBinding::ctrl_shift(KeyCode::KeyZ),
            rotate_clockwise: KeyBinding::simple(KeyCode::KeyE),
            rotate_counter_clockwise: KeyBinding::simple(KeyCode::KeyQ),
            cycle_axis: KeyBinding::simple(KeyCode::KeyT),
            cancel_session: KeyBinding::simple(KeyCode::KeyC),
            exit_mode: KeyBinding::simple(KeyCode::Escape),
        }
    }
}

impl KeyBindings {
    pub fn get(&self, action: BindableAction) -> KeyBinding {
        match action {
            BindableAction::ToggleInventory => self.toggle_inventory,
            BindableAction::ToggleGridSnap => self.toggle_grid_snap,
            BindableAction::ToggleDeleteMode => self.toggle_delete_mode,
            BindableAction::Undo => self.undo,
            BindableAction::Redo => self.redo,
            BindableAction::RedoAlt => self.redo_alt,
            BindableAction::RotateClockwise => self.rotate_clockwise,
            BindableAction::RotateCounterClockwise => self.rotate_counter_clockwise,
            BindableAction::CycleAxis => self.cycle_axis,
            BindableAction::CancelSession => self.cancel_session,
            BindableAction::ExitMode => self.exit_mode,
        }
    }

    pub fn set(&mut self, action: BindableAction, binding: KeyBinding) {
        match action {
            BindableAction::ToggleInventory => self.toggle_inventory = binding,
            BindableAction::ToggleGridSnap => self.toggle_grid_snap = binding,
            BindableAction::ToggleDeleteMode => self.toggle_delete_mode = binding,
            BindableAction::Undo => self.undo = binding,
            BindableAction::Redo => self.redo = binding,
            BindableAction::RedoAlt => self.redo_alt = binding,
            BindableAction::RotateClockwise => self.rotate_clockwise = binding,
            BindableAction::RotateCounterClockwise => self.rotate_counter_clockwise = binding,
            BindableAction::CycleAxis => self.cycle_axis = binding,
            BindableAction::CancelSession => self.cancel_session = binding,
            BindableAction::ExitMode => self.exit_mode = binding,
        }
    }

    /// Pairs of actions sharing the same binding. Every controller binding is
    /// live at once, so conflicts are checked across categories, and a
    /// binding on a digit key shadows a hotkey slot.
    pub fn find_conflicts(&self) -> Vec<(BindableAction, BindableAction)> {
        let mut conflicts = Vec::new();
        let all = BindableAction::ALL;
        for (i, &a) in all.iter().enumerate() {
            for &b in &all[i + 1..] {
                if self.get(a) == self.get(b) {
                    conflicts.push((a, b));
                }
            }
        }
        conflicts
    }

    /// Actions whose plain binding collides with a numeric hotkey.
    pub fn hotkey_collisions(&self) -> Vec<BindableAction> {
        BindableAction::ALL
            .iter()
            .copied()
            .filter(|&action| {
                let binding = self.get(action);
                !binding.ctrl && !binding.shift && hotkey_slot(binding.key).is_some()
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse persisted bindings. Missing actions keep their defaults; a
    /// malformed document falls back to the defaults entirely.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(bindings) => bindings,
            Err(e) => {
                warn!(
                    "KeyBindings: failed to parse {} bytes, falling back to default: {}",
                    json.len(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// Hotkey slot (`1..=9`) for a digit key.
pub fn hotkey_slot(key: KeyCode) -> Option<u8> {
    match key {
        KeyCode::Digit1 => Some(1),
        KeyCode::Digit2 => Some(2),
        KeyCode::Digit3 => Some(3),
        KeyCode::Digit4 => Some(4),
        KeyCode::Digit5 => Some(5),
        KeyCode::Digit6 => Some(6),
        KeyCode::Digit7 => Some(7),
        KeyCode::Digit8 => Some(8),
        KeyCode::Digit9 => Some(9),
        _ => None,
    }
}

// =============================================================================
// Rebinding
// =============================================================================

/// Tracks which action (if any) is waiting for a new key assignment.
/// While one is, keyboard input is not routed as controller intents.
#[derive(Resource, Default)]
pub struct RebindState {
    pub awaiting: Option<BindableAction>,
}

pub struct KeyBindingsPlugin;

impl Plugin for KeyBindingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<RebindState>()
            .add_systems(
                Update,
                capture_rebind_input
                    .in_set(ControllerSet::Capture)
                    .after(crate::input::capture_device_input),
            );
    }
}

/// Assign the next non-modifier key press to the action awaiting a rebind.
/// No-ops when `ButtonInput<KeyCode>` is absent (headless apps).
fn capture_rebind_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut bindings: ResMut<KeyBindings>,
    mut rebind: ResMut<RebindState>,
) {
    let Some(keys) = keys else {
        return;
    };
    let Some(action) = rebind.awaiting else {
        return;
    };

    for key in keys.get_just_pressed() {
        if matches!(
            key,
            KeyCode::ControlLeft
                | KeyCode::ControlRight
                | KeyCode::ShiftLeft
                | KeyCode::ShiftRight
                | KeyCode::AltLeft
                | KeyCode::AltRight
                | KeyCode::SuperLeft
                | KeyCode::SuperRight
        ) {
            continue;
        }

        let ctrl = keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight);
        let shift = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
        let binding = KeyBinding {
            key: *key,
            ctrl,
            shift,
        };
        info!("Rebound {} to {}", action.label(), binding.display_label());
        bindings.set(action, binding);
        rebind.awaiting = None;
        return;
    }
}

pub fn keycode_label(key: KeyCode) -> &'static str {
    match key {
        KeyCode::KeyA => "A",
        KeyCode::KeyB => "B",
        KeyCode::KeyC => "C",
        KeyCode::KeyD => "D",
        KeyCode::KeyE => "E",
        KeyCode::KeyF => "F",
        KeyCode::KeyG => "G",
        KeyCode::KeyH => "H",
        KeyCode::KeyI => "I",
        KeyCode::KeyJ => "J",
        KeyCode::KeyK => "K",
        KeyCode::KeyL => "L",
        KeyCode::KeyM => "M",
        KeyCode::KeyN => "N",
        KeyCode::KeyO => "O",
        KeyCode::KeyP => "P",
        KeyCode::KeyQ => "Q",
        KeyCode::KeyR => "R",
        KeyCode::KeyS => "S",
        KeyCode::KeyT => "T",
        KeyCode::KeyU => "U",
        KeyCode::KeyV => "V",
        KeyCode::KeyW => "W",
        KeyCode::KeyX => "X",
        KeyCode::KeyY => "Y",
        KeyCode::KeyZ => "Z",
        KeyCode::Digit0 => "0",
        KeyCode::Digit1 => "1",
        KeyCode::Digit2 => "2",
        KeyCode::Digit3 => "3",
        KeyCode::Digit4 => "4",
        KeyCode::Digit5 => "5",
        KeyCode::Digit6 => "6",
        KeyCode::Digit7 => "7",
        KeyCode::Digit8 => "8",
        KeyCode::Digit9 => "9",
        KeyCode::Escape => "Esc",
        KeyCode::Space => "Space",
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::ArrowUp => "Up",
        KeyCode::ArrowDown => "Down",
        KeyCode::ArrowLeft => "Left",
        KeyCode::ArrowRight => "Right",
        _ => "???",
    }
}
