//! Translates raw keyboard, mouse and touch state into [`ControllerInput`]s.

use bevy::input::touch::Touches;
use bevy::prelude::*;

use super::touch::{TouchGesture, TouchTracker};
use super::types::{ControllerInput, InputAction, InputCapture};
use crate::config::ControllerConfig;
use crate::keybindings::{hotkey_slot, BindableAction, KeyBindings, RebindState};

/// Intents produced by this frame's key presses.
pub fn keyboard_actions(keys: &ButtonInput<KeyCode>, bindings: &KeyBindings) -> Vec<InputAction> {
    let mut actions: Vec<InputAction> = Vec::new();
    for &bindable in BindableAction::ALL {
        if bindings.get(bindable).just_pressed(keys) {
            let intent = bindable.intent();
            if !actions.contains(&intent) {
                actions.push(intent);
            }
        }
    }

    let modifier_held = keys.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::ShiftLeft,
        KeyCode::ShiftRight,
    ]);
    if !modifier_held {
        for key in keys.get_just_pressed() {
            if let Some(slot) = hotkey_slot(*key) {
                actions.push(InputAction::Hotkey(slot));
            }
        }
    }
    actions
}

/// Device capture. Every resource is optional so the system no-ops in
/// headless apps without `InputPlugin`.
#[allow(clippy::too_many_arguments)]
pub fn capture_device_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    time: Res<Time>,
    bindings: Res<KeyBindings>,
    rebind: Res<RebindState>,
    capture: Res<InputCapture>,
    config: Res<ControllerConfig>,
    mut tracker: ResMut<TouchTracker>,
    mut events: EventWriter<ControllerInput>,
) {
    // The next key press belongs to the rebind prompt.
    if let Some(keys) = keys.as_deref().filter(|_| rebind.awaiting.is_none()) {
        for action in keyboard_actions(keys, &bindings) {
            emit(&mut events, action, capture.keyboard);
        }
    }

    if let Some(mouse) = mouse.as_deref() {
        if mouse.just_pressed(MouseButton::Left) {
            emit(&mut events, InputAction::Commit, capture.pointer);
        }
    }

    let Some(touches) = touches.as_deref() else {
        return;
    };
    let now = time.elapsed_secs();
    for touch in touches.iter_just_pressed() {
        tracker.begin(touch.id(), touch.position(), now);
    }
    for touch in touches.iter() {
        tracker.moved(touch.id(), touch.position());
    }
    for touch in touches.iter_just_canceled() {
        tracker.cancel(touch.id());
    }
    let mut gestures = Vec::new();
    for touch in touches.iter_just_released() {
        gestures.extend(tracker.end(touch.id(), touch.position(), now, &config));
    }
    gestures.extend(tracker.poll(now, &config));

    for gesture in gestures {
        let action = match gesture {
            TouchGesture::Tap => InputAction::Tap,
            TouchGesture::LongPress => InputAction::LongPress,
        };
        emit(&mut events, action, capture.pointer);
    }
}

fn emit(events: &mut EventWriter<ControllerInput>, action: InputAction, handled_upstream: bool) {
    events.send(ControllerInput {
        action,
        handled_upstream,
    });
}
