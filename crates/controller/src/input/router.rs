//! Input routing: one entry point turns each [`ControllerInput`] into mode
//! transitions, session edits, history replay and executor commits.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::types::{ControllerInput, InputAction, RouteLog, RouteOutcome, RouteResult};
use crate::bridge::{ActionBridge, ExecutorRequest};
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::history::CommandHistory;
use crate::mode::{
    DeletionSession, Mode, ModeChanged, ModeMachine, PlacementCursor, PlacementSession,
    RotationDirection,
};
use crate::objects::LiveObjects;
use crate::presentation::{GridSnap, InventoryState, StatusMessage};
use crate::templates::{HotkeyIndex, TemplateRegistry};

/// Everything the router reads or drives. It owns none of it.
#[derive(SystemParam)]
pub struct RouterContext<'w, 's> {
    pub mode: ResMut<'w, ModeMachine>,
    pub placement: ResMut<'w, PlacementSession>,
    pub deletion: ResMut<'w, DeletionSession>,
    pub history: Res<'w, CommandHistory>,
    pub bridge: ResMut<'w, ActionBridge>,
    pub registry: Res<'w, TemplateRegistry>,
    pub hotkeys: Res<'w, HotkeyIndex>,
    pub inventory: ResMut<'w, InventoryState>,
    pub grid_snap: ResMut<'w, GridSnap>,
    pub cursor: Res<'w, PlacementCursor>,
    pub config: Res<'w, ControllerConfig>,
    pub live: LiveObjects<'w, 's>,
    pub status: ResMut<'w, StatusMessage>,
    pub requests: EventWriter<'w, ExecutorRequest>,
    pub mode_events: EventWriter<'w, ModeChanged>,
}

/// Routes every input event in arrival order. Errors become error-flagged
/// status messages; nothing here is fatal.
pub fn route_input(
    mut inputs: EventReader<ControllerInput>,
    mut ctx: RouterContext,
    mut log: ResMut<RouteLog>,
) {
    for input in inputs.read() {
        if input.handled_upstream {
            debug!("Input {:?} handled upstream, ignored", input.action);
            log.push((input.action.clone(), Ok(RouteOutcome::Ignored)));
            continue;
        }
        let result = ctx.route(&input.action);
        match &result {
            Ok(RouteOutcome::Ignored) => debug!("Input {:?} ignored in {:?}", input.action, ctx.mode.current()),
            Ok(RouteOutcome::Handled) => {}
            Err(err) => {
                debug!("Input {:?} rejected: {}", input.action, err);
                ctx.status.set(err.to_string(), true);
            }
        }
        log.push((input.action.clone(), result));
    }
}

impl RouterContext<'_, '_> {
    /// Priority order, first match wins: global toggles, delete-mode toggle,
    /// undo/redo, hotkeys and selection, placement keys, commit, exit.
    pub fn route(&mut self, action: &InputAction) -> RouteResult {
        match action {
            InputAction::ToggleInventory => {
                self.inventory.visible = !self.inventory.visible;
                Ok(RouteOutcome::Handled)
            }
            InputAction::ToggleGridSnap => {
                self.grid_snap.enabled = !self.grid_snap.enabled;
                let text = if self.grid_snap.enabled {
                    "Grid snap ON"
                } else {
                    "Grid snap OFF"
                };
                self.status.set(text, false);
                Ok(RouteOutcome::Handled)
            }
            InputAction::ToggleDeleteMode => {
                let next = if self.mode.current() == Mode::Delete {
                    Mode::None
                } else {
                    Mode::Delete
                };
                self.request_mode(next);
                Ok(RouteOutcome::Handled)
            }
            InputAction::Undo => self.undo(),
            InputAction::Redo => self.redo(),
            InputAction::Hotkey(slot) => self.hotkey(*slot),
            InputAction::SelectTemplate(template_id) => {
                self.begin_placement(template_id)?;
                Ok(RouteOutcome::Handled)
            }
            InputAction::Rotate(direction) => Ok(self.rotate(*direction)),
            // Touch users get rotation without dedicated buttons.
            InputAction::LongPress => Ok(self.rotate(RotationDirection::Clockwise)),
            InputAction::CycleAxis => {
                if !self.mode.is_placing() {
                    return Ok(RouteOutcome::Ignored);
                }
                match self.placement.switch_axis() {
                    Some(axis) => {
                        self.status
                            .set(format!("Rotation axis: {}", axis.label()), false);
                        Ok(RouteOutcome::Handled)
                    }
                    None => Ok(RouteOutcome::Ignored),
                }
            }
            InputAction::CancelSession => {
                if self.mode.cancel_session(&mut self.placement) {
                    self.status.set("Placement cancelled", false);
                    Ok(RouteOutcome::Handled)
                } else {
                    Ok(RouteOutcome::Ignored)
                }
            }
            InputAction::Commit | InputAction::Tap => self.commit(),
            InputAction::Exit => {
                if self.mode.current() == Mode::None {
                    return Ok(RouteOutcome::Ignored);
                }
                self.request_mode(Mode::None);
                Ok(RouteOutcome::Handled)
            }
        }
    }

    fn request_mode(&mut self, next: Mode) {
        if let Some(changed) = self
            .mode
            .request_mode(next, &mut self.placement, &mut self.deletion)
        {
            self.mode_events.send(changed);
        }
    }

    /// Shared by inventory clicks and hotkeys. All checks run before any
    /// state changes, so a failure leaves the mode and sessions as they were.
    fn begin_placement(&mut self, template_id: &str) -> Result<(), ControllerError> {
        let template = self
            .registry
            .get(template_id)
            .ok_or_else(|| ControllerError::TemplateNotFound(template_id.to_string()))?;
        let prepared = self.placement.prepare(template)?;
        let display_name = template.display_name.clone();

        let (_, changed) =
            self.mode
                .begin_placement(prepared, &mut self.placement, &mut self.deletion);
        if let Some(changed) = changed {
            self.mode_events.send(changed);
        }
        self.status.set(format!("Placing {display_name}"), false);
        Ok(())
    }

    fn hotkey(&mut self, slot: u8) -> RouteResult {
        if !self.inventory.visible {
            return Ok(RouteOutcome::Ignored);
        }
        let Some(template_id) = self.hotkeys.resolve(slot).map(str::to_string) else {
            return Ok(RouteOutcome::Ignored);
        };
        self.begin_placement(&template_id)?;
        self.inventory.visible = false;
        Ok(RouteOutcome::Handled)
    }

    fn undo(&mut self) -> RouteResult {
        // An uncommitted preview has no history entry to pair with.
        if self.mode.is_placing() {
            return Err(ControllerError::InvalidModeForOperation(
                "undo during placement",
            ));
        }
        let plan = self.history.plan_undo(|o| self.live.is_live(o))?;
        let request = self.bridge.reverse(plan)?;
        self.requests.send(request);
        Ok(RouteOutcome::Handled)
    }

    fn redo(&mut self) -> RouteResult {
        if self.mode.is_placing() {
            return Err(ControllerError::InvalidModeForOperation(
                "redo during placement",
            ));
        }
        let plan = self.history.plan_redo(|o| self.live.is_live(o))?;
        let request = self.bridge.reverse(plan)?;
        self.requests.send(request);
        Ok(RouteOutcome::Handled)
    }

    fn rotate(&mut self, direction: RotationDirection) -> RouteOutcome {
        if !self.mode.is_placing() {
            return RouteOutcome::Ignored;
        }
        let step = self.config.rotation_step_radians();
        if self.placement.rotate(direction, step) {
            RouteOutcome::Handled
        } else {
            RouteOutcome::Ignored
        }
    }

    fn commit(&mut self) -> RouteResult {
        match self.mode.current() {
            Mode::Place => {
                let (Some(session), Some(template_id)) = (
                    self.placement.current_id(),
                    self.placement.template_id().map(str::to_string),
                ) else {
                    return Ok(RouteOutcome::Ignored);
                };
                let Some(transform) = self.placement.preview_transform(&self.cursor) else {
                    return Ok(RouteOutcome::Ignored);
                };
                let request = self
                    .bridge
                    .commit_place(session, &template_id, transform)?;
                self.requests.send(request);
                Ok(RouteOutcome::Handled)
            }
            Mode::Delete => {
                let (Some(session), Some(target)) =
                    (self.deletion.current_id(), self.deletion.target())
                else {
                    return Ok(RouteOutcome::Ignored);
                };
                // Captured now: the instance is gone once the commit lands.
                let (template_id, transform) = self
                    .live
                    .snapshot(target)
                    .ok_or(ControllerError::StaleReference)?;
                let request = self
                    .bridge
                    .commit_delete(session, target, template_id, transform)?;
                self.requests.send(request);
                Ok(RouteOutcome::Handled)
            }
            Mode::None => Ok(RouteOutcome::Ignored),
        }
    }
}
