//! Mode exclusivity and session teardown, driven through input.

use crate::error::ControllerError;
use crate::input::{InputAction, RouteOutcome};
use crate::mode::{Mode, ModeChanged};
use crate::templates::Template;
use crate::test_harness::TestController;

use super::at;

fn controller() -> TestController {
    TestController::new().with_templates(&["Wall", "Door"])
}

#[test]
fn test_delete_mode_cancels_running_placement() {
    let mut c = controller();
    c.send(InputAction::SelectTemplate("Wall".into())).unwrap();
    assert!(c.is_placing());

    assert_eq!(
        c.send(InputAction::ToggleDeleteMode),
        Ok(RouteOutcome::Handled)
    );
    assert_eq!(c.mode(), Mode::Delete);
    assert!(!c.is_placing());
    assert!(!c.placement().is_active());
    assert!(c.deletion().is_active());
    assert!(c.mode_invariant_holds());

    assert_eq!(
        c.drain_mode_events(),
        vec![
            ModeChanged {
                previous: Mode::None,
                current: Mode::Place,
            },
            ModeChanged {
                previous: Mode::Place,
                current: Mode::Delete,
            },
        ]
    );
}

#[test]
fn test_undo_rejected_during_active_session() {
    let mut c = controller();
    c.place("Wall", at(0.0));
    assert!(c.is_placing());

    assert!(matches!(
        c.send(InputAction::Undo),
        Err(ControllerError::InvalidModeForOperation(_))
    ));
    assert!(matches!(
        c.send(InputAction::Redo),
        Err(ControllerError::InvalidModeForOperation(_))
    ));
    assert_eq!(c.history().undo_entries().len(), 1);
    assert_eq!(c.store().len(), 1);
    assert!(c.status().is_error);
    assert!(c.is_placing());
}

#[test]
fn test_cancel_keeps_place_mode_and_unlocks_undo() {
    let mut c = controller();
    c.place("Wall", at(0.0));
    assert_eq!(c.send(InputAction::CancelSession), Ok(RouteOutcome::Handled));
    assert_eq!(c.mode(), Mode::Place);
    assert!(!c.is_placing());
    assert_eq!(c.send(InputAction::CancelSession), Ok(RouteOutcome::Ignored));

    assert_eq!(c.send(InputAction::Undo), Ok(RouteOutcome::Handled));
    assert!(c.store().is_empty());
}

#[test]
fn test_exit_returns_to_none_from_any_mode() {
    let mut c = controller();
    assert_eq!(c.send(InputAction::Exit), Ok(RouteOutcome::Ignored));

    c.send(InputAction::SelectTemplate("Door".into())).unwrap();
    assert_eq!(c.send(InputAction::Exit), Ok(RouteOutcome::Handled));
    assert_eq!(c.mode(), Mode::None);
    assert!(!c.placement().is_active());

    c.send(InputAction::ToggleDeleteMode).unwrap();
    assert_eq!(c.send(InputAction::Exit), Ok(RouteOutcome::Handled));
    assert_eq!(c.mode(), Mode::None);
    assert!(!c.deletion().is_active());
    assert!(c.mode_invariant_holds());
}

#[test]
fn test_delete_toggle_flips_between_delete_and_none() {
    let mut c = controller();
    c.send(InputAction::ToggleDeleteMode).unwrap();
    assert_eq!(c.mode(), Mode::Delete);
    c.send(InputAction::ToggleDeleteMode).unwrap();
    assert_eq!(c.mode(), Mode::None);
    assert!(!c.deletion().is_active());
}

#[test]
fn test_selecting_from_delete_stops_targeting() {
    let mut c = controller();
    let wall = c.place("Wall", at(0.0));
    c.send(InputAction::ToggleDeleteMode).unwrap();
    c.hover(Some(wall));
    c.tick(1);
    assert_eq!(c.deletion().target(), Some(wall));

    c.send(InputAction::SelectTemplate("Door".into())).unwrap();
    assert_eq!(c.mode(), Mode::Place);
    assert!(!c.deletion().is_active());
    assert_eq!(c.deletion().target(), None);
    assert_eq!(c.placement().template_id(), Some("Door"));
}

#[test]
fn test_locked_template_leaves_state_unchanged() {
    let mut c = TestController::new()
        .with_template_list(vec![Template::new("Wall"), Template::new("Gate").locked()]);
    c.send(InputAction::ToggleDeleteMode).unwrap();
    let session = c.deletion().current_id();
    c.drain_mode_events();

    let result = c.send(InputAction::SelectTemplate("Gate".into()));
    assert!(matches!(result, Err(ControllerError::SessionStartFailed(_))));
    assert_eq!(c.mode(), Mode::Delete);
    assert_eq!(c.deletion().current_id(), session);
    assert!(!c.placement().is_active());
    assert!(c.drain_mode_events().is_empty());
}

#[test]
fn test_unknown_template_keeps_running_session() {
    let mut c = controller();
    c.send(InputAction::SelectTemplate("Wall".into())).unwrap();
    let session = c.placement().current_id();

    assert_eq!(
        c.send(InputAction::SelectTemplate("Bridge".into())),
        Err(ControllerError::TemplateNotFound("Bridge".into()))
    );
    assert_eq!(c.placement().current_id(), session);
    assert_eq!(c.placement().template_id(), Some("Wall"));
    assert_eq!(c.status().text, "Unknown template 'Bridge'");
}

#[test]
fn test_reselecting_replaces_the_session() {
    let mut c = controller();
    c.send(InputAction::SelectTemplate("Wall".into())).unwrap();
    let first = c.placement().current_id();
    c.send(InputAction::SelectTemplate("Door".into())).unwrap();
    assert_ne!(c.placement().current_id(), first);
    assert_eq!(c.mode(), Mode::Place);
    // Staying in Place is not a mode change.
    assert_eq!(c.drain_mode_events().len(), 1);
}

#[test]
fn test_mode_invariant_holds_over_long_input_sequence() {
    let actions = [
        InputAction::SelectTemplate("Wall".into()),
        InputAction::ToggleDeleteMode,
        InputAction::CancelSession,
        InputAction::Exit,
        InputAction::ToggleInventory,
        InputAction::Hotkey(2),
        InputAction::Commit,
        InputAction::Undo,
    ];
    let mut c = controller();
    let mut seed: u32 = 0x2545_f491;
    for step in 0..400 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let action = actions[(seed as usize) % actions.len()].clone();
        c.set_cursor(at((step % 7) as f32));
        let _ = c.send(action.clone());
        assert!(
            c.mode_invariant_holds(),
            "invariant broken at step {step} after {action:?}"
        );
    }
}
