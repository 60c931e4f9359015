//! Behaviour while an executor request is outstanding.

use crate::bridge::ActionResultLog;
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::input::{InputAction, RouteOutcome};
use crate::mode::Mode;
use crate::test_harness::TestController;

use super::at;

const LATENCY: u32 = 2;
const TIMEOUT: u32 = 3;

fn controller() -> TestController {
    TestController::new()
        .with_templates(&["Wall", "Door"])
        .with_latency(LATENCY)
}

fn start_commit(c: &mut TestController, template: &str, x: f32) {
    c.send(InputAction::SelectTemplate(template.into())).unwrap();
    c.set_cursor(at(x));
    assert_eq!(c.send(InputAction::Commit), Ok(RouteOutcome::Handled));
    assert!(c.bridge_busy());
}

#[test]
fn test_second_commit_refused_while_first_outstanding() {
    let mut c = controller();
    start_commit(&mut c, "Wall", 0.0);
    assert!(!c.history().can_undo());

    c.set_cursor(at(1.0));
    assert_eq!(c.send(InputAction::Commit), Err(ControllerError::ActionInFlight));

    c.tick(LATENCY);
    assert!(!c.bridge_busy());
    assert_eq!(c.history().undo_entries().len(), 1);
    assert_eq!(c.store().len(), 1);

    // The guard lifts once the response is in.
    assert_eq!(c.send(InputAction::Commit), Ok(RouteOutcome::Handled));
}

#[test]
fn test_history_keys_refused_while_outstanding() {
    let mut c = controller();
    start_commit(&mut c, "Wall", 0.0);
    c.send(InputAction::CancelSession).unwrap();
    c.tick(LATENCY);
    assert!(!c.history().can_undo(), "cancelled before the result arrived");

    start_commit(&mut c, "Wall", 1.0);
    c.tick(LATENCY);
    c.send(InputAction::Exit).unwrap();

    assert_eq!(c.send(InputAction::Undo), Ok(RouteOutcome::Handled));
    assert_eq!(c.send(InputAction::Undo), Err(ControllerError::ActionInFlight));
    c.tick(LATENCY);
    assert!(c.history().can_redo());
}

#[test]
fn test_mode_changes_still_processed_while_outstanding() {
    let mut c = controller();
    start_commit(&mut c, "Wall", 0.0);
    assert_eq!(
        c.send(InputAction::ToggleDeleteMode),
        Ok(RouteOutcome::Handled)
    );
    assert_eq!(c.mode(), Mode::Delete);
    assert!(c.bridge_busy());
}

#[test]
fn test_late_result_for_cancelled_session_is_discarded() {
    let mut c = controller();
    start_commit(&mut c, "Wall", 0.0);
    c.send(InputAction::CancelSession).unwrap();
    c.tick(LATENCY);

    assert!(!c.bridge_busy());
    assert!(!c.history().can_undo());
    // The executor did act; the controller just does not claim it.
    assert_eq!(c.store().len(), 1);
}

#[test]
fn test_late_result_for_replaced_session_is_discarded() {
    let mut c = controller();
    start_commit(&mut c, "Wall", 0.0);
    c.send(InputAction::SelectTemplate("Door".into())).unwrap();
    c.tick(LATENCY);
    assert!(!c.history().can_undo());
    assert_eq!(c.placement().template_id(), Some("Door"));
}

#[test]
fn test_result_for_live_session_is_recorded_after_delay() {
    let mut c = controller();
    start_commit(&mut c, "Wall", 0.0);
    c.tick(LATENCY - 1);
    assert!(c.bridge_busy());
    assert!(!c.history().can_undo());
    c.tick(1);
    assert!(c.history().can_undo());
    assert_eq!(c.status().text, "Place Wall");
}

#[test]
fn test_late_delete_after_leaving_delete_mode_is_discarded() {
    let mut c = TestController::new().with_templates(&["Wall"]);
    let wall = c.place("Wall", at(0.0));
    c.send(InputAction::Exit).unwrap();
    let mut c = c.with_latency(LATENCY);
    assert_eq!(c.delete(wall), Ok(RouteOutcome::Handled));
    c.send(InputAction::Exit).unwrap();
    c.tick(LATENCY);

    assert!(!c.bridge_busy());
    assert!(c.store().is_empty());
    assert_eq!(c.history().undo_entries().len(), 1);
}

#[test]
fn test_result_log_keeps_every_outcome() {
    let mut c = controller();
    start_commit(&mut c, "Wall", 0.0);
    c.tick(LATENCY);
    c.set_cursor(at(0.0));
    c.send(InputAction::Commit).unwrap();
    c.tick(LATENCY);

    let log = c.resource::<ActionResultLog>();
    assert_eq!(log.len(), 2);
    assert!(log.last_n(2)[0].1.is_ok());
    assert!(log.last_n(2)[1].1.is_err());
}

#[test]
fn test_unanswered_request_expires_and_unblocks_commits() {
    let config = ControllerConfig {
        executor_timeout_frames: TIMEOUT,
        ..Default::default()
    };
    let mut c = TestController::with_config(config)
        .with_templates(&["Wall"])
        .with_latency(TIMEOUT * 10);
    start_commit(&mut c, "Wall", 0.0);
    c.tick(TIMEOUT);

    assert!(!c.bridge_busy());
    assert!(c.status().is_error);
    assert_eq!(
        c.status().text,
        ControllerError::ExecutorTimeout("place Wall".into()).to_string()
    );
    assert!(!c.history().can_undo());

    let mut c = c.with_latency(0);
    c.send(InputAction::Exit).unwrap();
    c.send(InputAction::SelectTemplate("Wall".into())).unwrap();
    c.set_cursor(at(1.0));
    assert_eq!(c.send(InputAction::Commit), Ok(RouteOutcome::Handled));
    assert_eq!(c.history().undo_entries().len(), 1);

    // The abandoned request is answered eventually; nothing claims it.
    c.tick(TIMEOUT * 10);
    assert!(!c.bridge_busy());
    assert_eq!(c.history().undo_entries().len(), 1);
    assert_eq!(c.store().len(), 2);
}

#[test]
fn test_unanswered_undo_expires_and_keeps_entry() {
    let config = ControllerConfig {
        executor_timeout_frames: TIMEOUT,
        ..Default::default()
    };
    let mut c = TestController::with_config(config).with_templates(&["Wall"]);
    c.place("Wall", at(0.0));
    c.send(InputAction::Exit).unwrap();

    let mut c = c.with_latency(TIMEOUT * 10);
    assert_eq!(c.send(InputAction::Undo), Ok(RouteOutcome::Handled));
    c.tick(TIMEOUT);
    assert!(!c.bridge_busy());
    assert_eq!(c.history().undo_entries().len(), 1);
    assert!(!c.history().can_redo());
    assert_eq!(
        c.status().text,
        ControllerError::ExecutorTimeout("undo".into()).to_string()
    );
}
