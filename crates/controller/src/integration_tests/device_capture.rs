//! Raw keyboard, mouse and touch state through `capture_device_input`.

use bevy::input::touch::TouchPhase;
use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::history::BuildAction;
use crate::input::{InputAction, RouteOutcome};
use crate::mode::Mode;
use crate::test_harness::TestController;

use super::at;

fn controller() -> TestController {
    TestController::new()
        .with_templates(&["Wall"])
        .with_device_input()
}

fn placing_wall(mut c: TestController) -> TestController {
    c.send(InputAction::SelectTemplate("Wall".into())).unwrap();
    c.set_cursor(at(0.0));
    c
}

#[test]
fn test_delete_key_toggles_delete_mode() {
    let mut c = controller();
    c.press_key(&[], KeyCode::KeyX);
    assert_eq!(c.mode(), Mode::Delete);
    c.press_key(&[], KeyCode::KeyX);
    assert_eq!(c.mode(), Mode::None);
}

#[test]
fn test_keyboard_capture_marks_keys_as_handled() {
    let mut c = controller();
    c.set_capture(true, false);
    c.press_key(&[], KeyCode::KeyX);
    assert_eq!(c.mode(), Mode::None);
    assert_eq!(
        c.last_routed(),
        Some((InputAction::ToggleDeleteMode, Ok(RouteOutcome::Ignored)))
    );
}

#[test]
fn test_ctrl_z_undoes_through_the_keyboard() {
    let mut c = placing_wall(controller());
    c.click();
    c.press_key(&[], KeyCode::Escape);
    assert_eq!(c.mode(), Mode::None);

    c.press_key(&[KeyCode::ControlLeft], KeyCode::KeyZ);
    assert!(c.store().is_empty());
    assert!(c.history().can_redo());
}

#[test]
fn test_click_commits_placement() {
    let mut c = placing_wall(controller());
    c.click();
    assert_eq!(c.store().len(), 1);
    assert_eq!(
        c.last_routed(),
        Some((InputAction::Commit, Ok(RouteOutcome::Handled)))
    );
}

#[test]
fn test_pointer_capture_blocks_click_commit() {
    let mut c = placing_wall(controller());
    c.set_capture(false, true);
    c.click();
    assert!(c.store().is_empty());
    assert_eq!(
        c.last_routed(),
        Some((InputAction::Commit, Ok(RouteOutcome::Ignored)))
    );
}

#[test]
fn test_tap_commits_like_click() {
    let mut c = placing_wall(controller());
    c.touch(TouchPhase::Started, 0, Vec2::new(10.0, 10.0));
    assert!(c.store().is_empty());
    c.touch(TouchPhase::Ended, 0, Vec2::new(11.0, 10.0));

    assert_eq!(c.store().len(), 1);
    assert_eq!(
        c.last_routed(),
        Some((InputAction::Tap, Ok(RouteOutcome::Handled)))
    );
    assert!(matches!(
        c.history().peek_undo().unwrap().action,
        BuildAction::Place { .. }
    ));
}

#[test]
fn test_dragged_touch_does_not_commit() {
    let mut c = placing_wall(controller());
    c.touch(TouchPhase::Started, 0, Vec2::ZERO);
    c.touch(TouchPhase::Moved, 0, Vec2::new(80.0, 0.0));
    c.touch(TouchPhase::Ended, 0, Vec2::new(80.0, 0.0));
    assert!(c.store().is_empty());
}

#[test]
fn test_long_press_rotates_once() {
    let config = ControllerConfig {
        long_press_secs: 0.0,
        ..Default::default()
    };
    let c = TestController::with_config(config)
        .with_templates(&["Wall"])
        .with_device_input();
    let mut c = placing_wall(c);

    c.touch(TouchPhase::Started, 0, Vec2::ZERO);
    assert_eq!(
        c.last_routed(),
        Some((InputAction::LongPress, Ok(RouteOutcome::Handled)))
    );
    c.tick(3);
    c.touch(TouchPhase::Ended, 0, Vec2::ZERO);

    let rotation = c.placement().active().unwrap().rotation;
    let expected = Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2);
    assert!(rotation.angle_between(expected) < 1e-4);
    assert!(c.store().is_empty());
}

#[test]
fn test_pointer_capture_marks_touch_gestures_as_handled() {
    let mut c = placing_wall(controller());
    c.set_capture(false, true);
    c.touch(TouchPhase::Started, 0, Vec2::ZERO);
    c.touch(TouchPhase::Ended, 0, Vec2::ZERO);
    assert!(c.store().is_empty());
    assert_eq!(
        c.last_routed(),
        Some((InputAction::Tap, Ok(RouteOutcome::Ignored)))
    );
}
