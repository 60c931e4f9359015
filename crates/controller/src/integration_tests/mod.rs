//! Integration tests driven through the `TestController` harness: input goes
//! in as `ControllerInput` events and the local executor plays the
//! authoritative service.

mod device_capture;
mod in_flight;
mod mode_switching;

use bevy::prelude::*;

/// A spot on the ground plane, far enough from its neighbours not to count
/// as occupied.
fn at(x: f32) -> Vec3 {
    Vec3::new(x * 2.0, 0.0, 0.0)
}
