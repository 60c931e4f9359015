//! Tap / long-press classification for the primary touch.

use bevy::prelude::*;

use crate::config::ControllerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchGesture {
    Tap,
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TrackedTouch {
    id: u64,
    start: Vec2,
    started_at: f32,
    max_travel: f32,
    long_press_fired: bool,
}

/// Follows the first finger down. Further fingers are ignored until it lifts.
#[derive(Resource, Debug, Default)]
pub struct TouchTracker {
    active: Option<TrackedTouch>,
}

impl TouchTracker {
    pub fn begin(&mut self, id: u64, position: Vec2, now: f32) {
        if self.active.is_some() {
            return;
        }
        self.active = Some(TrackedTouch {
            id,
            start: position,
            started_at: now,
            max_travel: 0.0,
            long_press_fired: false,
        });
    }

    pub fn moved(&mut self, id: u64, position: Vec2) {
        if let Some(touch) = self.active.as_mut().filter(|t| t.id == id) {
            touch.max_travel = touch.max_travel.max(touch.start.distance(position));
        }
    }

    /// Fires a long-press once the touch has been held still long enough.
    pub fn poll(&mut self, now: f32, config: &ControllerConfig) -> Option<TouchGesture> {
        let touch = self.active.as_mut()?;
        if touch.long_press_fired
            || touch.max_travel > config.tap_max_travel
            || now - touch.started_at < config.long_press_secs
        {
            return None;
        }
        touch.long_press_fired = true;
        Some(TouchGesture::LongPress)
    }

    pub fn end(
        &mut self,
        id: u64,
        position: Vec2,
        now: f32,
        config: &ControllerConfig,
    ) -> Option<TouchGesture> {
        self.moved(id, position);
        let touch = self.active.filter(|t| t.id == id)?;
        self.active = None;
        if touch.long_press_fired || touch.max_travel > config.tap_max_travel {
            return None;
        }
        if now - touch.started_at >= config.long_press_secs {
            Some(TouchGesture::LongPress)
        } else {
            Some(TouchGesture::Tap)
        }
    }

    pub fn cancel(&mut self, id: u64) {
        if self.active.is_some_and(|t| t.id == id) {
            self.active = None;
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }
}
