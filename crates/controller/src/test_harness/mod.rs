//! # TestController: headless harness for controller integration tests
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins`, [`ControllerPlugin`] and
//! [`LocalExecutorPlugin`], so tests can feed intents and inspect the mode,
//! history and executor state without a window or input devices.


use bevy::input::touch::{touch_screen_input_system, TouchInput, Touches};
use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::error::ExecutorError;
use crate::executor::{LocalExecutorPlugin, LocalExecutorSettings};
use crate::templates::{Template, TemplateRegistry};
use crate::ControllerPlugin;

pub struct TestController {
    app: App,
}

impl Default for TestController {
    fn default() -> Self {
        Self::new()
    }
}

impl TestController {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An empty controller: default config, no templates, zero latency.
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // The plugin reads the config at build time.
        app.insert_resource(config);
        app.add_plugins((ControllerPlugin, LocalExecutorPlugin));
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Publish unlocked templates in the given order.
    pub fn with_templates(self, ids: &[&str]) -> Self {
        self.with_template_list(ids.iter().map(|&id| Template::new(id)).collect())
    }

    pub fn with_template_list(mut self, templates: Vec<Template>) -> Self {
        self.app
            .world_mut()
            .resource_mut::<TemplateRegistry>()
            .publish(templates);
        // Let the hotkey index rebuild.
        self.app.update();
        self
    }

    /// Answer executor requests after `frames` extra updates.
    pub fn with_latency(mut self, frames: u32) -> Self {
        self.app
            .world_mut()
            .resource_mut::<LocalExecutorSettings>()
            .latency_frames = frames;
        self
    }

    /// Install the device resources `InputPlugin` would provide, so tests can
    /// press keys, click and touch. Touch events are folded into `Touches`
    /// by bevy's own system.
    pub fn with_device_input(mut self) -> Self {
        self.app
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Touches>()
            .add_event::<TouchInput>()
            .add_systems(PreUpdate, touch_screen_input_system);
        self
    }

    /// Decline every executor request with `err`, or stop declining.
    pub fn force_rejection(&mut self, err: Option<ExecutorError>) {
        self.app
            .world_mut()
            .resource_mut::<LocalExecutorSettings>()
            .forced_rejection = err;
    }
}
