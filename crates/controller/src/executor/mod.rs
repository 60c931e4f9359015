//! A self-contained executor for offline use and tests. A networked build
//! replaces this plugin with one that forwards `ExecutorRequest`s to the
//! server and sends back `ExecutorResponse`s.

pub mod local;
pub mod store;

use bevy::prelude::*;

use crate::ControllerSet;

pub use local::{run_local_executor, LocalExecutorQueue, LocalExecutorSettings};
pub use store::{ObjectStore, StoredObject};

pub struct LocalExecutorPlugin;

impl Plugin for LocalExecutorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObjectStore>()
            .init_resource::<LocalExecutorSettings>()
            .init_resource::<LocalExecutorQueue>()
            .add_systems(Update, run_local_executor.in_set(ControllerSet::Execute));
    }
}
