//! Non-owning handles to externally managed instances.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Handle to an instance owned by the executor. The referent can be
/// destroyed or pulled out of the build area at any time, so every use must
/// go through [`LiveObjects::is_live`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef(pub Entity);

impl ObjectRef {
    pub fn entity(self) -> Entity {
        self.0
    }
}

/// Marker carried by every placed instance. Removing it takes the object out
/// of the controller's reach even if the entity lives on.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PlacedObject {
    pub template_id: String,
}

/// Read access to placed instances for liveness checks and snapshots.
#[derive(SystemParam)]
pub struct LiveObjects<'w, 's> {
    objects: Query<'w, 's, (&'static PlacedObject, &'static Transform)>,
}

impl LiveObjects<'_, '_> {
    pub fn is_live(&self, object: ObjectRef) -> bool {
        self.objects.contains(object.0)
    }

    /// Template id and pose of a live object, or `None` if it is stale.
    pub fn snapshot(&self, object: ObjectRef) -> Option<(String, Transform)> {
        self.objects
            .get(object.0)
            .ok()
            .map(|(placed, transform)| (placed.template_id.clone(), *transform))
    }
}
