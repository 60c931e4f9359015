//! Authoritative record of placed instances kept by the local executor.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::objects::ObjectRef;

/// Two placements closer than this are treated as the same spot.
pub const OCCUPIED_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub template_id: String,
    pub transform: Transform,
}

#[derive(Resource, Debug, Default)]
pub struct ObjectStore {
    records: HashMap<ObjectRef, StoredObject>,
}

impl ObjectStore {
    pub fn insert(&mut self, object: ObjectRef, record: StoredObject) {
        self.records.insert(object, record);
    }

    pub fn remove(&mut self, object: ObjectRef) -> Option<StoredObject> {
        self.records.remove(&object)
    }

    pub fn get(&self, object: ObjectRef) -> Option<&StoredObject> {
        self.records.get(&object)
    }

    pub fn contains(&self, object: ObjectRef) -> bool {
        self.records.contains_key(&object)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectRef, &StoredObject)> {
        self.records.iter()
    }

    pub fn occupied_at(&self, translation: Vec3) -> bool {
        self.records
            .values()
            .any(|r| r.transform.translation.distance(translation) < OCCUPIED_EPSILON)
    }

    /// `(template_id, translation)` of every record, sorted so two stores can
    /// be compared regardless of instance identity.
    pub fn layout(&self) -> Vec<(String, [i32; 3])> {
        let mut layout: Vec<(String, [i32; 3])> = self
            .records
            .values()
            .map(|r| {
                let t = r.transform.translation / OCCUPIED_EPSILON;
                (
                    r.template_id.clone(),
                    [t.x.round() as i32, t.y.round() as i32, t.z.round() as i32],
                )
            })
            .collect();
        layout.sort();
        layout
    }
}
