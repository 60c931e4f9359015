//! Types for the undo/redo history.

use bevy::prelude::*;

use crate::objects::ObjectRef;

/// Stable identity of a history entry, used to match an executor response
/// to the entry it reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(pub u64);

// ---------------------------------------------------------------------------
// BuildAction: each variant stores enough data to replay the action
// ---------------------------------------------------------------------------

/// A committed, reversible action.
///
/// Both variants carry the template id and full transform, so the action can
/// be replayed after the instance it touched is gone. `object` is the last
/// known instance: for `Place` the one that was created, for `Delete` the one
/// that was removed (stale until an undo re-creates it).
#[derive(Debug, Clone, PartialEq)]
pub enum BuildAction {
    Place {
        template_id: String,
        transform: Transform,
        object: ObjectRef,
    },
    Delete {
        template_id: String,
        transform: Transform,
        object: ObjectRef,
    },
}

impl BuildAction {
    pub fn template_id(&self) -> &str {
        match self {
            Self::Place { template_id, .. } | Self::Delete { template_id, .. } => template_id,
        }
    }

    pub fn transform(&self) -> Transform {
        match self {
            Self::Place { transform, .. } | Self::Delete { transform, .. } => *transform,
        }
    }

    pub fn object(&self) -> ObjectRef {
        match self {
            Self::Place { object, .. } | Self::Delete { object, .. } => *object,
        }
    }

    pub(crate) fn set_object(&mut self, new: ObjectRef) {
        match self {
            Self::Place { object, .. } | Self::Delete { object, .. } => *object = new,
        }
    }

    /// Short description for status lines ("place Wall", "delete Door").
    pub fn describe(&self) -> String {
        match self {
            Self::Place { template_id, .. } => format!("place {template_id}"),
            Self::Delete { template_id, .. } => format!("delete {template_id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: CommandId,
    pub action: BuildAction,
}

// ---------------------------------------------------------------------------
// Replay planning
// ---------------------------------------------------------------------------

/// Executor call needed to undo or redo one entry. These are the same two
/// operations live actions use.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayOp {
    Place {
        template_id: String,
        transform: Transform,
    },
    Delete {
        target: ObjectRef,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayDirection {
    Undo,
    Redo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayPlan {
    pub command: CommandId,
    pub direction: ReplayDirection,
    pub op: ReplayOp,
}
