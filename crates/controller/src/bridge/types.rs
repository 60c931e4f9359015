//! Request/response contract with the authoritative executor.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ExecutorError;
use crate::history::{ReplayDirection, ReplayOp, ReplayPlan};
use crate::mode::SessionId;
use crate::objects::ObjectRef;
use crate::ring_log::RingLog;

/// Correlates a response with the request that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket(pub u64);

/// The two operations the executor offers. Live actions and history replay
/// use exactly these, so every change passes the same validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutorOp {
    Place {
        template_id: String,
        transform: Transform,
    },
    Delete {
        target: ObjectRef,
    },
}

impl From<ReplayOp> for ExecutorOp {
    fn from(op: ReplayOp) -> Self {
        match op {
            ReplayOp::Place {
                template_id,
                transform,
            } => ExecutorOp::Place {
                template_id,
                transform,
            },
            ReplayOp::Delete { target } => ExecutorOp::Delete { target },
        }
    }
}

/// Instance created by a place, `None` for a delete.
pub type ExecutorOutcome = Result<Option<ObjectRef>, ExecutorError>;

/// Recent executor operations and their outcomes.
pub type ActionResultLog = RingLog<(ExecutorOp, ExecutorOutcome)>;

/// Emitted by the bridge; consumed by whichever plugin acts as executor.
#[derive(Event, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorRequest {
    pub ticket: Ticket,
    pub op: ExecutorOp,
}

/// Sent back by the executor, in any later frame.
#[derive(Event, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorResponse {
    pub ticket: Ticket,
    pub outcome: ExecutorOutcome,
}

/// What to do with a response once it arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPurpose {
    LivePlace {
        session: SessionId,
        template_id: String,
        transform: Transform,
    },
    /// Template id and transform are captured before the commit, since the
    /// target no longer exists afterwards.
    LiveDelete {
        session: SessionId,
        template_id: String,
        transform: Transform,
        target: ObjectRef,
    },
    Replay(ReplayPlan),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub ticket: Ticket,
    pub op: ExecutorOp,
    pub purpose: ActionPurpose,
    /// Frames spent waiting for the response.
    pub waited_frames: u32,
}

impl PendingAction {
    /// Short description for status lines.
    pub fn describe(&self) -> String {
        match &self.purpose {
            ActionPurpose::LivePlace { template_id, .. } => format!("place {template_id}"),
            ActionPurpose::LiveDelete { template_id, .. } => format!("delete {template_id}"),
            ActionPurpose::Replay(plan) => match plan.direction {
                ReplayDirection::Undo => "undo".to_string(),
                ReplayDirection::Redo => "redo".to_string(),
            },
        }
    }
}
