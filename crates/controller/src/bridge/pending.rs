use bevy::prelude::*;

use super::types::{ActionPurpose, ExecutorOp, ExecutorRequest, PendingAction, Ticket};
use crate::error::ControllerError;
use crate::history::ReplayPlan;
use crate::mode::SessionId;
use crate::objects::ObjectRef;

/// Issues executor requests and remembers the single outstanding one.
///
/// Only one history-affecting request may be in flight. A second commit,
/// undo or redo before the first resolves is refused with `ActionInFlight`.
#[derive(Resource, Debug, Default)]
pub struct ActionBridge {
    next_ticket: u64,
    pending: Option<PendingAction>,
}

impl ActionBridge {
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn commit_place(
        &mut self,
        session: SessionId,
        template_id: &str,
        transform: Transform,
    ) -> Result<ExecutorRequest, ControllerError> {
        self.issue(
            ExecutorOp::Place {
                template_id: template_id.to_string(),
                transform,
            },
            ActionPurpose::LivePlace {
                session,
                template_id: template_id.to_string(),
                transform,
            },
        )
    }

    pub fn commit_delete(
        &mut self,
        session: SessionId,
        target: ObjectRef,
        template_id: String,
        transform: Transform,
    ) -> Result<ExecutorRequest, ControllerError> {
        self.issue(
            ExecutorOp::Delete { target },
            ActionPurpose::LiveDelete {
                session,
                template_id,
                transform,
                target,
            },
        )
    }

    /// Request the executor call that undoes or redoes a history entry.
    pub fn reverse(&mut self, plan: ReplayPlan) -> Result<ExecutorRequest, ControllerError> {
        let op = ExecutorOp::from(plan.op.clone());
        self.issue(op, ActionPurpose::Replay(plan))
    }

    /// Claim the pending action a response belongs to. Responses for any
    /// other ticket are left alone and yield `None`.
    pub fn take(&mut self, ticket: Ticket) -> Option<PendingAction> {
        if self.pending.as_ref().map(|p| p.ticket) != Some(ticket) {
            return None;
        }
        self.pending.take()
    }

    /// Count one more frame against the outstanding request and give it up
    /// once `timeout_frames` have passed. A response that shows up later is
    /// treated like any other unknown ticket. Zero never expires.
    pub fn age_pending(&mut self, timeout_frames: u32) -> Option<PendingAction> {
        let pending = self.pending.as_mut()?;
        pending.waited_frames = pending.waited_frames.saturating_add(1);
        if timeout_frames == 0 || pending.waited_frames < timeout_frames {
            return None;
        }
        self.pending.take()
    }

    fn issue(
        &mut self,
        op: ExecutorOp,
        purpose: ActionPurpose,
    ) -> Result<ExecutorRequest, ControllerError> {
        if self.pending.is_some() {
            return Err(ControllerError::ActionInFlight);
        }
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(PendingAction {
            ticket,
            op: op.clone(),
            purpose,
            waited_frames: 0,
        });
        Ok(ExecutorRequest { ticket, op })
    }
}
