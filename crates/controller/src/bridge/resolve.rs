//! Applies executor responses to history and presentation.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::pending::ActionBridge;
use super::types::{ActionPurpose, ActionResultLog, ExecutorOp, ExecutorResponse};
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::history::{BuildAction, CommandHistory, ReplayDirection, ReplayOp, ReplayPlan};
use crate::mode::{DeletionSession, PlacementSession};
use crate::objects::ObjectRef;
use crate::presentation::StatusMessage;

#[derive(SystemParam)]
pub struct ResolveContext<'w, 's> {
    bridge: ResMut<'w, ActionBridge>,
    history: ResMut<'w, CommandHistory>,
    placement: Res<'w, PlacementSession>,
    deletion: Res<'w, DeletionSession>,
    status: ResMut<'w, StatusMessage>,
    log: ResMut<'w, ActionResultLog>,
    commands: Commands<'w, 's>,
}

/// History is only touched once the executor has answered: a live commit is
/// recorded on success, a replayed entry moves to the opposite stack on
/// success, and any rejection leaves both stacks as they were.
pub fn resolve_executor_responses(
    mut responses: EventReader<ExecutorResponse>,
    mut ctx: ResolveContext,
) {
    for response in responses.read() {
        let Some(pending) = ctx.bridge.take(response.ticket) else {
            warn!("Executor response for unknown ticket {:?} ignored", response.ticket);
            continue;
        };
        ctx.log.push((pending.op.clone(), response.outcome.clone()));

        let created = match &response.outcome {
            Ok(created) => *created,
            Err(err) => {
                warn!("Executor rejected {:?}: {}", pending.op, err);
                ctx.status
                    .set(ControllerError::from(err.clone()).to_string(), true);
                continue;
            }
        };

        // Release the local replica right away instead of waiting for a
        // separate confirmation.
        if let ExecutorOp::Delete { target } = &pending.op {
            if let Some(mut entity) = ctx.commands.get_entity(target.entity()) {
                entity.despawn();
            }
        }

        match pending.purpose {
            ActionPurpose::LivePlace {
                session,
                template_id,
                transform,
            } => {
                let Some(object) = created else {
                    warn!("Executor placed '{}' without reporting an instance", template_id);
                    ctx.status
                        .set(ControllerError::MissingInstance(template_id).to_string(), true);
                    continue;
                };
                let current = ctx.placement.current_id() == Some(session);
                ctx.record_live(
                    current,
                    BuildAction::Place {
                        template_id,
                        transform,
                        object,
                    },
                );
            }
            ActionPurpose::LiveDelete {
                session,
                template_id,
                transform,
                target,
            } => {
                let current = ctx.deletion.current_id() == Some(session);
                ctx.record_live(
                    current,
                    BuildAction::Delete {
                        template_id,
                        transform,
                        object: target,
                    },
                );
            }
            ActionPurpose::Replay(plan) => ctx.finish_replay(&plan, created),
        }
    }
}

impl ResolveContext<'_, '_> {
    fn record_live(&mut self, session_current: bool, action: BuildAction) {
        if !session_current {
            warn!(
                "Discarding late result ({}) for a session that has ended",
                action.describe()
            );
            return;
        }
        let text = action.describe();
        let id = self.history.record(action);
        debug!("Recorded {:?}: {}", id, text);
        self.status.set(capitalize(&text), false);
    }

    fn finish_replay(&mut self, plan: &ReplayPlan, created: Option<ObjectRef>) {
        // Without the new instance the entry cannot be re-pointed; it stays put.
        if let (ReplayOp::Place { template_id, .. }, None) = (&plan.op, created) {
            warn!(
                "Replay of {:?} placed '{}' without reporting an instance",
                plan.command, template_id
            );
            self.status.set(
                ControllerError::MissingInstance(template_id.clone()).to_string(),
                true,
            );
            return;
        }
        let entry = match plan.direction {
            ReplayDirection::Undo => self.history.peek_undo(),
            ReplayDirection::Redo => self.history.peek_redo(),
        };
        let text = entry
            .filter(|e| e.id == plan.command)
            .map(|e| e.action.describe())
            .unwrap_or_default();

        if !self.history.finish(plan, created) {
            return;
        }
        let verb = match plan.direction {
            ReplayDirection::Undo => "Undo",
            ReplayDirection::Redo => "Redo",
        };
        info!("{} {:?}: {}", verb, plan.command, text);
        self.status.set(format!("{verb}: {text}"), false);
    }
}

/// Abandons a request the executor has not answered within
/// `executor_timeout_frames`. History is left as it was.
pub fn expire_pending_action(
    mut bridge: ResMut<ActionBridge>,
    mut status: ResMut<StatusMessage>,
    config: Res<ControllerConfig>,
) {
    let Some(expired) = bridge.age_pending(config.executor_timeout_frames) else {
        return;
    };
    warn!(
        "Executor did not answer {:?} ({:?}) within {} frames; abandoning it",
        expired.ticket, expired.op, config.executor_timeout_frames
    );
    status.set(
        ControllerError::ExecutorTimeout(expired.describe()).to_string(),
        true,
    );
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
