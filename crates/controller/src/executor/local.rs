//! In-process authoritative executor: validates requests against the
//! [`ObjectStore`], spawns replicas, and answers after a configurable delay.

use bevy::prelude::*;

use super::store::{ObjectStore, StoredObject};
use crate::bridge::{ExecutorOp, ExecutorOutcome, ExecutorRequest, ExecutorResponse};
use crate::error::ExecutorError;
use crate::objects::{ObjectRef, PlacedObject};
use crate::templates::TemplateRegistry;

#[derive(Resource, Debug, Clone, Default)]
pub struct LocalExecutorSettings {
    /// Frames to hold each request before answering. Zero answers in the
    /// frame the request was issued.
    pub latency_frames: u32,
    /// When set, every request is declined with this error.
    pub forced_rejection: Option<ExecutorError>,
}

/// Requests waiting out their latency.
#[derive(Resource, Debug, Default)]
pub struct LocalExecutorQueue {
    waiting: Vec<(u32, ExecutorRequest)>,
}

impl LocalExecutorQueue {
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}

pub fn run_local_executor(
    mut requests: EventReader<ExecutorRequest>,
    mut responses: EventWriter<ExecutorResponse>,
    mut queue: ResMut<LocalExecutorQueue>,
    mut store: ResMut<ObjectStore>,
    settings: Res<LocalExecutorSettings>,
    registry: Res<TemplateRegistry>,
    mut commands: Commands,
) {
    for request in requests.read() {
        queue.waiting.push((settings.latency_frames, request.clone()));
    }

    let mut still_waiting = Vec::new();
    for (frames_left, request) in std::mem::take(&mut queue.waiting) {
        if frames_left > 0 {
            still_waiting.push((frames_left - 1, request));
            continue;
        }
        let outcome = match &settings.forced_rejection {
            Some(err) => Err(err.clone()),
            None => execute(&request.op, &mut store, &registry, &mut commands),
        };
        debug!("LocalExecutor {:?} -> {:?}", request.op, outcome);
        responses.send(ExecutorResponse {
            ticket: request.ticket,
            outcome,
        });
    }
    queue.waiting = still_waiting;
}

fn execute(
    op: &ExecutorOp,
    store: &mut ObjectStore,
    registry: &TemplateRegistry,
    commands: &mut Commands,
) -> ExecutorOutcome {
    match op {
        ExecutorOp::Place {
            template_id,
            transform,
        } => {
            if !registry.contains(template_id) {
                return Err(ExecutorError::UnknownTemplate);
            }
            if store.occupied_at(transform.translation) {
                return Err(ExecutorError::Occupied);
            }
            let entity = commands
                .spawn((
                    PlacedObject {
                        template_id: template_id.clone(),
                    },
                    *transform,
                ))
                .id();
            let object = ObjectRef(entity);
            store.insert(
                object,
                StoredObject {
                    template_id: template_id.clone(),
                    transform: *transform,
                },
            );
            Ok(Some(object))
        }
        ExecutorOp::Delete { target } => match store.remove(*target) {
            Some(_) => Ok(None),
            None => Err(ExecutorError::NotFound),
        },
    }
}
