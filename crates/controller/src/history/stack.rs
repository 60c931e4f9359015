//! The `CommandHistory` resource.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::types::{BuildAction, CommandId, HistoryEntry, ReplayDirection, ReplayOp, ReplayPlan};
use crate::config::DEFAULT_HISTORY_CAPACITY;
use crate::error::ControllerError;
use crate::objects::ObjectRef;

/// Undo and redo stacks. The back of each deque is the top; the front of the
/// undo stack is the oldest entry and the first to go at capacity.
#[derive(Resource, Debug)]
pub struct CommandHistory {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: VecDeque<HistoryEntry>,
    capacity: usize,
    next_id: u64,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl CommandHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: VecDeque::new(),
            capacity,
            next_id: 0,
        }
    }

    /// Push a newly committed action, clearing the redo stack. If the undo
    /// stack exceeds its capacity the oldest entry is dropped.
    pub fn record(&mut self, action: BuildAction) -> CommandId {
        let id = CommandId(self.next_id);
        self.next_id += 1;
        self.redo_stack.clear();
        self.push_undo(HistoryEntry { id, action });
        id
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo entries, oldest first.
    pub fn undo_entries(&self) -> &VecDeque<HistoryEntry> {
        &self.undo_stack
    }

    /// Redo entries, oldest first.
    pub fn redo_entries(&self) -> &VecDeque<HistoryEntry> {
        &self.redo_stack
    }

    pub fn peek_undo(&self) -> Option<&HistoryEntry> {
        self.undo_stack.back()
    }

    pub fn peek_redo(&self) -> Option<&HistoryEntry> {
        self.redo_stack.back()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Work out the executor call that reverses the top undo entry.
    ///
    /// Undoing a placement deletes its instance, which must still be live.
    /// Undoing a deletion places a fresh instance from the stored template
    /// and transform. Neither stack is touched.
    pub fn plan_undo(
        &self,
        is_live: impl Fn(ObjectRef) -> bool,
    ) -> Result<ReplayPlan, ControllerError> {
        let entry = self.peek_undo().ok_or(ControllerError::NothingToUndo)?;
        let op = match &entry.action {
            BuildAction::Place { object, .. } => {
                if !is_live(*object) {
                    return Err(ControllerError::StaleReference);
                }
                ReplayOp::Delete { target: *object }
            }
            BuildAction::Delete {
                template_id,
                transform,
                ..
            } => ReplayOp::Place {
                template_id: template_id.clone(),
                transform: *transform,
            },
        };
        Ok(ReplayPlan {
            command: entry.id,
            direction: ReplayDirection::Undo,
            op,
        })
    }

    /// Work out the executor call that repeats the top redo entry.
    pub fn plan_redo(
        &self,
        is_live: impl Fn(ObjectRef) -> bool,
    ) -> Result<ReplayPlan, ControllerError> {
        let entry = self.peek_redo().ok_or(ControllerError::NothingToRedo)?;
        let op = match &entry.action {
            BuildAction::Place {
                template_id,
                transform,
                ..
            } => ReplayOp::Place {
                template_id: template_id.clone(),
                transform: *transform,
            },
            BuildAction::Delete { object, .. } => {
                if !is_live(*object) {
                    return Err(ControllerError::StaleReference);
                }
                ReplayOp::Delete { target: *object }
            }
        };
        Ok(ReplayPlan {
            command: entry.id,
            direction: ReplayDirection::Redo,
            op,
        })
    }

    /// Move the top undo entry to the redo stack after a confirmed reversal.
    ///
    /// `created` is the instance the executor made while undoing a deletion;
    /// every reference to the removed instance is re-pointed at it. Returns
    /// false, and changes nothing, if `id` is not the top entry.
    pub fn finish_undo(&mut self, id: CommandId, created: Option<ObjectRef>) -> bool {
        if self.peek_undo().map(|e| e.id) != Some(id) {
            warn!("CommandHistory: undo result for {:?} no longer matches the top entry", id);
            return false;
        }
        let Some(mut entry) = self.undo_stack.pop_back() else {
            return false;
        };
        if let Some(new) = created {
            let old = entry.action.object();
            entry.action.set_object(new);
            self.remap(old, new);
        }
        self.redo_stack.push_back(entry);
        true
    }

    /// Move the top redo entry back onto the undo stack after a confirmed
    /// replay. The rest of the redo stack is kept.
    pub fn finish_redo(&mut self, id: CommandId, created: Option<ObjectRef>) -> bool {
        if self.peek_redo().map(|e| e.id) != Some(id) {
            warn!("CommandHistory: redo result for {:?} no longer matches the top entry", id);
            return false;
        }
        let Some(mut entry) = self.redo_stack.pop_back() else {
            return false;
        };
        if let Some(new) = created {
            let old = entry.action.object();
            entry.action.set_object(new);
            self.remap(old, new);
        }
        self.push_undo(entry);
        true
    }

    pub fn finish(&mut self, plan: &ReplayPlan, created: Option<ObjectRef>) -> bool {
        match plan.direction {
            ReplayDirection::Undo => self.finish_undo(plan.command, created),
            ReplayDirection::Redo => self.finish_redo(plan.command, created),
        }
    }

    /// Live instances referenced by more than one entry of the same stack.
    /// Empty under normal operation.
    pub fn duplicate_live_references(&self, is_live: impl Fn(ObjectRef) -> bool) -> Vec<ObjectRef> {
        let mut duplicates = Vec::new();
        for stack in [&self.undo_stack, &self.redo_stack] {
            let live: Vec<ObjectRef> = stack
                .iter()
                .map(|e| e.action.object())
                .filter(|&o| is_live(o))
                .collect();
            for (i, a) in live.iter().enumerate() {
                if live[i + 1..].contains(a) && !duplicates.contains(a) {
                    duplicates.push(*a);
                }
            }
        }
        duplicates
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, entry: HistoryEntry) {
        if self.undo_stack.len() >= self.capacity {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(entry);
    }

    fn remap(&mut self, old: ObjectRef, new: ObjectRef) {
        for entry in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
            if entry.action.object() == old {
                entry.action.set_object(new);
            }
        }
    }
}
