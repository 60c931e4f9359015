//! Undo/redo history for committed placements and removals.
//!
//! A `CommandHistory` resource keeps two stacks of `BuildAction`s. Nothing is
//! popped until the executor confirms the reversal: `plan_undo`/`plan_redo`
//! only inspect the top entry, and `finish_undo`/`finish_redo` move it once
//! the response is in. A rejected or stale reversal therefore leaves both
//! stacks exactly as they were.

pub mod stack;
pub mod types;


pub use stack::CommandHistory;
pub use types::{BuildAction, CommandId, HistoryEntry, ReplayDirection, ReplayOp, ReplayPlan};
