use bevy::prelude::*;

use super::sessions::{DeletionSession, PlacementSession, PreparedPlacement, SessionId};

/// The exclusive interaction mode bound to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    None,
    Place,
    Delete,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::None => "None",
            Mode::Place => "Place",
            Mode::Delete => "Delete",
        }
    }
}

/// Sent to the presentation layer whenever the mode actually changes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChanged {
    pub previous: Mode,
    pub current: Mode,
}

/// Owner of the current mode. Input handlers never assign the mode directly;
/// every change goes through [`ModeMachine::request_mode`] or
/// [`ModeMachine::begin_placement`], which tear down the outgoing mode's
/// session before the incoming one is set up.
#[derive(Resource, Debug, Default)]
pub struct ModeMachine {
    current: Mode,
    session_active: bool,
}

impl ModeMachine {
    pub fn current(&self) -> Mode {
        self.current
    }

    /// A preview session is running (distinct from merely having `Place`
    /// selected).
    pub fn session_active(&self) -> bool {
        self.session_active
    }

    pub fn is_placing(&self) -> bool {
        self.current == Mode::Place && self.session_active
    }

    pub fn request_mode(
        &mut self,
        next: Mode,
        placement: &mut PlacementSession,
        deletion: &mut DeletionSession,
    ) -> Option<ModeChanged> {
        if next == self.current {
            return None;
        }
        let previous = self.current;

        match previous {
            Mode::Place => {
                if let Some(id) = placement.cancel() {
                    debug!("Placement session {:?} cancelled on mode exit", id);
                }
                self.session_active = false;
            }
            Mode::Delete => {
                deletion.stop();
            }
            Mode::None => {}
        }

        self.current = next;

        match next {
            Mode::Delete => {
                deletion.start();
            }
            Mode::None => {
                // Safe from any state, including error recovery.
                placement.cancel();
                deletion.stop();
                self.session_active = false;
            }
            Mode::Place => {}
        }

        info!("Mode {} -> {}", previous.label(), next.label());
        Some(ModeChanged {
            previous,
            current: next,
        })
    }

    /// Enter `Place` with a new session for an already validated template,
    /// replacing any running session and stopping deletion targeting.
    pub fn begin_placement(
        &mut self,
        prepared: PreparedPlacement,
        placement: &mut PlacementSession,
        deletion: &mut DeletionSession,
    ) -> (SessionId, Option<ModeChanged>) {
        let previous = self.current;
        if previous == Mode::Delete {
            deletion.stop();
        }
        if let Some(old) = placement.cancel() {
            debug!("Placement session {:?} replaced", old);
        }

        let template_id = prepared.template_id().to_string();
        self.current = Mode::Place;
        let id = placement.install(prepared);
        self.session_active = true;
        info!("Placement session {:?} started for '{}'", id, template_id);

        let changed = (previous != Mode::Place).then(|| {
            info!("Mode {} -> {}", previous.label(), Mode::Place.label());
            ModeChanged {
                previous,
                current: Mode::Place,
            }
        });
        (id, changed)
    }

    /// End the placement session without leaving `Place`.
    pub fn cancel_session(&mut self, placement: &mut PlacementSession) -> bool {
        if self.current != Mode::Place || !placement.is_active() {
            return false;
        }
        placement.cancel();
        self.session_active = false;
        true
    }

    /// At most one session runs, and it belongs to the current mode.
    pub fn invariant_holds(&self, placement: &PlacementSession, deletion: &DeletionSession) -> bool {
        match self.current {
            Mode::None => !placement.is_active() && !deletion.is_active() && !self.session_active,
            Mode::Place => {
                !deletion.is_active() && placement.is_active() == self.session_active
            }
            Mode::Delete => deletion.is_active() && !placement.is_active() && !self.session_active,
        }
    }
}
