//! Transient per-mode state: the placement preview session and the deletion
//! targeting session. Neither is persisted; only a committed result becomes a
//! history entry.

use bevy::prelude::*;

use crate::error::ControllerError;
use crate::objects::{LiveObjects, ObjectRef};
use crate::templates::Template;

/// Identity of one session run. A fresh id is issued on every start, so a
/// late executor response can tell whether its session is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationAxis {
    X,
    #[default]
    Y,
    Z,
}

impl RotationAxis {
    /// X -> Y -> Z -> X.
    pub fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::Z,
            Self::Z => Self::X,
        }
    }

    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

/// Pointer-derived placement target, written each frame by the external
/// placement-transform collaborator (raycast, grid snapping).
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlacementCursor {
    pub translation: Vec3,
    pub valid: bool,
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ActivePlacement {
    pub id: SessionId,
    pub template_id: String,
    pub rotation: Quat,
    pub axis: RotationAxis,
}

/// A template that passed the session start checks. Installing it cannot
/// fail, so all validation happens before any mode state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPlacement {
    template_id: String,
}

impl PreparedPlacement {
    pub fn template_id(&self) -> &str {
        &self.template_id
    }
}

#[derive(Resource, Debug, Default)]
pub struct PlacementSession {
    active: Option<ActivePlacement>,
    next_id: u64,
}

impl PlacementSession {
    pub fn prepare(&self, template: &Template) -> Result<PreparedPlacement, ControllerError> {
        if template.locked {
            return Err(ControllerError::SessionStartFailed(format!(
                "{} is locked",
                template.display_name
            )));
        }
        Ok(PreparedPlacement {
            template_id: template.id.clone(),
        })
    }

    pub(crate) fn install(&mut self, prepared: PreparedPlacement) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.active = Some(ActivePlacement {
            id,
            template_id: prepared.template_id,
            rotation: Quat::IDENTITY,
            axis: RotationAxis::default(),
        });
        id
    }

    pub(crate) fn cancel(&mut self) -> Option<SessionId> {
        self.active.take().map(|a| a.id)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActivePlacement> {
        self.active.as_ref()
    }

    pub fn current_id(&self) -> Option<SessionId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Template currently being previewed.
    pub fn template_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.template_id.as_str())
    }

    /// Rotate the preview one step around the current axis. Clockwise is
    /// judged looking down the positive axis.
    pub fn rotate(&mut self, direction: RotationDirection, step_radians: f32) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let angle = match direction {
            RotationDirection::Clockwise => -step_radians,
            RotationDirection::CounterClockwise => step_radians,
        };
        active.rotation = (Quat::from_axis_angle(active.axis.unit(), angle) * active.rotation)
            .normalize();
        true
    }

    pub fn switch_axis(&mut self) -> Option<RotationAxis> {
        let active = self.active.as_mut()?;
        active.axis = active.axis.next();
        Some(active.axis)
    }

    /// Pose a commit would place the instance at, or `None` without a session
    /// or a valid cursor.
    pub fn preview_transform(&self, cursor: &PlacementCursor) -> Option<Transform> {
        let active = self.active.as_ref()?;
        if !cursor.valid {
            return None;
        }
        Some(Transform::from_translation(cursor.translation).with_rotation(active.rotation))
    }
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Entity under the pointer, written by the external picking collaborator.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HoveredObject(pub Option<Entity>);

#[derive(Resource, Debug, Default)]
pub struct DeletionSession {
    active: Option<SessionId>,
    target: Option<ObjectRef>,
    next_id: u64,
}

impl DeletionSession {
    pub(crate) fn start(&mut self) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.active = Some(id);
        self.target = None;
        id
    }

    pub(crate) fn stop(&mut self) -> Option<SessionId> {
        self.target = None;
        self.active.take()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_id(&self) -> Option<SessionId> {
        self.active
    }

    pub fn target(&self) -> Option<ObjectRef> {
        self.target
    }

    /// Ignored while the targeting loop is stopped.
    pub fn set_target(&mut self, target: Option<ObjectRef>) {
        if self.active.is_some() {
            self.target = target;
        }
    }
}

/// Targeting loop: follow the hovered entity while the deletion session runs,
/// keeping only live placed objects.
pub fn update_deletion_target(
    mut deletion: ResMut<DeletionSession>,
    hovered: Res<HoveredObject>,
    live: LiveObjects,
) {
    if !deletion.is_active() {
        return;
    }
    let target = hovered.0.map(ObjectRef).filter(|&o| live.is_live(o));
    if deletion.target() != target {
        deletion.set_target(target);
    }
}
