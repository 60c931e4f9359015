//! Template registry collaborator and the numeric hotkey index built from it.

use bevy::prelude::*;

use crate::config::HOTKEY_SLOTS;
use crate::ControllerSet;

/// A placeable prototype published by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: String,
    pub display_name: String,
    /// Locked templates are listed but cannot start a placement session.
    pub locked: bool,
}

impl Template {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            locked: false,
        }
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

/// Ordered set of available templates. Order is significant: it drives the
/// inventory layout and the hotkey slots.
#[derive(Resource, Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    /// Replace the published list. Later duplicates of an id are dropped.
    pub fn publish(&mut self, templates: impl IntoIterator<Item = Template>) {
        self.templates.clear();
        for template in templates {
            if self.contains(&template.id) {
                warn!("TemplateRegistry: duplicate template '{}' ignored", template.id);
                continue;
            }
            self.templates.push(template);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Maps hotkey slots `1..=9` to template ids. Only the first nine published
/// templates get a slot.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct HotkeyIndex {
    slots: Vec<String>,
}

impl HotkeyIndex {
    pub fn from_registry(registry: &TemplateRegistry) -> Self {
        Self {
            slots: registry
                .iter()
                .take(HOTKEY_SLOTS)
                .map(|t| t.id.clone())
                .collect(),
        }
    }

    /// Resolve a 1-based slot number.
    pub fn resolve(&self, slot: u8) -> Option<&str> {
        let index = usize::from(slot).checked_sub(1)?;
        self.slots.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Rebuild the hotkey index whenever the registry publishes a new list.
pub fn rebuild_hotkey_index(registry: Res<TemplateRegistry>, mut index: ResMut<HotkeyIndex>) {
    if !registry.is_changed() {
        return;
    }
    *index = HotkeyIndex::from_registry(&registry);
    debug!(
        "HotkeyIndex rebuilt: {} of {} templates bound",
        index.len(),
        registry.len()
    );
}

pub struct TemplatesPlugin;

impl Plugin for TemplatesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TemplateRegistry>()
            .init_resource::<HotkeyIndex>()
            .add_systems(Update, rebuild_hotkey_index.in_set(ControllerSet::Capture));
    }
}
