//! Command pattern for undo/redo

use levelkit_core::{Level, PlacedObject};
use tracing::debug;
use uuid::Uuid;

/// An object together with the layer slot it occupies
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    pub layer: usize,
    /// Draw-order index; refreshed every time the object leaves its layer
    pub index: usize,
    pub object: PlacedObject,
}

impl LayerEntry {
    pub fn new(layer: usize, index: usize, object: PlacedObject) -> Self {
        Self {
            layer,
            index,
            object,
        }
    }
}

/// One object's position before and after a move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectMove {
    pub id: Uuid,
    pub from: [f32; 2],
    pub to: [f32; 2],
}

/// A reversible edit of one or more objects
#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    /// Objects were added to layers
    Place { objects: Vec<LayerEntry> },
    /// Objects were removed from their layers
    Delete { objects: Vec<LayerEntry> },
    /// Objects changed position
    Move { objects: Vec<ObjectMove> },
}

impl EditEvent {
    /// Number of objects touched by the event
    pub fn len(&self) -> usize {
        match self {
            EditEvent::Place { objects } | EditEvent::Delete { objects } => objects.len(),
            EditEvent::Move { objects } => objects.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable label for Edit menu entries
    pub fn description(&self) -> String {
        let verb = match self {
            EditEvent::Place { .. } => "Place",
            EditEvent::Delete { .. } => "Delete",
            EditEvent::Move { .. } => "Move",
        };
        match self.len() {
            1 => format!("{verb} Object"),
            n => format!("{verb} {n} Objects"),
        }
    }

    /// Apply the forward effect (do/redo)
    pub fn apply(&mut self, level: &mut Level) {
        match self {
            EditEvent::Place { objects } => insert_entries(objects.iter_mut(), level),
            EditEvent::Delete { objects } => remove_entries(objects.iter_mut(), level),
            EditEvent::Move { objects } => {
                for m in objects.iter() {
                    if let Some(object) = level.object_mut(m.id) {
                        object.set_position(m.to);
                    }
                }
            }
        }
    }

    /// Apply the inverse effect (undo)
    pub fn revert(&mut self, level: &mut Level) {
        match self {
            EditEvent::Place { objects } => remove_entries(objects.iter_mut().rev(), level),
            EditEvent::Delete { objects } => insert_entries(objects.iter_mut().rev(), level),
            EditEvent::Move { objects } => {
                for m in objects.iter() {
                    if let Some(object) = level.object_mut(m.id) {
                        object.set_position(m.from);
                    }
                }
            }
        }
    }
}

fn insert_entries<'a>(entries: impl Iterator<Item = &'a mut LayerEntry>, level: &mut Level) {
    for entry in entries {
        if let Ok(index) = level.insert_object(entry.layer, entry.index, entry.object.clone()) {
            entry.index = index;
        }
    }
}

// Take the live object back into the entry so edits made while it was on the
// level survive a later re-insert.
fn remove_entries<'a>(entries: impl Iterator<Item = &'a mut LayerEntry>, level: &mut Level) {
    for entry in entries {
        if let Some((layer, index, object)) = level.remove_object(entry.object.id) {
            entry.layer = layer;
            entry.index = index;
            entry.object = object;
        }
    }
}

/// Linear undo/redo history
///
/// `applied` counts the events currently in effect; the event at
/// `applied - 1` is the next one to undo.
#[derive(Debug, Default)]
pub struct EditEventLog {
    events: Vec<EditEvent>,
    applied: usize,
}

impl EditEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event and add it to history
    pub fn execute(&mut self, mut event: EditEvent, level: &mut Level) {
        event.apply(level);
        self.record(event);
    }

    /// Add an event whose changes have already been applied (e.g., at the end of a drag).
    /// Anything that was undone is discarded.
    pub fn record(&mut self, event: EditEvent) {
        self.events.truncate(self.applied);
        debug!("Recorded edit: {}", event.description());
        self.events.push(event);
        self.applied = self.events.len();
    }

    /// Undo the most recent event
    pub fn undo(&mut self, level: &mut Level) -> bool {
        if self.applied == 0 {
            return false;
        }
        self.applied -= 1;
        let event = &mut self.events[self.applied];
        event.revert(level);
        debug!("Undid edit: {}", event.description());
        true
    }

    /// Redo the most recently undone event
    pub fn redo(&mut self, level: &mut Level) -> bool {
        let Some(event) = self.events.get_mut(self.applied) else {
            return false;
        };
        event.apply(level);
        debug!("Redid edit: {}", event.description());
        self.applied += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.events.len()
    }

    /// Get description of the event to undo
    pub fn undo_description(&self) -> Option<String> {
        self.applied
            .checked_sub(1)
            .and_then(|i| self.events.get(i))
            .map(EditEvent::description)
    }

    /// Get description of the event to redo
    pub fn redo_description(&self) -> Option<String> {
        self.events.get(self.applied).map(EditEvent::description)
    }

    /// Index of the newest event in effect, `None` when everything is undone
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.events.clear();
        self.applied = 0;
    }
}
