//! Object selection and clipboard for copy/paste operations

use levelkit_core::{Level, PlacedObject};
use uuid::Uuid;

/// Selected objects, in the order they were selected
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<Uuid>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the selection with a single object
    pub fn select_only(&mut self, id: Uuid) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Replace the selection
    pub fn set(&mut self, ids: impl IntoIterator<Item = Uuid>) {
        self.ids.clear();
        for id in ids {
            self.add(id);
        }
    }

    /// Add an object unless it is already selected
    pub fn add(&mut self, id: Uuid) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    pub fn retain(&mut self, keep: impl FnMut(&Uuid) -> bool) {
        self.ids.retain(keep);
    }
}

/// Copied objects, stored as independent values
#[derive(Debug, Default, Clone)]
pub struct Clipboard {
    objects: Vec<PlacedObject>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the selected objects out of the level.
    ///
    /// An empty selection leaves the clipboard untouched. Returns the number
    /// of objects now on the clipboard.
    pub fn copy_selection(&mut self, selection: &Selection, level: &Level) -> usize {
        if selection.is_empty() {
            return self.objects.len();
        }
        self.objects = selection
            .ids()
            .iter()
            .filter_map(|id| level.object(*id).cloned())
            .collect();
        self.objects.len()
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn has_content(&self) -> bool {
        !self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Fresh copies positioned so the first copied object lands on `anchor`
    /// and the rest keep their offsets to it
    pub fn pasted(&self, anchor: [f32; 2]) -> Vec<PlacedObject> {
        let Some(first) = self.objects.first() else {
            return Vec::new();
        };
        let dx = anchor[0] - first.x;
        let dy = anchor[1] - first.y;
        self.objects
            .iter()
            .map(|o| {
                let mut copy = o.duplicate();
                copy.set_position([o.x + dx, o.y + dy]);
                copy
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelkit_core::LevelSettings;

    #[test]
    fn test_selection_set_dedups() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut selection = Selection::new();
        selection.set([a, b, a]);
        assert_eq!(selection.ids(), &[a, b]);

        selection.select_only(b);
        assert_eq!(selection.ids(), &[b]);
        assert!(!selection.contains(a));
    }

    #[test]
    fn test_clipboard_holds_copies() {
        let mut level = Level::new(LevelSettings::new(10, 10, 32).unwrap());
        let id = level
            .add_object(3, PlacedObject::new("grass", 10.0, 20.0, 32.0, 32.0))
            .unwrap();
        let mut selection = Selection::new();
        selection.select_only(id);

        let mut clipboard = Clipboard::new();
        assert_eq!(clipboard.copy_selection(&selection, &level), 1);

        // Mutating the live object must not reach the copy
        let live = level.object_mut(id).unwrap();
        live.set_position([200.0, 200.0]);
        live.set_property("friction", "icy");

        let copy = &clipboard.objects()[0];
        assert_eq!(copy.position(), [10.0, 20.0]);
        assert_eq!(copy.get_property("friction"), Some("normal"));
    }

    #[test]
    fn test_empty_selection_keeps_clipboard() {
        let mut level = Level::new(LevelSettings::new(10, 10, 32).unwrap());
        let id = level
            .add_object(3, PlacedObject::new("grass", 0.0, 0.0, 32.0, 32.0))
            .unwrap();
        let mut selection = Selection::new();
        selection.select_only(id);
        let mut clipboard = Clipboard::new();
        clipboard.copy_selection(&selection, &level);

        assert_eq!(clipboard.copy_selection(&Selection::new(), &level), 1);
        assert!(clipboard.has_content());
    }

    #[test]
    fn test_pasted_keeps_relative_offsets() {
        let mut level = Level::new(LevelSettings::new(10, 10, 32).unwrap());
        let a = level
            .add_object(3, PlacedObject::new("grass", 32.0, 32.0, 32.0, 32.0))
            .unwrap();
        let b = level
            .add_object(3, PlacedObject::new("grass", 64.0, 96.0, 32.0, 32.0))
            .unwrap();
        let mut selection = Selection::new();
        selection.set([a, b]);
        let mut clipboard = Clipboard::new();
        clipboard.copy_selection(&selection, &level);

        let pasted = clipboard.pasted([100.0, 0.0]);
        assert_eq!(pasted.len(), 2);
        assert_eq!(pasted[0].position(), [100.0, 0.0]);
        assert_eq!(pasted[1].position(), [132.0, 64.0]);
        assert!(pasted.iter().all(|o| o.id != a && o.id != b));

        assert!(Clipboard::new().pasted([0.0, 0.0]).is_empty());
    }
}
