//! The level document edited by the UI
//!
//! All positions are level pixels; converting from screen coordinates
//! (zoom, scrolling) is the caller's job.

mod gesture;

use levelkit_codec::{load_level, save_level};
use levelkit_core::spatial::{self, nearest_grid_point, Rect};
use levelkit_core::{
    check_layer, Layer, Level, LevelError, LevelSettings, PlacedObject, TypeRegistry,
    DEFAULT_LAYER,
};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

use crate::commands::{Clipboard, EditEvent, EditEventLog, LayerEntry, ObjectMove, Selection};
use crate::EditError;

use gesture::{DragState, PaintStroke};

/// Template for new objects: a type and its natural size
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub type_name: String,
    /// Natural (unscaled) size in pixels
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Brush {
    pub fn new(type_name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            type_name: type_name.into(),
            width,
            height,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Build an object for a pointer position.
    ///
    /// With snapping the object's corner goes to the nearest grid cell,
    /// otherwise the object is centered on the pointer.
    pub fn instantiate(
        &self,
        pointer: [f32; 2],
        settings: &LevelSettings,
        snap_to_grid: bool,
    ) -> PlacedObject {
        let width = self.width * self.scale;
        let height = self.height * self.scale;
        let (x, y) = if snap_to_grid {
            nearest_grid_point(pointer[0], pointer[1], settings)
        } else {
            (pointer[0] - width / 2.0, pointer[1] - height / 2.0)
        };
        PlacedObject::new(self.type_name.clone(), x, y, width, height).with_scale(self.scale)
    }
}

/// A level plus its editing state
#[derive(Debug)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct LevelDocument {
    level: Level,
    history: EditEventLog,
    selection: Selection,
    clipboard: Clipboard,
    brush: Option<Brush>,
    current_layer: usize,
    snap_to_grid: bool,
    drag: Option<DragState>,
    stroke: Option<PaintStroke>,
    dirty: bool,
}

impl LevelDocument {
    /// Create a document holding an empty level
    pub fn new(settings: LevelSettings) -> Self {
        Self::from_level(Level::new(settings))
    }

    /// Create a document around an existing level
    pub fn from_level(level: Level) -> Self {
        Self {
            level,
            history: EditEventLog::new(),
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            brush: None,
            current_layer: DEFAULT_LAYER,
            snap_to_grid: true,
            drag: None,
            stroke: None,
            dirty: false,
        }
    }

    /// Start over with an empty level. Brush, layer and snapping are kept.
    pub fn new_level(&mut self, settings: LevelSettings) {
        self.reset(Level::new(settings));
    }

    /// Change the level size, keeping placed objects and history
    pub fn resize(&mut self, settings: LevelSettings) {
        self.finish_gestures();
        self.level.set_settings(settings);
        self.dirty = true;
    }

    fn reset(&mut self, level: Level) {
        self.level = level;
        self.history.clear();
        self.selection.clear();
        self.clipboard.clear();
        self.drag = None;
        self.stroke = None;
        self.dirty = false;
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn settings(&self) -> LevelSettings {
        self.level.settings()
    }

    pub fn layers(&self) -> &[Layer] {
        self.level.layers()
    }

    /// Objects of one layer in draw order
    pub fn layer_objects(&self, layer: usize) -> impl Iterator<Item = &PlacedObject> + '_ {
        self.level.layer_objects(layer)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected objects in selection order
    pub fn selected_objects(&self) -> impl Iterator<Item = &PlacedObject> + '_ {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.level.object(*id))
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn history(&self) -> &EditEventLog {
        &self.history
    }

    pub fn brush(&self) -> Option<&Brush> {
        self.brush.as_ref()
    }

    /// Pick the template for new objects; picking one clears the selection
    pub fn set_brush(&mut self, brush: Option<Brush>) {
        if brush.is_some() {
            self.selection.clear();
        }
        self.brush = brush;
    }

    pub fn current_layer(&self) -> usize {
        self.current_layer
    }

    pub fn set_current_layer(&mut self, layer: usize) -> Result<(), LevelError> {
        self.current_layer = check_layer(layer)?;
        Ok(())
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.snap_to_grid = snap;
    }

    /// Whether there are edits since the last save or load
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Place one object built from `template` on `layer`.
    ///
    /// An open drag is cancelled and an open paint stroke committed first,
    /// as for every other recorded edit.
    pub fn place_object(
        &mut self,
        template: &Brush,
        layer: usize,
        pointer: [f32; 2],
    ) -> Result<Uuid, EditError> {
        let layer = check_layer(layer)?;
        let object = template.instantiate(pointer, &self.level.settings(), self.snap_to_grid);
        if !object.has_positive_size() {
            return Err(EditError::InvalidSize {
                width: object.width,
                height: object.height,
            });
        }
        self.finish_gestures();
        let id = object.id;
        self.history.execute(
            EditEvent::Place {
                objects: vec![LayerEntry::new(layer, usize::MAX, object)],
            },
            &mut self.level,
        );
        self.dirty = true;
        Ok(id)
    }

    /// Place the current brush on the current layer
    pub fn place_with_brush(&mut self, pointer: [f32; 2]) -> Result<Uuid, EditError> {
        let brush = self.brush.clone().ok_or(EditError::NoBrush)?;
        self.place_object(&brush, self.current_layer, pointer)
    }

    /// Delete objects as one undoable step. Returns how many were removed.
    pub fn delete_objects(&mut self, ids: &[Uuid]) -> usize {
        self.finish_gestures();
        let mut seen = HashSet::new();
        let objects: Vec<LayerEntry> = ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| {
                let layer = self.level.layer_of(*id)?;
                let object = self.level.object(*id)?.clone();
                Some(LayerEntry::new(layer, 0, object))
            })
            .collect();
        if objects.is_empty() {
            return 0;
        }

        let count = objects.len();
        self.history
            .execute(EditEvent::Delete { objects }, &mut self.level);
        self.prune_selection();
        self.dirty = true;
        count
    }

    pub fn delete_selection(&mut self) -> usize {
        let ids = self.selection.ids().to_vec();
        self.delete_objects(&ids)
    }

    /// Move objects by a delta as one undoable step. Returns how many moved.
    pub fn move_objects(&mut self, ids: &[Uuid], dx: f32, dy: f32) -> usize {
        self.finish_gestures();
        if dx == 0.0 && dy == 0.0 {
            return 0;
        }
        let mut seen = HashSet::new();
        let objects: Vec<ObjectMove> = ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.level.object(*id))
            .map(|o| ObjectMove {
                id: o.id,
                from: o.position(),
                to: [o.x + dx, o.y + dy],
            })
            .collect();
        if objects.is_empty() {
            return 0;
        }

        let count = objects.len();
        self.history
            .execute(EditEvent::Move { objects }, &mut self.level);
        self.dirty = true;
        count
    }

    /// Topmost object of the current layer under the pointer
    pub fn object_at(&self, pointer: [f32; 2]) -> Option<Uuid> {
        self.level
            .layer_objects(self.current_layer)
            .filter(|o| o.contains(pointer[0], pointer[1]))
            .last()
            .map(|o| o.id)
    }

    /// Click selection on the current layer.
    ///
    /// Clicking an object that is already selected keeps the whole selection
    /// so it can be dragged; clicking empty space clears it.
    pub fn select_by_point(&mut self, pointer: [f32; 2]) -> Option<Uuid> {
        match self.object_at(pointer) {
            Some(id) => {
                if !self.selection.contains(id) {
                    self.selection.select_only(id);
                }
                Some(id)
            }
            None => {
                self.selection.clear();
                None
            }
        }
    }

    /// Rubber-band selection on the current layer. `rect` may have negative extents.
    pub fn select_by_rect(&mut self, rect: Rect) -> usize {
        let rect = rect.normalized();
        let ids: Vec<Uuid> = self
            .level
            .layer_objects(self.current_layer)
            .filter(|o| spatial::rect_intersects(&rect, &o.bounds()))
            .map(|o| o.id)
            .collect();
        self.selection.set(ids);
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Copy the selection. Returns the number of objects on the clipboard.
    pub fn copy_selection(&mut self) -> usize {
        self.clipboard.copy_selection(&self.selection, &self.level)
    }

    /// Paste the clipboard onto the current layer with the first copied
    /// object at `anchor`. The pasted objects become the selection.
    pub fn paste_clipboard(&mut self, anchor: [f32; 2]) -> Vec<Uuid> {
        self.finish_gestures();
        let layer = self.current_layer;
        let objects: Vec<LayerEntry> = self
            .clipboard
            .pasted(anchor)
            .into_iter()
            .map(|o| LayerEntry::new(layer, usize::MAX, o))
            .collect();
        if objects.is_empty() {
            return Vec::new();
        }

        let ids: Vec<Uuid> = objects.iter().map(|e| e.object.id).collect();
        self.history
            .execute(EditEvent::Place { objects }, &mut self.level);
        self.selection.set(ids.iter().copied());
        self.dirty = true;
        ids
    }

    /// Undo the last edit. An in-progress drag is cancelled and a paint
    /// stroke is committed first.
    pub fn undo(&mut self) -> bool {
        self.finish_gestures();
        let changed = self.history.undo(&mut self.level);
        if changed {
            self.prune_selection();
            self.dirty = true;
        }
        changed
    }

    /// Redo the last undone edit
    pub fn redo(&mut self) -> bool {
        self.finish_gestures();
        let changed = self.history.redo(&mut self.level);
        if changed {
            self.prune_selection();
            self.dirty = true;
        }
        changed
    }

    /// Objects of a layer that overlap another object of the same layer
    pub fn overlapping_objects(&self, layer: usize) -> HashSet<Uuid> {
        spatial::overlapping_objects(self.level.layer_objects(layer))
    }

    /// Set an object property. Property edits are not part of undo history.
    pub fn set_property(&mut self, id: Uuid, name: &str, value: impl Into<String>) -> bool {
        let Some(object) = self.level.object_mut(id) else {
            return false;
        };
        object.set_property(name, value);
        self.dirty = true;
        true
    }

    /// Write the level to `path`
    pub fn save(&mut self, path: impl AsRef<Path>, registry: &TypeRegistry) -> Result<(), EditError> {
        save_level(path, &self.level, registry)?;
        self.dirty = false;
        Ok(())
    }

    /// Replace the document with a level file. On failure the document is unchanged.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        registry: &TypeRegistry,
        tile_size: u32,
    ) -> Result<(), EditError> {
        let path = path.as_ref();
        let level = load_level(path, registry, tile_size)?;
        self.reset(level);
        info!("Opened {}", path.display());
        Ok(())
    }

    fn prune_selection(&mut self) {
        let level = &self.level;
        self.selection.retain(|id| level.contains(*id));
    }
}
