//! Pointer gestures that span several frames
//!
//! A drag moves objects live and records a single Move event when the
//! pointer is released. A paint stroke places objects live and records a
//! single Place event when it ends.

use levelkit_core::spatial::nearest_grid_point;
use uuid::Uuid;

use super::LevelDocument;
use crate::commands::{EditEvent, LayerEntry, ObjectMove};

/// Tracks an in-progress drag of the selection
#[derive(Debug, Clone)]
pub(super) struct DragState {
    anchor: Uuid,
    pointer_start: [f32; 2],
    /// Positions of every dragged object when the drag began
    origins: Vec<(Uuid, [f32; 2])>,
}

/// Objects placed since the stroke began, in placement order
#[derive(Debug, Clone, Default)]
pub(super) struct PaintStroke {
    placed: Vec<LayerEntry>,
}

impl LevelDocument {
    /// Start dragging the selection. The selected object under `pointer`
    /// becomes the anchor; returns false when there is none.
    pub fn begin_drag(&mut self, pointer: [f32; 2]) -> bool {
        self.finish_gestures();

        let Some(anchor) = self
            .selected_objects()
            .find(|o| o.contains(pointer[0], pointer[1]))
            .map(|o| o.id)
        else {
            return false;
        };
        let origins = self.selected_objects().map(|o| (o.id, o.position())).collect();
        self.drag = Some(DragState {
            anchor,
            pointer_start: pointer,
            origins,
        });
        true
    }

    /// Move the dragged objects to follow the pointer
    pub fn drag_to(&mut self, pointer: [f32; 2]) {
        let Some(drag) = &self.drag else {
            return;
        };
        let Some(anchor_origin) = drag
            .origins
            .iter()
            .find(|(id, _)| *id == drag.anchor)
            .map(|(_, position)| *position)
        else {
            return;
        };

        let (dx, dy) = if self.snap_to_grid {
            let (x, y) = nearest_grid_point(pointer[0], pointer[1], &self.level.settings());
            (x - anchor_origin[0], y - anchor_origin[1])
        } else {
            (
                pointer[0] - drag.pointer_start[0],
                pointer[1] - drag.pointer_start[1],
            )
        };

        for (id, origin) in &drag.origins {
            if let Some(object) = self.level.object_mut(*id) {
                object.set_position([origin[0] + dx, origin[1] + dy]);
            }
        }
    }

    /// Finish the drag, recording one Move event. Returns how many objects moved.
    pub fn end_drag(&mut self) -> usize {
        let Some(drag) = self.drag.take() else {
            return 0;
        };
        let objects: Vec<ObjectMove> = drag
            .origins
            .iter()
            .filter_map(|(id, from)| {
                let to = self.level.object(*id)?.position();
                (to != *from).then_some(ObjectMove {
                    id: *id,
                    from: *from,
                    to,
                })
            })
            .collect();
        if objects.is_empty() {
            return 0;
        }

        let count = objects.len();
        self.history.record(EditEvent::Move { objects });
        self.dirty = true;
        count
    }

    /// Abandon the drag and put everything back
    pub fn cancel_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        for (id, origin) in drag.origins {
            if let Some(object) = self.level.object_mut(id) {
                object.set_position(origin);
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start placing the brush continuously while the pointer moves
    pub fn begin_paint_stroke(&mut self) {
        self.finish_gestures();
        self.stroke = Some(PaintStroke::default());
    }

    /// Place the brush at `pointer` as part of the current stroke.
    ///
    /// Only places with snapping on, inside the level, and where the current
    /// layer has no object under the pointer.
    pub fn paint_at(&mut self, pointer: [f32; 2]) -> Option<Uuid> {
        if self.stroke.is_none() || !self.snap_to_grid {
            return None;
        }
        if !self.level.settings().contains_point(pointer[0], pointer[1]) {
            return None;
        }
        if self.object_at(pointer).is_some() {
            return None;
        }

        let brush = self.brush.as_ref()?;
        let object = brush.instantiate(pointer, &self.level.settings(), true);
        if !object.has_positive_size() {
            return None;
        }
        let id = object.id;
        let layer = self.current_layer;
        let index = self
            .level
            .insert_object(layer, usize::MAX, object.clone())
            .ok()?;

        self.stroke
            .as_mut()?
            .placed
            .push(LayerEntry::new(layer, index, object));
        self.dirty = true;
        Some(id)
    }

    /// Finish the stroke, recording one Place event. Returns how many objects
    /// the stroke placed.
    pub fn end_paint_stroke(&mut self) -> usize {
        let Some(stroke) = self.stroke.take() else {
            return 0;
        };
        if stroke.placed.is_empty() {
            return 0;
        }

        let count = stroke.placed.len();
        self.history.record(EditEvent::Place {
            objects: stroke.placed,
        });
        count
    }

    pub fn is_painting(&self) -> bool {
        self.stroke.is_some()
    }

    pub(super) fn finish_gestures(&mut self) {
        self.cancel_drag();
        self.end_paint_stroke();
    }
}

#[cfg(test)]
mod tests {
    use crate::document::Brush;
    use crate::LevelDocument;
    use levelkit_core::spatial::Rect;
    use levelkit_core::LevelSettings;

    fn document() -> LevelDocument {
        let mut document = LevelDocument::new(LevelSettings::new(10, 10, 32).unwrap());
        document.set_brush(Some(Brush::new("grass", 32.0, 32.0)));
        document
    }

    fn position(document: &LevelDocument, id: uuid::Uuid) -> [f32; 2] {
        document.level().object(id).unwrap().position()
    }

    #[test]
    fn test_drag_snaps_anchor_and_others_follow() {
        let mut document = document();
        let a = document.place_with_brush([16.0, 16.0]).unwrap();
        let b = document.place_with_brush([80.0, 16.0]).unwrap();
        document.select_by_rect(Rect::new(0.0, 0.0, 128.0, 32.0));

        assert!(document.begin_drag([10.0, 10.0]));
        document.drag_to([70.0, 100.0]);
        assert_eq!(position(&document, a), [64.0, 96.0]);
        assert_eq!(position(&document, b), [128.0, 96.0]);

        assert_eq!(document.end_drag(), 2);
        assert!(!document.is_dragging());
        assert_eq!(document.history().len(), 3);

        document.undo();
        assert_eq!(position(&document, a), [0.0, 0.0]);
        assert_eq!(position(&document, b), [64.0, 0.0]);
    }

    #[test]
    fn test_drag_without_snap_follows_pointer() {
        let mut document = document();
        let a = document.place_with_brush([16.0, 16.0]).unwrap();
        document.set_snap_to_grid(false);
        document.select_by_point([10.0, 10.0]);

        assert!(document.begin_drag([10.0, 10.0]));
        document.drag_to([15.0, 13.0]);
        document.drag_to([25.0, 17.0]);
        assert_eq!(position(&document, a), [15.0, 7.0]);
        assert_eq!(document.end_drag(), 1);
    }

    #[test]
    fn test_drag_requires_selected_object_under_pointer() {
        let mut document = document();
        document.place_with_brush([16.0, 16.0]).unwrap();
        assert!(!document.begin_drag([10.0, 10.0]));

        document.select_by_point([10.0, 10.0]);
        assert!(!document.begin_drag([200.0, 200.0]));
        assert!(!document.is_dragging());
    }

    #[test]
    fn test_drag_back_to_start_records_nothing() {
        let mut document = document();
        document.place_with_brush([16.0, 16.0]).unwrap();
        document.select_by_point([10.0, 10.0]);

        assert!(document.begin_drag([10.0, 10.0]));
        document.drag_to([100.0, 100.0]);
        document.drag_to([5.0, 5.0]);
        assert_eq!(document.end_drag(), 0);
        assert_eq!(document.history().len(), 1);
    }

    #[test]
    fn test_cancel_drag_restores_positions() {
        let mut document = document();
        let a = document.place_with_brush([16.0, 16.0]).unwrap();
        document.select_by_point([10.0, 10.0]);

        document.begin_drag([10.0, 10.0]);
        document.drag_to([200.0, 200.0]);
        document.cancel_drag();
        assert_eq!(position(&document, a), [0.0, 0.0]);
        assert_eq!(document.history().len(), 1);
    }

    #[test]
    fn test_undo_during_drag_cancels_it() {
        let mut document = document();
        let a = document.place_with_brush([16.0, 16.0]).unwrap();
        let b = document.place_with_brush([80.0, 16.0]).unwrap();
        document.select_by_point([70.0, 10.0]);

        document.begin_drag([70.0, 10.0]);
        document.drag_to([200.0, 200.0]);
        assert!(document.undo());
        assert!(!document.is_dragging());
        assert!(!document.level().contains(b));
        assert_eq!(position(&document, a), [0.0, 0.0]);
    }

    #[test]
    fn test_paint_stroke_is_one_event() {
        let mut document = document();
        document.begin_paint_stroke();
        assert!(document.paint_at([16.0, 16.0]).is_some());
        // Same cell again is occupied
        assert!(document.paint_at([20.0, 20.0]).is_none());
        assert!(document.paint_at([48.0, 16.0]).is_some());
        assert!(document.paint_at([80.0, 16.0]).is_some());
        // Outside the level
        assert!(document.paint_at([-5.0, 16.0]).is_none());
        assert!(document.paint_at([400.0, 16.0]).is_none());

        assert_eq!(document.end_paint_stroke(), 3);
        assert_eq!(document.history().len(), 1);
        assert_eq!(
            document.history().undo_description().as_deref(),
            Some("Place 3 Objects")
        );

        document.undo();
        assert!(document.level().is_empty());
        document.redo();
        let positions: Vec<[f32; 2]> = document.layer_objects(3).map(|o| o.position()).collect();
        assert_eq!(positions, vec![[0.0, 0.0], [32.0, 0.0], [64.0, 0.0]]);
    }

    #[test]
    fn test_paint_requires_snap_and_stroke() {
        let mut document = document();
        assert!(document.paint_at([16.0, 16.0]).is_none());

        document.set_snap_to_grid(false);
        document.begin_paint_stroke();
        assert!(document.paint_at([16.0, 16.0]).is_none());
        assert_eq!(document.end_paint_stroke(), 0);
        assert!(document.history().is_empty());
    }

    #[test]
    fn test_delete_during_stroke_commits_it_first() {
        let mut document = document();
        document.begin_paint_stroke();
        let painted = document.paint_at([16.0, 16.0]).unwrap();

        assert_eq!(document.delete_objects(&[painted]), 1);
        assert!(!document.is_painting());
        assert_eq!(document.end_paint_stroke(), 0);
        assert_eq!(document.history().len(), 2);

        assert!(document.undo());
        assert!(document.redo());
        assert!(document.level().is_empty());

        assert!(document.undo());
        assert!(document.undo());
        assert!(document.level().is_empty());
        assert!(!document.undo());
    }

    #[test]
    fn test_move_during_drag_cancels_it_first() {
        let mut document = document();
        let a = document.place_with_brush([16.0, 16.0]).unwrap();
        document.select_by_point([10.0, 10.0]);

        assert!(document.begin_drag([10.0, 10.0]));
        document.drag_to([56.0, 16.0]);
        assert_eq!(position(&document, a), [32.0, 0.0]);

        assert_eq!(document.move_objects(&[a], 0.0, 100.0), 1);
        assert!(!document.is_dragging());
        assert_eq!(position(&document, a), [0.0, 100.0]);
        assert_eq!(document.end_drag(), 0);

        assert!(document.undo());
        assert_eq!(position(&document, a), [0.0, 0.0]);
        assert!(document.undo());
        assert!(document.level().is_empty());
    }

    #[test]
    fn test_starting_a_drag_commits_open_stroke() {
        let mut document = document();
        document.begin_paint_stroke();
        document.paint_at([16.0, 16.0]).unwrap();
        document.select_by_point([10.0, 10.0]);

        assert!(document.begin_drag([10.0, 10.0]));
        assert!(!document.is_painting());
        document.drag_to([80.0, 16.0]);
        assert_eq!(document.end_drag(), 1);

        let descriptions: Vec<Option<String>> = (0..2)
            .map(|_| {
                let description = document.history().undo_description();
                document.undo();
                description
            })
            .collect();
        assert_eq!(
            descriptions,
            vec![Some("Move Object".to_string()), Some("Place Object".to_string())]
        );
        assert!(document.level().is_empty());
    }

    #[test]
    fn test_paint_skips_degenerate_brush() {
        let mut document = document();
        document.set_brush(Some(Brush::new("grass", 32.0, 32.0).with_scale(0.0)));
        document.begin_paint_stroke();
        assert!(document.paint_at([16.0, 16.0]).is_none());
        assert_eq!(document.end_paint_stroke(), 0);
        assert!(document.level().is_empty());
    }

    #[test]
    fn test_undo_commits_open_stroke() {
        let mut document = document();
        document.begin_paint_stroke();
        document.paint_at([16.0, 16.0]);
        document.paint_at([48.0, 16.0]);

        assert!(document.undo());
        assert!(!document.is_painting());
        assert!(document.level().is_empty());
        assert!(document.redo());
        assert_eq!(document.level().object_count(), 2);
    }
}
