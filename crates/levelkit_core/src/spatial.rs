//! Spatial queries over object bounds
//!
//! Pure functions used for hit testing, rubber-band selection, overlap
//! highlighting and snap-to-grid. All coordinates are level pixels.

use std::collections::HashSet;
use uuid::Uuid;

use crate::{LevelSettings, PlacedObject};

/// Axis-aligned rectangle. Width and height may be negative until normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Same rectangle with non-negative width and height
    pub fn normalized(&self) -> Self {
        normalize_rect(self.x, self.y, self.width, self.height)
    }
}

/// Check whether a point lies strictly inside an object; edges are outside
pub fn contains(object: &PlacedObject, px: f32, py: f32) -> bool {
    px > object.x && px < object.x + object.width && py > object.y && py < object.y + object.height
}

/// Fold negative extents into the origin so width and height are non-negative
pub fn normalize_rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    let (x, width) = if width < 0.0 {
        (x + width, -width)
    } else {
        (x, width)
    };
    let (y, height) = if height < 0.0 {
        (y + height, -height)
    } else {
        (y, height)
    };
    Rect::new(x, y, width, height)
}

/// Open-interior overlap test; rectangles that only touch do not intersect
pub fn rect_intersects(a: &Rect, b: &Rect) -> bool {
    let a = a.normalized();
    let b = b.normalized();
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Bounding-box overlap between two objects
pub fn overlaps(a: &PlacedObject, b: &PlacedObject) -> bool {
    rect_intersects(&a.bounds(), &b.bounds())
}

/// Ids of every object overlapping at least one other object of the slice
pub fn overlapping_objects<'a>(
    objects: impl IntoIterator<Item = &'a PlacedObject>,
) -> HashSet<Uuid> {
    let objects: Vec<&PlacedObject> = objects.into_iter().collect();
    let mut result = HashSet::new();
    for (i, a) in objects.iter().enumerate() {
        for b in &objects[i + 1..] {
            if overlaps(a, b) {
                result.insert(a.id);
                result.insert(b.id);
            }
        }
    }
    result
}

/// Origin of the grid cell whose center is closest to `(x, y)`.
///
/// Ties between two cells go to the lower index. The result is clamped to
/// the cells of the level.
pub fn nearest_grid_point(x: f32, y: f32, settings: &LevelSettings) -> (f32, f32) {
    let tile = settings.tile_size() as f32;
    (
        snap_axis(x, tile, settings.width()),
        snap_axis(y, tile, settings.height()),
    )
}

fn snap_axis(value: f32, tile: f32, cells: u32) -> f32 {
    let t = (value - tile / 2.0) / tile;
    // ceil(t - 0.5) is round-half-down
    let index = (t - 0.5).ceil() as i64;
    index.clamp(0, cells as i64 - 1) as f32 * tile
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(x: f32, y: f32, w: f32, h: f32) -> PlacedObject {
        PlacedObject::new("grass", x, y, w, h)
    }

    #[test]
    fn test_contains_excludes_edges() {
        let o = object(10.0, 10.0, 32.0, 32.0);
        assert!(o.contains(11.0, 11.0));
        assert!(o.contains(41.9, 41.9));
        assert!(!o.contains(10.0, 20.0));
        assert!(!o.contains(20.0, 42.0));
        assert!(!o.contains(50.0, 20.0));
    }

    #[test]
    fn test_normalize_rect() {
        let rect = normalize_rect(10.0, 10.0, -5.0, -5.0);
        assert_eq!(rect, Rect::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(rect.normalized(), rect);

        assert_eq!(
            normalize_rect(0.0, 20.0, 8.0, -4.0),
            Rect::new(0.0, 16.0, 8.0, 4.0)
        );
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect_intersects(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(rect_intersects(&a, &Rect::new(2.0, 2.0, 2.0, 2.0)));
        // Touching edges
        assert!(!rect_intersects(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!rect_intersects(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Unnormalized input
        assert!(rect_intersects(&a, &Rect::new(15.0, 15.0, -10.0, -10.0)));
    }

    #[test]
    fn test_overlaps_is_symmetric() {
        let a = object(0.0, 0.0, 32.0, 32.0);
        let b = object(16.0, 16.0, 32.0, 32.0);
        let c = object(32.0, 0.0, 32.0, 32.0);

        for (x, y) in [(&a, &b), (&a, &c), (&b, &c)] {
            assert_eq!(overlaps(x, y), overlaps(y, x));
        }
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &c));
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_overlapping_objects_skips_self_pairs() {
        let a = object(0.0, 0.0, 32.0, 32.0);
        let b = object(16.0, 16.0, 32.0, 32.0);
        let lonely = object(200.0, 200.0, 32.0, 32.0);

        let result = overlapping_objects([&a, &b, &lonely]);
        assert_eq!(result, HashSet::from([a.id, b.id]));

        // A single object never overlaps itself
        assert!(overlapping_objects([&lonely]).is_empty());
    }

    #[test]
    fn test_nearest_grid_point() {
        let settings = LevelSettings::new(4, 4, 32).unwrap();
        assert_eq!(nearest_grid_point(47.0, 33.0, &settings), (32.0, 32.0));
        assert_eq!(nearest_grid_point(16.0, 16.0, &settings), (0.0, 0.0));
        assert_eq!(nearest_grid_point(100.0, 70.0, &settings), (96.0, 64.0));
    }

    #[test]
    fn test_nearest_grid_point_ties_go_low() {
        let settings = LevelSettings::new(4, 4, 32).unwrap();
        // 32 is equidistant from the centers of cells 0 (16) and 1 (48)
        assert_eq!(nearest_grid_point(32.0, 64.0, &settings), (0.0, 32.0));
    }

    #[test]
    fn test_nearest_grid_point_clamps() {
        let settings = LevelSettings::new(2, 3, 32).unwrap();
        assert_eq!(nearest_grid_point(-50.0, -50.0, &settings), (0.0, 0.0));
        assert_eq!(nearest_grid_point(1000.0, 1000.0, &settings), (32.0, 64.0));
    }

    #[test]
    fn test_nearest_grid_point_matches_brute_force() {
        let settings = LevelSettings::new(5, 5, 16).unwrap();
        let tile = 16.0_f32;
        let mut x = -10.0_f32;
        while x < 100.0 {
            let (gx, _) = nearest_grid_point(x, 0.0, &settings);
            let adjusted = x - tile / 2.0;
            let best = (0..5)
                .map(|i| i as f32 * tile)
                .fold(0.0_f32, |best, p| {
                    if (p - adjusted).abs() < (best - adjusted).abs() {
                        p
                    } else {
                        best
                    }
                });
            assert_eq!(gx, best, "x = {x}");
            x += 0.75;
        }
    }
}
