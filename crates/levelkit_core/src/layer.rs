//! Draw-ordered object layers

use uuid::Uuid;

use crate::LevelError;

/// Number of layers every level has
pub const LAYER_COUNT: usize = 8;

/// Layer new objects go to unless the caller picks another one
pub const DEFAULT_LAYER: usize = 3;

/// Validate a layer index
pub fn check_layer(layer: usize) -> Result<usize, LevelError> {
    if layer < LAYER_COUNT {
        Ok(layer)
    } else {
        Err(LevelError::LayerOutOfRange(layer))
    }
}

/// A layer holding object ids in draw order (first drawn first)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    objects: Vec<Uuid>,
}

impl Layer {
    /// Create an empty layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Object ids in draw order
    pub fn ids(&self) -> &[Uuid] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.objects.contains(&id)
    }

    /// Position of an id in draw order
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.objects.iter().position(|o| *o == id)
    }

    pub(crate) fn push(&mut self, id: Uuid) {
        self.objects.push(id);
    }

    /// Insert at `index`, appending when the index is past the end.
    /// Returns the index actually used.
    pub(crate) fn insert(&mut self, index: usize, id: Uuid) -> usize {
        let index = index.min(self.objects.len());
        self.objects.insert(index, id);
        index
    }

    /// Remove an id, returning the index it was at
    pub(crate) fn remove(&mut self, id: Uuid) -> Option<usize> {
        let index = self.position(id)?;
        self.objects.remove(index);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_layer() {
        assert_eq!(check_layer(0), Ok(0));
        assert_eq!(check_layer(7), Ok(7));
        assert_eq!(check_layer(8), Err(LevelError::LayerOutOfRange(8)));
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut layer = Layer::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        layer.push(a);
        assert_eq!(layer.insert(10, b), 1);
        assert_eq!(layer.ids(), &[a, b]);
    }

    #[test]
    fn test_remove_reports_index() {
        let mut layer = Layer::new();
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            layer.push(*id);
        }

        assert_eq!(layer.remove(ids[1]), Some(1));
        assert_eq!(layer.remove(ids[1]), None);
        assert_eq!(layer.ids(), &[ids[0], ids[2]]);
    }
}
