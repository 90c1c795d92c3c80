//! A level: settings, the object arena and its eight layers

use std::collections::HashMap;
use uuid::Uuid;

use crate::{check_layer, Layer, LevelError, LevelSettings, PlacedObject, LAYER_COUNT};

/// A complete level
///
/// Objects live in an arena keyed by id; layers only hold ids in draw order.
/// Every object in the arena is referenced by exactly one layer.
#[derive(Debug, Clone)]
pub struct Level {
    settings: LevelSettings,
    objects: HashMap<Uuid, PlacedObject>,
    layers: Vec<Layer>,
}

impl Level {
    /// Create an empty level
    pub fn new(settings: LevelSettings) -> Self {
        Self {
            settings,
            objects: HashMap::new(),
            layers: vec![Layer::new(); LAYER_COUNT],
        }
    }

    pub fn settings(&self) -> LevelSettings {
        self.settings
    }

    /// Replace the settings, keeping every placed object where it is
    pub fn set_settings(&mut self, settings: LevelSettings) {
        self.settings = settings;
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, layer: usize) -> Result<&Layer, LevelError> {
        Ok(&self.layers[check_layer(layer)?])
    }

    /// Append an object to the top of a layer
    pub fn add_object(&mut self, layer: usize, object: PlacedObject) -> Result<Uuid, LevelError> {
        let layer = check_layer(layer)?;
        let id = object.id;
        self.detach(id);
        self.layers[layer].push(id);
        self.objects.insert(id, object);
        Ok(id)
    }

    /// Insert an object at a draw-order position, clamped to the layer length.
    /// Returns the index actually used.
    pub fn insert_object(
        &mut self,
        layer: usize,
        index: usize,
        object: PlacedObject,
    ) -> Result<usize, LevelError> {
        let layer = check_layer(layer)?;
        let id = object.id;
        self.detach(id);
        let index = self.layers[layer].insert(index, id);
        self.objects.insert(id, object);
        Ok(index)
    }

    /// Remove an object, returning `(layer, index, object)`
    pub fn remove_object(&mut self, id: Uuid) -> Option<(usize, usize, PlacedObject)> {
        let object = self.objects.remove(&id)?;
        let (layer, index) = self
            .layers
            .iter_mut()
            .enumerate()
            .find_map(|(l, layer)| layer.remove(id).map(|i| (l, i)))?;
        Some((layer, index, object))
    }

    pub fn object(&self, id: Uuid) -> Option<&PlacedObject> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: Uuid) -> Option<&mut PlacedObject> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.objects.contains_key(&id)
    }

    /// The layer an object is on
    pub fn layer_of(&self, id: Uuid) -> Option<usize> {
        self.layers.iter().position(|layer| layer.contains(id))
    }

    /// Objects of one layer in draw order
    pub fn layer_objects(&self, layer: usize) -> impl Iterator<Item = &PlacedObject> + '_ {
        self.layers
            .get(layer)
            .map(|l| l.ids())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.objects.get(id))
    }

    /// All objects as `(layer, object)`, layer by layer in draw order
    pub fn objects(&self) -> impl Iterator<Item = (usize, &PlacedObject)> + '_ {
        (0..LAYER_COUNT).flat_map(move |layer| self.layer_objects(layer).map(move |o| (layer, o)))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Count objects of a given type across all layers
    pub fn count_objects_of_type(&self, type_name: &str) -> usize {
        self.objects
            .values()
            .filter(|o| o.type_name == type_name)
            .count()
    }

    // An id re-added while still present must not end up on two layers.
    fn detach(&mut self, id: Uuid) {
        if self.objects.remove(&id).is_some() {
            for layer in &mut self.layers {
                layer.remove(id);
            }
        }
    }
}
