//! Placed object instances

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::spatial::{self, Rect};

/// A named string property attached to an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Properties every new object of the given type starts with
pub fn default_properties(type_name: &str) -> Vec<Property> {
    match type_name {
        "grass" => vec![
            Property::new("friction", "normal"),
            Property::new("length", "short"),
        ],
        _ => Vec::new(),
    }
}

/// An object placed in a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Unique identifier for this instance
    pub id: Uuid,
    /// Type name (e.g., "grass"), resolved through the type registry on save
    pub type_name: String,
    /// Top-left corner in pixels
    pub x: f32,
    pub y: f32,
    /// Size in pixels, already multiplied by `scale`
    pub width: f32,
    pub height: f32,
    /// Scale applied at placement time
    pub scale: f32,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl PlacedObject {
    /// Create an object with a fresh id and the type's default properties
    pub fn new(type_name: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        let type_name = type_name.into();
        let properties = default_properties(&type_name);
        Self {
            id: Uuid::new_v4(),
            type_name,
            x,
            y,
            width,
            height,
            scale: 1.0,
            properties,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Deep copy with a fresh id
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    pub fn set_position(&mut self, position: [f32; 2]) {
        self.x = position[0];
        self.y = position[1];
    }

    /// Bounding box in pixels
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Width and height are both finite and greater than zero
    pub fn has_positive_size(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Check whether a point lies strictly inside the object
    pub fn contains(&self, px: f32, py: f32) -> bool {
        spatial::contains(self, px, py)
    }

    /// Get a property value
    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Set a property, keeping its position in the list when it already exists
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(property) => property.value = value,
            None => self.properties.push(Property::new(name, value)),
        }
    }
}
