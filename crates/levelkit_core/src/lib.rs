//! Core data structures for levelkit
//!
//! This crate provides the fundamental types for representing layered object levels:
//! - `Level` - A complete level with settings, an object arena and eight layers
//! - `Layer` - Draw-ordered object ids on one layer
//! - `PlacedObject` - Placed objects with properties
//! - `LevelSettings` - Tile grid dimensions
//! - `TypeRegistry` - Object type id <-> name mapping
//! - `spatial` - Hit testing, rectangle overlap and grid snapping

mod error;
mod layer;
mod level;
mod object;
mod registry;
mod settings;
pub mod spatial;

pub use error::LevelError;
pub use layer::{check_layer, Layer, DEFAULT_LAYER, LAYER_COUNT};
pub use level::Level;
pub use object::{default_properties, PlacedObject, Property};
pub use registry::{ConfigError, TypeRegistry};
pub use settings::{LevelSettings, DEFAULT_TILE_SIZE};
pub use spatial::Rect;
