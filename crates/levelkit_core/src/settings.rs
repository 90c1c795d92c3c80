//! Level dimensions

use serde::{Deserialize, Serialize};

use crate::LevelError;

/// Tile size assumed when a level file does not say otherwise
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// Size of a level in tiles and the pixel size of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSettings {
    width: u32,
    height: u32,
    tile_size: u32,
}

impl LevelSettings {
    /// Create settings, rejecting any dimension below 1 or beyond `i32::MAX`
    pub fn new(width: i64, height: i64, tile_size: i64) -> Result<Self, LevelError> {
        let valid = |v: i64| (1..=i32::MAX as i64).contains(&v);
        if !(valid(width) && valid(height) && valid(tile_size)) {
            return Err(LevelError::InvalidSettings {
                width,
                height,
                tile_size,
            });
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
            tile_size: tile_size as u32,
        })
    }

    /// Width in tiles
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels per tile
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Level width in pixels
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_size as f32
    }

    /// Level height in pixels
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_size as f32
    }

    /// Check whether a pixel position lies on the level area (edges included)
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && x <= self.pixel_width() && y >= 0.0 && y <= self.pixel_height()
    }
}
