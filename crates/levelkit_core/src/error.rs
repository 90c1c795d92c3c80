use thiserror::Error;

/// Errors raised when building or addressing a level
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("Invalid level settings {width}x{height} tiles of {tile_size}px: all values must be at least 1")]
    InvalidSettings {
        width: i64,
        height: i64,
        tile_size: i64,
    },
    #[error("Layer {0} is out of range (levels have {count} layers)", count = crate::LAYER_COUNT)]
    LayerOutOfRange(usize),
}
