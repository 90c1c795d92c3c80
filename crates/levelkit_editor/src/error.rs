use levelkit_codec::CodecError;
use levelkit_core::LevelError;
use thiserror::Error;

/// Errors raised by document operations
#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("No object type is selected for placement")]
    NoBrush,
    #[error("Cannot place an object of size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
}
