//! Saving and loading level files

use levelkit_core::{Level, TypeRegistry};
use std::path::Path;
use tracing::info;

use crate::{atomic_write, decode, encode, CodecError};

/// Save a level.
///
/// The whole file is encoded in memory before anything touches the disk, so
/// an unknown type leaves the destination untouched.
pub fn save_level(
    path: impl AsRef<Path>,
    level: &Level,
    registry: &TypeRegistry,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    let bytes = encode(level, registry)?;
    atomic_write(path, &bytes)?;
    info!(
        "Saved level with {} objects to {}",
        level.object_count(),
        path.display()
    );
    Ok(())
}

/// Load a level, using `tile_size` for its settings
pub fn load_level(
    path: impl AsRef<Path>,
    registry: &TypeRegistry,
    tile_size: u32,
) -> Result<Level, CodecError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let level = decode(&bytes, registry, tile_size)?;
    info!(
        "Loaded level with {} objects from {}",
        level.object_count(),
        path.display()
    );
    Ok(level)
}
