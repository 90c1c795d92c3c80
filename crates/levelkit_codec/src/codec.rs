//! Level <-> byte stream translation

use levelkit_core::{Level, LevelSettings, PlacedObject, TypeRegistry, LAYER_COUNT};
use tracing::debug;

use crate::{CodecError, Record, HEADER_SIZE, RECORD_SIZE};

/// Encode a level.
///
/// Objects are written layer by layer in draw order. Fails without producing
/// any bytes if an object's type is missing from the registry.
pub fn encode(level: &Level, registry: &TypeRegistry) -> Result<Vec<u8>, CodecError> {
    let settings = level.settings();
    let mut out = Vec::with_capacity(HEADER_SIZE + RECORD_SIZE * level.object_count());

    // LevelSettings keeps both dimensions within i32
    out.extend_from_slice(&(settings.width() as i32).to_be_bytes());
    out.extend_from_slice(&(settings.height() as i32).to_be_bytes());

    for (layer, object) in level.objects() {
        let type_id = registry
            .id_of(&object.type_name)
            .ok_or_else(|| CodecError::UnknownTypeName(object.type_name.clone()))?;
        Record {
            layer: layer as i8,
            x: object.x,
            y: object.y,
            width: object.width,
            height: object.height,
            scale: object.scale,
            type_id,
        }
        .write_to(&mut out);
    }

    debug!(
        objects = level.object_count(),
        bytes = out.len(),
        "Encoded level"
    );
    Ok(out)
}

/// Decode a level, using `tile_size` for the settings since files do not store it
pub fn decode(
    bytes: &[u8],
    registry: &TypeRegistry,
    tile_size: u32,
) -> Result<Level, CodecError> {
    let len = bytes.len();
    if len < HEADER_SIZE {
        return Err(CodecError::TruncatedHeader { len });
    }
    let trailing = (len - HEADER_SIZE) % RECORD_SIZE;
    if trailing != 0 {
        return Err(CodecError::TruncatedRecord { len, trailing });
    }

    let width = i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let height = i32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let settings = LevelSettings::new(width.into(), height.into(), tile_size.into())?;
    let mut level = Level::new(settings);

    for (index, chunk) in bytes[HEADER_SIZE..].chunks_exact(RECORD_SIZE).enumerate() {
        let record = Record::read(chunk).ok_or(CodecError::TruncatedRecord { len, trailing })?;

        let layer = usize::try_from(record.layer)
            .ok()
            .filter(|l| *l < LAYER_COUNT)
            .ok_or(CodecError::InvalidLayer {
                record: index,
                layer: record.layer,
            })?;
        let type_name = registry
            .name_of(record.type_id)
            .ok_or(CodecError::UnknownTypeId {
                record: index,
                id: record.type_id,
            })?;

        let object = PlacedObject::new(type_name, record.x, record.y, record.width, record.height)
            .with_scale(record.scale);
        if !object.has_positive_size() {
            return Err(CodecError::InvalidSize {
                record: index,
                width: record.width,
                height: record.height,
            });
        }
        level
            .add_object(layer, object)
            .map_err(|_| CodecError::InvalidLayer {
                record: index,
                layer: record.layer,
            })?;
    }

    debug!(objects = level.object_count(), width, height, "Decoded level");
    Ok(level)
}
