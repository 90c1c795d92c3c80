//! One fixed-size object record

/// Size of the `width`/`height` header in bytes
pub const HEADER_SIZE: usize = 8;

/// Size of one object record in bytes
pub const RECORD_SIZE: usize = 22;

/// A decoded object record, before type ids are resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub layer: i8,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub type_id: i8,
}

impl Record {
    /// Append the big-endian encoding of this record
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.layer.to_be_bytes());
        for value in [self.x, self.y, self.width, self.height, self.scale] {
            out.extend_from_slice(&value.to_be_bytes());
        }
        out.extend_from_slice(&self.type_id.to_be_bytes());
    }

    /// Decode one record; `None` unless exactly `RECORD_SIZE` bytes are given
    pub fn read(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; RECORD_SIZE] = bytes.try_into().ok()?;
        let float_at = |offset: usize| {
            f32::from_be_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };
        Some(Self {
            layer: i8::from_be_bytes([bytes[0]]),
            x: float_at(1),
            y: float_at(5),
            width: float_at(9),
            height: float_at(13),
            scale: float_at(17),
            type_id: i8::from_be_bytes([bytes[21]]),
        })
    }
}
