use thiserror::Error;

/// Error type for level encoding and decoding failures
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to access level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Level data is {len} bytes, too short for the {header}-byte header", header = crate::HEADER_SIZE)]
    TruncatedHeader { len: usize },
    #[error("Level data is {len} bytes: {trailing} trailing bytes do not form a whole {record}-byte record", record = crate::RECORD_SIZE)]
    TruncatedRecord { len: usize, trailing: usize },
    #[error("Object type {0:?} is not in the type registry")]
    UnknownTypeName(String),
    #[error("Record {record} has type id {id}, which is not in the type registry")]
    UnknownTypeId { record: usize, id: i8 },
    #[error("Record {record} has layer {layer}, expected 0-7")]
    InvalidLayer { record: usize, layer: i8 },
    #[error("Record {record} has size {width}x{height}, expected positive width and height")]
    InvalidSize {
        record: usize,
        width: f32,
        height: f32,
    },
    #[error("Invalid level header: {0}")]
    InvalidSettings(#[from] levelkit_core::LevelError),
}
