//! Binary level format
//!
//! Levels are stored as a fixed-layout, big-endian byte stream:
//!
//! ```text
//! offset 0   int32    level width (tiles)
//! offset 4   int32    level height (tiles)
//! offset 8.. repeating 22-byte records:
//!   +0  int8     layer index (0-7)
//!   +1  float32  x
//!   +5  float32  y
//!   +9  float32  width
//!   +13 float32  height
//!   +17 float32  scale
//!   +21 int8     type id (see `TypeRegistry`)
//! ```
//!
//! The tile size is not part of the file; callers supply it when decoding.
//!
//! # Example
//!
//! ```rust,ignore
//! use levelkit_codec::{load_level, save_level};
//!
//! save_level("level1.lvl", &level, &registry)?;
//! let restored = load_level("level1.lvl", &registry, 32)?;
//! ```

mod atomic_write;
mod codec;
mod error;
mod file;
mod record;

pub use atomic_write::atomic_write;
pub use codec::{decode, encode};
pub use error::CodecError;
pub use file::{load_level, save_level};
pub use record::{Record, HEADER_SIZE, RECORD_SIZE};
