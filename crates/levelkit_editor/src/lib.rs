//! Level editing for levelkit
//!
//! `LevelDocument` is the aggregate a UI drives: it owns the level, the
//! undo/redo history, the selection and the clipboard, and turns pointer
//! intents into recorded edits.
//!
//! ```rust,ignore
//! use levelkit_core::{LevelSettings, TypeRegistry};
//! use levelkit_editor::{Brush, LevelDocument};
//!
//! let registry = TypeRegistry::from_path("types.cfg")?;
//! let mut document = LevelDocument::new(LevelSettings::new(40, 20, 32)?);
//! document.set_brush(Some(Brush::new("grass", 32.0, 32.0)));
//! document.place_with_brush([40.0, 40.0])?;
//! document.undo();
//! document.save("level1.lvl", &registry)?;
//! ```

pub mod commands;
mod document;
mod error;
pub mod preferences;

pub use commands::{Clipboard, EditEvent, EditEventLog, Selection};
pub use document::{Brush, LevelDocument};
pub use error::EditError;
pub use preferences::EditorPreferences;
