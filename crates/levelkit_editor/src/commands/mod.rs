//! Undo/redo event log, selection and clipboard

pub mod clipboard;
mod command;

pub use clipboard::{Clipboard, Selection};
pub use command::{EditEvent, EditEventLog, LayerEntry, ObjectMove};
