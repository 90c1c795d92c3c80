//! Object type registry
//!
//! Maps the one-byte type ids stored in level files to type names. The
//! registry is read from a line-oriented config (`types.cfg`):
//!
//! ```text
//! 0 grass
//! 1 sand
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a type registry
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read type registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed type registry entry on line {line}: {content:?} (expected \"<id> <name>\")")]
    Malformed { line: usize, content: String },
    #[error("Duplicate type id {id} on line {line}")]
    DuplicateId { id: i8, line: usize },
    #[error("Duplicate type name {name:?} on line {line}")]
    DuplicateName { name: String, line: usize },
}

/// Bidirectional type id <-> name mapping, read-only once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct TypeRegistry {
    entries: Vec<(i8, String)>,
}

impl TypeRegistry {
    /// Parse registry entries, one `"<id> <name>"` per line. Blank lines are skipped.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let fields: Vec<&str> = raw.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            let malformed = || ConfigError::Malformed {
                line,
                content: raw.to_string(),
            };
            let [id, name] = fields[..] else {
                return Err(malformed());
            };
            let id: i8 = id.parse().map_err(|_| malformed())?;

            if registry.name_of(id).is_some() {
                return Err(ConfigError::DuplicateId { id, line });
            }
            if registry.id_of(name).is_some() {
                return Err(ConfigError::DuplicateName {
                    name: name.to_string(),
                    line,
                });
            }
            registry.entries.push((id, name.to_string()));
        }
        Ok(registry)
    }

    /// Read and parse a registry file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Type name for an id
    pub fn name_of(&self, id: i8) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, name)| name.as_str())
    }

    /// Type id for a name
    pub fn id_of(&self, name: &str) -> Option<i8> {
        self.entries
            .iter()
            .find(|(_, entry_name)| entry_name == name)
            .map(|(id, _)| *id)
    }

    /// Entries in config order
    pub fn iter(&self) -> impl Iterator<Item = (i8, &str)> {
        self.entries.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
