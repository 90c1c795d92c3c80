//! Command-line tool for inspecting and creating level files
//!
//! ```bash
//! levelkit --types types.cfg info level1.lvl
//! levelkit dump level1.lvl > level1.json
//! levelkit new level2.lvl --width 40 --height 20
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use levelkit_codec::{load_level, save_level};
use levelkit_core::{Level, LevelSettings, PlacedObject, TypeRegistry, LAYER_COUNT};
use levelkit_editor::EditorPreferences;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// levelkit - inspect and create tile level files
#[derive(Parser, Debug)]
#[command(name = "levelkit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Type registry config (defaults to the one in preferences)
    #[arg(short, long, global = true, value_name = "FILE")]
    types: Option<PathBuf>,

    /// Tile size in pixels for the loaded level
    #[arg(long, global = true)]
    tile_size: Option<u32>,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered object types
    Types,
    /// Summarize a level file
    Info { file: PathBuf },
    /// Print a level file as JSON
    Dump { file: PathBuf },
    /// Create an empty level file
    New {
        file: PathBuf,
        #[arg(long)]
        width: i64,
        #[arg(long)]
        height: i64,
    },
    /// List objects that overlap another object on the same layer
    Overlaps { file: PathBuf },
}

#[derive(Serialize)]
struct LevelDump<'a> {
    settings: LevelSettings,
    layers: Vec<Vec<&'a PlacedObject>>,
}

impl<'a> LevelDump<'a> {
    fn new(level: &'a Level) -> Self {
        Self {
            settings: level.settings(),
            layers: (0..LAYER_COUNT)
                .map(|layer| level.layer_objects(layer).collect())
                .collect(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let mut preferences = EditorPreferences::load();
    let tile_size = args.tile_size.unwrap_or(preferences.default_tile_size);
    let registry_path = args
        .types
        .clone()
        .unwrap_or_else(|| preferences.registry_path.clone());

    match args.command {
        Command::Types => {
            let registry = load_registry(&registry_path)?;
            for (id, name) in registry.iter() {
                println!("{id:>4}  {name}");
            }
        }
        Command::Info { file } => {
            let registry = load_registry(&registry_path)?;
            let level = open_level(&file, &registry, tile_size)?;
            let settings = level.settings();
            println!(
                "{}: {}x{} tiles ({} px tiles), {} objects",
                file.display(),
                settings.width(),
                settings.height(),
                settings.tile_size(),
                level.object_count()
            );
            for (index, layer) in level.layers().iter().enumerate() {
                if !layer.is_empty() {
                    println!("  layer {index}: {} objects", layer.len());
                }
            }
            for (_, name) in registry.iter() {
                let count = level.count_objects_of_type(name);
                if count > 0 {
                    println!("  {name}: {count}");
                }
            }
        }
        Command::Dump { file } => {
            let registry = load_registry(&registry_path)?;
            let level = open_level(&file, &registry, tile_size)?;
            println!("{}", serde_json::to_string_pretty(&LevelDump::new(&level))?);
        }
        Command::New {
            file,
            width,
            height,
        } => {
            let settings = LevelSettings::new(width, height, i64::from(tile_size))?;
            save_level(&file, &Level::new(settings), &TypeRegistry::default())
                .with_context(|| format!("Failed to write {}", file.display()))?;
            preferences.add_recent_file(&file);
            if let Err(e) = preferences.save() {
                tracing::warn!("Failed to save preferences: {}", e);
            }
            println!("Created {}", file.display());
        }
        Command::Overlaps { file } => {
            let registry = load_registry(&registry_path)?;
            let level = open_level(&file, &registry, tile_size)?;
            for layer in 0..LAYER_COUNT {
                let overlapping =
                    levelkit_core::spatial::overlapping_objects(level.layer_objects(layer));
                for object in level
                    .layer_objects(layer)
                    .filter(|o| overlapping.contains(&o.id))
                {
                    println!(
                        "layer {layer}: {} at ({}, {}) {}x{}",
                        object.type_name, object.x, object.y, object.width, object.height
                    );
                }
            }
        }
    }

    Ok(())
}

fn load_registry(path: &Path) -> anyhow::Result<TypeRegistry> {
    TypeRegistry::from_path(path)
        .with_context(|| format!("Failed to load type registry {}", path.display()))
}

fn open_level(path: &Path, registry: &TypeRegistry, tile_size: u32) -> anyhow::Result<Level> {
    load_level(path, registry, tile_size)
        .with_context(|| format!("Failed to open {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["levelkit", "-vv", "info", "level1.lvl"]);
        assert_eq!(args.verbose, 2);
        assert!(args.types.is_none());
        assert!(matches!(args.command, Command::Info { .. }));
    }

    #[test]
    fn test_new_requires_size() {
        assert!(Args::try_parse_from(["levelkit", "new", "level.lvl"]).is_err());

        let args = Args::parse_from([
            "levelkit", "new", "level.lvl", "--width", "40", "--height", "20", "--tile-size",
            "16",
        ]);
        assert_eq!(args.tile_size, Some(16));
        assert!(matches!(
            args.command,
            Command::New {
                width: 40,
                height: 20,
                ..
            }
        ));
    }

    #[test]
    fn test_dump_groups_by_layer() {
        let mut level = Level::new(LevelSettings::new(4, 4, 32).unwrap());
        level
            .add_object(3, PlacedObject::new("grass", 0.0, 0.0, 32.0, 32.0))
            .unwrap();
        let json = serde_json::to_value(LevelDump::new(&level)).unwrap();

        let layers = json["layers"].as_array().unwrap();
        assert_eq!(layers.len(), LAYER_COUNT);
        assert_eq!(layers[3][0]["type_name"], "grass");
        assert_eq!(json["settings"]["width"], 4);
    }
}
