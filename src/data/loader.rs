//! RON data loader
//!
//! Loads game content from external RON files, with fallback to the
//! hardcoded defaults.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::data::defaults::{
    default_item_templates, default_modifier_templates, default_monster_templates,
};
use crate::data::templates::{ItemTemplate, ModifierTemplate, MonsterTemplate};
use crate::error::{GameError, GameResult};

/// All content the catalogs are built from.
#[derive(Debug, Clone)]
pub struct GameData {
    pub monsters: Vec<MonsterTemplate>,
    pub items: Vec<ItemTemplate>,
    pub modifiers: Vec<ModifierTemplate>,
}

impl GameData {
    /// The hardcoded default content.
    pub fn default_content() -> Self {
        Self {
            monsters: default_monster_templates(),
            items: default_item_templates(),
            modifiers: default_modifier_templates(),
        }
    }

    /// Load content from a data directory, falling back to the
    /// defaults file by file.
    pub fn load_from(base_path: &Path) -> Self {
        Self {
            monsters: load_or(base_path.join("monsters.ron"), default_monster_templates),
            items: load_or(base_path.join("items.ron"), default_item_templates),
            modifiers: load_or(base_path.join("modifiers.ron"), default_modifier_templates),
        }
    }

    /// Write the default content out as RON files for easy editing.
    pub fn export_defaults(base_path: &Path) -> GameResult<()> {
        fs::create_dir_all(base_path)
            .map_err(|e| GameError::Rule(format!("failed to create {base_path:?}: {e}")))?;
        export(base_path.join("monsters.ron"), &default_monster_templates())?;
        export(base_path.join("items.ron"), &default_item_templates())?;
        export(base_path.join("modifiers.ron"), &default_modifier_templates())?;
        Ok(())
    }
}

impl Default for GameData {
    fn default() -> Self {
        Self::default_content()
    }
}

fn load_or<T: DeserializeOwned>(path: impl AsRef<Path>, fallback: fn() -> T) -> T {
    let path = path.as_ref();
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => match ron::from_str(&content) {
                Ok(parsed) => return parsed,
                Err(e) => log::warn!("failed to parse {path:?}: {e}, using defaults"),
            },
            Err(e) => log::warn!("failed to read {path:?}: {e}, using defaults"),
        }
    }
    fallback()
}

fn export<T: Serialize>(path: impl AsRef<Path>, value: &T) -> GameResult<()> {
    let path = path.as_ref();
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| GameError::Rule(format!("failed to serialize {path:?}: {e}")))?;
    fs::write(path, text).map_err(|e| GameError::Rule(format!("failed to write {path:?}: {e}")))
}
