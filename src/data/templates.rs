//! Content templates
//!
//! The serializable records the catalogs are built from. Loaded from
//! RON files or taken from the hardcoded defaults.

use serde::{Deserialize, Serialize};

use crate::combat::HitDie;
use crate::effects::Element;
use crate::entities::stats::StatBlock;
use crate::entities::Color;

/// A template for creating monsters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterTemplate {
    /// Unique template key for reference
    pub key: String,
    /// Display glyph
    pub glyph: char,
    /// Display name
    pub name: String,
    /// Description shown when the monster is first seen
    pub flavor: String,
    /// Message shown when this monster kills the player
    pub killed_by: String,
    /// Rolled once per instance as extra body
    pub hit_die: HitDie,
    /// Base stats
    pub stats: StatBlock,
    /// XP awarded for the kill
    pub xp: i32,
    /// Unique monsters are created at most once per game
    pub unique: bool,
    /// Difficulty tier used for random selection
    pub challenge_rating: i32,
    /// Foreground color (RGB)
    pub color: Color,
    /// Turn strategy key
    pub ai: String,
}

/// Broad classification of an item template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemClass {
    Equipment,
    Consumable,
}

/// Effect parameters of a consumable template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectTemplate {
    /// Effect registry key
    pub effect: String,
    /// Whether the caller must choose a target
    pub targeted: bool,
    pub radius: i32,
    pub hit_die: HitDie,
    /// Turns the effect stays active
    pub duration: u32,
    pub element: Element,
}

/// A template for creating items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub key: String,
    pub glyph: char,
    pub name: String,
    pub class: ItemClass,
    /// Difficulty tier used for random selection
    pub item_level: i32,
    /// Stat bonuses granted while equipped
    #[serde(default)]
    pub bonuses: StatBlock,
    /// Present on consumables
    #[serde(default)]
    pub effect: Option<EffectTemplate>,
}

/// Where a modifier's name fragment goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierPosition {
    Prefix,
    Suffix,
}

/// What a modifier may be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierScope {
    Equipment,
    Consumable,
    Monster,
}

/// A prefix/suffix decoration with stat, effect and rating deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierTemplate {
    pub key: String,
    pub name: String,
    pub position: ModifierPosition,
    pub scope: ModifierScope,
    /// Added to the challenge rating or item level
    pub level: i32,
    #[serde(default)]
    pub stats: StatBlock,
    /// Added to a consumable's effect radius
    #[serde(default)]
    pub effect_radius: i32,
    /// Extra dice added to a consumable's magnitude die
    #[serde(default)]
    pub extra_dice: i32,
    /// Added to a consumable's effect duration
    #[serde(default)]
    pub effect_duration: i32,
    /// Overrides a consumable's element when set
    #[serde(default)]
    pub effect_element: Option<Element>,
}

impl ModifierTemplate {
    pub fn is_prefix(&self) -> bool {
        self.position == ModifierPosition::Prefix
    }

    /// Whether this modifier may decorate the given item class.
    pub fn applies_to_item(&self, class: ItemClass) -> bool {
        matches!(
            (self.scope, class),
            (ModifierScope::Equipment, ItemClass::Equipment)
                | (ModifierScope::Consumable, ItemClass::Consumable)
        )
    }
}
