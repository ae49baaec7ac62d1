//! Game content
//!
//! Template records, the catalogs built from them, and the loader
//! that reads RON data files with hardcoded fallbacks.

pub mod catalog;
pub mod defaults;
pub mod loader;
pub mod templates;

pub use catalog::{
    max_items_per_room, max_monsters_per_room, ItemCatalog, ModifierCatalog, MonsterCatalog,
};
pub use loader::GameData;
pub use templates::{
    EffectTemplate, ItemClass, ItemTemplate, ModifierPosition, ModifierScope, ModifierTemplate,
    MonsterTemplate,
};
