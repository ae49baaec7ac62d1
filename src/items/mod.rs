//! Item system
//!
//! Item payloads, modifiers and the stacking inventory.

pub mod inventory;
pub mod item;

pub use inventory::{find_stack, Inventory};
pub use item::{compose_name, EffectSpec, ItemData, ItemKind, ItemModifier};
