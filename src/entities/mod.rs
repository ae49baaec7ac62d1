//! Entity model
//!
//! Actors, the arena that owns them, character payloads and the stat
//! model.

pub mod actor;
pub mod character;
pub mod stats;

pub use actor::{Actor, ActorId, ActorKind, Actors, Color, ContainerData, PortalData};
pub use character::{
    AppliedModifier, Behavior, CharacterData, CharacterKind, Lifecycle, MonsterData, PlayerData,
};
pub use stats::{StatBlock, HITPOINT_FACTOR};
