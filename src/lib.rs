//! Deepwarren - simulation core for a turn-based dungeon crawler
//!
//! Everything that makes the game tick lives here: the entity and stat
//! model, the combat resolver, the area-effect engine, monster AI, and
//! the turn scheduler. Rendering, input, map generation and persistence
//! are consumers of this crate, not part of it.

pub mod ai;
pub mod combat;
pub mod data;
pub mod effects;
pub mod entities;
pub mod error;
pub mod game;
pub mod items;
pub mod progression;
pub mod world;

// Re-export commonly used types
pub use entities::{Actor, ActorId, ActorKind, Actors};
pub use error::{GameError, GameResult};
pub use game::{Game, GameState};
pub use world::{Level, LevelId, Map, Position};
