//! Levels
//!
//! One floor of the dungeon: a map plus registration lists of the
//! actors on it. Characters act in registration order - that ordering
//! is the game's only turn order, so it must stay deterministic.

use crate::entities::actor::{ActorId, ActorKind};
use crate::world::map::Map;

/// Index of a level in the game's level list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelId(pub(crate) u32);

impl LevelId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A playable floor.
#[derive(Debug)]
pub struct Level {
    pub name: String,
    pub difficulty: i32,
    pub map: Map,
    /// Characters on this level, in registration order.
    characters: Vec<ActorId>,
    /// Loose items lying on this level.
    items: Vec<ActorId>,
    /// Portals placed on this level.
    portals: Vec<ActorId>,
}

impl Level {
    pub fn new(name: impl Into<String>, difficulty: i32, map: Map) -> Self {
        Self {
            name: name.into(),
            difficulty,
            map,
            characters: Vec::new(),
            items: Vec::new(),
            portals: Vec::new(),
        }
    }

    pub fn characters(&self) -> &[ActorId] {
        &self.characters
    }

    pub fn items(&self) -> &[ActorId] {
        &self.items
    }

    pub fn portals(&self) -> &[ActorId] {
        &self.portals
    }

    /// Register an actor with the list matching its kind.
    pub(crate) fn register(&mut self, id: ActorId, kind: &ActorKind) {
        let list = match kind {
            ActorKind::Character(_) => &mut self.characters,
            ActorKind::Item(_) => &mut self.items,
            ActorKind::Portal(_) => &mut self.portals,
            // containers act like furniture and take no turns
            ActorKind::Container(_) => &mut self.items,
        };
        if !list.contains(&id) {
            list.push(id);
        }
    }

    pub(crate) fn unregister(&mut self, id: ActorId) {
        self.characters.retain(|&a| a != id);
        self.items.retain(|&a| a != id);
        self.portals.retain(|&a| a != id);
    }
}
