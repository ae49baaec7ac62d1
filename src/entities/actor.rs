//! Actors
//!
//! Everything placeable in the world - characters, items, portals,
//! containers - is an `Actor` with a tagged payload. Actors live in a
//! flat arena and reference each other by `ActorId`; the arena is the
//! single owner.

use crate::entities::character::{CharacterData, Lifecycle};
use crate::entities::stats::StatBlock;
use crate::items::{Inventory, ItemData};
use crate::world::{LevelId, Position};

/// RGB display color.
pub type Color = (u8, u8, u8);

/// Index of an actor in the arena. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub(crate) u32);

impl ActorId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A placeable game object.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    /// Key of the template this actor was created from.
    pub key: String,
    pub name: String,
    pub glyph: char,
    pub color: Color,
    pub flavor: String,
    /// Level the actor is registered on, if any.
    pub level: Option<LevelId>,
    /// Tile the actor stands on. Movement keeps this and the tile's
    /// occupant list in sync.
    pub tile: Option<Position>,
    /// Current hit points; write through `Actors::set_hit_points` so the
    /// `[0, max]` clamp always holds.
    pub(crate) hit_points: i32,
    /// Set by the scheduler when this actor acted this turn.
    pub action_taken: bool,
    /// Whether the player can currently see this actor.
    pub in_view: bool,
    /// Opaque handle for a renderer-owned visualization object.
    pub scene_handle: Option<u64>,
    pub kind: ActorKind,
}

/// The payload that makes an actor what it is.
#[derive(Debug, Clone)]
pub enum ActorKind {
    Character(CharacterData),
    Item(ItemData),
    Portal(PortalData),
    Container(ContainerData),
}

/// A paired level-transition actor.
#[derive(Debug, Clone)]
pub struct PortalData {
    /// Message shown when the portal is used.
    pub message: String,
    /// The other end; set by `Game::connect_portals`.
    pub destination: Option<ActorId>,
}

/// An actor owning an inventory independent of any character.
#[derive(Debug, Clone, Default)]
pub struct ContainerData {
    pub inventory: Inventory,
}

impl Actor {
    pub fn is_character(&self) -> bool {
        matches!(self.kind, ActorKind::Character(_))
    }

    pub fn is_item(&self) -> bool {
        matches!(self.kind, ActorKind::Item(_))
    }

    pub fn as_character(&self) -> Option<&CharacterData> {
        match &self.kind {
            ActorKind::Character(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_character_mut(&mut self) -> Option<&mut CharacterData> {
        match &mut self.kind {
            ActorKind::Character(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemData> {
        match &self.kind {
            ActorKind::Item(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_item_mut(&mut self) -> Option<&mut ItemData> {
        match &mut self.kind {
            ActorKind::Item(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_portal(&self) -> Option<&PortalData> {
        match &self.kind {
            ActorKind::Portal(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerData> {
        match &self.kind {
            ActorKind::Container(c) => Some(c),
            _ => None,
        }
    }

    /// Name with dynamic decorations: stack count for stackable items,
    /// an equipped marker for worn equipment.
    pub fn display_name(&self) -> String {
        let mut name = self.name.clone();
        if let ActorKind::Item(item) = &self.kind {
            if item.stackable() && item.stack_size > 1 {
                name.push_str(&format!(" (stack: {})", item.stack_size));
            }
            if item.is_equipped() {
                name.push_str(" (equipped)");
            }
        }
        name
    }
}

/// The actor arena. Slots are append-only; a dead or consumed actor
/// keeps its slot so ids stay valid for the whole game.
#[derive(Debug, Default)]
pub struct Actors {
    slots: Vec<Actor>,
}

impl Actors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, build: impl FnOnce(ActorId) -> Actor) -> ActorId {
        let id = ActorId(self.slots.len() as u32);
        self.slots.push(build(id));
        id
    }

    pub fn get(&self, id: ActorId) -> &Actor {
        &self.slots[id.index()]
    }

    pub fn get_mut(&mut self, id: ActorId) -> &mut Actor {
        &mut self.slots[id.index()]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.slots.iter()
    }

    /// Derived stats for a character: base block plus the bonus block of
    /// every equipped item plus the deltas of every stacked modifier.
    /// Non-characters have no stats and report all zeroes.
    pub fn derived_stats(&self, id: ActorId) -> StatBlock {
        let actor = self.get(id);
        let Some(character) = actor.as_character() else {
            return StatBlock::default();
        };
        let mut total = character.base;
        for &item_id in &character.equipped {
            if let Some(item) = self.get(item_id).as_item() {
                total = total.plus(&item.bonuses);
            }
        }
        for modifier in character.applied_modifiers() {
            total = total.plus(&modifier.stats);
        }
        total
    }

    pub fn max_hit_points(&self, id: ActorId) -> i32 {
        if self.get(id).is_character() {
            self.derived_stats(id).max_hit_points()
        } else {
            // plain actors are one-hit-point props
            1
        }
    }

    pub fn hit_points(&self, id: ActorId) -> i32 {
        self.get(id).hit_points
    }

    /// Write hit points, clamped to `[0, max]`.
    pub fn set_hit_points(&mut self, id: ActorId, value: i32) {
        let max = self.max_hit_points(id);
        self.get_mut(id).hit_points = value.clamp(0, max);
    }

    /// True for characters that are still alive and acting.
    pub fn is_active(&self, id: ActorId) -> bool {
        self.get(id)
            .as_character()
            .map(|c| c.state == Lifecycle::Active)
            .unwrap_or(false)
    }
}

impl std::ops::Index<ActorId> for Actors {
    type Output = Actor;

    fn index(&self, id: ActorId) -> &Actor {
        self.get(id)
    }
}

impl std::ops::IndexMut<ActorId> for Actors {
    fn index_mut(&mut self, id: ActorId) -> &mut Actor {
        self.get_mut(id)
    }
}
