//! Characters
//!
//! The combat-capable actor payload: stats, inventory, equipment,
//! behavior state and the one-way Active -> Dead lifecycle.

use crate::ai::AiKind;
use crate::entities::actor::ActorId;
use crate::entities::stats::StatBlock;
use crate::items::Inventory;
use crate::progression::Experience;

/// One-way lifecycle of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Dead,
}

/// How a character currently decides its turns. Confusion wraps the
/// previous behavior and restores it when the countdown ends; only the
/// turn scheduler drives the transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    Normal,
    Confused {
        original: Box<Behavior>,
        remaining: u32,
    },
}

/// A stat/rating delta stacked onto a monster at creation time, with
/// the name fragment it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedModifier {
    pub key: String,
    pub name: String,
    pub prefix: bool,
    pub level: i32,
    pub stats: StatBlock,
}

/// Payload fields specific to the player.
#[derive(Debug, Clone)]
pub struct PlayerData {
    pub experience: Experience,
    /// Last direction the player moved in.
    pub direction: (i32, i32),
}

impl PlayerData {
    pub fn new() -> Self {
        Self {
            experience: Experience::new(),
            direction: (1, 1),
        }
    }
}

impl Default for PlayerData {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload fields specific to monsters.
#[derive(Debug, Clone)]
pub struct MonsterData {
    /// Flavor text shown when this monster kills the player.
    pub killed_by: String,
    /// Base challenge rating from the template, without modifiers.
    pub base_challenge_rating: i32,
    pub modifiers: Vec<AppliedModifier>,
}

impl MonsterData {
    /// Effective challenge rating: template rating plus every stacked
    /// modifier level.
    pub fn challenge_rating(&self) -> i32 {
        self.base_challenge_rating + self.modifiers.iter().map(|m| m.level).sum::<i32>()
    }
}

/// What kind of character this is.
#[derive(Debug, Clone)]
pub enum CharacterKind {
    Player(PlayerData),
    Monster(MonsterData),
    Npc,
}

/// The character payload of an actor.
#[derive(Debug, Clone)]
pub struct CharacterData {
    /// Base stat block before equipment and modifiers.
    pub base: StatBlock,
    pub inventory: Inventory,
    /// Equipped items; always a subset of the inventory.
    pub equipped: Vec<ActorId>,
    pub behavior: Behavior,
    pub state: Lifecycle,
    /// Strategy driving this character's turns; cleared on death.
    pub ai: Option<AiKind>,
    /// Experience awarded to a player that kills this character.
    pub xp_value: i32,
    pub kind: CharacterKind,
}

impl CharacterData {
    pub fn new(base: StatBlock, xp_value: i32, ai: Option<AiKind>, kind: CharacterKind) -> Self {
        Self {
            base,
            inventory: Inventory::new(),
            equipped: Vec::new(),
            behavior: Behavior::Normal,
            state: Lifecycle::Active,
            ai,
            xp_value,
            kind,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CharacterKind::Player(_))
    }

    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CharacterKind::Monster(_))
    }

    pub fn as_player(&self) -> Option<&PlayerData> {
        match &self.kind {
            CharacterKind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerData> {
        match &mut self.kind {
            CharacterKind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_monster(&self) -> Option<&MonsterData> {
        match &self.kind {
            CharacterKind::Monster(m) => Some(m),
            _ => None,
        }
    }

    /// Modifiers contributing to this character's derived stats.
    pub fn applied_modifiers(&self) -> &[AppliedModifier] {
        match &self.kind {
            CharacterKind::Monster(m) => &m.modifiers,
            _ => &[],
        }
    }

    pub fn is_equipped(&self, item: ActorId) -> bool {
        self.equipped.contains(&item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_rating_includes_modifier_levels() {
        let mut monster = MonsterData {
            killed_by: String::new(),
            base_challenge_rating: 2,
            modifiers: Vec::new(),
        };
        assert_eq!(monster.challenge_rating(), 2);

        monster.modifiers.push(AppliedModifier {
            key: "dire".into(),
            name: "dire".into(),
            prefix: true,
            level: 1,
            stats: StatBlock::default(),
        });
        assert_eq!(monster.challenge_rating(), 3);
    }

    #[test]
    fn confusion_nests_and_remembers_the_original() {
        let original = Behavior::Normal;
        let confused = Behavior::Confused {
            original: Box::new(original.clone()),
            remaining: 3,
        };
        // re-confusing wraps the current state, not Normal
        let doubled = Behavior::Confused {
            original: Box::new(confused.clone()),
            remaining: 2,
        };
        match doubled {
            Behavior::Confused { original, .. } => assert_eq!(*original, confused),
            _ => unreachable!(),
        }
    }
}
