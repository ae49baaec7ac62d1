//! Effect engine
//!
//! Time-bounded gameplay modifications produced by consumable items:
//! healing over time, area damage, confusion. Effects are registered
//! with the game's active-effect list and ticked once per turn by the
//! scheduler; every application also feeds the visualization queue so
//! a renderer can show what happened.

use serde::{Deserialize, Serialize};

use crate::combat;
use crate::combat::HitDie;
use crate::entities::character::Behavior;
use crate::entities::ActorId;
use crate::error::{GameError, GameResult};
use crate::game::{Game, MessageKind};
use crate::items::item::capitalize;
use crate::world::{LevelId, Position};

/// What a concrete effect does. Resolved from content keys through an
/// explicit registry; there is no other way to obtain a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Heal,
    Damage,
    Confuse,
}

impl EffectKind {
    /// Registry mapping content-schema effect keys to kinds.
    pub fn from_key(key: &str) -> GameResult<EffectKind> {
        match key {
            "heal" => Ok(EffectKind::Heal),
            "damage" => Ok(EffectKind::Damage),
            "confuse" => Ok(EffectKind::Confuse),
            other => Err(GameError::UnknownKey(format!("effect {other}"))),
        }
    }

    /// The kind of target this effect needs.
    pub fn target_type(&self, targeted: bool) -> TargetType {
        match self {
            EffectKind::Heal => {
                if targeted {
                    TargetType::Character
                } else {
                    TargetType::SelfCast
                }
            }
            EffectKind::Confuse => TargetType::Character,
            EffectKind::Damage => TargetType::Tile,
        }
    }

    /// Flavor line shown when the effect goes off.
    pub fn description(&self) -> &'static str {
        match self {
            EffectKind::Heal => "Wounds close, bones knit.",
            EffectKind::Damage => "The area is bombarded by magical energy.",
            EffectKind::Confuse => "An eerie melody plays in the distance.",
        }
    }
}

/// Classification of what an effect may be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    /// The user of the source item.
    SelfCast,
    /// A single character.
    Character,
    /// A tile, damaging whatever stands in the area.
    Tile,
}

/// Elemental flavor of an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Life,
    Fire,
    Lightning,
    Earth,
    Mind,
}

/// A caller-chosen target for a targeted consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    Actor(ActorId),
    Tile(Position),
}

/// A live effect in the scheduler's active list.
#[derive(Debug, Clone)]
pub struct Effect {
    /// The consumable item that produced this effect.
    pub source: ActorId,
    /// Who gets attribution for damage: the owner of the source item.
    pub owner: Option<ActorId>,
    pub kind: EffectKind,
    pub target_type: TargetType,
    /// Turns left; the effect is removed when this reaches 0.
    pub duration: u32,
    pub radius: i32,
    pub magnitude: HitDie,
    pub element: Element,
    /// Level the affected tiles belong to.
    pub level: Option<LevelId>,
    /// Affected tiles, fixed for the lifetime of the effect.
    pub tiles: Vec<Position>,
    /// Actors affected on the most recent tick.
    pub actors: Vec<ActorId>,
}

/// Apply the effect of a consumable item. `target` is required for
/// targeted consumables; untargeted ones center on the item's owner.
///
/// On success the effect is registered with the game and an entry is
/// appended to the visualization queue.
pub fn apply(game: &mut Game, item: ActorId, target: Option<EffectTarget>) -> GameResult<()> {
    let actor = &game.actors[item];
    let item_data = actor
        .as_item()
        .ok_or_else(|| GameError::UnusableItem(actor.name.clone()))?;
    let spec = item_data
        .effect()
        .ok_or_else(|| GameError::UnusableItem(actor.name.clone()))?
        .clone();
    let owner = item_data.owner;

    let mut effect = Effect {
        source: item,
        owner,
        kind: spec.kind,
        target_type: spec.target_type(),
        duration: spec.duration,
        radius: spec.radius,
        magnitude: spec.magnitude,
        element: spec.element,
        level: None,
        tiles: Vec::new(),
        actors: Vec::new(),
    };

    match effect.kind {
        EffectKind::Heal => apply_heal(game, &mut effect, target)?,
        EffectKind::Confuse => apply_confuse(game, &mut effect, target)?,
        EffectKind::Damage => apply_damage(game, &mut effect, target, spec.targeted)?,
    }
    Ok(())
}

/// Healing goes to the chosen character, or to the item's owner when
/// uninvoked without a target.
fn apply_heal(game: &mut Game, effect: &mut Effect, target: Option<EffectTarget>) -> GameResult<()> {
    let target_id = match target {
        Some(EffectTarget::Actor(id)) => id,
        None => effect.owner.ok_or_else(|| GameError::Rule(
            "a heal effect with no target needs an owned source item".into(),
        ))?,
        Some(EffectTarget::Tile(_)) => {
            return Err(invalid_target(effect, "a tile"));
        }
    };
    if !game.actors[target_id].is_character() {
        let name = game.actors[target_id].name.clone();
        return Err(invalid_target(effect, &name));
    }

    effect.actors.push(target_id);
    effect.level = game.actors[target_id].level;
    effect.tiles = game.actors[target_id].tile.into_iter().collect();

    publish(game, effect);
    tick(game, effect);
    game.register_effect(effect.clone());
    Ok(())
}

/// Confusion only works on monsters; anything else is a content error.
fn apply_confuse(
    game: &mut Game,
    effect: &mut Effect,
    target: Option<EffectTarget>,
) -> GameResult<()> {
    let target_id = match target {
        Some(EffectTarget::Actor(id)) => id,
        _ => return Err(invalid_target(effect, "nothing")),
    };
    let is_monster = game.actors[target_id]
        .as_character()
        .map(|c| c.is_monster())
        .unwrap_or(false);
    if !is_monster {
        let name = game.actors[target_id].name.clone();
        return Err(invalid_target(effect, &name));
    }

    let turns = effect.duration;
    let name = capitalize(&game.actors[target_id].name);
    if let Some(character) = game.actors[target_id].as_character_mut() {
        let original = std::mem::replace(&mut character.behavior, Behavior::Normal);
        character.behavior = Behavior::Confused {
            original: Box::new(original),
            remaining: turns,
        };
    }
    game.journal.push(
        MessageKind::Game,
        format!("{} is confused for {} turns.", name, turns),
    );

    effect.actors.push(target_id);
    effect.level = game.actors[target_id].level;
    effect.tiles = game.actors[target_id].tile.into_iter().collect();

    publish(game, effect);
    game.register_effect(effect.clone());
    Ok(())
}

/// Area damage around a center tile. Targeted casts include the center;
/// an untargeted nova spreads around the owner and excludes its tile.
fn apply_damage(
    game: &mut Game,
    effect: &mut Effect,
    target: Option<EffectTarget>,
    targeted: bool,
) -> GameResult<()> {
    // the nova falls back to the item's owner as its center
    let target = match target {
        Some(t) => t,
        None => EffectTarget::Actor(effect.owner.ok_or_else(|| {
            GameError::Rule("a damage effect with no target needs an owned source item".into())
        })?),
    };
    let (level, center) = match target {
        EffectTarget::Tile(pos) => {
            let level = game
                .current_level()
                .ok_or_else(|| GameError::Rule("no current level to target".into()))?;
            (level, pos)
        }
        EffectTarget::Actor(id) => {
            // the actor may stand on a tile or sit in someone's inventory
            let actor = &game.actors[id];
            let place = actor
                .level
                .zip(actor.tile)
                .or_else(|| {
                    let owner = actor.as_item().and_then(|i| i.owner)?;
                    game.actors[owner].level.zip(game.actors[owner].tile)
                });
            match place {
                Some(place) => place,
                None => {
                    let name = game.actors[id].name.clone();
                    return Err(invalid_target(effect, &name));
                }
            }
        }
    };

    effect.level = Some(level);
    effect.tiles = game
        .level(level)
        .map
        .circle_tiles(center.x, center.y, effect.radius, true, true);
    if !targeted {
        effect.tiles.retain(|&pos| pos != center);
    }

    publish(game, effect);
    tick(game, effect);
    game.register_effect(effect.clone());
    Ok(())
}

/// One scheduler tick. A duration already at zero never ticks; the
/// scheduler removes such effects.
pub fn tick(game: &mut Game, effect: &mut Effect) {
    if effect.duration == 0 {
        return;
    }
    effect.duration -= 1;

    match effect.kind {
        EffectKind::Heal => {
            for index in 0..effect.actors.len() {
                let target = effect.actors[index];
                let amount = effect.magnitude.roll(&mut game.rng);
                combat::take_heal(game, target, amount, effect.source);
            }
        }
        EffectKind::Damage => {
            // re-collect whoever stands in the area right now
            effect.actors.clear();
            if let Some(level) = effect.level {
                for &pos in &effect.tiles {
                    if let Some(tile) = game.level(level).map.tile(pos) {
                        effect.actors.extend(tile.actors.iter().copied());
                    }
                }
            }
            let source_name = capitalize(&game.actors[effect.source].name);
            for index in 0..effect.actors.len() {
                let target = effect.actors[index];
                let amount = effect.magnitude.roll(&mut game.rng);
                let target_name = game.actors[target].name.clone();
                game.journal.push(
                    MessageKind::Game,
                    format!("{} hits {} for {} damage.", source_name, target_name, amount),
                );
                combat::take_damage(game, target, amount, effect.owner);
            }
        }
        // the countdown lives on the character's behavior state and is
        // driven by the scheduler; the record only times out here
        EffectKind::Confuse => {}
    }
}

/// Append an entry to the renderer-drained visualization queue.
fn publish(game: &mut Game, effect: &Effect) {
    game.journal.publish_effect(effect);
}

fn invalid_target(effect: &Effect, target: &str) -> GameError {
    GameError::InvalidTarget {
        effect: format!("{:?}", effect.kind).to_lowercase(),
        target: target.to_string(),
    }
}
