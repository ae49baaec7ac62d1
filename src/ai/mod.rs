//! Monster AI
//!
//! Per-character turn logic. Strategies are a closed enum resolved
//! from content keys; confusion is a behavior override driven by the
//! scheduler, not a strategy of its own.

use rand::Rng;

use crate::combat;
use crate::entities::character::{Behavior, Lifecycle};
use crate::entities::ActorId;
use crate::error::{GameError, GameResult};
use crate::game::{Game, MessageKind};
use crate::items::item::capitalize;

/// How far a monster can see the player.
pub const SIGHT_RANGE: f64 = 8.0;
/// Inside this distance the monster attacks instead of moving.
pub const ATTACK_RANGE: f64 = 2.0;

/// The turn strategy of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiKind {
    /// Pursue the player and attack in range.
    Basic,
}

impl AiKind {
    /// Registry mapping content-schema strategy keys to kinds. An empty
    /// key means the character takes no turns on its own.
    pub fn from_key(key: &str) -> GameResult<Option<AiKind>> {
        match key {
            "basic" => Ok(Some(AiKind::Basic)),
            "" | "none" => Ok(None),
            other => Err(GameError::UnknownKey(format!("ai strategy {other}"))),
        }
    }
}

/// Run one turn for a character. A confused character acts erratically
/// and counts down; otherwise its strategy decides.
pub fn take_turn(game: &mut Game, id: ActorId) {
    let (state, confused, ai) = {
        let Some(character) = game.actors[id].as_character() else {
            return;
        };
        (
            character.state,
            matches!(character.behavior, Behavior::Confused { .. }),
            character.ai,
        )
    };
    if state != Lifecycle::Active {
        return;
    }
    if confused {
        confused_turn(game, id);
        return;
    }
    match ai {
        Some(AiKind::Basic) => basic_turn(game, id),
        None => {}
    }
}

/// Stumble one step in a random direction and count the confusion
/// down; at zero the previous behavior comes back.
fn confused_turn(game: &mut Game, id: ActorId) {
    let name = capitalize(&game.actors[id].name);
    game.journal
        .push(MessageKind::Game, format!("{} stumbles around.", name));

    let dx = game.rng.gen_range(-1..=1);
    let dy = game.rng.gen_range(-1..=1);
    game.move_along(id, dx, dy);

    if let Some(character) = game.actors[id].as_character_mut() {
        let mut revert = None;
        if let Behavior::Confused { original, remaining } = &mut character.behavior {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                revert = Some(std::mem::replace(original.as_mut(), Behavior::Normal));
            }
        }
        if let Some(original) = revert {
            character.behavior = original;
        }
    }
}

/// Pursue-and-attack. No pathfinding: the step toward the player is a
/// rounded unit vector, so monsters can get stuck behind blocked tiles.
fn basic_turn(game: &mut Game, id: ActorId) {
    // only act when placed in the world
    if game.actors[id].level.is_none() || game.actors[id].tile.is_none() {
        log::debug!("{} is not in a level, staying put", game.actors[id].name);
        return;
    }
    let Some(player) = game.player() else {
        log::debug!("no player found, {} stays put", game.actors[id].name);
        return;
    };
    if !game.actors.is_active(player) {
        return;
    }
    let (Some(own_tile), Some(player_tile)) = (game.actors[id].tile, game.actors[player].tile)
    else {
        return;
    };
    if game.actors[id].level != game.actors[player].level {
        return;
    }

    let distance = own_tile.euclidean_distance(&player_tile);
    if distance > SIGHT_RANGE {
        return;
    }
    if distance < ATTACK_RANGE {
        log::debug!("{} attacks the player", game.actors[id].name);
        combat::attack(game, id, player);
    } else {
        log::debug!("{} moves towards the player", game.actors[id].name);
        game.move_toward(id, player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::world::{Map, Position};

    fn game() -> Game {
        Game::with_seed(GameData::default_content(), 11)
    }

    #[test]
    fn strategy_keys_resolve_through_the_registry() {
        assert_eq!(AiKind::from_key("basic").unwrap(), Some(AiKind::Basic));
        assert_eq!(AiKind::from_key("").unwrap(), None);
        assert!(AiKind::from_key("flanking").is_err());
    }

    #[test]
    fn monsters_idle_beyond_sight_range() {
        let mut game = game();
        let level = game.add_level("Floor", 1, Map::new(40, 40));
        let _player = game.spawn_player(level, Position::new(1, 1)).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(30, 30));

        take_turn(&mut game, rat);
        assert_eq!(game.actors()[rat].tile, Some(Position::new(30, 30)));
    }

    #[test]
    fn monsters_step_toward_a_visible_player() {
        let mut game = game();
        let level = game.add_level("Floor", 1, Map::new(40, 40));
        let _player = game.spawn_player(level, Position::new(10, 10)).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(15, 10));

        take_turn(&mut game, rat);
        assert_eq!(game.actors()[rat].tile, Some(Position::new(14, 10)));
    }

    #[test]
    fn monsters_attack_in_range() {
        let mut game = game();
        let level = game.add_level("Floor", 1, Map::new(40, 40));
        let player = game.spawn_player(level, Position::new(10, 10)).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(11, 10));

        let messages_before = game.journal().messages().len();
        take_turn(&mut game, rat);
        // attacking never moves the monster
        assert_eq!(game.actors()[rat].tile, Some(Position::new(11, 10)));
        assert!(game.journal().messages().len() > messages_before);
        let _ = player;
    }

    #[test]
    fn monsters_get_stuck_behind_walls() {
        let mut game = game();
        let level = game.add_level("Floor", 1, Map::new(40, 40));
        let _player = game.spawn_player(level, Position::new(10, 10)).unwrap();
        // wall between rat and player
        game.level_mut(level)
            .map
            .set_blocked(Position::new(12, 10), true);
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(13, 10));

        take_turn(&mut game, rat);
        assert_eq!(game.actors()[rat].tile, Some(Position::new(13, 10)));
    }

    #[test]
    fn confusion_reverts_after_its_countdown() {
        let mut game = game();
        let level = game.add_level("Floor", 1, Map::new(40, 40));
        let _player = game.spawn_player(level, Position::new(1, 1)).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(30, 30));

        let turns = 3;
        if let Some(character) = game.actors_mut()[rat].as_character_mut() {
            character.behavior = Behavior::Confused {
                original: Box::new(Behavior::Normal),
                remaining: turns,
            };
        }
        for _ in 0..turns {
            take_turn(&mut game, rat);
        }
        assert_eq!(
            game.actors()[rat].as_character().unwrap().behavior,
            Behavior::Normal
        );
    }
}
