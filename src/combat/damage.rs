//! Attack resolution
//!
//! Handles all combat math: hit rolls, damage, death transitions and
//! experience awards.

use rand::Rng;

use crate::entities::character::{Behavior, CharacterKind, Lifecycle};
use crate::entities::stats::StatBlock;
use crate::entities::ActorId;
use crate::game::{Game, MessageKind};
use crate::items::item::capitalize;

/// Result of resolving a single attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// The raw `[0, 100)` roll.
    pub roll: i32,
    /// Minimum roll needed to land the hit.
    pub threshold: i32,
    /// Damage after armor; can be zero or negative on a glancing hit.
    pub damage: i32,
    pub is_miss: bool,
}

impl AttackResult {
    pub fn is_hit(&self) -> bool {
        !self.is_miss
    }
}

/// Resolve an attack from a fixed roll.
///
/// The hit threshold is `100 - (50 + accuracy - dodge)`; rolling under
/// it misses. The margin above the threshold scales damage up to
/// nearly double before armor is subtracted:
/// `floor((1 + (roll - threshold)/100) * damage) - armor`.
pub fn resolve_attack(roll: i32, attacker: &StatBlock, defender: &StatBlock) -> AttackResult {
    let threshold = 100 - (50 + attacker.accuracy - defender.dodge);
    if roll < threshold {
        return AttackResult {
            roll,
            threshold,
            damage: 0,
            is_miss: true,
        };
    }
    // integer form of (1 + bonus_factor) * damage, bonus_factor in [0, 1)
    let damage = (100 + roll - threshold) * attacker.damage / 100 - defender.armor;
    AttackResult {
        roll,
        threshold,
        damage,
        is_miss: false,
    }
}

/// Have one character attack another. Draws the roll from the game
/// RNG, journals the outcome and applies any damage.
pub fn attack(game: &mut Game, attacker: ActorId, target: ActorId) {
    let attacker_stats = game.actors.derived_stats(attacker);
    let defender_stats = game.actors.derived_stats(target);
    let roll = game.rng.gen_range(0..100);
    let result = resolve_attack(roll, &attacker_stats, &defender_stats);

    let attacker_name = capitalize(&game.actors[attacker].name);
    let target_name = game.actors[target].name.clone();
    game.journal.push(
        MessageKind::Combat,
        format!(
            "{}: attack roll {} against threshold {}",
            attacker_name, result.roll, result.threshold
        ),
    );

    if result.is_miss {
        game.journal.push(
            MessageKind::Game,
            format!("{} attacks {}: Miss!", attacker_name, target_name),
        );
    } else if result.damage <= 0 {
        game.journal.push(
            MessageKind::Game,
            format!(
                "{} attacks {}: Hit, but no damage!",
                attacker_name, target_name
            ),
        );
    } else {
        game.journal.push(
            MessageKind::Game,
            format!(
                "{} attacks {}: Hit! ({} damage)",
                attacker_name, target_name, result.damage
            ),
        );
        take_damage(game, target, result.damage, Some(attacker));
    }
}

/// Apply damage to an actor. Only active characters can be hurt: plain
/// actors are indestructible props and dead characters stay dead.
/// Reaching zero hit points triggers the death transition.
pub fn take_damage(game: &mut Game, victim: ActorId, amount: i32, attacker: Option<ActorId>) {
    if !game.actors.is_active(victim) {
        return;
    }
    if amount > 0 {
        let hp = game.actors.hit_points(victim);
        game.actors.set_hit_points(victim, hp - amount);
    }
    if game.actors.hit_points(victim) <= 0 {
        let name = capitalize(&game.actors[victim].name);
        game.journal
            .push(MessageKind::Game, format!("{} is killed!", name));
        kill(game, victim, attacker);
    }
}

/// Restore hit points, clamped by the stat model.
pub fn take_heal(game: &mut Game, target: ActorId, amount: i32, source: ActorId) {
    if amount <= 0 || !game.actors[target].is_character() {
        return;
    }
    let hp = game.actors.hit_points(target);
    game.actors.set_hit_points(target, hp + amount);
    let name = capitalize(&game.actors[target].name);
    let source_name = game.actors[source].name.clone();
    game.journal.push(
        MessageKind::Game,
        format!("{} gains {} hitpoints from a {}.", name, amount, source_name),
    );
}

/// The one-way death transition: XP award, flavor text, corpse
/// transformation, AI removal.
fn kill(game: &mut Game, victim: ActorId, attacker: Option<ActorId>) {
    let xp_value = game.actors[victim]
        .as_character()
        .map(|c| c.xp_value)
        .unwrap_or(0);

    if let Some(attacker) = attacker {
        enum Credit {
            Player(String),
            Monster(String),
            None,
        }
        let credit = {
            let actor = &game.actors[attacker];
            match actor.as_character().map(|c| &c.kind) {
                Some(CharacterKind::Player(_)) => Credit::Player(actor.name.clone()),
                Some(CharacterKind::Monster(m)) => Credit::Monster(m.killed_by.clone()),
                _ => Credit::None,
            }
        };
        match credit {
            Credit::Player(name) => {
                game.journal
                    .push(MessageKind::Game, format!("{} gains {} XP.", name, xp_value));
                game.award_xp(attacker, xp_value);
            }
            Credit::Monster(killed_by) => {
                if !killed_by.is_empty() {
                    game.journal.push(MessageKind::Game, killed_by);
                }
            }
            Credit::None => {}
        }
    }

    let actor = &mut game.actors[victim];
    let is_player = actor
        .as_character()
        .map(|c| c.is_player())
        .unwrap_or(false);
    actor.glyph = '%';
    if is_player {
        actor.name = format!("The remains of {}", actor.name);
        actor.color = (255, 0, 0);
    } else {
        actor.name = format!("{} corpse", actor.name);
    }
    if let Some(character) = actor.as_character_mut() {
        character.ai = None;
        character.behavior = Behavior::Normal;
        character.state = Lifecycle::Dead;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::entities::Lifecycle;
    use crate::world::{Map, Position};

    fn game() -> Game {
        Game::with_seed(GameData::default_content(), 42)
    }

    #[test]
    fn threshold_and_damage_math() {
        let attacker = StatBlock::new(60, 0, 20, 0, 10, 0);
        let defender = StatBlock::new(0, 10, 0, 5, 10, 0);
        // threshold = 100 - (50 + 60 - 10) = 0
        let result = resolve_attack(90, &attacker, &defender);
        assert!(result.is_hit());
        assert_eq!(result.threshold, 0);
        // floor(1.9 * 20) - 5 = 33
        assert_eq!(result.damage, 33);
    }

    #[test]
    fn rolling_under_the_threshold_misses() {
        let attacker = StatBlock::new(0, 0, 10, 0, 10, 0);
        let defender = StatBlock::new(0, 20, 0, 0, 10, 0);
        // threshold = 100 - (50 + 0 - 20) = 70
        let result = resolve_attack(69, &attacker, &defender);
        assert!(result.is_miss);
        let result = resolve_attack(70, &attacker, &defender);
        assert!(result.is_hit());
    }

    #[test]
    fn armor_can_soak_a_hit_entirely() {
        let attacker = StatBlock::new(50, 0, 3, 0, 10, 0);
        let defender = StatBlock::new(0, 0, 0, 10, 10, 0);
        let result = resolve_attack(10, &attacker, &defender);
        assert!(result.is_hit());
        assert!(result.damage <= 0);
    }

    #[test]
    fn damage_decrements_hit_points_exactly() {
        let mut game = game();
        let level = game.add_level("Arena", 1, Map::new(10, 10));
        let player = game.spawn_player(level, Position::new(1, 1)).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(2, 1));

        let before = game.actors().hit_points(rat);
        take_damage(&mut game, rat, 3, Some(player));
        assert_eq!(game.actors().hit_points(rat), before - 3);
    }

    #[test]
    fn death_is_terminal_and_clears_the_ai() {
        let mut game = game();
        let level = game.add_level("Arena", 1, Map::new(10, 10));
        let player = game.spawn_player(level, Position::new(1, 1)).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(2, 1));

        take_damage(&mut game, rat, 9999, Some(player));
        let character = game.actors()[rat].as_character().unwrap();
        assert_eq!(character.state, Lifecycle::Dead);
        assert!(character.ai.is_none());
        assert!(game.actors()[rat].name.ends_with("corpse"));
        assert_eq!(game.actors()[rat].glyph, '%');

        // further damage is a no-op
        let hp = game.actors().hit_points(rat);
        take_damage(&mut game, rat, 50, Some(player));
        assert_eq!(game.actors().hit_points(rat), hp);
        assert_eq!(
            game.actors()[rat].as_character().unwrap().state,
            Lifecycle::Dead
        );
    }

    #[test]
    fn player_kills_award_experience() {
        let mut game = game();
        let level = game.add_level("Arena", 1, Map::new(10, 10));
        let player = game.spawn_player(level, Position::new(1, 1)).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(2, 1));
        let xp_value = game.actors()[rat].as_character().unwrap().xp_value;

        take_damage(&mut game, rat, 9999, Some(player));
        let experience = game.actors()[player]
            .as_character()
            .unwrap()
            .as_player()
            .unwrap()
            .experience;
        assert_eq!(experience.xp, xp_value);
    }

    #[test]
    fn monster_kills_are_not_awarded() {
        let mut game = game();
        let level = game.add_level("Arena", 1, Map::new(10, 10));
        let _player = game.spawn_player(level, Position::new(1, 1)).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        let bat = game.spawn_monster("giantbat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(2, 1));
        game.place_actor(bat, level, Position::new(3, 1));

        take_damage(&mut game, bat, 9999, Some(rat));
        assert_eq!(
            game.actors()[bat].as_character().unwrap().state,
            Lifecycle::Dead
        );
    }
}
