//! The game
//!
//! Root of all shared state and the turn scheduler. One `Game` value
//! owns the actor arena, the levels, the active effects, the content
//! catalogs, the RNG and the journal; the player-intent API and the
//! scheduler below are the only ways the outside world advances it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::{self, AiKind};
use crate::combat;
use crate::data::templates::{ItemClass, ModifierScope};
use crate::data::{GameData, ItemCatalog, ModifierCatalog, MonsterCatalog};
use crate::effects::{self, Effect, EffectKind, EffectTarget};
use crate::entities::actor::{Actor, ActorId, ActorKind, Actors, ContainerData, PortalData};
use crate::entities::character::{
    AppliedModifier, CharacterData, CharacterKind, MonsterData, PlayerData,
};
use crate::entities::stats::StatBlock;
use crate::error::{GameError, GameResult};
use crate::game::journal::{Journal, MessageKind};
use crate::items::item::{capitalize, compose_name};
use crate::items::{find_stack, EffectSpec, ItemData, ItemKind, ItemModifier};
use crate::world::{Level, LevelId, Map, Position};

/// Overall state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// Reserved for an endgame flow; nothing transitions here yet.
    Finished,
}

/// A player interaction that needs the UI to continue, returned by
/// `try_interact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// The player opened a container; the UI shows its inventory.
    Container { container: ActorId },
}

/// The game: all simulation state and the turn scheduler.
pub struct Game {
    state: GameState,
    pub(crate) actors: Actors,
    pub(crate) levels: Vec<Level>,
    pub(crate) player: Option<ActorId>,
    pub(crate) current_level: Option<LevelId>,
    pub(crate) active_effects: Vec<Effect>,
    pub(crate) monster_catalog: MonsterCatalog,
    pub(crate) item_catalog: ItemCatalog,
    pub(crate) modifier_catalog: ModifierCatalog,
    pub(crate) journal: Journal,
    pub(crate) rng: StdRng,
}

impl Game {
    /// Create a game from content data with an entropy-seeded RNG.
    pub fn new(data: GameData) -> Self {
        Self::build(data, StdRng::from_entropy())
    }

    /// Create a game with a fixed RNG seed for deterministic replay.
    pub fn with_seed(data: GameData, seed: u64) -> Self {
        Self::build(data, StdRng::seed_from_u64(seed))
    }

    fn build(data: GameData, rng: StdRng) -> Self {
        Self {
            state: GameState::Playing,
            actors: Actors::new(),
            levels: Vec::new(),
            player: None,
            current_level: None,
            active_effects: Vec::new(),
            monster_catalog: MonsterCatalog::new(data.monsters),
            item_catalog: ItemCatalog::new(data.items),
            modifier_catalog: ModifierCatalog::new(data.modifiers),
            journal: Journal::new(),
            rng,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn actors(&self) -> &Actors {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut Actors {
        &mut self.actors
    }

    pub fn player(&self) -> Option<ActorId> {
        self.player
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, id: LevelId) -> &Level {
        &self.levels[id.index()]
    }

    pub fn level_mut(&mut self, id: LevelId) -> &mut Level {
        &mut self.levels[id.index()]
    }

    pub fn current_level(&self) -> Option<LevelId> {
        self.current_level
    }

    pub fn active_effects(&self) -> &[Effect] {
        &self.active_effects
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Mutable journal access for the UI to drain visualization events.
    pub fn journal_mut(&mut self) -> &mut Journal {
        &mut self.journal
    }

    pub fn monster_catalog(&self) -> &MonsterCatalog {
        &self.monster_catalog
    }

    pub fn item_catalog(&self) -> &ItemCatalog {
        &self.item_catalog
    }

    pub(crate) fn register_effect(&mut self, effect: Effect) {
        self.active_effects.push(effect);
    }

    // ------------------------------------------------------------------
    // World construction
    // ------------------------------------------------------------------

    /// Add a level. The first one becomes the current level.
    pub fn add_level(&mut self, name: impl Into<String>, difficulty: i32, map: Map) -> LevelId {
        let id = LevelId(self.levels.len() as u32);
        let level = Level::new(name, difficulty, map);
        self.journal.push(
            MessageKind::Generation,
            format!("Generating level: {} (difficulty {})", level.name, difficulty),
        );
        self.levels.push(level);
        if self.current_level.is_none() {
            self.current_level = Some(id);
        }
        id
    }

    /// Create the player and place it in the world.
    pub fn spawn_player(&mut self, level: LevelId, pos: Position) -> GameResult<ActorId> {
        if self.level(level).map.is_blocked(pos) {
            return Err(GameError::Rule("cannot place the player on a blocked tile".into()));
        }
        let name = ["Joe", "Wesley", "Frost"][self.rng.gen_range(0..3)];
        let data = CharacterData::new(
            StatBlock::new(10, 10, 3, 1, 12, 10),
            1,
            None,
            CharacterKind::Player(PlayerData::new()),
        );
        let id = self.insert_actor("player", name, '@', (250, 250, 250), "", ActorKind::Character(data));
        let max = self.actors.max_hit_points(id);
        self.actors.set_hit_points(id, max);
        self.player = Some(id);
        self.place_actor(id, level, pos);
        self.refresh_field_of_view();
        self.journal.push(
            MessageKind::Game,
            format!(
                "You are {}, a young and fearless adventurer. It is time to begin your \
                 legendary and without doubt heroic expedition into the unknown. Good luck!",
                name
            ),
        );
        Ok(id)
    }

    /// Create a monster from its template, with optional modifiers.
    /// The monster is not placed; use `place_actor`.
    pub fn spawn_monster(&mut self, key: &str, modifier_keys: &[&str]) -> GameResult<ActorId> {
        let template = self.monster_catalog.template(key)?.clone();
        let ai = AiKind::from_key(&template.ai)?;

        let mut modifiers = Vec::new();
        for &modifier_key in modifier_keys {
            let modifier = self.modifier_catalog.template(modifier_key)?;
            if modifier.scope != ModifierScope::Monster {
                return Err(GameError::ModifierMismatch {
                    modifier: modifier_key.to_string(),
                    base: key.to_string(),
                });
            }
            modifiers.push(AppliedModifier {
                key: modifier.key.clone(),
                name: modifier.name.clone(),
                prefix: modifier.is_prefix(),
                level: modifier.level,
                stats: modifier.stats,
            });
        }

        self.monster_catalog.note_spawned(key)?;

        // the hit die gives each instance its own durability
        let mut stats = template.stats;
        stats.body += template.hit_die.roll(&mut self.rng);

        let name = compose_name(
            &template.name,
            modifiers.iter().map(|m| (m.name.as_str(), m.prefix)),
        );
        let data = CharacterData::new(
            stats,
            template.xp,
            ai,
            CharacterKind::Monster(MonsterData {
                killed_by: template.killed_by.clone(),
                base_challenge_rating: template.challenge_rating,
                modifiers,
            }),
        );
        let id = self.insert_actor(
            &template.key,
            &name,
            template.glyph,
            template.color,
            &template.flavor,
            ActorKind::Character(data),
        );
        let max = self.actors.max_hit_points(id);
        self.actors.set_hit_points(id, max);
        Ok(id)
    }

    /// Create a random monster with challenge rating at or below the cap.
    pub fn spawn_random_monster(&mut self, max_challenge_rating: i32) -> GameResult<ActorId> {
        let key = self
            .monster_catalog
            .random_key(max_challenge_rating, &mut self.rng)?;
        self.spawn_monster(&key, &[])
    }

    /// Create an item from its template, with optional modifiers. The
    /// item starts unplaced and unowned.
    pub fn spawn_item(&mut self, key: &str, modifier_keys: &[&str]) -> GameResult<ActorId> {
        let template = self.item_catalog.template(key)?.clone();
        let mut bonuses = template.bonuses;
        let mut item_level = template.item_level;
        let mut effect = match (template.class, &template.effect) {
            (ItemClass::Consumable, Some(e)) => Some(EffectSpec {
                kind: EffectKind::from_key(&e.effect)?,
                targeted: e.targeted,
                radius: e.radius,
                magnitude: e.hit_die,
                duration: e.duration,
                element: e.element,
            }),
            (ItemClass::Consumable, None) => {
                return Err(GameError::UnusableItem(key.to_string()));
            }
            (ItemClass::Equipment, _) => None,
        };

        let mut modifiers = Vec::new();
        for &modifier_key in modifier_keys {
            let modifier = self.modifier_catalog.template(modifier_key)?;
            if !modifier.applies_to_item(template.class) {
                return Err(GameError::ModifierMismatch {
                    modifier: modifier_key.to_string(),
                    base: key.to_string(),
                });
            }
            bonuses = bonuses.plus(&modifier.stats);
            item_level += modifier.level;
            if let Some(effect) = effect.as_mut() {
                effect.radius += modifier.effect_radius;
                effect.magnitude = effect.magnitude.with_extra_dice(modifier.extra_dice);
                effect.duration = (effect.duration as i32 + modifier.effect_duration).max(0) as u32;
                if let Some(element) = modifier.effect_element {
                    effect.element = element;
                }
            }
            modifiers.push(ItemModifier {
                key: modifier.key.clone(),
                name: modifier.name.clone(),
                prefix: modifier.is_prefix(),
                level: modifier.level,
            });
        }

        let name = compose_name(
            &template.name,
            modifiers.iter().map(|m| (m.name.as_str(), m.prefix)),
        );
        let kind = match effect {
            Some(effect) => ItemKind::Consumable { effect },
            None => ItemKind::Equipment { equipped: false },
        };
        let data = ItemData {
            template: template.key.clone(),
            item_level,
            bonuses,
            modifiers,
            owner: None,
            stack_size: 1,
            kind,
        };
        Ok(self.insert_actor(
            &template.key,
            &name,
            template.glyph,
            (200, 200, 200),
            "",
            ActorKind::Item(data),
        ))
    }

    /// Create a random item with item level at or below the cap.
    pub fn spawn_random_item(&mut self, max_item_level: i32) -> GameResult<ActorId> {
        let key = self.item_catalog.random_key(max_item_level, &mut self.rng)?;
        self.spawn_item(&key, &[])
    }

    /// Create an unplaced NPC, for vendors and the like.
    pub fn spawn_npc(&mut self, name: &str) -> ActorId {
        let data = CharacterData::new(
            StatBlock::new(10, 10, 2, 0, 8, 10),
            1,
            None,
            CharacterKind::Npc,
        );
        let id = self.insert_actor("npc", name, '@', (200, 170, 120), "", ActorKind::Character(data));
        let max = self.actors.max_hit_points(id);
        self.actors.set_hit_points(id, max);
        id
    }

    /// Create a portal and place it.
    pub fn spawn_portal(
        &mut self,
        level: LevelId,
        pos: Position,
        glyph: char,
        name: &str,
        message: &str,
    ) -> ActorId {
        let data = PortalData {
            message: message.to_string(),
            destination: None,
        };
        let id = self.insert_actor("portal", name, glyph, (150, 0, 255), "", ActorKind::Portal(data));
        self.place_actor(id, level, pos);
        id
    }

    /// Link two portals symmetrically: each becomes the other's
    /// destination.
    pub fn connect_portals(&mut self, a: ActorId, b: ActorId) {
        if self.actors[a].as_portal().is_none() || self.actors[b].as_portal().is_none() {
            return;
        }
        if let ActorKind::Portal(portal) = &mut self.actors[a].kind {
            portal.destination = Some(b);
        }
        if let ActorKind::Portal(portal) = &mut self.actors[b].kind {
            portal.destination = Some(a);
        }
    }

    /// Create a container and place it.
    pub fn spawn_container(&mut self, level: LevelId, pos: Position, name: &str) -> ActorId {
        let id = self.insert_actor(
            "container",
            name,
            '~',
            (45, 45, 45),
            "",
            ActorKind::Container(ContainerData::default()),
        );
        self.place_actor(id, level, pos);
        id
    }

    fn insert_actor(
        &mut self,
        key: &str,
        name: &str,
        glyph: char,
        color: (u8, u8, u8),
        flavor: &str,
        kind: ActorKind,
    ) -> ActorId {
        self.actors.insert(|id| Actor {
            id,
            key: key.to_string(),
            name: name.to_string(),
            glyph,
            color,
            flavor: flavor.to_string(),
            level: None,
            tile: None,
            hit_points: 1,
            action_taken: false,
            in_view: false,
            scene_handle: None,
            kind,
        })
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// Put an actor on a level and tile, unregistering it from wherever
    /// it was. A blocked tile leaves the actor registered but unplaced.
    pub fn place_actor(&mut self, id: ActorId, level: LevelId, pos: Position) {
        self.remove_from_level(id);
        self.levels[level.index()].register(id, &self.actors.get(id).kind);
        self.actors[id].level = Some(level);
        if !self.levels[level.index()].map.is_blocked(pos) {
            if let Some(tile) = self.levels[level.index()].map.tile_mut(pos) {
                tile.add_actor(id);
            }
            self.actors[id].tile = Some(pos);
        }
    }

    /// Take an actor out of the world entirely (picked up, absorbed).
    pub fn remove_from_level(&mut self, id: ActorId) {
        if let Some(level) = self.actors[id].level {
            if let Some(pos) = self.actors[id].tile {
                if let Some(tile) = self.levels[level.index()].map.tile_mut(pos) {
                    tile.remove_actor(id);
                }
            }
            self.levels[level.index()].unregister(id);
        }
        self.actors[id].level = None;
        self.actors[id].tile = None;
    }

    /// One grid step. Clamped to the map, silently refused by blocked
    /// tiles. Old and new tile occupancy change together.
    pub fn move_along(&mut self, id: ActorId, dx: i32, dy: i32) {
        let Some(level) = self.actors[id].level else {
            return;
        };
        let Some(pos) = self.actors[id].tile else {
            return;
        };
        let map = &self.levels[level.index()].map;
        let target = map.clamp(pos.offset(dx, dy));
        if target == pos || map.is_blocked(target) {
            return;
        }
        let map = &mut self.levels[level.index()].map;
        if let Some(tile) = map.tile_mut(pos) {
            tile.remove_actor(id);
        }
        if let Some(tile) = map.tile_mut(target) {
            tile.add_actor(id);
        }
        self.actors[id].tile = Some(target);
    }

    /// One grid step along the rounded unit vector toward the target.
    pub fn move_toward(&mut self, id: ActorId, target: ActorId) {
        let (Some(own), Some(other)) = (self.actors[id].tile, self.actors[target].tile) else {
            return;
        };
        let distance = own.euclidean_distance(&other);
        if distance == 0.0 {
            return;
        }
        let dx = ((other.x - own.x) as f64 / distance).round() as i32;
        let dy = ((other.y - own.y) as f64 / distance).round() as i32;
        self.move_along(id, dx, dy);
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    /// Put an item into a character's or container's inventory,
    /// merging stackables into an existing stack when one matches.
    pub fn give_item(&mut self, owner: ActorId, item: ActorId) {
        self.remove_from_level(item);
        if let Some(data) = self.actors[item].as_item_mut() {
            data.owner = Some(owner);
        }
        let stack = {
            let inventory = match &self.actors[owner].kind {
                ActorKind::Character(c) => &c.inventory,
                ActorKind::Container(c) => &c.inventory,
                _ => return,
            };
            find_stack(&self.actors, inventory, item)
        };
        if let Some(existing) = stack {
            if let Some(data) = self.actors[existing].as_item_mut() {
                data.stack_size += 1;
            }
            // the absorbed instance ends consumed and unowned
            if let Some(data) = self.actors[item].as_item_mut() {
                data.stack_size = 0;
                data.owner = None;
            }
            return;
        }
        match &mut self.actors[owner].kind {
            ActorKind::Character(c) => c.inventory.push(item),
            ActorKind::Container(c) => c.inventory.push(item),
            _ => {}
        }
    }

    /// Remove an item from a character's inventory, unequipping it
    /// first if needed.
    pub fn remove_item(&mut self, owner: ActorId, item: ActorId) {
        let equipped = self.actors[owner]
            .as_character()
            .map(|c| c.is_equipped(item))
            .unwrap_or(false);
        if equipped {
            self.unequip_item(owner, item);
        }
        let removed = match &mut self.actors[owner].kind {
            ActorKind::Character(c) => c.inventory.remove(item),
            ActorKind::Container(c) => c.inventory.remove(item),
            _ => false,
        };
        if removed {
            if let Some(data) = self.actors[item].as_item_mut() {
                data.owner = None;
            }
        }
    }

    /// Equip an owned, not yet equipped piece of equipment. Anything
    /// else is a silent no-op.
    pub fn equip_item(&mut self, owner: ActorId, item: ActorId) {
        let eligible = self.actors[owner]
            .as_character()
            .map(|c| c.inventory.contains(item) && !c.is_equipped(item))
            .unwrap_or(false);
        let is_equipment = matches!(
            self.actors[item].as_item().map(|i| &i.kind),
            Some(ItemKind::Equipment { .. })
        );
        if !eligible || !is_equipment {
            return;
        }
        if let Some(character) = self.actors[owner].as_character_mut() {
            character.equipped.push(item);
        }
        if let Some(data) = self.actors[item].as_item_mut() {
            if let ItemKind::Equipment { equipped } = &mut data.kind {
                *equipped = true;
            }
        }
        let owner_name = capitalize(&self.actors[owner].name);
        let item_name = self.actors[item].name.clone();
        self.journal.push(
            MessageKind::Game,
            format!("{} equips a {}.", owner_name, item_name),
        );
    }

    /// Unequip an equipped item; idempotent.
    pub fn unequip_item(&mut self, owner: ActorId, item: ActorId) {
        let equipped = self.actors[owner]
            .as_character()
            .map(|c| c.is_equipped(item))
            .unwrap_or(false);
        if !equipped {
            return;
        }
        if let Some(character) = self.actors[owner].as_character_mut() {
            character.equipped.retain(|&i| i != item);
        }
        if let Some(data) = self.actors[item].as_item_mut() {
            if let ItemKind::Equipment { equipped } = &mut data.kind {
                *equipped = false;
            }
        }
        let owner_name = capitalize(&self.actors[owner].name);
        let item_name = self.actors[item].name.clone();
        self.journal.push(
            MessageKind::Game,
            format!("{} unequips a {}.", owner_name, item_name),
        );
    }

    /// Pick an item up from the floor into an inventory.
    pub fn pick_up_item(&mut self, owner: ActorId, item: ActorId) {
        let item_name = self.actors[item].name.clone();
        self.give_item(owner, item);
        let owner_name = capitalize(&self.actors[owner].name);
        self.journal.push(
            MessageKind::Game,
            format!("{} picks up a {}.", owner_name, item_name),
        );
    }

    /// Drop an item onto the owner's tile.
    pub fn drop_item(&mut self, owner: ActorId, item: ActorId) {
        self.remove_item(owner, item);
        if let (Some(level), Some(pos)) = (self.actors[owner].level, self.actors[owner].tile) {
            self.place_actor(item, level, pos);
        }
        let owner_name = capitalize(&self.actors[owner].name);
        let item_name = self.actors[item].name.clone();
        self.journal.push(
            MessageKind::Game,
            format!("{} drops a {}.", owner_name, item_name),
        );
    }

    // ------------------------------------------------------------------
    // Progression
    // ------------------------------------------------------------------

    /// Award experience to the player, looping level-ups while the
    /// threshold is crossed. Each new level adds one point of body.
    pub(crate) fn award_xp(&mut self, id: ActorId, amount: i32) {
        let mut levels_gained = 0;
        if let Some(character) = self.actors[id].as_character_mut() {
            if let Some(player) = character.as_player_mut() {
                levels_gained = player.experience.add(amount);
            }
            character.base.body += levels_gained as i32;
        }
        for _ in 0..levels_gained {
            self.journal.push(MessageKind::Game, "You feel stronger!");
        }
    }

    // ------------------------------------------------------------------
    // Portals
    // ------------------------------------------------------------------

    /// Send the player through a portal: journal its message, move the
    /// player to the destination and switch the current level.
    pub fn follow_portal(&mut self, portal: ActorId) {
        let Some(player) = self.player else {
            return;
        };
        let Some(data) = self.actors[portal].as_portal() else {
            return;
        };
        let message = data.message.clone();
        let Some(destination) = data.destination else {
            return;
        };
        let (Some(level), Some(pos)) = (
            self.actors[destination].level,
            self.actors[destination].tile,
        ) else {
            return;
        };
        self.journal.push(MessageKind::Game, message);
        self.place_actor(player, level, pos);
        self.current_level = Some(level);
    }

    // ------------------------------------------------------------------
    // Player intents
    // ------------------------------------------------------------------

    /// Move the player, or attack the living monster standing in the
    /// way. Always counts as the player's action for this turn.
    pub fn try_move_or_attack(&mut self, dx: i32, dy: i32) {
        let Some(player) = self.player else {
            return;
        };
        self.actors[player].action_taken = true;
        if let Some(character) = self.actors[player].as_character_mut() {
            if let Some(data) = character.as_player_mut() {
                data.direction = (dx, dy);
            }
        }
        let Some(level) = self.actors[player].level else {
            return;
        };
        let Some(pos) = self.actors[player].tile else {
            return;
        };
        let map = &self.levels[level.index()].map;
        let target_pos = map.clamp(pos.offset(dx, dy));
        let target = map
            .tile(target_pos)
            .into_iter()
            .flat_map(|t| t.actors.iter().copied())
            .find(|&a| {
                self.actors[a]
                    .as_character()
                    .map(|c| c.is_monster())
                    .unwrap_or(false)
                    && self.actors.is_active(a)
            });
        match target {
            Some(monster) => combat::attack(self, player, monster),
            None => self.move_along(player, dx, dy),
        }
    }

    /// Use an item: consumables apply their effect and lose a charge,
    /// equipment toggles between equipped and unequipped.
    pub fn try_use_item(&mut self, item: ActorId, target: Option<EffectTarget>) -> GameResult<()> {
        let Some(player) = self.player else {
            return Ok(());
        };
        enum Use {
            Consumable { consumed: bool },
            Equipment { equipped: bool },
        }
        let use_kind = match &self.actors[item].kind {
            ActorKind::Item(data) => match &data.kind {
                ItemKind::Consumable { .. } => Use::Consumable {
                    consumed: data.is_consumed(),
                },
                ItemKind::Equipment { equipped } => Use::Equipment {
                    equipped: *equipped,
                },
            },
            _ => {
                return Err(GameError::UnusableItem(self.actors[item].name.clone()));
            }
        };
        match use_kind {
            Use::Consumable { consumed } => {
                if !consumed {
                    effects::apply(self, item, target)?;
                    if let Some(data) = self.actors[item].as_item_mut() {
                        data.stack_size = data.stack_size.saturating_sub(1);
                    }
                }
                let depleted = self.actors[item]
                    .as_item()
                    .map(|i| i.is_consumed())
                    .unwrap_or(false);
                if depleted {
                    self.remove_item(player, item);
                }
            }
            Use::Equipment { equipped } => {
                if equipped {
                    self.unequip_item(player, item);
                } else {
                    self.equip_item(player, item);
                }
            }
        }
        self.actors[player].action_taken = true;
        Ok(())
    }

    /// Drop an item on the player's tile. Equipped items refuse.
    pub fn try_drop_item(&mut self, item: ActorId) {
        let Some(player) = self.player else {
            return;
        };
        let character = self.actors[player].as_character();
        let equipped = character.map(|c| c.is_equipped(item)).unwrap_or(false);
        if equipped {
            self.journal
                .push(MessageKind::Game, "You can't drop an equipped item.");
            return;
        }
        let owned = self.actors[player]
            .as_character()
            .map(|c| c.inventory.contains(item))
            .unwrap_or(false);
        if !owned {
            return;
        }
        self.actors[player].action_taken = true;
        self.drop_item(player, item);
    }

    /// Follow the stairs up on the player's tile, if any.
    pub fn try_follow_portal_up(&mut self) {
        self.try_follow_portal('<');
    }

    /// Follow the stairs down on the player's tile, if any.
    pub fn try_follow_portal_down(&mut self) {
        self.try_follow_portal('>');
    }

    fn try_follow_portal(&mut self, glyph: char) {
        let Some(player) = self.player else {
            return;
        };
        let found = self.actor_on_player_tile(|a| a.as_portal().is_some() && a.glyph == glyph);
        let Some(portal) = found else {
            self.journal
                .push(MessageKind::Game, "There are no stairs here.");
            return;
        };
        self.actors[player].action_taken = true;
        self.follow_portal(portal);
    }

    /// Pick up the first item on the player's tile.
    pub fn try_pick_up(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let Some(item) = self.actor_on_player_tile(|a| a.is_item()) else {
            self.journal
                .push(MessageKind::Game, "There is nothing to pick up here.");
            return;
        };
        self.actors[player].action_taken = true;
        self.pick_up_item(player, item);
    }

    /// Interact with whatever shares the player's tile: items are
    /// picked up, containers hand an interaction back to the UI.
    pub fn try_interact(&mut self) -> Option<Interaction> {
        let player = self.player?;
        if let Some(item) = self.actor_on_player_tile(|a| a.is_item()) {
            self.actors[player].action_taken = true;
            self.pick_up_item(player, item);
            return None;
        }
        if let Some(container) = self.actor_on_player_tile(|a| a.as_container().is_some()) {
            self.actors[player].action_taken = true;
            return Some(Interaction::Container { container });
        }
        self.journal
            .push(MessageKind::Game, "There is nothing here to interact with.");
        None
    }

    fn actor_on_player_tile(&self, predicate: impl Fn(&Actor) -> bool) -> Option<ActorId> {
        let player = self.player?;
        let level = self.actors[player].level?;
        let pos = self.actors[player].tile?;
        self.levels[level.index()]
            .map
            .tile(pos)?
            .actors
            .iter()
            .copied()
            .find(|&id| id != player && predicate(&self.actors[id]))
    }

    // ------------------------------------------------------------------
    // Turn scheduler
    // ------------------------------------------------------------------

    /// Advance the game by one full turn if the player has acted.
    ///
    /// Runs every active character on the current level in registration
    /// order, refreshes the field of view, ticks the active effects and
    /// drops the expired ones. Returns whether a turn was played.
    pub fn try_to_play_turn(&mut self) -> bool {
        let Some(player) = self.player else {
            return false;
        };
        if !self.actors[player].action_taken {
            return false;
        }
        let Some(current) = self.current_level else {
            return false;
        };

        // characters act in level-registration order, nothing else
        let roster: Vec<ActorId> = self.levels[current.index()].characters().to_vec();
        for id in roster {
            if self.actors.is_active(id) {
                ai::take_turn(self, id);
                self.actors[id].action_taken = false;
            }
        }

        self.refresh_field_of_view();

        // tick in insertion order, then drop whatever has run out
        let mut effects = std::mem::take(&mut self.active_effects);
        for effect in effects.iter_mut() {
            effects::tick(self, effect);
        }
        effects.retain(|e| e.duration > 0);
        effects.append(&mut self.active_effects);
        self.active_effects = effects;

        self.actors[player].action_taken = false;
        true
    }

    /// Recompute tile visibility around the player and sync every
    /// actor's in-view flag.
    pub fn refresh_field_of_view(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let (Some(level), Some(pos)) = (self.actors[player].level, self.actors[player].tile)
        else {
            return;
        };
        self.levels[level.index()]
            .map
            .update_field_of_view(pos.x, pos.y);
        let map = &self.levels[level.index()].map;
        for index in 0..self.actors.len() {
            let id = ActorId(index as u32);
            let actor = self.actors.get(id);
            let in_view = actor.level == Some(level)
                && actor.tile.map(|t| map.is_visible(t)).unwrap_or(false);
            self.actors.get_mut(id).in_view = in_view;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::entities::character::Behavior;

    fn game() -> Game {
        Game::with_seed(GameData::default_content(), 1234)
    }

    fn arena(game: &mut Game) -> LevelId {
        game.add_level("Arena", 1, Map::new(30, 30))
    }

    fn wait(game: &mut Game) {
        game.try_move_or_attack(0, 0);
        assert!(game.try_to_play_turn());
    }

    #[test]
    fn turns_only_advance_after_a_player_action() {
        let mut game = game();
        let level = arena(&mut game);
        game.spawn_player(level, Position::new(5, 5)).unwrap();

        assert!(!game.try_to_play_turn());
        game.try_move_or_attack(1, 0);
        assert!(game.try_to_play_turn());
        // the pending flag was consumed
        assert!(!game.try_to_play_turn());
    }

    #[test]
    fn monsters_act_when_a_turn_plays() {
        let mut game = game();
        let level = arena(&mut game);
        game.spawn_player(level, Position::new(5, 5)).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(10, 5));

        wait(&mut game);
        // the rat stepped toward the player
        assert_eq!(game.actors()[rat].tile, Some(Position::new(9, 5)));
    }

    #[test]
    fn characters_act_in_registration_order() {
        let mut game = game();
        let level = arena(&mut game);
        game.spawn_player(level, Position::new(5, 5)).unwrap();
        let kobold = game.spawn_monster("kobold", &[]).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(kobold, level, Position::new(5, 6));
        game.place_actor(rat, level, Position::new(6, 5));

        wait(&mut game);
        let combat_messages: Vec<&str> = game
            .journal()
            .messages()
            .iter()
            .filter(|m| m.kind == MessageKind::Combat)
            .map(|m| m.text.as_str())
            .collect();
        assert!(combat_messages.len() >= 2);
        assert!(combat_messages[0].starts_with("Kobold"));
        assert!(combat_messages[1].starts_with("Rat"));
    }

    #[test]
    fn expired_effects_are_removed_exactly_once() {
        let mut game = game();
        let level = arena(&mut game);
        let player = game.spawn_player(level, Position::new(5, 5)).unwrap();
        let potion = game.spawn_item("healingpotion", &[]).unwrap();
        game.give_item(player, potion);

        game.actors_mut().set_hit_points(player, 10);
        game.try_use_item(potion, None).unwrap();
        // applied and ticked once; registered with its remaining duration
        assert_eq!(game.active_effects().len(), 1);
        assert_eq!(game.active_effects()[0].duration, 0);

        assert!(game.try_to_play_turn());
        assert!(game.active_effects().is_empty());
    }

    #[test]
    fn confusion_runs_its_course_through_the_scheduler() {
        let mut game = game();
        let level = arena(&mut game);
        let player = game.spawn_player(level, Position::new(5, 5)).unwrap();
        let rat = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(rat, level, Position::new(20, 20));
        let scroll = game.spawn_item("confusescroll", &[]).unwrap();
        game.give_item(player, scroll);

        game.try_use_item(scroll, Some(EffectTarget::Actor(rat)))
            .unwrap();
        let turns = match &game.actors()[rat].as_character().unwrap().behavior {
            Behavior::Confused { remaining, .. } => *remaining,
            other => panic!("expected confusion, got {:?}", other),
        };
        assert_eq!(turns, 5);

        for _ in 0..turns {
            assert!(game.try_to_play_turn());
            game.try_move_or_attack(0, 0);
        }
        assert_eq!(
            game.actors()[rat].as_character().unwrap().behavior,
            Behavior::Normal
        );
        assert!(game.active_effects().is_empty());
    }

    #[test]
    fn portals_link_symmetrically_and_move_the_player() {
        let mut game = game();
        let town = game.add_level("Town", 1, Map::new(20, 20));
        let dungeon = game.add_level("Dungeon level 1", 1, Map::new(20, 20));
        let down = game.spawn_portal(
            town,
            Position::new(3, 3),
            '>',
            "stairs leading down into darkness",
            "You follow the stairs down, looking for more adventure.",
        );
        let up = game.spawn_portal(
            dungeon,
            Position::new(7, 7),
            '<',
            "stairs leading up",
            "You follow the stairs up, hoping to find the exit.",
        );
        game.connect_portals(down, up);

        // each end points back at the other
        assert_eq!(game.actors()[down].as_portal().unwrap().destination, Some(up));
        assert_eq!(game.actors()[up].as_portal().unwrap().destination, Some(down));

        let player = game.spawn_player(town, Position::new(3, 3)).unwrap();
        assert_eq!(game.current_level(), Some(town));
        game.try_follow_portal_down();
        assert_eq!(game.current_level(), Some(dungeon));
        assert_eq!(game.actors()[player].level, Some(dungeon));
        assert_eq!(game.actors()[player].tile, Some(Position::new(7, 7)));

        game.try_follow_portal_up();
        assert_eq!(game.current_level(), Some(town));
        assert_eq!(game.actors()[player].tile, Some(Position::new(3, 3)));
    }

    #[test]
    fn following_absent_stairs_only_journals() {
        let mut game = game();
        let level = arena(&mut game);
        let player = game.spawn_player(level, Position::new(5, 5)).unwrap();
        game.actors_mut()[player].action_taken = false;

        game.try_follow_portal_down();
        assert!(!game.actors()[player].action_taken);
        assert!(game
            .journal()
            .messages()
            .iter()
            .any(|m| m.text.contains("no stairs")));
    }

    #[test]
    fn items_can_be_picked_up_and_dropped() {
        let mut game = game();
        let level = arena(&mut game);
        let player = game.spawn_player(level, Position::new(5, 5)).unwrap();
        let dagger = game.spawn_item("dagger", &[]).unwrap();
        game.place_actor(dagger, level, Position::new(5, 5));

        game.try_pick_up();
        assert!(game.actors()[player]
            .as_character()
            .unwrap()
            .inventory
            .contains(dagger));
        assert_eq!(game.actors()[dagger].as_item().unwrap().owner, Some(player));
        assert!(game.actors()[dagger].tile.is_none());

        game.try_drop_item(dagger);
        assert!(!game.actors()[player]
            .as_character()
            .unwrap()
            .inventory
            .contains(dagger));
        assert_eq!(game.actors()[dagger].tile, Some(Position::new(5, 5)));
        assert_eq!(game.actors()[dagger].as_item().unwrap().owner, None);
    }

    #[test]
    fn used_up_consumables_leave_the_inventory() {
        let mut game = game();
        let level = arena(&mut game);
        let player = game.spawn_player(level, Position::new(5, 5)).unwrap();
        let potion = game.spawn_item("healingpotion", &[]).unwrap();
        game.give_item(player, potion);

        game.try_use_item(potion, None).unwrap();
        assert!(game.actors()[potion].as_item().unwrap().is_consumed());
        assert!(game.actors()[player]
            .as_character()
            .unwrap()
            .inventory
            .is_empty());
    }

    #[test]
    fn equipment_toggles_through_use() {
        let mut game = game();
        let level = arena(&mut game);
        let player = game.spawn_player(level, Position::new(5, 5)).unwrap();
        let dagger = game.spawn_item("dagger", &[]).unwrap();
        game.give_item(player, dagger);

        let bare = game.actors().derived_stats(player);
        game.try_use_item(dagger, None).unwrap();
        assert!(game.actors()[player].as_character().unwrap().is_equipped(dagger));
        let armed = game.actors().derived_stats(player);
        assert_eq!(armed.damage, bare.damage + 2);

        game.try_use_item(dagger, None).unwrap();
        assert!(!game.actors()[player].as_character().unwrap().is_equipped(dagger));
        assert_eq!(game.actors().derived_stats(player).damage, bare.damage);
    }

    #[test]
    fn equipping_requires_ownership() {
        let mut game = game();
        let level = arena(&mut game);
        let player = game.spawn_player(level, Position::new(5, 5)).unwrap();
        let dagger = game.spawn_item("dagger", &[]).unwrap();

        // not in the inventory: a silent no-op
        game.equip_item(player, dagger);
        assert!(game.actors()[player].as_character().unwrap().equipped.is_empty());
    }

    #[test]
    fn equipped_items_refuse_to_drop() {
        let mut game = game();
        let level = arena(&mut game);
        let player = game.spawn_player(level, Position::new(5, 5)).unwrap();
        let dagger = game.spawn_item("dagger", &[]).unwrap();
        game.give_item(player, dagger);
        game.equip_item(player, dagger);

        game.try_drop_item(dagger);
        assert!(game.actors()[player]
            .as_character()
            .unwrap()
            .inventory
            .contains(dagger));
        assert!(game
            .journal()
            .messages()
            .iter()
            .any(|m| m.text.contains("can't drop")));
    }

    #[test]
    fn monster_modifiers_raise_stats_and_rating() {
        let mut game = game();
        let plain = game.spawn_monster("rat", &[]).unwrap();
        let dire = game.spawn_monster("rat", &["dire"]).unwrap();

        let plain_monster = game.actors()[plain].as_character().unwrap();
        let dire_monster = game.actors()[dire].as_character().unwrap();
        assert_eq!(
            dire_monster.as_monster().unwrap().challenge_rating(),
            plain_monster.as_monster().unwrap().challenge_rating() + 1
        );
        assert_eq!(
            game.actors().derived_stats(dire).damage,
            game.actors().derived_stats(plain).damage + 2
        );
        assert!(game.actors()[dire].name.starts_with("Dire"));
    }

    #[test]
    fn modifier_scopes_are_enforced() {
        let mut game = game();
        assert!(matches!(
            game.spawn_monster("rat", &["sturdy"]),
            Err(GameError::ModifierMismatch { .. })
        ));
        assert!(matches!(
            game.spawn_item("dagger", &["dire"]),
            Err(GameError::ModifierMismatch { .. })
        ));
        assert!(matches!(
            game.spawn_item("healingpotion", &["sturdy"]),
            Err(GameError::ModifierMismatch { .. })
        ));
        // the right scope passes
        assert!(game.spawn_item("dagger", &["sturdy"]).is_ok());
    }

    #[test]
    fn unique_monsters_spawn_once_per_game() {
        let mut game = game();
        assert!(game.spawn_monster("kingkobold", &[]).is_ok());
        assert!(matches!(
            game.spawn_monster("kingkobold", &[]),
            Err(GameError::UniqueExhausted(_))
        ));
    }

    #[test]
    fn random_monsters_stay_under_the_rating_cap() {
        let mut game = game();
        for _ in 0..20 {
            let id = game.spawn_random_monster(2).unwrap();
            let rating = game.actors()[id]
                .as_character()
                .unwrap()
                .as_monster()
                .unwrap()
                .challenge_rating();
            assert!(rating <= 2);
        }
    }

    #[test]
    fn using_a_non_item_is_an_error() {
        let mut game = game();
        let level = arena(&mut game);
        game.spawn_player(level, Position::new(5, 5)).unwrap();
        let portal = game.spawn_portal(level, Position::new(8, 8), '>', "stairs", "down");

        assert!(matches!(
            game.try_use_item(portal, None),
            Err(GameError::UnusableItem(_))
        ));
    }

    #[test]
    fn hit_points_stay_in_range_through_a_brawl() {
        let mut game = game();
        let level = arena(&mut game);
        let player = game.spawn_player(level, Position::new(5, 5)).unwrap();
        let kobold = game.spawn_monster("kobold", &[]).unwrap();
        let zombie = game.spawn_monster("zombie", &[]).unwrap();
        game.place_actor(kobold, level, Position::new(6, 5));
        game.place_actor(zombie, level, Position::new(5, 6));

        for _ in 0..20 {
            game.try_move_or_attack(1, 0);
            game.try_to_play_turn();
            for id in [player, kobold, zombie] {
                let hp = game.actors().hit_points(id);
                assert!(hp >= 0);
                assert!(hp <= game.actors().max_hit_points(id));
            }
        }
    }

    #[test]
    fn containers_hand_back_an_interaction() {
        let mut game = game();
        let level = arena(&mut game);
        game.spawn_player(level, Position::new(5, 5)).unwrap();
        let chest = game.spawn_container(level, Position::new(5, 5), "old chest");

        let interaction = game.try_interact();
        assert_eq!(interaction, Some(Interaction::Container { container: chest }));
    }

    #[test]
    fn field_of_view_marks_nearby_actors() {
        let mut game = game();
        let level = arena(&mut game);
        game.spawn_player(level, Position::new(5, 5)).unwrap();
        let near = game.spawn_monster("rat", &[]).unwrap();
        let far = game.spawn_monster("rat", &[]).unwrap();
        game.place_actor(near, level, Position::new(7, 5));
        game.place_actor(far, level, Position::new(28, 28));

        wait(&mut game);
        assert!(game.actors()[near].in_view);
        assert!(!game.actors()[far].in_view);
    }
}
