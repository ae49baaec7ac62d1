//! Inventory system
//!
//! An id-based item container. Stackable items merge into an existing
//! stack when their base template and modifier sets match.

use crate::entities::actor::{ActorId, Actors};

/// An ordered collection of item actors owned by a character or
/// container.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<ActorId>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ActorId] {
        &self.items
    }

    pub fn contains(&self, item: ActorId) -> bool {
        self.items.contains(&item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn push(&mut self, item: ActorId) {
        self.items.push(item);
    }

    /// Exact-id removal. Returns whether the item was present. Equipped
    /// items must be unequipped by the caller first.
    pub(crate) fn remove(&mut self, item: ActorId) -> bool {
        if let Some(index) = self.items.iter().position(|&i| i == item) {
            self.items.remove(index);
            true
        } else {
            false
        }
    }
}

/// Find an existing stack in `inventory` that `item` would merge into:
/// same base template, same (order-independent) modifier key set.
pub fn find_stack(actors: &Actors, inventory: &Inventory, item: ActorId) -> Option<ActorId> {
    let incoming = actors.get(item).as_item()?;
    if !incoming.stackable() {
        return None;
    }
    inventory
        .items()
        .iter()
        .copied()
        .filter(|&other| other != item)
        .find(|&other| {
            actors
                .get(other)
                .as_item()
                .map(|existing| existing.same_stack(incoming))
                .unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use crate::game::Game;
    use crate::items::ItemKind;

    fn game() -> Game {
        Game::with_seed(GameData::default_content(), 1)
    }

    #[test]
    fn stackables_merge_into_one_entry() {
        let mut game = game();
        let player = game.spawn_npc("Tess");
        let a = game.spawn_item("healingpotion", &[]).unwrap();
        let b = game.spawn_item("healingpotion", &[]).unwrap();

        game.give_item(player, a);
        game.give_item(player, b);

        let inventory = &game.actors()[player].as_character().unwrap().inventory;
        assert_eq!(inventory.len(), 1);
        assert_eq!(game.actors()[a].as_item().unwrap().stack_size, 2);
    }

    #[test]
    fn stack_merge_is_modifier_order_independent() {
        let mut game = game();
        let player = game.spawn_npc("Tess");
        let a = game.spawn_item("healingvial", &["double", "exquisite"]).unwrap();
        let b = game.spawn_item("healingvial", &["exquisite", "double"]).unwrap();

        game.give_item(player, a);
        game.give_item(player, b);

        let inventory = &game.actors()[player].as_character().unwrap().inventory;
        assert_eq!(inventory.len(), 1, "differently ordered modifiers must merge");
        assert_eq!(game.actors()[a].as_item().unwrap().stack_size, 2);
    }

    #[test]
    fn different_modifier_sets_do_not_merge() {
        let mut game = game();
        let player = game.spawn_npc("Tess");
        let a = game.spawn_item("healingvial", &["double"]).unwrap();
        let b = game.spawn_item("healingvial", &["exquisite"]).unwrap();

        game.give_item(player, a);
        game.give_item(player, b);

        let inventory = &game.actors()[player].as_character().unwrap().inventory;
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn equipment_never_stacks() {
        let mut game = game();
        let player = game.spawn_npc("Tess");
        let a = game.spawn_item("cloak", &[]).unwrap();
        let b = game.spawn_item("cloak", &[]).unwrap();
        assert!(matches!(
            game.actors()[a].as_item().unwrap().kind,
            ItemKind::Equipment { .. }
        ));

        game.give_item(player, a);
        game.give_item(player, b);

        let inventory = &game.actors()[player].as_character().unwrap().inventory;
        assert_eq!(inventory.len(), 2);
    }
}
