//! Items
//!
//! The item payload of an actor: equipment with stat bonuses, and
//! consumables carrying effect parameters. Names are composed from the
//! base template name plus prefix/suffix modifier decoration.

use crate::combat::HitDie;
use crate::effects::{EffectKind, Element, TargetType};
use crate::entities::actor::ActorId;
use crate::entities::stats::StatBlock;

/// A name-and-level decoration attached to an item at creation; the
/// numeric deltas are folded into the item when it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemModifier {
    pub key: String,
    pub name: String,
    pub prefix: bool,
    pub level: i32,
}

/// Effect parameters carried by a consumable, resolved from its
/// template when the item is created.
#[derive(Debug, Clone)]
pub struct EffectSpec {
    pub kind: EffectKind,
    /// Targeted consumables ask the caller for a tile or actor;
    /// untargeted ones center on their owner.
    pub targeted: bool,
    pub radius: i32,
    pub magnitude: HitDie,
    /// Number of turns the effect stays registered.
    pub duration: u32,
    pub element: Element,
}

impl EffectSpec {
    pub fn target_type(&self) -> TargetType {
        self.kind.target_type(self.targeted)
    }
}

/// What kind of item this is.
#[derive(Debug, Clone)]
pub enum ItemKind {
    Equipment { equipped: bool },
    Consumable { effect: EffectSpec },
}

/// The item payload of an actor.
#[derive(Debug, Clone)]
pub struct ItemData {
    /// Key of the base template.
    pub template: String,
    /// Level of the item: base level plus modifier levels.
    pub item_level: i32,
    /// Stat bonuses granted while equipped.
    pub bonuses: StatBlock,
    pub modifiers: Vec<ItemModifier>,
    /// Character or container holding this item. A back-reference only;
    /// ownership lives in the holder's inventory list.
    pub owner: Option<ActorId>,
    /// Number of uses left in the stack; 0 means consumed.
    pub stack_size: u32,
    pub kind: ItemKind,
}

impl ItemData {
    /// Consumables stack; equipment does not.
    pub fn stackable(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable { .. })
    }

    pub fn is_equipped(&self) -> bool {
        matches!(self.kind, ItemKind::Equipment { equipped: true })
    }

    pub fn is_consumed(&self) -> bool {
        self.stack_size == 0
    }

    pub fn effect(&self) -> Option<&EffectSpec> {
        match &self.kind {
            ItemKind::Consumable { effect } => Some(effect),
            ItemKind::Equipment { .. } => None,
        }
    }

    /// Modifier keys in sorted order, the identity used for stack
    /// merging. Sorting makes the comparison order-independent.
    pub fn modifier_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.modifiers.iter().map(|m| m.key.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    /// Two items stack when they share a base template and an identical
    /// modifier set.
    pub fn same_stack(&self, other: &ItemData) -> bool {
        self.template == other.template && self.modifier_keys() == other.modifier_keys()
    }
}

/// Compose a display name from a base name and modifier decorations:
/// prefixes in front, suffixes behind, first letter capitalized.
/// `parts` yields `(fragment, is_prefix)` pairs.
pub fn compose_name<'a>(base: &str, parts: impl IntoIterator<Item = (&'a str, bool)>) -> String {
    let mut name = base.to_string();
    for (fragment, is_prefix) in parts {
        if is_prefix {
            name = format!("{} {}", fragment, name);
        } else {
            name = format!("{} {}", name, fragment);
        }
    }
    capitalize(&name.to_lowercase())
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifier(key: &str, prefix: bool) -> ItemModifier {
        ItemModifier {
            key: key.into(),
            name: key.into(),
            prefix,
            level: 1,
        }
    }

    fn potion(modifiers: Vec<ItemModifier>) -> ItemData {
        ItemData {
            template: "healingpotion".into(),
            item_level: 1,
            bonuses: StatBlock::default(),
            modifiers,
            owner: None,
            stack_size: 1,
            kind: ItemKind::Consumable {
                effect: EffectSpec {
                    kind: EffectKind::Heal,
                    targeted: false,
                    radius: 0,
                    magnitude: HitDie::new(1, 8),
                    duration: 1,
                    element: Element::Life,
                },
            },
        }
    }

    #[test]
    fn names_fold_prefixes_and_suffixes() {
        let mods = vec![modifier("exquisite", true), modifier("of warding", false)];
        assert_eq!(
            compose_name(
                "healing potion",
                mods.iter().map(|m| (m.name.as_str(), m.prefix))
            ),
            "Exquisite healing potion of warding"
        );
    }

    #[test]
    fn stack_identity_ignores_modifier_order() {
        let a = potion(vec![modifier("double", true), modifier("exquisite", true)]);
        let b = potion(vec![modifier("exquisite", true), modifier("double", true)]);
        assert!(a.same_stack(&b));

        let c = potion(vec![modifier("double", true)]);
        assert!(!a.same_stack(&c));
    }
}
