//! Default content
//!
//! Hardcoded fallback templates used when no data files are present.

use crate::combat::HitDie;
use crate::data::templates::{
    EffectTemplate, ItemClass, ItemTemplate, ModifierPosition, ModifierScope, ModifierTemplate,
    MonsterTemplate,
};
use crate::effects::Element;
use crate::entities::stats::StatBlock;

/// Create the default monster bestiary.
pub fn default_monster_templates() -> Vec<MonsterTemplate> {
    vec![
        MonsterTemplate {
            key: "rat".into(),
            glyph: 'r',
            name: "rat".into(),
            flavor: "A mangy rat scurries out of the shadows.".into(),
            killed_by: String::new(),
            hit_die: HitDie::new(1, 2),
            stats: StatBlock::new(8, 12, 2, 0, 2, 1),
            xp: 5,
            unique: false,
            challenge_rating: 1,
            color: (139, 105, 20),
            ai: "basic".into(),
        },
        MonsterTemplate {
            key: "kobold".into(),
            glyph: 'k',
            name: "kobold".into(),
            flavor: "A kobold hisses and raises its crude spear.".into(),
            killed_by: "The kobold dances around your remains.".into(),
            hit_die: HitDie::new(1, 4),
            stats: StatBlock::new(10, 10, 4, 1, 3, 2),
            xp: 10,
            unique: false,
            challenge_rating: 1,
            color: (65, 125, 45),
            ai: "basic".into(),
        },
        MonsterTemplate {
            key: "giantbat".into(),
            glyph: 'b',
            name: "giant bat".into(),
            flavor: "Leathery wings flap somewhere above you.".into(),
            killed_by: String::new(),
            hit_die: HitDie::new(1, 4),
            stats: StatBlock::new(12, 18, 3, 0, 3, 1),
            xp: 15,
            unique: false,
            challenge_rating: 2,
            color: (95, 75, 50),
            ai: "basic".into(),
        },
        MonsterTemplate {
            key: "zombie".into(),
            glyph: 'z',
            name: "zombie".into(),
            flavor: "A shambling corpse drags itself toward you.".into(),
            killed_by: "The zombie gnaws on your remains.".into(),
            hit_die: HitDie::new(2, 6),
            stats: StatBlock::new(8, 4, 6, 2, 6, 1),
            xp: 25,
            unique: false,
            challenge_rating: 2,
            color: (110, 140, 80),
            ai: "basic".into(),
        },
        MonsterTemplate {
            key: "troll".into(),
            glyph: 'T',
            name: "troll".into(),
            flavor: "A reek of wet stone announces a hulking troll.".into(),
            killed_by: "The troll munches happily on your remains.".into(),
            hit_die: HitDie::new(3, 8),
            stats: StatBlock::new(12, 6, 10, 4, 10, 2),
            xp: 80,
            unique: false,
            challenge_rating: 4,
            color: (95, 135, 95),
            ai: "basic".into(),
        },
        MonsterTemplate {
            key: "kingkobold".into(),
            glyph: 'K',
            name: "kobold king".into(),
            flavor: "The kobold king glares at you from under a tin crown.".into(),
            killed_by: "The kobold king claims your gear as tribute.".into(),
            hit_die: HitDie::new(2, 8),
            stats: StatBlock::new(14, 12, 7, 3, 6, 4),
            xp: 60,
            unique: true,
            challenge_rating: 3,
            color: (210, 170, 40),
            ai: "basic".into(),
        },
    ]
}

/// Create the default item templates.
pub fn default_item_templates() -> Vec<ItemTemplate> {
    vec![
        // === Equipment ===
        ItemTemplate {
            key: "dagger".into(),
            glyph: '/',
            name: "dagger".into(),
            class: ItemClass::Equipment,
            item_level: 1,
            bonuses: StatBlock::new(1, 0, 2, 0, 0, 0),
            effect: None,
        },
        ItemTemplate {
            key: "shortsword".into(),
            glyph: '/',
            name: "shortsword".into(),
            class: ItemClass::Equipment,
            item_level: 2,
            bonuses: StatBlock::new(0, 0, 4, 0, 0, 0),
            effect: None,
        },
        ItemTemplate {
            key: "cloak".into(),
            glyph: '[',
            name: "cloak".into(),
            class: ItemClass::Equipment,
            item_level: 1,
            bonuses: StatBlock::new(0, 2, 0, 1, 0, 0),
            effect: None,
        },
        ItemTemplate {
            key: "leatherarmor".into(),
            glyph: '[',
            name: "leather armor".into(),
            class: ItemClass::Equipment,
            item_level: 2,
            bonuses: StatBlock::new(0, 0, 0, 3, 0, 0),
            effect: None,
        },
        // === Consumables ===
        ItemTemplate {
            key: "healingvial".into(),
            glyph: '!',
            name: "healing vial".into(),
            class: ItemClass::Consumable,
            item_level: 1,
            bonuses: StatBlock::default(),
            effect: Some(EffectTemplate {
                effect: "heal".into(),
                targeted: false,
                radius: 0,
                hit_die: HitDie::new(1, 4),
                duration: 1,
                element: Element::Life,
            }),
        },
        ItemTemplate {
            key: "healingpotion".into(),
            glyph: '!',
            name: "healing potion".into(),
            class: ItemClass::Consumable,
            item_level: 2,
            bonuses: StatBlock::default(),
            effect: Some(EffectTemplate {
                effect: "heal".into(),
                targeted: false,
                radius: 0,
                hit_die: HitDie::new(2, 8),
                duration: 1,
                element: Element::Life,
            }),
        },
        ItemTemplate {
            key: "steadyvial".into(),
            glyph: '!',
            name: "vial of steady mending".into(),
            class: ItemClass::Consumable,
            item_level: 2,
            bonuses: StatBlock::default(),
            effect: Some(EffectTemplate {
                effect: "heal".into(),
                targeted: false,
                radius: 0,
                // d1 dice: a fixed, reliable amount every tick
                hit_die: HitDie::new(10, 1),
                duration: 1,
                element: Element::Life,
            }),
        },
        ItemTemplate {
            key: "fireball".into(),
            glyph: '?',
            name: "scroll of fireball".into(),
            class: ItemClass::Consumable,
            item_level: 2,
            bonuses: StatBlock::default(),
            effect: Some(EffectTemplate {
                effect: "damage".into(),
                targeted: true,
                radius: 3,
                hit_die: HitDie::new(3, 6),
                duration: 1,
                element: Element::Fire,
            }),
        },
        ItemTemplate {
            key: "firenova".into(),
            glyph: '?',
            name: "scroll of fire nova".into(),
            class: ItemClass::Consumable,
            item_level: 3,
            bonuses: StatBlock::default(),
            effect: Some(EffectTemplate {
                effect: "damage".into(),
                targeted: false,
                radius: 4,
                hit_die: HitDie::new(2, 6),
                duration: 1,
                element: Element::Fire,
            }),
        },
        ItemTemplate {
            key: "lightning".into(),
            glyph: '?',
            name: "scroll of lightning".into(),
            class: ItemClass::Consumable,
            item_level: 3,
            bonuses: StatBlock::default(),
            effect: Some(EffectTemplate {
                effect: "damage".into(),
                targeted: true,
                radius: 1,
                hit_die: HitDie::new(4, 6),
                duration: 1,
                element: Element::Lightning,
            }),
        },
        ItemTemplate {
            key: "tremor".into(),
            glyph: '?',
            name: "scroll of tremor".into(),
            class: ItemClass::Consumable,
            item_level: 3,
            bonuses: StatBlock::default(),
            effect: Some(EffectTemplate {
                effect: "damage".into(),
                targeted: false,
                radius: 6,
                hit_die: HitDie::new(2, 8),
                duration: 2,
                element: Element::Earth,
            }),
        },
        ItemTemplate {
            key: "confusescroll".into(),
            glyph: '?',
            name: "scroll of confusion".into(),
            class: ItemClass::Consumable,
            item_level: 2,
            bonuses: StatBlock::default(),
            effect: Some(EffectTemplate {
                effect: "confuse".into(),
                targeted: true,
                radius: 0,
                hit_die: HitDie::new(1, 4),
                duration: 5,
                element: Element::Mind,
            }),
        },
    ]
}

/// Create the default modifier templates.
pub fn default_modifier_templates() -> Vec<ModifierTemplate> {
    vec![
        // === Consumable modifiers ===
        ModifierTemplate {
            key: "double".into(),
            name: "double".into(),
            position: ModifierPosition::Prefix,
            scope: ModifierScope::Consumable,
            level: 1,
            stats: StatBlock::default(),
            effect_radius: 0,
            extra_dice: 1,
            effect_duration: 0,
            effect_element: None,
        },
        ModifierTemplate {
            key: "exquisite".into(),
            name: "exquisite".into(),
            position: ModifierPosition::Prefix,
            scope: ModifierScope::Consumable,
            level: 2,
            stats: StatBlock::default(),
            effect_radius: 1,
            extra_dice: 1,
            effect_duration: 1,
            effect_element: None,
        },
        // === Equipment modifiers ===
        ModifierTemplate {
            key: "sturdy".into(),
            name: "sturdy".into(),
            position: ModifierPosition::Prefix,
            scope: ModifierScope::Equipment,
            level: 1,
            stats: StatBlock::new(0, 0, 0, 1, 0, 0),
            effect_radius: 0,
            extra_dice: 0,
            effect_duration: 0,
            effect_element: None,
        },
        ModifierTemplate {
            key: "fine".into(),
            name: "fine".into(),
            position: ModifierPosition::Prefix,
            scope: ModifierScope::Equipment,
            level: 1,
            stats: StatBlock::new(2, 0, 0, 0, 0, 0),
            effect_radius: 0,
            extra_dice: 0,
            effect_duration: 0,
            effect_element: None,
        },
        ModifierTemplate {
            key: "ofthebear".into(),
            name: "of the bear".into(),
            position: ModifierPosition::Suffix,
            scope: ModifierScope::Equipment,
            level: 2,
            stats: StatBlock::new(0, 0, 0, 0, 2, 0),
            effect_radius: 0,
            extra_dice: 0,
            effect_duration: 0,
            effect_element: None,
        },
        // === Monster modifiers ===
        ModifierTemplate {
            key: "dire".into(),
            name: "dire".into(),
            position: ModifierPosition::Prefix,
            scope: ModifierScope::Monster,
            level: 1,
            stats: StatBlock::new(2, 0, 2, 0, 2, 0),
            effect_radius: 0,
            extra_dice: 0,
            effect_duration: 0,
            effect_element: None,
        },
        ModifierTemplate {
            key: "spectral".into(),
            name: "spectral".into(),
            position: ModifierPosition::Prefix,
            scope: ModifierScope::Monster,
            level: 2,
            stats: StatBlock::new(0, 10, 0, 2, -1, 2),
            effect_radius: 0,
            extra_dice: 0,
            effect_duration: 0,
            effect_element: None,
        },
    ]
}
