//! Combat system
//!
//! Dice, attack resolution and damage application.

pub mod damage;
pub mod dice;

pub use damage::{attack, resolve_attack, take_damage, take_heal, AttackResult};
pub use dice::HitDie;
