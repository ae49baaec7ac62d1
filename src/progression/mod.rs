//! Progression
//!
//! Experience and player leveling.

pub mod xp;

pub use xp::{xp_for_next_level, Experience, XP_BASE};
