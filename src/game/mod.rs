//! Game state machine
//!
//! The `Game` root object, the turn scheduler and the journal.

pub mod journal;
pub mod state;

pub use journal::{EffectEvent, Journal, Message, MessageKind};
pub use state::{Game, GameState, Interaction};
