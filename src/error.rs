//! Game errors
//!
//! One domain error type for content and programmer errors. Ordinary
//! gameplay non-events (a miss, nothing to pick up) are not errors;
//! they only produce journal messages.

use thiserror::Error;

/// Fatal-for-the-call errors raised by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A template, modifier, AI strategy or effect key that no catalog knows.
    #[error("unknown content key: {0}")]
    UnknownKey(String),

    /// A unique monster template was instantiated a second time.
    #[error("unique monster {0} already exists")]
    UniqueExhausted(String),

    /// The rating-bucket probe hit the floor with nothing available.
    #[error("no content available at or below rating {0}")]
    NothingAtRating(i32),

    /// An effect was applied to a target its target type does not allow.
    #[error("cannot apply {effect} effect to {target}")]
    InvalidTarget { effect: String, target: String },

    /// A modifier was attached to a template of the wrong type.
    #[error("modifier {modifier} does not apply to {base}")]
    ModifierMismatch { modifier: String, base: String },

    /// An item was used but no use-case implementation matches it.
    #[error("missing implementation to use {0}")]
    UnusableItem(String),

    /// A rule of the simulation was broken by the caller.
    #[error("{0}")]
    Rule(String),
}

/// Convenience alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;
