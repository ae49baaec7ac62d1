//! Journal
//!
//! The game-owned event sink: the player-facing message log and the
//! effect visualization queue. The core only appends; readers decide
//! when to drain.

use crate::effects::{Effect, EffectKind, Element};
use crate::world::{LevelId, Position};

/// Categories for message filtering and coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Player-facing gameplay events.
    Game,
    /// Detailed combat math.
    Combat,
    /// AI decisions, mostly for debugging displays.
    Ai,
    /// Content and level generation notes.
    Generation,
}

/// One entry of the message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// A snapshot of an effect application for the renderer: what kind of
/// effect hit which tiles.
#[derive(Debug, Clone)]
pub struct EffectEvent {
    pub kind: EffectKind,
    pub element: Element,
    pub level: Option<LevelId>,
    pub tiles: Vec<Position>,
}

/// Append-only sink owned by the `Game`.
#[derive(Debug, Default)]
pub struct Journal {
    messages: Vec<Message>,
    effect_events: Vec<EffectEvent>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.messages.push(Message {
            kind,
            text: text.into(),
        });
    }

    /// The whole ordered message log. The core never clears it.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages from `start` onward, for readers that remember how far
    /// they got.
    pub fn messages_since(&self, start: usize) -> &[Message] {
        &self.messages[start.min(self.messages.len())..]
    }

    pub(crate) fn publish_effect(&mut self, effect: &Effect) {
        self.effect_events.push(EffectEvent {
            kind: effect.kind,
            element: effect.element,
            level: effect.level,
            tiles: effect.tiles.clone(),
        });
    }

    /// Pending visualization entries, in application order.
    pub fn effect_events(&self) -> &[EffectEvent] {
        &self.effect_events
    }

    /// Hand the pending visualization entries to the renderer and clear
    /// the queue. Meant to be called once per frame by the UI.
    pub fn drain_effect_events(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.effect_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_accumulate_in_order() {
        let mut journal = Journal::new();
        journal.push(MessageKind::Game, "first");
        journal.push(MessageKind::Combat, "second");
        assert_eq!(journal.messages().len(), 2);
        assert_eq!(journal.messages()[0].text, "first");
        assert_eq!(journal.messages_since(1)[0].text, "second");
    }

    #[test]
    fn draining_effect_events_empties_the_queue() {
        use crate::combat::HitDie;
        use crate::effects::TargetType;
        use crate::entities::ActorId;

        let mut journal = Journal::new();
        let effect = Effect {
            source: ActorId(0),
            owner: None,
            kind: EffectKind::Heal,
            target_type: TargetType::SelfCast,
            duration: 1,
            radius: 0,
            magnitude: HitDie::new(1, 8),
            element: Element::Life,
            level: None,
            tiles: Vec::new(),
            actors: Vec::new(),
        };
        journal.publish_effect(&effect);
        assert_eq!(journal.effect_events().len(), 1);
        let drained = journal.drain_effect_events();
        assert_eq!(drained.len(), 1);
        assert!(journal.effect_events().is_empty());
    }
}
