//! Primitive effect events.
//!
//! The vocabulary of the effect interpreter. Each variant carries only
//! the fields it needs; all state mutation happens in the engine's
//! handlers, never at construction time.

use serde::Serialize;

use crate::cards::Uid;
use crate::core::PlayerId;

/// One primitive state mutation awaiting resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum EffectEvent {
    /// Adjust a player's action points, clamped at zero from below.
    /// No upper cap applies at resolution time.
    AddAp { player: PlayerId, amount: i32 },

    /// Draw up to `count` cards from the player's deck.
    DrawCards { player: PlayerId, count: usize },

    /// Uniformly discard up to `count` cards from the player's hand.
    DiscardRandomFromHand { player: PlayerId, count: usize },

    /// Deactivate up to `count` random active cards in the player's
    /// hand, in place.
    DeactivateRandomHand { player: PlayerId, count: usize },

    /// Buff (positive) or weaken (negative) the player's strongest
    /// foreign-lane unit. `mirrored` marks a reflection so mirrors
    /// never cascade.
    BuffStrongest {
        player: PlayerId,
        amount: i32,
        mirrored: bool,
    },

    /// Add a one-time deactivation shield to a card. Idempotent.
    GrantShield { target: Uid },

    /// Deactivate a specific lane card, wherever it sits.
    DeactivateCard { target: Uid },

    /// Composite: apply the player's initiative auras.
    InitiativeActivated { player: PlayerId },

    /// Append a message to the match log verbatim.
    Log { message: String },
}

impl EffectEvent {
    /// A log event.
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
        }
    }

    /// An un-mirrored buff on the player's strongest unit.
    #[must_use]
    pub fn buff(player: PlayerId, amount: i32) -> Self {
        Self::BuffStrongest {
            player,
            amount,
            mirrored: false,
        }
    }

    /// A draw of `count` cards.
    #[must_use]
    pub fn draw(player: PlayerId, count: usize) -> Self {
        Self::DrawCards { player, count }
    }

    /// An action-point adjustment.
    #[must_use]
    pub fn add_ap(player: PlayerId, amount: i32) -> Self {
        Self::AddAp { player, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            EffectEvent::buff(PlayerId::ONE, 2),
            EffectEvent::BuffStrongest {
                player: PlayerId::ONE,
                amount: 2,
                mirrored: false,
            }
        );
        assert_eq!(
            EffectEvent::log("hello"),
            EffectEvent::Log {
                message: "hello".to_string(),
            }
        );
    }

    #[test]
    fn test_serialization() {
        let event = EffectEvent::add_ap(PlayerId::TWO, -1);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("AddAp"));
    }
}
