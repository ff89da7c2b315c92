//! The rejection taxonomy.
//!
//! Illegal operations are rejected, logged, and leave the aggregate
//! unchanged — nothing in this engine panics during normal play, because
//! card text can legitimately describe an effect with no valid target.

use thiserror::Error;

use crate::cards::Lane;
use crate::core::PlayerId;

/// Why an operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("the match has not started")]
    MatchNotStarted,

    #[error("the match is already over")]
    MatchIsOver,

    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    #[error("hand index {index} is out of range (hand size {len})")]
    HandIndexOutOfRange { index: usize, len: usize },

    #[error("insufficient action points (need {need}, have {have})")]
    InsufficientAp { need: i32, have: i32 },

    #[error("no actions left this turn")]
    ActionsExhausted,

    #[error("the {lane:?} lane is full")]
    LaneFull { lane: Lane },

    #[error("the {slot} slot is already occupied")]
    SlotOccupied { slot: &'static str },

    #[error("an instant is already pending")]
    PendingSlotOccupied,

    #[error("no pending instant to activate")]
    NothingPending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_read_well() {
        assert_eq!(
            RulesError::NotYourTurn { player: PlayerId::TWO }.to_string(),
            "it is not Player 1's turn"
        );
        assert_eq!(
            RulesError::InsufficientAp { need: 2, have: 1 }.to_string(),
            "insufficient action points (need 2, have 1)"
        );
        assert_eq!(
            RulesError::LaneFull { lane: Lane::Foreign }.to_string(),
            "the Foreign lane is full"
        );
    }
}
