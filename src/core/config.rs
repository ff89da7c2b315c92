//! Match configuration.
//!
//! Numeric knobs of the duel, carried inside the aggregate. Defaults
//! match the standard ruleset; hosts override per match through
//! [`crate::rules::MatchBuilder`].

use serde::{Deserialize, Serialize};

/// Configuration for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Base action-point cost of attempting to play any card.
    pub base_card_cost: i32,

    /// Action points granted at the start of each turn.
    pub turn_ap: i32,

    /// Upper cap on action points, enforced at turn refresh and by the
    /// economy at play time. Resolution-time gains are deliberately
    /// uncapped (see `effects::engine`).
    pub ap_cap: i32,

    /// Plays allowed per turn. Zero-net plays bypass this allotment.
    pub actions_per_turn: u32,

    /// Maximum hand size; draws stop once a hand is full.
    pub hand_limit: usize,

    /// Maximum units per board lane.
    pub lane_capacity: usize,

    /// Hand size each player is topped up to when a new round begins.
    pub refill_hand_size: usize,

    /// Round wins needed to take the match.
    pub round_wins_to_match: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_card_cost: 1,
            turn_ap: 3,
            ap_cap: 10,
            actions_per_turn: 2,
            hand_limit: 8,
            lane_capacity: 5,
            refill_hand_size: 5,
            round_wins_to_match: 2,
        }
    }
}

impl GameConfig {
    /// Set the round-win threshold (builder pattern).
    #[must_use]
    pub fn with_round_wins_to_match(mut self, wins: u32) -> Self {
        self.round_wins_to_match = wins;
        self
    }

    /// Set the per-turn action allotment (builder pattern).
    #[must_use]
    pub fn with_actions_per_turn(mut self, actions: u32) -> Self {
        self.actions_per_turn = actions;
        self
    }

    /// Set the per-turn action-point grant (builder pattern).
    #[must_use]
    pub fn with_turn_ap(mut self, ap: i32) -> Self {
        self.turn_ap = ap;
        self
    }
}
