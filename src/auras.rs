//! Ephemeral per-player flags ("auras") derived from board contents.
//!
//! ## Reset-Then-Rebuild
//!
//! [`recompute`] always resets every flag of both players to its default
//! before re-deriving from scratch by scanning each player's home lane
//! for specific active (non-deactivated) card keys. The full rebuild is
//! idempotent and guarantees a flag never outlives its source: a home
//! card deactivated mid-turn stops radiating at the next recomputation.
//!
//! Recomputation runs at the start of each turn and immediately after
//! any card is placed on a board lane.
//!
//! ## Asymmetric Auras
//!
//! Most sources set flags on their owner. A source may instead target the
//! opponent: the Saboteur raises `initiative_suppression` on the *other*
//! player's flags.

use serde::{Deserialize, Serialize};

use crate::cards::catalog::keys;
use crate::core::PlayerId;
use crate::state::MatchState;

/// Per-player ephemeral flags. Never persisted across a recomputation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectFlags {
    /// The first unit card played this turn costs nothing.
    pub first_unit_free: bool,

    /// Stacking discount on instant costs, one per source.
    pub instant_discount: i32,

    /// Per-turn refund allowance for instants, one per source.
    pub instant_refund: i32,

    /// Buffs granted to the opponent are re-applied to this player.
    pub mirror_buffs: bool,

    /// Science-domain initiative aura.
    pub science: i32,

    /// Health-domain initiative aura.
    pub health: i32,

    /// Military-domain initiative aura.
    pub military: i32,

    /// Initiative penalty inflicted by opposing saboteurs.
    pub initiative_suppression: i32,

    /// Activating an instant also grants one AP and one card.
    pub bonus_draw_ap: bool,

    /// A platform bonus is available (home-lane platform with its
    /// one-shot ability still unused this round).
    pub platform_bonus: bool,
}

impl EffectFlags {
    /// Reset every flag to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The aura strength for a synergy tag, 0 for unknown tags.
    #[must_use]
    pub fn domain_aura(&self, tag: &str) -> i32 {
        match tag {
            "science" => self.science,
            "health" => self.health,
            "military" => self.military,
            _ => 0,
        }
    }
}

/// Rebuild both players' flags from current board contents.
pub fn recompute(state: &mut MatchState) {
    for player in PlayerId::both() {
        state.sides[player].flags.reset();
    }

    for player in PlayerId::both() {
        let sources: Vec<&'static str> = state.sides[player]
            .home
            .iter()
            .filter(|c| c.is_active())
            .map(|c| c.key)
            .collect();
        let platform_ready = state.sides[player]
            .home
            .iter()
            .any(|c| c.key == keys::GRASSROOTS_PLATFORM && c.is_active() && !c.ability_used);

        for key in sources {
            match key {
                keys::CHIEF_STRATEGIST => state.sides[player].flags.first_unit_free = true,
                keys::PRESS_SECRETARY => state.sides[player].flags.instant_discount += 1,
                keys::TREASURER => state.sides[player].flags.instant_refund += 1,
                keys::SHADOW_DIPLOMAT => state.sides[player].flags.mirror_buffs = true,
                keys::SCIENCE_ADVISER => state.sides[player].flags.science += 1,
                keys::SURGEON_GENERAL => state.sides[player].flags.health += 1,
                keys::DEFENSE_MINISTER => state.sides[player].flags.military += 1,
                keys::CAMPAIGN_MANAGER => state.sides[player].flags.bonus_draw_ap = true,
                keys::SABOTEUR => {
                    state.sides[player.opponent()].flags.initiative_suppression += 1;
                }
                _ => {}
            }
        }

        state.sides[player].flags.platform_bonus = platform_ready;
    }
}
