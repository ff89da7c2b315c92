//! Action-point economy: costs, discounts, refunds, and play legality.
//!
//! Two layers:
//!
//! - [`cost`] computes the discounted cost of attempting a play: base
//!   cost, minus stacking instant discounts and tag synergy, floored at
//!   zero per application, clamped by the global cap.
//! - [`net_cost`] composes cost with refund sources: the per-turn
//!   first-unit-free flag, the per-turn instant refund counter, and the
//!   card's intrinsic refund. `net = max(0, cost - refund)`.
//!
//! Every discount or refund application records a before/after reason
//! string so the state machine can log an audit trail.
//!
//! A play is legal while the per-turn action allotment lasts, **or**
//! whenever its net cost is exactly zero — the escape valve that keeps
//! free plays available after the allotment is spent.

use crate::cards::{Card, SpecialKind};
use crate::core::PlayerId;
use crate::state::MatchState;

/// Discounted cost of attempting a play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostQuote {
    /// Cost after discounts, floored at zero.
    pub cost: i32,
    /// One before/after line per discount applied.
    pub reasons: Vec<String>,
}

/// Cost and refunds for one specific play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetQuote {
    /// Discounted cost.
    pub cost: i32,
    /// Total refund available for this play.
    pub refund: i32,
    /// `max(0, cost - refund)`.
    pub net: i32,
    /// One line per discount or refund applied.
    pub reasons: Vec<String>,
    /// Whether the first-unit-free flag covered this play.
    pub first_free_applied: bool,
    /// Whether one per-turn instant refund covered part of this play.
    pub instant_refund_applied: bool,
}

/// Compute the discounted cost of attempting to play `card`.
#[must_use]
pub fn cost(state: &MatchState, player: PlayerId, card: &Card) -> CostQuote {
    let mut cost = state.config.base_card_cost.min(state.config.ap_cap);
    let mut reasons = Vec::new();

    if card.special_kind() == Some(SpecialKind::Instant) {
        let flags = &state.sides[player].flags;

        for _ in 0..flags.instant_discount {
            if cost == 0 {
                break;
            }
            let before = cost;
            cost -= 1;
            reasons.push(format!("instant discount: cost {before} -> {cost}"));
        }

        if let Some(tag) = card.tag() {
            if flags.domain_aura(tag) > 0 && cost > 0 {
                let before = cost;
                cost -= 1;
                reasons.push(format!("{tag} synergy: cost {before} -> {cost}"));
            }
        }
    }

    CostQuote { cost, reasons }
}

/// Compute cost, refunds, and the resulting net for one specific play.
#[must_use]
pub fn net_cost(state: &MatchState, player: PlayerId, card: &Card) -> NetQuote {
    let CostQuote { cost, mut reasons } = self::cost(state, player, card);
    let side = &state.sides[player];

    let mut refund = 0;
    let mut first_free_applied = false;
    let mut instant_refund_applied = false;

    if card.is_unit() && side.flags.first_unit_free && !side.first_unit_used && cost > 0 {
        refund += cost;
        first_free_applied = true;
        reasons.push(format!("first unit is free: refund {cost}"));
    }

    if card.special_kind() == Some(SpecialKind::Instant) {
        let available = (side.flags.instant_refund - side.instant_refunds_used).max(0);
        if available > 0 && cost > refund {
            refund += 1;
            instant_refund_applied = true;
            reasons.push("instant refund: 1 back".to_string());
        }

        if card.refund > 0 {
            refund += card.refund;
            reasons.push(format!("{}: intrinsic refund {}", card.name, card.refund));
        }
    }

    let net = (cost - refund).max(0);

    NetQuote {
        cost,
        refund,
        net,
        reasons,
        first_free_applied,
        instant_refund_applied,
    }
}

/// Check whether a play with the given quote is legal for `player`.
///
/// Legal while the action allotment lasts, or whenever `net == 0`.
#[must_use]
pub fn can_play(state: &MatchState, player: PlayerId, quote: &NetQuote) -> bool {
    state.sides[player].actions_used < state.config.actions_per_turn || quote.net == 0
}
