//! The effect drain engine.
//!
//! Processes pending events strictly one at a time: each event is
//! removed from the front of the queue before its handler runs, and
//! handlers may push new events to the front (work that must resolve
//! before previously queued events, e.g. a triggered mirror) or the back.
//! The engine never recurses into a fresh queue; every injection lands in
//! the one shared list, so the drain is bounded by the finite events a
//! play enqueues plus finite injections — mirror and aura injections are
//! marked so they cannot re-trigger themselves.
//!
//! ## Failure Semantics
//!
//! No event raises an error. Exhausted decks and hands degrade to
//! partial work or no-ops with a log line; unknown target uids degrade
//! to silent no-ops.
//!
//! ## Action-Point Cap
//!
//! `AddAp` clamps at zero from below and applies **no upper cap**: the
//! cap binds only at turn refresh and in the play-time economy, so a
//! mid-resolution gain sequence can legitimately push AP above the
//! nominal cap. Pinned by a property test; do not "fix".

use smallvec::SmallVec;

use crate::cards::catalog::keys;
use crate::cards::Uid;
use crate::core::PlayerId;
use crate::state::MatchState;

use super::event::EffectEvent;
use super::queue::EffectQueue;
use super::targeting::strongest_foreign_uid;

/// Drain the queue to empty, mutating `state` as events resolve.
pub fn drain(state: &mut MatchState, queue: &mut EffectQueue) {
    while let Some(event) = queue.pop_front() {
        apply(state, queue, event);
    }
}

fn apply(state: &mut MatchState, queue: &mut EffectQueue, event: EffectEvent) {
    match event {
        EffectEvent::AddAp { player, amount } => add_ap(state, player, amount),
        EffectEvent::DrawCards { player, count } => draw_cards(state, player, count),
        EffectEvent::DiscardRandomFromHand { player, count } => {
            discard_random_from_hand(state, player, count);
        }
        EffectEvent::DeactivateRandomHand { player, count } => {
            deactivate_random_hand(state, player, count);
        }
        EffectEvent::BuffStrongest {
            player,
            amount,
            mirrored,
        } => buff_strongest(state, queue, player, amount, mirrored),
        EffectEvent::GrantShield { target } => grant_shield(state, target),
        EffectEvent::DeactivateCard { target } => deactivate_card(state, target),
        EffectEvent::InitiativeActivated { player } => initiative_activated(state, queue, player),
        EffectEvent::Log { message } => state.log.push(message),
    }
}

fn add_ap(state: &mut MatchState, player: PlayerId, amount: i32) {
    let before = state.sides[player].ap;
    let after = (before + amount).max(0);
    state.sides[player].ap = after;
    state.log.push(format!("{player} AP {before} -> {after}."));
}

fn draw_cards(state: &mut MatchState, player: PlayerId, count: usize) {
    for _ in 0..count {
        if state.sides[player].hand.len() >= state.config.hand_limit {
            state.log.push(format!("{player}'s hand is full."));
            break;
        }
        match state.pop_deck(player) {
            Some(card) => {
                state.log.push(format!("{player} draws {}.", card.name));
                state.sides[player].hand.push(card);
            }
            None => {
                state.log.push(format!("{player}'s deck is empty."));
                break;
            }
        }
    }
}

fn discard_random_from_hand(state: &mut MatchState, player: PlayerId, count: usize) {
    for _ in 0..count {
        let len = state.sides[player].hand.len();
        let Some(index) = state.rng.pick_index(len) else {
            state.log.push(format!("{player}'s hand is empty."));
            break;
        };
        let card = state.sides[player].hand.remove(index);
        state.log.push(format!("{player} discards {}.", card.name));
        state.discard.push(card);
    }
}

fn deactivate_random_hand(state: &mut MatchState, player: PlayerId, count: usize) {
    for _ in 0..count {
        let active: Vec<usize> = state.sides[player]
            .hand
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_active())
            .map(|(i, _)| i)
            .collect();
        let Some(pick) = state.rng.pick_index(active.len()) else {
            state.log.push(format!("{player} has no active cards in hand."));
            break;
        };
        let index = active[pick];
        let name = {
            let card = &mut state.sides[player].hand[index];
            card.deactivated = true;
            card.name
        };
        state.log.push(format!("{player}'s {name} is deactivated in hand."));
    }
}

fn buff_strongest(
    state: &mut MatchState,
    queue: &mut EffectQueue,
    player: PlayerId,
    amount: i32,
    mirrored: bool,
) {
    if amount == 0 {
        return;
    }
    // No eligible unit: silent no-op.
    let Some(uid) = strongest_foreign_uid(&state.sides[player]) else {
        return;
    };
    let name = {
        let Some(card) = state.sides[player].foreign.iter_mut().find(|c| c.uid == uid) else {
            return;
        };
        if amount > 0 {
            card.buffs += amount;
        } else {
            card.debuffs += -amount;
        }
        card.name
    };
    if amount > 0 {
        state.log.push(format!("{name} gains +{amount} influence."));
    } else {
        state.log.push(format!("{name} loses {} influence.", -amount));
    }

    let opponent = player.opponent();
    if !mirrored && amount > 0 && state.sides[opponent].flags.mirror_buffs {
        state
            .log
            .push(format!("{opponent}'s mirror reflects the buff."));
        queue.push_front(EffectEvent::BuffStrongest {
            player: opponent,
            amount,
            mirrored: true,
        });
    }
}

fn grant_shield(state: &mut MatchState, target: Uid) {
    if state.shields.insert(target) {
        let name = state.find_lane_card(target).map(|c| c.name);
        if let Some(name) = name {
            state.log.push(format!("{name} is shielded."));
        }
    }
}

fn deactivate_card(state: &mut MatchState, target: Uid) {
    if state.shields.remove(&target) {
        let name = state.find_lane_card(target).map(|c| c.name);
        if let Some(name) = name {
            state
                .log
                .push(format!("{name}'s shield absorbs the disruption."));
        }
        return;
    }

    let mut outcome = None;
    if let Some(card) = state.find_lane_card_mut(target) {
        if card.protected {
            outcome = Some((card.name, false));
        } else {
            card.deactivated = true;
            outcome = Some((card.name, true));
        }
    }
    match outcome {
        Some((name, true)) => state.log.push(format!("{name} is deactivated.")),
        Some((name, false)) => state.log.push(format!("{name} cannot be deactivated.")),
        // Unknown target: silent no-op.
        None => {}
    }
}

fn initiative_activated(state: &mut MatchState, queue: &mut EffectQueue, player: PlayerId) {
    let flags = state.sides[player].flags.clone();
    let mut injected: SmallVec<[EffectEvent; 4]> = SmallVec::new();

    let delta = flags.science + flags.health + flags.military - flags.initiative_suppression;
    if delta != 0 {
        state
            .log
            .push(format!("{player}'s auras shift the initiative by {delta}."));
        injected.push(EffectEvent::buff(player, delta));
    }

    if flags.bonus_draw_ap {
        state
            .log
            .push(format!("{player}'s campaign machine spins up."));
        injected.push(EffectEvent::add_ap(player, 1));
        injected.push(EffectEvent::draw(player, 1));
    }

    if flags.platform_bonus {
        let fired = state.sides[player]
            .home
            .iter_mut()
            .find(|c| c.key == keys::GRASSROOTS_PLATFORM && c.is_active() && !c.ability_used)
            .map(|card| {
                card.ability_used = true;
            })
            .is_some();
        if fired {
            state
                .log
                .push(format!("{player}'s platform rallies support."));
            injected.push(EffectEvent::add_ap(player, 1));
        }
    }

    queue.inject_front(injected);
}
