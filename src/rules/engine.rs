//! The turn/round state machine.
//!
//! Orchestrates the four inbound operations — play a card, activate the
//! pending instant, pass, end turn — and round resolution, calling into
//! the economy, the aura recomputation, the dispatcher, and the drain
//! engine at the right points.
//!
//! ## Operation Shape
//!
//! Every operation borrows the aggregate exclusively, runs to completion
//! (including fully draining the effect queue), flushes newly appended
//! log lines to the caller's sink, and returns. A rejected operation
//! logs the rejection and leaves the aggregate otherwise unchanged.
//!
//! ## Turn Flow
//!
//! Passing is for the round; ending a turn is for the turn. The turn
//! switches to the opponent unless they have already passed, in which
//! case the acting player keeps the turn. A round resolves exactly when
//! both players have passed.

use std::cmp::Ordering;

use crate::auras;
use crate::cards::catalog::keys;
use crate::cards::{Card, CardKind, Catalog, Lane, SpecialKind};
use crate::core::{shuffle, GameConfig, GameRng, PlayerId, PlayerPair, RandomSource};
use crate::economy;
use crate::effects::{dispatcher, engine, EffectEvent, EffectQueue};
use crate::error::RulesError;
use crate::state::{MatchPhase, MatchState};

/// Receives each log line an operation appends, in order.
pub type LogSink<'a> = &'a mut dyn FnMut(&str);

impl MatchState {
    /// Play the card at `hand_index` from `player`'s hand.
    ///
    /// Units go to their affinity lane unless `lane_hint` overrides it;
    /// ongoing and public specials occupy their permanent slot; instants
    /// occupy the pending slot until activated; traps register face-down.
    /// After placement: aura recomputation, dispatch, drain.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        hand_index: usize,
        lane_hint: Option<Lane>,
        sink: LogSink,
    ) -> Result<(), RulesError> {
        let result = play_card_inner(self, player, hand_index, lane_hint);
        finish_op(self, result, sink)
    }

    /// Activate `player`'s pending instant: dispatch its effects, spring
    /// any opposing traps, discard the instant, drain the queue.
    pub fn activate_pending_instant(
        &mut self,
        player: PlayerId,
        sink: LogSink,
    ) -> Result<(), RulesError> {
        let result = activate_instant_inner(self, player);
        finish_op(self, result, sink)
    }

    /// Pass for the round. If the opponent has also passed, the round
    /// resolves; otherwise the turn switches to them.
    pub fn pass_turn(&mut self, player: PlayerId, sink: LogSink) -> Result<(), RulesError> {
        let result = pass_inner(self, player);
        finish_op(self, result, sink)
    }

    /// End the current turn. Idempotent while a turn is already ending.
    /// A player who has not passed draws one card on the way out.
    pub fn end_turn(
        &mut self,
        player: PlayerId,
        reason: &str,
        sink: LogSink,
    ) -> Result<(), RulesError> {
        let result = end_turn_inner(self, player, reason);
        finish_op(self, result, sink)
    }
}

fn finish_op(
    state: &mut MatchState,
    result: Result<(), RulesError>,
    sink: LogSink,
) -> Result<(), RulesError> {
    if let Err(err) = &result {
        state.log.push(format!("Rejected: {err}."));
    }
    state.log.flush_to(sink);
    result
}

fn ensure_acting(state: &MatchState, player: PlayerId) -> Result<(), RulesError> {
    match state.phase {
        MatchPhase::Idle => Err(RulesError::MatchNotStarted),
        MatchPhase::MatchOver(_) => Err(RulesError::MatchIsOver),
        MatchPhase::PlayerTurn(p) if p == player => Ok(()),
        _ => Err(RulesError::NotYourTurn { player }),
    }
}

fn play_card_inner(
    state: &mut MatchState,
    player: PlayerId,
    hand_index: usize,
    lane_hint: Option<Lane>,
) -> Result<(), RulesError> {
    ensure_acting(state, player)?;

    // Validate everything before touching the aggregate.
    let quote = {
        let side = &state.sides[player];
        let len = side.hand.len();
        let card = side
            .hand
            .get(hand_index)
            .ok_or(RulesError::HandIndexOutOfRange {
                index: hand_index,
                len,
            })?;

        let quote = economy::net_cost(state, player, card);
        if !economy::can_play(state, player, &quote) {
            return Err(RulesError::ActionsExhausted);
        }
        if side.ap < quote.net {
            return Err(RulesError::InsufficientAp {
                need: quote.net,
                have: side.ap,
            });
        }

        match card.kind {
            CardKind::Unit { affinity, .. } => {
                let lane = lane_hint.unwrap_or(affinity);
                if side.lane(lane).len() >= state.config.lane_capacity {
                    return Err(RulesError::LaneFull { lane });
                }
            }
            CardKind::Special { kind, .. } => match kind {
                SpecialKind::Ongoing => {
                    if side.government.is_some() {
                        return Err(RulesError::SlotOccupied { slot: "government" });
                    }
                }
                SpecialKind::Public => {
                    if side.public_office.is_some() {
                        return Err(RulesError::SlotOccupied {
                            slot: "public office",
                        });
                    }
                }
                SpecialKind::Instant => {
                    if side.pending.is_some() {
                        return Err(RulesError::PendingSlotOccupied);
                    }
                }
                SpecialKind::Trap => {}
            },
        }
        quote
    };

    // Commit: pay, consume refund markers, place.
    let card = state.sides[player].hand.remove(hand_index);
    let uid = card.uid;
    let name = card.name;
    {
        let side = &mut state.sides[player];
        side.ap -= quote.net;
        side.actions_used += 1;
        if quote.first_free_applied {
            side.first_unit_used = true;
        }
        if quote.instant_refund_applied {
            side.instant_refunds_used += 1;
        }
    }
    for reason in &quote.reasons {
        state.log.push(format!("{player}: {reason}"));
    }
    state.log.push(format!(
        "{player} plays {name} (cost {}, refund {}, net {}).",
        quote.cost, quote.refund, quote.net
    ));

    let dispatches = match card.kind {
        CardKind::Unit { affinity, .. } => {
            let lane = lane_hint.unwrap_or(affinity);
            state.sides[player].lane_mut(lane).push(card);
            true
        }
        CardKind::Special { kind, .. } => match kind {
            SpecialKind::Ongoing => {
                state.sides[player].government = Some(card);
                true
            }
            SpecialKind::Public => {
                state.sides[player].public_office = Some(card);
                true
            }
            SpecialKind::Instant => {
                state.sides[player].pending = Some(card);
                state
                    .log
                    .push(format!("{player}'s {name} awaits activation."));
                false
            }
            SpecialKind::Trap => {
                state.sides[player].traps.push(card);
                state.log.push(format!("{player} sets a face-down card."));
                false
            }
        },
    };

    auras::recompute(state);

    if dispatches {
        let mut queue = EffectQueue::new();
        if let Some(card_ref) = state.find_board_card(uid) {
            dispatcher::dispatch(state, player, card_ref, &mut queue);
        }
        engine::drain(state, &mut queue);
    }

    Ok(())
}

fn activate_instant_inner(state: &mut MatchState, player: PlayerId) -> Result<(), RulesError> {
    ensure_acting(state, player)?;

    let card = state.sides[player]
        .pending
        .take()
        .ok_or(RulesError::NothingPending)?;
    state.log.push(format!("{player} activates {}.", card.name));

    let mut queue = EffectQueue::new();
    dispatcher::dispatch(state, player, &card, &mut queue);

    // Face-down interventions spring on the activation.
    let opponent = player.opponent();
    let traps: Vec<Card> = std::mem::take(&mut state.sides[opponent].traps);
    for trap in traps {
        state.log.push(format!("{opponent} springs {}!", trap.name));
        dispatcher::dispatch(state, opponent, &trap, &mut queue);
        state.discard.push(trap);
    }

    state.discard.push(card);
    engine::drain(state, &mut queue);

    Ok(())
}

fn pass_inner(state: &mut MatchState, player: PlayerId) -> Result<(), RulesError> {
    ensure_acting(state, player)?;

    state.sides[player].passed = true;
    state.log.push(format!("{player} passes."));
    finish_turn(state, player);

    Ok(())
}

fn end_turn_inner(state: &mut MatchState, player: PlayerId, reason: &str) -> Result<(), RulesError> {
    // Already tearing down: idempotent no-op.
    if matches!(state.phase, MatchPhase::EndingTurn(_)) {
        return Ok(());
    }
    ensure_acting(state, player)?;

    state
        .log
        .push(format!("{player} ends their turn ({reason})."));
    finish_turn(state, player);

    Ok(())
}

/// Shared turn teardown: players who have not passed draw one card on
/// the way out; then either the round resolves (both passed) or the turn
/// moves to the opponent, unless they passed, in which case the acting
/// player keeps it.
fn finish_turn(state: &mut MatchState, player: PlayerId) {
    state.phase = MatchPhase::EndingTurn(player);

    if !state.sides[player].passed {
        let mut queue = EffectQueue::new();
        queue.push_back(EffectEvent::draw(player, 1));
        engine::drain(state, &mut queue);
    }

    if state.both_passed() {
        resolve_round(state, player);
    } else {
        let opponent = player.opponent();
        let next = if state.sides[opponent].passed {
            player
        } else {
            opponent
        };
        begin_turn(state, next);
    }
}

fn begin_turn(state: &mut MatchState, player: PlayerId) {
    state.phase = MatchPhase::PlayerTurn(player);
    {
        let side = &mut state.sides[player];
        side.ap = state.config.turn_ap.min(state.config.ap_cap);
        side.actions_used = 0;
        side.first_unit_used = false;
        side.instant_refunds_used = 0;
    }
    auras::recompute(state);
    state.log.push(format!(
        "{player} begins their turn with {} AP.",
        state.sides[player].ap
    ));
}

fn resolve_round(state: &mut MatchState, current: PlayerId) {
    state.phase = MatchPhase::RoundResolution;

    let score_one = state.score(PlayerId::ONE);
    let score_two = state.score(PlayerId::TWO);
    state.log.push(format!(
        "Round {} ends - Player 0: {score_one}, Player 1: {score_two}.",
        state.round
    ));

    // Ties fall to whoever was current when the round closed.
    let winner = match score_one.cmp(&score_two) {
        Ordering::Greater => PlayerId::ONE,
        Ordering::Less => PlayerId::TWO,
        Ordering::Equal => current,
    };
    state.log.push(format!("{winner} takes the round."));

    for player in PlayerId::both() {
        let mut cleared: Vec<Card> = Vec::new();
        {
            let side = &mut state.sides[player];
            cleared.append(&mut side.home);
            cleared.append(&mut side.foreign);
            cleared.extend(side.pending.take());
            cleared.extend(side.government.take());
            cleared.extend(side.public_office.take());
            cleared.append(&mut side.traps);
            side.passed = false;
        }
        state.discard.append(&mut cleared);
    }
    state.shields.clear();

    state.sides[winner].round_wins += 1;
    let wins = state.sides[winner].round_wins;
    if wins >= state.config.round_wins_to_match {
        state.phase = MatchPhase::MatchOver(winner);
        state.log.push(format!(
            "{winner} wins the match {wins}-{}.",
            state.sides[winner.opponent()].round_wins
        ));
        return;
    }

    state.round += 1;
    state.log.push(format!("Round {} begins.", state.round));

    // Top up both hands to the refill size.
    let mut queue = EffectQueue::new();
    for player in PlayerId::both() {
        let need = state
            .config
            .refill_hand_size
            .saturating_sub(state.sides[player].hand.len());
        if need > 0 {
            queue.push_back(EffectEvent::draw(player, need));
        }
    }
    engine::drain(state, &mut queue);

    begin_turn(state, winner);
}

fn start_match(state: &mut MatchState) {
    state.log.push(format!("Round {} begins.", state.round));

    let mut queue = EffectQueue::new();
    for player in PlayerId::both() {
        queue.push_back(EffectEvent::draw(player, state.config.refill_hand_size));
    }
    engine::drain(state, &mut queue);

    begin_turn(state, PlayerId::ONE);
}

/// The standard 25-card deck list.
const DEFAULT_DECK: &[&str] = &[
    keys::AMBASSADOR,
    keys::IRON_CHANCELLOR,
    keys::VETERAN_SENATOR,
    keys::PROVINCIAL_GOVERNOR,
    keys::TRADE_ENVOY,
    keys::FIELD_ORGANIZER,
    keys::YOUNG_ACTIVIST,
    keys::CHIEF_STRATEGIST,
    keys::PRESS_SECRETARY,
    keys::TREASURER,
    keys::SHADOW_DIPLOMAT,
    keys::SCIENCE_ADVISER,
    keys::SURGEON_GENERAL,
    keys::DEFENSE_MINISTER,
    keys::CAMPAIGN_MANAGER,
    keys::GRASSROOTS_PLATFORM,
    keys::SABOTEUR,
    keys::NATIONAL_BUDGET,
    keys::PUBLIC_BROADCAST,
    keys::EMERGENCY_SESSION,
    keys::DIPLOMATIC_SUMMIT,
    keys::SMEAR_CAMPAIGN,
    keys::RALLY,
    keys::SECURITY_DETAIL,
    keys::COUNTERINTELLIGENCE,
];

/// Builder for one match.
///
/// ## Example
///
/// ```
/// use statecraft::{MatchBuilder, MatchPhase, PlayerId};
///
/// let state = MatchBuilder::new().seed(42).start();
///
/// assert_eq!(state.phase, MatchPhase::PlayerTurn(PlayerId::ONE));
/// assert_eq!(state.side(PlayerId::ONE).hand.len(), 5);
/// ```
pub struct MatchBuilder {
    config: GameConfig,
    rng: Box<dyn RandomSource>,
    decks: PlayerPair<Vec<&'static str>>,
    shuffle_decks: bool,
}

impl Default for MatchBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            rng: Box::new(GameRng::from_entropy()),
            decks: PlayerPair::with_value(DEFAULT_DECK.to_vec()),
            shuffle_decks: true,
        }
    }
}

impl MatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the configuration.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a seeded, reproducible random source.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Box::new(GameRng::seeded(seed));
        self
    }

    /// Inject a custom random source.
    #[must_use]
    pub fn rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Set a player's deck list (bottom of the deck first).
    ///
    /// Panics if a key is not in the standard catalog.
    #[must_use]
    pub fn deck(mut self, player: PlayerId, deck_keys: &[&'static str]) -> Self {
        self.decks[player] = deck_keys.to_vec();
        self
    }

    /// Keep decks in list order instead of shuffling.
    #[must_use]
    pub fn no_shuffle(mut self) -> Self {
        self.shuffle_decks = false;
        self
    }

    /// Build an idle match: decks instantiated (and shuffled), nothing
    /// dealt, phase `Idle`.
    #[must_use]
    pub fn build(self) -> MatchState {
        let catalog = Catalog::standard();
        let mut state = MatchState::new(self.config, self.rng);

        for player in PlayerId::both() {
            let mut deck = Vec::with_capacity(self.decks[player].len());
            for key in &self.decks[player] {
                let def = catalog
                    .get(key)
                    .unwrap_or_else(|| panic!("Unknown card key {key:?} in deck list"));
                deck.push(state.instantiate(def));
            }
            if self.shuffle_decks {
                shuffle(state.rng.as_mut(), &mut deck);
            }
            state.sides[player].deck = deck;
        }

        state
    }

    /// Build, deal opening hands, and hand the first turn to Player 0.
    #[must_use]
    pub fn start(self) -> MatchState {
        let mut state = self.build();
        start_match(&mut state);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default_decks() {
        let state = MatchBuilder::new().seed(1).build();

        assert_eq!(state.phase, MatchPhase::Idle);
        assert_eq!(state.side(PlayerId::ONE).deck.len(), DEFAULT_DECK.len());
        assert_eq!(state.side(PlayerId::TWO).deck.len(), DEFAULT_DECK.len());
    }

    #[test]
    fn test_start_deals_and_opens_round() {
        let state = MatchBuilder::new().seed(1).start();

        assert_eq!(state.phase, MatchPhase::PlayerTurn(PlayerId::ONE));
        for player in PlayerId::both() {
            assert_eq!(
                state.side(player).hand.len(),
                state.config.refill_hand_size
            );
        }
        assert_eq!(state.side(PlayerId::ONE).ap, state.config.turn_ap);
        assert_eq!(state.log.entries()[0], "Round 1 begins.");
    }

    #[test]
    fn test_seeded_builds_are_identical() {
        let a = MatchBuilder::new().seed(7).start();
        let b = MatchBuilder::new().seed(7).start();

        let names = |state: &MatchState, player: PlayerId| -> Vec<&str> {
            state.side(player).hand.iter().map(|c| c.name).collect()
        };

        assert_eq!(names(&a, PlayerId::ONE), names(&b, PlayerId::ONE));
        assert_eq!(names(&a, PlayerId::TWO), names(&b, PlayerId::TWO));
    }

    #[test]
    fn test_no_shuffle_preserves_list_order() {
        let state = MatchBuilder::new()
            .seed(1)
            .deck(PlayerId::ONE, &[keys::AMBASSADOR, keys::RALLY])
            .no_shuffle()
            .build();

        let deck = &state.side(PlayerId::ONE).deck;
        assert_eq!(deck[0].key, keys::AMBASSADOR);
        assert_eq!(deck[1].key, keys::RALLY);
    }

    #[test]
    #[should_panic(expected = "Unknown card key")]
    fn test_unknown_deck_key_panics() {
        let _ = MatchBuilder::new()
            .deck(PlayerId::ONE, &["no_such_card"])
            .build();
    }

    #[test]
    fn test_ops_rejected_before_start() {
        let mut state = MatchBuilder::new().seed(1).build();

        let err = state
            .pass_turn(PlayerId::ONE, &mut |_: &str| {})
            .unwrap_err();
        assert_eq!(err, RulesError::MatchNotStarted);
    }
}
