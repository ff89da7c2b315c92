//! The match aggregate: everything one duel owns.
//!
//! ## Ownership Model
//!
//! `MatchState` is a single mutable aggregate owned by the caller. Every
//! public operation borrows it exclusively for its full duration; no
//! component retains its own copy, and handlers mutate it in place.
//! Single writer, no concurrent readers during a drain.
//!
//! ## Lifecycle
//!
//! Cards are instantiated once (deck construction) and flow
//! deck → hand → board/discard; they never return to a deck. At round
//! boundaries lanes, slots, the pending instant, traps, and shields all
//! clear to the discard pile; the discard is cumulative and decks and
//! hands carry over.

use rustc_hash::FxHashSet;

use crate::cards::{Card, CardDefinition, Lane, Uid};
use crate::core::{GameConfig, MatchLog, PlayerId, PlayerPair, RandomSource};

use crate::auras::EffectFlags;

/// Where the turn/round state machine currently rests.
///
/// `RoundResolution` is transient: operations are synchronous, so the
/// aggregate only carries it while a resolution is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPhase {
    /// Built but not started.
    Idle,
    /// The given player may act.
    PlayerTurn(PlayerId),
    /// The given player's turn is being torn down; re-entrant
    /// `end_turn` calls no-op while this is set.
    EndingTurn(PlayerId),
    /// A round is being scored and reset.
    RoundResolution,
    /// The match ended; the given player took it. No further plays.
    MatchOver(PlayerId),
}

/// One player's containers and per-turn counters.
#[derive(Clone, Debug, Default)]
pub struct PlayerSide {
    /// Draw pile. The top of the deck is the end of the vec.
    pub deck: Vec<Card>,

    /// Hand, capacity-limited by `GameConfig::hand_limit`.
    pub hand: Vec<Card>,

    /// Home lane: aura sources.
    pub home: Vec<Card>,

    /// Foreign lane: scoring units.
    pub foreign: Vec<Card>,

    /// The single pending-instant slot.
    pub pending: Option<Card>,

    /// Government slot, exclusive to one ongoing special.
    pub government: Option<Card>,

    /// Public-office slot, exclusive to one public special.
    pub public_office: Option<Card>,

    /// Face-down traps awaiting an opposing instant.
    pub traps: Vec<Card>,

    /// Action points. Never below zero; above `ap_cap` only through
    /// resolution-time gains.
    pub ap: i32,

    /// Plays made this turn.
    pub actions_used: u32,

    /// Whether the first-unit-free refund was consumed this turn.
    pub first_unit_used: bool,

    /// How many instant refunds were consumed this turn.
    pub instant_refunds_used: i32,

    /// Whether this player has passed for the round.
    pub passed: bool,

    /// Rounds won so far.
    pub round_wins: u32,

    /// Ephemeral flags, rebuilt from scratch by `auras::recompute`.
    pub flags: EffectFlags,
}

impl PlayerSide {
    /// Borrow a board lane.
    #[must_use]
    pub fn lane(&self, lane: Lane) -> &[Card] {
        match lane {
            Lane::Home => &self.home,
            Lane::Foreign => &self.foreign,
        }
    }

    /// Borrow a board lane mutably.
    pub fn lane_mut(&mut self, lane: Lane) -> &mut Vec<Card> {
        match lane {
            Lane::Home => &mut self.home,
            Lane::Foreign => &mut self.foreign,
        }
    }

    /// Iterate over the three board lanes (home, foreign, pending).
    pub fn lane_cards(&self) -> impl Iterator<Item = &Card> {
        self.home
            .iter()
            .chain(self.foreign.iter())
            .chain(self.pending.iter())
    }

    fn lane_cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.home
            .iter_mut()
            .chain(self.foreign.iter_mut())
            .chain(self.pending.iter_mut())
    }

    /// Iterate over every card on the board: lanes, slots, and traps.
    pub fn board_cards(&self) -> impl Iterator<Item = &Card> {
        self.lane_cards()
            .chain(self.government.iter())
            .chain(self.public_office.iter())
            .chain(self.traps.iter())
    }
}

/// Complete state of one match.
pub struct MatchState {
    /// Match configuration.
    pub config: GameConfig,

    /// Both players' containers and counters.
    pub sides: PlayerPair<PlayerSide>,

    /// Shared discard pile, append-only across the whole match.
    pub discard: Vec<Card>,

    /// Uids holding a one-time shield against deactivation.
    pub shields: FxHashSet<Uid>,

    /// Current machine phase.
    pub phase: MatchPhase,

    /// Round number, starting at 1.
    pub round: u32,

    /// The match log.
    pub log: MatchLog,

    /// Injected randomness capability.
    pub rng: Box<dyn RandomSource>,

    next_uid: u32,
}

impl std::fmt::Debug for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchState")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("sides", &self.sides)
            .field("discard", &self.discard.len())
            .field("shields", &self.shields)
            .field("log", &self.log.len())
            .finish_non_exhaustive()
    }
}

impl MatchState {
    /// Create an idle match with empty containers.
    ///
    /// Hosts normally go through [`crate::rules::MatchBuilder`] instead.
    #[must_use]
    pub fn new(config: GameConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            sides: PlayerPair::with_default(),
            discard: Vec::new(),
            shields: FxHashSet::default(),
            phase: MatchPhase::Idle,
            round: 1,
            log: MatchLog::new(),
            rng,
            next_uid: 0,
        }
    }

    /// Instantiate a definition with the next fresh uid.
    pub fn instantiate(&mut self, def: &CardDefinition) -> Card {
        self.next_uid += 1;
        Card::from_definition(def, Uid::new(self.next_uid))
    }

    /// The player who may act, if any.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.phase {
            MatchPhase::PlayerTurn(p) | MatchPhase::EndingTurn(p) => Some(p),
            _ => None,
        }
    }

    /// Borrow a player's side.
    #[must_use]
    pub fn side(&self, player: PlayerId) -> &PlayerSide {
        &self.sides[player]
    }

    /// Borrow a player's side mutably.
    pub fn side_mut(&mut self, player: PlayerId) -> &mut PlayerSide {
        &mut self.sides[player]
    }

    /// Check if both players have passed this round.
    #[must_use]
    pub fn both_passed(&self) -> bool {
        self.sides[PlayerId::ONE].passed && self.sides[PlayerId::TWO].passed
    }

    /// A player's round score: the sum of net influence over
    /// non-deactivated foreign-lane units.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> i32 {
        self.sides[player]
            .foreign
            .iter()
            .filter(|c| c.is_unit() && c.is_active())
            .map(Card::net_influence)
            .sum()
    }

    /// Find a card in either player's three board lanes.
    ///
    /// Deliberately excludes the permanent slots and traps: disruption
    /// effects only reach lane cards.
    #[must_use]
    pub fn find_lane_card(&self, uid: Uid) -> Option<&Card> {
        PlayerId::both()
            .into_iter()
            .flat_map(|p| self.sides[p].lane_cards())
            .find(|c| c.uid == uid)
    }

    /// Mutable variant of [`Self::find_lane_card`].
    pub fn find_lane_card_mut(&mut self, uid: Uid) -> Option<&mut Card> {
        let (one, two) = self.sides.split_mut();
        one.lane_cards_mut()
            .chain(two.lane_cards_mut())
            .find(|c| c.uid == uid)
    }

    /// Find a card anywhere on either player's board, slots included.
    #[must_use]
    pub fn find_board_card(&self, uid: Uid) -> Option<&Card> {
        PlayerId::both()
            .into_iter()
            .flat_map(|p| self.sides[p].board_cards())
            .find(|c| c.uid == uid)
    }

    /// Pop the top card of a player's deck.
    pub(crate) fn pop_deck(&mut self, player: PlayerId) -> Option<Card> {
        self.sides[player].deck.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;
    use crate::core::GameRng;

    fn state() -> MatchState {
        MatchState::new(GameConfig::default(), Box::new(GameRng::seeded(42)))
    }

    fn unit(influence: i32) -> CardDefinition {
        CardDefinition::unit(90, "test_unit", "Test Unit", influence, Lane::Foreign)
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = state();
        assert_eq!(state.phase, MatchPhase::Idle);
        assert_eq!(state.round, 1);
        assert_eq!(state.current_player(), None);
        assert!(state.discard.is_empty());
    }

    #[test]
    fn test_instantiate_allocates_increasing_uids() {
        let mut state = state();
        let def = unit(3);

        let a = state.instantiate(&def);
        let b = state.instantiate(&def);

        assert!(b.uid > a.uid);
    }

    #[test]
    fn test_score_skips_deactivated_units() {
        let mut state = state();
        let def = unit(3);
        let active = state.instantiate(&def);
        let mut inactive = state.instantiate(&def);
        inactive.deactivated = true;

        state.sides[PlayerId::ONE].foreign.push(active);
        state.sides[PlayerId::ONE].foreign.push(inactive);

        assert_eq!(state.score(PlayerId::ONE), 3);
        assert_eq!(state.score(PlayerId::TWO), 0);
    }

    #[test]
    fn test_find_lane_card_spans_both_players() {
        let mut state = state();
        let def = unit(1);
        let mine = state.instantiate(&def);
        let theirs = state.instantiate(&def);
        let mine_uid = mine.uid;
        let theirs_uid = theirs.uid;

        state.sides[PlayerId::ONE].home.push(mine);
        state.sides[PlayerId::TWO].pending = Some(theirs);

        assert!(state.find_lane_card(mine_uid).is_some());
        assert!(state.find_lane_card(theirs_uid).is_some());
        assert!(state.find_lane_card(Uid::new(999)).is_none());

        state.find_lane_card_mut(theirs_uid).unwrap().deactivated = true;
        assert!(!state.sides[PlayerId::TWO].pending.as_ref().unwrap().is_active());
    }

    #[test]
    fn test_board_card_includes_slots_but_lane_card_does_not() {
        let mut state = state();
        let def = CardDefinition::special(91, "test_ongoing", "Test Ongoing", crate::cards::SpecialKind::Ongoing);
        let card = state.instantiate(&def);
        let uid = card.uid;

        state.sides[PlayerId::ONE].government = Some(card);

        assert!(state.find_board_card(uid).is_some());
        assert!(state.find_lane_card(uid).is_none());
    }

    #[test]
    fn test_both_passed() {
        let mut state = state();
        assert!(!state.both_passed());

        state.sides[PlayerId::ONE].passed = true;
        assert!(!state.both_passed());

        state.sides[PlayerId::TWO].passed = true;
        assert!(state.both_passed());
    }
}
