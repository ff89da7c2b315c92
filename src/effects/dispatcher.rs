//! The card-to-events dispatch table.
//!
//! [`dispatch`] is a pure function of `(state, player, card)`: its only
//! observable effect is appending zero or more events to the pending
//! queue. It performs no state mutation and no side effects itself.
//!
//! Cards are matched by machine key against a closed table; an unmatched
//! key appends nothing — a silent no-op by design, not an error. Each
//! entry is a fixed, ordered list: ordering matters because later
//! events' log lines should read after earlier ones.
//!
//! Entries that need a target resolve it **now**, at enqueue time, and
//! bake the uid into the event. The target is "the strongest unit when
//! the card resolves", not "whatever is strongest when the queue later
//! drains".

use smallvec::{smallvec, SmallVec};

use crate::cards::catalog::keys;
use crate::cards::Card;
use crate::core::PlayerId;
use crate::state::MatchState;

use super::event::EffectEvent;
use super::queue::EffectQueue;
use super::targeting::strongest_foreign_uid;

/// Append `card`'s effect entry (possibly empty) to the queue.
pub fn dispatch(state: &MatchState, player: PlayerId, card: &Card, queue: &mut EffectQueue) {
    queue.extend_back(effects_for(state, player, card));
}

fn effects_for(state: &MatchState, player: PlayerId, card: &Card) -> SmallVec<[EffectEvent; 4]> {
    let opponent = player.opponent();

    match card.key {
        // === Foreign-lane units with on-play entries ===
        keys::TRADE_ENVOY => smallvec![
            EffectEvent::draw(player, 1),
            EffectEvent::log("The Trade Envoy opens a new channel."),
        ],
        keys::FIELD_ORGANIZER => smallvec![
            EffectEvent::add_ap(player, 1),
            EffectEvent::log("The Field Organizer gets out the vote."),
        ],
        keys::YOUNG_ACTIVIST => smallvec![
            EffectEvent::draw(player, 1),
            EffectEvent::add_ap(player, 1),
            EffectEvent::log("The Young Activist energizes the base."),
        ],

        // === Ongoing and public specials ===
        keys::NATIONAL_BUDGET => smallvec![
            EffectEvent::add_ap(player, 2),
            EffectEvent::log("The National Budget passes."),
        ],
        keys::PUBLIC_BROADCAST => smallvec![
            EffectEvent::draw(player, 1),
            EffectEvent::log("The Public Broadcast reaches every household."),
        ],

        // === Instants (resolved on activation) ===
        keys::EMERGENCY_SESSION => smallvec![
            EffectEvent::InitiativeActivated { player },
            EffectEvent::add_ap(player, 2),
            EffectEvent::log("The Emergency Session convenes."),
        ],
        keys::DIPLOMATIC_SUMMIT => smallvec![
            EffectEvent::InitiativeActivated { player },
            EffectEvent::draw(player, 2),
            EffectEvent::log("The Diplomatic Summit concludes."),
        ],
        keys::SMEAR_CAMPAIGN => smallvec![
            EffectEvent::InitiativeActivated { player },
            EffectEvent::DiscardRandomFromHand {
                player: opponent,
                count: 1,
            },
            EffectEvent::log("The Smear Campaign lands."),
        ],
        keys::MEDIA_BLACKOUT => smallvec![
            EffectEvent::InitiativeActivated { player },
            EffectEvent::DeactivateRandomHand {
                player: opponent,
                count: 2,
            },
            EffectEvent::log("The Media Blackout silences the opposition."),
        ],
        keys::VOTE_OF_NO_CONFIDENCE => {
            let mut events: SmallVec<[EffectEvent; 4]> =
                smallvec![EffectEvent::InitiativeActivated { player }];
            if let Some(target) = strongest_foreign_uid(&state.sides[opponent]) {
                events.push(EffectEvent::DeactivateCard { target });
            }
            events.push(EffectEvent::log("The Vote of No Confidence is called."));
            events
        }
        keys::SECURITY_DETAIL => {
            let mut events: SmallVec<[EffectEvent; 4]> =
                smallvec![EffectEvent::InitiativeActivated { player }];
            if let Some(target) = strongest_foreign_uid(&state.sides[player]) {
                events.push(EffectEvent::GrantShield { target });
            }
            events.push(EffectEvent::log("The Security Detail takes position."));
            events
        }
        keys::RALLY => smallvec![
            EffectEvent::InitiativeActivated { player },
            EffectEvent::buff(player, 2),
            EffectEvent::log("The Rally draws a crowd."),
        ],

        // === Trap (resolved when sprung) ===
        keys::COUNTERINTELLIGENCE => smallvec![
            EffectEvent::DiscardRandomFromHand {
                player: opponent,
                count: 1,
            },
            EffectEvent::log("Counterintelligence exposes a plan."),
        ],

        // Unmatched cards enqueue nothing.
        _ => smallvec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, Catalog, Lane};
    use crate::core::{GameConfig, GameRng};

    fn state() -> MatchState {
        MatchState::new(GameConfig::default(), Box::new(GameRng::seeded(3)))
    }

    fn card(state: &mut MatchState, key: &str) -> Card {
        let catalog = Catalog::standard();
        state.instantiate(catalog.get(key).unwrap())
    }

    #[test]
    fn test_dispatch_appends_only() {
        let mut state = state();
        let envoy = card(&mut state, keys::TRADE_ENVOY);
        let mut queue = EffectQueue::new();
        queue.push_back(EffectEvent::log("already queued"));

        dispatch(&state, PlayerId::ONE, &envoy, &mut queue);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop_front(), Some(EffectEvent::log("already queued")));
        assert_eq!(queue.pop_front(), Some(EffectEvent::draw(PlayerId::ONE, 1)));
    }

    #[test]
    fn test_unmatched_card_is_a_silent_no_op() {
        let mut state = state();
        let stamp = card(&mut state, keys::COMMEMORATIVE_STAMP);
        let mut queue = EffectQueue::new();

        dispatch(&state, PlayerId::ONE, &stamp, &mut queue);

        assert!(queue.is_empty());
    }

    #[test]
    fn test_entry_order_is_fixed() {
        let mut state = state();
        let activist = card(&mut state, keys::YOUNG_ACTIVIST);
        let mut queue = EffectQueue::new();

        dispatch(&state, PlayerId::ONE, &activist, &mut queue);

        assert_eq!(queue.pop_front(), Some(EffectEvent::draw(PlayerId::ONE, 1)));
        assert_eq!(queue.pop_front(), Some(EffectEvent::add_ap(PlayerId::ONE, 1)));
        assert!(matches!(queue.pop_front(), Some(EffectEvent::Log { .. })));
    }

    #[test]
    fn test_instants_lead_with_initiative() {
        let mut state = state();
        let session = card(&mut state, keys::EMERGENCY_SESSION);
        let mut queue = EffectQueue::new();

        dispatch(&state, PlayerId::TWO, &session, &mut queue);

        assert_eq!(
            queue.pop_front(),
            Some(EffectEvent::InitiativeActivated { player: PlayerId::TWO })
        );
    }

    #[test]
    fn test_targets_resolve_at_enqueue_time() {
        let mut state = state();
        let weak = state.instantiate(&CardDefinition::unit(70, "w", "Weak", 2, Lane::Foreign));
        let strong = state.instantiate(&CardDefinition::unit(71, "s", "Strong", 5, Lane::Foreign));
        let strong_uid = strong.uid;
        state.sides[PlayerId::TWO].foreign.push(weak);
        state.sides[PlayerId::TWO].foreign.push(strong);

        let vote = card(&mut state, keys::VOTE_OF_NO_CONFIDENCE);
        let mut queue = EffectQueue::new();
        dispatch(&state, PlayerId::ONE, &vote, &mut queue);

        queue.pop_front(); // InitiativeActivated
        assert_eq!(
            queue.pop_front(),
            Some(EffectEvent::DeactivateCard { target: strong_uid })
        );
    }

    #[test]
    fn test_target_entry_skips_missing_target() {
        let mut state = state();
        let vote = card(&mut state, keys::VOTE_OF_NO_CONFIDENCE);
        let mut queue = EffectQueue::new();

        dispatch(&state, PlayerId::ONE, &vote, &mut queue);

        // InitiativeActivated + summary log, no DeactivateCard.
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_dispatch_mutates_nothing() {
        let mut state = state();
        let in_deck = state.instantiate(&CardDefinition::unit(72, "d", "Decked", 1, Lane::Foreign));
        state.sides[PlayerId::ONE].deck.push(in_deck);
        let envoy = card(&mut state, keys::TRADE_ENVOY);
        let mut queue = EffectQueue::new();

        dispatch(&state, PlayerId::ONE, &envoy, &mut queue);

        // The draw is queued, not performed.
        assert_eq!(state.sides[PlayerId::ONE].deck.len(), 1);
        assert!(state.sides[PlayerId::ONE].hand.is_empty());
        assert!(state.log.is_empty());
    }
}
