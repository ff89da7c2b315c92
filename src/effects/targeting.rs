//! Pure targeting queries over board state.
//!
//! No mutation, no randomness: given the same board, the same answer.

use crate::cards::{Card, Uid};
use crate::state::PlayerSide;

/// The strongest eligible foreign-lane unit: highest net influence among
/// non-deactivated units, ties broken by the highest uid (the card
/// placed most recently).
#[must_use]
pub fn strongest_foreign_unit(side: &PlayerSide) -> Option<&Card> {
    side.foreign
        .iter()
        .filter(|c| c.is_unit() && c.is_active())
        .max_by_key(|c| (c.net_influence(), c.uid))
}

/// Uid of the strongest eligible foreign-lane unit.
#[must_use]
pub fn strongest_foreign_uid(side: &PlayerSide) -> Option<Uid> {
    strongest_foreign_unit(side).map(|c| c.uid)
}
