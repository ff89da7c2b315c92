//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe identifier for exactly two players. The duel never has more
//! or fewer, so `opponent()` is total and allocation-free.
//!
//! ## PlayerPair
//!
//! Per-player data storage backed by a fixed `[T; 2]` with O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players in a duel.
///
/// Player indices are 0-based: the first player is `PlayerId::ONE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The first player.
    pub const ONE: PlayerId = PlayerId(0);
    /// The second player.
    pub const TWO: PlayerId = PlayerId(1);

    /// Create a player ID from a 0-based index.
    ///
    /// Panics if `index` is not 0 or 1.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 2, "A duel has exactly two players");
        Self(index)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both players, first player first.
    #[must_use]
    pub const fn both() -> [PlayerId; 2] {
        [Self::ONE, Self::TWO]
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `[T; 2]` with one entry per player.
///
/// ## Example
///
/// ```
/// use statecraft::core::{PlayerId, PlayerPair};
///
/// let mut ap: PlayerPair<i32> = PlayerPair::with_value(3);
///
/// assert_eq!(ap[PlayerId::ONE], 3);
///
/// ap[PlayerId::TWO] = 5;
/// assert_eq!(ap[PlayerId::TWO], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create a new pair with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each entry.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a new pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new pair with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::both().into_iter().zip(self.data.iter_mut())
    }

    /// Borrow both entries mutably at once, first player first.
    pub fn split_mut(&mut self) -> (&mut T, &mut T) {
        let [one, two] = &mut self.data;
        (one, two)
    }
}

impl<T> Index<PlayerId> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::ONE.index(), 0);
        assert_eq!(PlayerId::TWO.index(), 1);
        assert_eq!(format!("{}", PlayerId::ONE), "Player 0");
    }

    #[test]
    fn test_opponent_is_involutive() {
        assert_eq!(PlayerId::ONE.opponent(), PlayerId::TWO);
        assert_eq!(PlayerId::TWO.opponent(), PlayerId::ONE);
        assert_eq!(PlayerId::ONE.opponent().opponent(), PlayerId::ONE);
    }

    #[test]
    fn test_pair_new_with_factory() {
        let pair: PlayerPair<usize> = PlayerPair::new(|p| p.index() * 10);

        assert_eq!(pair[PlayerId::ONE], 0);
        assert_eq!(pair[PlayerId::TWO], 10);
    }

    #[test]
    fn test_pair_mutation() {
        let mut pair: PlayerPair<i32> = PlayerPair::with_value(0);

        pair[PlayerId::ONE] = 10;
        pair[PlayerId::TWO] = 20;

        assert_eq!(pair[PlayerId::ONE], 10);
        assert_eq!(pair[PlayerId::TWO], 20);
    }

    #[test]
    fn test_pair_iter() {
        let pair: PlayerPair<i32> = PlayerPair::new(|p| p.index() as i32);

        let entries: Vec<_> = pair.iter().collect();
        assert_eq!(entries, vec![(PlayerId::ONE, &0), (PlayerId::TWO, &1)]);
    }

    #[test]
    fn test_pair_serialization() {
        let pair: PlayerPair<i32> = PlayerPair::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: PlayerPair<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, deserialized);
    }

    #[test]
    #[should_panic(expected = "exactly two players")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(2);
    }
}
