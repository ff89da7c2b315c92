//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type: its
//! identity, kind, printed influence, lane affinity, and intrinsic
//! refund. Instance-specific data (buffs, deactivation, the ability-used
//! marker) is stored separately in [`crate::cards::Card`].

use serde::Serialize;

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Trade Envoy"),
/// not a specific instance in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A board lane a unit can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Lane {
    /// The support row. Cards here radiate auras but never score.
    Home,
    /// The scoring row. Round scores sum net influence here.
    Foreign,
}

/// Classification of a special card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SpecialKind {
    /// Occupies the government slot for the rest of the round.
    Ongoing,
    /// Occupies the single pending slot; resolves on explicit activation.
    Instant,
    /// Occupies the public-office slot for the rest of the round.
    Public,
    /// Registered face-down; resolves when the opponent activates an instant.
    Trap,
}

/// What a card is: a unit with printed influence and a lane affinity,
/// or a special with a classification and an optional synergy tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CardKind {
    Unit {
        influence: i32,
        affinity: Lane,
        protected: bool,
    },
    Special {
        kind: SpecialKind,
        tag: Option<&'static str>,
    },
}

/// Static card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Stable machine key, matched by the effect dispatcher.
    pub key: &'static str,

    /// Display name.
    pub name: &'static str,

    /// Unit or special, with kind-specific data.
    pub kind: CardKind,

    /// Card-intrinsic action-point refund when played (instants only in
    /// the standard catalog, but not restricted by construction).
    pub refund: i32,
}

impl CardDefinition {
    /// Define a unit.
    #[must_use]
    pub const fn unit(
        id: u32,
        key: &'static str,
        name: &'static str,
        influence: i32,
        affinity: Lane,
    ) -> Self {
        Self {
            id: CardId::new(id),
            key,
            name,
            kind: CardKind::Unit {
                influence,
                affinity,
                protected: false,
            },
            refund: 0,
        }
    }

    /// Define a special.
    #[must_use]
    pub const fn special(id: u32, key: &'static str, name: &'static str, kind: SpecialKind) -> Self {
        Self {
            id: CardId::new(id),
            key,
            name,
            kind: CardKind::Special { kind, tag: None },
            refund: 0,
        }
    }

    /// Mark a unit as protected (builder pattern).
    #[must_use]
    pub const fn protected(mut self) -> Self {
        if let CardKind::Unit {
            influence,
            affinity,
            ..
        } = self.kind
        {
            self.kind = CardKind::Unit {
                influence,
                affinity,
                protected: true,
            };
        }
        self
    }

    /// Attach a synergy tag to a special (builder pattern).
    #[must_use]
    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        if let CardKind::Special { kind, .. } = self.kind {
            self.kind = CardKind::Special {
                kind,
                tag: Some(tag),
            };
        }
        self
    }

    /// Set the intrinsic refund (builder pattern).
    #[must_use]
    pub const fn with_refund(mut self, refund: i32) -> Self {
        self.refund = refund;
        self
    }
}
