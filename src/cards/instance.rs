//! Card instances - runtime card state.
//!
//! A `Card` is a specific copy of a definition in a specific match. Its
//! identity (`uid`) is assigned once at instantiation and never
//! reassigned; its status fields (buffs, deactivation, the one-shot
//! ability marker) mutate freely as the match unfolds.
//!
//! Buffs and debuffs are kept as separate non-negative counters and
//! netted only at read time via [`Card::net_influence`].

use serde::Serialize;

use super::definition::{CardDefinition, CardId, CardKind, Lane, SpecialKind};

/// Match-unique card identity, assigned at instantiation.
///
/// Uids are allocated in play order, so a higher uid means the card was
/// instantiated later — the tie-break key for "strongest unit" queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Uid(pub u32);

impl Uid {
    /// Create a uid.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Match-unique identity. Never reassigned.
    pub uid: Uid,

    /// Definition identity.
    pub id: CardId,

    /// Stable machine key, matched by the effect dispatcher.
    pub key: &'static str,

    /// Display name.
    pub name: &'static str,

    /// Unit or special, with kind-specific data.
    pub kind: CardKind,

    /// Card-intrinsic action-point refund.
    pub refund: i32,

    /// Temporary positive influence counters.
    pub buffs: i32,

    /// Temporary negative influence counters.
    pub debuffs: i32,

    /// Protected units ignore deactivation.
    pub protected: bool,

    /// Deactivated cards neither score nor radiate auras.
    pub deactivated: bool,

    /// One-shot ability marker (e.g. the once-per-round platform bonus).
    pub ability_used: bool,
}

impl Card {
    /// Instantiate a definition with a fresh uid.
    #[must_use]
    pub fn from_definition(def: &CardDefinition, uid: Uid) -> Self {
        let protected = matches!(def.kind, CardKind::Unit { protected: true, .. });
        Self {
            uid,
            id: def.id,
            key: def.key,
            name: def.name,
            kind: def.kind,
            refund: def.refund,
            buffs: 0,
            debuffs: 0,
            protected,
            deactivated: false,
            ability_used: false,
        }
    }

    /// Check if this card is a unit.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        matches!(self.kind, CardKind::Unit { .. })
    }

    /// The special classification, if this card is a special.
    #[must_use]
    pub fn special_kind(&self) -> Option<SpecialKind> {
        match self.kind {
            CardKind::Special { kind, .. } => Some(kind),
            CardKind::Unit { .. } => None,
        }
    }

    /// The synergy tag, if this card is a tagged special.
    #[must_use]
    pub fn tag(&self) -> Option<&'static str> {
        match self.kind {
            CardKind::Special { tag, .. } => tag,
            CardKind::Unit { .. } => None,
        }
    }

    /// The lane a unit is drawn to by affinity.
    #[must_use]
    pub fn affinity(&self) -> Option<Lane> {
        match self.kind {
            CardKind::Unit { affinity, .. } => Some(affinity),
            CardKind::Special { .. } => None,
        }
    }

    /// Printed influence (0 for specials).
    #[must_use]
    pub fn base_influence(&self) -> i32 {
        match self.kind {
            CardKind::Unit { influence, .. } => influence,
            CardKind::Special { .. } => 0,
        }
    }

    /// Influence after temporary counters: `base + buffs - debuffs`.
    #[must_use]
    pub fn net_influence(&self) -> i32 {
        self.base_influence() + self.buffs - self.debuffs
    }

    /// Check if this card counts for scoring and aura derivation.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.deactivated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envoy() -> CardDefinition {
        CardDefinition::unit(1, "envoy", "Envoy", 3, Lane::Foreign)
    }

    #[test]
    fn test_instantiation_copies_definition() {
        let card = Card::from_definition(&envoy(), Uid::new(10));

        assert_eq!(card.uid, Uid::new(10));
        assert_eq!(card.name, "Envoy");
        assert!(card.is_unit());
        assert_eq!(card.affinity(), Some(Lane::Foreign));
        assert!(card.is_active());
        assert!(!card.ability_used);
    }

    #[test]
    fn test_protected_flows_from_definition() {
        let def = envoy().protected();
        let card = Card::from_definition(&def, Uid::new(1));
        assert!(card.protected);
    }

    #[test]
    fn test_net_influence_nets_at_read_time() {
        let mut card = Card::from_definition(&envoy(), Uid::new(1));

        card.buffs += 2;
        card.debuffs += 1;

        // Counters stay separate; only the read is netted.
        assert_eq!(card.buffs, 2);
        assert_eq!(card.debuffs, 1);
        assert_eq!(card.net_influence(), 3 + 2 - 1);
    }

    #[test]
    fn test_special_accessors() {
        let def = CardDefinition::special(2, "rally", "Rally", SpecialKind::Instant)
            .with_tag("health");
        let card = Card::from_definition(&def, Uid::new(2));

        assert!(!card.is_unit());
        assert_eq!(card.special_kind(), Some(SpecialKind::Instant));
        assert_eq!(card.tag(), Some("health"));
        assert_eq!(card.base_influence(), 0);
    }

    #[test]
    fn test_uid_ordering() {
        assert!(Uid::new(5) > Uid::new(4));
        assert_eq!(format!("{}", Uid::new(7)), "#7");
    }
}
