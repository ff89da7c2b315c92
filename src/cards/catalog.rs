//! The closed card catalog.
//!
//! All card behavior in the engine keys off the stable machine keys
//! defined here: the aura recomputation scans home lanes for them and
//! the effect dispatcher maps them to event lists. A key absent from the
//! dispatcher table plays with no effects — that is a designed no-op,
//! not an error.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, Lane, SpecialKind};

/// Stable machine keys for the standard catalog.
pub mod keys {
    // Home-lane units (aura sources)
    pub const CHIEF_STRATEGIST: &str = "chief_strategist";
    pub const PRESS_SECRETARY: &str = "press_secretary";
    pub const TREASURER: &str = "treasurer";
    pub const SHADOW_DIPLOMAT: &str = "shadow_diplomat";
    pub const SCIENCE_ADVISER: &str = "science_adviser";
    pub const SURGEON_GENERAL: &str = "surgeon_general";
    pub const DEFENSE_MINISTER: &str = "defense_minister";
    pub const CAMPAIGN_MANAGER: &str = "campaign_manager";
    pub const GRASSROOTS_PLATFORM: &str = "grassroots_platform";
    pub const SABOTEUR: &str = "saboteur";

    // Foreign-lane units (scorers)
    pub const AMBASSADOR: &str = "ambassador";
    pub const VETERAN_SENATOR: &str = "veteran_senator";
    pub const IRON_CHANCELLOR: &str = "iron_chancellor";
    pub const PROVINCIAL_GOVERNOR: &str = "provincial_governor";
    pub const TRADE_ENVOY: &str = "trade_envoy";
    pub const FIELD_ORGANIZER: &str = "field_organizer";
    pub const YOUNG_ACTIVIST: &str = "young_activist";

    // Specials
    pub const NATIONAL_BUDGET: &str = "national_budget";
    pub const PUBLIC_BROADCAST: &str = "public_broadcast";
    pub const COMMEMORATIVE_STAMP: &str = "commemorative_stamp";
    pub const EMERGENCY_SESSION: &str = "emergency_session";
    pub const DIPLOMATIC_SUMMIT: &str = "diplomatic_summit";
    pub const SMEAR_CAMPAIGN: &str = "smear_campaign";
    pub const MEDIA_BLACKOUT: &str = "media_blackout";
    pub const VOTE_OF_NO_CONFIDENCE: &str = "vote_of_no_confidence";
    pub const SECURITY_DETAIL: &str = "security_detail";
    pub const RALLY: &str = "rally";
    pub const COUNTERINTELLIGENCE: &str = "counterintelligence";
}

/// Synergy tag labels.
pub mod tags {
    pub const SCIENCE: &str = "science";
    pub const HEALTH: &str = "health";
    pub const MILITARY: &str = "military";
}

const STANDARD: &[CardDefinition] = &[
    // Home-lane units
    CardDefinition::unit(1, keys::CHIEF_STRATEGIST, "Chief Strategist", 2, Lane::Home),
    CardDefinition::unit(2, keys::PRESS_SECRETARY, "Press Secretary", 1, Lane::Home),
    CardDefinition::unit(3, keys::TREASURER, "Treasurer", 1, Lane::Home),
    CardDefinition::unit(4, keys::SHADOW_DIPLOMAT, "Shadow Diplomat", 2, Lane::Home),
    CardDefinition::unit(5, keys::SCIENCE_ADVISER, "Science Adviser", 1, Lane::Home),
    CardDefinition::unit(6, keys::SURGEON_GENERAL, "Surgeon General", 1, Lane::Home),
    CardDefinition::unit(7, keys::DEFENSE_MINISTER, "Defense Minister", 2, Lane::Home),
    CardDefinition::unit(8, keys::CAMPAIGN_MANAGER, "Campaign Manager", 1, Lane::Home),
    CardDefinition::unit(9, keys::GRASSROOTS_PLATFORM, "Grassroots Platform", 1, Lane::Home),
    CardDefinition::unit(10, keys::SABOTEUR, "Saboteur", 1, Lane::Home),
    // Foreign-lane units
    CardDefinition::unit(11, keys::AMBASSADOR, "Ambassador", 4, Lane::Foreign),
    CardDefinition::unit(12, keys::VETERAN_SENATOR, "Veteran Senator", 5, Lane::Foreign).protected(),
    CardDefinition::unit(13, keys::IRON_CHANCELLOR, "Iron Chancellor", 6, Lane::Foreign),
    CardDefinition::unit(14, keys::PROVINCIAL_GOVERNOR, "Provincial Governor", 3, Lane::Foreign),
    CardDefinition::unit(15, keys::TRADE_ENVOY, "Trade Envoy", 3, Lane::Foreign),
    CardDefinition::unit(16, keys::FIELD_ORGANIZER, "Field Organizer", 2, Lane::Foreign),
    CardDefinition::unit(17, keys::YOUNG_ACTIVIST, "Young Activist", 1, Lane::Foreign),
    // Specials
    CardDefinition::special(18, keys::NATIONAL_BUDGET, "National Budget", SpecialKind::Ongoing),
    CardDefinition::special(19, keys::PUBLIC_BROADCAST, "Public Broadcast", SpecialKind::Public),
    CardDefinition::special(
        20,
        keys::COMMEMORATIVE_STAMP,
        "Commemorative Stamp",
        SpecialKind::Public,
    ),
    CardDefinition::special(21, keys::EMERGENCY_SESSION, "Emergency Session", SpecialKind::Instant),
    CardDefinition::special(22, keys::DIPLOMATIC_SUMMIT, "Diplomatic Summit", SpecialKind::Instant)
        .with_tag(tags::SCIENCE)
        .with_refund(1),
    CardDefinition::special(23, keys::SMEAR_CAMPAIGN, "Smear Campaign", SpecialKind::Instant),
    CardDefinition::special(24, keys::MEDIA_BLACKOUT, "Media Blackout", SpecialKind::Instant),
    CardDefinition::special(
        25,
        keys::VOTE_OF_NO_CONFIDENCE,
        "Vote of No Confidence",
        SpecialKind::Instant,
    ),
    CardDefinition::special(26, keys::SECURITY_DETAIL, "Security Detail", SpecialKind::Instant)
        .with_tag(tags::MILITARY),
    CardDefinition::special(27, keys::RALLY, "Rally", SpecialKind::Instant).with_tag(tags::HEALTH),
    CardDefinition::special(
        28,
        keys::COUNTERINTELLIGENCE,
        "Counterintelligence",
        SpecialKind::Trap,
    ),
];

/// Registry of card definitions, looked up by machine key.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    by_key: FxHashMap<&'static str, CardDefinition>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard closed catalog.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for def in STANDARD {
            catalog.register(*def);
        }
        catalog
    }

    /// Register a definition.
    ///
    /// Panics if the key is already registered.
    pub fn register(&mut self, def: CardDefinition) {
        if self.by_key.contains_key(def.key) {
            panic!("Card key {:?} already registered", def.key);
        }
        self.by_key.insert(def.key, def);
    }

    /// Look up a definition by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CardDefinition> {
        self.by_key.get(key)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.by_key.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::CardKind;

    #[test]
    fn test_standard_catalog_is_closed_and_consistent() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), STANDARD.len());

        // Ids are unique.
        let mut ids: Vec<_> = catalog.iter().map(|d| d.id).collect();
        ids.sort_by_key(|id| id.raw());
        ids.dedup();
        assert_eq!(ids.len(), STANDARD.len());
    }

    #[test]
    fn test_lookup_by_key() {
        let catalog = Catalog::standard();

        let envoy = catalog.get(keys::TRADE_ENVOY).unwrap();
        assert_eq!(envoy.name, "Trade Envoy");
        assert!(matches!(envoy.kind, CardKind::Unit { influence: 3, .. }));

        assert!(catalog.get("no_such_card").is_none());
    }

    #[test]
    fn test_senator_is_protected() {
        let catalog = Catalog::standard();
        let senator = catalog.get(keys::VETERAN_SENATOR).unwrap();
        assert!(matches!(senator.kind, CardKind::Unit { protected: true, .. }));
    }

    #[test]
    fn test_summit_refund_and_tag() {
        let catalog = Catalog::standard();
        let summit = catalog.get(keys::DIPLOMATIC_SUMMIT).unwrap();
        assert_eq!(summit.refund, 1);
        assert!(matches!(
            summit.kind,
            CardKind::Special {
                kind: SpecialKind::Instant,
                tag: Some("science"),
            }
        ));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_key_panics() {
        let mut catalog = Catalog::standard();
        catalog.register(CardDefinition::unit(99, keys::AMBASSADOR, "Copy", 1, Lane::Home));
    }
}
