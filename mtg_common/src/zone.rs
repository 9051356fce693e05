//! Deck zones and zone-qualified card identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CardIdError;

/// The part of a deck a card belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    Mainboard,
    Sideboard,
}

impl Zone {
    /// Length of every zone prefix ("MB:", "SB:")
    pub const PREFIX_LEN: usize = 3;

    /// Returns the identifier prefix for this zone
    pub fn prefix(&self) -> &'static str {
        match self {
            Zone::Mainboard => "MB:",
            Zone::Sideboard => "SB:",
        }
    }

    /// Returns the lowercase zone name used in saved files ("mainboard", "sideboard")
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Mainboard => "mainboard",
            Zone::Sideboard => "sideboard",
        }
    }

    /// Parse an identifier prefix (e.g. "MB:") into a Zone
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "MB:" => Some(Zone::Mainboard),
            "SB:" => Some(Zone::Sideboard),
            _ => None,
        }
    }

    /// Returns both zones, mainboard first
    pub fn all() -> &'static [Zone] {
        &[Zone::Mainboard, Zone::Sideboard]
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card name qualified by its zone, e.g. `MB:Lightning Bolt`.
///
/// The same card name can live in both zones; the prefix keeps the two
/// entries apart when they share a map. Ordering is plain string ordering of
/// the identifier, so every mainboard identifier sorts before every
/// sideboard identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    /// Build an identifier for `name` in `zone`
    pub fn new(zone: Zone, name: &str) -> Self {
        CardId(format!("{}{}", zone.prefix(), name))
    }

    /// Parse a prefixed identifier, rejecting unknown prefixes and empty names
    pub fn parse(raw: &str) -> Result<Self, CardIdError> {
        let prefix = raw
            .get(..Zone::PREFIX_LEN)
            .ok_or_else(|| CardIdError::MissingPrefix(raw.to_string()))?;
        if Zone::from_prefix(prefix).is_none() {
            return Err(CardIdError::MissingPrefix(raw.to_string()));
        }
        if raw[Zone::PREFIX_LEN..].is_empty() {
            return Err(CardIdError::EmptyName(raw.to_string()));
        }
        Ok(CardId(raw.to_string()))
    }

    pub fn zone(&self) -> Zone {
        if self.0.starts_with(Zone::Sideboard.prefix()) {
            Zone::Sideboard
        } else {
            Zone::Mainboard
        }
    }

    /// The human-readable card name (identifier without its zone prefix)
    pub fn label(&self) -> &str {
        &self.0[Zone::PREFIX_LEN..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CardId {
    type Error = CardIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CardId::parse(&value)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_prefixes_zone() {
        assert_eq!(
            CardId::new(Zone::Mainboard, "Lightning Bolt").as_str(),
            "MB:Lightning Bolt"
        );
        assert_eq!(
            CardId::new(Zone::Sideboard, "Prismatic Ending").as_str(),
            "SB:Prismatic Ending"
        );
    }

    #[test]
    fn test_same_name_in_both_zones_is_distinct() {
        let main = CardId::new(Zone::Mainboard, "Dismember");
        let side = CardId::new(Zone::Sideboard, "Dismember");
        assert_ne!(main, side);
        assert_eq!(main.label(), side.label());
    }

    #[test]
    fn test_zone_and_label() {
        let id = CardId::parse("SB:Boseiju, Who Endures").unwrap();
        assert_eq!(id.zone(), Zone::Sideboard);
        assert_eq!(id.label(), "Boseiju, Who Endures");
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        assert_eq!(
            CardId::parse("Lightning Bolt"),
            Err(CardIdError::MissingPrefix("Lightning Bolt".to_string()))
        );
        assert!(CardId::parse("XB:Lightning Bolt").is_err());
        assert!(CardId::parse("MB").is_err());
        assert!(CardId::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        assert_eq!(
            CardId::parse("MB:"),
            Err(CardIdError::EmptyName("MB:".to_string()))
        );
    }

    #[test]
    fn test_mainboard_sorts_before_sideboard() {
        let mut ids = vec![
            CardId::new(Zone::Sideboard, "Abrade"),
            CardId::new(Zone::Mainboard, "Thoughtseize"),
            CardId::new(Zone::Mainboard, "Fable of the Mirror-Breaker"),
        ];
        ids.sort();
        let raw: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(
            raw,
            vec!["MB:Fable of the Mirror-Breaker", "MB:Thoughtseize", "SB:Abrade"]
        );
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = CardId::new(Zone::Mainboard, "Ragavan, Nimble Pilferer");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""MB:Ragavan, Nimble Pilferer""#);

        let back: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_serde_rejects_unprefixed_key() {
        let result: Result<std::collections::BTreeMap<CardId, u32>, _> =
            serde_json::from_str(r#"{"Lightning Bolt": 4}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_zone_prefix_round_trip() {
        for zone in Zone::all() {
            assert_eq!(Zone::from_prefix(zone.prefix()), Some(*zone));
            assert_eq!(zone.prefix().len(), Zone::PREFIX_LEN);
        }
        assert_eq!(Zone::from_prefix("CM:"), None);
    }
}
