//! Deck namespacing.
//!
//! Turns the raw per-zone card counts produced by the decklist parser into a
//! [`Deck`] keyed by zone-qualified [`CardId`]s, plus the [`CardLabels`]
//! used for every display and export.

use mtg_common::{CardCounts, CardId, Zone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Card identifier -> number of copies, for one zone
pub type ZoneCounts = BTreeMap<CardId, u32>;

/// A submitted deck. Treated as locked until the session is reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub mainboard: ZoneCounts,
    pub sideboard: ZoneCounts,
}

impl Deck {
    pub fn zone(&self, zone: Zone) -> &ZoneCounts {
        match zone {
            Zone::Mainboard => &self.mainboard,
            Zone::Sideboard => &self.sideboard,
        }
    }

    /// Copies owned of `card`, looked up in the card's own zone
    pub fn quantity(&self, card: &CardId) -> Option<u32> {
        self.zone(card.zone()).get(card).copied()
    }

    pub fn contains(&self, card: &CardId) -> bool {
        self.quantity(card).is_some()
    }

    /// Total number of copies in one zone, widened so any quantities fit
    pub fn card_count(&self, zone: Zone) -> u64 {
        self.zone(zone).values().map(|&n| u64::from(n)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.mainboard.is_empty() && self.sideboard.is_empty()
    }

    /// Zones without a single card, mainboard first
    pub fn empty_zones(&self) -> Vec<Zone> {
        Zone::all()
            .iter()
            .copied()
            .filter(|zone| self.zone(*zone).is_empty())
            .collect()
    }

    /// Render one zone back to decklist text ("4 Lightning Bolt" per line)
    pub fn decklist_text(&self, zone: Zone, labels: &CardLabels) -> String {
        self.zone(zone)
            .iter()
            .map(|(card, quantity)| format!("{} {}", quantity, labels.get(card)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Display names for card identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardLabels(BTreeMap<CardId, String>);

impl CardLabels {
    /// Build labels for every card of `deck` by stripping the zone prefix
    pub fn from_deck(deck: &Deck) -> Self {
        let labels = deck
            .mainboard
            .keys()
            .chain(deck.sideboard.keys())
            .map(|card| (card.clone(), card.label().to_string()))
            .collect();
        Self(labels)
    }

    /// Label for `card`, falling back to the raw identifier
    pub fn get<'a>(&'a self, card: &'a CardId) -> &'a str {
        self.0
            .get(card)
            .map(String::as_str)
            .unwrap_or_else(|| card.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What a deck submission produced. Empty zones are reported, not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckReport {
    pub mainboard_cards: u64,
    pub sideboard_cards: u64,
    pub empty_zones: Vec<Zone>,
}

impl DeckReport {
    pub fn for_deck(deck: &Deck) -> Self {
        Self {
            mainboard_cards: deck.card_count(Zone::Mainboard),
            sideboard_cards: deck.card_count(Zone::Sideboard),
            empty_zones: deck.empty_zones(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.empty_zones.is_empty()
    }
}

fn qualify(zone: Zone, counts: &CardCounts) -> ZoneCounts {
    counts
        .iter()
        .map(|(name, quantity)| (CardId::new(zone, name), *quantity))
        .collect()
}

/// Qualify raw card counts with their zone and derive display labels
pub fn namespace(mainboard_raw: &CardCounts, sideboard_raw: &CardCounts) -> (Deck, CardLabels) {
    let deck = Deck {
        mainboard: qualify(Zone::Mainboard, mainboard_raw),
        sideboard: qualify(Zone::Sideboard, sideboard_raw),
    };
    let labels = CardLabels::from_deck(&deck);
    (deck, labels)
}
