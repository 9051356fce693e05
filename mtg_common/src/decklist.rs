//! MTGO-style decklist parsing.
//!
//! A decklist is plain text with one `<quantity> <card name>` entry per
//! line. Lines that do not have that shape are skipped rather than treated
//! as errors, so blank lines and stray headers never break an import.

use std::collections::BTreeMap;

use crate::zone::Zone;

/// Card name (as typed) -> number of copies
pub type CardCounts = BTreeMap<String, u32>;

/// Un-namespaced card counts for both zones of a deck
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDecklist {
    pub mainboard: CardCounts,
    pub sideboard: CardCounts,
}

impl RawDecklist {
    pub fn new(mainboard: CardCounts, sideboard: CardCounts) -> Self {
        Self {
            mainboard,
            sideboard,
        }
    }

    /// Card counts for one zone
    pub fn zone(&self, zone: Zone) -> &CardCounts {
        match zone {
            Zone::Mainboard => &self.mainboard,
            Zone::Sideboard => &self.sideboard,
        }
    }

    /// Total number of copies in one zone, widened so any quantities fit
    pub fn card_count(&self, zone: Zone) -> u64 {
        self.zone(zone).values().map(|&n| u64::from(n)).sum()
    }

    /// True when neither zone holds a single card
    pub fn is_empty(&self) -> bool {
        self.mainboard.is_empty() && self.sideboard.is_empty()
    }
}

/// Split a line into quantity and card name.
///
/// The quantity is the first whitespace-separated token and must be a
/// positive whole number; the name is the rest of the line.
fn parse_decklist_line(line: &str) -> Option<(u32, String)> {
    let (quantity, name) = line.trim().split_once(char::is_whitespace)?;
    let quantity: u32 = quantity.parse().ok()?;
    let name = name.trim_start();
    if quantity == 0 || name.is_empty() {
        return None;
    }
    Some((quantity, name.to_string()))
}

/// Parse decklist text into card counts.
///
/// A name listed twice keeps the quantity of its last line.
pub fn parse_decklist(text: &str) -> CardCounts {
    let mut deck = CardCounts::new();

    for (line_num, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_decklist_line(line) {
            Some((quantity, name)) => {
                if let Some(previous) = deck.insert(name, quantity) {
                    log::debug!(
                        "Line {}: duplicate entry replaces earlier quantity {}",
                        line_num + 1,
                        previous
                    );
                }
            }
            None => log::debug!("Skipping malformed decklist line {}: {:?}", line_num + 1, line),
        }
    }

    deck
}

fn is_sideboard_header(line: &str) -> bool {
    line.trim_end_matches(':').eq_ignore_ascii_case("sideboard")
}

/// Parse a single-text export holding both zones.
///
/// Entries go to the mainboard until the first blank line or `Sideboard`
/// header, then to the sideboard. A leading `Deck` header is ignored.
pub fn parse_zoned_decklist(text: &str) -> RawDecklist {
    let mut deck = RawDecklist::default();
    let mut zone = Zone::Mainboard;

    for line in text.trim().lines() {
        let line = line.trim();
        if line.is_empty() || is_sideboard_header(line) {
            zone = Zone::Sideboard;
            continue;
        }
        if line.eq_ignore_ascii_case("deck") {
            continue;
        }

        let Some((quantity, name)) = parse_decklist_line(line) else {
            log::debug!("Skipping malformed {} line: {:?}", zone, line);
            continue;
        };
        match zone {
            Zone::Mainboard => deck.mainboard.insert(name, quantity),
            Zone::Sideboard => deck.sideboard.insert(name, quantity),
        };
    }

    deck
}

#[cfg(test)]
#[path = "decklist_tests.rs"]
mod tests;
