//! MTGGoldfish deck import.
//!
//! Deck pages look like `https://www.mtggoldfish.com/deck/<id>#paper`; the
//! plain-text download lives at `/deck/download/<id>` and lists the
//! mainboard, a blank line, then the sideboard.

use lazy_static::lazy_static;
use mtg_common::{parse_zoned_decklist, RawDecklist, Zone};
use regex::Regex;

use super::DeckSource;
use crate::error::{Error, Result};

/// MTGGoldfish site root
const GOLDFISH_URL: &str = "https://www.mtggoldfish.com";

lazy_static! {
    static ref DECK_ID: Regex = Regex::new(r"/deck/(\d+)").expect("deck id pattern is valid");
}

/// Numeric deck id from a Goldfish deck URL
pub fn deck_id(url: &str) -> Option<&str> {
    DECK_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Download and parse the deck behind `url`
pub fn fetch_deck(url: &str) -> Result<RawDecklist> {
    fetch_deck_from(GOLDFISH_URL, url)
}

/// Same as [`fetch_deck`] against another host (for testing with mock servers).
pub fn fetch_deck_from(base_url: &str, url: &str) -> Result<RawDecklist> {
    let id = deck_id(url).ok_or_else(|| {
        Error::Import(format!(
            "couldn't find a deck id in {:?}; expected a link like .../deck/<id>",
            url
        ))
    })?;
    let download_url = format!("{}/deck/download/{}", base_url.trim_end_matches('/'), id);

    log::info!("Fetching deck {} from MTGGoldfish: {}", id, download_url);

    let response = reqwest::blocking::Client::new()
        .get(&download_url)
        .header("User-Agent", "Mozilla/5.0")
        .send()?;

    if !response.status().is_success() {
        return Err(Error::HttpStatus(response.status()));
    }

    let text = response.text()?;
    let deck = parse_zoned_decklist(&text);
    if deck.is_empty() {
        return Err(Error::Import(format!("deck {} has no cards", id)));
    }

    log::info!(
        "Imported deck {}: {} mainboard, {} sideboard cards",
        id,
        deck.card_count(Zone::Mainboard),
        deck.card_count(Zone::Sideboard)
    );
    Ok(deck)
}

/// [`DeckSource`] backed by MTGGoldfish
#[derive(Debug, Clone)]
pub struct GoldfishClient {
    base_url: String,
}

impl Default for GoldfishClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GoldfishClient {
    pub fn new() -> Self {
        Self::with_base_url(GOLDFISH_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

impl DeckSource for GoldfishClient {
    fn name(&self) -> &str {
        "MTGGoldfish"
    }

    fn accepts(&self, url: &str) -> bool {
        deck_id(url).is_some()
    }

    fn fetch_deck(&self, url: &str) -> Result<RawDecklist> {
        fetch_deck_from(&self.base_url, url)
    }
}

#[cfg(test)]
#[path = "goldfish_tests.rs"]
mod tests;
