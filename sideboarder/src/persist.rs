//! Saved guide files.
//!
//! A guide is stored as JSON with two top-level fields: `deck_data` (both
//! zones, identifier -> copies) and `matrix` (one flattened object per
//! matchup, `"Matchup"` first, then one field per matrix column in
//! canonical order). Imports rebuild card labels from the identifiers and
//! push every row back through the matchup builder; one bad row rejects the
//! whole file.

use chrono::{Local, NaiveDate};
use mtg_common::{CardId, Zone};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

use crate::deck::{CardLabels, Deck};
use crate::error::{Error, Result};
use crate::matchup::{build_row, Adjustment, MatchupRow, Selections};
use crate::matrix::{assemble, RowOrder};

/// Field holding the matchup name in every matrix record
pub const MATCHUP_FIELD: &str = "Matchup";

/// One matchup flattened to `{"Matchup": name, "<id>": "<adj>", ...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRecord {
    pub matchup: String,
    pub cells: Vec<(CardId, String)>,
}

impl Serialize for MatrixRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len() + 1))?;
        map.serialize_entry(MATCHUP_FIELD, &self.matchup)?;
        for (card, cell) in &self.cells {
            map.serialize_entry(card.as_str(), cell)?;
        }
        map.end()
    }
}

/// Everything written to a guide file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedGuide {
    pub deck_data: Deck,
    pub matrix: Vec<MatrixRecord>,
}

impl SavedGuide {
    /// Flatten `deck` and `matchups` in insertion order
    pub fn export(deck: &Deck, matchups: &[MatchupRow]) -> Self {
        let matrix = assemble(deck, matchups, RowOrder::Insertion);
        let records = matrix
            .rows()
            .iter()
            .map(|row| MatrixRecord {
                matchup: row.matchup.clone(),
                cells: matrix
                    .columns()
                    .iter()
                    .cloned()
                    .zip(row.cells.iter().cloned())
                    .collect(),
            })
            .collect();

        Self {
            deck_data: deck.clone(),
            matrix: records,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A guide read back from JSON, validated and ready to load into a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedGuide {
    pub deck: Deck,
    pub labels: CardLabels,
    pub matchups: Vec<MatchupRow>,
}

#[derive(Debug, Deserialize)]
struct RawGuide {
    deck_data: Deck,
    #[serde(default)]
    matrix: Vec<Map<String, Value>>,
}

fn validate_deck(deck: &Deck) -> Result<()> {
    for zone in Zone::all() {
        for (card, quantity) in deck.zone(*zone) {
            if card.zone() != *zone {
                return Err(Error::Import(format!(
                    "{} is listed in the {}",
                    card, zone
                )));
            }
            if *quantity == 0 {
                return Err(Error::Import(format!("{} has a quantity of 0", card)));
            }
        }
    }
    Ok(())
}

/// Rebuild one matchup from its flattened record
fn parse_record(deck: &Deck, index: usize, record: &Map<String, Value>) -> Result<MatchupRow> {
    let position = index + 1;
    let name = record
        .get(MATCHUP_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Import(format!("row {}: missing matchup name", position)))?;

    let mut out_selections = Selections::new();
    let mut in_selections = Selections::new();

    for (key, value) in record {
        if key == MATCHUP_FIELD {
            continue;
        }
        // Every column must name a card of the deck, even when the cell is empty
        let card = CardId::parse(key)?;
        if !deck.contains(&card) {
            return Err(Error::Import(format!(
                "row {} ('{}'): column {} is not a card of the deck",
                position, name, key
            )));
        }
        let raw = match value {
            Value::Null => continue,
            Value::String(s) if s.is_empty() => continue,
            Value::String(s) => s,
            other => {
                return Err(Error::Import(format!(
                    "row {} ('{}'): {} has non-string value {}",
                    position, name, key, other
                )))
            }
        };
        match Adjustment::parse(raw) {
            Some(Adjustment::Out(n)) => out_selections.insert(card, n),
            Some(Adjustment::In(n)) => in_selections.insert(card, n),
            None => {
                return Err(Error::Import(format!(
                    "row {} ('{}'): {} has malformed adjustment {:?}",
                    position, name, key, raw
                )))
            }
        };
    }

    let built = build_row(deck, name, &out_selections, &in_selections)
        .map_err(|e| Error::Import(format!("row {} ('{}'): {}", position, name, e)))?;
    Ok(built.row)
}

/// Parse and validate a guide. Nothing is returned unless every row passes.
pub fn import_guide(json: &str) -> Result<ImportedGuide> {
    let raw: RawGuide = serde_json::from_str(json)?;
    validate_deck(&raw.deck_data)?;

    let matchups = raw
        .matrix
        .iter()
        .enumerate()
        .map(|(i, record)| parse_record(&raw.deck_data, i, record))
        .collect::<Result<Vec<_>>>()?;

    let labels = CardLabels::from_deck(&raw.deck_data);
    log::info!(
        "Imported guide with {} cards and {} matchups",
        labels.len(),
        matchups.len()
    );

    Ok(ImportedGuide {
        deck: raw.deck_data,
        labels,
        matchups,
    })
}

/// Write `deck` and `matchups` to `path` as pretty-printed JSON
pub fn save_guide(path: &Path, deck: &Deck, matchups: &[MatchupRow]) -> Result<()> {
    let json = SavedGuide::export(deck, matchups).to_json_pretty()?;
    std::fs::write(path, json)?;
    log::info!("Saved {} matchups to {}", matchups.len(), path.display());
    Ok(())
}

pub fn load_guide(path: &Path) -> Result<ImportedGuide> {
    let json = std::fs::read_to_string(path)?;
    log::debug!("Loading guide from {}", path.display());
    import_guide(&json)
}

/// `sideboarder_<date>.<ext>`
pub fn file_name_for(date: NaiveDate, ext: &str) -> String {
    format!("sideboarder_{}.{}", date.format("%Y-%m-%d"), ext)
}

/// Dated default file name for today, e.g. `sideboarder_2024-05-01.json`
pub fn default_file_name(ext: &str) -> String {
    file_name_for(Local::now().date_naive(), ext)
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
