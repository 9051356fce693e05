//! Matchup rows: per-opponent OUT/IN adjustments.
//!
//! [`build_row`] is the only way to obtain a [`MatchupRow`], so every row in a
//! session has passed the same name and quantity checks whether it came from
//! a new entry, an edit, or an imported guide.

use mtg_common::{CardId, Zone};
use std::collections::BTreeMap;
use std::fmt;

use crate::deck::{CardLabels, Deck};
use crate::error::ValidationError;

/// Longest accepted matchup (opposing archetype) name, in characters
pub const MAX_MATCHUP_NAME_LEN: usize = 25;

/// Card identifier -> requested number of copies
pub type Selections = BTreeMap<CardId, u32>;

/// Signed change to one card for one matchup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjustment {
    /// Copies taken out of the mainboard
    Out(u32),
    /// Copies brought in from the sideboard
    In(u32),
}

impl Adjustment {
    pub fn quantity(&self) -> u32 {
        match self {
            Adjustment::Out(n) | Adjustment::In(n) => *n,
        }
    }

    /// Zone the adjusted card must belong to
    pub fn zone(&self) -> Zone {
        match self {
            Adjustment::Out(_) => Zone::Mainboard,
            Adjustment::In(_) => Zone::Sideboard,
        }
    }

    /// Parse `-N` / `+N` with N >= 1 and no leading zeros
    pub fn parse(raw: &str) -> Option<Self> {
        let (is_out, digits) = match raw.strip_prefix('-') {
            Some(d) => (true, d),
            None => (false, raw.strip_prefix('+')?),
        };

        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let n: u32 = digits.parse().ok()?;
        Some(if is_out {
            Adjustment::Out(n)
        } else {
            Adjustment::In(n)
        })
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::Out(n) => write!(f, "-{n}"),
            Adjustment::In(n) => write!(f, "+{n}"),
        }
    }
}

/// One matchup of the collection: a name plus the cards it touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupRow {
    name: String,
    adjustments: BTreeMap<CardId, Adjustment>,
}

impl MatchupRow {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn adjustments(&self) -> &BTreeMap<CardId, Adjustment> {
        &self.adjustments
    }

    pub fn get(&self, card: &CardId) -> Option<Adjustment> {
        self.adjustments.get(card).copied()
    }

    /// Cell text for `card`: "-N", "+N", or "" when untouched
    pub fn cell(&self, card: &CardId) -> String {
        self.get(card).map(|adj| adj.to_string()).unwrap_or_default()
    }

    pub fn references(&self, card: &CardId) -> bool {
        self.adjustments.contains_key(card)
    }

    fn selections(&self, zone: Zone) -> Selections {
        self.adjustments
            .iter()
            .filter(|(_, adj)| adj.zone() == zone)
            .map(|(card, adj)| (card.clone(), adj.quantity()))
            .collect()
    }

    /// Cards taken out, as builder input (used to pre-fill an edit)
    pub fn out_selections(&self) -> Selections {
        self.selections(Zone::Mainboard)
    }

    /// Cards brought in, as builder input
    pub fn in_selections(&self) -> Selections {
        self.selections(Zone::Sideboard)
    }

    pub fn totals(&self) -> SwapTotals {
        let mut totals = SwapTotals::default();
        for adj in self.adjustments.values() {
            match adj {
                Adjustment::Out(n) => totals.out_total += u64::from(*n),
                Adjustment::In(n) => totals.in_total += u64::from(*n),
            }
        }
        totals
    }
}

/// Number of cards taken out vs. brought in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapTotals {
    pub out_total: u64,
    pub in_total: u64,
}

impl SwapTotals {
    pub fn is_balanced(&self) -> bool {
        self.out_total == self.in_total
    }
}

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

impl fmt::Display for SwapTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "removing {} card{} but adding {} card{}. This will change deck size.",
            self.out_total,
            plural(self.out_total),
            self.in_total,
            plural(self.in_total)
        )
    }
}

/// A validated row plus the warning raised while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRow {
    pub row: MatchupRow,
    /// Set when OUT and IN totals differ. The row is still valid.
    pub mismatch: Option<SwapTotals>,
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_MATCHUP_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_MATCHUP_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}

fn validate_selection(
    deck: &Deck,
    card: &CardId,
    requested: u32,
    expected: Zone,
) -> Result<(), ValidationError> {
    if card.zone() != expected {
        return Err(ValidationError::WrongZone {
            card: card.clone(),
            expected,
            found: card.zone(),
        });
    }
    let available = deck
        .quantity(card)
        .ok_or_else(|| ValidationError::UnknownCard(card.clone()))?;
    if requested == 0 || requested > available {
        return Err(ValidationError::QuantityOutOfRange {
            card: card.clone(),
            requested,
            available,
        });
    }
    Ok(())
}

/// Validate OUT/IN selections against `deck` and build the matchup row.
///
/// OUT cards must be mainboard cards and IN cards sideboard cards, each with
/// a quantity between 1 and the number of copies owned. Unequal totals are
/// allowed and reported through [`BuiltRow::mismatch`].
pub fn build_row(
    deck: &Deck,
    name: &str,
    out_selections: &Selections,
    in_selections: &Selections,
) -> Result<BuiltRow, ValidationError> {
    let name = validate_name(name)?;

    if out_selections.is_empty() && in_selections.is_empty() {
        return Err(ValidationError::NothingSelected);
    }

    for (card, quantity) in out_selections {
        validate_selection(deck, card, *quantity, Zone::Mainboard)?;
    }
    for (card, quantity) in in_selections {
        validate_selection(deck, card, *quantity, Zone::Sideboard)?;
    }

    let adjustments = out_selections
        .iter()
        .map(|(card, quantity)| (card.clone(), Adjustment::Out(*quantity)))
        .chain(
            in_selections
                .iter()
                .map(|(card, quantity)| (card.clone(), Adjustment::In(*quantity))),
        )
        .collect();

    let row = MatchupRow { name, adjustments };
    let totals = row.totals();
    let mismatch = if totals.is_balanced() {
        None
    } else {
        log::warn!("Matchup '{}': {}", row.name, totals);
        Some(totals)
    };

    Ok(BuiltRow { row, mismatch })
}

/// One entry of the changelog shown before an edit is confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowChange {
    Renamed { from: String, to: String },
    /// Change in the number of copies adjusted for `card`
    Card { card: CardId, delta: i64 },
}

impl RowChange {
    pub fn describe(&self, labels: &CardLabels) -> String {
        match self {
            RowChange::Renamed { from, to } => format!("Renamed '{from}' to '{to}'"),
            RowChange::Card { card, delta } => {
                let sign = if *delta > 0 { '+' } else { '-' };
                format!("{}{} {}", sign, delta.unsigned_abs(), labels.get(card))
            }
        }
    }
}

/// Changes that turn `original` into `updated`: a rename first, then one
/// entry per card whose copy count changed, in identifier order
pub fn diff_rows(original: &MatchupRow, updated: &MatchupRow) -> Vec<RowChange> {
    let mut changes = Vec::new();
    if original.name != updated.name {
        changes.push(RowChange::Renamed {
            from: original.name.clone(),
            to: updated.name.clone(),
        });
    }

    let mut cards: Vec<&CardId> = original
        .adjustments
        .keys()
        .chain(updated.adjustments.keys())
        .collect();
    cards.sort();
    cards.dedup();

    let count = |row: &MatchupRow, card: &CardId| -> i64 {
        row.get(card).map(|adj| i64::from(adj.quantity())).unwrap_or(0)
    };
    for card in cards {
        let delta = count(updated, card) - count(original, card);
        if delta != 0 {
            changes.push(RowChange::Card {
                card: card.clone(),
                delta,
            });
        }
    }

    changes
}

#[cfg(test)]
#[path = "matchup_tests.rs"]
mod tests;
