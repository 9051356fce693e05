//! Session state for building a sideboard guide.
//!
//! A [`Session`] owns the locked deck, the matchup collection and a single
//! pending-change slot. Every mutation of the collection goes through
//! propose -> confirm (or cancel); a second proposal while one is waiting
//! is refused. Failed operations leave the session untouched.

use mtg_common::{parse_decklist, RawDecklist};

use crate::deck::{namespace, CardLabels, Deck, DeckReport};
use crate::error::{Result, StateError, ValidationError};
use crate::matchup::{build_row, diff_rows, MatchupRow, RowChange, Selections, SwapTotals};
use crate::matrix::{assemble, Matrix, RowOrder};
use crate::persist::{ImportedGuide, SavedGuide};

/// A change to the matchup collection waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Add(MatchupRow),
    Replace { index: usize, row: MatchupRow },
    Delete { index: usize },
}

/// Result of proposing an edit: what will change, plus the swap warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProposal {
    pub changes: Vec<RowChange>,
    pub mismatch: Option<SwapTotals>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LockedDeck {
    deck: Deck,
    labels: CardLabels,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    locked: Option<LockedDeck>,
    matchups: Vec<MatchupRow>,
    pending: Option<PendingChange>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously saved guide
    pub fn from_guide(guide: ImportedGuide) -> Self {
        Self {
            locked: Some(LockedDeck {
                deck: guide.deck,
                labels: guide.labels,
            }),
            matchups: guide.matchups,
            pending: None,
        }
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.locked.as_ref().map(|locked| &locked.deck)
    }

    pub fn labels(&self) -> Option<&CardLabels> {
        self.locked.as_ref().map(|locked| &locked.labels)
    }

    pub fn matchups(&self) -> &[MatchupRow] {
        &self.matchups
    }

    pub fn pending(&self) -> Option<&PendingChange> {
        self.pending.as_ref()
    }

    /// Parse both decklist texts and lock the resulting deck
    pub fn submit_deck(&mut self, mainboard_text: &str, sideboard_text: &str) -> Result<DeckReport> {
        self.ensure_unlocked()?;
        let raw = RawDecklist::new(parse_decklist(mainboard_text), parse_decklist(sideboard_text));
        self.load_deck(raw)
    }

    /// Lock a deck produced elsewhere (e.g. a deck-site import)
    pub fn load_deck(&mut self, raw: RawDecklist) -> Result<DeckReport> {
        self.ensure_unlocked()?;

        let (deck, labels) = namespace(&raw.mainboard, &raw.sideboard);
        let report = DeckReport::for_deck(&deck);
        for zone in &report.empty_zones {
            log::warn!("Submitted deck has an empty {}", zone);
        }
        log::info!(
            "Deck locked: {} mainboard cards, {} sideboard cards",
            report.mainboard_cards,
            report.sideboard_cards
        );

        self.locked = Some(LockedDeck { deck, labels });
        Ok(report)
    }

    /// Validate a new matchup and hold it for confirmation
    pub fn propose_add(
        &mut self,
        name: &str,
        out_selections: &Selections,
        in_selections: &Selections,
    ) -> Result<Option<SwapTotals>> {
        let deck = self.ready_for_proposal()?;
        let built = build_row(deck, name, out_selections, in_selections)?;

        self.pending = Some(PendingChange::Add(built.row));
        Ok(built.mismatch)
    }

    /// Validate a replacement for the matchup at `index` and hold it
    pub fn propose_edit(
        &mut self,
        index: usize,
        name: &str,
        out_selections: &Selections,
        in_selections: &Selections,
    ) -> Result<EditProposal> {
        let deck = self.ready_for_proposal()?;
        let original = self.matchup_at(index)?;
        let built = build_row(deck, name, out_selections, in_selections)?;
        let changes = diff_rows(original, &built.row);

        self.pending = Some(PendingChange::Replace {
            index,
            row: built.row,
        });
        Ok(EditProposal {
            changes,
            mismatch: built.mismatch,
        })
    }

    /// Hold the removal of the matchup at `index`
    pub fn propose_delete(&mut self, index: usize) -> Result<&MatchupRow> {
        self.ready_for_proposal()?;
        self.matchup_at(index)?;

        self.pending = Some(PendingChange::Delete { index });
        self.matchup_at(index)
    }

    /// Apply the pending change after checking it again against the current
    /// deck and collection
    pub fn confirm(&mut self) -> Result<()> {
        let deck = self.deck().ok_or(StateError::NoDeck)?;
        let pending = self.pending.as_ref().ok_or(StateError::NothingPending)?;

        match pending {
            PendingChange::Add(row) => {
                revalidate(deck, row)?;
            }
            PendingChange::Replace { index, row } => {
                self.matchup_at(*index)?;
                revalidate(deck, row)?;
            }
            PendingChange::Delete { index } => {
                self.matchup_at(*index)?;
            }
        }

        match self.pending.take() {
            Some(PendingChange::Add(row)) => {
                log::info!("Added matchup '{}'", row.name());
                self.matchups.push(row);
            }
            Some(PendingChange::Replace { index, row }) => {
                log::info!("Updated matchup '{}'", row.name());
                self.matchups[index] = row;
            }
            Some(PendingChange::Delete { index }) => {
                let removed = self.matchups.remove(index);
                log::info!("Deleted matchup '{}'", removed.name());
            }
            None => return Err(StateError::NothingPending.into()),
        }
        Ok(())
    }

    /// Discard the pending change, if any
    pub fn cancel(&mut self) -> Option<PendingChange> {
        let discarded = self.pending.take();
        if discarded.is_some() {
            log::debug!("Pending change cancelled");
        }
        discarded
    }

    /// Drop the deck, every matchup and any pending change
    pub fn reset(&mut self) {
        *self = Self::default();
        log::info!("Session reset");
    }

    /// Matrix for on-screen review, most recent matchup first
    pub fn preview(&self) -> Matrix {
        match self.deck() {
            Some(deck) => assemble(deck, &self.matchups, RowOrder::LatestFirst),
            None => Matrix::default(),
        }
    }

    /// Saved-guide form of the session, matchups in insertion order
    pub fn export(&self) -> Result<SavedGuide> {
        let deck = self.deck().ok_or(StateError::NoDeck)?;
        Ok(SavedGuide::export(deck, &self.matchups))
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked.is_some() {
            return Err(StateError::DeckLocked.into());
        }
        Ok(())
    }

    fn ready_for_proposal(&self) -> Result<&Deck> {
        let deck = self.deck().ok_or(StateError::NoDeck)?;
        if self.pending.is_some() {
            return Err(StateError::ChangePending.into());
        }
        Ok(deck)
    }

    fn matchup_at(&self, index: usize) -> Result<&MatchupRow> {
        self.matchups.get(index).ok_or_else(|| {
            ValidationError::NoSuchMatchup {
                index,
                len: self.matchups.len(),
            }
            .into()
        })
    }
}

fn revalidate(deck: &Deck, row: &MatchupRow) -> Result<()> {
    build_row(deck, row.name(), &row.out_selections(), &row.in_selections())?;
    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
