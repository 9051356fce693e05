//! Sideboard matrix assembly.
//!
//! The matrix is derived from the deck and the matchup collection on
//! demand and never edited directly. Columns are the cards referenced by at
//! least one matchup: mainboard identifiers in alphabetical order, then
//! sideboard identifiers in alphabetical order. Every row carries one cell
//! per column, with `""` for cards the matchup leaves alone.

use mtg_common::CardId;
use serde::Serialize;

use crate::deck::{CardLabels, Deck};
use crate::matchup::MatchupRow;

/// Which way rows are laid out. Callers always pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// Order the matchups were added in (export and persistence)
    Insertion,
    /// Most recently added matchup first (preview)
    LatestFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub matchup: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Matrix {
    columns: Vec<CardId>,
    rows: Vec<MatrixRow>,
}

impl Matrix {
    pub fn columns(&self) -> &[CardId] {
        &self.columns
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column headers with zone prefixes stripped
    pub fn column_labels<'a>(&'a self, labels: &'a CardLabels) -> Vec<&'a str> {
        self.columns.iter().map(|card| labels.get(card)).collect()
    }
}

/// Build the matrix for `matchups` against `deck`
pub fn assemble(deck: &Deck, matchups: &[MatchupRow], order: RowOrder) -> Matrix {
    let columns: Vec<CardId> = deck
        .mainboard
        .keys()
        .chain(deck.sideboard.keys())
        .filter(|card| matchups.iter().any(|row| row.references(card)))
        .cloned()
        .collect();

    let mut rows: Vec<MatrixRow> = matchups
        .iter()
        .map(|row| MatrixRow {
            matchup: row.name().to_string(),
            cells: columns.iter().map(|card| row.cell(card)).collect(),
        })
        .collect();

    if order == RowOrder::LatestFirst {
        rows.reverse();
    }

    log::debug!(
        "Assembled {}x{} matrix ({:?})",
        rows.len(),
        columns.len(),
        order
    );
    Matrix { columns, rows }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
