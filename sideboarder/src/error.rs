//! Error types for sideboarder

use mtg_common::{CardId, CardIdError, Zone};
use thiserror::Error;

/// A user-facing rule was broken; the operation was aborted and nothing changed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Matchup name is blank after trimming
    #[error("matchup name cannot be empty")]
    EmptyName,
    #[error("matchup name is {len} characters long (max {max})")]
    NameTooLong { len: usize, max: usize },
    /// Card identifier is not in the submitted deck
    #[error("{0} is not part of the deck")]
    UnknownCard(CardId),
    /// OUT selections must come from the mainboard, IN selections from the sideboard
    #[error("{card} is a {found} card, expected a {expected} card")]
    WrongZone {
        card: CardId,
        expected: Zone,
        found: Zone,
    },
    #[error("quantity {requested} for {card} is out of range (1-{available})")]
    QuantityOutOfRange {
        card: CardId,
        requested: u32,
        available: u32,
    },
    #[error("select at least one card to take out or bring in")]
    NothingSelected,
    #[error("no matchup at index {index} ({len} matchups)")]
    NoSuchMatchup { index: usize, len: usize },
}

/// The propose/confirm protocol was used out of order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("no deck has been submitted")]
    NoDeck,
    #[error("a deck is already locked; reset the session first")]
    DeckLocked,
    #[error("another change is waiting for confirmation")]
    ChangePending,
    #[error("there is no pending change")]
    NothingPending,
}

/// Unified error type for sideboarder operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Session error: {0}")]
    State(#[from] StateError),
    /// Saved guide or deck URL could not be used
    #[error("Import failed: {0}")]
    Import(String),
    #[error("Invalid card identifier: {0}")]
    CardId(#[from] CardIdError),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// A cell value the matchup builder never produces reached the renderer.
    /// Indicates a bug, not bad user input.
    #[error("Internal consistency error: unexpected matrix cell {0:?}")]
    InvalidCell(String),
}

/// Result alias for sideboarder operations
pub type Result<T> = std::result::Result<T, Error>;
