//! External deck sources

pub mod goldfish;

pub use goldfish::GoldfishClient;

use mtg_common::RawDecklist;

use crate::error::Result;

/// Anything that can turn a deck URL into raw per-zone card counts.
///
/// Implementations return the same shape the decklist parser produces, so
/// the result can be handed straight to [`crate::session::Session::load_deck`].
pub trait DeckSource {
    /// Short name for logs and messages
    fn name(&self) -> &str;

    /// Whether `url` looks like one of this source's deck links
    fn accepts(&self, url: &str) -> bool;

    fn fetch_deck(&self, url: &str) -> Result<RawDecklist>;
}
