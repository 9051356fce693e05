//! Shared MTG types for deck handling.
//!
//! Holds the pieces every tool in the workspace needs when it deals with a
//! pasted or downloaded decklist: the zone a card lives in, the
//! zone-qualified identifier used as a map key, and the MTGO-style decklist
//! parser.

pub mod decklist;
pub mod error;
pub mod zone;

pub use decklist::{parse_decklist, parse_zoned_decklist, CardCounts, RawDecklist};
pub use error::CardIdError;
pub use zone::{CardId, Zone};
