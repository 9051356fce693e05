//! Sideboarder - MTG sideboard guide builder
//!
//! Takes a mainboard and sideboard decklist, records per-matchup OUT/IN
//! swaps, and turns the collection into a matrix of matchups x cards that
//! can be saved as JSON, printed as a text table, or rendered to PNG.

pub mod api;
pub mod cache;
pub mod deck;
pub mod error;
pub mod formatters;
pub mod image_export;
pub mod matchup;
pub mod matrix;
pub mod persist;
pub mod render;
pub mod session;

pub use deck::{namespace, CardLabels, Deck, DeckReport};
pub use error::{Error, Result, StateError, ValidationError};
pub use matchup::{build_row, diff_rows, Adjustment, MatchupRow, RowChange, Selections, SwapTotals};
pub use matrix::{assemble, Matrix, RowOrder};
pub use persist::{import_guide, ImportedGuide, SavedGuide};
pub use render::{cell_style, CellStyle, CellTone};
pub use session::{PendingChange, Session};
