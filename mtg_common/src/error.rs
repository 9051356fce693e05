//! Error types for mtg_common

use thiserror::Error;

/// Raised when a string cannot be used as a zone-qualified card identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardIdError {
    /// Identifier does not start with `MB:` or `SB:`
    #[error("card identifier '{0}' has no zone prefix (expected MB: or SB:)")]
    MissingPrefix(String),
    /// Identifier is only a prefix
    #[error("card identifier '{0}' has an empty card name")]
    EmptyName(String),
}
