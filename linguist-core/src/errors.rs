//! Error types for language table acquisition.
//!
//! Resolution itself never fails: an unknown path yields no candidates and an
//! unknown name is simply not registered. Only obtaining a table can fail, and
//! those failures are reported through [`LinguistError`].

use thiserror::Error;

/// Result alias for table acquisition.
pub type LinguistResult<T> = std::result::Result<T, LinguistError>;

/// Failure to obtain a usable language table.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LinguistError {
    /// No table could be produced (cache missing and network unreachable,
    /// or the bounded retry after a malformed table did not succeed).
    #[error("[Linguist] language table unavailable: {0}")]
    SourceUnavailable(String),

    /// Cached or fetched data does not match the registry schema.
    #[error("[Linguist] malformed language table: {0}")]
    MalformedTable(String),
}

impl LinguistError {
    /// Returns `true` for [`LinguistError::MalformedTable`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, LinguistError::MalformedTable(_))
    }
}
