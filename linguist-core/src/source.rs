//! Contract for whatever supplies the language table.

use std::future::Future;

use crate::errors::{LinguistError, LinguistResult};
use crate::model::LanguageTable;

/// Supplies language tables to a [`crate::Linguist`].
///
/// Implementations own their I/O policy (caching, timeouts, retries). Both
/// operations report an unobtainable table as
/// [`LinguistError::SourceUnavailable`].
pub trait LanguageSource: Send + Sync {
    /// Returns the current table, preferring whatever is cached.
    fn load(&self) -> impl Future<Output = LinguistResult<LanguageTable>> + Send;

    /// Fetches a fresh table from upstream and persists it for later loads.
    fn refresh(&self) -> impl Future<Output = LinguistResult<LanguageTable>> + Send;
}

/// A fixed, in-memory table. Refreshing returns the same table.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    table: LanguageTable,
}

impl StaticSource {
    pub fn new(table: LanguageTable) -> Self {
        Self { table }
    }
}

impl LanguageSource for StaticSource {
    async fn load(&self) -> LinguistResult<LanguageTable> {
        Ok(self.table.clone())
    }

    async fn refresh(&self) -> LinguistResult<LanguageTable> {
        Ok(self.table.clone())
    }
}

/// Source that never produces a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSource;

impl LanguageSource for NoSource {
    async fn load(&self) -> LinguistResult<LanguageTable> {
        Err(LinguistError::SourceUnavailable("no language source configured".into()))
    }

    async fn refresh(&self) -> LinguistResult<LanguageTable> {
        self.load().await
    }
}
