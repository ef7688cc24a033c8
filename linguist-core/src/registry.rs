//! Long-lived handle combining a [`LanguageSource`] with the current resolver.
//!
//! Reads never lock for longer than an `Arc` clone. A refresh builds a brand
//! new [`Resolver`] and swaps it in; callers still holding the previous
//! snapshot keep a consistent view. Refreshes are serialized, and a caller
//! that waited for a refresh already finished by someone else reuses that
//! result instead of fetching again.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::errors::LinguistResult;
use crate::model::{LanguageDefinition, LanguageTable};
use crate::resolver::Resolver;
use crate::source::LanguageSource;

#[derive(Debug, Clone)]
struct Snapshot {
    generation: u64,
    resolver: Arc<Resolver>,
}

/// Language lookup backed by a refreshable source.
pub struct Linguist<S> {
    source: S,
    current: RwLock<Snapshot>,
    refresh_guard: Mutex<()>,
}

impl<S: LanguageSource> Linguist<S> {
    /// Loads the table from `source` and builds the first resolver.
    ///
    /// # Errors
    /// Whatever `source.load()` reports, typically
    /// [`crate::LinguistError::SourceUnavailable`].
    #[instrument(skip_all)]
    pub async fn from_source(source: S) -> LinguistResult<Self> {
        let table = source.load().await?;
        info!(languages = table.len(), "language table loaded");

        Ok(Self {
            source,
            current: RwLock::new(Snapshot {
                generation: 0,
                resolver: Arc::new(Resolver::new(table)),
            }),
            refresh_guard: Mutex::new(()),
        })
    }

    /// Current resolver snapshot.
    pub fn resolver(&self) -> Arc<Resolver> {
        Arc::clone(&self.read().resolver)
    }

    /// Number of completed refreshes since construction.
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// Re-fetches the table and swaps in a freshly built resolver.
    ///
    /// On failure the previous snapshot stays in place.
    #[instrument(skip_all)]
    pub async fn refresh(&self) -> LinguistResult<Arc<Resolver>> {
        let seen = self.generation();
        let _guard = self.refresh_guard.lock().await;

        let latest = self.read();
        if latest.generation != seen {
            debug!(generation = latest.generation, "refresh completed while waiting, reusing it");
            return Ok(latest.resolver);
        }

        let table = self.source.refresh().await?;
        let resolver = Arc::new(Resolver::new(table));

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        current.generation += 1;
        current.resolver = Arc::clone(&resolver);
        info!(
            generation = current.generation,
            languages = resolver.all_languages().len(),
            "language table refreshed"
        );
        Ok(resolver)
    }

    pub fn languages_for(&self, path: &str) -> Vec<Arc<LanguageDefinition>> {
        self.resolver().languages_for(path)
    }

    pub fn matches<N: AsRef<str>>(&self, path: &str, names: &[N]) -> bool {
        self.resolver().matches(path, names)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.resolver().is_registered(name)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn read(&self) -> Snapshot {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<S> std::fmt::Debug for Linguist<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linguist").finish_non_exhaustive()
    }
}

/// Convenience for callers that already hold a table.
impl Linguist<crate::source::StaticSource> {
    pub async fn from_table(table: LanguageTable) -> LinguistResult<Self> {
        Self::from_source(crate::source::StaticSource::new(table)).await
    }
}
