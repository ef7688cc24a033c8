//! Cache-first language source backed by the remote registry.
//!
//! `load()` reads the cached table and only goes to the network when the cache
//! is missing. A malformed table is handled once: the bad file is dropped
//! (or, for a caller-provided file, abandoned in favour of the default cache),
//! the registry is fetched again and parsed. A second malformed table ends the
//! attempt with `SourceUnavailable`.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use linguist_core::{LanguageSource, LanguageTable, LinguistError, LinguistResult};
use tracing::{info, instrument, warn};

use crate::cache;
use crate::config::SourceConfig;
use crate::errors::{SourceError, SourceResult};
use crate::remote::{HttpFetcher, TableFetcher};
use crate::schema::{parse_table, render_table};

/// Number of refetches allowed after a malformed table.
pub const MAX_MALFORMED_RETRIES: usize = 1;

/// Language source reading `languages.yml` from disk and refreshing it from
/// the registry.
#[derive(Debug)]
pub struct CachedRemoteSource<F = HttpFetcher> {
    fetcher: F,
    default_path: PathBuf,
    active_path: RwLock<PathBuf>,
}

impl CachedRemoteSource<HttpFetcher> {
    /// Source fetching over HTTP as configured by `cfg`.
    pub fn from_config(cfg: &SourceConfig) -> SourceResult<Self> {
        Ok(Self::with_fetcher(cfg, HttpFetcher::new(cfg)?))
    }
}

impl<F: TableFetcher> CachedRemoteSource<F> {
    pub fn with_fetcher(cfg: &SourceConfig, fetcher: F) -> Self {
        Self {
            fetcher,
            default_path: cfg.default_table_path(),
            active_path: RwLock::new(cfg.table_path()),
        }
    }

    /// Table file currently read and written by this source.
    pub fn table_path(&self) -> PathBuf {
        self.active_path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetches, validates, then persists. Malformed data is never written.
    async fn fetch_and_store(&self, path: &Path) -> SourceResult<LanguageTable> {
        let text = self.fetcher.fetch().await?;
        let table = parse_table(&text)?;
        cache::write_table(path, &render_table(&table)?).await?;
        info!(path = %path.display(), languages = table.len(), "cached fresh language table");
        Ok(table)
    }

    async fn read_or_fetch(&self, path: &Path) -> SourceResult<LanguageTable> {
        match cache::read_table(path).await? {
            Some(text) => parse_table(&text),
            None => {
                info!(path = %path.display(), "no cached table, fetching registry");
                self.fetch_and_store(path).await
            }
        }
    }

    /// Stops using a malformed table file.
    async fn abandon(&self, path: &Path) -> SourceResult<()> {
        if path == self.default_path.as_path() {
            cache::discard_table(path).await
        } else {
            warn!(
                path = %path.display(),
                fallback = %self.default_path.display(),
                "table file malformed, switching to default cache"
            );
            *self
                .active_path
                .write()
                .unwrap_or_else(PoisonError::into_inner) = self.default_path.clone();
            Ok(())
        }
    }
}

impl<F: TableFetcher> LanguageSource for CachedRemoteSource<F> {
    #[instrument(skip(self))]
    async fn load(&self) -> LinguistResult<LanguageTable> {
        let mut last_error = String::new();

        for attempt in 0..=MAX_MALFORMED_RETRIES {
            let path = self.table_path();
            let result = if attempt == 0 {
                self.read_or_fetch(&path).await
            } else {
                self.fetch_and_store(&path).await
            };

            match result {
                Ok(table) => return Ok(table),
                Err(SourceError::Yaml(e)) => {
                    warn!(attempt, path = %path.display(), error = %e, "malformed language table");
                    last_error = e.to_string();
                    self.abandon(&path).await?;
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(LinguistError::SourceUnavailable(format!(
            "language table still malformed after {MAX_MALFORMED_RETRIES} refetch: {last_error}"
        )))
    }

    /// Fetches the registry, refetching once if it sends malformed data.
    /// Malformed data never reaches the cache.
    #[instrument(skip(self))]
    async fn refresh(&self) -> LinguistResult<LanguageTable> {
        let path = self.table_path();
        let mut last_error = String::new();

        for attempt in 0..=MAX_MALFORMED_RETRIES {
            match self.fetch_and_store(&path).await {
                Ok(table) => return Ok(table),
                Err(SourceError::Yaml(e)) => {
                    warn!(attempt, error = %e, "registry sent a malformed table");
                    last_error = e.to_string();
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(LinguistError::SourceUnavailable(format!(
            "registry table malformed after {MAX_MALFORMED_RETRIES} refetch: {last_error}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const GOOD: &str = "Java:\n  type: programming\n  extensions: [\".java\"]\n";
    const BAD: &str = "Java:\n  extensions: [\".java\"]\n";

    /// Serves queued responses in order, repeating the last one.
    struct FakeFetcher {
        responses: Mutex<Vec<Option<&'static str>>>,
        calls: AtomicUsize,
    }

    impl FakeFetcher {
        fn new(responses: &[Option<&'static str>]) -> Self {
            let mut queue = responses.to_vec();
            queue.reverse();
            Self {
                responses: Mutex::new(queue),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TableFetcher for FakeFetcher {
        async fn fetch(&self) -> SourceResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = {
                let mut queue = self.responses.lock().unwrap();
                if queue.len() > 1 { queue.pop() } else { queue.last().copied() }
            };
            match next.flatten() {
                Some(text) => Ok(text.to_string()),
                None => Err(SourceError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "offline",
                ))),
            }
        }
    }

    fn source(dir: &Path, responses: &[Option<&'static str>]) -> CachedRemoteSource<FakeFetcher> {
        CachedRemoteSource::with_fetcher(&SourceConfig::new(dir), FakeFetcher::new(responses))
    }

    #[tokio::test]
    async fn missing_cache_fetches_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let src = source(dir.path(), &[Some(GOOD)]);

        let table = src.load().await.unwrap();
        assert!(table.contains_key("Java"));
        assert_eq!(src.fetcher().calls(), 1);

        // Second load is served from disk.
        src.load().await.unwrap();
        assert_eq!(src.fetcher().calls(), 1);
        assert!(dir.path().join("languages.yml").exists());
    }

    #[tokio::test]
    async fn cached_table_needs_no_network() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("languages.yml"), GOOD).unwrap();
        let src = source(dir.path(), &[None]);

        assert_eq!(src.load().await.unwrap().len(), 1);
        assert_eq!(src.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn offline_without_cache_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let src = source(dir.path(), &[None]);

        let err = src.load().await.unwrap_err();
        assert!(matches!(err, LinguistError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn malformed_cache_is_replaced_once() {
        let dir = tempfile::tempdir().unwrap();
        let cached = dir.path().join("languages.yml");
        std::fs::write(&cached, BAD).unwrap();
        let src = source(dir.path(), &[Some(GOOD)]);

        let table = src.load().await.unwrap();
        assert!(table.contains_key("Java"));
        assert_eq!(src.fetcher().calls(), 1);
        assert!(parse_table(&std::fs::read_to_string(&cached).unwrap()).is_ok());
    }

    #[tokio::test]
    async fn malformed_cache_and_offline_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("languages.yml"), BAD).unwrap();
        let src = source(dir.path(), &[None]);

        let err = src.load().await.unwrap_err();
        assert!(matches!(err, LinguistError::SourceUnavailable(_)));
        assert_eq!(src.fetcher().calls(), 1);
    }

    #[tokio::test]
    async fn retry_is_bounded_when_network_is_malformed_too() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("languages.yml"), BAD).unwrap();
        let src = source(dir.path(), &[Some(BAD)]);

        let err = src.load().await.unwrap_err();
        assert!(matches!(err, LinguistError::SourceUnavailable(_)));
        assert_eq!(src.fetcher().calls(), MAX_MALFORMED_RETRIES);
        // Malformed data is never persisted.
        assert!(!dir.path().join("languages.yml").exists());
    }

    #[tokio::test]
    async fn malformed_custom_file_falls_back_to_default_cache() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("custom.yml");
        std::fs::write(&custom, BAD).unwrap();

        let mut cfg = SourceConfig::new(dir.path().join("cache"));
        cfg.table_file = Some(custom.clone());
        let src = CachedRemoteSource::with_fetcher(&cfg, FakeFetcher::new(&[Some(GOOD)]));
        assert_eq!(src.table_path(), custom);

        src.load().await.unwrap();

        assert_eq!(src.table_path(), cfg.default_table_path());
        assert!(cfg.default_table_path().exists());
        // The caller's file is left alone.
        assert_eq!(std::fs::read_to_string(&custom).unwrap(), BAD);
    }

    #[tokio::test]
    async fn refresh_always_fetches_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("languages.yml"), GOOD).unwrap();
        let newer = "Java:\n  type: programming\nKotlin:\n  type: programming\n  extensions: [\".kt\"]\n";
        let src = source(dir.path(), &[Some(newer)]);

        let table = src.refresh().await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(src.fetcher().calls(), 1);
        assert_eq!(src.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn refresh_with_malformed_network_data_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("languages.yml"), GOOD).unwrap();
        let src = source(dir.path(), &[Some(BAD)]);

        let err = src.refresh().await.unwrap_err();
        assert!(matches!(err, LinguistError::SourceUnavailable(_)));
        assert_eq!(src.fetcher().calls(), MAX_MALFORMED_RETRIES + 1);
        // Cache untouched.
        assert_eq!(src.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn refresh_recovers_when_refetch_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let src = source(dir.path(), &[Some(BAD), Some(GOOD)]);

        assert_eq!(src.refresh().await.unwrap().len(), 1);
        assert_eq!(src.fetcher().calls(), 2);
        assert!(dir.path().join("languages.yml").exists());
    }
}
