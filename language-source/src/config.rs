//! Source configuration, optionally read from the environment.
//!
//! # Environment variables
//!
//! - `LINGUIST_HOME`          = cache directory (default `$HOME/.linguist`)
//! - `LINGUIST_TABLE_FILE`    = caller-provided `languages.yml` (optional)
//! - `LINGUIST_REGISTRY_URL`  = registry URL (default: GitHub Linguist master)
//! - `LINGUIST_TIMEOUT_SECS`  = HTTP timeout in seconds (default 30)
//!
//! Blank values count as unset.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::errors::{ConfigError, SourceResult};

/// Upstream registry file of GitHub Linguist.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/github/linguist/master/lib/linguist/languages.yml";

/// File name of the cached table inside the cache directory.
pub const TABLE_FILE_NAME: &str = "languages.yml";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the table is cached and where it is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Directory holding the cached `languages.yml`.
    pub cache_dir: PathBuf,
    /// Caller-provided table file, preferred over the cache when usable.
    pub table_file: Option<PathBuf>,
    /// Registry URL, `http://` or `https://`.
    pub registry_url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl SourceConfig {
    /// Config with the given cache directory and upstream defaults.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            table_file: None,
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// `$HOME/.linguist`.
    ///
    /// # Errors
    /// [`ConfigError::NoHomeDir`] when the platform reports no home directory.
    pub fn default_cache_dir() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(".linguist"))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Reads the process environment, see the module docs.
    pub fn from_env() -> SourceResult<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`SourceConfig::from_env`] with a custom variable lookup.
    pub fn from_vars<F>(lookup: F) -> SourceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let cache_dir = match var("LINGUIST_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => Self::default_cache_dir()?,
        };

        let mut cfg = Self::new(cache_dir);
        cfg.table_file = var("LINGUIST_TABLE_FILE").map(PathBuf::from);
        if let Some(url) = var("LINGUIST_REGISTRY_URL") {
            cfg.registry_url = url.trim().to_string();
        }
        if let Some(secs) = var("LINGUIST_TIMEOUT_SECS") {
            cfg.timeout_secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "LINGUIST_TIMEOUT_SECS",
                    reason: "expected u64",
                })?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks URL scheme and timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.registry_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidFormat {
                var: "LINGUIST_REGISTRY_URL",
                reason: "must start with http:// or https://",
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                var: "LINGUIST_TIMEOUT_SECS",
                reason: "must be greater than 0",
            });
        }
        Ok(())
    }

    /// `<cache_dir>/languages.yml`.
    pub fn default_table_path(&self) -> PathBuf {
        self.cache_dir.join(TABLE_FILE_NAME)
    }

    /// The table file to read: the caller's file when it exists and is YAML,
    /// otherwise the default cache file.
    pub fn table_path(&self) -> PathBuf {
        match &self.table_file {
            Some(file) if is_usable_table_file(file) => file.clone(),
            Some(file) => {
                warn!(
                    path = %file.display(),
                    "table file missing or not .yml/.yaml, using cache"
                );
                self.default_table_path()
            }
            None => self.default_table_path(),
        }
    }
}

fn is_usable_table_file(path: &Path) -> bool {
    let yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == "yml" || e == "yaml");
    yaml && path.is_file()
}
