//! Error handling for `language-source`.
//!
//! [`SourceError`] is the crate-level type; configuration problems are grouped
//! in [`ConfigError`]. Crossing into the core, every error collapses into the
//! [`LinguistError`] taxonomy: undecodable YAML becomes
//! [`LinguistError::MalformedTable`], everything else
//! [`LinguistError::SourceUnavailable`].

use linguist_core::LinguistError;
use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for the crate.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Top-level error for table sources.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading or writing the cached table.
    #[error("[Linguist] cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Table text is not valid registry YAML.
    #[error("[Linguist] invalid table YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// Blocking cache write task panicked or was cancelled.
    #[error("[Linguist] task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("[Linguist] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Registry answered with a non-2xx status.
    #[error("[Linguist] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        /// First few hundred characters of the body.
        snippet: String,
    },
}

/// Invalid configuration values.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("[Linguist] invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    #[error("[Linguist] invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },

    /// No home directory to derive the default cache directory from.
    #[error("[Linguist] cannot determine a home directory for the default cache")]
    NoHomeDir,
}

impl From<SourceError> for LinguistError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::Yaml(inner) => LinguistError::MalformedTable(inner.to_string()),
            other => LinguistError::SourceUnavailable(other.to_string()),
        }
    }
}

/// Trims a response body for error messages.
pub(crate) fn make_snippet(body: &str) -> String {
    const MAX: usize = 256;
    let body = body.trim();
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_errors_become_malformed_table() {
        let yaml_err = serde_yml::from_str::<u32>("[not, a, number]").unwrap_err();
        let err: LinguistError = SourceError::Yaml(yaml_err).into();
        assert!(err.is_malformed());
    }

    #[test]
    fn io_errors_become_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: LinguistError = SourceError::Io(io).into();
        assert!(matches!(err, LinguistError::SourceUnavailable(_)));
    }

    #[test]
    fn snippet_is_bounded() {
        assert_eq!(make_snippet("  short  "), "short");
        let long = "x".repeat(1000);
        assert_eq!(make_snippet(&long).chars().count(), 257);
    }
}
