//! Fetching the registry over HTTP.
//!
//! [`TableFetcher`] is the seam between the cache logic and the network;
//! [`HttpFetcher`] is the production implementation (`GET {registry_url}`).

use std::future::Future;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::config::SourceConfig;
use crate::errors::{SourceError, SourceResult, make_snippet};

/// Produces the raw registry YAML text.
pub trait TableFetcher: Send + Sync {
    fn fetch(&self) -> impl Future<Output = SourceResult<String>> + Send;
}

/// Plain HTTP GET of the registry file.
///
/// The client is built once with the configured timeout and reused.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpFetcher {
    /// # Errors
    /// - [`crate::ConfigError`] if the URL or timeout is invalid
    /// - [`SourceError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: &SourceConfig) -> SourceResult<Self> {
        cfg.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            url: cfg.registry_url.trim().to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TableFetcher for HttpFetcher {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> SourceResult<String> {
        debug!("GET {}", self.url);
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::HttpStatus {
                status,
                url: self.url.clone(),
                snippet: make_snippet(&body),
            });
        }

        let text = resp.text().await?;
        debug!(bytes = text.len(), "registry downloaded");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;

    #[test]
    fn rejects_invalid_config() {
        let mut cfg = SourceConfig::new("/tmp/linguist");
        cfg.registry_url = "file:///etc/languages.yml".into();
        let err = HttpFetcher::new(&cfg).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Config(ConfigError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn keeps_trimmed_url() {
        let mut cfg = SourceConfig::new("/tmp/linguist");
        cfg.registry_url = " https://mirror.local/languages.yml ".into();
        let fetcher = HttpFetcher::new(&cfg).unwrap();
        assert_eq!(fetcher.url(), "https://mirror.local/languages.yml");
    }
}
