//! Language table sources for `linguist-core`.
//!
//! The table is GitHub Linguist's `languages.yml`. [`CachedRemoteSource`]
//! reads a cached copy from disk and refreshes it from the registry URL;
//! [`SourceConfig`] says where both live.
//!
//! # Example
//! ```no_run
//! use language_source::{CachedRemoteSource, SourceConfig};
//! use linguist_core::Linguist;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = SourceConfig::new(SourceConfig::default_cache_dir()?);
//! let linguist = Linguist::from_source(CachedRemoteSource::from_config(&cfg)?).await?;
//!
//! assert!(linguist.matches("src/Main.java", &["java"]));
//! # Ok(()) }
//! ```

pub mod cache;
pub mod cached_remote;
pub mod config;
pub mod errors;
pub mod remote;
pub mod schema;

pub use cached_remote::{CachedRemoteSource, MAX_MALFORMED_RETRIES};
pub use config::{DEFAULT_REGISTRY_URL, SourceConfig};
pub use errors::{ConfigError, SourceError, SourceResult};
pub use remote::{HttpFetcher, TableFetcher};
pub use schema::{LanguageRecord, parse_table, render_table};
