//! The cached `languages.yml` on disk.
//!
//! Writes go to a uniquely named sibling temp file that is renamed into
//! place. Readers never see a half-written table, and processes sharing the
//! cache directory never clobber each other's temp files.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tokio::{fs, task};
use tracing::{debug, warn};

use crate::errors::SourceResult;

/// Reads the cached table text, `None` when the file does not exist.
pub async fn read_table(path: &Path) -> SourceResult<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(text) => {
            debug!(path = %path.display(), bytes = text.len(), "read cached table");
            Ok(Some(text))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Replaces the cached table with `yaml`, creating parent directories.
pub async fn write_table(path: &Path, yaml: &str) -> SourceResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    fs::create_dir_all(&dir).await?;
    let target = path.to_path_buf();
    let bytes = yaml.as_bytes().to_vec();

    // The temp file is removed on drop if anything below fails.
    task::spawn_blocking(move || -> std::io::Result<()> {
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    })
    .await??;
    debug!(path = %path.display(), bytes = yaml.len(), "wrote cached table");
    Ok(())
}

/// Deletes a cached table; a missing file is not an error.
pub async fn discard_table(path: &Path) -> SourceResult<()> {
    match fs::remove_file(path).await {
        Ok(()) => {
            warn!(path = %path.display(), "discarded cached table");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
