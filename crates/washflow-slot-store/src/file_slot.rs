//! File-backed implementation of the `DurableSlot` trait.
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go to a sibling temp file
//! that is then renamed over the target, so a reader never observes a
//! half-written document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use washflow_core::error::DomainError;
use washflow_core::slot::DurableSlot;

/// Durable slot over a directory of JSON documents.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Creates a slot rooted at `dir`. The directory is created on first
    /// write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory documents are stored in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DomainError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(DomainError::validation(format!("invalid slot key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl DurableSlot for FileSlot {
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::infrastructure(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        let io_error = |e: std::io::Error| {
            DomainError::infrastructure(format!("failed to write {}: {e}", path.display()))
        };

        fs::create_dir_all(&self.dir).await.map_err(io_error)?;
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, value).await.map_err(io_error)?;
        fs::rename(&temp, &path).await.map_err(io_error)?;

        debug!(key, path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }
}
