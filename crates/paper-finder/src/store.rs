//! File-backed list of user-submitted entries.
//!
//! The whole list lives in one JSON array. Every write replaces the file via
//! a sibling temp file and rename, and writes are serialized through a mutex
//! so concurrent adds never drop an entry.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::models::{NewEntry, Paper};

/// Persistent store of user entries.
#[derive(Debug)]
pub struct EntryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl EntryStore {
    /// Create a store backed by `path`. Nothing is read until [`Self::load`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all entries. A missing file is an empty list.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a JSON entry list.
    pub async fn load(&self) -> StoreResult<Vec<Paper>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No entry store yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Validate and append an entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad form, or an I/O error.
    pub async fn add(&self, entry: NewEntry) -> StoreResult<Paper> {
        let paper = entry.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.push(paper.clone());
        self.persist(&entries).await?;

        info!(title = %paper.title, total = entries.len(), "Entry added");
        Ok(paper)
    }

    /// Remove every entry with the given link. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read or written.
    pub async fn remove(&self, link: &str) -> StoreResult<usize> {
        let key = Paper { link: link.to_string(), ..Paper::default() }.link_key();

        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        let before = entries.len();
        entries.retain(|p| p.link_key() != key);
        let removed = before - entries.len();

        if removed > 0 {
            self.persist(&entries).await?;
            info!(link, removed, "Entries removed");
        }
        Ok(removed)
    }

    /// Drop every entry.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be written.
    pub async fn clear(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        self.persist(&[]).await?;
        info!(path = %self.path.display(), "Entry store cleared");
        Ok(())
    }

    /// Write the full list through a temp file.
    async fn persist(&self, entries: &[Paper]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), count = entries.len(), "Entry store written");
        Ok(())
    }
}
