//! Snapshot store backends.
//!
//! - [`MemoryStore`]: process-local map, for tests and embedding
//! - [`FilesystemStore`]: one file per slot under a base directory, written
//!   atomically (temp file + rename)

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use inkpad_core::{Error, Result, SnapshotStore};

/// In-memory snapshot store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}

/// Whether `key` can name a slot: non-empty, only `[A-Za-z0-9._-]`, and not
/// starting with a dot, so a key can never escape the base directory.
pub fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Filesystem snapshot store.
///
/// Path format: `{base_path}/{key}.json`
pub struct FilesystemStore {
    base_path: PathBuf,
}

impl FilesystemStore {
    /// Create a store rooted at `base_path`. The directory is created on first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File backing a slot. See [`is_valid_storage_key`].
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_storage_key(key) {
            return Err(Error::InvalidInput(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl SnapshotStore for FilesystemStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "fs_store: read failed");
                Err(Error::Storage(format!("read {}: {}", path.display(), e)))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        debug!(path = %path.display(), size = value.len(), "fs_store: write");

        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            warn!(base = %self.base_path.display(), error = %e, "fs_store: create_dir_all failed");
            e
        })?;

        // Atomic write: temp file + rename. The temp file is removed if any
        // step after its creation fails.
        let temp_path = path.with_extension("json.tmp");
        if let Err(e) = write_then_rename(&temp_path, &path, value).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_then_rename(temp_path: &Path, path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(temp_path).await.map_err(|e| {
        warn!(temp_path = %temp_path.display(), error = %e, "fs_store: File::create failed");
        e
    })?;
    file.write_all(value.as_bytes()).await.map_err(|e| {
        warn!(temp_path = %temp_path.display(), error = %e, "fs_store: write failed");
        e
    })?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, path).await.map_err(|e| {
        warn!(from = %temp_path.display(), to = %path.display(), error = %e, "fs_store: rename failed");
        e
    })
}
