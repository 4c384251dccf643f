//! Size-bounded, single-slot snapshot persistence.
//!
//! A snapshot is written only if its serialized form fits the byte budget and
//! the user confirms. Restore never fails outward: an empty slot, a corrupt
//! record or an unreadable store all yield the configured default snapshot.
//!
//! Slot lifecycle: `Empty -> Saved -> Saved ...`. Rejected and cancelled saves
//! leave the slot as it was; restore is a pure read.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use inkpad_core::{
    defaults, Confirmation, DocumentSnapshot, Error, Result, SaveResult, SnapshotStore,
};

/// Persistence settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceConfig {
    /// Storage slot name.
    pub storage_key: String,
    /// Largest serialized snapshot accepted, in bytes.
    pub budget_bytes: usize,
    /// Snapshot returned when nothing usable is stored.
    pub default_snapshot: DocumentSnapshot,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            storage_key: defaults::STORAGE_KEY.to_string(),
            budget_bytes: defaults::SNAPSHOT_BUDGET_BYTES,
            default_snapshot: DocumentSnapshot::empty_document(),
        }
    }
}

/// Size of a serialized snapshot as counted against the budget (UTF-8 bytes).
pub fn serialized_size(serialized: &str) -> usize {
    serialized.len()
}

/// Guards a single storage slot with a size budget.
#[derive(Clone)]
pub struct BoundedPersistence {
    store: Arc<dyn SnapshotStore>,
    config: PersistenceConfig,
}

impl BoundedPersistence {
    pub fn new(store: Arc<dyn SnapshotStore>, config: PersistenceConfig) -> Self {
        Self { store, config }
    }

    /// Persistence over `store` with default key, budget and default snapshot.
    pub fn with_defaults(store: Arc<dyn SnapshotStore>) -> Self {
        Self::new(store, PersistenceConfig::default())
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// The snapshot restore falls back to.
    pub fn default_snapshot(&self) -> DocumentSnapshot {
        self.config.default_snapshot.clone()
    }

    /// Save with the configured budget.
    pub async fn save(
        &self,
        snapshot: &DocumentSnapshot,
        confirmation: &dyn Confirmation,
    ) -> Result<SaveResult> {
        self.save_with_budget(snapshot, self.config.budget_bytes, confirmation)
            .await
    }

    /// Save if the serialized snapshot is within `budget_bytes` and the user
    /// confirms.
    ///
    /// Over-budget and declined saves are reported through [`SaveResult`].
    /// A failing store write is an error, and so is a `null` snapshot, since
    /// restore reads a stored `null` back as the default document.
    #[instrument(skip(self, snapshot, confirmation), fields(subsystem = "store", component = "persistence", op = "save", storage_key = %self.config.storage_key))]
    pub async fn save_with_budget(
        &self,
        snapshot: &DocumentSnapshot,
        budget_bytes: usize,
        confirmation: &dyn Confirmation,
    ) -> Result<SaveResult> {
        if snapshot.as_value().is_null() {
            warn!(outcome = "rejected", "Null snapshot, save refused");
            return Err(Error::InvalidInput(
                "a null snapshot cannot be restored".to_string(),
            ));
        }

        let serialized = snapshot.to_json_string()?;
        let size_bytes = serialized_size(&serialized);

        if size_bytes > budget_bytes {
            warn!(
                size_bytes,
                budget_bytes,
                outcome = "rejected",
                "Snapshot over storage budget, save rejected"
            );
            return Ok(SaveResult::Rejected {
                reason: defaults::CAPACITY_NOTICE.to_string(),
                size_bytes,
                budget_bytes,
            });
        }

        if !confirmation.confirm(defaults::SAVE_PROMPT).await {
            debug!(size_bytes, outcome = "cancelled", "Save declined");
            return Ok(SaveResult::Cancelled);
        }

        self.store
            .set(&self.config.storage_key, &serialized)
            .await
            .map_err(|e| {
                warn!(error = %e, "Snapshot write failed");
                e
            })?;

        info!(size_bytes, budget_bytes, outcome = "saved", "Snapshot saved");
        Ok(SaveResult::Saved { size_bytes })
    }

    /// Read the stored snapshot, or `None` if the slot is empty.
    ///
    /// Unlike [`restore`](Self::restore) this reports storage and corruption
    /// errors.
    pub async fn load(&self) -> Result<Option<DocumentSnapshot>> {
        match self.store.get(&self.config.storage_key).await? {
            Some(raw) if !raw.trim().is_empty() => DocumentSnapshot::from_json_str(&raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Read the stored snapshot, falling back to the default snapshot.
    #[instrument(skip(self), fields(subsystem = "store", component = "persistence", op = "restore", storage_key = %self.config.storage_key))]
    pub async fn restore(&self) -> DocumentSnapshot {
        match self.load().await {
            Ok(Some(snapshot)) => {
                info!(outcome = "restored", "Snapshot restored");
                snapshot
            }
            Ok(None) => {
                debug!(outcome = "default", "No stored snapshot, using default");
                self.default_snapshot()
            }
            Err(Error::CorruptRecord(reason)) => {
                warn!(error = %reason, outcome = "default", "Stored snapshot is corrupt, using default");
                self.default_snapshot()
            }
            Err(e) => {
                warn!(error = %e, outcome = "default", "Stored snapshot unreadable, using default");
                self.default_snapshot()
            }
        }
    }

    /// Empty the slot.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(&self.config.storage_key).await
    }
}
