//! # inkpad-store
//!
//! Snapshot persistence for the inkpad editor.
//!
//! This crate provides:
//! - [`BoundedPersistence`]: single-slot save/restore guarded by a byte budget
//! - Storage backends implementing [`inkpad_core::SnapshotStore`]:
//!   [`MemoryStore`] and [`FilesystemStore`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use inkpad_core::FixedConfirmation;
//! use inkpad_store::{BoundedPersistence, FilesystemStore};
//!
//! let persistence = BoundedPersistence::with_defaults(Arc::new(FilesystemStore::new(".inkpad")));
//! let result = persistence.save(&snapshot, &FixedConfirmation(true)).await?;
//! let restored = persistence.restore().await;
//! ```

pub mod backend;
pub mod persistence;

pub use backend::{is_valid_storage_key, FilesystemStore, MemoryStore};
pub use persistence::{serialized_size, BoundedPersistence, PersistenceConfig};
