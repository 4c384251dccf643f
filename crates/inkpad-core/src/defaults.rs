//! Centralized default constants for inkpad.
//!
//! **This module is the single source of truth** for shared default values.
//! Configuration layers start from these and override them; nothing here is an
//! invariant of the editor itself.

// =============================================================================
// PASTE CLASSIFICATION
// =============================================================================

/// File extensions treated as images, both for pasted URLs and uploads.
pub const IMAGE_TYPES: &[&str] = &["jpg", "jpeg", "png", "gif", "svg"];

/// Timeout for the content-type probe issued on the slow path, in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 10;

/// User-Agent sent by the HTTP content-type probe.
pub const PROBE_USER_AGENT: &str = concat!("inkpad/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Name of the single storage slot holding the saved document.
pub const STORAGE_KEY: &str = "content";

/// Maximum serialized snapshot size accepted into storage (5 MB).
pub const SNAPSHOT_BUDGET_BYTES: usize = 5_000_000;

/// Default directory for the filesystem slot store.
pub const STORAGE_DIR: &str = ".inkpad";

/// Prompt shown before a save overwrites the stored document.
pub const SAVE_PROMPT: &str = "Are you sure to save editor content?";

/// Notice shown when a save is rejected for size.
pub const CAPACITY_NOTICE: &str = "capacity exceeded";

// =============================================================================
// EDITOR
// =============================================================================

/// Block type inserted after images and used when a block toggle is undone.
pub const DEFAULT_NODE: &str = "paragraph";

/// Maximum top-level nodes; 0 means unlimited.
pub const NODE_LIMIT: usize = 0;

/// List item depth at which Tab steps back out instead of nesting further.
pub const MAX_LIST_DEPTH: usize = 3;

/// Placeholder text for an empty editor.
pub const PLACEHOLDER: &str = "Enter some rich text...";

/// Notice shown when an upload is not an allow-listed image.
pub const UNSUPPORTED_IMAGE_NOTICE: &str = "Please select an image file";

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

/// Path to a TOML config file.
pub const ENV_CONFIG: &str = "INKPAD_CONFIG";

/// Comma-separated image extension allow-list.
pub const ENV_IMAGE_TYPES: &str = "INKPAD_IMAGE_TYPES";

/// Probe timeout in seconds.
pub const ENV_PROBE_TIMEOUT_SECS: &str = "INKPAD_PROBE_TIMEOUT_SECS";

/// Storage slot name.
pub const ENV_STORAGE_KEY: &str = "INKPAD_STORAGE_KEY";

/// Snapshot size budget in bytes.
pub const ENV_BUDGET_BYTES: &str = "INKPAD_BUDGET_BYTES";

/// Directory for the filesystem slot store.
pub const ENV_STORAGE_DIR: &str = "INKPAD_STORAGE_DIR";

/// Top-level node limit.
pub const ENV_NODE_LIMIT: &str = "INKPAD_NODE_LIMIT";
