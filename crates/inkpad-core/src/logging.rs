//! Structured logging schema and field name constants for inkpad.
//!
//! All crates use these constants for consistent structured logging fields.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded editor state: a document could not be reset |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, completed saves and restores |
//! | DEBUG | Decision points (fast path vs probe, cancelled save) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "paste", "store", "editor"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "classifier", "http_probe", "persistence", "fs_store"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "classify", "probe", "save", "restore", "upload"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// URL being classified or probed.
pub const URL: &str = "url";

/// Content-Type header value returned by a probe.
pub const CONTENT_TYPE: &str = "content_type";

/// Extension extracted from a URL path, file name or content type.
pub const EXTENSION: &str = "extension";

/// Storage slot name.
pub const STORAGE_KEY: &str = "storage_key";

/// Uploaded file name.
pub const FILE_NAME: &str = "file_name";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Serialized snapshot size in bytes.
pub const SIZE_BYTES: &str = "size_bytes";

/// Configured size budget in bytes.
pub const BUDGET_BYTES: &str = "budget_bytes";

/// Number of top-level document nodes.
pub const NODE_COUNT: &str = "node_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Classification or save outcome ("image", "pass_through", "saved", ...).
pub const OUTCOME: &str = "outcome";

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
