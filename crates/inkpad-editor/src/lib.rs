//! # inkpad-editor
//!
//! Editor session and command resolution for inkpad.
//!
//! - [`EditorSession`]: wires a [`DocumentModel`](inkpad_core::DocumentModel)
//!   to paste classification, image upload, hotkeys, the toolbar and
//!   bounded persistence
//! - [`toolbar`]: button state and the edit commands a click resolves to
//! - [`hotkeys`]: `mod+b`-style shortcut parsing and matching
//! - [`render`]: HTML for editor nodes, marks and whole snapshots
//! - [`EditorConfig`]: TOML/environment configuration

pub mod config;
pub mod confirm;
pub mod hotkeys;
pub mod render;
pub mod session;
pub mod toolbar;

pub use config::{ConfigError, ConfigResult, EditorConfig};
pub use confirm::StdinConfirmation;
pub use hotkeys::{Hotkey, HotkeyAction, HotkeyMap, KeyEvent, Platform};
pub use render::{render_document, render_mark, render_node, NodeState};
pub use session::{EditorSession, InsertOutcome, KeyOutcome, PendingInsert, Resolution};
pub use toolbar::{ButtonState, ToolbarAction, ToolbarButton};
