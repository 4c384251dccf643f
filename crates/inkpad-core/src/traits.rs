//! Capability traits at the editor's seams.
//!
//! The document model, the network, the user's yes/no decision and the
//! storage slot are all supplied from outside; these traits are the narrow
//! interfaces inkpad depends on, enabling test doubles for each.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DocumentSnapshot, EditCommand, SelectionState};

// =============================================================================
// DOCUMENT MODEL
// =============================================================================

/// The external rich-text document model.
///
/// Tree mutation, selection math and undo/redo live behind this trait.
pub trait DocumentModel: Send + 'static {
    /// Apply one mutation.
    fn apply(&mut self, command: EditCommand);

    /// Marks, blocks and list context of the current selection.
    fn selection(&self) -> SelectionState;

    /// Number of top-level nodes in the document.
    fn top_level_node_count(&self) -> usize;

    /// Serializable form of the whole document.
    fn to_snapshot(&self) -> DocumentSnapshot;

    /// Replace the whole document. Fails if the model cannot accept the tree.
    fn load_snapshot(&mut self, snapshot: DocumentSnapshot) -> Result<()>;

    /// Apply a sequence of mutations in order.
    fn apply_all(&mut self, commands: Vec<EditCommand>) {
        for command in commands {
            self.apply(command);
        }
    }
}

// =============================================================================
// NETWORK
// =============================================================================

/// Looks up the content type a URL is served with.
#[async_trait]
pub trait ContentTypeProbe: Send + Sync {
    /// Returns the `Content-Type` header, or `None` if the response has none.
    /// Network failures and timeouts are errors.
    async fn content_type(&self, url: &str) -> Result<Option<String>>;
}

// =============================================================================
// USER CONFIRMATION
// =============================================================================

/// Yes/no prompt shown before a save overwrites storage.
#[async_trait]
pub trait Confirmation: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmation(pub bool);

#[async_trait]
impl Confirmation for FixedConfirmation {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// Key-value persistent store holding serialized snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read a slot. `Ok(None)` when the slot is empty.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Clear a slot. Clearing an empty slot is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_confirmation() {
        assert!(FixedConfirmation(true).confirm("save?").await);
        assert!(!FixedConfirmation(false).confirm("save?").await);
    }
}
