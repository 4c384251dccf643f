//! Test helpers for editor session tests.
//!
//! Provides a document model that records commands instead of editing a tree,
//! and a session builder over in-memory storage.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use inkpad_core::{
    Confirmation, DocumentModel, DocumentSnapshot, EditCommand, Error, FixedConfirmation, Result,
    SelectionState,
};
use inkpad_editor::{EditorSession, HotkeyMap, Platform};
use inkpad_paste::mock::MockProbe;
use inkpad_paste::PasteClassifier;
use inkpad_store::{BoundedPersistence, MemoryStore};

/// Document model double: records every command it is asked to apply.
#[derive(Debug, Default)]
pub struct RecordingDocument {
    pub commands: Vec<EditCommand>,
    pub selection: SelectionState,
    pub top_level_nodes: usize,
    pub snapshot: DocumentSnapshot,
    /// Snapshots passed to `load_snapshot`, accepted or not.
    pub loaded: Vec<DocumentSnapshot>,
    /// Reject any snapshot other than the empty document.
    pub reject_foreign_snapshots: bool,
}

impl DocumentModel for RecordingDocument {
    fn apply(&mut self, command: EditCommand) {
        self.commands.push(command);
    }

    fn selection(&self) -> SelectionState {
        self.selection.clone()
    }

    fn top_level_node_count(&self) -> usize {
        self.top_level_nodes
    }

    fn to_snapshot(&self) -> DocumentSnapshot {
        self.snapshot.clone()
    }

    fn load_snapshot(&mut self, snapshot: DocumentSnapshot) -> Result<()> {
        self.loaded.push(snapshot.clone());
        if self.reject_foreign_snapshots && snapshot != DocumentSnapshot::empty_document() {
            return Err(Error::InvalidInput("unknown node type".to_string()));
        }
        self.snapshot = snapshot;
        Ok(())
    }
}

pub struct Harness {
    pub session: EditorSession<RecordingDocument>,
    pub store: Arc<MemoryStore>,
}

/// Session over a [`RecordingDocument`], the given probe, in-memory storage
/// and a fixed confirmation answer. Hotkeys use Ctrl as `mod`.
pub fn harness(probe: MockProbe, confirm: bool) -> Harness {
    harness_with(probe, Arc::new(FixedConfirmation(confirm)))
}

pub fn harness_with(probe: MockProbe, confirmation: Arc<dyn Confirmation>) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let persistence = BoundedPersistence::with_defaults(store.clone());
    let session = EditorSession::new(
        RecordingDocument::default(),
        PasteClassifier::new(Arc::new(probe)),
        persistence,
        confirmation,
    )
    .with_hotkeys(HotkeyMap::for_platform(Platform::Other).expect("default hotkeys parse"));

    Harness { session, store }
}

/// Collects formatted log output from a subscriber installed with
/// `tracing::subscriber::set_default`.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let writer = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
