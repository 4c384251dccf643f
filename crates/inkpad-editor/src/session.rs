//! Editor session: routes insertions, keys and toolbar clicks to the document
//! model, and saves/restores it through bounded persistence.
//!
//! The document is shared behind a `tokio` mutex. Slow-path paste probes run
//! as spawned tasks that hold only a weak reference to it, so a session that
//! is dropped while a probe is in flight never sees the result applied.

use std::sync::{Arc, Weak};
use std::time::Instant;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, error, field, info, instrument, warn, Instrument, Span};

use inkpad_core::{
    defaults, logging, BlockSpec, BlockType, Classification, Confirmation, DocumentModel,
    DocumentSnapshot, EditCommand, Fragment, ImageIntent, MarkType, PasteCandidate, Result,
    SaveResult,
};
use inkpad_paste::{image_block_from_file, HttpContentTypeProbe, PasteClassifier, Triage};
use inkpad_store::{BoundedPersistence, FilesystemStore};

use crate::config::EditorConfig;
use crate::hotkeys::{HotkeyAction, HotkeyMap, KeyEvent};
use crate::render::render_document;
use crate::toolbar::{self, ButtonState};

/// What happened to an insertion.
#[derive(Debug)]
pub enum InsertOutcome {
    /// Inserted unchanged.
    Inserted,
    /// Replaced by an image without a network check.
    ImageInserted(ImageIntent),
    /// Waiting on a content-type probe.
    Pending(PendingInsert),
}

/// How a probed insertion was finally applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Image(ImageIntent),
    Text,
    /// The session was gone before the probe finished.
    Discarded,
}

/// Handle on an insertion whose classification is still running.
#[derive(Debug)]
pub struct PendingInsert {
    handle: JoinHandle<Resolution>,
}

impl PendingInsert {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the probe and its application to the document.
    pub async fn resolved(self) -> Resolution {
        match self.handle.await {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!(error = %e, "Paste classification task did not complete");
                Resolution::Discarded
            }
        }
    }
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Consumed by the session.
    Handled,
    /// Left to the document model's default handling.
    Delegated,
    /// Swallowed.
    Blocked,
}

/// A live editor over a document model `D`.
pub struct EditorSession<D: DocumentModel> {
    document: Arc<Mutex<D>>,
    classifier: Arc<PasteClassifier>,
    persistence: BoundedPersistence,
    confirmation: Arc<dyn Confirmation>,
    hotkeys: HotkeyMap,
    node_limit: usize,
}

impl<D: DocumentModel> EditorSession<D> {
    pub fn new(
        document: D,
        classifier: PasteClassifier,
        persistence: BoundedPersistence,
        confirmation: Arc<dyn Confirmation>,
    ) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
            classifier: Arc::new(classifier),
            persistence,
            confirmation,
            hotkeys: HotkeyMap::default(),
            node_limit: defaults::NODE_LIMIT,
        }
    }

    /// Session with the HTTP probe and a filesystem store, as configured.
    pub fn from_config(
        document: D,
        config: &EditorConfig,
        confirmation: Arc<dyn Confirmation>,
    ) -> Result<Self> {
        let probe = HttpContentTypeProbe::new(config.probe_timeout_secs)?;
        let classifier =
            PasteClassifier::new(Arc::new(probe)).with_image_types(config.image_types());
        let store = FilesystemStore::new(config.storage_dir.clone());
        let persistence = BoundedPersistence::new(Arc::new(store), config.persistence_config());

        Ok(Self::new(document, classifier, persistence, confirmation)
            .with_node_limit(config.node_limit))
    }

    pub fn with_hotkeys(mut self, hotkeys: HotkeyMap) -> Self {
        self.hotkeys = hotkeys;
        self
    }

    pub fn with_node_limit(mut self, node_limit: usize) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Lock the document.
    pub async fn document(&self) -> MutexGuard<'_, D> {
        self.document.lock().await
    }

    pub fn node_limit(&self) -> usize {
        self.node_limit
    }

    /// Set the top-level node limit; 0 is unlimited.
    pub fn set_node_limit(&mut self, node_limit: usize) {
        self.node_limit = node_limit;
    }

    pub async fn insert_text(&self, text: impl Into<String>) -> InsertOutcome {
        self.insert(PasteCandidate::Text(text.into())).await
    }

    pub async fn insert_fragment(&self, fragment: Fragment) -> InsertOutcome {
        self.insert(PasteCandidate::Fragment(fragment)).await
    }

    /// Intercept an insertion.
    ///
    /// Non-URLs are inserted at once and image URLs are replaced at once.
    /// Other URLs are probed in a background task; the returned
    /// [`PendingInsert`] resolves once the result has been applied against
    /// whatever the document holds by then.
    #[instrument(skip(self, candidate), fields(subsystem = "editor", component = "session", op = "insert"))]
    pub async fn insert(&self, candidate: PasteCandidate) -> InsertOutcome {
        match self.classifier.triage(candidate.payload()) {
            Triage::NotUrl => {
                self.document.lock().await.apply(candidate.into_command());
                InsertOutcome::Inserted
            }
            Triage::Image(intent) => {
                self.insert_pasted_image(&intent).await;
                InsertOutcome::ImageInserted(intent)
            }
            Triage::NeedsProbe(url) => {
                debug!(url = %candidate.payload(), "No image extension, probing content type");
                let classifier = Arc::clone(&self.classifier);
                let document = Arc::downgrade(&self.document);
                let handle = tokio::spawn(
                    async move {
                        let classification = classifier.probe(candidate.payload(), &url).await;
                        apply_classification(document, candidate, classification).await
                    }
                    .instrument(Span::current()),
                );
                InsertOutcome::Pending(PendingInsert { handle })
            }
        }
    }

    /// Replace a pasted URL with an image and move the caret to the end.
    pub async fn insert_pasted_image(&self, intent: &ImageIntent) {
        self.document
            .lock()
            .await
            .apply_all(pasted_image_commands(intent));
    }

    /// Insert an uploaded image file as a data-URL image block.
    #[instrument(skip(self, file_name, data), fields(subsystem = "editor", component = "session", op = "upload_image", file_name = %file_name))]
    pub async fn upload_image(&self, file_name: &str, data: &[u8]) -> Result<BlockSpec> {
        let block = image_block_from_file(file_name, data, self.classifier.image_types())?;
        self.document
            .lock()
            .await
            .apply_all(EditCommand::insert_void_block(block.clone()));
        info!(size_bytes = data.len(), "Image uploaded");
        Ok(block)
    }

    /// Handle a key press.
    pub async fn on_key_down(&self, event: &KeyEvent) -> KeyOutcome {
        let action = match self.hotkeys.resolve(event) {
            Some(action) => action,
            None => return KeyOutcome::Delegated,
        };

        let mut document = self.document.lock().await;
        match action {
            HotkeyAction::ToggleMark(mark) => {
                document.apply(EditCommand::ToggleMark(mark));
                KeyOutcome::Handled
            }
            HotkeyAction::Enter => {
                let count = document.top_level_node_count();
                if self.allows_new_block(count) {
                    KeyOutcome::Delegated
                } else {
                    debug!(node_count = count, node_limit = self.node_limit, "Node limit reached");
                    KeyOutcome::Blocked
                }
            }
            HotkeyAction::Tab => {
                let selection = document.selection();
                if selection.in_list && selection.item_depth == defaults::MAX_LIST_DEPTH {
                    document.apply(EditCommand::DecreaseItemDepth);
                }
                KeyOutcome::Delegated
            }
        }
    }

    fn allows_new_block(&self, top_level_nodes: usize) -> bool {
        self.node_limit == 0 || top_level_nodes < self.node_limit
    }

    pub async fn click_mark(&self, mark: MarkType) {
        self.document
            .lock()
            .await
            .apply_all(toolbar::mark_commands(mark));
    }

    pub async fn click_block(&self, block: BlockType) {
        let mut document = self.document.lock().await;
        let commands = toolbar::block_commands(block, &document.selection());
        document.apply_all(commands);
    }

    /// Toolbar buttons with their active flags for the current selection.
    pub async fn toolbar(&self) -> Vec<ButtonState> {
        toolbar::toolbar_state(&self.document.lock().await.selection())
    }

    /// Save the document. A successful save clears the editor.
    #[instrument(skip(self), fields(subsystem = "editor", component = "session", op = "save", outcome = field::Empty))]
    pub async fn save(&mut self) -> Result<SaveResult> {
        let start = Instant::now();
        let snapshot = self.document.lock().await.to_snapshot();
        let result = self
            .persistence
            .save(&snapshot, self.confirmation.as_ref())
            .await?;

        if result.is_saved() {
            let default = self.persistence.default_snapshot();
            if let Err(e) = self.document.lock().await.load_snapshot(default) {
                error!(error = %e, "Could not reset document after save");
            }
            self.node_limit = 0;
        }

        Span::current().record(logging::OUTCOME, result.label());
        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Save finished"
        );
        Ok(result)
    }

    /// Load the stored snapshot, or the default one, into the document.
    #[instrument(skip(self), fields(subsystem = "editor", component = "session", op = "restore"))]
    pub async fn restore(&mut self) -> DocumentSnapshot {
        let snapshot = self.persistence.restore().await;
        let mut document = self.document.lock().await;

        let restored = match document.load_snapshot(snapshot.clone()) {
            Ok(()) => snapshot,
            Err(e) => {
                warn!(error = %e, "Document rejected restored snapshot, loading default");
                let default = self.persistence.default_snapshot();
                if let Err(e) = document.load_snapshot(default.clone()) {
                    error!(error = %e, "Document rejected default snapshot");
                }
                default
            }
        };

        self.node_limit = 0;
        restored
    }

    /// Render the current document as HTML.
    pub async fn render_html(&self) -> String {
        render_document(&self.document.lock().await.to_snapshot())
    }
}

fn pasted_image_commands(intent: &ImageIntent) -> Vec<EditCommand> {
    let mut commands = EditCommand::insert_image(intent.target_url.clone());
    commands.push(EditCommand::MoveToEnd);
    commands
}

async fn apply_classification<D: DocumentModel>(
    document: Weak<Mutex<D>>,
    candidate: PasteCandidate,
    classification: Classification,
) -> Resolution {
    let document = match document.upgrade() {
        Some(document) => document,
        None => {
            debug!(
                outcome = classification.label(),
                "Session closed before probe finished, discarding"
            );
            return Resolution::Discarded;
        }
    };

    let mut document = document.lock().await;
    match classification {
        Classification::Handled(intent) => {
            document.apply_all(pasted_image_commands(&intent));
            Resolution::Image(intent)
        }
        Classification::PassThrough => {
            document.apply(candidate.into_command());
            Resolution::Text
        }
    }
}
