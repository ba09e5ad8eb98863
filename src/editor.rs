//! Editing session for one open checklist document.
//!
//! [`ChecklistEditor`] owns the document, its undo history and the change
//! listeners. Hosts call the edit methods and `undo`/`redo`; every successful
//! call returns the [`Change`] and also passes it to each subscribed
//! listener.
//!
//! A session started by loading bytes has an empty history: nothing before
//! the load can be undone.

use tracing::{debug, info};

use crate::change::{Change, ChangeKind, ChangeOrigin};
use crate::codec::{self, CorruptData, EncodeError};
use crate::config::EditorConfig;
use crate::models::{ChecklistDocument, Item, ItemId};
use crate::ops::{self, EditError};
use crate::undo::UndoHistory;

/// Callback invoked after every successful change.
///
/// Listeners must be `Send` so the editor itself can move between threads.
pub type ChangeListener = Box<dyn FnMut(&Change) + Send>;

pub struct ChecklistEditor {
    document: ChecklistDocument,
    history: Option<UndoHistory>,
    listeners: Vec<ChangeListener>,
}

impl std::fmt::Debug for ChecklistEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChecklistEditor")
            .field("document", &self.document)
            .field("history", &self.history)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for ChecklistEditor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl ChecklistEditor {
    /// Start a session on a new document with the configured starter items.
    pub fn new(config: &EditorConfig) -> Self {
        let document = ChecklistDocument::with_titles(config.starter_items.iter().cloned());
        Self::with_document(document, config)
    }

    /// Start a session on an existing document with an empty history.
    pub fn with_document(document: ChecklistDocument, config: &EditorConfig) -> Self {
        let history = config
            .undo_enabled
            .then(|| UndoHistory::new(config.history_config()));
        Self {
            document,
            history,
            listeners: Vec::new(),
        }
    }

    /// Start a session from persisted bytes.
    pub fn load(bytes: &[u8], config: &EditorConfig) -> Result<Self, CorruptData> {
        Self::load_contents(Some(bytes), config)
    }

    /// Start a session from file contents that may be absent.
    pub fn load_contents(
        contents: Option<&[u8]>,
        config: &EditorConfig,
    ) -> Result<Self, CorruptData> {
        let document = codec::decode_contents(contents)?;
        info!(document = %document.id(), items = document.len(), "loaded document");
        Ok(Self::with_document(document, config))
    }

    /// Replace the document with persisted bytes, clearing the history.
    ///
    /// On failure the current document and history are kept.
    pub fn reload(&mut self, bytes: &[u8]) -> Result<Change, CorruptData> {
        let document = codec::decode(bytes)?;
        info!(document = %document.id(), items = document.len(), "reloaded document");
        self.document = document;
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }

        let change = Change::user(ChangeKind::Loaded {
            len: self.document.len(),
        });
        self.notify(&change);
        Ok(change)
    }

    /// Encode the current document. The history is left as it is.
    pub fn save(&self) -> Result<Vec<u8>, EncodeError> {
        let bytes = codec::encode(&self.document)?;
        info!(document = %self.document.id(), bytes = bytes.len(), "saved document");
        Ok(bytes)
    }

    pub fn document(&self) -> &ChecklistDocument {
        &self.document
    }

    /// Owned copy of the document, e.g. to encode on another thread.
    pub fn snapshot(&self) -> ChecklistDocument {
        self.document.clone()
    }

    /// The undo history, if undo is enabled.
    pub fn history(&self) -> Option<&UndoHistory> {
        self.history.as_ref()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Change) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn toggle(&mut self, item: ItemId) -> Result<Change, EditError> {
        self.apply(|doc, history| ops::toggle(doc, item, history))
    }

    pub fn add(&mut self, title: impl Into<String>) -> Result<Change, EditError> {
        self.apply(|doc, history| ops::add(doc, title, history))
    }

    pub fn delete(&mut self, index: usize) -> Result<Change, EditError> {
        self.apply(|doc, history| ops::delete(doc, index, history))
    }

    pub fn delete_offsets(
        &mut self,
        offsets: impl IntoIterator<Item = usize>,
    ) -> Result<Change, EditError> {
        self.apply(|doc, history| ops::delete_offsets(doc, offsets, history))
    }

    pub fn delete_many(
        &mut self,
        ids: impl IntoIterator<Item = ItemId>,
    ) -> Result<Change, EditError> {
        self.apply(|doc, history| ops::delete_many(doc, ids, history))
    }

    pub fn replace_all(&mut self, items: Vec<Item>) -> Result<Change, EditError> {
        self.apply(|doc, history| ops::replace_all(doc, items, history))
    }

    pub fn move_items(
        &mut self,
        from: impl IntoIterator<Item = usize>,
        to: usize,
    ) -> Result<Change, EditError> {
        self.apply(|doc, history| ops::move_items(doc, from, to, history))
    }

    /// In-place title edit; not undoable on its own.
    pub fn edit_title(
        &mut self,
        item: ItemId,
        title: impl Into<String>,
    ) -> Result<Change, EditError> {
        self.apply(|doc, _| ops::edit_title(doc, item, title))
    }

    /// Close a title edit, recording `old_title` as the undo target.
    pub fn commit_title_change(
        &mut self,
        item: ItemId,
        old_title: impl Into<String>,
    ) -> Result<Change, EditError> {
        self.apply(|doc, history| ops::commit_title_change(doc, item, old_title, history))
    }

    /// Undo the most recent step. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool, EditError> {
        let Some(history) = self.history.as_mut() else {
            return Ok(false);
        };
        match history.undo(&mut self.document)? {
            Some(change) => {
                self.notify(&change);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Redo the most recently undone step. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> Result<bool, EditError> {
        let Some(history) = self.history.as_mut() else {
            return Ok(false);
        };
        match history.redo(&mut self.document)? {
            Some(change) => {
                self.notify(&change);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.as_ref().is_some_and(UndoHistory::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history.as_ref().is_some_and(UndoHistory::can_redo)
    }

    /// Menu label for the next undo, e.g. "Delete Item".
    pub fn undo_label(&self) -> Option<&'static str> {
        self.history.as_ref().and_then(UndoHistory::undo_label)
    }

    /// Menu label for the next redo.
    pub fn redo_label(&self) -> Option<&'static str> {
        self.history.as_ref().and_then(UndoHistory::redo_label)
    }

    fn apply<F>(&mut self, edit: F) -> Result<Change, EditError>
    where
        F: FnOnce(&mut ChecklistDocument, Option<&mut UndoHistory>) -> Result<Change, EditError>,
    {
        let change = edit(&mut self.document, self.history.as_mut())?;
        self.notify(&change);
        Ok(change)
    }

    fn notify(&mut self, change: &Change) {
        if change.origin != ChangeOrigin::User {
            debug!(origin = ?change.origin, "replayed change");
        }
        for listener in &mut self.listeners {
            listener(change);
        }
    }
}
