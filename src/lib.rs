//! Checklist Core Library
//!
//! Document model, undoable edits and persisted format for a single
//! checklist document.

pub mod change;
pub mod codec;
pub mod config;
pub mod editor;
pub mod models;
pub mod ops;
pub mod undo;

pub use change::{Change, ChangeKind, ChangeOrigin};
pub use codec::{decode, decode_contents, encode, CorruptData, EncodeError};
pub use config::{ConfigError, EditorConfig};
pub use editor::{ChangeListener, ChecklistEditor};
pub use models::{ChecklistDocument, DocumentId, Item, ItemId};
pub use ops::{EditError, Reference};
pub use undo::{Action, Command, HistoryConfig, UndoHistory};

/// A new document with the built-in starter items.
pub fn new_document() -> ChecklistDocument {
    ChecklistDocument::new()
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
