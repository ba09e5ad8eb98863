//! Persisted format for checklist documents.
//!
//! Documents are stored as pretty-printed JSON so saved files stay readable
//! and diff cleanly:
//!
//! ```text
//! {
//!   "id": "5d0c7c9e-…",
//!   "items": [
//!     { "id": "0b6f…", "checked": false, "title": "Item 1" }
//!   ]
//! }
//! ```
//!
//! Decoding is all-or-nothing and ignores fields it does not know, so files
//! written by newer versions still open.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{ChecklistDocument, DocumentId, Item, ItemId};

/// Errors that can occur while decoding a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorruptData {
    #[error("Document contents are missing")]
    Missing,

    #[error("Document contents are empty")]
    Empty,

    #[error("Document contents are malformed: {0}")]
    Malformed(String),

    #[error("Document contains item {0} more than once")]
    DuplicateItem(ItemId),
}

/// Error returned when a document cannot be written out.
#[derive(Error, Debug)]
#[error("Failed to encode document: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

#[derive(Serialize)]
struct WireDocumentRef<'a> {
    id: DocumentId,
    items: &'a [Item],
}

#[derive(Deserialize)]
struct WireDocument {
    id: DocumentId,
    items: Vec<Item>,
}

/// Encode a document to bytes.
///
/// Output is deterministic for a given document.
pub fn encode(doc: &ChecklistDocument) -> Result<Vec<u8>, EncodeError> {
    let wire = WireDocumentRef {
        id: doc.id(),
        items: doc.items(),
    };
    serde_json::to_vec_pretty(&wire).map_err(|e| {
        warn!(error = %e, "failed to encode document");
        EncodeError::from(e)
    })
}

/// Decode a document from bytes.
pub fn decode(bytes: &[u8]) -> Result<ChecklistDocument, CorruptData> {
    if bytes.is_empty() {
        warn!("refusing to decode empty document");
        return Err(CorruptData::Empty);
    }

    let wire: WireDocument = serde_json::from_slice(bytes).map_err(|e| {
        warn!(error = %e, "failed to decode document");
        CorruptData::Malformed(e.to_string())
    })?;

    ChecklistDocument::from_items(wire.id, wire.items).map_err(|dup| {
        warn!(item = %dup, "decoded document repeats an item id");
        CorruptData::DuplicateItem(dup)
    })
}

/// Decode file contents that may be absent altogether.
pub fn decode_contents(contents: Option<&[u8]>) -> Result<ChecklistDocument, CorruptData> {
    match contents {
        Some(bytes) => decode(bytes),
        None => {
            warn!("document has no contents");
            Err(CorruptData::Missing)
        }
    }
}
