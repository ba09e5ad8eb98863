//! Checklist item.
//!
//! Items are identified by their [`ItemId`] alone. Two items with the same id
//! are the same item even when their title or checked flag differ, because
//! lookups and undo entries follow an item through edits by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Stable identifier of a checklist item.
///
/// Generated once when the item is created and never reused; an item that is
/// deleted and brought back by undo keeps its original id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a new random item ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get as UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl From<ItemId> for Uuid {
    fn from(id: ItemId) -> Self {
        id.as_uuid()
    }
}

/// One checklist entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    pub checked: bool,
    pub title: String,
}

impl Item {
    /// Create an unchecked item with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            checked: false,
            title: title.into(),
        }
    }

    /// Create an item with an existing id, e.g. when rebuilding persisted data.
    pub fn with_id(id: ItemId, title: impl Into<String>, checked: bool) -> Self {
        Self {
            id,
            checked,
            title: title.into(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Compare every field, not just identity.
    pub fn same_content(&self, other: &Item) -> bool {
        self.id == other.id && self.checked == other.checked && self.title == other.title
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.checked { "[x]" } else { "[ ]" };
        write!(f, "{} {}", check, self.title)
    }
}
