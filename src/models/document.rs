//! Checklist document state.
//!
//! A document is an identifier plus an ordered list of items. Display order,
//! storage order and persisted order are the same thing. The item list is
//! only changed through [`crate::ops`], which keeps the undo history in step.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use super::item::{Item, ItemId};

/// Titles of the items a brand new document starts with.
pub const STARTER_TITLES: [&str; 2] = ["Item 1", "Item 2"];

/// Identifier of a checklist document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a new random document ID
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

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for DocumentId {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

/// The full checklist: id plus ordered items.
///
/// No two items share an id. Constructors that take external data reject
/// duplicates, and the mutation functions preserve the rule.
#[derive(Debug, Clone)]
pub struct ChecklistDocument {
    id: DocumentId,
    items: Vec<Item>,
}

impl ChecklistDocument {
    /// Create a document with the built-in starter items.
    pub fn new() -> Self {
        Self::with_titles(STARTER_TITLES)
    }

    /// Create a document with one unchecked item per title.
    pub fn with_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: DocumentId::new(),
            items: titles.into_iter().map(Item::new).collect(),
        }
    }

    /// Build a document from existing data.
    ///
    /// Returns the first repeated id as the error if items are not unique.
    pub fn from_items(id: DocumentId, items: Vec<Item>) -> Result<Self, ItemId> {
        if let Some(dup) = first_duplicate(&items) {
            return Err(dup);
        }
        Ok(Self { id, items })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Current index of the item with the given id.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Number of checked items.
    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }
}

impl Default for ChecklistDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChecklistDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// First id that appears more than once, if any.
pub(crate) fn first_duplicate(items: &[Item]) -> Option<ItemId> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .map(Item::id)
        .find(|id| !seen.insert(*id))
}
