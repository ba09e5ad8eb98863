//! Change notifications emitted after every successful edit.
//!
//! Hosts use these to refresh their view of the document. Whether a change
//! came from the user or from replaying history is carried in
//! [`ChangeOrigin`].

use crate::models::ItemId;

/// Where a change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeOrigin {
    /// Direct call into the mutation API.
    #[default]
    User,
    /// Replayed while undoing.
    Undo,
    /// Replayed while redoing.
    Redo,
}

/// What happened to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    Toggled { item: ItemId, checked: bool },
    Added { item: ItemId, index: usize },
    Removed { items: Vec<ItemId> },
    Replaced { len: usize },
    Moved { len: usize },
    /// In-place title edit, not recorded in history.
    TitleEdited { item: ItemId },
    TitleCommitted { item: ItemId },
    TitleRestored { item: ItemId },
    Loaded { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    pub origin: ChangeOrigin,
}

impl Change {
    pub fn new(kind: ChangeKind, origin: ChangeOrigin) -> Self {
        Self { kind, origin }
    }

    pub fn user(kind: ChangeKind) -> Self {
        Self::new(kind, ChangeOrigin::User)
    }

    /// True if the change was produced by undo or redo.
    pub fn is_replay(&self) -> bool {
        self.origin != ChangeOrigin::User
    }
}
