//! Replayable history entries.
//!
//! A [`Command`] is plain data: it captures the values needed to reverse an
//! edit (an item id, an index, a full snapshot of the item list, an old
//! title) and is replayed by dispatching back into [`crate::ops`]. Because
//! the mutation functions register their own inverse on every call, running
//! a command while undoing automatically produces the matching redo entry,
//! and running it while redoing produces the next undo entry.
//!
//! # Invariants
//!
//! - Replaying a command either applies its full effect and registers one
//!   inverse, or fails with [`EditError`] and leaves the document untouched.
//! - Commands never hold references into the document; they stay valid
//!   across any sequence of edits and are checked against the document when
//!   replayed.

use std::fmt;

use crate::change::Change;
use crate::models::{ChecklistDocument, Item, ItemId};
use crate::ops::{self, EditError};

use super::history::UndoHistory;

/// The user-level action a history entry belongs to.
///
/// Labels stay with the entry as it moves between the undo and redo stacks,
/// so "Undo Add Item" becomes "Redo Add Item" after undoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Toggle,
    Add,
    Delete,
    DeleteMany,
    Replace,
    Move,
    Rename,
}

impl Action {
    /// Human-readable label for menus (e.g. "Undo Delete Item").
    pub fn label(&self) -> &'static str {
        match self {
            Action::Toggle => "Toggle Item",
            Action::Add => "Add Item",
            Action::Delete => "Delete Item",
            Action::DeleteMany => "Delete Items",
            Action::Replace => "Replace Items",
            Action::Move => "Move Items",
            Action::Rename => "Rename Item",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A reversible step, bound to the values captured when it was registered.
#[derive(Debug, Clone)]
pub enum Command {
    /// Flip the checked flag of an item. Self-inverse.
    Toggle { item: ItemId },
    /// Remove the item at an index.
    Delete { index: usize },
    /// Replace the whole item list with a snapshot.
    ReplaceAll { items: Vec<Item> },
    /// Put back a title that was edited in place, locating the item by id.
    RestoreTitle { item: ItemId, title: String },
}

impl Command {
    /// Replay this command through the mutation API.
    ///
    /// The inverse is registered with `history` exactly as for a direct call;
    /// the history's recording mode decides which stack receives it.
    pub fn apply(
        &self,
        doc: &mut ChecklistDocument,
        history: Option<&mut UndoHistory>,
    ) -> Result<Change, EditError> {
        match self {
            Command::Toggle { item } => ops::toggle(doc, *item, history),
            Command::Delete { index } => ops::delete(doc, *index, history),
            Command::ReplaceAll { items } => ops::replace_all(doc, items.clone(), history),
            Command::RestoreTitle { item, title } => {
                ops::restore_title(doc, *item, title.clone(), history)
            }
        }
    }

    /// Number of items this command keeps alive.
    pub fn retained_items(&self) -> usize {
        match self {
            Command::ReplaceAll { items } => items.len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::Add.label(), "Add Item");
        assert_eq!(Action::DeleteMany.label(), "Delete Items");
        assert_eq!(format!("{}", Action::Rename), "Rename Item");
    }

    #[test]
    fn test_apply_toggle_without_history() {
        let mut doc = ChecklistDocument::with_titles(["A"]);
        let id = doc.items()[0].id();

        Command::Toggle { item: id }.apply(&mut doc, None).unwrap();
        assert!(doc.items()[0].checked);
    }

    #[test]
    fn test_apply_delete_without_history() {
        let mut doc = ChecklistDocument::with_titles(["A", "B"]);
        Command::Delete { index: 0 }.apply(&mut doc, None).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.items()[0].title, "B");
    }

    #[test]
    fn test_apply_replace_all_restores_snapshot() {
        let mut doc = ChecklistDocument::with_titles(["A", "B"]);
        let snapshot = doc.items().to_vec();
        ops::delete(&mut doc, 0, None).unwrap();

        Command::ReplaceAll {
            items: snapshot.clone(),
        }
        .apply(&mut doc, None)
        .unwrap();
        assert_eq!(doc.items(), snapshot.as_slice());
    }

    #[test]
    fn test_apply_restore_title_finds_item_by_id() {
        let mut doc = ChecklistDocument::with_titles(["A", "B"]);
        let b = doc.items()[1].id();
        ops::move_items(&mut doc, [1], 0, None).unwrap();

        Command::RestoreTitle {
            item: b,
            title: "Old B".to_string(),
        }
        .apply(&mut doc, None)
        .unwrap();
        assert_eq!(doc.items()[0].title, "Old B");
        assert_eq!(doc.items()[1].title, "A");
    }

    #[test]
    fn test_apply_to_missing_item_fails_without_change() {
        let mut doc = ChecklistDocument::with_titles(["A"]);
        let result = Command::Toggle { item: ItemId::new() }.apply(&mut doc, None);
        assert!(matches!(result, Err(EditError::InvalidReference(_))));
        assert!(!doc.items()[0].checked);
    }

    #[test]
    fn test_retained_items() {
        let snapshot = vec![Item::new("A"), Item::new("B")];
        assert_eq!(Command::ReplaceAll { items: snapshot }.retained_items(), 2);
        assert_eq!(Command::Delete { index: 0 }.retained_items(), 0);
    }
}
