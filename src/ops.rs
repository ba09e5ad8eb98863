//! Mutation API for checklist documents.
//!
//! Every function takes the document, its arguments, and an optional undo
//! history. On success the effect is applied and, when a history is given,
//! exactly one inverse command is registered with it. Without a history the
//! document still changes but nothing is recorded.
//!
//! Arguments are validated before anything is touched: a rejected call
//! leaves both the document and the history as they were.
//!
//! | Function              | Inverse registered                        |
//! |-----------------------|-------------------------------------------|
//! | `toggle`              | `Toggle` of the same item                 |
//! | `add`                 | `Delete` at the new last index            |
//! | `delete`              | `ReplaceAll` with the prior list          |
//! | `delete_offsets`      | `ReplaceAll` with the prior list          |
//! | `delete_many`         | `ReplaceAll` with the prior list          |
//! | `replace_all`         | `ReplaceAll` with the prior list          |
//! | `move_items`          | `ReplaceAll` with the prior list          |
//! | `commit_title_change` | `RestoreTitle` with the pre-edit title    |
//! | `restore_title`       | `ReplaceAll` with the list before restore |
//! | `edit_title`          | none                                      |

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use crate::change::{Change, ChangeKind, ChangeOrigin};
use crate::models::{first_duplicate, ChecklistDocument, Item, ItemId};
use crate::undo::{Action, Command, UndoHistory};

/// What an edit pointed at that is not in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Item(ItemId),
    Index { index: usize, len: usize },
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Item(id) => write!(f, "item {}", id),
            Reference::Index { index, len } => {
                write!(f, "index {} (document has {} items)", index, len)
            }
        }
    }
}

/// Errors returned by the mutation API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Invalid reference: {0} is not in the document")]
    InvalidReference(Reference),

    #[error("Duplicate item id: {0}")]
    DuplicateItem(ItemId),
}

fn invalid(reference: Reference) -> EditError {
    warn!(%reference, "rejected edit");
    EditError::InvalidReference(reference)
}

fn item_position(doc: &ChecklistDocument, item: ItemId) -> Result<usize, EditError> {
    doc.position(item)
        .ok_or_else(|| invalid(Reference::Item(item)))
}

fn check_offsets(doc: &ChecklistDocument, offsets: &BTreeSet<usize>) -> Result<(), EditError> {
    let len = doc.len();
    match offsets.iter().find(|&&index| index >= len) {
        Some(&index) => Err(invalid(Reference::Index { index, len })),
        None => Ok(()),
    }
}

/// Register the inverse, returning the origin of the change just made.
fn record(history: Option<&mut UndoHistory>, action: Action, inverse: Command) -> ChangeOrigin {
    match history {
        Some(history) => {
            let origin = history.origin();
            history.register(action, inverse);
            origin
        }
        None => ChangeOrigin::User,
    }
}

/// Flip the checked flag of an item.
pub fn toggle(
    doc: &mut ChecklistDocument,
    item: ItemId,
    history: Option<&mut UndoHistory>,
) -> Result<Change, EditError> {
    let index = item_position(doc, item)?;
    let entry = &mut doc.items_mut()[index];
    entry.checked = !entry.checked;
    let checked = entry.checked;
    debug!(%item, checked, "toggled item");

    let origin = record(history, Action::Toggle, Command::Toggle { item });
    Ok(Change::new(ChangeKind::Toggled { item, checked }, origin))
}

/// Append a new unchecked item with a fresh id.
pub fn add(
    doc: &mut ChecklistDocument,
    title: impl Into<String>,
    history: Option<&mut UndoHistory>,
) -> Result<Change, EditError> {
    let item = Item::new(title);
    let id = item.id();
    doc.items_mut().push(item);
    let index = doc.len() - 1;
    debug!(item = %id, index, "added item");

    let origin = record(history, Action::Add, Command::Delete { index });
    Ok(Change::new(ChangeKind::Added { item: id, index }, origin))
}

/// Remove the item at `index`.
pub fn delete(
    doc: &mut ChecklistDocument,
    index: usize,
    history: Option<&mut UndoHistory>,
) -> Result<Change, EditError> {
    remove_offsets(doc, BTreeSet::from([index]), Action::Delete, history)
}

/// Remove every item at the given indices.
pub fn delete_offsets(
    doc: &mut ChecklistDocument,
    offsets: impl IntoIterator<Item = usize>,
    history: Option<&mut UndoHistory>,
) -> Result<Change, EditError> {
    let offsets: BTreeSet<usize> = offsets.into_iter().collect();
    remove_offsets(doc, offsets, Action::DeleteMany, history)
}

/// Remove every item whose id is in `ids`.
///
/// All ids must be present; otherwise nothing is removed.
pub fn delete_many(
    doc: &mut ChecklistDocument,
    ids: impl IntoIterator<Item = ItemId>,
    history: Option<&mut UndoHistory>,
) -> Result<Change, EditError> {
    let offsets = ids
        .into_iter()
        .map(|id| item_position(doc, id))
        .collect::<Result<BTreeSet<usize>, EditError>>()?;
    remove_offsets(doc, offsets, Action::DeleteMany, history)
}

fn remove_offsets(
    doc: &mut ChecklistDocument,
    offsets: BTreeSet<usize>,
    action: Action,
    history: Option<&mut UndoHistory>,
) -> Result<Change, EditError> {
    check_offsets(doc, &offsets)?;

    let prior = doc.items().to_vec();
    let removed: Vec<ItemId> = offsets.iter().map(|&i| prior[i].id()).collect();
    let mut index = 0;
    doc.items_mut().retain(|_| {
        let keep = !offsets.contains(&index);
        index += 1;
        keep
    });
    debug!(removed = removed.len(), remaining = doc.len(), "removed items");

    let origin = record(history, action, Command::ReplaceAll { items: prior });
    Ok(Change::new(ChangeKind::Removed { items: removed }, origin))
}

/// Replace the whole item list.
pub fn replace_all(
    doc: &mut ChecklistDocument,
    items: Vec<Item>,
    history: Option<&mut UndoHistory>,
) -> Result<Change, EditError> {
    if let Some(dup) = first_duplicate(&items) {
        warn!(item = %dup, "rejected replacement with duplicate ids");
        return Err(EditError::DuplicateItem(dup));
    }

    let prior = std::mem::replace(doc.items_mut(), items);
    let len = doc.len();
    debug!(before = prior.len(), after = len, "replaced items");

    let origin = record(history, Action::Replace, Command::ReplaceAll { items: prior });
    Ok(Change::new(ChangeKind::Replaced { len }, origin))
}

/// Move the items at `from` so they sit before the item currently at `to`.
///
/// `to` is an offset into the list as it is before the move, in `0..=len`.
/// Moved items keep their relative order. On `[A, B, C]`, moving `{0}` to `2`
/// gives `[B, A, C]` and moving `{0}` to `3` gives `[B, C, A]`.
pub fn move_items(
    doc: &mut ChecklistDocument,
    from: impl IntoIterator<Item = usize>,
    to: usize,
    history: Option<&mut UndoHistory>,
) -> Result<Change, EditError> {
    let offsets: BTreeSet<usize> = from.into_iter().collect();
    check_offsets(doc, &offsets)?;
    let len = doc.len();
    if to > len {
        return Err(invalid(Reference::Index { index: to, len }));
    }

    let prior = doc.items().to_vec();
    let mut moving = Vec::with_capacity(offsets.len());
    let mut rest = Vec::with_capacity(len - offsets.len());
    for (index, item) in std::mem::take(doc.items_mut()).into_iter().enumerate() {
        if offsets.contains(&index) {
            moving.push(item);
        } else {
            rest.push(item);
        }
    }
    let insert_at = to - offsets.range(..to).count();
    rest.splice(insert_at..insert_at, moving);
    *doc.items_mut() = rest;
    debug!(moved = offsets.len(), to, "moved items");

    let origin = record(history, Action::Move, Command::ReplaceAll { items: prior });
    Ok(Change::new(ChangeKind::Moved { len }, origin))
}

/// Set an item's title in place without recording history.
///
/// Used for per-keystroke edits; the undo step is registered once by
/// [`commit_title_change`] at the commit boundary.
pub fn edit_title(
    doc: &mut ChecklistDocument,
    item: ItemId,
    title: impl Into<String>,
) -> Result<Change, EditError> {
    let index = item_position(doc, item)?;
    doc.items_mut()[index].title = title.into();
    Ok(Change::user(ChangeKind::TitleEdited { item }))
}

/// Record a finished title edit as one undoable step.
///
/// The title has already been changed in place; `old_title` is the value it
/// had when editing began.
pub fn commit_title_change(
    doc: &mut ChecklistDocument,
    item: ItemId,
    old_title: impl Into<String>,
    history: Option<&mut UndoHistory>,
) -> Result<Change, EditError> {
    item_position(doc, item)?;
    debug!(%item, "committed title change");

    let inverse = Command::RestoreTitle {
        item,
        title: old_title.into(),
    };
    let origin = record(history, Action::Rename, inverse);
    Ok(Change::new(ChangeKind::TitleCommitted { item }, origin))
}

/// Put `title` back on the item, wherever it currently is.
///
/// The inverse is a snapshot of the list as it was before the restore, so
/// redoing brings back the newer title.
pub fn restore_title(
    doc: &mut ChecklistDocument,
    item: ItemId,
    title: String,
    history: Option<&mut UndoHistory>,
) -> Result<Change, EditError> {
    let index = item_position(doc, item)?;
    let snapshot = doc.items().to_vec();
    doc.items_mut()[index].title = title;
    debug!(%item, index, "restored title");

    let origin = record(history, Action::Rename, Command::ReplaceAll { items: snapshot });
    Ok(Change::new(ChangeKind::TitleRestored { item }, origin))
}
