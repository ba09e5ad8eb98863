mod document;
mod item;

pub(crate) use document::first_duplicate;
pub use document::{ChecklistDocument, DocumentId, STARTER_TITLES};
pub use item::{Item, ItemId};
