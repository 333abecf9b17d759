//! Volatile session history: recently accessed files and pending undos.
//!
//! Neither structure is persisted; both start empty on every run.

pub mod recent;
pub mod undo;

pub use recent::{RecentRing, RECENT_CAPACITY};
pub use undo::{UndoEntry, UndoStack, UNDO_CAPACITY};
