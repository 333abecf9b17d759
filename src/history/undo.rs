//! Bounded LIFO of completed appends.
//!
//! Each successful append pushes one `UndoEntry`; each undo pops one.
//! When the stack is full a push is rejected: the append that triggered
//! it stays committed but cannot be undone.

/// Default number of undoable appends.
pub const UNDO_CAPACITY: usize = 50;

/// One completed append: which file, and how many bytes were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub filename: String,
    pub appended_len: u64,
}

#[derive(Debug, Clone)]
pub struct UndoStack {
    entries: Vec<UndoEntry>,
    capacity: usize,
}

impl UndoStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(UNDO_CAPACITY)),
            capacity,
        }
    }

    /// Push an entry.  Returns `false` (and drops it) when full.
    pub fn push(&mut self, filename: &str, appended_len: u64) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries.push(UndoEntry {
            filename: filename.to_string(),
            appended_len,
        });
        true
    }

    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(UNDO_CAPACITY)
    }
}
