//! Bounded most-recent-first list of accessed filenames.
//!
//! `RecentRing` is a circular buffer over a fixed slot array.  Logical
//! position 0 is the oldest entry and `len - 1` the newest; slot `i`
//! lives at `(front + i) % capacity`.  Recording a name that is already
//! present moves it to the newest position instead of duplicating it.
//! When the ring is full the oldest name is evicted.

/// Default number of remembered files.
pub const RECENT_CAPACITY: usize = 5;

#[derive(Debug, Clone)]
pub struct RecentRing {
    slots: Box<[Option<String>]>,
    front: usize,
    len: usize,
}

impl RecentRing {
    /// Create an empty ring.  A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            front: 0,
            len: 0,
        }
    }

    /// Record a successful access to `filename`.
    pub fn record_access(&mut self, filename: &str) {
        if let Some(pos) = self.position(filename) {
            self.remove_at(pos);
        }
        if self.len == self.capacity() {
            self.evict_oldest();
        }

        let slot = self.slot(self.len);
        self.slots[slot] = Some(filename.to_string());
        self.len += 1;
    }

    /// Up to `max_count` names, most recent first.
    pub fn list_recent(&self, max_count: usize) -> Vec<&str> {
        let count = max_count.min(self.len);
        (0..count)
            .filter_map(|i| self.get(self.len - 1 - i))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    // ------------------------------------------------------------------
    // Index bookkeeping
    // ------------------------------------------------------------------

    fn slot(&self, logical: usize) -> usize {
        (self.front + logical) % self.capacity()
    }

    fn get(&self, logical: usize) -> Option<&str> {
        self.slots[self.slot(logical)].as_deref()
    }

    fn position(&self, filename: &str) -> Option<usize> {
        (0..self.len).find(|&i| self.get(i) == Some(filename))
    }

    /// Drop the entry at `logical`, closing the gap towards the front.
    fn remove_at(&mut self, logical: usize) {
        for i in logical..self.len - 1 {
            let (here, next) = (self.slot(i), self.slot(i + 1));
            let moved = self.slots[next].take();
            self.slots[here] = moved;
        }
        let last = self.slot(self.len - 1);
        self.slots[last] = None;
        self.len -= 1;
    }

    fn evict_oldest(&mut self) {
        self.slots[self.front] = None;
        self.front = (self.front + 1) % self.capacity();
        self.len -= 1;
    }
}

impl Default for RecentRing {
    fn default() -> Self {
        Self::new(RECENT_CAPACITY)
    }
}
