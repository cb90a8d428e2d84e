//! Bounded history of past simulation states.

/// Fixed-capacity ring of state snapshots, addressed relative to the most
/// recent write: `retrieve(0)` is the newest entry, `retrieve(n)` the one
/// written `n` pushes before it.
///
/// The ring never learns absolute tick numbers; "n ticks ago" is the only
/// coordinate system, which makes wrap-around trivial and keeps the
/// buffer reusable at any point in a session. Capacity is the hard bound
/// on recoverability: an entry more than `capacity - 1` pushes old has
/// been overwritten and is gone.
///
/// Entries are owned by their slot. Callers pass states in by value and
/// clone on retrieval; a stored snapshot is never aliased by the live,
/// still-mutating state.
#[derive(Debug)]
pub struct SnapshotRing<S> {
    slots: Vec<Option<S>>,
    /// Next slot to write. The newest entry is directly behind it.
    head: usize,
    /// Number of populated slots, saturating at capacity.
    len: usize,
}

impl<S> SnapshotRing<S> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "snapshot ring needs at least one slot");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a snapshot, evicting the oldest entry once the ring is full.
    pub fn push(&mut self, state: S) {
        self.slots[self.head] = Some(state);
        self.head = (self.head + 1) % self.capacity();
        self.len = (self.len + 1).min(self.capacity());
    }

    /// The snapshot written `n` pushes ago, or `None` once `n` reaches the
    /// number of retained entries (and always once it reaches capacity).
    pub fn retrieve(&self, n: usize) -> Option<&S> {
        if n >= self.len {
            return None;
        }
        self.slots[self.index_back(n)].as_ref()
    }

    /// Replace the snapshot written `n` pushes ago in place, without
    /// moving the head. This is the resimulation path: a redone tick
    /// overwrites its stale snapshot instead of appending a new one.
    ///
    /// Returns `false` (and stores nothing) if no entry exists at `n`.
    pub fn overwrite(&mut self, n: usize, state: S) -> bool {
        if n >= self.len {
            return false;
        }
        let index = self.index_back(n);
        self.slots[index] = Some(state);
        true
    }

    /// Slot holding the entry `n` pushes before the head. `retrieve` and
    /// `overwrite` both resolve through here so "n ticks ago" has exactly
    /// one meaning. Callers have already bounds-checked `n < len`.
    fn index_back(&self, n: usize) -> usize {
        let capacity = self.capacity();
        (self.head + capacity - 1 - n) % capacity
    }
}
