//! Ordered input events and the damage watermark.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use volley_netproto::{InputEvent, Tick};

/// Input events awaiting (re)application, totally ordered by
/// `(tick, seq)`.
///
/// The queue tracks a single *damage watermark*: the earliest tick whose
/// previously computed outcome can no longer be trusted, because an event
/// at or before it has landed since that tick was resolved. Everything at
/// or after the watermark is the rollback loop's working set for the next
/// pass.
///
/// Resolved events are not removed eagerly; the loop re-applies them
/// when a later correction rewinds across their ticks.
/// [`EventQueue::prune_before`] bounds memory by dropping events that
/// have fallen behind the snapshot window, where no rewind can reach
/// them anyway.
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Sorted ascending by `(tick, seq)`; equal keys keep insertion order.
    events: Vec<InputEvent>,
    damaged_from: Tick,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Earliest tick whose outcome is no longer trusted.
    pub fn damage_watermark(&self) -> Tick {
        self.damaged_from
    }

    /// Insert an event at its ordered position and pull the damage
    /// watermark down to its tick if it lands earlier.
    pub fn insert(&mut self, event: InputEvent) {
        let key = event.sort_key();
        let at = self.events.partition_point(|queued| queued.sort_key() <= key);
        self.events.insert(at, event);
        self.damaged_from = self.damaged_from.min(event.tick);
    }

    /// All events at or after the damage watermark, in `(tick, seq)`
    /// order. Empty when nothing is pending.
    pub fn damaged_slice(&self) -> &[InputEvent] {
        let from = self
            .events
            .partition_point(|queued| queued.tick < self.damaged_from);
        &self.events[from..]
    }

    /// Raise the watermark once everything below `tick` has been
    /// resimulated. Only the rollback loop may call this, and only
    /// forwards; insertion is the one thing that moves it back.
    pub fn reset_damage(&mut self, tick: Tick) {
        debug_assert!(tick >= self.damaged_from);
        self.damaged_from = tick;
    }

    /// Drop events older than `tick`. Callers pass the trailing edge of
    /// the snapshot window: anything behind it can never be replayed
    /// again, so keeping it would only grow the queue.
    pub fn prune_before(&mut self, tick: Tick) {
        self.events.retain(|queued| queued.tick >= tick);
    }
}

/// Cloneable handle to an [`EventQueue`] shared between the transport
/// delivery path and the simulation driver.
///
/// The transport side only ever calls [`SharedEventQueue::insert`]; the
/// driver takes the guard for the full duration of a scheduling pass, so
/// a pass always sees a consistent queue and a concurrent arrival simply
/// waits for the pass to finish.
#[derive(Debug, Clone, Default)]
pub struct SharedEventQueue {
    inner: Arc<Mutex<EventQueue>>,
}

impl SharedEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert from any thread.
    pub fn insert(&self, event: InputEvent) {
        self.inner.lock().insert(event);
    }

    /// Exclusive access for a scheduling pass.
    pub fn lock(&self) -> MutexGuard<'_, EventQueue> {
        self.inner.lock()
    }
}
