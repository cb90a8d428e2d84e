//! The detect / rewind / replay loop.

use tracing::debug;
use volley_netproto::{InputEvent, Tick};

use crate::{
    error::RollbackError,
    queue::SharedEventQueue,
    snapshot::SnapshotRing,
};

/// The pluggable simulation seam.
///
/// The rollback loop never looks inside a state; it only clones it into
/// and out of the snapshot ring, folds events into it, and asks for the
/// next tick. Implementations must keep `step` a pure function of its
/// argument (no clocks, no randomness, no I/O) or replays stop being
/// reproducible and the whole scheme collapses.
pub trait Simulate {
    type State: Clone;

    /// Fold one input event into the state it takes effect on. Called
    /// before `step` for every event targeting the current tick.
    fn apply_input(&self, state: &mut Self::State, event: &InputEvent);

    /// Produce the next tick's state. Never invoked with ticks out of
    /// order within a single replay.
    fn step(&self, state: &Self::State) -> Self::State;
}

/// Drives a [`Simulate`] implementation forward in real time while
/// keeping enough history to redo the recent past.
///
/// One scheduling pass ([`RollbackLoop::advance_to`]) runs per display
/// frame, not per simulation tick. Each pass:
///
/// 1. **Detect**: read the damaged slice of the event queue. An event
///    targeting a tick before the live tick means prediction was wrong
///    and a correction is required.
/// 2. **Rewind**: restore the snapshot taken just before the earliest
///    damaged tick. If the ring no longer holds it, the session is
///    unrecoverably desynced.
/// 3. **Replay**: step tick by tick up to the scheduler's target,
///    applying every queued event at the tick it targets. Redone ticks
///    overwrite their stale snapshots in place; ticks past the original
///    live tick push new ones.
///
/// A pass is not interruptible: it holds the queue guard and must run to
/// completion before the next pass, since a partial replay would leave
/// the ring half-overwritten. Externally the live tick never decreases;
/// only the working tick inside a pass travels backwards.
///
/// After a fatal [`RollbackError`] the loop must not be driven further:
/// the state and ring are part-way through a correction that will never
/// finish.
pub struct RollbackLoop<S: Simulate> {
    sim: S,
    state: S::State,
    tick: Tick,
    snapshots: SnapshotRing<S::State>,
    queue: SharedEventQueue,
}

impl<S: Simulate> RollbackLoop<S> {
    /// New loop at tick 0. The initial state is seeded into the ring so
    /// even tick 0 can be redone.
    pub fn new(sim: S, initial: S::State, window_ticks: usize, queue: SharedEventQueue) -> Self {
        let mut snapshots = SnapshotRing::new(window_ticks);
        snapshots.push(initial.clone());
        Self {
            sim,
            state: initial,
            tick: 0,
            snapshots,
            queue,
        }
    }

    /// The live state, for rendering. Read-only: mutating simulation
    /// state from outside would bypass the snapshot history.
    pub fn state(&self) -> &S::State {
        &self.state
    }

    /// The live tick: how far the simulation has advanced.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Retained history, for diagnostics.
    pub fn snapshots(&self) -> &SnapshotRing<S::State> {
        &self.snapshots
    }

    /// Handle for feeding events into this loop's queue.
    pub fn queue(&self) -> SharedEventQueue {
        self.queue.clone()
    }

    /// Run one scheduling pass, closing the gap between the live tick and
    /// `target`. A target at or below the live tick advances nothing but
    /// still reconciles any pending correction.
    pub fn advance_to(&mut self, target: Tick) -> Result<(), RollbackError> {
        let target = target.max(self.tick);

        let mut queue = self.queue.lock();
        let damaged: Vec<InputEvent> = queue.damaged_slice().to_vec();

        let live = self.tick;
        let mut working = live;

        // Detect + rewind: the earliest damaged event decides whether any
        // already-simulated tick must be redone.
        if let Some(first) = damaged.first() {
            if first.tick < live {
                let offset = (live - first.tick) as usize;
                let restored = self.snapshots.retrieve(offset).cloned().ok_or(
                    RollbackError::Desync {
                        earliest: first.tick,
                        live,
                        capacity: self.snapshots.capacity(),
                    },
                )?;
                debug!(earliest = first.tick, live, "rolling back");
                self.state = restored;
                working = first.tick;
            }
        }

        // Replay: every intermediate tick gets executed, none skipped.
        let mut next_event = 0;
        while working < target {
            if let Some(event) = damaged.get(next_event) {
                // The rewind point is the earliest damaged tick, so an
                // event behind the working tick cannot legitimately
                // exist. Applying it would corrupt history; dropping it
                // would fork the peers. Fail instead.
                if event.tick < working {
                    return Err(RollbackError::StaleInput {
                        tick: event.tick,
                        working,
                    });
                }
            }
            while let Some(event) = damaged.get(next_event) {
                if event.tick != working {
                    break;
                }
                self.sim.apply_input(&mut self.state, event);
                next_event += 1;
            }

            self.state = self.sim.step(&self.state);

            if working < live {
                // Redoing a tick that already has a snapshot: replace it
                // where it sits so offsets stay consistent.
                let replaced = self
                    .snapshots
                    .overwrite((live - working - 1) as usize, self.state.clone());
                debug_assert!(replaced, "redone tick lost its snapshot slot");
            } else {
                self.snapshots.push(self.state.clone());
            }
            working += 1;
        }

        self.tick = working;

        // Everything below the new live tick has been resolved; events
        // behind the snapshot window can never be replayed again.
        queue.reset_damage(self.tick);
        let window = self.snapshots.capacity() as Tick;
        queue.prune_before(self.tick.saturating_sub(window));

        Ok(())
    }
}
