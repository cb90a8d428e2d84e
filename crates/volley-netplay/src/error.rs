//! Fault taxonomy for the rollback loop.

use thiserror::Error;
use volley_netproto::Tick;

/// Fatal faults raised by a scheduling pass.
///
/// Both variants abort the pass immediately: continuing would either
/// silently drop an input or resimulate from the wrong base, and either
/// way the two peers stop agreeing on history. The caller must surface
/// the failure and stop driving the session.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RollbackError {
    /// An event for `tick` surfaced after the replay had already advanced
    /// past it. The rewind point is chosen from the earliest damaged
    /// event, so this can only mean the queue or the loop is broken.
    #[error("input for tick {tick} arrived behind the working tick {working}")]
    StaleInput { tick: Tick, working: Tick },

    /// A correction at `earliest` needs a snapshot that has already been
    /// evicted from the ring. The session cannot be repaired from retained
    /// state; the caller decides between resynchronizing from scratch and
    /// tearing the session down.
    #[error(
        "unrecoverable desync: correction at tick {earliest} is outside the \
         {capacity}-snapshot window behind tick {live}"
    )]
    Desync {
        earliest: Tick,
        live: Tick,
        capacity: usize,
    },
}
