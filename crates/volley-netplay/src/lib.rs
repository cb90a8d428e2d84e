//! Rollback netcode core.
//!
//! This crate keeps two peers' simulations consistent across an
//! unreliable, out-of-order link using client-side prediction and
//! rollback. It is generic over what is being simulated: anything with a
//! cloneable state and a pure step function (the [`Simulate`] seam) can be
//! driven by it.
//!
//! # Architecture
//!
//! - [`clock`]: wall-clock time to target tick count, at a fixed rate
//! - [`snapshot`]: ring buffer of past states, addressed by "ticks ago"
//! - [`queue`]: input events ordered by `(tick, seq)` with a damage
//!   watermark marking the earliest tick whose outcome is stale
//! - [`rollback`]: the detect / rewind / replay loop that reconciles late
//!   input against retained history
//! - [`config`], [`error`]: tuning and fault taxonomy
//!
//! The loop owns the snapshot ring and the live state exclusively; the
//! only externally shared structure is the event queue, which a transport
//! delivery thread may feed through [`SharedEventQueue`] while the
//! simulation driver runs a pass.

pub mod clock;
pub mod config;
pub mod error;
pub mod queue;
pub mod rollback;
pub mod snapshot;

pub use clock::TickClock;
pub use config::RollbackConfig;
pub use error::RollbackError;
pub use queue::{EventQueue, SharedEventQueue};
pub use rollback::{RollbackLoop, Simulate};
pub use snapshot::SnapshotRing;
pub use volley_netproto::{InputEvent, SeqIndex, Tick};
