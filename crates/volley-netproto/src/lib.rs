//! Wire protocol for volley input events.
//!
//! The transport is an external collaborator that moves opaque datagrams
//! with no ordering or delivery guarantee; this crate defines what those
//! datagrams contain. The layout is fixed-width, big-endian, and has no
//! padding, so both peers agree on every byte without negotiation.

pub mod constants;
pub mod error;
pub mod event;
pub mod kind;

pub use error::WireError;
pub use event::{EventBody, InputEvent, SeqIndex, Tick};
pub use kind::EventKind;
