//! Session runtime: binds the pong simulation, the rollback core, and a
//! peer link into a playable two-party session.
//!
//! The embedding application owns the display loop and the real
//! transport. Each display frame it feeds local buttons in
//! ([`Session::set_buttons`]), runs one scheduling pass
//! ([`Session::pump`]), and draws the returned state. Remote datagrams
//! arrive either through the session's [`Link`] or, from a transport
//! thread, through the cloneable [`EventSink`].
//!
//! - [`pong`]: the [`volley_netplay::Simulate`] implementation for the sim
//! - [`session`]: the per-frame driver and failure surfacing
//! - [`link`]: the minimal datagram link seam plus in-process test links
//! - [`source`]: button sources ("produce a bitmask per tick")

pub mod link;
pub mod pong;
pub mod session;
pub mod source;

pub use link::{JitterLink, Link, LoopbackLink, loopback_pair};
pub use pong::Pong;
pub use session::{EventSink, Session, SessionPhase};
pub use source::{ButtonSource, ScriptedButtons};
