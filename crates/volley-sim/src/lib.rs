//! Deterministic pong simulation.
//!
//! This crate is the pure, fixed-timestep game core driven by the rollback
//! loop in `volley-netplay`. It must stay replayable: no I/O, no clock
//! reads, no randomness, no dependence on frame rate. Everything that
//! affects an outcome lives in [`GameState`], and [`step()`] is a pure
//! function of it: stepping two equal states always yields bit-identical
//! successors.
//!
//! All positions and velocities are quantized by truncation (see
//! [`step()`]) so a resimulated tick reproduces the original run exactly,
//! no matter how the intermediate values were computed.

pub mod constants;
pub mod state;
pub mod step;

pub use state::{BallState, GameState, PaddleButtons, PaddleState};
pub use step::step;
