//! Simulation tuning values.
//!
//! These are part of the deterministic contract: both peers must run with
//! identical constants or their simulations diverge immediately.

/// Fixed simulation rate in ticks per second.
pub const TICK_RATE_HZ: u32 = 128;

/// Playfield width in world units.
pub const FIELD_WIDTH: f64 = 1280.0;

/// Playfield height in world units.
pub const FIELD_HEIGHT: f64 = 720.0;

/// Paddle collision box height.
pub const PADDLE_HEIGHT: f64 = 120.0;

/// Paddle collision box width. Paddles sit flush against the side walls.
pub const PADDLE_WIDTH: f64 = 16.0;

/// Paddle speed in units per tick while a direction is held.
pub const PADDLE_SPEED: f64 = 4.0;

/// Ball radius.
pub const BALL_RADIUS: f64 = 10.0;

/// Horizontal ball speed in units per tick.
pub const BALL_SPEED: f64 = 10.0;

/// How far past the side walls the ball must travel before a point is
/// scored. Gives the losing paddle a last visible moment of failure
/// instead of despawning the ball at the edge.
pub const GOAL_GRACE: f64 = 10.0;
