//! Snapshot-able simulation state.
//!
//! [`GameState`] is everything the rollback core needs to reproduce a tick:
//! paddle kinematics, ball kinematics, score, and each participant's
//! last-known button bitmask. The bitmasks live *inside* the state:
//! restoring a snapshot must also restore what each paddle was doing at
//! that point in time, otherwise a resimulated tick would read inputs
//! from the wrong era.

use bitflags::bitflags;

use crate::constants::{BALL_SPEED, FIELD_HEIGHT, FIELD_WIDTH, PADDLE_HEIGHT};

bitflags! {
    /// Held paddle buttons, packed the way they travel on the wire.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PaddleButtons: u8 {
        const DOWN = 1 << 0;
        const UP = 1 << 1;
    }
}

/// One paddle: vertical position of its top edge, velocity, and the
/// buttons its owner is currently holding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleState {
    pub y: f64,
    pub vy: f64,
    pub buttons: PaddleButtons,
}

impl Default for PaddleState {
    fn default() -> Self {
        Self {
            y: (FIELD_HEIGHT - PADDLE_HEIGHT) / 2.0,
            vy: 0.0,
            buttons: PaddleButtons::empty(),
        }
    }
}

/// The ball. `spin` is accumulated from paddle motion on contact and is
/// what curves the flight path vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub spin: f64,
}

impl Default for BallState {
    fn default() -> Self {
        // Opening serve drifts toward the left player.
        Self {
            x: FIELD_WIDTH / 2.0,
            y: FIELD_HEIGHT / 2.0,
            vx: -BALL_SPEED,
            vy: 0.0,
            spin: 0.0,
        }
    }
}

/// Complete match state. Participant 0 owns the left paddle, participant 1
/// the right one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameState {
    pub paddles: [PaddleState; 2],
    pub ball: BallState,
    pub score: [u32; 2],
}

impl GameState {
    /// State at the first tick of a match.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a participant's held buttons. Out-of-range participants are
    /// ignored; the wire decoder already rejects them, this is the last
    /// line of defense for locally constructed input.
    pub fn set_buttons(&mut self, participant: u8, buttons: PaddleButtons) {
        if let Some(paddle) = self.paddles.get_mut(participant as usize) {
            paddle.buttons = buttons;
        }
    }
}
