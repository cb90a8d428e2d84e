//! The per-tick step function.
//!
//! [`step`] is the only way state advances. It is pure: the successor
//! state depends on nothing but the argument, so the rollback core can
//! replay any tick range and land on bit-identical results.
//!
//! Determinism hinges on the quantization helpers: every integrated
//! position/velocity is truncated to hundredths (spin to thousandths), so
//! no accumulated floating-point history can leak into a resimulation.

use crate::constants::{
    BALL_RADIUS, BALL_SPEED, FIELD_HEIGHT, FIELD_WIDTH, GOAL_GRACE, PADDLE_HEIGHT, PADDLE_SPEED,
    PADDLE_WIDTH,
};
use crate::state::{BallState, GameState, PaddleButtons, PaddleState};

/// Advance the match by one tick.
///
/// Paddles move first, then the ball, so a paddle reaching the ball on
/// this tick deflects it on this tick.
pub fn step(state: &GameState) -> GameState {
    let mut next = state.clone();
    for paddle in &mut next.paddles {
        step_paddle(paddle);
    }
    step_ball(&mut next);
    next
}

fn quantize2(v: f64) -> f64 {
    (v * 100.0).trunc() / 100.0
}

fn quantize3(v: f64) -> f64 {
    (v * 1000.0).trunc() / 1000.0
}

fn step_paddle(paddle: &mut PaddleState) {
    let held = paddle.buttons;
    let direction = if held.contains(PaddleButtons::UP | PaddleButtons::DOWN) {
        // Opposite directions cancel to neutral.
        0.0
    } else if held.contains(PaddleButtons::UP) {
        -1.0
    } else if held.contains(PaddleButtons::DOWN) {
        1.0
    } else {
        0.0
    };

    if direction == 0.0 {
        paddle.vy = quantize2(paddle.vy * 0.9);
    } else {
        paddle.vy = direction * PADDLE_SPEED;
    }

    paddle.y += paddle.vy;
    if paddle.y < 0.0 {
        paddle.y = 0.0;
        paddle.vy = 0.0;
    }
    if paddle.y + PADDLE_HEIGHT > FIELD_HEIGHT {
        paddle.y = FIELD_HEIGHT - PADDLE_HEIGHT;
        paddle.vy = 0.0;
    }
}

fn step_ball(state: &mut GameState) {
    let [left, right] = state.paddles;
    let mut ball = state.ball;
    let r = BALL_RADIUS;

    // Spin converts into vertical drift; vy settles near 1.5x spin.
    ball.vy = (ball.vy + ball.spin * 150.0).trunc() / 100.0;
    ball.x = quantize2(ball.x + ball.vx);
    ball.y = quantize2(ball.y + ball.vy);

    if ball.y + r > FIELD_HEIGHT {
        // bottom wall
        ball.y = FIELD_HEIGHT - r;
        ball.vy = -ball.vy;
        ball.spin = quantize3(-ball.spin * 0.7);
    } else if ball.y - r < 0.0 {
        // top wall
        ball.y = r;
        ball.vy = -ball.vy;
        ball.spin = quantize3(-ball.spin * 0.7);
    } else if ball.x + r > FIELD_WIDTH - PADDLE_WIDTH
        && ball.y > right.y
        && ball.y < right.y + PADDLE_HEIGHT
    {
        // right paddle deflects; paddle motion becomes spin
        ball.x = FIELD_WIDTH - PADDLE_WIDTH - r;
        ball.vx = -ball.vx;
        ball.spin = right.vy + ball.spin / 2.0;
    } else if ball.x - r < PADDLE_WIDTH && ball.y > left.y && ball.y < left.y + PADDLE_HEIGHT {
        // left paddle deflects
        ball.x = PADDLE_WIDTH + r;
        ball.vx = -ball.vx;
        ball.spin = left.vy + ball.spin / 2.0;
    } else if ball.x - r > FIELD_WIDTH + GOAL_GRACE {
        // out past the right wall: left player scores, serve drifts to them
        state.score[0] += 1;
        ball = serve(-BALL_SPEED);
    } else if ball.x + r < -GOAL_GRACE {
        // out past the left wall
        state.score[1] += 1;
        ball = serve(BALL_SPEED);
    }

    state.ball = ball;
}

fn serve(vx: f64) -> BallState {
    BallState {
        x: FIELD_WIDTH / 2.0,
        y: FIELD_HEIGHT / 2.0,
        vx,
        vy: 0.0,
        spin: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_up_moves_paddle_up() {
        let mut state = GameState::new();
        state.set_buttons(0, PaddleButtons::UP);

        let next = step(&state);
        assert_eq!(next.paddles[0].vy, -PADDLE_SPEED);
        assert_eq!(next.paddles[0].y, state.paddles[0].y - PADDLE_SPEED);
    }

    #[test]
    fn opposite_directions_are_neutral() {
        let mut state = GameState::new();
        state.set_buttons(0, PaddleButtons::UP | PaddleButtons::DOWN);

        let next = step(&state);
        assert_eq!(next.paddles[0].y, state.paddles[0].y);
        assert_eq!(next.paddles[0].vy, 0.0);
    }

    #[test]
    fn released_paddle_coasts_and_decays() {
        let mut state = GameState::new();
        state.paddles[0].vy = PADDLE_SPEED;

        let next = step(&state);
        assert_eq!(next.paddles[0].vy, quantize2(PADDLE_SPEED * 0.9));
        assert_eq!(next.paddles[0].y, state.paddles[0].y + next.paddles[0].vy);
    }

    #[test]
    fn paddle_stops_at_the_walls() {
        let mut state = GameState::new();
        state.set_buttons(0, PaddleButtons::UP);
        for _ in 0..200 {
            state = step(&state);
        }
        assert_eq!(state.paddles[0].y, 0.0);
        assert_eq!(state.paddles[0].vy, 0.0);
    }

    #[test]
    fn serve_travels_left() {
        let state = step(&GameState::new());
        assert_eq!(state.ball.x, FIELD_WIDTH / 2.0 - BALL_SPEED);
        assert_eq!(state.ball.y, FIELD_HEIGHT / 2.0);
    }

    #[test]
    fn bottom_wall_bounce_damps_spin() {
        let mut state = GameState::new();
        state.ball = BallState {
            x: 640.0,
            y: 715.0,
            vx: 0.0,
            vy: 0.0,
            spin: 4.0,
        };

        let next = step(&state);
        assert_eq!(next.ball.y, FIELD_HEIGHT - BALL_RADIUS);
        assert_eq!(next.ball.vy, -6.0);
        assert_eq!(next.ball.spin, -2.8);
    }

    #[test]
    fn moving_paddle_imparts_spin() {
        let mut state = GameState::new();
        state.set_buttons(1, PaddleButtons::DOWN);
        state.ball = BallState {
            x: 1250.0,
            y: 360.0,
            vx: BALL_SPEED,
            vy: 0.0,
            spin: 0.0,
        };

        let next = step(&state);
        assert_eq!(next.ball.x, FIELD_WIDTH - PADDLE_WIDTH - BALL_RADIUS);
        assert_eq!(next.ball.vx, -BALL_SPEED);
        assert_eq!(next.ball.spin, PADDLE_SPEED);
    }

    #[test]
    fn ball_past_right_wall_scores_for_left_player() {
        let mut state = GameState::new();
        // keep the right paddle away from the ball's path
        state.ball = BallState {
            x: 1295.0,
            y: 100.0,
            vx: BALL_SPEED,
            vy: 0.0,
            spin: 0.0,
        };

        let next = step(&state);
        assert_eq!(next.score, [1, 0]);
        assert_eq!(next.ball.x, FIELD_WIDTH / 2.0);
        assert_eq!(next.ball.vx, -BALL_SPEED);
    }

    #[test]
    fn ball_past_left_wall_scores_for_right_player() {
        let mut state = GameState::new();
        state.ball = BallState {
            x: -15.0,
            y: 100.0,
            vx: -BALL_SPEED,
            vy: 0.0,
            spin: 0.0,
        };

        let next = step(&state);
        assert_eq!(next.score, [0, 1]);
        assert_eq!(next.ball.vx, BALL_SPEED);
    }

    #[test]
    fn identical_histories_produce_identical_states() {
        let run = || {
            let mut state = GameState::new();
            for tick in 0..500u32 {
                match tick {
                    40 => state.set_buttons(0, PaddleButtons::UP),
                    90 => state.set_buttons(0, PaddleButtons::empty()),
                    120 => state.set_buttons(1, PaddleButtons::DOWN),
                    200 => state.set_buttons(1, PaddleButtons::empty()),
                    _ => {}
                }
                state = step(&state);
            }
            state
        };

        assert_eq!(run(), run());
    }
}
