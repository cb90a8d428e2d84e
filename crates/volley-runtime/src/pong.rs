//! Glue between the rollback core and the pong simulation.

use volley_netplay::Simulate;
use volley_netproto::{EventBody, InputEvent};
use volley_sim::{GameState, PaddleButtons};

/// The pong simulation, as the rollback core sees it.
///
/// Button events are folded into the per-paddle bitmask stored in the
/// state, so a restored snapshot automatically restores what everyone was
/// pressing; the step is `volley_sim`'s pure function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pong;

impl Simulate for Pong {
    type State = GameState;

    fn apply_input(&self, state: &mut GameState, event: &InputEvent) {
        let EventBody::ButtonState {
            participant,
            buttons,
        } = event.body;
        state.set_buttons(participant, PaddleButtons::from_bits_truncate(buttons));
    }

    fn step(&self, state: &GameState) -> GameState {
        volley_sim::step(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_input_updates_one_bitmask() {
        let mut state = GameState::new();
        let event = InputEvent::button_state(0, 5, 1, PaddleButtons::UP.bits());

        Pong.apply_input(&mut state, &event);
        assert_eq!(state.paddles[1].buttons, PaddleButtons::UP);
        assert_eq!(state.paddles[0].buttons, PaddleButtons::empty());
    }

    #[test]
    fn unknown_bits_are_dropped() {
        let mut state = GameState::new();
        let event = InputEvent::button_state(0, 5, 0, 0xFF);

        Pong.apply_input(&mut state, &event);
        assert_eq!(
            state.paddles[0].buttons,
            PaddleButtons::UP | PaddleButtons::DOWN
        );
    }
}
