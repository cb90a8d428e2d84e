//! Button sources.
//!
//! Anything that can answer "what is this participant holding at tick T"
//! can drive a paddle: a keyboard handler, a gamepad poller, a demo
//! script. The rollback core never sees this trait; sources feed the
//! session, and the session turns changes into events.

use volley_netproto::Tick;
use volley_sim::PaddleButtons;

/// Produce a resolved button bitmask per tick.
pub trait ButtonSource {
    fn sample(&mut self, tick: Tick) -> PaddleButtons;
}

/// A predetermined input script, for tests and demos: each entry says
/// "from this tick on, hold these buttons".
pub struct ScriptedButtons {
    /// Sorted by tick ascending.
    script: Vec<(Tick, PaddleButtons)>,
}

impl ScriptedButtons {
    pub fn new(mut script: Vec<(Tick, PaddleButtons)>) -> Self {
        script.sort_by_key(|(tick, _)| *tick);
        Self { script }
    }
}

impl ButtonSource for ScriptedButtons {
    fn sample(&mut self, tick: Tick) -> PaddleButtons {
        self.script
            .iter()
            .take_while(|(at, _)| *at <= tick)
            .last()
            .map(|(_, buttons)| *buttons)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_holds_latest_entry() {
        let mut source = ScriptedButtons::new(vec![
            (10, PaddleButtons::UP),
            (5, PaddleButtons::DOWN),
            (20, PaddleButtons::empty()),
        ]);

        assert_eq!(source.sample(0), PaddleButtons::empty());
        assert_eq!(source.sample(5), PaddleButtons::DOWN);
        assert_eq!(source.sample(9), PaddleButtons::DOWN);
        assert_eq!(source.sample(10), PaddleButtons::UP);
        assert_eq!(source.sample(19), PaddleButtons::UP);
        assert_eq!(source.sample(25), PaddleButtons::empty());
    }
}
