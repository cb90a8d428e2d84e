//! The per-frame session driver.

use std::time::Instant;

use tracing::{error, warn};
use volley_netplay::{RollbackConfig, RollbackError, RollbackLoop, SharedEventQueue, TickClock};
use volley_netproto::{InputEvent, SeqIndex, Tick};
use volley_sim::{GameState, PaddleButtons};

use crate::{link::Link, pong::Pong};

/// Where a session is in its life. There is no way back from `Failed`:
/// a fatal fault means retained history is no longer trustworthy, and
/// the only honest options (resynchronize from scratch, or tear down)
/// both belong to the embedding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    Failed(RollbackError),
}

/// Cloneable receive endpoint for the transport's delivery path.
///
/// Decodes each datagram and feeds the event queue. May be called from a
/// transport thread while the session is mid-pump; the queue handle takes
/// care of the interleaving. Malformed datagrams are logged and dropped,
/// since a corrupt packet must never stall the tick loop.
#[derive(Debug, Clone)]
pub struct EventSink {
    queue: SharedEventQueue,
}

impl EventSink {
    pub fn deliver(&self, datagram: &[u8]) {
        match InputEvent::decode(datagram) {
            Ok(event) => self.queue.insert(event),
            Err(err) => warn!(%err, len = datagram.len(), "discarding malformed datagram"),
        }
    }
}

/// One participant's end of a match.
///
/// The embedding display loop calls [`Session::set_buttons`] and
/// [`Session::pump`] once per frame and draws the state `pump` returns.
/// Prediction, rollback, and replay all happen inside the pass.
pub struct Session<L> {
    config: RollbackConfig,
    clock: TickClock,
    game: RollbackLoop<Pong>,
    link: L,
    local_participant: u8,
    next_seq: SeqIndex,
    held: PaddleButtons,
    phase: SessionPhase,
}

impl<L: Link> Session<L> {
    /// New session for `local_participant` (0 = left paddle, 1 = right),
    /// anchored at `started`. Both peers must anchor at the agreed match
    /// start for their target ticks to line up.
    pub fn new(config: RollbackConfig, local_participant: u8, link: L, started: Instant) -> Self {
        let clock = TickClock::new(started, config.tick_rate_hz);
        let game = RollbackLoop::new(
            Pong,
            GameState::new(),
            config.window_ticks(),
            SharedEventQueue::new(),
        );
        Self {
            config,
            clock,
            game,
            link,
            local_participant,
            next_seq: 0,
            held: PaddleButtons::empty(),
            phase: SessionPhase::Running,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The live tick. Never decreases, even across a rollback.
    pub fn tick(&self) -> Tick {
        self.game.tick()
    }

    /// The live state, read-only, for rendering.
    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    /// Receive endpoint for a transport delivery thread.
    pub fn sink(&self) -> EventSink {
        EventSink {
            queue: self.game.queue(),
        }
    }

    /// Record the local participant's held buttons.
    ///
    /// Only changes produce traffic. A change is stamped a few ticks into
    /// the future (the configured input delay) to mask one-way latency,
    /// then inserted into the local queue and sent to the peer, so both
    /// simulations consume the identical event.
    pub fn set_buttons(&mut self, buttons: PaddleButtons) {
        if buttons == self.held {
            return;
        }
        self.held = buttons;

        let event = InputEvent::button_state(
            self.next_seq,
            self.game.tick() + self.config.input_delay,
            self.local_participant,
            buttons.bits(),
        );
        self.next_seq += 1;

        self.game.queue().insert(event);
        self.link.send(event.encode());
    }

    /// Run one scheduling pass: drain the link, reconcile, advance to the
    /// clock's target, and hand back the state to draw.
    ///
    /// A fatal fault fails the session permanently; every subsequent pump
    /// reports the same error instead of quietly freezing.
    pub fn pump(&mut self, now: Instant) -> Result<&GameState, RollbackError> {
        if let SessionPhase::Failed(err) = self.phase {
            return Err(err);
        }

        let sink = self.sink();
        for datagram in self.link.poll() {
            sink.deliver(&datagram);
        }

        let target = self.clock.target_tick(now);
        if let Err(err) = self.game.advance_to(target) {
            error!(%err, "session failed");
            self.phase = SessionPhase::Failed(err);
            return Err(err);
        }
        Ok(self.game.state())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::link::{LoopbackLink, loopback_pair};

    fn session_pair(started: Instant) -> (Session<LoopbackLink>, Session<LoopbackLink>) {
        let (a, b) = loopback_pair();
        (
            Session::new(RollbackConfig::default(), 0, a, started),
            Session::new(RollbackConfig::default(), 1, b, started),
        )
    }

    #[test]
    fn local_input_takes_effect_after_the_input_delay() {
        let started = Instant::now();
        let (mut session, _peer) = session_pair(started);

        session.set_buttons(PaddleButtons::UP);

        // 47 ms at 128 Hz = tick 6, past the 3-tick input delay
        let state = session
            .pump(started + Duration::from_millis(47))
            .expect("pumps");
        assert!(state.paddles[0].y < 300.0);
    }

    #[test]
    fn only_changes_go_on_the_wire() {
        let started = Instant::now();
        let (mut session, mut peer) = session_pair(started);

        session.set_buttons(PaddleButtons::empty());
        session.set_buttons(PaddleButtons::UP);
        session.set_buttons(PaddleButtons::UP);
        session.set_buttons(PaddleButtons::empty());

        let _ = peer.pump(started); // drains the link
        assert_eq!(peer.game.queue().lock().len(), 2);
    }

    #[test]
    fn malformed_datagrams_are_dropped_quietly() {
        let started = Instant::now();
        let (mut session, _peer) = session_pair(started);

        session.sink().deliver(&[0xFF, 0, 1, 2]);
        session.sink().deliver(&[]);

        assert!(session.pump(started + Duration::from_millis(20)).is_ok());
        assert_eq!(session.phase(), SessionPhase::Running);
    }

    #[test]
    fn desync_fails_the_session_permanently() {
        let started = Instant::now();
        let config = RollbackConfig {
            window_secs: 1, // 128-tick window
            ..RollbackConfig::default()
        };
        let (link, _other) = loopback_pair();
        let mut session = Session::new(config, 0, link, started);

        // run well past the window, then deliver an ancient event
        session
            .pump(started + Duration::from_millis(3000))
            .expect("pumps");
        session
            .sink()
            .deliver(&InputEvent::button_state(0, 0, 1, 0b01).encode());

        let err = session
            .pump(started + Duration::from_millis(3016))
            .expect_err("desyncs");
        assert!(matches!(err, RollbackError::Desync { .. }));
        assert_eq!(session.phase(), SessionPhase::Failed(err));

        // the failure is sticky
        let again = session
            .pump(started + Duration::from_millis(3032))
            .expect_err("still failed");
        assert_eq!(again, err);
    }
}
