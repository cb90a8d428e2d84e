//! Wall-clock time to simulation ticks.

use std::time::Instant;

use volley_netproto::Tick;

/// Converts elapsed wall-clock time into a target tick count at a fixed
/// simulation rate.
///
/// The clock is deliberately passive: it never reads the system time
/// itself. Callers pass the current instant in, which keeps the
/// simulation rate decoupled from the display rate and lets tests drive
/// the whole stack with synthetic timestamps.
///
/// A stall (long frame, suspended tab, debugger pause) simply widens the
/// gap between the live tick and the target; the rollback loop closes it
/// by executing every intermediate tick, never by skipping.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    started: Instant,
    rate_hz: u32,
}

impl TickClock {
    /// Clock anchored at an explicit start instant.
    pub fn new(started: Instant, rate_hz: u32) -> Self {
        debug_assert!(rate_hz > 0);
        Self { started, rate_hz }
    }

    /// Clock anchored at the current instant.
    pub fn start(rate_hz: u32) -> Self {
        Self::new(Instant::now(), rate_hz)
    }

    /// The tick the simulation should have reached by `now`:
    /// `floor(elapsed_ms * rate / 1000)`.
    ///
    /// An instant before the anchor saturates to zero elapsed time rather
    /// than panicking; monotonic clocks can produce one on some platforms.
    pub fn target_tick(&self, now: Instant) -> Tick {
        let elapsed_ms = now.saturating_duration_since(self.started).as_millis() as u64;
        (elapsed_ms * u64::from(self.rate_hz) / 1000) as Tick
    }
}
