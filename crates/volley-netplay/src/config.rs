use volley_netproto::Tick;

/// Session tuning for the rollback core.
#[derive(Debug, Clone)]
pub struct RollbackConfig {
    /// Fixed simulation rate in ticks per second.
    pub tick_rate_hz: u32,
    /// Seconds of history the snapshot ring retains. A correction older
    /// than this window is an unrecoverable desync.
    pub window_secs: u32,
    /// Ticks of artificial delay stamped onto locally produced input, so
    /// the remote peer usually receives an event before its tick comes up.
    pub input_delay: Tick,
}

impl Default for RollbackConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 128,
            window_secs: 5,
            input_delay: 3,
        }
    }
}

impl RollbackConfig {
    /// Snapshot ring capacity in ticks.
    pub fn window_ticks(&self) -> usize {
        (self.tick_rate_hz * self.window_secs) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_640_ticks() {
        assert_eq!(RollbackConfig::default().window_ticks(), 640);
    }
}
