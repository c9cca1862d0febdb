//! Microsecond counter on the RP2040 system timer
//!
//! The RP2040 timer is a free-running 64-bit microsecond counter that
//! cannot be reset or halted, and embassy-rp's time driver already owns
//! it. [`UptimeCounter`] layers the reset/start/stop control of
//! [`Counter`] on top by remembering timestamps.

use embassy_time::Instant;
use sonarwatch_hal::counter::{scale_ticks, Counter, MICROSECOND_TICK_HZ};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Not counting; holds the frozen count in µs
    Halted(u64),
    /// Counting since `since`, on top of `base` µs already accumulated
    Running { since: Instant, base: u64 },
}

/// Software counter backed by the embassy time driver
pub struct UptimeCounter {
    tick_hz: u32,
    state: State,
}

impl UptimeCounter {
    /// Create a halted counter at zero, ticking once per microsecond
    pub const fn new() -> Self {
        Self {
            tick_hz: MICROSECOND_TICK_HZ,
            state: State::Halted(0),
        }
    }

    fn elapsed_us(&self) -> u64 {
        match self.state {
            State::Halted(count) => count,
            State::Running { since, base } => base + since.elapsed().as_micros(),
        }
    }
}

impl Default for UptimeCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Counter for UptimeCounter {
    fn set_tick_rate(&mut self, hz: u32) {
        self.tick_hz = hz;
    }

    fn reset(&mut self) {
        self.state = State::Halted(0);
    }

    fn start(&mut self) {
        if let State::Halted(base) = self.state {
            self.state = State::Running {
                since: Instant::now(),
                base,
            };
        }
    }

    fn stop(&mut self) {
        self.state = State::Halted(self.elapsed_us());
    }

    fn ticks(&self) -> u32 {
        scale_ticks(self.elapsed_us(), self.tick_hz)
    }
}
