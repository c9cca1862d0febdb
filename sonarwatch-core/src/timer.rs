//! Timer service
//!
//! Microsecond busy-wait delays and pulse-width measurement built on a
//! single free-running [`Counter`]. Every operation restarts the counter on
//! entry and halts it on exit, so no count leaks from one call into the
//! next. The `&mut self` receivers make that exclusive use explicit.

use embedded_hal::delay::DelayNs;
use sonarwatch_hal::counter::{Counter, MICROSECOND_TICK_HZ};

/// Microseconds per millisecond
const US_PER_MS: u32 = 1_000;

/// A bounded poll gave up before its condition was met
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareTimeout {
    /// Microseconds spent polling before giving up
    pub waited_us: u32,
}

/// Timer service owning the hardware counter
pub struct Timer<C> {
    counter: C,
}

impl<C: Counter> Timer<C> {
    /// Take ownership of the counter and hold it in reset
    pub fn new(mut counter: C) -> Self {
        counter.reset();
        counter.set_tick_rate(MICROSECOND_TICK_HZ);
        Self { counter }
    }

    /// Give the counter back
    pub fn release(self) -> C {
        self.counter
    }

    /// Clear the count, select 1 µs ticks, and start counting
    fn restart(&mut self) {
        self.counter.reset();
        self.counter.set_tick_rate(MICROSECOND_TICK_HZ);
        self.counter.start();
    }

    /// Block for at least `us` microseconds
    pub fn delay_microseconds(&mut self, us: u32) {
        self.restart();
        while self.counter.ticks() < us {}
        self.counter.stop();
    }

    /// Block for at least `ms` milliseconds
    ///
    /// Composed of `ms` separate 1000 µs delays, so the per-call overhead
    /// accumulates. That drift is negligible against the loop period.
    pub fn delay_milliseconds(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_microseconds(US_PER_MS);
        }
    }

    /// Busy-poll until `condition` returns true
    ///
    /// With `limit_us = None` this spins forever if the condition never
    /// holds. With a limit it fails once that many microseconds elapse.
    pub fn wait_until<F>(
        &mut self,
        mut condition: F,
        limit_us: Option<u32>,
    ) -> Result<(), HardwareTimeout>
    where
        F: FnMut() -> bool,
    {
        self.poll(|| !condition(), limit_us).map(|_| ())
    }

    /// Measure how long `condition` keeps returning true, in microseconds
    ///
    /// Timing starts on entry; the caller is expected to have already
    /// waited for the condition to become true.
    pub fn measure_while<F>(
        &mut self,
        condition: F,
        limit_us: Option<u32>,
    ) -> Result<u32, HardwareTimeout>
    where
        F: FnMut() -> bool,
    {
        self.poll(condition, limit_us)
    }

    fn poll<F>(&mut self, mut busy: F, limit_us: Option<u32>) -> Result<u32, HardwareTimeout>
    where
        F: FnMut() -> bool,
    {
        self.restart();

        while busy() {
            let elapsed = self.counter.ticks();
            if let Some(limit) = limit_us {
                if elapsed >= limit {
                    self.counter.stop();
                    return Err(HardwareTimeout { waited_us: elapsed });
                }
            }
        }

        self.counter.stop();
        Ok(self.counter.ticks())
    }
}

impl<C: Counter> DelayNs for Timer<C> {
    fn delay_ns(&mut self, ns: u32) {
        // Round up: the counter cannot resolve below one microsecond
        self.delay_microseconds(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_microseconds(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay_milliseconds(ms);
    }
}
