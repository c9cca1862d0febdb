//! Free-running counter abstraction
//!
//! Models a timer/counter peripheral with a prescaler and a
//! reset/run/stop control register. The timer service in
//! `sonarwatch-core` builds every delay and every echo measurement on
//! top of this, so the counter must be exclusively owned by one user.

/// Counter tick rate that makes one tick equal one microsecond
pub const MICROSECOND_TICK_HZ: u32 = 1_000_000;

/// Free-running hardware counter
///
/// Control follows the usual timer peripheral sequence:
///
/// ```text
/// reset()  -> count = 0, halted
/// start()  -> counting at the configured tick rate
/// stop()   -> halted, count frozen
/// ```
pub trait Counter {
    /// Configure the prescaler so the counter increments at `hz`
    fn set_tick_rate(&mut self, hz: u32);

    /// Clear the count and hold the counter halted
    fn reset(&mut self);

    /// Start counting from the current count
    fn start(&mut self);

    /// Halt the counter, freezing the count
    fn stop(&mut self);

    /// Read the current count
    ///
    /// The count is 32 bits wide and wraps silently on overflow.
    fn ticks(&self) -> u32;
}

/// Convert elapsed microseconds to counter ticks at `tick_hz`
///
/// For counters emulated in software on top of a microsecond timebase.
/// Truncates to the 32-bit count width, wrapping like a hardware counter.
pub fn scale_ticks(elapsed_us: u64, tick_hz: u32) -> u32 {
    let ticks = u128::from(elapsed_us) * u128::from(tick_hz) / u128::from(MICROSECOND_TICK_HZ);
    ticks as u32
}
