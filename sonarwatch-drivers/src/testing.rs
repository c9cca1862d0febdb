//! Simulated hardware shared by the driver tests
//!
//! - [`SimBench`]: a microsecond clock plus an HC-SR04 echo model. The
//!   clock only moves when a running [`SimCounter`] is read, which is
//!   exactly what every busy-wait loop does.
//! - [`BusRecorder`]: the HD44780 side of a 4-bit bus. It decodes a
//!   nibble on each falling edge of EN and logs delays in order.

use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use sonarwatch_hal::{Counter, InputPin, OutputPin};

/// Simulated time plus an ultrasonic target
pub struct SimBench {
    /// Current time (µs)
    pub clock: Cell<u32>,
    /// Time between the trigger falling edge and the echo rising edge
    pub echo_lag_us: u32,
    /// Echo pulse width, `None` for no echo at all
    pub echo_width_us: Cell<Option<u32>>,
    /// Width of the last completed trigger pulse
    pub trigger_pulse_us: Cell<Option<u32>>,
    /// How long the trigger was held low before its last rising edge
    pub trigger_settle_us: Cell<Option<u32>>,
    /// Number of completed trigger pulses
    pub trigger_pulses: Cell<u32>,
    trigger_low_at: Cell<u32>,
    trigger_high_at: Cell<Option<u32>>,
    fired_at: Cell<Option<u32>>,
}

impl SimBench {
    pub fn new(echo_width_us: Option<u32>) -> Self {
        Self {
            clock: Cell::new(0),
            echo_lag_us: 450,
            echo_width_us: Cell::new(echo_width_us),
            trigger_pulse_us: Cell::new(None),
            trigger_settle_us: Cell::new(None),
            trigger_pulses: Cell::new(0),
            trigger_low_at: Cell::new(0),
            trigger_high_at: Cell::new(None),
            fired_at: Cell::new(None),
        }
    }

    pub fn counter(&self) -> SimCounter<'_> {
        SimCounter {
            bench: self,
            base: 0,
            frozen: 0,
            running: false,
        }
    }

    pub fn trigger(&self) -> SimTrigger<'_> {
        SimTrigger {
            bench: self,
            high: false,
        }
    }

    pub fn echo(&self) -> SimEcho<'_> {
        SimEcho { bench: self }
    }

    fn echo_level(&self) -> bool {
        match (self.fired_at.get(), self.echo_width_us.get()) {
            (Some(fired), Some(width)) => {
                let rise = fired.saturating_add(self.echo_lag_us);
                let fall = rise.saturating_add(width);
                (rise..fall).contains(&self.clock.get())
            }
            _ => false,
        }
    }
}

/// Counter that advances the bench clock by 1 µs per read while running
pub struct SimCounter<'a> {
    bench: &'a SimBench,
    base: u32,
    frozen: u32,
    running: bool,
}

impl Counter for SimCounter<'_> {
    fn set_tick_rate(&mut self, hz: u32) {
        assert_eq!(hz, 1_000_000, "bench clock runs at 1 MHz");
    }

    fn reset(&mut self) {
        self.running = false;
        self.frozen = 0;
    }

    fn start(&mut self) {
        self.base = self.bench.clock.get() - self.frozen;
        self.running = true;
    }

    fn stop(&mut self) {
        if self.running {
            self.frozen = self.bench.clock.get() - self.base;
            self.running = false;
        }
    }

    fn ticks(&self) -> u32 {
        if self.running {
            let now = self.bench.clock.get() + 1;
            self.bench.clock.set(now);
            now - self.base
        } else {
            self.frozen
        }
    }
}

/// Trigger line; a falling edge after a pulse fires the sensor
pub struct SimTrigger<'a> {
    bench: &'a SimBench,
    high: bool,
}

impl OutputPin for SimTrigger<'_> {
    fn set_high(&mut self) {
        let now = self.bench.clock.get();
        if !self.high {
            self.bench
                .trigger_settle_us
                .set(Some(now - self.bench.trigger_low_at.get()));
            self.bench.trigger_high_at.set(Some(now));
        }
        self.high = true;
    }

    fn set_low(&mut self) {
        let now = self.bench.clock.get();
        if self.high {
            if let Some(rose) = self.bench.trigger_high_at.take() {
                self.bench.trigger_pulse_us.set(Some(now - rose));
            }
            self.bench.trigger_pulses.set(self.bench.trigger_pulses.get() + 1);
            self.bench.fired_at.set(Some(now));
        }
        self.bench.trigger_low_at.set(now);
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Echo line driven by the bench target model
pub struct SimEcho<'a> {
    bench: &'a SimBench,
}

impl InputPin for SimEcho<'_> {
    fn is_high(&self) -> bool {
        self.bench.echo_level()
    }
}

/// Bus line indices
pub const RS: usize = 0;
pub const EN: usize = 1;
pub const D4: usize = 2;

/// Something observed on the display bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// Nibble latched on the EN falling edge, with RS at that moment
    Latch { rs: bool, nibble: u8 },
    /// Delay requested by the driver (ns)
    Wait(u32),
}

#[derive(Default)]
struct BusState {
    levels: [bool; 6],
    strobes: u32,
    events: Vec<BusEvent, 1024>,
}

/// Display-side view of the 4-bit bus
#[derive(Default)]
pub struct BusRecorder {
    state: RefCell<BusState>,
}

impl BusRecorder {
    pub fn pin(&self, line: usize) -> BusPin<'_> {
        BusPin { bus: self, line }
    }

    /// RS, EN, and D4..D7 pins in driver constructor order
    pub fn pins(&self) -> (BusPin<'_>, BusPin<'_>, [BusPin<'_>; 4]) {
        (
            self.pin(RS),
            self.pin(EN),
            [
                self.pin(D4),
                self.pin(D4 + 1),
                self.pin(D4 + 2),
                self.pin(D4 + 3),
            ],
        )
    }

    pub fn delay(&self) -> RecordingDelay<'_> {
        RecordingDelay { bus: self }
    }

    pub fn level(&self, line: usize) -> bool {
        self.state.borrow().levels[line]
    }

    /// Nibble currently on D4..D7
    pub fn data_nibble(&self) -> u8 {
        let state = self.state.borrow();
        (0..4).fold(0, |acc, bit| acc | ((state.levels[D4 + bit] as u8) << bit))
    }

    /// Number of EN rising edges
    pub fn strobes(&self) -> u32 {
        self.state.borrow().strobes
    }

    pub fn events(&self) -> Vec<BusEvent, 1024> {
        self.state.borrow().events.clone()
    }

    /// Latched (rs, nibble) pairs, ignoring delays
    pub fn latches(&self) -> Vec<(bool, u8), 512> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match *e {
                BusEvent::Latch { rs, nibble } => Some((rs, nibble)),
                BusEvent::Wait(_) => None,
            })
            .collect()
    }

    /// Latches paired into (rs, byte), high nibble first
    pub fn bytes(&self, skip_nibbles: usize) -> Vec<(bool, u8), 256> {
        let latches = self.latches();
        latches[skip_nibbles..]
            .chunks_exact(2)
            .map(|pair| (pair[0].0, (pair[0].1 << 4) | pair[1].1))
            .collect()
    }

    pub fn clear_log(&self) {
        let mut state = self.state.borrow_mut();
        state.events.clear();
        state.strobes = 0;
    }

    fn drive(&self, line: usize, level: bool) {
        let mut state = self.state.borrow_mut();
        let prev = state.levels[line];
        state.levels[line] = level;

        if line == EN {
            if !prev && level {
                state.strobes += 1;
            } else if prev && !level {
                let rs = state.levels[RS];
                let nibble = (0..4).fold(0u8, |acc, bit| {
                    acc | ((state.levels[D4 + bit] as u8) << bit)
                });
                state.events.push(BusEvent::Latch { rs, nibble }).unwrap();
            }
        }
    }

    fn wait(&self, ns: u32) {
        self.state.borrow_mut().events.push(BusEvent::Wait(ns)).unwrap();
    }
}

/// One line of the recorded bus
pub struct BusPin<'a> {
    bus: &'a BusRecorder,
    line: usize,
}

impl OutputPin for BusPin<'_> {
    fn set_high(&mut self) {
        self.bus.drive(self.line, true);
    }

    fn set_low(&mut self) {
        self.bus.drive(self.line, false);
    }

    fn is_set_high(&self) -> bool {
        self.bus.level(self.line)
    }
}

/// Delay provider that logs each request on the bus timeline
pub struct RecordingDelay<'a> {
    bus: &'a BusRecorder,
}

impl DelayNs for RecordingDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.bus.wait(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.bus.wait(us * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.bus.wait(ms * 1_000_000);
    }
}
