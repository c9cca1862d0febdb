//! HC-SR04 ultrasonic range sensor
//!
//! A 10 µs pulse on TRIG makes the module emit a 40 kHz burst. ECHO then
//! goes high for as long as the sound takes to reach the target and come
//! back, so the pulse width is the round-trip time in microseconds.

use sonarwatch_core::ranging::round_trip_us_to_cm;
use sonarwatch_core::traits::{RangeSensor, SensorError};
use sonarwatch_core::Timer;
use sonarwatch_hal::{Counter, InputPin, OutputPin};

/// Time TRIG is held low before the pulse (µs)
pub const TRIGGER_SETTLE_US: u32 = 2;

/// Width of the TRIG pulse (µs)
pub const TRIGGER_PULSE_US: u32 = 10;

/// HC-SR04 driver
pub struct HcSr04<T, E> {
    trigger: T,
    echo: E,
    /// Give up on the echo after this long, `None` waits forever
    echo_timeout_us: Option<u32>,
}

impl<T: OutputPin, E: InputPin> HcSr04<T, E> {
    /// Create a new sensor driver
    ///
    /// # Arguments
    /// - `trigger`: Output wired to TRIG, driven low here
    /// - `echo`: Input wired to ECHO
    /// - `echo_timeout_us`: Bound on each echo wait, `None` for no bound
    pub fn new(mut trigger: T, echo: E, echo_timeout_us: Option<u32>) -> Self {
        trigger.set_low();
        Self {
            trigger,
            echo,
            echo_timeout_us,
        }
    }

    /// Emit the trigger pulse
    pub fn fire<C: Counter>(&mut self, timer: &mut Timer<C>) {
        self.trigger.set_low();
        timer.delay_microseconds(TRIGGER_SETTLE_US);
        self.trigger.set_high();
        timer.delay_microseconds(TRIGGER_PULSE_US);
        self.trigger.set_low();
    }

    /// Trigger a ping and return the raw echo width in microseconds
    pub fn measure_echo_us<C: Counter>(
        &mut self,
        timer: &mut Timer<C>,
    ) -> Result<u32, SensorError> {
        self.fire(timer);

        let echo = &self.echo;
        timer
            .wait_until(|| echo.is_high(), self.echo_timeout_us)
            .map_err(|_| SensorError::NoEcho)?;
        timer
            .measure_while(|| echo.is_high(), self.echo_timeout_us)
            .map_err(|_| SensorError::EchoStuck)
    }

    /// Give the pins back
    pub fn release(self) -> (T, E) {
        (self.trigger, self.echo)
    }
}

impl<T: OutputPin, E: InputPin> RangeSensor for HcSr04<T, E> {
    fn measure_cm<C: Counter>(&mut self, timer: &mut Timer<C>) -> Result<u32, SensorError> {
        self.measure_echo_us(timer).map(round_trip_us_to_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SimBench;

    #[test]
    fn test_new_drives_trigger_low() {
        let bench = SimBench::new(None);
        let sensor = HcSr04::new(bench.trigger(), bench.echo(), None);
        let (trigger, _) = sensor.release();
        assert!(trigger.is_set_low());
    }

    #[test]
    fn test_trigger_pulse_shape() {
        let bench = SimBench::new(Some(1_000));
        let mut timer = Timer::new(bench.counter());
        let mut sensor = HcSr04::new(bench.trigger(), bench.echo(), None);

        sensor.measure_echo_us(&mut timer).unwrap();

        assert_eq!(bench.trigger_pulses.get(), 1);
        assert_eq!(bench.trigger_pulse_us.get(), Some(TRIGGER_PULSE_US));
        assert!(bench.trigger_settle_us.get().unwrap() >= TRIGGER_SETTLE_US);
    }

    #[test]
    fn test_echo_width_is_exact() {
        let bench = SimBench::new(Some(1_166));
        let mut timer = Timer::new(bench.counter());
        let mut sensor = HcSr04::new(bench.trigger(), bench.echo(), None);

        assert_eq!(sensor.measure_echo_us(&mut timer), Ok(1_166));
    }

    #[test]
    fn test_distance_conversion() {
        for width in [58, 117, 1_000, 1_166, 1_800, 5_831, 23_323] {
            let bench = SimBench::new(Some(width));
            let mut timer = Timer::new(bench.counter());
            let mut sensor = HcSr04::new(bench.trigger(), bench.echo(), None);

            assert_eq!(sensor.measure_cm(&mut timer), Ok(width * 343 / 20_000));
        }
    }

    #[test]
    fn test_known_distances() {
        let bench = SimBench::new(Some(1_166));
        let mut timer = Timer::new(bench.counter());
        let mut sensor = HcSr04::new(bench.trigger(), bench.echo(), None);
        assert_eq!(sensor.measure_cm(&mut timer), Ok(19));

        bench.echo_width_us.set(Some(1_800));
        assert_eq!(sensor.measure_cm(&mut timer), Ok(30));

        bench.echo_width_us.set(Some(58));
        assert_eq!(sensor.measure_cm(&mut timer), Ok(0));

        assert_eq!(bench.trigger_pulses.get(), 3);
    }

    #[test]
    fn test_no_echo_times_out() {
        let bench = SimBench::new(None);
        let mut timer = Timer::new(bench.counter());
        let mut sensor = HcSr04::new(bench.trigger(), bench.echo(), Some(30_000));

        assert_eq!(sensor.measure_cm(&mut timer), Err(SensorError::NoEcho));
    }

    #[test]
    fn test_stuck_echo_times_out() {
        let bench = SimBench::new(Some(100_000));
        let mut timer = Timer::new(bench.counter());
        let mut sensor = HcSr04::new(bench.trigger(), bench.echo(), Some(30_000));

        assert_eq!(sensor.measure_cm(&mut timer), Err(SensorError::EchoStuck));
    }

    #[test]
    fn test_timeout_does_not_affect_normal_reading() {
        let bench = SimBench::new(Some(5_831));
        let mut timer = Timer::new(bench.counter());
        let mut sensor = HcSr04::new(bench.trigger(), bench.echo(), Some(30_000));

        assert_eq!(sensor.measure_cm(&mut timer), Ok(100));
    }
}
