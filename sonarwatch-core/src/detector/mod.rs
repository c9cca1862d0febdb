//! Obstacle detector control loop
//!
//! One cycle: measure, redraw the distance on line 1 of the display,
//! update the indicator. [`Detector::run`] repeats cycles forever at the
//! configured period.
//!
//! ```text
//!  ┌──────────┐   cm   ┌────────────┐  text  ┌─────────┐
//!  │  sensor  │ ─────▶ │  detector  │ ─────▶ │ display │
//!  └──────────┘        └────────────┘        └─────────┘
//!                            │ 0 < cm < threshold
//!                            ▼
//!                      ┌───────────┐
//!                      │ indicator │
//!                      └───────────┘
//! ```

pub mod readout;

use heapless::String;
use sonarwatch_hal::Counter;

use crate::config::DetectorConfig;
use crate::ranging::{in_sensor_range, NO_ECHO_CM};
use crate::timer::Timer;
use crate::traits::{CharacterDisplay, Indicator, RangeSensor, SensorError};

pub use readout::{format_distance, is_obstacle, TEXT_CAPACITY};

/// Outcome of one detector cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    /// Distance shown on the display (cm), `NO_ECHO_CM` on a sensor fault
    pub distance_cm: u32,
    /// Whether the indicator was asserted
    pub indicator_on: bool,
    /// Whether the distance lies within the sensor's rated range
    pub in_range: bool,
    /// Sensor fault that replaced the reading, if any
    pub fault: Option<SensorError>,
}

/// Obstacle detector
///
/// Owns the sensor, display, indicator, and the text buffer reused by
/// every cycle. The timer is lent in by the caller on each call.
pub struct Detector<S, D, I> {
    sensor: S,
    display: D,
    indicator: I,
    config: DetectorConfig,
    text: String<TEXT_CAPACITY>,
}

impl<S, D, I> Detector<S, D, I>
where
    S: RangeSensor,
    D: CharacterDisplay,
    I: Indicator,
{
    /// Create a new detector
    pub fn new(sensor: S, display: D, indicator: I, config: DetectorConfig) -> Self {
        Self {
            sensor,
            display,
            indicator,
            config,
            text: String::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Text written to the display by the last cycle
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Bring up the display and force the indicator off
    pub fn init<C: Counter>(&mut self, timer: &mut Timer<C>) {
        self.display.initialize(timer);
        self.indicator.set_active(false);
    }

    /// Run a single measure/display/indicate cycle
    pub fn step<C: Counter>(&mut self, timer: &mut Timer<C>) -> Cycle {
        let (distance_cm, fault) = match self.sensor.measure_cm(timer) {
            Ok(cm) => (cm, None),
            Err(e) => (NO_ECHO_CM, Some(e)),
        };

        self.display.clear(timer);
        self.display.set_cursor(timer, 0, 0);
        format_distance(&mut self.text, distance_cm);
        self.display.print(timer, self.text.as_str());

        let indicator_on = is_obstacle(distance_cm, self.config.threshold_cm);
        self.indicator.set_active(indicator_on);

        Cycle {
            distance_cm,
            indicator_on,
            in_range: in_sensor_range(distance_cm),
            fault,
        }
    }

    /// Cycle forever, reporting each outcome and then waiting one period
    pub fn run<C, F>(&mut self, timer: &mut Timer<C>, mut on_cycle: F) -> !
    where
        C: Counter,
        F: FnMut(&Cycle),
    {
        loop {
            let cycle = self.step(timer);
            on_cycle(&cycle);
            timer.delay_milliseconds(self.config.period_ms);
        }
    }
}
