//! Range sensor trait

use sonarwatch_hal::Counter;

use crate::timer::Timer;

/// Errors that can occur during a range measurement
///
/// Only reported when the sensor was built with an echo timeout.
/// Without one, a silent echo line blocks the measurement forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Echo line never went high after the trigger pulse
    NoEcho,
    /// Echo line went high but never came back low
    EchoStuck,
}

/// Trait for distance sensors
///
/// The timer is borrowed per measurement rather than owned so the display
/// driver and the loop delay can share the same counter.
pub trait RangeSensor {
    /// Take one measurement and return the distance in whole centimeters
    fn measure_cm<C: Counter>(&mut self, timer: &mut Timer<C>) -> Result<u32, SensorError>;
}
