//! GPIO indicator output
//!
//! LED or buzzer driven straight from a GPIO pin, or through a transistor
//! that inverts the logic.

use sonarwatch_core::traits::Indicator;
use sonarwatch_hal::OutputPin;

/// GPIO indicator output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioIndicator<P> {
    pin: P,
    /// If true, indicator ON = pin LOW
    inverted: bool,
    /// Current logical state
    active: bool,
}

impl<P: OutputPin> GpioIndicator<P> {
    /// Create a new GPIO indicator, initially off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the indicator is on while the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut indicator = Self {
            pin,
            inverted,
            active: false,
        };
        indicator.set_active(false);
        indicator
    }

    /// Create an indicator that is on while the pin is high
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create an indicator that is on while the pin is low
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Indicator for GpioIndicator<P> {
    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.pin.set_state(active != self.inverted);
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
