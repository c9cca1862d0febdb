//! GPIO pin abstractions
//!
//! Digital lines used by the detector: the rangefinder trigger and echo,
//! the display bus (RS, EN, D4-D7) and the proximity indicator.

/// Digital output pin
///
/// Writes are infallible; the boards we target drive GPIO through
/// memory-mapped set/clear registers.
pub trait OutputPin {
    /// Drive the line high (logic 1)
    fn set_high(&mut self);

    /// Drive the line low (logic 0)
    fn set_low(&mut self);

    /// Drive the line to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the line is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the line reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the line reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
