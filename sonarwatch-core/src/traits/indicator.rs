//! Binary indicator output

/// Trait for the proximity indicator (LED, buzzer, relay)
pub trait Indicator {
    /// Turn the indicator on or off
    fn set_active(&mut self, active: bool);

    /// Check if the indicator is currently on
    fn is_active(&self) -> bool;
}
