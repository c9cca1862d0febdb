//! Detector configuration

use super::pins::{PinMap, GPIO_COUNT};

/// Indicator turns on below this distance (cm)
pub const DEFAULT_THRESHOLD_CM: u32 = 30;

/// Period of the measure/display loop (ms)
pub const DEFAULT_PERIOD_MS: u32 = 300;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Threshold must be at least 1 cm
    ZeroThreshold,
    /// Loop period must be at least 1 ms
    ZeroPeriod,
    /// Echo timeout must be at least 1 µs when set
    ZeroEchoTimeout,
    /// Pin number out of range
    InvalidPin(u8),
    /// Same pin assigned to two roles
    DuplicatePin(u8),
    /// Only the indicator output may be active-low
    UnsupportedInversion(u8),
}

/// Complete detector configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DetectorConfig {
    /// Indicator asserts while `0 < distance < threshold_cm`
    pub threshold_cm: u32,
    /// Delay between loop iterations (ms)
    pub period_ms: u32,
    /// Give up on a missing or stuck echo after this many µs
    ///
    /// `None` waits forever, which hangs the loop if the echo line is
    /// disconnected.
    pub echo_timeout_us: Option<u32>,
    /// Pin role assignments
    pub pins: PinMap,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold_cm: DEFAULT_THRESHOLD_CM,
            period_ms: DEFAULT_PERIOD_MS,
            echo_timeout_us: None,
            pins: PinMap::default(),
        }
    }
}

impl DetectorConfig {
    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold_cm == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.echo_timeout_us == Some(0) {
            return Err(ConfigError::ZeroEchoTimeout);
        }

        // Bitmask of claimed pins
        let mut claimed: u32 = 0;
        for pin in self.pins.iter() {
            if pin.pin >= GPIO_COUNT {
                return Err(ConfigError::InvalidPin(pin.pin));
            }
            let mask = 1u32 << pin.pin;
            if claimed & mask != 0 {
                return Err(ConfigError::DuplicatePin(pin.pin));
            }
            claimed |= mask;
        }

        for pin in self.pins.iter() {
            if pin.inverted && pin != self.pins.indicator {
                return Err(ConfigError::UnsupportedInversion(pin.pin));
            }
        }

        Ok(())
    }
}
