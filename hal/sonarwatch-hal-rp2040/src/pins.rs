//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so pin roles can
//! come from `detector.toml` instead of being hardcoded.

use embassy_rp::gpio::AnyPin;
use embassy_rp::{Peri, Peripherals};

/// Number of user GPIO pins on the RP2040
pub const PIN_COUNT: usize = 30;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken
    AlreadyTaken(u8),
}

macro_rules! degrade_pins {
    ($p:ident, $($pin:ident),* $(,)?) => {
        [$(Some(Peri::<'static, _>::into::<AnyPin>($p.$pin))),*]
    };
}

/// Pin bank that holds all GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; PIN_COUNT],
}

impl PinBank {
    /// Move every GPIO pin out of the peripherals
    pub fn new(p: Peripherals) -> Self {
        Self {
            pins: degrade_pins!(
                p, PIN_0, PIN_1, PIN_2, PIN_3, PIN_4, PIN_5, PIN_6, PIN_7, PIN_8, PIN_9, PIN_10,
                PIN_11, PIN_12, PIN_13, PIN_14, PIN_15, PIN_16, PIN_17, PIN_18, PIN_19, PIN_20,
                PIN_21, PIN_22, PIN_23, PIN_24, PIN_25, PIN_26, PIN_27, PIN_28, PIN_29,
            ),
        }
    }

    /// Take a pin by number
    ///
    /// Fails if the number is out of range or the pin was already taken.
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(usize::from(pin_num))
            .ok_or(PinError::InvalidPin(pin_num))?
            .take()
            .ok_or(PinError::AlreadyTaken(pin_num))
    }
}
