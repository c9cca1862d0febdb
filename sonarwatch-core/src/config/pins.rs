//! Pin role assignments
//!
//! Pins are written in config files using Klipper-style strings:
//! - "gpio15" -> pin 15
//! - "!gpio8" -> pin 8, active-low
//! - "^gpio16" -> pin 16, internal pull-up

/// Number of GPIO pins addressable by the config (RP2040 has 30)
pub const GPIO_COUNT: u8 = 30;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a plain active-high pin
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Parse a pin string such as `"!gpio8"` or `"^gpio16"`
    ///
    /// Modifiers may appear in either order before the `gpio` prefix.
    pub fn parse(s: &str) -> Option<Self> {
        let mut rest = s.trim();
        let mut inverted = false;
        let mut pull_up = false;

        loop {
            if let Some(r) = rest.strip_prefix('!') {
                if inverted {
                    return None;
                }
                inverted = true;
                rest = r;
            } else if let Some(r) = rest.strip_prefix('^') {
                if pull_up {
                    return None;
                }
                pull_up = true;
                rest = r;
            } else {
                break;
            }
        }

        let pin: u8 = rest.strip_prefix("gpio")?.parse().ok()?;
        if pin >= GPIO_COUNT {
            return None;
        }

        Some(Self {
            pin,
            inverted,
            pull_up,
        })
    }
}

/// HD44780 4-bit bus pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayPins {
    /// Register select (low = command, high = data)
    pub rs: PinConfig,
    /// Enable strobe
    pub en: PinConfig,
    /// Data lines D4..D7, least significant first
    pub data: [PinConfig; 4],
}

/// Pin roles of the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    /// HC-SR04 trigger output
    pub trigger: PinConfig,
    /// HC-SR04 echo input
    pub echo: PinConfig,
    /// Proximity indicator output (LED)
    pub indicator: PinConfig,
    /// Character display bus
    pub display: DisplayPins,
}

impl PinMap {
    /// Iterate over every assigned pin
    pub fn iter(&self) -> impl Iterator<Item = PinConfig> {
        [
            self.trigger,
            self.echo,
            self.indicator,
            self.display.rs,
            self.display.en,
            self.display.data[0],
            self.display.data[1],
            self.display.data[2],
            self.display.data[3],
        ]
        .into_iter()
    }
}

impl Default for PinMap {
    /// Default wiring for a Raspberry Pi Pico breadboard build
    fn default() -> Self {
        Self {
            trigger: PinConfig::new(15),
            echo: PinConfig::new(16),
            indicator: PinConfig::new(25),
            display: DisplayPins {
                rs: PinConfig::new(6),
                en: PinConfig::new(7),
                data: [
                    PinConfig::new(8),
                    PinConfig::new(9),
                    PinConfig::new(10),
                    PinConfig::new(11),
                ],
            },
        }
    }
}
