//! HD44780 character LCD over a 4-bit parallel bus
//!
//! Write-only wiring: RS selects command or data register, EN latches the
//! nibble on D4..D7 on its falling edge, and R/W is tied to ground. The
//! busy flag cannot be read, so every transfer is followed by a fixed
//! worst-case delay instead.
//!
//! Each byte goes out as two nibbles, high first, then a 2 ms wait:
//!
//! ```text
//! EN  ___/‾‾‾‾\____/‾‾‾‾\____ ........
//! D   ===< hi  >====< lo  >====
//!         10µs 10µs
//! ```

use embedded_hal::delay::DelayNs;
use sonarwatch_core::traits::CharacterDisplay;
use sonarwatch_hal::OutputPin;

/// Controller instructions used by this driver
pub mod cmd {
    /// Clear display, cursor to DDRAM 0
    pub const CLEAR_DISPLAY: u8 = 0x01;
    /// Entry mode: increment address, no display shift
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON_CURSOR_OFF: u8 = 0x0C;
    /// Function set: 4-bit bus, 2 lines, 5x8 font
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    /// Set DDRAM address (OR in the address)
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// Nibble repeated three times to force 8-bit mode from any state
const WAKE_NIBBLE: u8 = 0x03;

/// Nibble that switches the bus to 4-bit mode
const FOUR_BIT_NIBBLE: u8 = 0x02;

/// Power-up settle time before the first transfer (ms)
const POWER_ON_DELAY_MS: u32 = 20;

/// Wait after the first wake nibble (ms)
const WAKE_DELAY_MS: u32 = 5;

/// Wait after the second wake nibble (µs)
const WAKE_SHORT_DELAY_US: u32 = 100;

/// EN high time, and settle time after EN falls (µs)
const ENABLE_PULSE_US: u32 = 10;

/// Execution time allowed for any command or data write (ms)
const TRANSFER_DELAY_MS: u32 = 2;

/// Commands sent after the bus is in 4-bit mode, in order
const INIT_COMMANDS: [u8; 4] = [
    cmd::FUNCTION_SET_4BIT_2LINE,
    cmd::DISPLAY_ON_CURSOR_OFF,
    cmd::ENTRY_MODE_INCREMENT,
    cmd::CLEAR_DISPLAY,
];

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

const COLUMNS: u8 = 16;
const ROWS: u8 = 2;

/// HD44780 16x2 display driver
pub struct Hd44780<P> {
    rs: P,
    en: P,
    /// D4..D7, bit 0 of a nibble drives `data[0]`
    data: [P; 4],
}

impl<P: OutputPin> Hd44780<P> {
    /// Create a driver and drive every bus line low
    pub fn new(mut rs: P, mut en: P, mut data: [P; 4]) -> Self {
        rs.set_low();
        en.set_low();
        for line in data.iter_mut() {
            line.set_low();
        }
        Self { rs, en, data }
    }

    /// Strobe EN so the controller latches D4..D7
    pub fn enable_pulse<D: DelayNs>(&mut self, delay: &mut D) {
        self.en.set_high();
        delay.delay_us(ENABLE_PULSE_US);
        self.en.set_low();
        delay.delay_us(ENABLE_PULSE_US);
    }

    /// Put the low four bits of `value` on the bus and latch them
    pub fn send_nibble<D: DelayNs>(&mut self, delay: &mut D, value: u8) {
        for line in self.data.iter_mut() {
            line.set_low();
        }
        for (bit, line) in self.data.iter_mut().enumerate() {
            if value & (1 << bit) != 0 {
                line.set_high();
            }
        }
        self.enable_pulse(delay);
    }

    /// Write an instruction
    pub fn send_command<D: DelayNs>(&mut self, delay: &mut D, command: u8) {
        self.rs.set_low();
        self.send_byte(delay, command);
    }

    /// Write a character code to DDRAM at the cursor
    pub fn send_data<D: DelayNs>(&mut self, delay: &mut D, data: u8) {
        self.rs.set_high();
        self.send_byte(delay, data);
    }

    fn send_byte<D: DelayNs>(&mut self, delay: &mut D, byte: u8) {
        self.send_nibble(delay, byte >> 4);
        self.send_nibble(delay, byte & 0x0F);
        delay.delay_ms(TRANSFER_DELAY_MS);
    }

    /// Give the pins back as (rs, en, data)
    pub fn release(self) -> (P, P, [P; 4]) {
        (self.rs, self.en, self.data)
    }
}

impl<P: OutputPin> CharacterDisplay for Hd44780<P> {
    fn initialize<D: DelayNs>(&mut self, delay: &mut D) {
        // Wake nibbles are instructions
        self.rs.set_low();

        delay.delay_ms(POWER_ON_DELAY_MS);
        self.send_nibble(delay, WAKE_NIBBLE);
        delay.delay_ms(WAKE_DELAY_MS);
        self.send_nibble(delay, WAKE_NIBBLE);
        delay.delay_us(WAKE_SHORT_DELAY_US);
        self.send_nibble(delay, WAKE_NIBBLE);
        self.send_nibble(delay, FOUR_BIT_NIBBLE);

        for command in INIT_COMMANDS {
            self.send_command(delay, command);
        }
    }

    fn clear<D: DelayNs>(&mut self, delay: &mut D) {
        self.send_command(delay, cmd::CLEAR_DISPLAY);
    }

    fn set_cursor<D: DelayNs>(&mut self, delay: &mut D, row: u8, col: u8) {
        let offset = ROW_OFFSETS[usize::from(row.min(ROWS - 1))];
        self.send_command(delay, cmd::SET_DDRAM_ADDR | offset.wrapping_add(col));
    }

    fn print<D: DelayNs>(&mut self, delay: &mut D, text: &str) {
        for byte in text.bytes() {
            self.send_data(delay, byte);
        }
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLUMNS, ROWS)
    }
}
