//! Character display trait

use embedded_hal::delay::DelayNs;

/// Trait for text-mode character displays (HD44780 and compatibles)
///
/// Every operation is blocking and paced by the supplied delay provider.
/// Writes never fail: the bus is write-only and the controller is never
/// polled for its busy flag.
pub trait CharacterDisplay {
    /// Run the controller power-on sequence
    fn initialize<D: DelayNs>(&mut self, delay: &mut D);

    /// Blank the display
    fn clear<D: DelayNs>(&mut self, delay: &mut D);

    /// Move the cursor to `col` on `row` (both 0-based)
    fn set_cursor<D: DelayNs>(&mut self, delay: &mut D, row: u8, col: u8);

    /// Write text at the cursor
    ///
    /// No wrapping: the caller keeps text within the display width.
    fn print<D: DelayNs>(&mut self, delay: &mut D, text: &str);

    /// Display dimensions as (columns, rows)
    fn dimensions(&self) -> (u8, u8);
}
