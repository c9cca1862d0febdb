//! Readout formatting and the proximity rule

use core::fmt::Write;

use heapless::String;

/// Capacity of the display text buffer
///
/// Large enough for "Distance: 4294967295cm" (22 bytes), so any `u32`
/// distance formats without truncation.
pub const TEXT_CAPACITY: usize = 24;

/// Format a distance as `"Distance: {cm}cm"`, replacing the buffer contents
pub fn format_distance(buf: &mut String<TEXT_CAPACITY>, distance_cm: u32) {
    buf.clear();
    // Cannot overflow: see TEXT_CAPACITY
    write!(buf, "Distance: {}cm", distance_cm).ok();
}

/// Decide whether an object is close enough to assert the indicator
///
/// Zero is the no-echo sentinel, not "touching", so it never asserts.
pub fn is_obstacle(distance_cm: u32, threshold_cm: u32) -> bool {
    distance_cm > 0 && distance_cm < threshold_cm
}
