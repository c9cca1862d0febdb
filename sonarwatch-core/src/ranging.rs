//! Echo time-of-flight to distance conversion
//!
//! distance = elapsed × speed_of_sound / 2 (the pulse travels out and back).
//! With 343 m/s = 0.0343 cm/µs this becomes `(us * 343) / 20_000` in
//! integer arithmetic. The division truncates; there is no rounding.

/// Speed of sound in air at ~20°C (m/s)
pub const SPEED_OF_SOUND_M_S: u32 = 343;

/// Divisor turning µs × m/s into centimeters of one-way distance
///
/// 1 µs × 1 m/s = 1e-4 cm, halved for the round trip: 2 × 10_000.
pub const ROUND_TRIP_DIVISOR: u32 = 2 * 10_000;

/// Sentinel distance reported when no echo was received
pub const NO_ECHO_CM: u32 = 0;

/// Nearest distance the HC-SR04 can resolve (cm)
pub const MIN_RANGE_CM: u32 = 2;

/// Farthest distance the HC-SR04 can resolve (cm)
pub const MAX_RANGE_CM: u32 = 400;

/// Convert an echo pulse width in microseconds to centimeters
///
/// Uses a 64-bit intermediate so a wrapped-around or stuck counter
/// cannot overflow the product.
pub fn round_trip_us_to_cm(echo_us: u32) -> u32 {
    let cm = (echo_us as u64 * SPEED_OF_SOUND_M_S as u64) / ROUND_TRIP_DIVISOR as u64;
    // At most u32::MAX * 343 / 20000 = 73_658_689, so the cast is lossless
    cm as u32
}

/// Check whether a distance lies inside the sensor's physical range
pub fn in_sensor_range(distance_cm: u32) -> bool {
    (MIN_RANGE_CM..=MAX_RANGE_CM).contains(&distance_cm)
}
