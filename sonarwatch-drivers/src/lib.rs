//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in sonarwatch-core:
//!
//! - Range sensors (HC-SR04 ultrasonic)
//! - Character displays (HD44780 over a 4-bit bus)
//! - Indicators (GPIO LED/buzzer, active-high or active-low)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod indicator;
pub mod sensor;

#[cfg(test)]
mod testing;
