//! Board-agnostic core logic for the obstacle detector firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Timer service (busy-wait delays and bounded polling on a counter)
//! - Echo-time to distance conversion
//! - Hardware abstraction traits (range sensor, character display, indicator)
//! - Detector control loop
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod detector;
pub mod ranging;
pub mod timer;
pub mod traits;

pub use detector::{Cycle, Detector};
pub use timer::{HardwareTimeout, Timer};
