//! RP2040-specific HAL for the obstacle detector firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `sonarwatch-hal` traits, plus RP2040-specific functionality:
//!
//! - GPIO wrappers over embassy-rp `Output`/`Input`
//! - Microsecond counter on top of the embassy time driver
//! - Dynamic pin allocation for config-driven setup

#![no_std]

pub mod counter;
pub mod gpio;
pub mod pins;

pub use counter::UptimeCounter;
pub use gpio::{RpInput, RpOutput};
pub use pins::{PinBank, PinError};
