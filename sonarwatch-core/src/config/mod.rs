//! Configuration types
//!
//! All configuration is fixed at compile time. The firmware build script
//! turns `detector.toml` into a [`DetectorConfig`] constant after running
//! [`DetectorConfig::validate`].

pub mod pins;
pub mod types;

pub use pins::{DisplayPins, PinConfig, PinMap, GPIO_COUNT};
pub use types::*;
