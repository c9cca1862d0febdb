//! Sonarwatch Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that the rangefinder
//! and display drivers are written against. Chip-specific HALs implement
//! them so the same drivers and control loop run on any board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  sonarwatch-firmware (control loop)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sonarwatch-core / sonarwatch-drivers   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sonarwatch-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ sonarwatch-   │
//!             │  hal-rp2040   │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`counter::Counter`] - Free-running hardware counter used for
//!   busy-wait delays and pulse-width capture

#![no_std]
#![deny(unsafe_code)]

pub mod counter;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use counter::Counter;
pub use gpio::{InputPin, OutputPin};
