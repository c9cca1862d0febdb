//! Hardware abstraction traits
//!
//! These traits define the interface between the detector control loop
//! and the concrete drivers in `sonarwatch-drivers`.

pub mod display;
pub mod indicator;
pub mod sensor;

pub use display::CharacterDisplay;
pub use indicator::Indicator;
pub use sensor::{RangeSensor, SensorError};
