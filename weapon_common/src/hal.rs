//! Hardware seams of the weapon core.
//!
//! - [`sink`] - `ActuatorSink`, `HapticSink` and `Delay` traits
//! - [`mock`] - Recording implementations for tests and simulation

pub mod mock;
pub mod sink;
