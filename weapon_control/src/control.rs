//! Control engine root.
//!
//! Open-loop, time-based output shaping shared by the weapon variants:
//! rate-limited ramp, rising-edge detection, input-to-target mode
//! interpretation and haptic feedback encoding.

pub mod edge;
pub mod feedback;
pub mod modes;
pub mod ramp;
