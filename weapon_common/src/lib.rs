//! Weapon Common Library
//!
//! Shared types for the combat robot weapon subsystem: per-tick input
//! samples, the actuator and haptic sink seams, weapon configuration and
//! the numeric limits every controller clamps against.
//!
//! # Module Structure
//!
//! - [`consts`] - Defaults and clamp bounds
//! - [`time`] - Wraparound-safe millisecond timestamps
//! - [`input`] - Gamepad input sample and button resolution
//! - [`hal`] - Actuator, haptic and delay sinks (plus recording mocks)
//! - [`weapon`] - Weapon kinds, control modes and configuration structs
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use weapon_common::prelude::*;
//!
//! let sample = InputSample::neutral().with_buttons(Buttons::R1);
//! assert!(sample.is_pressed(ButtonSource::R1));
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod input;
pub mod prelude;
pub mod time;
pub mod weapon;
