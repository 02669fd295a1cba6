//! # Weapon Control Library
//!
//! Per-tick weapon controllers for a combat robot. Each tick the host loop
//! hands the active controller one gamepad [`InputSample`] and the current
//! time; the controller decides whether it may act (arming gate), what it
//! should do (mode interpretation) and how fast it may change its output
//! (ramp or timed pulse), then writes at most once to its actuator sink.
//!
//! ## Layers
//!
//! 1. **Safety gate** ([`safety::gate`]) - Arming flag plus post-link delay
//! 2. **Mode interpreters** ([`control::modes`]) - Input → target output
//! 3. **Output shaping** ([`control::ramp`], flipper pulse timing)
//! 4. **Feedback** ([`control::feedback`]) - Spinner speed → rumble
//!
//! ## Non-blocking Tick
//!
//! `update()` never waits and never allocates. The only blocking call is
//! the ESC arming delay inside `begin()`, before ticking starts.
//!
//! [`InputSample`]: weapon_common::input::InputSample

pub mod config;
pub mod control;
pub mod cycle;
pub mod safety;
pub mod weapon;
