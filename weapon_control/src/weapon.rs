//! Weapon controllers.
//!
//! A closed set of variants behind one capability trait:
//!
//! | Variant | Output | Shaping |
//! |---------|--------|---------|
//! | [`null::NullWeapon`] | none | none |
//! | [`spinner::SpinnerWeapon`] | ESC pulse width | asymmetric ramp + haptics |
//! | [`lifter::LifterWeapon`] | servo angle | symmetric ramp |
//! | [`flipper::FlipperWeapon`] | solenoid on/off | timed pulse + cooldown |
//!
//! [`controller::WeaponController`] selects one variant from configuration
//! at startup; it is not swapped while ticking.
//!
//! # Lifecycle
//!
//! 1. `begin()` - Neutralize the actuator and arm. The only call that may block.
//! 2. `begin_link()` - Start the safety delay once the gamepad connects.
//! 3. `update()` - Once per control tick. Never blocks, at most one
//!    actuator write.
//! 4. `emergency_stop()` - Any time, from any state, including before `begin()`.
//!
//! Calling `update()` before `begin()` is not part of the contract. With
//! the arming flag still clear every variant only drives its neutral output.

pub mod controller;
pub mod flipper;
pub mod lifter;
pub mod null;
pub mod spinner;

use weapon_common::hal::sink::{ActuatorSink, Delay, HapticSink};
use weapon_common::input::InputSample;
use weapon_common::time::Millis;
use weapon_common::weapon::mode::{EnableButton, WeaponKind};

use crate::safety::gate::WeaponState;

/// Per-tick weapon controller.
pub trait Weapon {
    /// Shared arming and activity state.
    fn state(&self) -> &WeaponState;

    fn state_mut(&mut self) -> &mut WeaponState;

    /// Initialize the actuator to its neutral output and arm.
    fn begin(&mut self, actuator: &mut dyn ActuatorSink, delay: &mut dyn Delay);

    /// Run one control tick.
    fn update(
        &mut self,
        now: Millis,
        input: &InputSample,
        actuator: &mut dyn ActuatorSink,
        haptics: &mut dyn HapticSink,
    );

    /// Disarm and neutralize the output. Total: valid from every state.
    fn emergency_stop(&mut self, actuator: &mut dyn ActuatorSink);

    fn kind(&self) -> WeaponKind {
        self.state().kind()
    }

    /// Record the moment the input link came up.
    fn begin_link(&mut self, now: Millis) {
        self.state_mut().begin_link(now);
    }

    /// Arming flag set and safety delay elapsed.
    fn is_armed(&self, now: Millis) -> bool {
        self.state().is_armed(now)
    }

    /// Set the arming flag again after a `disarm()`.
    fn arm(&mut self) {
        self.state_mut().arm();
    }

    /// Clear arming and activity without touching the actuator.
    fn disarm(&mut self) {
        self.state_mut().disarm();
    }

    fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// Time since activation [ms], 0 while inactive.
    fn active_time(&self, now: Millis) -> u32 {
        self.state().active_time(now)
    }

    fn set_safety_delay(&mut self, delay_ms: u32) {
        self.state_mut().set_safety_delay(delay_ms);
    }

    fn set_enable_button(&mut self, button: EnableButton) {
        self.state_mut().set_enable_button(button);
    }

    fn set_verbose(&mut self, verbose: bool) {
        self.state_mut().set_verbose(verbose);
    }
}
