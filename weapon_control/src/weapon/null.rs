//! Placeholder weapon for robots without one.
//!
//! Satisfies the full [`Weapon`] contract so callers always hold a valid
//! controller. It never arms and never writes to any sink.

use weapon_common::hal::sink::{ActuatorSink, Delay, HapticSink};
use weapon_common::input::InputSample;
use weapon_common::time::Millis;
use weapon_common::weapon::mode::WeaponKind;

use super::Weapon;
use crate::safety::gate::WeaponState;

#[derive(Debug, Clone)]
pub struct NullWeapon {
    state: WeaponState,
}

impl NullWeapon {
    pub const fn new() -> Self {
        Self {
            state: WeaponState::new(WeaponKind::None),
        }
    }
}

impl Default for NullWeapon {
    fn default() -> Self {
        Self::new()
    }
}

impl Weapon for NullWeapon {
    fn state(&self) -> &WeaponState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WeaponState {
        &mut self.state
    }

    fn begin(&mut self, _actuator: &mut dyn ActuatorSink, _delay: &mut dyn Delay) {}

    fn update(
        &mut self,
        _now: Millis,
        _input: &InputSample,
        _actuator: &mut dyn ActuatorSink,
        _haptics: &mut dyn HapticSink,
    ) {
    }

    fn emergency_stop(&mut self, _actuator: &mut dyn ActuatorSink) {}

    /// Nothing to arm.
    fn arm(&mut self) {}
}
