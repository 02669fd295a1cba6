//! Closed set of weapon controllers, selected once from configuration.

use tracing::info;

use weapon_common::hal::sink::{ActuatorSink, Delay, HapticSink};
use weapon_common::input::InputSample;
use weapon_common::time::Millis;
use weapon_common::weapon::config::WeaponConfig;
use weapon_common::weapon::mode::WeaponKind;

use super::Weapon;
use super::flipper::FlipperWeapon;
use super::lifter::LifterWeapon;
use super::null::NullWeapon;
use super::spinner::SpinnerWeapon;
use crate::safety::gate::WeaponState;

/// The installed weapon.
#[derive(Debug, Clone)]
pub enum WeaponController {
    Null(NullWeapon),
    Spinner(SpinnerWeapon),
    Lifter(LifterWeapon),
    Flipper(FlipperWeapon),
}

impl WeaponController {
    /// Build the controller for `config.weapon.kind`, clamping every
    /// setting into range.
    pub fn from_config(config: &WeaponConfig) -> Self {
        let config = config.sanitized();
        let kind = config.weapon.kind;
        let state = WeaponState::with_settings(kind, &config.safety, config.shared.verbose);

        let controller = match kind {
            WeaponKind::None => Self::Null(NullWeapon::new()),
            WeaponKind::VerticalSpinner | WeaponKind::HorizontalSpinner => {
                Self::Spinner(SpinnerWeapon::with_state(state, &config.spinner))
            }
            WeaponKind::Lifter => Self::Lifter(LifterWeapon::with_state(state, &config.lifter)),
            WeaponKind::Flipper => {
                Self::Flipper(FlipperWeapon::with_state(state, &config.flipper))
            }
        };

        info!(
            weapon = kind.label(),
            safety_delay_ms = config.safety.safety_delay_ms,
            "Weapon controller created"
        );
        controller
    }

    fn inner(&self) -> &dyn Weapon {
        match self {
            Self::Null(w) => w,
            Self::Spinner(w) => w,
            Self::Lifter(w) => w,
            Self::Flipper(w) => w,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Weapon {
        match self {
            Self::Null(w) => w,
            Self::Spinner(w) => w,
            Self::Lifter(w) => w,
            Self::Flipper(w) => w,
        }
    }

    pub fn as_spinner(&self) -> Option<&SpinnerWeapon> {
        match self {
            Self::Spinner(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_spinner_mut(&mut self) -> Option<&mut SpinnerWeapon> {
        match self {
            Self::Spinner(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_lifter(&self) -> Option<&LifterWeapon> {
        match self {
            Self::Lifter(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_lifter_mut(&mut self) -> Option<&mut LifterWeapon> {
        match self {
            Self::Lifter(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_flipper(&self) -> Option<&FlipperWeapon> {
        match self {
            Self::Flipper(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_flipper_mut(&mut self) -> Option<&mut FlipperWeapon> {
        match self {
            Self::Flipper(w) => Some(w),
            _ => None,
        }
    }
}

impl Default for WeaponController {
    fn default() -> Self {
        Self::Null(NullWeapon::new())
    }
}

impl Weapon for WeaponController {
    fn state(&self) -> &WeaponState {
        self.inner().state()
    }

    fn state_mut(&mut self) -> &mut WeaponState {
        self.inner_mut().state_mut()
    }

    fn begin(&mut self, actuator: &mut dyn ActuatorSink, delay: &mut dyn Delay) {
        self.inner_mut().begin(actuator, delay);
    }

    fn update(
        &mut self,
        now: Millis,
        input: &InputSample,
        actuator: &mut dyn ActuatorSink,
        haptics: &mut dyn HapticSink,
    ) {
        self.inner_mut().update(now, input, actuator, haptics);
    }

    fn emergency_stop(&mut self, actuator: &mut dyn ActuatorSink) {
        self.inner_mut().emergency_stop(actuator);
    }

    fn arm(&mut self) {
        self.inner_mut().arm();
    }
}
