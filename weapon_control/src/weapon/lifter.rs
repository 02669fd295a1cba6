//! Servo-driven lifter arm.
//!
//! One symmetric angular rate [deg/s] moves the arm in both directions.
//! Unlike the spinner, the lifter holds its last commanded position when
//! no input asks for a change, and `emergency_stop()` lowers the arm
//! through the ramp instead of snapping it.

use weapon_common::consts::{LIFTER_SPEED_MAX, LIFTER_SPEED_MIN};
use weapon_common::hal::sink::{ActuatorSink, Delay, HapticSink};
use weapon_common::input::{ButtonSource, InputSample};
use weapon_common::time::Millis;
use weapon_common::weapon::config::{LifterConfig, clamp_f64, sanitize_range};
use weapon_common::weapon::mode::{LifterMode, WeaponKind};

use super::Weapon;
use crate::control::modes::{LifterCommand, lifter_command};
use crate::control::ramp::{RampRates, RampState, ramp_step};
use crate::safety::gate::WeaponState;

#[derive(Debug, Clone)]
pub struct LifterWeapon {
    state: WeaponState,
    ramp: RampState,
    mode: LifterMode,
    min_angle: f64,
    max_angle: f64,
    speed_deg_per_s: f64,
    up_button: ButtonSource,
    down_button: ButtonSource,
}

impl LifterWeapon {
    pub fn new() -> Self {
        Self::with_state(WeaponState::new(WeaponKind::Lifter), &LifterConfig::default())
    }

    pub fn with_state(state: WeaponState, config: &LifterConfig) -> Self {
        let config = config.sanitized();
        Self {
            state,
            ramp: RampState::at(config.min_angle),
            mode: config.mode,
            min_angle: config.min_angle,
            max_angle: config.max_angle,
            speed_deg_per_s: config.speed_deg_per_s,
            up_button: config.up_button,
            down_button: config.down_button,
        }
    }

    // ─── Configuration ──────────────────────────────────────────────

    /// Set the travel range, clamped to `[0, 180]` and ordered.
    pub fn set_range(&mut self, min_angle: f64, max_angle: f64) {
        let (lo, hi) = sanitize_range(min_angle, max_angle);
        self.min_angle = lo;
        self.max_angle = hi;
        self.ramp.target = self.ramp.target.clamp(lo, hi);
    }

    /// Slew rate [deg/s], clamped to `[10, 360]`.
    pub fn set_speed(&mut self, deg_per_s: f64) {
        self.speed_deg_per_s = clamp_f64(
            "lifter.speed_deg_per_s",
            deg_per_s,
            LIFTER_SPEED_MIN,
            LIFTER_SPEED_MAX,
        );
    }

    pub fn set_control_mode(&mut self, mode: LifterMode) {
        self.mode = mode;
    }

    pub fn set_up_button(&mut self, source: ButtonSource) {
        self.up_button = source;
    }

    pub fn set_down_button(&mut self, source: ButtonSource) {
        self.down_button = source;
    }

    // ─── Status ─────────────────────────────────────────────────────

    #[inline]
    pub fn current_angle(&self) -> f64 {
        self.ramp.current
    }

    #[inline]
    pub fn target_angle(&self) -> f64 {
        self.ramp.target
    }

    #[inline]
    pub fn range(&self) -> (f64, f64) {
        (self.min_angle, self.max_angle)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed_deg_per_s
    }

    #[inline]
    pub fn mode(&self) -> LifterMode {
        self.mode
    }

    fn drive(&mut self, now: Millis, actuator: &mut dyn ActuatorSink) {
        let rates = RampRates::per_second(self.speed_deg_per_s);
        let angle = ramp_step(&mut self.ramp, &rates, now);
        actuator.set_level(angle);
    }
}

impl Default for LifterWeapon {
    fn default() -> Self {
        Self::new()
    }
}

impl Weapon for LifterWeapon {
    fn state(&self) -> &WeaponState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WeaponState {
        &mut self.state
    }

    fn begin(&mut self, actuator: &mut dyn ActuatorSink, _delay: &mut dyn Delay) {
        self.state.reset();

        actuator.set_level(self.min_angle);
        self.ramp.snap(self.min_angle);
        self.ramp.reset_timing();

        self.state.arm();
        self.state.note("Lifter initialized");
    }

    fn update(
        &mut self,
        now: Millis,
        input: &InputSample,
        actuator: &mut dyn ActuatorSink,
        _haptics: &mut dyn HapticSink,
    ) {
        if !self.state.is_armed(now) {
            self.ramp.target = self.min_angle;
            self.drive(now, actuator);
            return;
        }

        let command = lifter_command(
            self.mode,
            input.is_pressed(self.up_button),
            input.is_pressed(self.down_button),
            input.stick_y(),
            self.min_angle,
            self.max_angle,
        );

        match command {
            LifterCommand::Hold => {}
            LifterCommand::Raise => {
                self.ramp.target = self.max_angle;
                if self.state.activate(now) {
                    self.state.note("LIFTER UP");
                }
            }
            LifterCommand::Lower => {
                self.ramp.target = self.min_angle;
                if self.state.deactivate() {
                    self.state.note("LIFTER DOWN");
                }
            }
            LifterCommand::Position { angle, active } => {
                self.ramp.target = angle;
                if active {
                    self.state.activate(now);
                } else {
                    self.state.deactivate();
                }
            }
        }

        self.drive(now, actuator);
    }

    /// Disarm and send the arm home through the ramp. The actuator is
    /// written by the following ticks.
    fn emergency_stop(&mut self, _actuator: &mut dyn ActuatorSink) {
        self.state.emergency_stop();
        self.ramp.target = self.min_angle;
    }
}
