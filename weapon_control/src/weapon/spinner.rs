//! Spinning weapon driven through an ESC.
//!
//! Observable phases (idle, spinning up, at speed, spinning down) are not
//! stored; they follow from the ramp's `current` vs `target` vs neutral.
//!
//! Per tick:
//! 1. Announce arming once with a haptic pulse.
//! 2. Not armed: target neutral, keep ramping down, stop here.
//! 3. Armed: resolve the enable input through the configured mode.
//! 4. Ramp toward the target with separate spin-up / spin-down rates.
//! 5. Write the ramped pulse width.
//! 6. Emit speed feedback through the hysteresis encoder.
//!
//! `emergency_stop()` is the one instantaneous change: the ESC goes to
//! neutral in the same call, bypassing the ramp.

use weapon_common::consts::{ESC_MAX_US, ESC_NEUTRAL_US};
use weapon_common::hal::sink::{ActuatorSink, Delay, HapticSink};
use weapon_common::input::InputSample;
use weapon_common::time::Millis;
use weapon_common::weapon::config::{SpinnerConfig, clamp_f64};
use weapon_common::weapon::mode::{SpinnerMode, WeaponKind};

use super::Weapon;
use crate::control::edge::EdgeDetector;
use crate::control::feedback::FeedbackState;
use crate::control::modes::{EnableSignal, spinner_output};
use crate::control::ramp::{RampRates, RampState, ramp_step};
use crate::safety::gate::WeaponState;

const NEUTRAL: f64 = ESC_NEUTRAL_US;

#[derive(Debug, Clone)]
pub struct SpinnerWeapon {
    state: WeaponState,
    ramp: RampState,
    feedback: FeedbackState,
    enable_edge: EdgeDetector,
    toggle_on: bool,
    mode: SpinnerMode,
    max_speed: f64,
    spin_up_ms: u32,
    spin_down_ms: u32,
    rumble: bool,
    esc_arm_delay_ms: u32,
}

impl SpinnerWeapon {
    /// Spinner of `kind` with factory settings.
    pub fn new(kind: WeaponKind) -> Self {
        Self::with_state(WeaponState::new(kind), &SpinnerConfig::default())
    }

    /// Spinner from an existing gate state and spinner settings.
    pub fn with_state(state: WeaponState, config: &SpinnerConfig) -> Self {
        let config = config.sanitized();
        Self {
            state,
            ramp: RampState::at(NEUTRAL),
            feedback: FeedbackState::new(NEUTRAL),
            enable_edge: EdgeDetector::new(),
            toggle_on: false,
            mode: config.mode,
            max_speed: config.max_speed,
            spin_up_ms: config.spin_up_ms,
            spin_down_ms: config.spin_down_ms,
            rumble: config.rumble,
            esc_arm_delay_ms: config.esc_arm_delay_ms,
        }
    }

    // ─── Configuration ──────────────────────────────────────────────

    /// Neutral → max duration [ms]; 0 = instant.
    pub fn set_spin_up_time(&mut self, ms: u32) {
        self.spin_up_ms = ms;
    }

    /// Max → neutral duration [ms]; 0 = instant.
    pub fn set_spin_down_time(&mut self, ms: u32) {
        self.spin_down_ms = ms;
    }

    /// Full-speed pulse width, clamped to `[neutral, 2000]`.
    pub fn set_max_speed(&mut self, speed: f64) {
        self.max_speed = clamp_f64("spinner.max_speed", speed, NEUTRAL, ESC_MAX_US);
    }

    pub fn set_control_mode(&mut self, mode: SpinnerMode) {
        self.mode = mode;
    }

    pub fn set_rumble_feedback(&mut self, enabled: bool) {
        self.rumble = enabled;
    }

    pub fn set_esc_arm_delay(&mut self, ms: u32) {
        self.esc_arm_delay_ms = ms;
    }

    // ─── Status ─────────────────────────────────────────────────────

    #[inline]
    pub fn current_speed(&self) -> f64 {
        self.ramp.current
    }

    #[inline]
    pub fn target_speed(&self) -> f64 {
        self.ramp.target
    }

    #[inline]
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    #[inline]
    pub fn mode(&self) -> SpinnerMode {
        self.mode
    }

    #[inline]
    pub fn toggle_on(&self) -> bool {
        self.toggle_on
    }

    #[inline]
    pub fn feedback(&self) -> &FeedbackState {
        &self.feedback
    }

    /// Ramp rates over the `[neutral, max]` span.
    ///
    /// A max speed at neutral leaves no span; the full ESC range is used
    /// then so a still-spinning motor keeps decelerating.
    pub fn rates(&self) -> RampRates {
        let span = self.max_speed - NEUTRAL;
        let span = if span > 0.0 { span } else { ESC_MAX_US - NEUTRAL };
        RampRates::from_durations(span, self.spin_up_ms, self.spin_down_ms)
    }

    // ─── Internals ──────────────────────────────────────────────────

    fn drive(&mut self, now: Millis, actuator: &mut dyn ActuatorSink) {
        let rates = self.rates();
        let speed = ramp_step(&mut self.ramp, &rates, now);
        actuator.set_level(speed);
    }

    fn apply_activity(&mut self, active: bool, now: Millis) {
        let (on, off) = match self.mode {
            SpinnerMode::Variable => ("SPINNER ACTIVE", "SPINNER IDLE"),
            SpinnerMode::Toggle | SpinnerMode::Hold => ("SPINNER ON", "SPINNER OFF"),
        };
        if active {
            if self.state.activate(now) {
                self.state.note(on);
            }
        } else if self.state.deactivate() {
            self.state.note(off);
        }
    }
}

impl Default for SpinnerWeapon {
    fn default() -> Self {
        Self::new(WeaponKind::VerticalSpinner)
    }
}

impl Weapon for SpinnerWeapon {
    fn state(&self) -> &WeaponState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WeaponState {
        &mut self.state
    }

    fn begin(&mut self, actuator: &mut dyn ActuatorSink, delay: &mut dyn Delay) {
        self.state.reset();

        actuator.set_level(NEUTRAL);
        self.ramp.snap(NEUTRAL);
        self.ramp.reset_timing();
        self.enable_edge.reset();
        self.toggle_on = false;

        delay.delay_ms(self.esc_arm_delay_ms);

        self.state.arm();
        self.state.note("Spinner ESC armed");
    }

    fn update(
        &mut self,
        now: Millis,
        input: &InputSample,
        actuator: &mut dyn ActuatorSink,
        haptics: &mut dyn HapticSink,
    ) {
        let pressed = self.state.enable_pressed(input);
        let signal = EnableSignal {
            pressed,
            rising: self.enable_edge.rising(pressed),
        };

        if !self.state.armed_flag() {
            self.feedback.clear_announcement();
        }

        let armed = self.state.is_armed(now);
        if armed && self.rumble {
            if let Some(pulse) = self.feedback.announce_armed() {
                haptics.play(pulse);
                self.state.note("Weapon ARMED - rumble sent");
            }
        }

        if !armed {
            self.toggle_on = false;
            self.ramp.target = NEUTRAL;
            self.drive(now, actuator);
            if self.ramp.current == NEUTRAL {
                self.feedback.reset_speed(NEUTRAL);
            }
            return;
        }

        let out = spinner_output(
            self.mode,
            signal,
            input.stick_y(),
            &mut self.toggle_on,
            NEUTRAL,
            self.max_speed,
        );
        self.ramp.target = out.target;
        self.apply_activity(out.active, now);

        self.drive(now, actuator);

        if self.rumble {
            if let Some(pulse) = self.feedback.encode(self.ramp.current, NEUTRAL, self.max_speed) {
                haptics.play(pulse);
            }
        }
    }

    fn emergency_stop(&mut self, actuator: &mut dyn ActuatorSink) {
        self.state.emergency_stop();
        self.ramp.snap(NEUTRAL);
        self.toggle_on = false;
        self.feedback.clear_announcement();
        self.feedback.reset_speed(NEUTRAL);
        actuator.set_level(NEUTRAL);
    }
}
