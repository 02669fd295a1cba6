//! Solenoid flipper: a timed-pulse generator with a cooldown.
//!
//! ```text
//!          fire()                     duration elapsed
//! Ready ─────────────→ Firing ───────────────────────→ Ready
//!   ↑ canFire: now − last_fired_at ≥ cooldown (or never fired)
//! ```
//!
//! The cooldown is measured between pulse starts and survives
//! `emergency_stop()`, so a stop/restart cycle cannot shorten it.

use tracing::trace;

use weapon_common::consts::{
    COOLDOWN_MAX_MS, COOLDOWN_MIN_MS, FIRE_DURATION_MAX_MS, FIRE_DURATION_MIN_MS,
};
use weapon_common::hal::sink::{ActuatorSink, Delay, HapticSink};
use weapon_common::input::InputSample;
use weapon_common::time::Millis;
use weapon_common::weapon::config::{FlipperConfig, clamp_ms};
use weapon_common::weapon::mode::{FlipperMode, WeaponKind};

use super::Weapon;
use crate::control::edge::EdgeDetector;
use crate::control::modes::{EnableSignal, flipper_wants_fire};
use crate::safety::gate::WeaponState;

/// Outcome of a fire attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireResult {
    /// Solenoid energized.
    Fired,
    /// Attempt refused; output untouched.
    Rejected(&'static str),
}

impl FireResult {
    #[inline]
    pub const fn is_fired(self) -> bool {
        matches!(self, Self::Fired)
    }
}

// ─── Pulse State ────────────────────────────────────────────────────

/// Pulse timing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseState {
    pub firing: bool,
    pub fire_started_at: Option<Millis>,
    pub last_fired_at: Option<Millis>,
    pub fire_duration_ms: u32,
    pub cooldown_ms: u32,
}

impl PulseState {
    pub const fn new(fire_duration_ms: u32, cooldown_ms: u32) -> Self {
        Self {
            firing: false,
            fire_started_at: None,
            last_fired_at: None,
            fire_duration_ms,
            cooldown_ms,
        }
    }

    /// Cooldown satisfied since the previous pulse start.
    #[inline]
    pub fn can_fire(&self, now: Millis) -> bool {
        match self.last_fired_at {
            Some(at) => now.wrapping_since(at) >= self.cooldown_ms,
            None => true,
        }
    }

    /// Current pulse has run its full duration.
    #[inline]
    pub fn pulse_elapsed(&self, now: Millis) -> bool {
        match (self.firing, self.fire_started_at) {
            (true, Some(at)) => now.wrapping_since(at) >= self.fire_duration_ms,
            _ => false,
        }
    }

    /// Time left until `can_fire` [ms].
    pub fn cooldown_remaining(&self, now: Millis) -> u32 {
        match self.last_fired_at {
            Some(at) => self.cooldown_ms.saturating_sub(now.wrapping_since(at)),
            None => 0,
        }
    }
}

// ─── Flipper ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FlipperWeapon {
    state: WeaponState,
    pulse: PulseState,
    enable_edge: EdgeDetector,
    mode: FlipperMode,
}

impl FlipperWeapon {
    pub fn new() -> Self {
        Self::with_state(WeaponState::new(WeaponKind::Flipper), &FlipperConfig::default())
    }

    pub fn with_state(state: WeaponState, config: &FlipperConfig) -> Self {
        let config = config.sanitized();
        Self {
            state,
            pulse: PulseState::new(config.fire_duration_ms, config.cooldown_ms),
            enable_edge: EdgeDetector::new(),
            mode: config.mode,
        }
    }

    /// Solenoid on-time [ms], clamped to `[50, 1000]`.
    pub fn set_fire_duration(&mut self, ms: u32) {
        self.pulse.fire_duration_ms = clamp_ms(
            "flipper.fire_duration_ms",
            ms,
            FIRE_DURATION_MIN_MS,
            FIRE_DURATION_MAX_MS,
        );
    }

    /// Minimum time between pulse starts [ms], clamped to `[200, 5000]`.
    pub fn set_cooldown(&mut self, ms: u32) {
        self.pulse.cooldown_ms = clamp_ms("flipper.cooldown_ms", ms, COOLDOWN_MIN_MS, COOLDOWN_MAX_MS);
    }

    pub fn set_control_mode(&mut self, mode: FlipperMode) {
        self.mode = mode;
    }

    #[inline]
    pub fn mode(&self) -> FlipperMode {
        self.mode
    }

    #[inline]
    pub fn pulse(&self) -> &PulseState {
        &self.pulse
    }

    #[inline]
    pub fn is_firing(&self) -> bool {
        self.pulse.firing
    }

    #[inline]
    pub fn can_fire(&self, now: Millis) -> bool {
        self.pulse.can_fire(now)
    }

    /// Start a pulse if armed, idle and out of cooldown.
    pub fn fire(&mut self, now: Millis, actuator: &mut dyn ActuatorSink) -> FireResult {
        if let Some(reason) = self.rejection(now) {
            trace!(
                reason,
                cooldown_remaining_ms = self.pulse.cooldown_remaining(now),
                "fire rejected"
            );
            return FireResult::Rejected(reason);
        }
        self.start_pulse(now, actuator);
        FireResult::Fired
    }

    fn start_pulse(&mut self, now: Millis, actuator: &mut dyn ActuatorSink) {
        actuator.set_discrete(true);
        self.pulse.firing = true;
        self.pulse.fire_started_at = Some(now);
        self.pulse.last_fired_at = Some(now);
        self.state.restart_activation(now);
        self.state.note("FLIPPER FIRED!");
    }

    fn rejection(&self, now: Millis) -> Option<&'static str> {
        if !self.state.is_armed(now) {
            Some("not armed")
        } else if self.pulse.firing {
            Some("already firing")
        } else if !self.pulse.can_fire(now) {
            Some("cooldown")
        } else {
            None
        }
    }

    /// End the pulse if it has run its duration. Returns `true` on retract.
    fn retract_if_elapsed(&mut self, now: Millis, actuator: &mut dyn ActuatorSink) -> bool {
        if !self.pulse.pulse_elapsed(now) {
            return false;
        }
        actuator.set_discrete(false);
        self.pulse.firing = false;
        self.state.deactivate();
        self.state.note("Flipper retracted");
        true
    }
}

impl Default for FlipperWeapon {
    fn default() -> Self {
        Self::new()
    }
}

impl Weapon for FlipperWeapon {
    fn state(&self) -> &WeaponState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WeaponState {
        &mut self.state
    }

    fn begin(&mut self, actuator: &mut dyn ActuatorSink, _delay: &mut dyn Delay) {
        self.state.reset();
        actuator.set_discrete(false);
        self.pulse.firing = false;
        self.enable_edge.reset();
        self.state.arm();
        self.state.note("Flipper initialized");
    }

    fn update(
        &mut self,
        now: Millis,
        input: &InputSample,
        actuator: &mut dyn ActuatorSink,
        _haptics: &mut dyn HapticSink,
    ) {
        let retracted = self.retract_if_elapsed(now, actuator);

        let pressed = self.state.enable_pressed(input);
        let signal = EnableSignal {
            pressed,
            rising: self.enable_edge.rising(pressed),
        };

        // One actuator write per tick: a retract tick never re-fires.
        if retracted || !self.state.is_armed(now) || self.pulse.firing {
            return;
        }

        if flipper_wants_fire(self.mode, signal) && self.pulse.can_fire(now) {
            self.start_pulse(now, actuator);
        }
    }

    fn emergency_stop(&mut self, actuator: &mut dyn ActuatorSink) {
        self.state.emergency_stop();
        actuator.set_discrete(false);
        self.pulse.firing = false;
    }
}
