//! Weapon configuration structures.
//!
//! All config types use `serde::Deserialize` for TOML loading and every
//! field has a default, so a missing section means factory settings.
//! Numeric parameters are clamped into their `MIN`/`MAX` bounds by
//! `sanitized()`; an out-of-range value is corrected, never an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SharedConfig;
use crate::consts::{
    ANGLE_MAX, ANGLE_MIN, COOLDOWN_DEFAULT_MS, COOLDOWN_MAX_MS, COOLDOWN_MIN_MS,
    ESC_ARM_DELAY_DEFAULT_MS, ESC_MAX_US, ESC_NEUTRAL_US, FIRE_DURATION_DEFAULT_MS,
    FIRE_DURATION_MAX_MS, FIRE_DURATION_MIN_MS, LIFTER_SPEED_DEFAULT, LIFTER_SPEED_MAX,
    LIFTER_SPEED_MIN, SAFETY_DELAY_DEFAULT_MS, SPIN_DOWN_DEFAULT_MS, SPIN_UP_DEFAULT_MS,
};
use crate::input::ButtonSource;

use super::mode::{EnableButton, FlipperMode, LifterMode, SpinnerMode, WeaponKind};

/// Clamp a `u32` setting, noting the correction at debug level.
pub fn clamp_ms(name: &str, value: u32, min: u32, max: u32) -> u32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        debug!(setting = name, value, clamped, "clamped out-of-range setting");
    }
    clamped
}

/// Clamp an `f64` setting, noting the correction at debug level.
///
/// NaN collapses to `min`.
pub fn clamp_f64(name: &str, value: f64, min: f64, max: f64) -> f64 {
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    if clamped != value {
        debug!(setting = name, value, clamped, "clamped out-of-range setting");
    }
    clamped
}

// ─── Top-Level Config ───────────────────────────────────────────────

/// Complete weapon configuration file.
///
/// Only the section matching `weapon.kind` is used at runtime; the others
/// keep their defaults so a robot can be re-fitted by changing one line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub weapon: WeaponSection,
    #[serde(default)]
    pub safety: SafetySettings,
    #[serde(default)]
    pub spinner: SpinnerConfig,
    #[serde(default)]
    pub lifter: LifterConfig,
    #[serde(default)]
    pub flipper: FlipperConfig,
}

impl WeaponConfig {
    /// Copy with every numeric setting clamped into range.
    pub fn sanitized(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            weapon: self.weapon,
            safety: self.safety,
            spinner: self.spinner.sanitized(),
            lifter: self.lifter.sanitized(),
            flipper: self.flipper.sanitized(),
        }
    }
}

/// `[weapon]` section: which controller to build.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeaponSection {
    #[serde(default)]
    pub kind: WeaponKind,
}

// ─── Safety ─────────────────────────────────────────────────────────

/// Arming gate settings shared by all weapon families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySettings {
    /// Delay after link establishment before output is allowed [ms].
    #[serde(default = "default_safety_delay")]
    pub safety_delay_ms: u32,
    /// Input that enables a spinner or fires a flipper.
    #[serde(default)]
    pub enable_button: EnableButton,
}

fn default_safety_delay() -> u32 {
    SAFETY_DELAY_DEFAULT_MS
}

impl Default for SafetySettings {
    fn default() -> Self {
        Self {
            safety_delay_ms: SAFETY_DELAY_DEFAULT_MS,
            enable_button: EnableButton::default(),
        }
    }
}

// ─── Spinner ────────────────────────────────────────────────────────

/// Spinner (ESC-driven motor) settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinnerConfig {
    #[serde(default)]
    pub mode: SpinnerMode,
    /// Full-speed pulse width [µs], clamped to `[1500, 2000]`.
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
    /// Neutral → max ramp duration [ms]; 0 = instant.
    #[serde(default = "default_spin_up")]
    pub spin_up_ms: u32,
    /// Max → neutral ramp duration [ms]; 0 = instant.
    #[serde(default = "default_spin_down")]
    pub spin_down_ms: u32,
    /// Speed-proportional haptic feedback.
    #[serde(default = "default_true")]
    pub rumble: bool,
    /// Blocking ESC arming wait inside `begin()` [ms].
    #[serde(default = "default_esc_arm_delay")]
    pub esc_arm_delay_ms: u32,
}

fn default_max_speed() -> f64 {
    ESC_MAX_US
}
fn default_spin_up() -> u32 {
    SPIN_UP_DEFAULT_MS
}
fn default_spin_down() -> u32 {
    SPIN_DOWN_DEFAULT_MS
}
fn default_true() -> bool {
    true
}
fn default_esc_arm_delay() -> u32 {
    ESC_ARM_DELAY_DEFAULT_MS
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            mode: SpinnerMode::default(),
            max_speed: ESC_MAX_US,
            spin_up_ms: SPIN_UP_DEFAULT_MS,
            spin_down_ms: SPIN_DOWN_DEFAULT_MS,
            rumble: true,
            esc_arm_delay_ms: ESC_ARM_DELAY_DEFAULT_MS,
        }
    }
}

impl SpinnerConfig {
    pub fn sanitized(&self) -> Self {
        Self {
            max_speed: clamp_f64("spinner.max_speed", self.max_speed, ESC_NEUTRAL_US, ESC_MAX_US),
            ..*self
        }
    }
}

// ─── Lifter ─────────────────────────────────────────────────────────

/// Lifter (position servo) settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifterConfig {
    #[serde(default)]
    pub mode: LifterMode,
    /// Rest angle [deg].
    #[serde(default = "default_min_angle")]
    pub min_angle: f64,
    /// Fully raised angle [deg].
    #[serde(default = "default_max_angle")]
    pub max_angle: f64,
    /// Slew rate [deg/s], clamped to `[10, 360]`.
    #[serde(default = "default_lifter_speed")]
    pub speed_deg_per_s: f64,
    /// Button-mode "raise" input.
    #[serde(default = "default_up_button")]
    pub up_button: ButtonSource,
    /// Button-mode "lower" input.
    #[serde(default = "default_down_button")]
    pub down_button: ButtonSource,
}

fn default_min_angle() -> f64 {
    ANGLE_MIN
}
fn default_max_angle() -> f64 {
    ANGLE_MAX
}
fn default_lifter_speed() -> f64 {
    LIFTER_SPEED_DEFAULT
}
fn default_up_button() -> ButtonSource {
    ButtonSource::R1
}
fn default_down_button() -> ButtonSource {
    ButtonSource::ThrottleTrigger
}

impl Default for LifterConfig {
    fn default() -> Self {
        Self {
            mode: LifterMode::default(),
            min_angle: ANGLE_MIN,
            max_angle: ANGLE_MAX,
            speed_deg_per_s: LIFTER_SPEED_DEFAULT,
            up_button: ButtonSource::R1,
            down_button: ButtonSource::ThrottleTrigger,
        }
    }
}

impl LifterConfig {
    /// Clamp angles to `[0, 180]` (swapping an inverted range) and the
    /// slew rate to its bounds.
    pub fn sanitized(&self) -> Self {
        let (min_angle, max_angle) = sanitize_range(self.min_angle, self.max_angle);
        Self {
            min_angle,
            max_angle,
            speed_deg_per_s: clamp_f64(
                "lifter.speed_deg_per_s",
                self.speed_deg_per_s,
                LIFTER_SPEED_MIN,
                LIFTER_SPEED_MAX,
            ),
            ..*self
        }
    }
}

/// Clamp both ends of an angle range and order them.
pub fn sanitize_range(min_angle: f64, max_angle: f64) -> (f64, f64) {
    let lo = clamp_f64("lifter.min_angle", min_angle, ANGLE_MIN, ANGLE_MAX);
    let hi = clamp_f64("lifter.max_angle", max_angle, ANGLE_MIN, ANGLE_MAX);
    if lo <= hi { (lo, hi) } else { (hi, lo) }
}

// ─── Flipper ────────────────────────────────────────────────────────

/// Flipper (solenoid) settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipperConfig {
    #[serde(default)]
    pub mode: FlipperMode,
    /// Solenoid pulse length [ms], clamped to `[50, 1000]`.
    #[serde(default = "default_fire_duration")]
    pub fire_duration_ms: u32,
    /// Minimum time between pulse starts [ms], clamped to `[200, 5000]`.
    #[serde(default = "default_cooldown")]
    pub cooldown_ms: u32,
}

fn default_fire_duration() -> u32 {
    FIRE_DURATION_DEFAULT_MS
}
fn default_cooldown() -> u32 {
    COOLDOWN_DEFAULT_MS
}

impl Default for FlipperConfig {
    fn default() -> Self {
        Self {
            mode: FlipperMode::default(),
            fire_duration_ms: FIRE_DURATION_DEFAULT_MS,
            cooldown_ms: COOLDOWN_DEFAULT_MS,
        }
    }
}

impl FlipperConfig {
    pub fn sanitized(&self) -> Self {
        Self {
            mode: self.mode,
            fire_duration_ms: clamp_ms(
                "flipper.fire_duration_ms",
                self.fire_duration_ms,
                FIRE_DURATION_MIN_MS,
                FIRE_DURATION_MAX_MS,
            ),
            cooldown_ms: clamp_ms(
                "flipper.cooldown_ms",
                self.cooldown_ms,
                COOLDOWN_MIN_MS,
                COOLDOWN_MAX_MS,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg: WeaponConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.weapon.kind, WeaponKind::None);
        assert_eq!(cfg.safety.safety_delay_ms, 3000);
        assert_eq!(cfg.spinner.mode, SpinnerMode::Variable);
        assert_eq!(cfg.spinner.spin_up_ms, 2000);
        assert_eq!(cfg.spinner.spin_down_ms, 3000);
        assert_eq!(cfg.lifter.up_button, ButtonSource::R1);
        assert_eq!(cfg.lifter.down_button, ButtonSource::ThrottleTrigger);
        assert_eq!(cfg.flipper.fire_duration_ms, 150);
        assert_eq!(cfg.flipper.cooldown_ms, 1000);
    }

    #[test]
    fn flipper_timings_are_clamped() {
        let cfg = FlipperConfig {
            mode: FlipperMode::Hold,
            fire_duration_ms: 5,
            cooldown_ms: 60_000,
        }
        .sanitized();
        assert_eq!(cfg.fire_duration_ms, FIRE_DURATION_MIN_MS);
        assert_eq!(cfg.cooldown_ms, COOLDOWN_MAX_MS);
        assert_eq!(cfg.mode, FlipperMode::Hold);
    }

    #[test]
    fn spinner_max_speed_is_clamped() {
        let low = SpinnerConfig {
            max_speed: 1200.0,
            ..Default::default()
        };
        assert_eq!(low.sanitized().max_speed, ESC_NEUTRAL_US);
        let high = SpinnerConfig {
            max_speed: 2500.0,
            ..Default::default()
        };
        assert_eq!(high.sanitized().max_speed, ESC_MAX_US);
    }

    #[test]
    fn lifter_range_is_clamped_and_ordered() {
        let cfg = LifterConfig {
            min_angle: 200.0,
            max_angle: -20.0,
            speed_deg_per_s: 1.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(cfg.min_angle, 0.0);
        assert_eq!(cfg.max_angle, 180.0);
        assert_eq!(cfg.speed_deg_per_s, LIFTER_SPEED_MIN);
    }

    #[test]
    fn nan_collapses_to_min() {
        assert_eq!(clamp_f64("x", f64::NAN, 1.0, 2.0), 1.0);
    }
}
