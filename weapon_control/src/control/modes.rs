//! Mode interpreters: operator input → target output.
//!
//! Pure functions, one family per weapon. They never touch the actuator
//! or the arming gate; the weapon variants apply their results.

use weapon_common::consts::{AXIS_DEAD_ZONE, AXIS_MAX, LIFTER_ACTIVE_OFFSET};
use weapon_common::weapon::mode::{FlipperMode, LifterMode, SpinnerMode};

/// Enable input resolved for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnableSignal {
    /// Button held this tick.
    pub pressed: bool,
    /// Button went from released to pressed this tick.
    pub rising: bool,
}

/// Target and activity resolved from input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeOutput {
    pub target: f64,
    pub active: bool,
}

/// Zero out stick readings whose magnitude is within the dead zone.
#[inline]
pub fn apply_dead_zone(raw: i16) -> i16 {
    let raw = raw.clamp(-AXIS_MAX, AXIS_MAX);
    if raw.abs() <= AXIS_DEAD_ZONE { 0 } else { raw }
}

/// Linear map of `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
#[inline]
pub fn map_range(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if in_max == in_min {
        return out_min;
    }
    out_min + (x - in_min) * (out_max - out_min) / (in_max - in_min)
}

// ─── Spinner ────────────────────────────────────────────────────────

/// Spinner target for one armed tick.
///
/// - Toggle: a rising edge flips `toggle_on`; target follows the flag.
/// - Hold: max speed while pressed, neutral otherwise.
/// - Variable: positive stick deflection beyond the dead zone maps
///   linearly onto `[neutral, max]`; zero or negative means neutral (no
///   reverse).
pub fn spinner_output(
    mode: SpinnerMode,
    signal: EnableSignal,
    stick_y: i16,
    toggle_on: &mut bool,
    neutral: f64,
    max: f64,
) -> ModeOutput {
    match mode {
        SpinnerMode::Toggle => {
            if signal.rising {
                *toggle_on = !*toggle_on;
            }
            ModeOutput {
                target: if *toggle_on { max } else { neutral },
                active: *toggle_on,
            }
        }
        SpinnerMode::Hold => ModeOutput {
            target: if signal.pressed { max } else { neutral },
            active: signal.pressed,
        },
        SpinnerMode::Variable => {
            let deflection = apply_dead_zone(stick_y);
            if deflection > 0 {
                let target = map_range(
                    f64::from(deflection),
                    f64::from(AXIS_DEAD_ZONE),
                    f64::from(AXIS_MAX),
                    neutral,
                    max,
                )
                .clamp(neutral, max);
                ModeOutput {
                    target,
                    active: true,
                }
            } else {
                ModeOutput {
                    target: neutral,
                    active: false,
                }
            }
        }
    }
}

// ─── Lifter ─────────────────────────────────────────────────────────

/// What the lifter should do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifterCommand {
    /// Keep the current target.
    Hold,
    /// Drive to max angle.
    Raise,
    /// Drive to min angle.
    Lower,
    /// Drive to an analog-commanded angle.
    Position { angle: f64, active: bool },
}

/// Lifter command for one armed tick.
///
/// Button mode: up wins over down; neither held keeps the position.
/// Analog mode: stick inside the dead zone keeps the last commanded
/// angle; outside it maps `-512..=512` onto `[min, max]` and counts as
/// active above `min + 10°`.
pub fn lifter_command(
    mode: LifterMode,
    up_pressed: bool,
    down_pressed: bool,
    stick_y: i16,
    min_angle: f64,
    max_angle: f64,
) -> LifterCommand {
    match mode {
        LifterMode::Button => {
            if up_pressed {
                LifterCommand::Raise
            } else if down_pressed {
                LifterCommand::Lower
            } else {
                LifterCommand::Hold
            }
        }
        LifterMode::Analog => {
            let stick = apply_dead_zone(stick_y);
            if stick == 0 {
                return LifterCommand::Hold;
            }
            let angle = map_range(
                f64::from(stick),
                -f64::from(AXIS_MAX),
                f64::from(AXIS_MAX),
                min_angle,
                max_angle,
            )
            .clamp(min_angle, max_angle);
            LifterCommand::Position {
                angle,
                active: angle > min_angle + LIFTER_ACTIVE_OFFSET,
            }
        }
    }
}

// ─── Flipper ────────────────────────────────────────────────────────

/// Whether the flipper input asks for a pulse this tick.
///
/// Hold mode asks on every held tick; the cooldown is what rate-limits
/// repeated strikes.
#[inline]
pub fn flipper_wants_fire(mode: FlipperMode, signal: EnableSignal) -> bool {
    match mode {
        FlipperMode::Tap => signal.rising,
        FlipperMode::Hold => signal.pressed,
    }
}
