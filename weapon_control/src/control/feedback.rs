//! Spinner speed → haptic feedback encoder.
//!
//! Maps the ramped ESC command onto a rumble intensity. A 5-point
//! hysteresis band and a 10 % floor keep small ramp steps and
//! near-neutral speeds from flooding the gamepad with pulses.

use weapon_common::consts::{
    RUMBLE_ARMED_PULSE_MS, RUMBLE_ARMED_STRONG, RUMBLE_ARMED_WEAK, RUMBLE_FLOOR_PCT,
    RUMBLE_HYSTERESIS_PCT, RUMBLE_SPEED_PULSE_MS,
};
use weapon_common::hal::sink::HapticPulse;

/// One-shot pulse sent when the weapon first becomes armed.
pub const ARMED_PULSE: HapticPulse = HapticPulse {
    start_delay_ms: 0,
    duration_ms: RUMBLE_ARMED_PULSE_MS,
    weak: RUMBLE_ARMED_WEAK,
    strong: RUMBLE_ARMED_STRONG,
};

/// Speed as a percentage of the `[neutral, max]` span, clamped to `0..=100`.
#[inline]
pub fn speed_percent(speed: f64, neutral: f64, max: f64) -> f64 {
    let span = max - neutral;
    if span <= 0.0 {
        return 0.0;
    }
    (100.0 * (speed - neutral) / span).clamp(0.0, 100.0)
}

/// Rumble pulse for a speed percentage.
#[inline]
pub fn speed_pulse(percent: f64) -> HapticPulse {
    let intensity = (percent.clamp(0.0, 100.0) * 255.0 / 100.0).round() as u8;
    HapticPulse {
        start_delay_ms: 0,
        duration_ms: RUMBLE_SPEED_PULSE_MS,
        weak: intensity / 2,
        strong: intensity,
    }
}

/// Feedback encoder state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackState {
    /// Speed at the last hysteresis crossing.
    last_emitted_speed: f64,
    /// Whether the current arming event has been announced.
    has_announced_armed: bool,
}

impl FeedbackState {
    pub const fn new(neutral: f64) -> Self {
        Self {
            last_emitted_speed: neutral,
            has_announced_armed: false,
        }
    }

    #[inline]
    pub const fn has_announced_armed(&self) -> bool {
        self.has_announced_armed
    }

    #[inline]
    pub const fn last_emitted_speed(&self) -> f64 {
        self.last_emitted_speed
    }

    /// Armed announcement, at most once per arming event.
    pub fn announce_armed(&mut self) -> Option<HapticPulse> {
        if self.has_announced_armed {
            return None;
        }
        self.has_announced_armed = true;
        Some(ARMED_PULSE)
    }

    /// Re-enable the announcement after a full disarm.
    pub fn clear_announcement(&mut self) {
        self.has_announced_armed = false;
    }

    /// Forget the speed baseline (e.g. after an instantaneous stop).
    pub fn reset_speed(&mut self, neutral: f64) {
        self.last_emitted_speed = neutral;
    }

    /// Encode the current speed.
    ///
    /// When the speed moved more than the hysteresis band since the last
    /// crossing, the baseline advances; a pulse is returned only if the new
    /// speed is also above the floor.
    pub fn encode(&mut self, speed: f64, neutral: f64, max: f64) -> Option<HapticPulse> {
        let percent = speed_percent(speed, neutral, max);
        let last_percent = speed_percent(self.last_emitted_speed, neutral, max);

        if (percent - last_percent).abs() <= RUMBLE_HYSTERESIS_PCT {
            return None;
        }
        self.last_emitted_speed = speed;

        (percent > RUMBLE_FLOOR_PCT).then(|| speed_pulse(percent))
    }
}
