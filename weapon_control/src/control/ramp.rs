//! Rate-limited ramp toward a target, driven by elapsed wall time.
//!
//! The step size is `rate × elapsed`, so the ramp covers the same distance
//! per second whether the loop ticks at 50 Hz or 1 kHz. The first tick
//! after construction or [`RampState::reset_timing`] only captures a
//! baseline timestamp and does not move.

use weapon_common::time::Millis;

/// Ramp position, target and timing baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampState {
    /// Current output value.
    pub current: f64,
    /// Value being approached.
    pub target: f64,
    /// Timestamp of the previous tick (`None` until the baseline tick).
    last_tick: Option<Millis>,
}

impl RampState {
    /// Ramp resting at `value` with no timing baseline.
    pub const fn at(value: f64) -> Self {
        Self {
            current: value,
            target: value,
            last_tick: None,
        }
    }

    /// Jump to `value` immediately (current and target).
    pub fn snap(&mut self, value: f64) {
        self.current = value;
        self.target = value;
    }

    /// Forget the timing baseline; the next step only records `now`.
    pub fn reset_timing(&mut self) {
        self.last_tick = None;
    }

    #[inline]
    pub const fn last_tick(&self) -> Option<Millis> {
        self.last_tick
    }

    /// Whether the ramp has reached its target.
    #[inline]
    pub fn converged(&self) -> bool {
        self.current == self.target
    }
}

/// Ramp rates [output units per ms].
///
/// `f64::INFINITY` makes that direction an instantaneous step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampRates {
    /// Rate used while `target > current`.
    pub rise_per_ms: f64,
    /// Rate used otherwise.
    pub fall_per_ms: f64,
}

impl RampRates {
    /// Same rate in both directions.
    pub const fn symmetric(per_ms: f64) -> Self {
        Self {
            rise_per_ms: per_ms,
            fall_per_ms: per_ms,
        }
    }

    /// Rates that traverse `span` in `rise_ms` going up and `fall_ms` going
    /// down. A zero duration yields an instantaneous step.
    pub fn from_durations(span: f64, rise_ms: u32, fall_ms: u32) -> Self {
        Self {
            rise_per_ms: rate_over(span, rise_ms),
            fall_per_ms: rate_over(span, fall_ms),
        }
    }

    /// Symmetric rate from a per-second figure (e.g. degrees per second).
    pub fn per_second(per_s: f64) -> Self {
        Self::symmetric(per_s / 1000.0)
    }
}

fn rate_over(span: f64, duration_ms: u32) -> f64 {
    if duration_ms == 0 {
        f64::INFINITY
    } else {
        span.abs() / f64::from(duration_ms)
    }
}

/// Advance the ramp to `now` and return the new current value.
///
/// # Arguments
/// - `state`: Ramp position, target and timing baseline.
/// - `rates`: Rise/fall rates.
/// - `now`: Current timestamp (wrapping millisecond clock).
///
/// # Behaviour
/// 1. No baseline: record `now`, return unchanged.
/// 2. `elapsed = now − last_tick` (wrapping); zero elapsed never moves.
/// 3. Move toward `target` by at most `rate × elapsed`, never overshooting.
#[inline]
pub fn ramp_step(state: &mut RampState, rates: &RampRates, now: Millis) -> f64 {
    let Some(last) = state.last_tick else {
        state.last_tick = Some(now);
        return state.current;
    };

    let elapsed = now.wrapping_since(last);
    state.last_tick = Some(now);

    if elapsed == 0 || state.current == state.target {
        return state.current;
    }

    let rate = if state.target > state.current {
        rates.rise_per_ms
    } else {
        rates.fall_per_ms
    };
    let max_change = rate * f64::from(elapsed);

    state.current = if state.current < state.target {
        (state.current + max_change).min(state.target)
    } else {
        (state.current - max_change).max(state.target)
    };
    state.current
}
