//! Deterministic simulation cycle: script → tick → record.
//!
//! Replays a scripted input timeline against one [`WeaponController`] on a
//! virtual millisecond clock. Actuator and haptic output go to the
//! recording sinks, so a run is fully reproducible and needs no hardware.
//!
//! ## Script Format (JSON)
//!
//! ```json
//! [
//!   { "at_ms": 0 },
//!   { "at_ms": 3500, "r1": true },
//!   { "at_ms": 6000, "stick_y": 400 },
//!   { "at_ms": 9000, "emergency_stop": true }
//! ]
//! ```
//!
//! Each frame holds from `at_ms` until the next frame. One-shot actions
//! (`emergency_stop`, `disarm`, `arm`) apply once, on the first tick at or
//! after the frame's timestamp.

use std::path::Path;
use std::time::Instant;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, trace};

use weapon_common::hal::mock::{RecordingActuator, RecordingHaptics};
use weapon_common::hal::sink::Delay;
use weapon_common::input::{Buttons, InputSample};
use weapon_common::time::Millis;

use crate::weapon::Weapon;
use crate::weapon::controller::WeaponController;

// ─── Script ─────────────────────────────────────────────────────────

/// Input script loading error.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("frame {index} at {at_ms}ms is earlier than the frame before it")]
    Unordered { index: usize, at_ms: u32 },
}

/// One timeline entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptFrame {
    pub at_ms: u32,
    pub r1: bool,
    pub l1: bool,
    pub r2: bool,
    pub l2: bool,
    /// Right trigger axis, `0..=1023`.
    pub brake: u16,
    /// Left trigger axis, `0..=1023`.
    pub throttle: u16,
    pub stick_x: i16,
    pub stick_y: i16,
    pub emergency_stop: bool,
    pub disarm: bool,
    pub arm: bool,
}

impl ScriptFrame {
    /// Input sample held for the duration of this frame.
    pub fn sample(&self) -> InputSample {
        let mut buttons = Buttons::empty();
        buttons.set(Buttons::R1, self.r1);
        buttons.set(Buttons::L1, self.l1);
        buttons.set(Buttons::R2, self.r2);
        buttons.set(Buttons::L2, self.l2);
        InputSample::neutral()
            .with_buttons(buttons)
            .with_brake(self.brake)
            .with_throttle(self.throttle)
            .with_right_stick(self.stick_x, self.stick_y)
    }
}

/// Ordered input timeline.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    frames: Vec<ScriptFrame>,
}

impl InputScript {
    /// Build from frames, rejecting timestamps that go backwards.
    pub fn new(frames: Vec<ScriptFrame>) -> Result<Self, ScriptError> {
        for (index, pair) in frames.windows(2).enumerate() {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(ScriptError::Unordered {
                    index: index + 1,
                    at_ms: pair[1].at_ms,
                });
            }
        }
        Ok(Self { frames })
    }

    pub fn from_json(content: &str) -> Result<Self, ScriptError> {
        let frames: Vec<ScriptFrame> = serde_json::from_str(content)?;
        Self::new(frames)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    #[inline]
    pub fn frames(&self) -> &[ScriptFrame] {
        &self.frames
    }

    /// Index of the frame in effect at `t`, if any has started.
    pub fn frame_index_at(&self, t: u32) -> Option<usize> {
        self.frames.partition_point(|f| f.at_ms <= t).checked_sub(1)
    }
}

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-tick statistics.
#[derive(Debug, Clone)]
pub struct CycleStats {
    /// Total ticks executed.
    pub cycle_count: u64,
    /// Minimum tick compute time [ns].
    pub min_cycle_ns: u64,
    /// Maximum tick compute time [ns].
    pub max_cycle_ns: u64,
    /// Running sum for average computation.
    pub sum_cycle_ns: u64,
    /// Virtual time of the first armed tick [ms].
    pub first_armed_at_ms: Option<u32>,
    /// Highest continuous level written.
    pub peak_level: Option<f64>,
    /// Emergency stops applied from the script.
    pub emergency_stops: u32,
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            min_cycle_ns: u64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            first_armed_at_ms: None,
            peak_level: None,
            emergency_stops: 0,
        }
    }

    /// Record one tick's compute time.
    #[inline]
    pub fn record(&mut self, duration_ns: u64) {
        self.cycle_count += 1;
        self.min_cycle_ns = self.min_cycle_ns.min(duration_ns);
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns = self.sum_cycle_ns.saturating_add(duration_ns);
    }

    /// Average tick compute time [ns] (0 if no ticks).
    #[inline]
    pub fn avg_cycle_ns(&self) -> u64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.sum_cycle_ns / self.cycle_count
        }
    }

    fn observe_level(&mut self, level: Option<f64>) {
        if let Some(level) = level {
            self.peak_level = Some(self.peak_level.map_or(level, |p| p.max(level)));
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Runner ─────────────────────────────────────────────────────────

/// Virtual-time tick loop around one controller.
pub struct SimRunner {
    controller: WeaponController,
    actuator: RecordingActuator,
    haptics: RecordingHaptics,
    tick_ms: u32,
    link_at_ms: u32,
    stats: CycleStats,
}

impl SimRunner {
    /// `tick_ms` of 0 is treated as 1.
    pub fn new(controller: WeaponController, tick_ms: u32, link_at_ms: u32) -> Self {
        Self {
            controller,
            actuator: RecordingActuator::new(),
            haptics: RecordingHaptics::new(),
            tick_ms: tick_ms.max(1),
            link_at_ms,
            stats: CycleStats::new(),
        }
    }

    #[inline]
    pub fn controller(&self) -> &WeaponController {
        &self.controller
    }

    #[inline]
    pub fn actuator(&self) -> &RecordingActuator {
        &self.actuator
    }

    #[inline]
    pub fn haptics(&self) -> &RecordingHaptics {
        &self.haptics
    }

    #[inline]
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Initialize the controller. `delay` absorbs the ESC arming wait.
    pub fn begin(&mut self, delay: &mut dyn Delay) {
        self.controller.begin(&mut self.actuator, delay);
    }

    /// Run ticks `0, tick, 2·tick, …` up to and including `duration_ms`.
    ///
    /// `pacer` is called with the tick period between ticks; pass a real
    /// sleep to watch the run live or a no-op for a fast replay.
    pub fn run(&mut self, script: &InputScript, duration_ms: u32, pacer: &mut dyn Delay) {
        let mut linked = false;
        let mut applied: Option<usize> = None;
        let mut t: u32 = 0;

        info!(
            weapon = self.controller.kind().label(),
            tick_ms = self.tick_ms,
            duration_ms,
            "simulation started"
        );

        loop {
            let now = Millis(t);

            if !linked && t >= self.link_at_ms {
                self.controller.begin_link(now);
                linked = true;
            }

            let index = script.frame_index_at(t);
            let frame = index.map(|i| script.frames()[i]).unwrap_or_default();
            if index.is_some() && index != applied {
                self.apply_actions(&frame, t);
                applied = index;
            }

            let started = Instant::now();
            self.controller
                .update(now, &frame.sample(), &mut self.actuator, &mut self.haptics);
            let elapsed_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
            self.stats.record(elapsed_ns);

            if self.stats.first_armed_at_ms.is_none() && self.controller.is_armed(now) {
                self.stats.first_armed_at_ms = Some(t);
                debug!(at_ms = t, "weapon armed");
            }
            self.stats.observe_level(self.actuator.level());
            trace!(
                at_ms = t,
                level = ?self.actuator.level(),
                energized = self.actuator.is_energized(),
                active = self.controller.is_active(),
                "tick"
            );

            let Some(next) = t.checked_add(self.tick_ms) else {
                break;
            };
            if next > duration_ms {
                break;
            }
            pacer.delay_ms(self.tick_ms);
            t = next;
        }

        info!(
            ticks = self.stats.cycle_count,
            avg_ns = self.stats.avg_cycle_ns(),
            max_ns = self.stats.max_cycle_ns,
            haptic_pulses = self.haptics.count(),
            energize_count = self.actuator.energize_count(),
            "simulation finished"
        );
    }

    fn apply_actions(&mut self, frame: &ScriptFrame, t: u32) {
        if frame.emergency_stop {
            self.controller.emergency_stop(&mut self.actuator);
            self.stats.emergency_stops += 1;
        }
        if frame.disarm {
            debug!(at_ms = t, "script: disarm");
            self.controller.disarm();
        }
        if frame.arm {
            debug!(at_ms = t, "script: arm");
            self.controller.arm();
        }
    }
}
