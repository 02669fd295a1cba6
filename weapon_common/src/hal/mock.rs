//! Recording sinks for tests and the simulation runner.
//!
//! Histories live in fixed-capacity `heapless` rings so recording never
//! allocates inside the tick; once full the oldest entry is dropped.

use heapless::Deque;

use super::sink::{ActuatorSink, Delay, HapticPulse, HapticSink};
use crate::consts::MOCK_HISTORY_CAPACITY;

/// One write observed by [`RecordingActuator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorWrite {
    Level(f64),
    Discrete(bool),
}

fn push_ring<T, const N: usize>(ring: &mut Deque<T, N>, item: T) {
    if ring.is_full() {
        let _ = ring.pop_front();
    }
    let _ = ring.push_back(item);
}

/// Actuator sink that remembers what it was told.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    level: Option<f64>,
    energized: bool,
    level_writes: u32,
    discrete_writes: u32,
    energize_count: u32,
    history: Deque<ActuatorWrite, MOCK_HISTORY_CAPACITY>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last continuous level written, if any.
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    /// Current discrete output state.
    pub fn is_energized(&self) -> bool {
        self.energized
    }

    /// Number of `set_level` calls.
    pub fn level_writes(&self) -> u32 {
        self.level_writes
    }

    /// Number of `set_discrete` calls.
    pub fn discrete_writes(&self) -> u32 {
        self.discrete_writes
    }

    /// Number of off → on transitions of the discrete output.
    pub fn energize_count(&self) -> u32 {
        self.energize_count
    }

    /// Most recent writes, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ActuatorWrite> {
        self.history.iter()
    }

    /// Forget all recorded writes and counters.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl ActuatorSink for RecordingActuator {
    fn set_level(&mut self, value: f64) {
        self.level = Some(value);
        self.level_writes += 1;
        push_ring(&mut self.history, ActuatorWrite::Level(value));
    }

    fn set_discrete(&mut self, energized: bool) {
        if energized && !self.energized {
            self.energize_count += 1;
        }
        self.energized = energized;
        self.discrete_writes += 1;
        push_ring(&mut self.history, ActuatorWrite::Discrete(energized));
    }
}

/// Haptic sink that records every pulse.
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    total: u32,
    pulses: Deque<HapticPulse, MOCK_HISTORY_CAPACITY>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total pulses played since creation (including dropped history).
    pub fn count(&self) -> u32 {
        self.total
    }

    pub fn last(&self) -> Option<&HapticPulse> {
        self.pulses.back()
    }

    pub fn pulses(&self) -> impl Iterator<Item = &HapticPulse> {
        self.pulses.iter()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl HapticSink for RecordingHaptics {
    fn play(&mut self, pulse: HapticPulse) {
        self.total += 1;
        push_ring(&mut self.pulses, pulse);
    }
}

/// Delay that accumulates requested time instead of sleeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordingDelay {
    pub total_ms: u64,
    pub calls: u32,
}

impl Delay for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
        self.calls += 1;
    }
}
