//! System-wide constants for the weapon subsystem.
//!
//! Single source of truth for defaults and clamp bounds. Configuration
//! values outside a `[MIN, MAX]` pair are clamped, never rejected.

use static_assertions::const_assert;

// ─── Safety ─────────────────────────────────────────────────────────

/// Default arming safety delay after link establishment [ms].
pub const SAFETY_DELAY_DEFAULT_MS: u32 = 3000;

// ─── Input ──────────────────────────────────────────────────────────

/// Trigger axis value above which a trigger counts as pressed.
pub const TRIGGER_THRESHOLD: u16 = 10;

/// Full-scale trigger axis value.
pub const TRIGGER_MAX: u16 = 1023;

/// Analog stick magnitude range (symmetric).
pub const AXIS_MAX: i16 = 512;

/// Stick dead zone: magnitudes at or below this value read as zero.
pub const AXIS_DEAD_ZONE: i16 = 50;

// ─── Spinner (ESC pulse widths, µs) ─────────────────────────────────

/// ESC neutral (stopped) pulse width.
pub const ESC_NEUTRAL_US: f64 = 1500.0;

/// Highest ESC pulse width.
pub const ESC_MAX_US: f64 = 2000.0;

/// Default spin-up duration from neutral to max [ms].
pub const SPIN_UP_DEFAULT_MS: u32 = 2000;

/// Default spin-down duration from max to neutral [ms].
pub const SPIN_DOWN_DEFAULT_MS: u32 = 3000;

/// Default blocking wait for the ESC to arm during `begin` [ms].
pub const ESC_ARM_DELAY_DEFAULT_MS: u32 = 2000;

// ─── Haptics ────────────────────────────────────────────────────────

/// Minimum speed change [percentage points] before a new feedback pulse.
pub const RUMBLE_HYSTERESIS_PCT: f64 = 5.0;

/// Speeds at or below this percentage never rumble.
pub const RUMBLE_FLOOR_PCT: f64 = 10.0;

/// Duration of a speed feedback pulse [ms].
pub const RUMBLE_SPEED_PULSE_MS: u16 = 100;

/// Duration of the one-shot "armed" pulse [ms].
pub const RUMBLE_ARMED_PULSE_MS: u16 = 200;

/// Weak motor magnitude of the "armed" pulse.
pub const RUMBLE_ARMED_WEAK: u8 = 0x40;

/// Strong motor magnitude of the "armed" pulse.
pub const RUMBLE_ARMED_STRONG: u8 = 0x80;

// ─── Lifter (servo angle, degrees) ──────────────────────────────────

/// Lowest servo angle.
pub const ANGLE_MIN: f64 = 0.0;

/// Highest servo angle.
pub const ANGLE_MAX: f64 = 180.0;

/// Default lifter slew rate [deg/s].
pub const LIFTER_SPEED_DEFAULT: f64 = 90.0;

/// Lifter slew rate bounds [deg/s].
pub const LIFTER_SPEED_MIN: f64 = 10.0;
pub const LIFTER_SPEED_MAX: f64 = 360.0;

/// Angle above `min_angle` beyond which an analog lifter counts as active.
pub const LIFTER_ACTIVE_OFFSET: f64 = 10.0;

// ─── Flipper ────────────────────────────────────────────────────────

/// Default solenoid pulse length [ms].
pub const FIRE_DURATION_DEFAULT_MS: u32 = 150;
pub const FIRE_DURATION_MIN_MS: u32 = 50;
pub const FIRE_DURATION_MAX_MS: u32 = 1000;

/// Default minimum time between pulses [ms].
pub const COOLDOWN_DEFAULT_MS: u32 = 1000;
pub const COOLDOWN_MIN_MS: u32 = 200;
pub const COOLDOWN_MAX_MS: u32 = 5000;

// ─── Recording sinks ────────────────────────────────────────────────

/// Capacity of the fixed-size history rings in `hal::mock`.
pub const MOCK_HISTORY_CAPACITY: usize = 256;

const_assert!(FIRE_DURATION_MIN_MS <= FIRE_DURATION_DEFAULT_MS);
const_assert!(FIRE_DURATION_DEFAULT_MS <= FIRE_DURATION_MAX_MS);
const_assert!(COOLDOWN_MIN_MS <= COOLDOWN_DEFAULT_MS);
const_assert!(COOLDOWN_DEFAULT_MS <= COOLDOWN_MAX_MS);
const_assert!(TRIGGER_THRESHOLD < TRIGGER_MAX);
const_assert!(AXIS_DEAD_ZONE < AXIS_MAX);
