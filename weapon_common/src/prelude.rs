//! Prelude module for common re-exports.
//!
//! ```rust
//! use weapon_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};
pub use crate::weapon::config::{
    FlipperConfig, LifterConfig, SafetySettings, SpinnerConfig, WeaponConfig,
};

// ─── Modes ──────────────────────────────────────────────────────────
pub use crate::weapon::mode::{EnableButton, FlipperMode, LifterMode, SpinnerMode, WeaponKind};

// ─── Input / Output ─────────────────────────────────────────────────
pub use crate::hal::sink::{ActuatorSink, Delay, HapticPulse, HapticSink, NoDelay, NoHaptics};
pub use crate::input::{ButtonSource, Buttons, InputSample};
pub use crate::time::Millis;
