//! Output sink traits.
//!
//! The weapon core never talks to a PWM or GPIO library directly. Each
//! tick it emits at most one value to an [`ActuatorSink`], optionally a
//! pulse to a [`HapticSink`], and only `begin()` may block through a
//! [`Delay`].
//!
//! # Timing Contracts
//!
//! | Operation | Caller | RT Constraint |
//! |-----------|--------|---------------|
//! | `set_level()` | `update()` / `emergency_stop()` | **HARD** (no blocking) |
//! | `set_discrete()` | `update()` / `emergency_stop()` | **HARD** (no blocking) |
//! | `play()` | `update()` | **HARD** (fire-and-forget) |
//! | `delay_ms()` | `begin()` only | None (pre-loop) |

/// Continuous or discrete actuator output.
pub trait ActuatorSink {
    /// Command a continuous level: ESC pulse width in µs for speed
    /// controllers, angle in degrees for position servos.
    fn set_level(&mut self, value: f64);

    /// Energize (`true`) or de-energize (`false`) a discrete output.
    fn set_discrete(&mut self, energized: bool);
}

/// One dual-motor rumble request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HapticPulse {
    /// Delay before the pulse starts [ms].
    pub start_delay_ms: u16,
    /// Pulse duration [ms].
    pub duration_ms: u16,
    /// Weak (high-frequency) motor magnitude.
    pub weak: u8,
    /// Strong (low-frequency) motor magnitude.
    pub strong: u8,
}

/// Fire-and-forget haptic feedback channel of the input device.
pub trait HapticSink {
    fn play(&mut self, pulse: HapticPulse);
}

/// Blocking wait, allowed only during initialization.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Haptic sink for input devices without rumble motors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl HapticSink for NoHaptics {
    #[inline]
    fn play(&mut self, _pulse: HapticPulse) {}
}

/// Delay that returns immediately (virtual-time simulation).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    #[inline]
    fn delay_ms(&mut self, _ms: u32) {}
}

/// Delay backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
