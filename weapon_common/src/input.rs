//! Per-tick gamepad input snapshot.
//!
//! The wireless link layer produces one [`InputSample`] per control tick.
//! The weapon core only reads it; nothing is retained across ticks.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::consts::{AXIS_MAX, TRIGGER_MAX, TRIGGER_THRESHOLD};

bitflags! {
    /// Digital button states.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u16 {
        /// Right shoulder.
        const R1 = 1 << 0;
        /// Left shoulder.
        const L1 = 1 << 1;
        /// Right trigger, digital contact.
        const R2 = 1 << 2;
        /// Left trigger, digital contact.
        const L2 = 1 << 3;
    }
}

/// One discrete input the controllers can be wired to.
///
/// Trigger sources read the analog trigger axis and count as pressed above
/// [`TRIGGER_THRESHOLD`]; the rest read a digital button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonSource {
    /// Right trigger axis over threshold.
    BrakeTrigger,
    /// Left trigger axis over threshold.
    ThrottleTrigger,
    R1,
    L1,
    R2,
    L2,
}

/// Snapshot of one input source for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSample {
    /// Digital buttons held this tick.
    pub buttons: Buttons,
    /// Right trigger axis, `0..=1023`.
    pub brake: u16,
    /// Left trigger axis, `0..=1023`.
    pub throttle: u16,
    /// Right stick X, `-512..=512`.
    pub axis_rx: i16,
    /// Right stick Y, `-512..=512` (positive = pushed up).
    pub axis_ry: i16,
}

impl InputSample {
    /// Nothing pressed, sticks centred.
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::empty(),
            brake: 0,
            throttle: 0,
            axis_rx: 0,
            axis_ry: 0,
        }
    }

    /// Builder: replace the button set.
    pub const fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Builder: set the right trigger axis (clamped to full scale).
    pub fn with_brake(mut self, value: u16) -> Self {
        self.brake = value.min(TRIGGER_MAX);
        self
    }

    /// Builder: set the left trigger axis (clamped to full scale).
    pub fn with_throttle(mut self, value: u16) -> Self {
        self.throttle = value.min(TRIGGER_MAX);
        self
    }

    /// Builder: set the right stick (each axis clamped to ±512).
    pub fn with_right_stick(mut self, x: i16, y: i16) -> Self {
        self.axis_rx = x.clamp(-AXIS_MAX, AXIS_MAX);
        self.axis_ry = y.clamp(-AXIS_MAX, AXIS_MAX);
        self
    }

    /// Whether the given source reads as pressed.
    #[inline]
    pub fn is_pressed(&self, source: ButtonSource) -> bool {
        match source {
            ButtonSource::BrakeTrigger => self.brake > TRIGGER_THRESHOLD,
            ButtonSource::ThrottleTrigger => self.throttle > TRIGGER_THRESHOLD,
            ButtonSource::R1 => self.buttons.contains(Buttons::R1),
            ButtonSource::L1 => self.buttons.contains(Buttons::L1),
            ButtonSource::R2 => self.buttons.contains(Buttons::R2),
            ButtonSource::L2 => self.buttons.contains(Buttons::L2),
        }
    }

    /// Right stick Y clamped into `-512..=512`.
    #[inline]
    pub fn stick_y(&self) -> i16 {
        self.axis_ry.clamp(-AXIS_MAX, AXIS_MAX)
    }
}
