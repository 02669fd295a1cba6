//! Weapon kinds and control mode selectors.
//!
//! Integer selectors coming from a settings menu or a legacy config are
//! clamped into the valid enumeration by `from_index`, never rejected.
//! Config files may spell a selector either by name (`mode = "hold"`) or
//! by index (`mode = 1`); indices go through the same clamp.

use core::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::input::ButtonSource;

/// Accepts a selector name or an integer index, clamping the index.
struct SelectorVisitor<T> {
    /// Variant names in index order.
    names: &'static [&'static str],
    from_index: fn(i32) -> T,
}

impl<'de, T> Visitor<'de> for SelectorVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "one of {:?} or an integer index", self.names)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        self.names
            .iter()
            .position(|name| *name == v)
            .map(|i| (self.from_index)(i32::try_from(i).unwrap_or(i32::MAX)))
            .ok_or_else(|| E::unknown_variant(v, self.names))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        let index = i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX });
        Ok((self.from_index)(index))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        Ok((self.from_index)(i32::try_from(v).unwrap_or(i32::MAX)))
    }
}

macro_rules! index_selector {
    ($ty:ty, [$($name:literal),+ $(,)?]) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(SelectorVisitor {
                    names: &[$($name),+],
                    from_index: <$ty>::from_index,
                })
            }
        }
    };
}

/// Installed weapon family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    /// No weapon installed.
    #[default]
    None,
    /// Drum or vertical disc spinner.
    VerticalSpinner,
    /// Horizontal bar or disc spinner.
    HorizontalSpinner,
    /// Servo-driven lifter arm.
    Lifter,
    /// Pneumatic solenoid flipper.
    Flipper,
}

impl WeaponKind {
    /// Short label used in log fields.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::VerticalSpinner => "vertical_spinner",
            Self::HorizontalSpinner => "horizontal_spinner",
            Self::Lifter => "lifter",
            Self::Flipper => "flipper",
        }
    }

    /// Whether this kind is driven by a spinner controller.
    pub const fn is_spinner(self) -> bool {
        matches!(self, Self::VerticalSpinner | Self::HorizontalSpinner)
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which input enables a spinner or fires a flipper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnableButton {
    /// Right trigger axis over threshold (index 0).
    #[default]
    BrakeTrigger,
    /// Right shoulder (index 1).
    R1,
    /// Right trigger digital contact (index 2).
    R2,
}

impl EnableButton {
    /// Selector from an integer index, clamped to `0..=2`.
    pub fn from_index(index: i32) -> Self {
        match index.clamp(0, 2) {
            0 => Self::BrakeTrigger,
            1 => Self::R1,
            _ => Self::R2,
        }
    }

    /// Input source this selector reads.
    pub const fn source(self) -> ButtonSource {
        match self {
            Self::BrakeTrigger => ButtonSource::BrakeTrigger,
            Self::R1 => ButtonSource::R1,
            Self::R2 => ButtonSource::R2,
        }
    }
}

index_selector!(EnableButton, ["brake_trigger", "r1", "r2"]);

/// Spinner control interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpinnerMode {
    /// Tap the enable button to start, tap again to stop.
    Toggle,
    /// Spin while the enable button is held.
    Hold,
    /// Right stick Y sets the speed.
    #[default]
    Variable,
}

impl SpinnerMode {
    /// Mode from an integer index, clamped to `0..=2`.
    pub fn from_index(index: i32) -> Self {
        match index.clamp(0, 2) {
            0 => Self::Toggle,
            1 => Self::Hold,
            _ => Self::Variable,
        }
    }
}

index_selector!(SpinnerMode, ["toggle", "hold", "variable"]);

/// Lifter control interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LifterMode {
    /// Separate up and down buttons.
    #[default]
    Button,
    /// Right stick Y sets the angle.
    Analog,
}

impl LifterMode {
    /// Mode from an integer index, clamped to `0..=1`.
    pub fn from_index(index: i32) -> Self {
        if index <= 0 { Self::Button } else { Self::Analog }
    }
}

index_selector!(LifterMode, ["button", "analog"]);

/// Flipper trigger interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlipperMode {
    /// Fire once per press.
    #[default]
    Tap,
    /// Fire repeatedly while held, rate-limited by the cooldown.
    Hold,
}

impl FlipperMode {
    /// Mode from an integer index, clamped to `0..=1`.
    pub fn from_index(index: i32) -> Self {
        if index <= 0 { Self::Tap } else { Self::Hold }
    }
}

index_selector!(FlipperMode, ["tap", "hold"]);
