//! Millisecond timestamps from a bounded, wrapping clock.
//!
//! The host loop samples a free-running `u32` millisecond counter that
//! wraps after ~49.7 days. Elapsed time is always computed with wrapping
//! subtraction, never by comparing absolute values, so intervals stay
//! correct across the wrap.

use core::fmt;

/// A sample of the monotonic millisecond clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Millis(pub u32);

impl Millis {
    /// Milliseconds elapsed since `earlier`, correct across one wrap.
    #[inline]
    pub const fn wrapping_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Timestamp `ms` after this one (wrapping).
    #[inline]
    pub const fn wrapping_add(self, ms: u32) -> Millis {
        Millis(self.0.wrapping_add(ms))
    }
}

impl From<u32> for Millis {
    fn from(ms: u32) -> Self {
        Self(ms)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
