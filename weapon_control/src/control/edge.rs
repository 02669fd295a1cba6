//! Rising-edge detection for toggle and tap inputs.

/// Remembers the previous level of one button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self { previous: false }
    }

    /// Feed this tick's level; `true` only on a released → pressed change.
    #[inline]
    pub fn rising(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.previous;
        self.previous = pressed;
        edge
    }

    pub fn reset(&mut self) {
        self.previous = false;
    }
}
