//! Arming safety gate and shared per-weapon lifecycle state.
//!
//! Every weapon variant embeds one [`WeaponState`]. The gate answers a
//! single question each tick: may this weapon produce non-neutral output?
//!
//! `is_armed(now)` is recomputed on every call from the arming flag and
//! the time since link establishment; it is never cached, so the safety
//! delay cannot be skipped by a stale flag.
//!
//! Invariant: `active` implies `armed`. `activate` refuses while the
//! arming flag is clear and `disarm` clears both.

use tracing::{info, warn};

use weapon_common::consts::SAFETY_DELAY_DEFAULT_MS;
use weapon_common::input::InputSample;
use weapon_common::time::Millis;
use weapon_common::weapon::config::SafetySettings;
use weapon_common::weapon::mode::{EnableButton, WeaponKind};

/// Lifecycle and arming state shared by all weapon variants.
#[derive(Debug, Clone)]
pub struct WeaponState {
    kind: WeaponKind,
    armed: bool,
    active: bool,
    link_established_at: Option<Millis>,
    safety_delay_ms: u32,
    activated_at: Option<Millis>,
    enable_button: EnableButton,
    verbose: bool,
}

impl WeaponState {
    /// Fresh, disarmed state with default safety settings.
    pub const fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            armed: false,
            active: false,
            link_established_at: None,
            safety_delay_ms: SAFETY_DELAY_DEFAULT_MS,
            activated_at: None,
            enable_button: EnableButton::BrakeTrigger,
            verbose: true,
        }
    }

    /// Fresh, disarmed state from configured safety settings.
    pub fn with_settings(kind: WeaponKind, settings: &SafetySettings, verbose: bool) -> Self {
        Self {
            safety_delay_ms: settings.safety_delay_ms,
            enable_button: settings.enable_button,
            verbose,
            ..Self::new(kind)
        }
    }

    #[inline]
    pub const fn kind(&self) -> WeaponKind {
        self.kind
    }

    // ─── Gate ───────────────────────────────────────────────────────

    /// Record `now` as the moment the input link was established.
    pub fn begin_link(&mut self, now: Millis) {
        self.link_established_at = Some(now);
        self.note("Safety delay started");
    }

    #[inline]
    pub const fn link_established_at(&self) -> Option<Millis> {
        self.link_established_at
    }

    /// Whether the safety delay has run out since link establishment.
    ///
    /// Always false while no link has been recorded.
    #[inline]
    pub fn safety_delay_elapsed(&self, now: Millis) -> bool {
        match self.link_established_at {
            Some(at) => now.wrapping_since(at) >= self.safety_delay_ms,
            None => false,
        }
    }

    /// Whether the weapon may produce non-neutral output at `now`.
    #[inline]
    pub fn is_armed(&self, now: Millis) -> bool {
        self.armed && self.safety_delay_elapsed(now)
    }

    /// Raw arming flag, independent of the safety delay.
    #[inline]
    pub const fn armed_flag(&self) -> bool {
        self.armed
    }

    /// Set the arming flag. Output still waits for the safety delay.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Clear the arming and active flags. Idempotent.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.active = false;
    }

    /// Base part of `begin()`: start from a disarmed, inactive state.
    pub fn reset(&mut self) {
        self.disarm();
        self.note("Weapon initialized");
    }

    /// Base part of `emergency_stop()`.
    pub fn emergency_stop(&mut self) {
        self.disarm();
        warn!(weapon = self.kind.label(), "EMERGENCY STOP");
    }

    // ─── Activity ───────────────────────────────────────────────────

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Mark active, stamping the activation time on the transition.
    ///
    /// Returns `true` if the weapon was inactive before. Refused (returns
    /// `false`, stays inactive) while the arming flag is clear.
    pub fn activate(&mut self, now: Millis) -> bool {
        if !self.armed || self.active {
            return false;
        }
        self.active = true;
        self.activated_at = Some(now);
        true
    }

    /// Stamp a new activation time even if already active (flipper re-fire).
    pub fn restart_activation(&mut self, now: Millis) {
        if self.armed {
            self.active = true;
            self.activated_at = Some(now);
        }
    }

    /// Mark inactive. Returns `true` if the weapon was active before.
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }

    /// Time since activation [ms], or 0 while inactive.
    pub fn active_time(&self, now: Millis) -> u32 {
        match (self.active, self.activated_at) {
            (true, Some(at)) => now.wrapping_since(at),
            _ => 0,
        }
    }

    // ─── Configuration ──────────────────────────────────────────────

    pub fn set_safety_delay(&mut self, delay_ms: u32) {
        self.safety_delay_ms = delay_ms;
    }

    #[inline]
    pub const fn safety_delay_ms(&self) -> u32 {
        self.safety_delay_ms
    }

    pub fn set_enable_button(&mut self, button: EnableButton) {
        self.enable_button = button;
    }

    #[inline]
    pub const fn enable_button(&self) -> EnableButton {
        self.enable_button
    }

    /// Whether the configured enable input is pressed in `input`.
    #[inline]
    pub fn enable_pressed(&self, input: &InputSample) -> bool {
        input.is_pressed(self.enable_button.source())
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    #[inline]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Narrate a weapon event when this instance is verbose.
    pub fn note(&self, message: &str) {
        if self.verbose {
            info!(weapon = self.kind.label(), "{message}");
        }
    }
}
