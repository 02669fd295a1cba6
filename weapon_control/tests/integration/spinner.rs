//! Integration test: spinner ramp, modes and haptic feedback.

use weapon_common::input::{Buttons, InputSample};
use weapon_common::time::Millis;
use weapon_control::weapon::Weapon;

use super::Bench;

fn spinner(mode: &str) -> Bench {
    let mut b = Bench::from_toml(&format!(
        "[weapon]\nkind = \"vertical_spinner\"\n[safety]\nsafety_delay_ms = 0\nenable_button = \"r1\"\n[spinner]\nmode = \"{mode}\"\nspin_up_ms = 2000\nspin_down_ms = 3000"
    ));
    b.weapon.begin_link(Millis(0));
    b
}

fn r1() -> InputSample {
    InputSample::neutral().with_buttons(Buttons::R1)
}

fn speed(b: &Bench) -> f64 {
    b.weapon.as_spinner().map(|s| s.current_speed()).unwrap_or(f64::NAN)
}

#[test]
fn rise_rate_is_respected_at_any_tick_rate() {
    for step in [1, 7, 10, 20, 50] {
        let mut b = spinner("hold");
        b.tick(0, &r1());
        let mut t = step;
        let mut peak: f64 = 1500.0;
        while t <= 1000 {
            b.tick(t, &r1());
            peak = peak.max(speed(&b));
            t += step;
        }
        let expected = 1500.0 + 0.25 * f64::from(t - step);
        assert!((speed(&b) - expected).abs() < 1e-6, "step {step}");
        assert!(peak <= 1750.0 + 1e-9, "step {step}");
    }
}

#[test]
fn ramp_converges_and_stays() {
    let mut b = spinner("hold");
    b.hold(0, 5000, 10, &r1());
    assert_eq!(speed(&b), 2000.0);
    let writes = b.actuator.level_writes();
    b.hold(5010, 6000, 10, &r1());
    assert_eq!(speed(&b), 2000.0);
    assert_eq!(b.actuator.level(), Some(2000.0));
    assert!(b.actuator.level_writes() > writes);
}

#[test]
fn spin_down_uses_fall_rate() {
    let mut b = spinner("hold");
    b.hold(0, 2000, 10, &r1());
    assert_eq!(speed(&b), 2000.0);
    b.hold(2010, 3500, 10, &InputSample::neutral());
    // 1500 ms into a 3000 ms spin-down.
    let expected = 2000.0 - (500.0 / 3000.0) * 1500.0;
    assert!((speed(&b) - expected).abs() < 1e-6);
}

#[test]
fn variable_mode_dead_zone_is_neutral() {
    let mut b = spinner("variable");
    for (i, y) in (-50..=50).enumerate() {
        let input = InputSample::neutral().with_right_stick(0, y);
        b.tick(i as u32 * 10, &input);
        assert_eq!(b.weapon.as_spinner().map(|s| s.target_speed()), Some(1500.0));
        assert!(!b.weapon.is_active());
    }
}

#[test]
fn variable_mode_never_reverses() {
    let mut b = spinner("variable");
    b.hold(0, 3000, 10, &InputSample::neutral().with_right_stick(0, -512));
    assert_eq!(speed(&b), 1500.0);
}

#[test]
fn toggle_held_two_ticks_toggles_once() {
    let mut b = spinner("toggle");
    b.tick(0, &r1());
    b.tick(10, &r1());
    let s = b.weapon.as_spinner().map(|s| (s.toggle_on(), s.target_speed()));
    assert_eq!(s, Some((true, 2000.0)));
}

#[test]
fn toggle_cleared_while_disarmed() {
    let mut b = spinner("toggle");
    b.tick(0, &r1());
    b.weapon.disarm();
    b.tick(10, &InputSample::neutral());
    b.weapon.arm();
    b.tick(20, &InputSample::neutral());
    assert_eq!(b.weapon.as_spinner().map(|s| s.toggle_on()), Some(false));
    assert_eq!(b.weapon.as_spinner().map(|s| s.target_speed()), Some(1500.0));
}

#[test]
fn haptic_pulses_respect_hysteresis_and_floor() {
    let mut b = spinner("hold");
    b.hold(0, 2000, 10, &r1());

    // One armed announcement plus one pulse per >5-point crossing above 10 %.
    let pulses: Vec<_> = b.haptics.pulses().copied().collect();
    assert_eq!(pulses[0].duration_ms, 200);
    assert_eq!((pulses[0].weak, pulses[0].strong), (0x40, 0x80));

    let speed_pulses = &pulses[1..];
    assert!(!speed_pulses.is_empty());
    assert!(speed_pulses.len() <= 20);
    for w in speed_pulses.windows(2) {
        assert!(w[1].strong > w[0].strong);
    }
    // Below 10 % the first crossing (≈5.5 %) is suppressed.
    assert!(speed_pulses[0].strong > 25);
    let last = speed_pulses[speed_pulses.len() - 1];
    assert!(last.strong >= 242);
    assert_eq!(last.weak, last.strong / 2);
}

#[test]
fn small_speed_changes_do_not_rumble_twice() {
    let mut b = spinner("variable");
    let stick = |y| InputSample::neutral().with_right_stick(0, y);
    b.hold(0, 3000, 10, &stick(512));
    b.haptics.clear();

    // Settle near 96 %; the last pulse was at 99 %, inside the band.
    b.hold(3010, 8000, 10, &stick(493));
    assert_eq!(b.haptics.count(), 0);
}
