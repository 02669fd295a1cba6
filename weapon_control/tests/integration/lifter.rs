//! Integration test: lifter button and analog control.

use weapon_common::input::{Buttons, InputSample};
use weapon_common::time::Millis;
use weapon_control::weapon::Weapon;

use super::Bench;

fn lifter(extra: &str) -> Bench {
    let mut b = Bench::from_toml(&format!(
        "[weapon]\nkind = \"lifter\"\n[safety]\nsafety_delay_ms = 0\n[lifter]\nmin_angle = 20\nmax_angle = 160\nspeed_deg_per_s = 100\n{extra}"
    ));
    b.weapon.begin_link(Millis(0));
    b
}

fn angle(b: &Bench) -> f64 {
    b.weapon.as_lifter().map(|l| l.current_angle()).unwrap_or(f64::NAN)
}

#[test]
fn begin_writes_min_angle() {
    let b = lifter("");
    assert_eq!(b.actuator.level(), Some(20.0));
}

#[test]
fn symmetric_rate_both_ways() {
    let up = InputSample::neutral().with_buttons(Buttons::R1);
    let down = InputSample::neutral().with_throttle(1023);
    let mut b = lifter("");

    b.hold(0, 700, 10, &up);
    assert!((angle(&b) - 90.0).abs() < 1e-6);
    b.hold(710, 2000, 10, &up);
    assert_eq!(angle(&b), 160.0);

    b.hold(2010, 2700, 10, &down);
    assert!((angle(&b) - 90.0).abs() < 1e-6);
}

#[test]
fn custom_buttons() {
    let mut b = lifter("up_button = \"l1\"\ndown_button = \"l2\"");
    let up = InputSample::neutral().with_buttons(Buttons::L1);
    b.hold(0, 2000, 10, &up);
    assert_eq!(angle(&b), 160.0);
    let r1 = InputSample::neutral().with_buttons(Buttons::R1);
    b.hold(2010, 3000, 10, &r1);
    assert_eq!(angle(&b), 160.0);
    let down = InputSample::neutral().with_buttons(Buttons::L2);
    b.hold(3010, 5000, 10, &down);
    assert_eq!(angle(&b), 20.0);
}

#[test]
fn analog_mode_maps_full_range_and_holds() {
    let mut b = lifter("mode = \"analog\"");
    let stick = |y| InputSample::neutral().with_right_stick(0, y);

    b.tick(0, &stick(0));
    assert_eq!(b.weapon.as_lifter().map(|l| l.target_angle()), Some(20.0));

    b.hold(10, 100, 10, &stick(0));
    b.tick(110, &stick(512));
    assert_eq!(b.weapon.as_lifter().map(|l| l.target_angle()), Some(160.0));
    assert!(b.weapon.is_active());

    // Back inside the dead zone: keep the last commanded angle.
    b.hold(120, 3000, 10, &stick(-40));
    assert_eq!(b.weapon.as_lifter().map(|l| l.target_angle()), Some(160.0));
    assert_eq!(angle(&b), 160.0);

    b.tick(3010, &stick(-512));
    assert_eq!(b.weapon.as_lifter().map(|l| l.target_angle()), Some(20.0));
    assert!(!b.weapon.is_active());
}

#[test]
fn disarmed_lifter_returns_home() {
    let up = InputSample::neutral().with_buttons(Buttons::R1);
    let mut b = lifter("");
    b.hold(0, 2000, 10, &up);
    b.weapon.disarm();
    b.hold(2010, 4000, 10, &up);
    assert_eq!(angle(&b), 20.0);
    assert_eq!(b.actuator.level(), Some(20.0));
}
