//! Integration test: flipper pulse timing and cooldown.

use weapon_common::input::InputSample;
use weapon_common::time::Millis;
use weapon_control::weapon::Weapon;
use weapon_control::weapon::flipper::FireResult;

use super::Bench;

fn flipper(mode: &str) -> Bench {
    let mut b = Bench::from_toml(&format!(
        "[weapon]\nkind = \"flipper\"\n[safety]\nsafety_delay_ms = 0\nenable_button = \"brake_trigger\"\n[flipper]\nmode = \"{mode}\"\nfire_duration_ms = 200\ncooldown_ms = 1000"
    ));
    b.weapon.begin_link(Millis(0));
    b
}

fn trigger() -> InputSample {
    InputSample::neutral().with_brake(600)
}

#[test]
fn double_fire_within_cooldown_energizes_once() {
    let mut b = flipper("tap");
    let Bench {
        weapon, actuator, ..
    } = &mut b;
    let f = weapon.as_flipper_mut().expect("flipper");
    assert_eq!(f.fire(Millis(0), actuator), FireResult::Fired);
    assert!(!f.fire(Millis(300), actuator).is_fired());
    assert_eq!(actuator.energize_count(), 1);
}

#[test]
fn pulse_ends_after_duration_exactly_once() {
    let mut b = flipper("tap");
    b.tick(0, &trigger());
    assert!(b.actuator.is_energized());

    b.hold(10, 190, 10, &trigger());
    assert!(b.actuator.is_energized());

    b.tick(200, &trigger());
    assert!(!b.actuator.is_energized());
    let writes = b.actuator.discrete_writes();
    b.hold(210, 900, 10, &InputSample::neutral());
    assert_eq!(b.actuator.discrete_writes(), writes);
}

#[test]
fn tap_requires_release_between_fires() {
    let mut b = flipper("tap");
    b.hold(0, 2500, 10, &trigger());
    assert_eq!(b.actuator.energize_count(), 1);

    b.tick(2510, &InputSample::neutral());
    b.tick(2520, &trigger());
    assert_eq!(b.actuator.energize_count(), 2);
}

#[test]
fn tap_inside_cooldown_is_dropped() {
    let mut b = flipper("tap");
    b.tick(0, &trigger());
    b.hold(10, 400, 10, &InputSample::neutral());
    b.tick(410, &trigger());
    b.tick(420, &InputSample::neutral());
    assert_eq!(b.actuator.energize_count(), 1);
}

#[test]
fn hold_mode_is_rate_limited_by_cooldown() {
    let mut b = flipper("hold");
    b.hold(0, 4990, 10, &trigger());
    // Pulses start at 0, 1000, 2000, 3000, 4000.
    assert_eq!(b.actuator.energize_count(), 5);
}

#[test]
fn active_only_while_firing() {
    let mut b = flipper("tap");
    b.tick(0, &trigger());
    assert!(b.weapon.is_active());
    assert_eq!(b.weapon.active_time(Millis(120)), 120);
    b.tick(200, &InputSample::neutral());
    assert!(!b.weapon.is_active());
    assert_eq!(b.weapon.active_time(Millis(250)), 0);
}
