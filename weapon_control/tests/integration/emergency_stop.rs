//! Integration test: emergency stop from every state.
//!
//! Validates the per-family neutralization policy:
//! - spinner: instant neutral, bypassing the ramp
//! - lifter: disarm, then ramp home
//! - flipper: de-energize, cooldown preserved

use weapon_common::hal::mock::RecordingActuator;
use weapon_common::input::{Buttons, InputSample};
use weapon_common::time::Millis;
use weapon_control::weapon::Weapon;
use weapon_control::weapon::controller::WeaponController;
use weapon_control::weapon::flipper::FireResult;

use super::Bench;

fn r1() -> InputSample {
    InputSample::neutral().with_buttons(Buttons::R1)
}

fn armed(kind: &str) -> Bench {
    let mut b = Bench::from_toml(&format!(
        "[weapon]\nkind = \"{kind}\"\n[safety]\nsafety_delay_ms = 0\nenable_button = \"r1\"\n[spinner]\nmode = \"hold\""
    ));
    b.weapon.begin_link(Millis(0));
    b
}

#[test]
fn spinner_mid_ramp_stops_instantly() {
    let mut b = armed("horizontal_spinner");
    b.hold(0, 1600, 10, &r1());
    let before = b.weapon.as_spinner().map(|s| s.current_speed()).unwrap_or_default();
    assert!((before - 1900.0).abs() < 1e-9);

    b.estop();
    assert_eq!(b.actuator.level(), Some(1500.0));
    assert_eq!(b.weapon.as_spinner().map(|s| s.current_speed()), Some(1500.0));
    assert!(!b.weapon.is_armed(Millis(1610)));

    // Still held, still neutral: nothing re-arms on its own.
    b.hold(1610, 3000, 10, &r1());
    assert_eq!(b.actuator.level(), Some(1500.0));
}

#[test]
fn lifter_ramps_home_after_stop() {
    let mut b = armed("lifter");
    b.hold(0, 3000, 10, &r1());
    b.estop();
    assert_eq!(b.weapon.as_lifter().map(|l| l.current_angle()), Some(180.0));
    b.tick(3010, &r1());
    let a = b.weapon.as_lifter().map(|l| l.current_angle()).unwrap_or_default();
    assert!(a < 180.0 && a > 170.0);
    b.hold(3020, 6000, 10, &r1());
    assert_eq!(b.actuator.level(), Some(0.0));
}

#[test]
fn flipper_stop_cannot_bypass_cooldown() {
    let mut b = armed("flipper");
    b.tick(0, &r1());
    assert!(b.actuator.is_energized());
    b.estop();
    assert!(!b.actuator.is_energized());

    b.weapon.arm();
    let Bench {
        weapon, actuator, ..
    } = &mut b;
    let f = weapon.as_flipper_mut().expect("flipper");
    assert_eq!(f.fire(Millis(400), actuator), FireResult::Rejected("cooldown"));
    assert_eq!(f.fire(Millis(1000), actuator), FireResult::Fired);
}

#[test]
fn stop_before_begin_is_safe() {
    let cfg = weapon_control::config::load_config_from_str(
        "[weapon]\nkind = \"vertical_spinner\"\n[shared]\nverbose = false",
    )
    .unwrap();
    let mut w: WeaponController = cfg.build_controller();
    let mut act = RecordingActuator::new();
    w.emergency_stop(&mut act);
    w.emergency_stop(&mut act);
    assert!(!w.is_armed(Millis(0)));
    assert!(!w.is_active());
    assert_eq!(act.level(), Some(1500.0));
}

#[test]
fn null_weapon_stop_is_noop() {
    let mut w = WeaponController::default();
    let mut act = RecordingActuator::new();
    w.emergency_stop(&mut act);
    assert_eq!(act.level_writes() + act.discrete_writes(), 0);
}
