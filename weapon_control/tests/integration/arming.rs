//! Integration test: arming gate across every weapon family.
//!
//! Validates: no output before the safety delay, the exact delay boundary,
//! and that nothing arms without a link.

use weapon_common::input::{Buttons, InputSample};
use weapon_common::time::Millis;
use weapon_control::weapon::Weapon;
use weapon_control::weapon::controller::WeaponController;

use super::Bench;

const KINDS: [&str; 4] = ["vertical_spinner", "horizontal_spinner", "lifter", "flipper"];

fn toml_for(kind: &str) -> String {
    format!(
        "[weapon]\nkind = \"{kind}\"\n[safety]\nsafety_delay_ms = 3000\nenable_button = \"r1\"\n[spinner]\nmode = \"hold\"\n[lifter]\nup_button = \"r1\""
    )
}

#[test]
fn not_armed_after_construction() {
    assert!(!WeaponController::default().is_armed(Millis(0)));
    for kind in KINDS {
        let b = Bench::from_toml(&toml_for(kind));
        assert!(!b.weapon.is_armed(Millis(0)), "{kind}");
        assert!(!b.weapon.is_armed(Millis(u32::MAX)), "{kind}: no link yet");
    }
}

#[test]
fn safety_delay_boundary_for_every_kind() {
    for kind in KINDS {
        let mut b = Bench::from_toml(&toml_for(kind));
        b.weapon.begin_link(Millis(500));
        assert!(!b.weapon.is_armed(Millis(500 + 2999)), "{kind}");
        assert!(b.weapon.is_armed(Millis(500 + 3000)), "{kind}");
    }
}

#[test]
fn held_enable_produces_no_output_during_delay() {
    let pressed = InputSample::neutral().with_buttons(Buttons::R1);

    let mut spinner = Bench::from_toml(&toml_for("vertical_spinner"));
    spinner.weapon.begin_link(Millis(0));
    spinner.hold(0, 2990, 10, &pressed);
    assert_eq!(spinner.actuator.level(), Some(1500.0));
    assert!(!spinner.weapon.is_active());

    let mut flipper = Bench::from_toml(&toml_for("flipper"));
    flipper.weapon.begin_link(Millis(0));
    flipper.hold(0, 2990, 10, &pressed);
    assert_eq!(flipper.actuator.energize_count(), 0);

    let mut lifter = Bench::from_toml(&toml_for("lifter"));
    lifter.weapon.begin_link(Millis(0));
    lifter.hold(0, 2990, 10, &pressed);
    assert_eq!(lifter.actuator.level(), Some(0.0));
}

#[test]
fn tap_held_through_arming_does_not_fire() {
    let pressed = InputSample::neutral().with_buttons(Buttons::R1);
    let mut b = Bench::from_toml(&toml_for("flipper"));
    b.weapon.begin_link(Millis(0));
    b.hold(0, 5000, 10, &pressed);
    assert_eq!(b.actuator.energize_count(), 0);

    b.tick(5010, &InputSample::neutral());
    b.tick(5020, &pressed);
    assert_eq!(b.actuator.energize_count(), 1);
}

#[test]
fn esc_arm_delay_runs_inside_begin() {
    let b = Bench::from_toml(&toml_for("vertical_spinner"));
    assert_eq!(b.delay.total_ms, 2000);
    let l = Bench::from_toml(&toml_for("lifter"));
    assert_eq!(l.delay.calls, 0);
}
