//! Integration test: scripted simulation runs.

use weapon_common::hal::sink::NoDelay;
use weapon_control::config::load_config_from_str;
use weapon_control::cycle::{InputScript, SimRunner};
use weapon_control::weapon::Weapon;

const SPINNER: &str = r#"
[shared]
verbose = false
[weapon]
kind = "vertical_spinner"
[safety]
safety_delay_ms = 3000
"#;

#[test]
fn scripted_spin_up_and_stop() {
    let script = InputScript::from_json(
        r#"[
            {"at_ms": 0},
            {"at_ms": 1000, "stick_y": 512},
            {"at_ms": 7000, "stick_y": 512, "emergency_stop": true}
        ]"#,
    )
    .unwrap();

    let controller = load_config_from_str(SPINNER).unwrap().build_controller();
    let mut runner = SimRunner::new(controller, 10, 500);
    runner.begin(&mut NoDelay);
    runner.run(&script, 8000, &mut NoDelay);

    let stats = runner.stats();
    assert_eq!(stats.cycle_count, 801);
    assert_eq!(stats.first_armed_at_ms, Some(3500));
    assert_eq!(stats.peak_level, Some(2000.0));
    assert_eq!(stats.emergency_stops, 1);
    assert_eq!(runner.actuator().level(), Some(1500.0));
    assert!(!runner.controller().is_armed(weapon_common::time::Millis(8000)));
    assert!(runner.haptics().count() > 1);
}

#[test]
fn scripted_rearm_announces_again() {
    let script = InputScript::from_json(
        r#"[
            {"at_ms": 0},
            {"at_ms": 4000, "disarm": true},
            {"at_ms": 4100, "arm": true}
        ]"#,
    )
    .unwrap();

    let controller = load_config_from_str(SPINNER).unwrap().build_controller();
    let mut runner = SimRunner::new(controller, 10, 0);
    runner.begin(&mut NoDelay);
    runner.run(&script, 5000, &mut NoDelay);

    assert_eq!(runner.haptics().count(), 2);
}
