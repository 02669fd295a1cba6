//! Integration test: configuration file → running controller.

use std::io::Write;

use tempfile::NamedTempFile;
use weapon_common::config::ConfigError;
use weapon_common::input::{Buttons, InputSample};
use weapon_common::time::Millis;
use weapon_common::weapon::mode::{FlipperMode, SpinnerMode, WeaponKind};
use weapon_control::config::load_config;
use weapon_control::weapon::Weapon;

#[test]
fn file_round_trip_builds_configured_spinner() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[shared]
service_name = "arena-bot"
verbose = false

[weapon]
kind = "vertical_spinner"

[safety]
safety_delay_ms = 1500
enable_button = "r2"

[spinner]
mode = "toggle"
max_speed = 1800
spin_up_ms = 600
"#
    )
    .unwrap();
    file.flush().unwrap();

    let loaded = load_config(file.path()).unwrap();
    assert_eq!(loaded.config.spinner.mode, SpinnerMode::Toggle);

    let mut w = loaded.build_controller();
    assert_eq!(w.kind(), WeaponKind::VerticalSpinner);
    assert_eq!(w.as_spinner().map(|s| s.max_speed()), Some(1800.0));

    let mut act = weapon_common::hal::mock::RecordingActuator::new();
    let mut hap = weapon_common::hal::mock::RecordingHaptics::new();
    w.begin(&mut act, &mut weapon_common::hal::sink::NoDelay);
    w.begin_link(Millis(0));

    let r2 = InputSample::neutral().with_buttons(Buttons::R2);
    for t in (1500..=2100).step_by(10) {
        w.update(Millis(t), &r2, &mut act, &mut hap);
    }
    assert_eq!(act.level(), Some(1800.0));
}

#[test]
fn out_of_range_values_are_clamped() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "[weapon]\nkind = \"flipper\"\n[flipper]\nmode = \"hold\"\nfire_duration_ms = 20\ncooldown_ms = 99999\n"
    )
    .unwrap();
    file.flush().unwrap();

    let loaded = load_config(file.path()).unwrap();
    assert_eq!(loaded.config.flipper.mode, FlipperMode::Hold);
    let w = loaded.build_controller();
    let pulse = w.as_flipper().map(|f| *f.pulse());
    assert_eq!(pulse.map(|p| (p.fire_duration_ms, p.cooldown_ms)), Some((50, 5000)));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config(&dir.path().join("weapon.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound)));
}

#[test]
fn bad_toml_is_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[weapon\nkind =").unwrap();
    file.flush().unwrap();
    assert!(matches!(load_config(file.path()), Err(ConfigError::ParseError(_))));
}
