mod arming;
mod config_loading;
mod emergency_stop;
mod flipper;
mod lifter;
mod simulation;
mod spinner;

use weapon_common::hal::mock::{RecordingActuator, RecordingDelay, RecordingHaptics};
use weapon_common::time::Millis;
use weapon_control::config::load_config_from_str;
use weapon_control::weapon::Weapon;
use weapon_control::weapon::controller::WeaponController;

/// Controller with its recording sinks, already through `begin()`.
pub struct Bench {
    pub weapon: WeaponController,
    pub actuator: RecordingActuator,
    pub haptics: RecordingHaptics,
    pub delay: RecordingDelay,
}

impl Bench {
    pub fn from_toml(toml: &str) -> Self {
        let loaded = load_config_from_str(toml).expect("test config must load");
        let mut weapon = loaded.build_controller();
        weapon.set_verbose(false);
        let mut actuator = RecordingActuator::new();
        let mut delay = RecordingDelay::default();
        weapon.begin(&mut actuator, &mut delay);
        Self {
            weapon,
            actuator,
            haptics: RecordingHaptics::new(),
            delay,
        }
    }

    pub fn tick(&mut self, t: u32, input: &weapon_common::input::InputSample) {
        self.weapon
            .update(Millis(t), input, &mut self.actuator, &mut self.haptics);
    }

    /// Tick every `step` ms over `from..=to` with a constant input.
    pub fn hold(&mut self, from: u32, to: u32, step: u32, input: &weapon_common::input::InputSample) {
        let mut t = from;
        while t <= to {
            self.tick(t, input);
            t += step;
        }
    }

    pub fn estop(&mut self) {
        self.weapon.emergency_stop(&mut self.actuator);
    }
}
