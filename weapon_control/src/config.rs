//! TOML configuration loader for the weapon controller.
//!
//! Parses a [`WeaponConfig`], validates the shared section and clamps every
//! numeric setting into range. Out-of-range values never fail the load.

use std::path::Path;

use tracing::{debug, info};

use weapon_common::config::{ConfigError, ConfigLoader};
use weapon_common::weapon::config::WeaponConfig;

use crate::weapon::controller::WeaponController;

// ─── Loaded Config Bundle ───────────────────────────────────────────

/// Validated, clamped configuration ready for runtime use.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: WeaponConfig,
}

impl LoadedConfig {
    /// Build the controller selected by `[weapon] kind`.
    pub fn build_controller(&self) -> WeaponController {
        WeaponController::from_config(&self.config)
    }
}

// ─── Loading Functions ──────────────────────────────────────────────

/// Load, validate and clamp the weapon configuration file.
///
/// # Errors
///
/// - `ConfigError::FileNotFound` if `path` does not exist
/// - `ConfigError::ParseError` on unreadable files, bad TOML or unknown
///   selector names
/// - `ConfigError::ValidationError` if the shared section is invalid
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    debug!(path = %path.display(), "loading weapon config");
    let raw = WeaponConfig::load(path)?;
    finish(raw)
}

/// Load config from a TOML string (for testing).
pub fn load_config_from_str(content: &str) -> Result<LoadedConfig, ConfigError> {
    let raw = WeaponConfig::from_toml(content)?;
    finish(raw)
}

fn finish(raw: WeaponConfig) -> Result<LoadedConfig, ConfigError> {
    raw.shared.validate()?;
    let config = raw.sanitized();
    info!(
        service = %config.shared.service_name,
        weapon = config.weapon.kind.label(),
        "Config OK"
    );
    Ok(LoadedConfig { config })
}
