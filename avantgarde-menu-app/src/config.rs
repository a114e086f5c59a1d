//! Application configuration
//!
//! Resolution order: built-in defaults, then `avantgarde.toml`, then
//! `AVANTGARDE__*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use avantgarde_menu_core::error::{MenuError, MenuResult};
use avantgarde_menu_core::types::EngineSettings;
use serde::Deserialize;

/// Default configuration file, relative to the working directory
pub const CONFIG_FILE: &str = "avantgarde.toml";

const ENV_PREFIX: &str = "AVANTGARDE__";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AppConfig {
    /// Folder holding `main.toml` and `submenus/`
    pub catalog_dir: PathBuf,
    /// Wall-clock length of one host tick
    pub tick_millis: u64,
    pub engine: EngineSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("./menus"),
            tick_millis: 50,
            engine: EngineSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

/// Load [`CONFIG_FILE`] and apply the process environment.
pub fn load_config() -> MenuResult<AppConfig> {
    let mut config = load_config_from(Path::new(CONFIG_FILE))?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Read a configuration file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> MenuResult<AppConfig> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(e.into()),
    };

    toml::from_str(&raw).map_err(|e| MenuError::Config(format!("{}: {e}", path.display())))
}

/// Overlay `AVANTGARDE__*` variables resolved through `lookup`.
///
/// Unparsable numbers are ignored with a warning.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

    if let Some(v) = var("CATALOG_DIR") {
        config.catalog_dir = PathBuf::from(v);
    }
    if let Some(v) = var("TICK_MILLIS") {
        match v.parse() {
            Ok(parsed) => config.tick_millis = parsed,
            Err(_) => log::warn!("Ignoring invalid {ENV_PREFIX}TICK_MILLIS: {v}"),
        }
    }
    if let Some(v) = var("WORLD_STEP_DELAY") {
        match v.parse() {
            Ok(parsed) => config.engine.world_step_delay_ticks = parsed,
            Err(_) => log::warn!("Ignoring invalid {ENV_PREFIX}WORLD_STEP_DELAY: {v}"),
        }
    }
    if let Some(v) = var("USE_PERMISSION") {
        config.engine.use_permission = (!v.is_empty()).then_some(v);
    }
    if let Some(v) = var("ADMIN_PERMISSION") {
        config.engine.admin_permission = v;
    }
}
