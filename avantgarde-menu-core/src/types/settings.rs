//! Engine tunables

use serde::{Deserialize, Serialize};

/// Settings the engine reads at runtime. Loaded by the app layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineSettings {
    /// Capability required to open the menu at all (`None` = everyone)
    pub use_permission: Option<String>,
    /// Capability required for the admin operations (reload, listing, debug)
    pub admin_permission: String,
    /// Gap between consecutive commands of the world creation sequence
    pub world_step_delay_ticks: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            use_permission: Some("avantgardemenu.use".to_string()),
            admin_permission: "avantgardemenu.admin".to_string(),
            world_step_delay_ticks: 40,
        }
    }
}
