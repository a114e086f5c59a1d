//! Named `[special]` flows

use serde::{Deserialize, Serialize};

/// Input flows: each opens a structured form and waits for a confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Image url → map art (single-input confirm flow)
    MapArt,
    Promote,
    /// Block log lookup / rollback
    CoreProtect,
    Ban,
    WorldSize,
    CreateWorld,
}

impl FlowKind {
    pub const ALL: [Self; 6] = [
        Self::MapArt,
        Self::Promote,
        Self::CoreProtect,
        Self::Ban,
        Self::WorldSize,
        Self::CreateWorld,
    ];

    /// Directive name after `[special]`
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::MapArt => "tomap_dialog",
            Self::Promote => "admin_promote",
            Self::CoreProtect => "admin_coreprotect",
            Self::Ban => "admin_ban",
            Self::WorldSize => "admin_worldsize",
            Self::CreateWorld => "admin_createworld",
        }
    }

    /// Sentinel key carried by the form's confirm button
    #[must_use]
    pub const fn confirm_key(self) -> &'static str {
        match self {
            Self::MapArt => "tomap_confirm",
            Self::Promote => "admin_promote_confirm",
            Self::CoreProtect => "admin_coreprotect_confirm",
            Self::Ban => "admin_ban_confirm",
            Self::WorldSize => "admin_worldsize_confirm",
            Self::CreateWorld => "admin_createworld_confirm",
        }
    }

    #[must_use]
    pub fn from_directive(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.directive() == name)
    }

    #[must_use]
    pub fn from_confirm_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.confirm_key() == key)
    }

    /// Whether an invalid submission leaves the form open for another try.
    ///
    /// The map art form keeps the dialog up; admin flows close and must be reopened.
    #[must_use]
    pub const fn retries_on_invalid(self) -> bool {
        matches!(self, Self::MapArt)
    }
}

/// Toggle flows: no input, execute immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEffect {
    NightVision,
}

impl StatusEffect {
    pub const ALL: [Self; 1] = [Self::NightVision];

    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::NightVision => "nightvision_toggle",
        }
    }

    #[must_use]
    pub fn from_directive(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.directive() == name)
    }

    /// Human-readable name for notices
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::NightVision => "Night vision",
        }
    }
}
