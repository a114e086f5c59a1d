//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum MenuError {
    /// A catalog document could not be loaded
    #[error("Load error in {document}: {reason}")]
    Load { document: String, reason: String },

    /// Menu not found
    #[error("Menu not found: {0}")]
    MenuNotFound(String),

    /// Item not found in an existing menu
    #[error("Menu item not found: {menu_id}/{item_id}")]
    ItemNotFound { menu_id: String, item_id: String },

    /// The viewer lacks the capability guarding an item or entry point
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Structured input rejected
    #[error("Validation error: {0}")]
    Validation(String),

    /// Activation token could not be decoded
    #[error("Unparsable activation token: {0}")]
    Dispatch(String),

    /// Confirm received without a matching open form
    #[error("No pending flow for confirm: {0}")]
    NoPendingFlow(String),

    /// Filtered item list was empty, nothing to render
    #[error("Nothing available in menu: {0}")]
    NothingAvailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error from an adapter
    #[error("I/O error: {0}")]
    Io(String),
}

impl MenuError {
    /// Whether it is expected behavior (user input, stale view, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::MenuNotFound(_)
            | Self::ItemNotFound { .. }
            | Self::PermissionDenied(_)
            | Self::Validation(_)
            | Self::Dispatch(_)
            | Self::NoPendingFlow(_)
            | Self::NothingAvailable(_) => true,
            Self::Load { .. } | Self::Config(_) | Self::Io(_) => false,
        }
    }

    /// Text shown to the end user. Never exposes internals for lookup failures.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MenuNotFound(_)
            | Self::ItemNotFound { .. }
            | Self::Dispatch(_)
            | Self::NoPendingFlow(_) => "That menu entry could not be found".to_string(),
            Self::PermissionDenied(_) => "You do not have permission to use this".to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::NothingAvailable(_) => "There is nothing available in this menu".to_string(),
            Self::Load { .. } | Self::Config(_) | Self::Io(_) => {
                "An error occurred while processing the menu".to_string()
            }
        }
    }
}

impl From<std::io::Error> for MenuError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Core layer Result type alias
pub type MenuResult<T> = std::result::Result<T, MenuError>;
