//! Menu and item definitions

use serde::{Deserialize, Serialize};

/// Identifier of the singleton main menu; always the bottom of a navigation stack.
pub const MAIN_MENU_ID: &str = "main";

/// Symbolic material identifier (e.g. `EMERALD`), mapped to a glyph by an `IconSet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Icon(String);

impl Icon {
    /// Fallback used when a document names an invalid icon.
    pub const DEFAULT_NAME: &'static str = "STONE";

    /// Parse a material name, case-insensitive.
    ///
    /// Returns `None` unless the name is non-empty and made of `A-Z`, `0-9` and `_`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim().to_ascii_uppercase();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        valid.then_some(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Icon {
    fn default() -> Self {
        Self(Self::DEFAULT_NAME.to_string())
    }
}

/// A single selectable entry of a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique within the owning menu; the routing key
    pub id: String,
    /// Display title, may contain markup
    pub title: String,
    /// Title with markup stripped
    pub title_plain: String,
    pub icon: Icon,
    /// Tooltip lines
    pub description: Vec<String>,
    pub command: Option<String>,
    /// Child menu; wins over `command` when both are set
    pub submenu: Option<String>,
    pub permission: Option<String>,
    pub order: i64,
}

impl MenuItem {
    /// Whether a viewer, judged by `has_permission`, may see this item.
    pub fn is_visible_with(&self, has_permission: impl Fn(&str) -> bool) -> bool {
        self.permission.as_deref().is_none_or(has_permission)
    }
}

/// Main menu or submenu; both share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    pub title: String,
    /// Title on the simplified form surface
    pub alt_title: String,
    /// Single content line on the simplified form surface
    pub alt_body: String,
    /// Sorted by `order`, ties in declaration order
    pub items: Vec<MenuItem>,
}

impl Menu {
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.id == MAIN_MENU_ID
    }

    /// Find an item by id
    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}
