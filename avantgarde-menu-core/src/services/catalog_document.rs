//! Menu document parsing
//!
//! A document is TOML with a root `[menu]` table. Item tables keep their
//! declaration order, which becomes the default sort key.

use serde::Deserialize;

use crate::error::{MenuError, MenuResult};
use crate::traits::SourceDocument;
use crate::types::{Icon, Menu, MenuItem};
use crate::utils::markup;

const DEFAULT_TITLE: &str = "Menu";
const DEFAULT_ALT_BODY: &str = "Select an item from the menu";

/// Non-fatal problem found while loading.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LoadWarning {
    pub document: String,
    pub message: String,
}

impl LoadWarning {
    fn new(document: &str, message: impl Into<String>) -> Self {
        Self {
            document: document.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DocumentRoot {
    menu: Option<MenuSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct MenuSection {
    title: Option<String>,
    #[serde(alias = "bedrock-title")]
    alt_title: Option<String>,
    #[serde(alias = "bedrock-content")]
    alt_body: Option<String>,
    #[serde(default)]
    items: toml::Table,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ItemSection {
    title: Option<String>,
    icon: Option<String>,
    #[serde(default)]
    description: Vec<String>,
    command: Option<String>,
    submenu: Option<String>,
    permission: Option<String>,
    #[serde(alias = "slot")]
    order: Option<i64>,
}

/// Parse one document into a menu with the given id.
///
/// Fails when the text is not valid TOML or has no `[menu]` table.
/// Item-level problems (malformed item table, invalid icon) are pushed to
/// `warnings` and the rest of the document still loads.
pub(crate) fn parse_menu(
    menu_id: &str,
    document: &SourceDocument,
    warnings: &mut Vec<LoadWarning>,
) -> MenuResult<Menu> {
    let root: DocumentRoot = toml::from_str(&document.text).map_err(|e| MenuError::Load {
        document: document.name.clone(),
        reason: format!("unparsable document: {}", e.message()),
    })?;

    let section = root.menu.ok_or_else(|| MenuError::Load {
        document: document.name.clone(),
        reason: "missing [menu] section".to_string(),
    })?;

    let title = section
        .title
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let alt_title = section
        .alt_title
        .unwrap_or_else(|| markup::strip(&title));
    let alt_body = section
        .alt_body
        .unwrap_or_else(|| DEFAULT_ALT_BODY.to_string());

    let mut items = Vec::with_capacity(section.items.len());
    for (position, (key, value)) in section.items.into_iter().enumerate() {
        if key.trim().is_empty() {
            warnings.push(LoadWarning::new(&document.name, "item with empty id skipped"));
            continue;
        }
        let raw: ItemSection = match value.try_into() {
            Ok(raw) => raw,
            Err(e) => {
                warnings.push(LoadWarning::new(
                    &document.name,
                    format!("item '{key}' skipped: {}", e.message()),
                ));
                continue;
            }
        };
        let default_order = i64::try_from(position).unwrap_or(i64::MAX);
        items.push(build_item(&document.name, key, raw, default_order, warnings));
    }

    // Stable: equal `order` keeps declaration order
    items.sort_by_key(|item| item.order);

    Ok(Menu {
        id: menu_id.to_string(),
        title,
        alt_title,
        alt_body,
        items,
    })
}

fn build_item(
    document: &str,
    id: String,
    raw: ItemSection,
    default_order: i64,
    warnings: &mut Vec<LoadWarning>,
) -> MenuItem {
    let title = raw.title.unwrap_or_else(|| id.clone());
    let icon = match raw.icon.as_deref() {
        None => Icon::default(),
        Some(name) => Icon::parse(name).unwrap_or_else(|| {
            warnings.push(LoadWarning::new(
                document,
                format!(
                    "invalid icon '{name}' on item '{id}', using {}",
                    Icon::DEFAULT_NAME
                ),
            ));
            Icon::default()
        }),
    };

    MenuItem {
        title_plain: markup::strip(&title),
        title,
        icon,
        description: raw.description,
        command: non_blank(raw.command),
        submenu: non_blank(raw.submenu),
        permission: non_blank(raw.permission),
        order: raw.order.unwrap_or(default_order),
        id,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
