//! Activation token codec
//!
//! Token layout: `avantgardemenu:menu_<menuId>_<itemId>`. Menu ids never
//! contain `_` (enforced at load time) so decode splits on the first
//! separator after the marker and keeps the remainder as the item id.

use crate::error::{MenuError, MenuResult};
use crate::types::{FlowKind, MAIN_MENU_ID};

/// What a decoded token points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedToken {
    Item { menu_id: String, item_id: String },
    /// Confirm button of an input flow's form
    Confirm(FlowKind),
}

/// Encoder / decoder for activation tokens
pub struct ItemKeyCodec;

impl ItemKeyCodec {
    pub const NAMESPACE: &'static str = "avantgardemenu";
    const ITEM_MARKER: &'static str = "menu";
    const SEPARATOR: char = '_';
    const NAMESPACE_SEPARATOR: char = ':';

    /// Token for an item of a menu
    #[must_use]
    pub fn encode(menu_id: &str, item_id: &str) -> String {
        format!(
            "{}{}{}{}{menu_id}{}{item_id}",
            Self::NAMESPACE,
            Self::NAMESPACE_SEPARATOR,
            Self::ITEM_MARKER,
            Self::SEPARATOR,
            Self::SEPARATOR,
        )
    }

    /// Token of a flow's confirm button
    #[must_use]
    pub fn confirm_token(flow: FlowKind) -> String {
        format!(
            "{}{}{}",
            Self::NAMESPACE,
            Self::NAMESPACE_SEPARATOR,
            flow.confirm_key()
        )
    }

    /// Whether the token belongs to this engine at all
    #[must_use]
    pub fn owns(token: &str) -> bool {
        Self::local_key(token).is_some()
    }

    /// Decode a token of our namespace.
    pub fn decode(token: &str) -> MenuResult<DecodedToken> {
        let key = Self::local_key(token)
            .ok_or_else(|| MenuError::Dispatch(format!("foreign namespace: {token}")))?;

        if let Some(flow) = FlowKind::from_confirm_key(key) {
            return Ok(DecodedToken::Confirm(flow));
        }

        let rest = key
            .strip_prefix(Self::ITEM_MARKER)
            .and_then(|r| r.strip_prefix(Self::SEPARATOR))
            .ok_or_else(|| MenuError::Dispatch(format!("unknown key: {key}")))?;

        match rest.split_once(Self::SEPARATOR) {
            Some((menu_id, item_id)) if !menu_id.is_empty() && !item_id.is_empty() => {
                Ok(DecodedToken::Item {
                    menu_id: menu_id.to_string(),
                    item_id: item_id.to_string(),
                })
            }
            _ => Err(MenuError::Dispatch(format!("invalid menu key format: {key}"))),
        }
    }

    /// Whether an id can be used as a submenu id inside tokens.
    #[must_use]
    pub fn is_valid_menu_id(id: &str) -> bool {
        !id.is_empty()
            && id != MAIN_MENU_ID
            && !id.contains(Self::SEPARATOR)
            && !id.contains(Self::NAMESPACE_SEPARATOR)
    }

    fn local_key(token: &str) -> Option<&str> {
        token
            .strip_prefix(Self::NAMESPACE)
            .and_then(|r| r.strip_prefix(Self::NAMESPACE_SEPARATOR))
    }
}
