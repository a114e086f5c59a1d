//! Rendering surface adapter Trait

use async_trait::async_trait;

use crate::types::{FlowForm, RenderedMenu, UserId};

/// Turns surface-neutral views into the concrete dialog or form of a client.
///
/// Platform implementation:
/// - Rich dialog clients: dialog API with multi-action buttons
/// - Constrained clients: simple form with an ordered button list
#[async_trait]
pub trait ViewPresenter: Send + Sync {
    /// Show a menu, replacing whatever view the user currently has open
    async fn show_menu(&self, user: &UserId, menu: RenderedMenu);

    /// Show a flow's structured-input form
    async fn show_form(&self, user: &UserId, form: FlowForm);
}
