//! Administrative operations: reload, catalog listing, session inspection

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::MenuResult;
use crate::services::{
    CatalogService, EngineContext, LoadReport, SessionRegistry, SessionSnapshot,
};
use crate::types::{Notice, Viewer, MAIN_MENU_ID};

/// One menu in a [`MenuListing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSummary {
    pub id: String,
    pub title: String,
    pub items: usize,
}

/// Contents of the current catalog snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuListing {
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,
    pub main: MenuSummary,
    pub submenus: Vec<MenuSummary>,
}

/// Admin service; every operation requires the admin permission.
pub struct AdminService {
    ctx: Arc<EngineContext>,
    catalog: Arc<CatalogService>,
    sessions: Arc<SessionRegistry>,
}

impl AdminService {
    #[must_use]
    pub fn new(
        ctx: Arc<EngineContext>,
        catalog: Arc<CatalogService>,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            ctx,
            catalog,
            sessions,
        }
    }

    /// Reload the catalog and report the outcome to the caller.
    ///
    /// A failed reload leaves the previous catalog in place.
    pub async fn reload(&self, viewer: &Viewer) -> MenuResult<LoadReport> {
        self.authorize(viewer).await?;
        log::info!("Catalog reload requested by {}", viewer.name);

        match self.catalog.reload().await {
            Ok(report) => {
                let text = match report.warnings.len() {
                    0 => format!(
                        "Menu configuration reloaded ({} submenus)",
                        report.submenus_loaded
                    ),
                    warnings => format!(
                        "Menu configuration reloaded ({} submenus, {warnings} warnings)",
                        report.submenus_loaded
                    ),
                };
                self.ctx
                    .host
                    .send_notice(&viewer.id, Notice::success(text))
                    .await;
                Ok(report)
            }
            Err(e) => {
                self.ctx
                    .host
                    .send_notice(&viewer.id, Notice::error(format!("Reload failed: {e}")))
                    .await;
                Err(e)
            }
        }
    }

    pub async fn list_menus(&self, viewer: &Viewer) -> MenuResult<MenuListing> {
        self.authorize(viewer).await?;
        let catalog = self.catalog.snapshot();
        let summary = |id: &str| {
            catalog.lookup(id).map(|menu| MenuSummary {
                id: menu.id.clone(),
                title: menu.alt_title.clone(),
                items: menu.items.len(),
            })
        };

        Ok(MenuListing {
            generation: catalog.generation(),
            loaded_at: catalog.loaded_at(),
            main: summary(MAIN_MENU_ID)?,
            submenus: catalog
                .submenu_ids()
                .into_iter()
                .map(summary)
                .collect::<MenuResult<_>>()?,
        })
    }

    /// Live dispatch sessions, for debugging stuck users.
    pub async fn sessions(&self, viewer: &Viewer) -> MenuResult<Vec<SessionSnapshot>> {
        self.authorize(viewer).await?;
        Ok(self.sessions.snapshot().await)
    }

    async fn authorize(&self, viewer: &Viewer) -> MenuResult<()> {
        self.ctx
            .require_permission(&viewer.id, &self.ctx.settings.admin_permission)
            .await
    }
}
