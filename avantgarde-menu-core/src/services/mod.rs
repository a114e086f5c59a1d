//! Engine services

mod admin_service;
mod catalog_document;
mod catalog_service;
mod dispatch_service;
pub mod interpreter;
mod item_key;
mod navigation;
pub mod renderer;
mod session;

pub use admin_service::{AdminService, MenuListing, MenuSummary};
pub use catalog_document::LoadWarning;
pub use catalog_service::{CatalogService, LoadReport, MenuCatalog};
pub use dispatch_service::DispatchCoordinator;
pub use interpreter::{Action, CommandInterpreter, FlowPlan, Interpretation, PlannedStep};
pub use item_key::{DecodedToken, ItemKeyCodec};
pub use navigation::NavigationStack;
pub use renderer::{MenuRenderer, RendererSet};
pub use session::{PendingAction, Session, SessionRegistry, SessionSnapshot};

use std::sync::Arc;

use crate::error::{MenuError, MenuResult};
use crate::traits::{HostEnvironment, IconSet, Scheduler, ViewPresenter};
use crate::types::{EngineSettings, UserId};

/// Engine context - holds every port
///
/// The platform layer builds this once and injects its host adapters.
pub struct EngineContext {
    /// Permission checks, command execution, notices
    pub host: Arc<dyn HostEnvironment>,
    /// Shows rendered menus and flow forms
    pub presenter: Arc<dyn ViewPresenter>,
    /// Main-tick executor for host commands
    pub scheduler: Arc<dyn Scheduler>,
    pub icons: Arc<dyn IconSet>,
    pub settings: Arc<EngineSettings>,
}

impl EngineContext {
    #[must_use]
    pub fn new(
        host: Arc<dyn HostEnvironment>,
        presenter: Arc<dyn ViewPresenter>,
        scheduler: Arc<dyn Scheduler>,
        icons: Arc<dyn IconSet>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            host,
            presenter,
            scheduler,
            icons,
            settings: Arc::new(settings),
        }
    }

    /// Fail with `PermissionDenied` unless the user holds `permission`.
    pub async fn require_permission(&self, user: &UserId, permission: &str) -> MenuResult<()> {
        if self.host.has_permission(user, permission).await {
            Ok(())
        } else {
            Err(MenuError::PermissionDenied(permission.to_string()))
        }
    }
}
