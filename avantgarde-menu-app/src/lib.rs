//! Platform-agnostic application bootstrap for AvantGarde Menu.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter
//! injection), configuration loading and logging initialisation.

pub mod adapters;
pub mod config;

use std::sync::Arc;

use avantgarde_menu_core::error::{MenuError, MenuResult};
use avantgarde_menu_core::services::{
    AdminService, CatalogService, DispatchCoordinator, EngineContext, LoadReport, SessionRegistry,
};
use avantgarde_menu_core::traits::{
    CatalogSource, GenericIconSet, HostEnvironment, IconSet, Scheduler, ViewPresenter,
};
use avantgarde_menu_core::types::EngineSettings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the tracing subscriber (fmt layer, `RUST_LOG` filter, `info` by default).
///
/// `log` records from the engine are forwarded to it. A second call is a no-op.
pub fn init_logging() {
    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .try_init();

    if result.is_err() {
        log::debug!("Logging already initialised");
    }
}

/// Platform-agnostic application state.
///
/// Holds the engine context and every service. The host plugin constructs
/// this once at startup via `AppStateBuilder` and routes its events to
/// `coordinator` and `admin`.
pub struct AppState {
    /// Engine context (holds all host adapters)
    pub ctx: Arc<EngineContext>,
    pub catalog: Arc<CatalogService>,
    pub sessions: Arc<SessionRegistry>,
    /// Click and form event entry point
    pub coordinator: DispatchCoordinator,
    /// Reload and diagnostics
    pub admin: AdminService,
}

impl AppState {
    /// Load the catalog for the first time.
    ///
    /// On failure the engine keeps serving an empty main menu until a
    /// successful reload.
    pub async fn run_startup(&self) -> MenuResult<LoadReport> {
        let result = self.catalog.reload().await;
        match &result {
            Ok(report) if !report.warnings.is_empty() => log::warn!(
                "Menu catalog loaded with {} warnings",
                report.warnings.len()
            ),
            Ok(_) => log::info!("Menu catalog ready"),
            Err(e) => log::error!("Failed to load menu catalog at startup: {e}"),
        }
        result
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `catalog_source` - where menu documents come from
/// - `host` - permissions, command execution and notices
/// - `presenter` - dialog and form rendering
/// - `scheduler` - main-tick executor
///
/// # Optional
/// - `icons` - defaults to `GenericIconSet`
/// - `settings` - defaults to `EngineSettings::default()`
pub struct AppStateBuilder {
    catalog_source: Option<Arc<dyn CatalogSource>>,
    host: Option<Arc<dyn HostEnvironment>>,
    presenter: Option<Arc<dyn ViewPresenter>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    icons: Option<Arc<dyn IconSet>>,
    settings: EngineSettings,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog_source: None,
            host: None,
            presenter: None,
            scheduler: None,
            icons: None,
            settings: EngineSettings::default(),
        }
    }

    #[must_use]
    pub fn catalog_source(mut self, source: Arc<dyn CatalogSource>) -> Self {
        self.catalog_source = Some(source);
        self
    }

    #[must_use]
    pub fn host(mut self, host: Arc<dyn HostEnvironment>) -> Self {
        self.host = Some(host);
        self
    }

    #[must_use]
    pub fn presenter(mut self, presenter: Arc<dyn ViewPresenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    #[must_use]
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    #[must_use]
    pub fn icons(mut self, icons: Arc<dyn IconSet>) -> Self {
        self.icons = Some(icons);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the `AppState`. The catalog starts empty; call `run_startup`.
    ///
    /// # Errors
    /// Returns `MenuError::Config` if required adapters are missing.
    pub fn build(self) -> MenuResult<AppState> {
        let catalog_source = self
            .catalog_source
            .ok_or_else(|| MenuError::Config("catalog_source is required".to_string()))?;
        let host = self
            .host
            .ok_or_else(|| MenuError::Config("host is required".to_string()))?;
        let presenter = self
            .presenter
            .ok_or_else(|| MenuError::Config("presenter is required".to_string()))?;
        let scheduler = self
            .scheduler
            .ok_or_else(|| MenuError::Config("scheduler is required".to_string()))?;
        let icons = self.icons.unwrap_or_else(|| Arc::new(GenericIconSet));

        let ctx = Arc::new(EngineContext::new(
            host,
            presenter,
            scheduler,
            icons,
            self.settings,
        ));
        let catalog = Arc::new(CatalogService::new(catalog_source));
        let sessions = Arc::new(SessionRegistry::new());

        let coordinator = DispatchCoordinator::new(
            Arc::clone(&ctx),
            Arc::clone(&catalog),
            Arc::clone(&sessions),
        );
        let admin = AdminService::new(Arc::clone(&ctx), Arc::clone(&catalog), Arc::clone(&sessions));

        Ok(AppState {
            ctx,
            catalog,
            sessions,
            coordinator,
            admin,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
