//! Test helpers
//!
//! Mock ports and factory functions shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{MenuError, MenuResult};
use crate::services::{
    AdminService, CatalogService, DispatchCoordinator, EngineContext, SessionRegistry,
};
use crate::traits::{
    CatalogDocuments, CatalogSource, GenericIconSet, HostEnvironment, ScheduledTask, Scheduler,
    SourceDocument, Ticks, ViewPresenter,
};
use crate::types::{
    EngineSettings, FlowForm, Icon, Menu, MenuItem, Notice, RenderedMenu, StatusEffect, UserId,
    Viewer,
};

// ===== MockHost =====

pub struct MockHost {
    permissions: Mutex<HashMap<UserId, HashSet<String>>>,
    effects: Mutex<HashSet<(UserId, StatusEffect)>>,
    console: RwLock<Vec<String>>,
    user_commands: RwLock<Vec<(UserId, String)>>,
    notices: RwLock<Vec<(UserId, Notice)>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            permissions: Mutex::new(HashMap::new()),
            effects: Mutex::new(HashSet::new()),
            console: RwLock::new(Vec::new()),
            user_commands: RwLock::new(Vec::new()),
            notices: RwLock::new(Vec::new()),
        }
    }

    pub fn grant(&self, user: &UserId, permission: &str) {
        self.permissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(*user)
            .or_default()
            .insert(permission.to_string());
    }

    /// Menu use plus the admin item permission of [`main_document`]
    pub fn grant_default(&self, user: &UserId) {
        self.grant(user, "avantgardemenu.use");
        self.grant(user, "menu.admin");
    }

    pub fn revoke(&self, user: &UserId, permission: &str) {
        if let Some(granted) = self
            .permissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(user)
        {
            granted.remove(permission);
        }
    }

    pub async fn console_commands(&self) -> Vec<String> {
        self.console.read().await.clone()
    }

    pub async fn user_commands(&self) -> Vec<(UserId, String)> {
        self.user_commands.read().await.clone()
    }

    pub async fn notices_for(&self, user: &UserId) -> Vec<Notice> {
        self.notices
            .read()
            .await
            .iter()
            .filter(|(u, _)| u == user)
            .map(|(_, n)| n.clone())
            .collect()
    }
}

#[async_trait]
impl HostEnvironment for MockHost {
    async fn has_permission(&self, user: &UserId, permission: &str) -> bool {
        self.permissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user)
            .is_some_and(|granted| granted.contains(permission))
    }

    async fn execute_as_console(&self, command: &str) {
        self.console.write().await.push(command.to_string());
    }

    async fn execute_as_user(&self, user: &UserId, command: &str) {
        self.user_commands
            .write()
            .await
            .push((*user, command.to_string()));
    }

    async fn toggle_effect(&self, user: &UserId, effect: StatusEffect) -> bool {
        let mut effects = self.effects.lock().unwrap_or_else(PoisonError::into_inner);
        if effects.remove(&(*user, effect)) {
            false
        } else {
            effects.insert((*user, effect));
            true
        }
    }

    async fn send_notice(&self, user: &UserId, notice: Notice) {
        self.notices.write().await.push((*user, notice));
    }
}

// ===== RecordingPresenter =====

pub struct RecordingPresenter {
    menus: RwLock<Vec<(UserId, RenderedMenu)>>,
    forms: RwLock<Vec<(UserId, FlowForm)>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self {
            menus: RwLock::new(Vec::new()),
            forms: RwLock::new(Vec::new()),
        }
    }

    pub async fn menus(&self) -> Vec<RenderedMenu> {
        self.menus.read().await.iter().map(|(_, m)| m.clone()).collect()
    }

    pub async fn last_menu(&self) -> Option<RenderedMenu> {
        self.menus.read().await.last().map(|(_, m)| m.clone())
    }

    pub async fn forms(&self) -> Vec<FlowForm> {
        self.forms.read().await.iter().map(|(_, f)| f.clone()).collect()
    }
}

#[async_trait]
impl ViewPresenter for RecordingPresenter {
    async fn show_menu(&self, user: &UserId, menu: RenderedMenu) {
        self.menus.write().await.push((*user, menu));
    }

    async fn show_form(&self, user: &UserId, form: FlowForm) {
        self.forms.write().await.push((*user, form));
    }
}

// ===== FakeScheduler =====

/// Records scheduled tasks instead of running them.
pub struct FakeScheduler {
    tasks: Mutex<Vec<(Ticks, ScheduledTask)>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn scheduled(&self) -> Vec<(Ticks, ScheduledTask)> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Command lines of the scheduled tasks, in posting order
    pub fn commands(&self) -> Vec<String> {
        self.scheduled()
            .iter()
            .filter_map(|(_, task)| task.command().map(str::to_string))
            .collect()
    }
}

impl Scheduler for FakeScheduler {
    fn schedule(&self, task: ScheduledTask, delay: Ticks) {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((delay, task));
    }
}

// ===== InMemoryCatalogSource =====

pub struct InMemoryCatalogSource {
    main: RwLock<SourceDocument>,
    submenus: RwLock<Vec<SourceDocument>>,
    /// If Some, load_documents fails with this message
    fail: RwLock<Option<String>>,
}

impl InMemoryCatalogSource {
    pub fn new(main: SourceDocument, submenus: Vec<SourceDocument>) -> Self {
        Self {
            main: RwLock::new(main),
            submenus: RwLock::new(submenus),
            fail: RwLock::new(None),
        }
    }

    pub async fn set_main(&self, main: SourceDocument) {
        *self.main.write().await = main;
    }

    pub async fn set_submenus(&self, submenus: Vec<SourceDocument>) {
        *self.submenus.write().await = submenus;
    }

    pub async fn set_fail(&self, message: Option<String>) {
        *self.fail.write().await = message;
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn load_documents(&self) -> MenuResult<CatalogDocuments> {
        if let Some(ref message) = *self.fail.read().await {
            return Err(MenuError::Io(message.clone()));
        }
        Ok(CatalogDocuments {
            main: self.main.read().await.clone(),
            submenus: self.submenus.read().await.clone(),
        })
    }
}

// ===== Engine =====

pub struct TestEngine {
    pub host: Arc<MockHost>,
    pub presenter: Arc<RecordingPresenter>,
    pub scheduler: Arc<FakeScheduler>,
    pub source: Arc<InMemoryCatalogSource>,
    pub catalog: Arc<CatalogService>,
    pub coordinator: DispatchCoordinator,
    pub admin: AdminService,
    /// Holds no permissions until granted
    pub viewer: Viewer,
}

/// Fully wired engine over mock ports; the catalog is not loaded yet.
pub fn test_engine(source: InMemoryCatalogSource) -> TestEngine {
    let host = Arc::new(MockHost::new());
    let presenter = Arc::new(RecordingPresenter::new());
    let scheduler = Arc::new(FakeScheduler::new());
    let source = Arc::new(source);

    let ctx = Arc::new(EngineContext::new(
        Arc::clone(&host) as Arc<dyn HostEnvironment>,
        Arc::clone(&presenter) as Arc<dyn ViewPresenter>,
        Arc::clone(&scheduler) as Arc<dyn Scheduler>,
        Arc::new(GenericIconSet),
        EngineSettings::default(),
    ));
    let catalog = Arc::new(CatalogService::new(
        Arc::clone(&source) as Arc<dyn CatalogSource>
    ));
    let sessions = Arc::new(SessionRegistry::new());

    TestEngine {
        coordinator: DispatchCoordinator::new(
            Arc::clone(&ctx),
            Arc::clone(&catalog),
            Arc::clone(&sessions),
        ),
        admin: AdminService::new(ctx, Arc::clone(&catalog), sessions),
        host,
        presenter,
        scheduler,
        source,
        catalog,
        viewer: Viewer::new(UserId::random(), "Alice"),
    }
}

// ===== Factories =====

/// Main document: spawn, shop (submenu), `vip_lounge` (menu.vip),
/// ban (menu.admin), mapart, nightvision.
pub fn main_document() -> SourceDocument {
    SourceDocument::new(
        "main",
        r#"
[menu]
title = "<aqua><bold>Main Menu"
alt-title = "Main Menu"
alt-body = "Select an item from the menu"

[menu.items.spawn]
title = "<green>Spawn"
icon = "ENDER_PEARL"
description = ["Back to spawn"]
command = "[player]spawn"

[menu.items.shop]
title = "<gold>Shop"
icon = "CHEST"
submenu = "shop"

[menu.items.vip_lounge]
title = "<light_purple>VIP lounge"
command = "[player]warp vip"
permission = "menu.vip"

[menu.items.ban]
title = "<dark_red>Ban"
icon = "BARRIER"
command = "[special]admin_ban"
permission = "menu.admin"

[menu.items.mapart]
title = "Map art"
icon = "FILLED_MAP"
command = "[special]tomap_dialog"

[menu.items.nightvision]
title = "Night vision"
icon = "GOLDEN_CARROT"
command = "[special]nightvision_toggle"
"#,
    )
}

/// Submenu `shop`: a back button and a console give.
pub fn submenu_document() -> SourceDocument {
    SourceDocument::new(
        "shop",
        r#"
[menu]
title = "<gold>Shop"

[menu.items.back]
title = "Back"
icon = "ARROW"
command = "[special]back"
order = 99

[menu.items.sword]
title = "<aqua>Diamond sword"
icon = "DIAMOND_SWORD"
command = "[console]give %player% diamond_sword 1"
"#,
    )
}

pub fn item(id: &str, command: Option<&str>) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        title: id.to_string(),
        title_plain: id.to_string(),
        icon: Icon::default(),
        description: Vec::new(),
        command: command.map(str::to_string),
        submenu: None,
        permission: None,
        order: 0,
    }
}

pub fn menu_with(id: &str, items: Vec<MenuItem>) -> Menu {
    Menu {
        id: id.to_string(),
        title: id.to_string(),
        alt_title: id.to_string(),
        alt_body: String::new(),
        items,
    }
}
