//! Shared fakes for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use avantgarde_menu_core::traits::{HostEnvironment, ViewPresenter};
use avantgarde_menu_core::types::{
    FlowForm, Notice, RenderedMenu, StatusEffect, UserId, Viewer,
};

pub const MAIN_TOML: &str = r#"
[menu]
title = "<aqua><bold>Main Menu"
alt-title = "Main Menu"
alt-body = "Select an item from the menu"

[menu.items.shop]
title = "<gold>Shop"
icon = "CHEST"
submenu = "shop"

[menu.items.ban]
title = "<dark_red>Ban"
icon = "BARRIER"
command = "[special]admin_ban"
permission = "menu.admin"
"#;

pub const SHOP_TOML: &str = r#"
[menu]
title = "<gold>Shop"

[menu.items.back]
title = "Back"
command = "[special]back"
order = 99

[menu.items.sword]
title = "<aqua>Diamond sword"
icon = "DIAMOND_SWORD"
command = "[console]give %player% diamond_sword 1"
"#;

/// Write `main.toml` plus one `submenus/<name>.toml` per entry.
pub fn write_catalog(dir: &Path, main: &str, submenus: &[(&str, &str)]) {
    std::fs::write(dir.join("main.toml"), main).expect("write main.toml");
    let submenu_dir = dir.join("submenus");
    std::fs::create_dir_all(&submenu_dir).expect("create submenus dir");
    for (name, text) in submenus {
        std::fs::write(submenu_dir.join(format!("{name}.toml")), text).expect("write submenu");
    }
}

pub fn alice() -> Viewer {
    Viewer::new(UserId::random(), "Alice")
}

// ===== Host =====

/// Host that grants a fixed permission set and records every side effect.
#[derive(Default)]
pub struct RecordingHost {
    granted: Mutex<HashSet<String>>,
    console: Mutex<Vec<String>>,
    user_commands: Mutex<Vec<(UserId, String)>>,
    notices: Mutex<Vec<(UserId, Notice)>>,
}

impl RecordingHost {
    pub fn with_permissions(permissions: &[&str]) -> Self {
        let host = Self::default();
        host.granted
            .lock()
            .unwrap()
            .extend(permissions.iter().map(ToString::to_string));
        host
    }

    pub fn console(&self) -> Vec<String> {
        self.console.lock().unwrap().clone()
    }

    pub fn user_commands(&self) -> Vec<(UserId, String)> {
        self.user_commands.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|(_, n)| n.clone())
            .collect()
    }
}

#[async_trait]
impl HostEnvironment for RecordingHost {
    async fn has_permission(&self, _user: &UserId, permission: &str) -> bool {
        self.granted.lock().unwrap().contains(permission)
    }

    async fn execute_as_console(&self, command: &str) {
        self.console.lock().unwrap().push(command.to_string());
    }

    async fn execute_as_user(&self, user: &UserId, command: &str) {
        self.user_commands
            .lock()
            .unwrap()
            .push((*user, command.to_string()));
    }

    async fn toggle_effect(&self, _user: &UserId, _effect: StatusEffect) -> bool {
        true
    }

    async fn send_notice(&self, user: &UserId, notice: Notice) {
        self.notices.lock().unwrap().push((*user, notice));
    }
}

// ===== Presenter =====

#[derive(Default)]
pub struct RecordingPresenter {
    menus: Mutex<Vec<RenderedMenu>>,
    forms: Mutex<Vec<FlowForm>>,
}

impl RecordingPresenter {
    pub fn menus(&self) -> Vec<RenderedMenu> {
        self.menus.lock().unwrap().clone()
    }

    pub fn last_menu(&self) -> Option<RenderedMenu> {
        self.menus.lock().unwrap().last().cloned()
    }

    pub fn forms(&self) -> Vec<FlowForm> {
        self.forms.lock().unwrap().clone()
    }
}

#[async_trait]
impl ViewPresenter for RecordingPresenter {
    async fn show_menu(&self, _user: &UserId, menu: RenderedMenu) {
        self.menus.lock().unwrap().push(menu);
    }

    async fn show_form(&self, _user: &UserId, form: FlowForm) {
        self.forms.lock().unwrap().push(form);
    }
}
