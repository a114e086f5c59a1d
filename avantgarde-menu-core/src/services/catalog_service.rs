//! Menu catalog: immutable snapshots and atomic reload

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{MenuError, MenuResult};
use crate::services::catalog_document::{parse_menu, LoadWarning};
use crate::services::ItemKeyCodec;
use crate::traits::{CatalogDocuments, CatalogSource};
use crate::types::{Menu, MAIN_MENU_ID};

/// One fully-built, read-only catalog.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    main: Menu,
    submenus: BTreeMap<String, Menu>,
    generation: u64,
    loaded_at: DateTime<Utc>,
}

impl MenuCatalog {
    /// Catalog with an empty main menu, used before the first load.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            main: Menu {
                id: MAIN_MENU_ID.to_string(),
                title: "Menu".to_string(),
                alt_title: "Menu".to_string(),
                alt_body: String::new(),
                items: Vec::new(),
            },
            submenus: BTreeMap::new(),
            generation: 0,
            loaded_at: Utc::now(),
        }
    }

    /// Build a catalog from raw documents.
    ///
    /// The main document must parse; a broken submenu document is skipped and
    /// reported in the returned warnings.
    pub fn build(
        documents: &CatalogDocuments,
        generation: u64,
    ) -> MenuResult<(Self, Vec<LoadWarning>)> {
        let mut warnings = Vec::new();
        let main = parse_menu(MAIN_MENU_ID, &documents.main, &mut warnings)?;

        let mut submenus = BTreeMap::new();
        for document in &documents.submenus {
            let id = document.name.trim();
            if !ItemKeyCodec::is_valid_menu_id(id) {
                warnings.push(skip_warning(
                    &document.name,
                    "invalid submenu id (empty, reserved, or contains '_' or ':')",
                ));
                continue;
            }
            if submenus.contains_key(id) {
                warnings.push(skip_warning(&document.name, "duplicate submenu id"));
                continue;
            }
            match parse_menu(id, document, &mut warnings) {
                Ok(menu) => {
                    submenus.insert(id.to_string(), menu);
                }
                Err(e) => warnings.push(skip_warning(&document.name, &e.to_string())),
            }
        }

        let catalog = Self {
            main,
            submenus,
            generation,
            loaded_at: Utc::now(),
        };
        catalog.check_submenu_links(&mut warnings);
        Ok((catalog, warnings))
    }

    /// The main menu
    #[must_use]
    pub fn lookup_main(&self) -> &Menu {
        &self.main
    }

    /// A submenu by id
    pub fn lookup_submenu(&self, id: &str) -> MenuResult<&Menu> {
        self.submenus
            .get(id)
            .ok_or_else(|| MenuError::MenuNotFound(id.to_string()))
    }

    /// Main menu or submenu
    pub fn lookup(&self, id: &str) -> MenuResult<&Menu> {
        if id == MAIN_MENU_ID {
            Ok(&self.main)
        } else {
            self.lookup_submenu(id)
        }
    }

    #[must_use]
    pub fn submenu_ids(&self) -> Vec<&str> {
        self.submenus.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn submenu_count(&self) -> usize {
        self.submenus.len()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    fn menus(&self) -> impl Iterator<Item = &Menu> {
        std::iter::once(&self.main).chain(self.submenus.values())
    }

    fn check_submenu_links(&self, warnings: &mut Vec<LoadWarning>) {
        for menu in self.menus() {
            for item in &menu.items {
                if let Some(target) = &item.submenu {
                    if self.lookup(target).is_err() {
                        warnings.push(LoadWarning {
                            document: menu.id.clone(),
                            message: format!(
                                "item '{}' links to unknown submenu '{target}'",
                                item.id
                            ),
                        });
                    }
                }
            }
        }
    }
}

fn skip_warning(document: &str, reason: &str) -> LoadWarning {
    LoadWarning {
        document: document.to_string(),
        message: format!("document skipped: {reason}"),
    }
}

/// Summary of a successful reload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,
    /// Number of submenu documents that loaded
    pub submenus_loaded: usize,
    pub main_items: usize,
    pub warnings: Vec<LoadWarning>,
}

/// Holder of the current catalog snapshot
///
/// Readers clone the `Arc` and keep using it even if a reload swaps in a
/// newer catalog meanwhile.
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    current: RwLock<Arc<MenuCatalog>>,
    generation: AtomicU64,
}

impl CatalogService {
    /// Create a catalog service holding an empty catalog
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(MenuCatalog::empty())),
            generation: AtomicU64::new(0),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<MenuCatalog> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Read every document and swap in the new catalog.
    ///
    /// On error the previous catalog stays in place untouched.
    pub async fn reload(&self) -> MenuResult<LoadReport> {
        let documents = self.source.load_documents().await?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (catalog, warnings) = match MenuCatalog::build(&documents, generation) {
            Ok(built) => built,
            Err(e) => {
                log::error!("Catalog reload failed, keeping previous catalog: {e}");
                return Err(e);
            }
        };

        for warning in &warnings {
            log::warn!("[{}] {}", warning.document, warning.message);
        }

        let report = LoadReport {
            generation,
            loaded_at: catalog.loaded_at,
            submenus_loaded: catalog.submenu_count(),
            main_items: catalog.main.items.len(),
            warnings,
        };

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);
        log::info!(
            "Catalog generation {generation} loaded: {} main items, {} submenus",
            report.main_items,
            report.submenus_loaded
        );
        Ok(report)
    }
}
