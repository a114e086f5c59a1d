//! Catalog documents read from a plugin data folder
//!
//! Layout:
//! ```text
//! <dir>/main.toml
//! <dir>/submenus/<id>.toml
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use avantgarde_menu_core::error::{MenuError, MenuResult};
use avantgarde_menu_core::traits::{CatalogDocuments, CatalogSource, SourceDocument};
use avantgarde_menu_core::types::MAIN_MENU_ID;

const MAIN_FILE: &str = "main.toml";
const SUBMENU_DIR: &str = "submenus";
const EXTENSION: &str = "toml";

/// Reads `main.toml` and every `submenus/*.toml` on each load.
pub struct FileCatalogSource {
    dir: PathBuf,
}

impl FileCatalogSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_submenus(&self) -> MenuResult<Vec<SourceDocument>> {
        let dir = self.dir.join(SUBMENU_DIR);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No submenu directory at {}", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                paths.push(path);
            }
        }
        // Directory order is platform dependent
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                log::warn!("Skipping submenu file with non UTF-8 name: {}", path.display());
                continue;
            };
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => documents.push(SourceDocument::new(name, text)),
                Err(e) => log::warn!("Skipping unreadable submenu {}: {e}", path.display()),
            }
        }
        Ok(documents)
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load_documents(&self) -> MenuResult<CatalogDocuments> {
        let main_path = self.dir.join(MAIN_FILE);
        let main = tokio::fs::read_to_string(&main_path)
            .await
            .map_err(|e| MenuError::Load {
                document: MAIN_MENU_ID.to_string(),
                reason: format!("cannot read {}: {e}", main_path.display()),
            })?;

        Ok(CatalogDocuments {
            main: SourceDocument::new(MAIN_MENU_ID, main),
            submenus: self.read_submenus().await?,
        })
    }
}
