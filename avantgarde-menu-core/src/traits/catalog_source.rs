//! Catalog document source abstract Trait

use async_trait::async_trait;

use crate::error::MenuResult;

/// A raw configuration document, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Document name; for submenus this becomes the menu id
    pub name: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Everything needed to build one catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDocuments {
    pub main: SourceDocument,
    pub submenus: Vec<SourceDocument>,
}

/// Where menu documents come from
///
/// Platform implementation:
/// - Plugin data folder: `FileCatalogSource` (one main file + `submenus/*.toml`)
/// - Tests: in-memory documents
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read all documents
    ///
    /// Failure to produce the main document is fatal for a reload;
    /// individual submenu documents are validated later by the catalog.
    async fn load_documents(&self) -> MenuResult<CatalogDocuments>;
}
