//! Menu rendering for the two client capability tiers

mod rich_dialog;
mod simple_form;

pub use rich_dialog::RichDialogRenderer;
pub use simple_form::SimpleFormRenderer;

use std::sync::Arc;

use crate::error::MenuResult;
use crate::traits::IconSet;
use crate::types::{Menu, MenuItem, RenderedMenu, SurfaceKind};

/// Builds a surface-neutral view from a permission-filtered item list.
///
/// Callers must filter first: a renderer never sees items the viewer cannot
/// use. An empty list is refused with `MenuError::NothingAvailable`.
pub trait MenuRenderer: Send + Sync {
    fn surface(&self) -> SurfaceKind;

    fn render(&self, menu: &Menu, visible: &[&MenuItem]) -> MenuResult<RenderedMenu>;
}

/// One renderer per surface
pub struct RendererSet {
    rich_dialog: RichDialogRenderer,
    simple_form: SimpleFormRenderer,
}

impl RendererSet {
    #[must_use]
    pub fn new(icons: Arc<dyn IconSet>) -> Self {
        Self {
            rich_dialog: RichDialogRenderer::new(icons),
            simple_form: SimpleFormRenderer,
        }
    }

    #[must_use]
    pub fn for_surface(&self, surface: SurfaceKind) -> &dyn MenuRenderer {
        match surface {
            SurfaceKind::RichDialog => &self.rich_dialog,
            SurfaceKind::SimpleForm => &self.simple_form,
        }
    }
}
