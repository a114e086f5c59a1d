//! Rich dialog surface: tooltips, escape-to-close, preamble line

use std::sync::Arc;

use crate::error::{MenuError, MenuResult};
use crate::services::renderer::MenuRenderer;
use crate::services::ItemKeyCodec;
use crate::traits::IconSet;
use crate::types::{
    ActivationRef, Menu, MenuItem, NamedColor, RenderElement, RenderedMenu, StyledText,
    SurfaceKind,
};
use crate::utils::markup;

const PREAMBLE: &str = "Select an item below";
const DEFAULT_TOOLTIP: &str = "Click to run";

pub struct RichDialogRenderer {
    icons: Arc<dyn IconSet>,
}

impl RichDialogRenderer {
    #[must_use]
    pub fn new(icons: Arc<dyn IconSet>) -> Self {
        Self { icons }
    }

    fn element(&self, menu_id: &str, item: &MenuItem) -> RenderElement {
        let mut label = StyledText::plain(format!("{} ", self.icons.glyph(&item.icon)));
        label.append(markup::parse(&item.title));

        RenderElement {
            label,
            detail: Some(tooltip(&item.description)),
            activation: ActivationRef::Token(ItemKeyCodec::encode(menu_id, &item.id)),
        }
    }
}

fn tooltip(description: &[String]) -> StyledText {
    if description.is_empty() {
        return StyledText::colored(DEFAULT_TOOLTIP, NamedColor::Gray);
    }
    StyledText::colored(description.join("\n"), NamedColor::Gray)
}

impl MenuRenderer for RichDialogRenderer {
    fn surface(&self) -> SurfaceKind {
        SurfaceKind::RichDialog
    }

    fn render(&self, menu: &Menu, visible: &[&MenuItem]) -> MenuResult<RenderedMenu> {
        if visible.is_empty() {
            return Err(MenuError::NothingAvailable(menu.id.clone()));
        }

        Ok(RenderedMenu {
            menu_id: menu.id.clone(),
            surface: SurfaceKind::RichDialog,
            title: markup::parse(&menu.title),
            body: vec![StyledText::colored(PREAMBLE, NamedColor::Gray)],
            elements: visible
                .iter()
                .map(|item| self.element(&menu.id, item))
                .collect(),
            escape_closes: true,
        })
    }
}
