//! Simple form surface for constrained clients
//!
//! Only a title, one content line and an ordered button list. No tooltips:
//! description lines go into the button text. Buttons are addressed by index.

use crate::error::{MenuError, MenuResult};
use crate::services::renderer::MenuRenderer;
use crate::types::{ActivationRef, Menu, MenuItem, RenderElement, RenderedMenu, StyledText, SurfaceKind};

pub struct SimpleFormRenderer;

fn button_text(item: &MenuItem) -> String {
    let mut text = item.title_plain.clone();
    if !item.description.is_empty() {
        text.push('\n');
        text.push_str(&item.description.join("\n"));
    }
    text
}

impl MenuRenderer for SimpleFormRenderer {
    fn surface(&self) -> SurfaceKind {
        SurfaceKind::SimpleForm
    }

    fn render(&self, menu: &Menu, visible: &[&MenuItem]) -> MenuResult<RenderedMenu> {
        if visible.is_empty() {
            return Err(MenuError::NothingAvailable(menu.id.clone()));
        }

        Ok(RenderedMenu {
            menu_id: menu.id.clone(),
            surface: SurfaceKind::SimpleForm,
            title: StyledText::plain(menu.alt_title.clone()),
            body: vec![StyledText::plain(menu.alt_body.clone())],
            elements: visible
                .iter()
                .enumerate()
                .map(|(index, item)| RenderElement {
                    label: StyledText::plain(button_text(item)),
                    detail: None,
                    activation: ActivationRef::Index(index),
                })
                .collect(),
            escape_closes: false,
        })
    }
}
