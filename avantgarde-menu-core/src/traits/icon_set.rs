//! Icon → glyph lookup

use crate::types::Icon;

/// Maps a material identifier to the glyph prefixed to button labels.
pub trait IconSet: Send + Sync {
    fn glyph(&self, icon: &Icon) -> String;
}

/// Uses the same bullet glyph for every icon.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericIconSet;

impl GenericIconSet {
    pub const GLYPH: &'static str = "▪";
}

impl IconSet for GenericIconSet {
    fn glyph(&self, _icon: &Icon) -> String {
        Self::GLYPH.to_string()
    }
}
