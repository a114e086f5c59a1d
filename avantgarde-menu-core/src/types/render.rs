//! Surface-neutral rendered menu structure

use serde::{Deserialize, Serialize};

/// Client capability tier the menu is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    /// Rich dialog: tooltips, escape-to-close, body preamble
    RichDialog,
    /// Simplified form: title, one content line, index-addressed buttons
    SimpleForm,
}

/// The sixteen named chat colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    /// Lookup by tag name (`dark_red`, also `grey`)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "black" => Self::Black,
            "dark_blue" => Self::DarkBlue,
            "dark_green" => Self::DarkGreen,
            "dark_aqua" => Self::DarkAqua,
            "dark_red" => Self::DarkRed,
            "dark_purple" => Self::DarkPurple,
            "gold" => Self::Gold,
            "gray" | "grey" => Self::Gray,
            "dark_gray" | "dark_grey" => Self::DarkGray,
            "blue" => Self::Blue,
            "green" => Self::Green,
            "aqua" => Self::Aqua,
            "red" => Self::Red,
            "light_purple" => Self::LightPurple,
            "yellow" => Self::Yellow,
            "white" => Self::White,
            _ => return None,
        })
    }

    /// Lookup by legacy `§` code character
    #[must_use]
    pub fn from_legacy_code(code: char) -> Option<Self> {
        Some(match code.to_ascii_lowercase() {
            '0' => Self::Black,
            '1' => Self::DarkBlue,
            '2' => Self::DarkGreen,
            '3' => Self::DarkAqua,
            '4' => Self::DarkRed,
            '5' => Self::DarkPurple,
            '6' => Self::Gold,
            '7' => Self::Gray,
            '8' => Self::DarkGray,
            '9' => Self::Blue,
            'a' => Self::Green,
            'b' => Self::Aqua,
            'c' => Self::Red,
            'd' => Self::LightPurple,
            'e' => Self::Yellow,
            'f' => Self::White,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextColor {
    Named(NamedColor),
    /// `0xRRGGBB`
    Rgb(u32),
}

/// Display attributes of a span. Italic is off unless requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<TextColor>,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
}

impl TextStyle {
    #[must_use]
    pub fn colored(color: NamedColor) -> Self {
        Self {
            color: Some(TextColor::Named(color)),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
}

/// Text with markup resolved into styled spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyledText {
    pub spans: Vec<Span>,
}

impl StyledText {
    /// Unstyled text
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::default())
    }

    pub fn colored(text: impl Into<String>, color: NamedColor) -> Self {
        Self::styled(text, TextStyle::colored(color))
    }

    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            spans: vec![Span { text, style }],
        }
    }

    /// Append another text, merging adjacent spans of the same style.
    pub fn append(&mut self, other: Self) {
        for span in other.spans {
            match self.spans.last_mut() {
                Some(last) if last.style == span.style => last.text.push_str(&span.text),
                _ => self.spans.push(span),
            }
        }
    }

    /// Text with all styling dropped
    #[must_use]
    pub fn to_plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }
}

/// How a rendering surface reports that an element was activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ActivationRef {
    /// Opaque token produced by `ItemKeyCodec`
    Token(String),
    /// Position in the button list
    Index(usize),
}

/// One interactive element per visible item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderElement {
    pub label: StyledText,
    /// Tooltip; `None` on surfaces without tooltips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<StyledText>,
    pub activation: ActivationRef,
}

/// What a surface adapter turns into a dialog or form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedMenu {
    pub menu_id: String,
    pub surface: SurfaceKind,
    pub title: StyledText,
    pub body: Vec<StyledText>,
    pub elements: Vec<RenderElement>,
    pub escape_closes: bool,
}
