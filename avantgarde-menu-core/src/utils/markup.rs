//! Lightweight text markup
//!
//! Supports a subset of the MiniMessage tag syntax (`<red>`, `<#ff8800>`,
//! `<bold>`/`<b>`, `<italic>`/`<i>`, `<underlined>`/`<u>`,
//! `<strikethrough>`/`<st>`, `<obfuscated>`/`<obf>`, `<reset>`, closing tags
//! and `<!bold>` negation) plus legacy `§` codes. Unknown tags are kept as
//! literal text.

use crate::types::{NamedColor, StyledText, TextColor, TextStyle};

const LEGACY_MARKER: char = '§';

/// Parse markup into styled spans.
#[must_use]
pub fn parse(input: &str) -> StyledText {
    let mut out = StyledText::default();
    let mut buf = String::new();
    let mut current = TextStyle::default();
    // (tag name, style in effect before the tag opened)
    let mut open_tags: Vec<(String, TextStyle)> = Vec::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        let after = &rest[c.len_utf8()..];
        match c {
            '\\' if after.starts_with('<') => {
                buf.push('<');
                rest = &after[1..];
            }
            LEGACY_MARKER => {
                if let Some(code) = after.chars().next() {
                    if let Some(next) = apply_legacy(current, code) {
                        flush(&mut out, &mut buf, current);
                        current = next;
                        rest = &after[code.len_utf8()..];
                        continue;
                    }
                }
                buf.push(c);
                rest = after;
            }
            '<' => {
                let Some(end) = after.find('>') else {
                    buf.push(c);
                    rest = after;
                    continue;
                };
                let raw = &after[..end];
                match Tag::parse(raw) {
                    Some(Tag::Reset) => {
                        flush(&mut out, &mut buf, current);
                        current = TextStyle::default();
                        open_tags.clear();
                    }
                    Some(Tag::Open(name)) => match apply_tag(current, &name) {
                        Some(next) => {
                            flush(&mut out, &mut buf, current);
                            open_tags.push((name, current));
                            current = next;
                        }
                        None => {
                            buf.push('<');
                            buf.push_str(raw);
                            buf.push('>');
                        }
                    },
                    Some(Tag::Close(name)) => {
                        if let Some(pos) = open_tags.iter().rposition(|(open, _)| *open == name) {
                            flush(&mut out, &mut buf, current);
                            current = open_tags[pos].1;
                            open_tags.truncate(pos);
                        }
                    }
                    None => {
                        buf.push('<');
                        buf.push_str(raw);
                        buf.push('>');
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                buf.push(c);
                rest = after;
            }
        }
    }

    flush(&mut out, &mut buf, current);
    out
}

/// Markup removed, text kept.
#[must_use]
pub fn strip(input: &str) -> String {
    parse(input).to_plain()
}

enum Tag {
    Open(String),
    Close(String),
    Reset,
}

impl Tag {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.contains(char::is_whitespace) {
            return None;
        }
        if let Some(name) = raw.strip_prefix('/') {
            return (!name.is_empty()).then(|| Self::Close(name.to_ascii_lowercase()));
        }
        let name = raw.to_ascii_lowercase();
        if name == "reset" {
            return Some(Self::Reset);
        }
        Some(Self::Open(name))
    }
}

fn flush(out: &mut StyledText, buf: &mut String, style: TextStyle) {
    if !buf.is_empty() {
        out.append(StyledText::styled(std::mem::take(buf), style));
    }
}

fn apply_tag(mut style: TextStyle, name: &str) -> Option<TextStyle> {
    let (negated, name) = match name.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, name),
    };
    let value = !negated;
    match name {
        "bold" | "b" => style.bold = value,
        "italic" | "i" | "em" => style.italic = value,
        "underlined" | "u" => style.underlined = value,
        "strikethrough" | "st" => style.strikethrough = value,
        "obfuscated" | "obf" => style.obfuscated = value,
        _ if negated => return None,
        _ => {
            let color_name = name
                .strip_prefix("color:")
                .or_else(|| name.strip_prefix("c:"))
                .unwrap_or(name);
            style.color = Some(parse_color(color_name)?);
        }
    }
    Some(style)
}

fn parse_color(name: &str) -> Option<TextColor> {
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 {
            return u32::from_str_radix(hex, 16).ok().map(TextColor::Rgb);
        }
        return None;
    }
    NamedColor::from_name(name).map(TextColor::Named)
}

fn apply_legacy(mut style: TextStyle, code: char) -> Option<TextStyle> {
    if let Some(color) = NamedColor::from_legacy_code(code) {
        // A legacy color code also resets decorations
        return Some(TextStyle::colored(color));
    }
    match code.to_ascii_lowercase() {
        'l' => style.bold = true,
        'o' => style.italic = true,
        'n' => style.underlined = true,
        'm' => style.strikethrough = true,
        'k' => style.obfuscated = true,
        'r' => return Some(TextStyle::default()),
        _ => return None,
    }
    Some(style)
}
