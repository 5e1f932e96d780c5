//! Style directives attached to token kinds by themes.

use std::fmt;

use serde::Serialize;

/// An sRGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex literal.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A set of rendering directives for one token kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub border: Option<Color>,
}

impl Style {
    /// Parse a compact whitespace-separated directive string, e.g.
    /// `"bold italic #336699"` or `"border:#FF0000"`.
    ///
    /// Recognized words: `bold`, `nobold`, `italic`, `noitalic`, `underline`,
    /// `#RRGGBB` (foreground), `bg:#RRGGBB`, `border:#RRGGBB`. Unknown words
    /// are ignored so theme tables stay forward-compatible.
    pub fn parse(directives: &str) -> Self {
        let mut style = Self::default();
        for word in directives.split_whitespace() {
            match word {
                "bold" => style.bold = true,
                "nobold" => style.bold = false,
                "italic" => style.italic = true,
                "noitalic" => style.italic = false,
                "underline" => style.underline = true,
                _ => {
                    if let Some(hex) = word.strip_prefix("bg:") {
                        style.bg = Color::from_hex(hex);
                    } else if let Some(hex) = word.strip_prefix("border:") {
                        style.border = Color::from_hex(hex);
                    } else if word.starts_with('#') {
                        style.fg = Color::from_hex(word);
                    }
                }
            }
        }
        style
    }

    /// True if the style would not change the rendering at all.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Render as CSS declarations, e.g. for inline `style=` attributes.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if self.bold {
            css.push_str("font-weight: bold;");
        }
        if self.italic {
            css.push_str("font-style: italic;");
        }
        if self.underline {
            css.push_str("text-decoration: underline;");
        }
        if let Some(fg) = self.fg {
            css.push_str(&format!("color: {fg};"));
        }
        if let Some(bg) = self.bg {
            css.push_str(&format!("background-color: {bg};"));
        }
        if let Some(border) = self.border {
            css.push_str(&format!("border: 1px solid {border};"));
        }
        css
    }
}
