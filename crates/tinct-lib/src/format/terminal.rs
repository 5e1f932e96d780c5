//! ANSI terminal formatter: 24-bit SGR runs per styled token.

use std::fmt::Write;

use tinct_core::{Theme, Token};

use super::Formatter;

/// Renders tokens with ANSI escape sequences from a theme's styles.
/// Unstyled tokens pass through untouched.
pub struct TerminalFormatter {
    theme: &'static Theme,
}

impl TerminalFormatter {
    pub fn new(theme: &'static Theme) -> Self {
        Self { theme }
    }
}

impl Formatter for TerminalFormatter {
    fn format(&self, tokens: &[Token]) -> String {
        let mut out = String::new();
        for token in tokens {
            let style = self.theme.style_for(token.kind);
            match style {
                Some(style) if !style.is_plain() => {
                    let mut codes: Vec<String> = Vec::new();
                    if style.bold {
                        codes.push("1".to_string());
                    }
                    if style.italic {
                        codes.push("3".to_string());
                    }
                    if style.underline {
                        codes.push("4".to_string());
                    }
                    if let Some(fg) = style.fg {
                        codes.push(format!("38;2;{};{};{}", fg.r, fg.g, fg.b));
                    }
                    if let Some(bg) = style.bg {
                        codes.push(format!("48;2;{};{};{}", bg.r, bg.g, bg.b));
                    }
                    if codes.is_empty() {
                        out.push_str(&token.value);
                    } else {
                        let _ = write!(out, "\x1b[{}m{}\x1b[0m", codes.join(";"), token.value);
                    }
                }
                _ => out.push_str(&token.value),
            }
        }
        out
    }
}
