//! HTML formatter: `<span>` wrappers keyed by token kind short names.

use tinct_core::{Theme, Token, kind};

use super::Formatter;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Renders tokens as spans with short-name CSS classes, optionally wrapped
/// in `<pre class="…"><code>` and optionally numbered in a two-column table.
///
/// With an inline theme, spans carry `style=` attributes instead of classes,
/// for outputs where no stylesheet is available.
pub struct HtmlFormatter {
    css_class: String,
    nowrap: bool,
    line_numbers: bool,
    start_line: usize,
    inline_theme: Option<&'static Theme>,
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self {
            css_class: "highlight".to_string(),
            nowrap: false,
            line_numbers: false,
            start_line: 1,
            inline_theme: None,
        }
    }
}

impl HtmlFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn css_class(mut self, css_class: &str) -> Self {
        self.css_class = css_class.to_string();
        self
    }

    /// Skip the wrapping `<pre><code>` (or `<div>`) container.
    pub fn nowrap(mut self, nowrap: bool) -> Self {
        self.nowrap = nowrap;
        self
    }

    /// Render a line-number column in a table layout.
    pub fn line_numbers(mut self, line_numbers: bool) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    pub fn start_line(mut self, start_line: usize) -> Self {
        self.start_line = start_line;
        self
    }

    /// Inline the given theme's styles instead of emitting CSS classes.
    pub fn inline_theme(mut self, theme: &'static Theme) -> Self {
        self.inline_theme = Some(theme);
        self
    }

    fn span(&self, token: &Token, out: &mut String) {
        let shortname = token.kind.shortname();
        if shortname.is_empty() {
            escape_html(&token.value, out);
            return;
        }
        match self.inline_theme {
            Some(theme) => match theme.style_for(token.kind) {
                Some(style) if !style.is_plain() => {
                    out.push_str("<span style=\"");
                    out.push_str(&style.to_css());
                    out.push_str("\">");
                    escape_html(&token.value, out);
                    out.push_str("</span>");
                }
                _ => escape_html(&token.value, out),
            },
            None => {
                out.push_str("<span class=\"");
                out.push_str(shortname);
                out.push_str("\">");
                escape_html(&token.value, out);
                out.push_str("</span>");
            }
        }
    }

    fn render_plain(&self, tokens: &[Token]) -> String {
        let mut html = String::new();
        if !self.nowrap {
            html.push_str(&format!("<pre class=\"{}\"><code>", self.css_class));
        }
        for token in tokens {
            self.span(token, &mut html);
        }
        if !self.nowrap {
            html.push_str("</code></pre>\n");
        }
        html
    }

    fn render_numbered(&self, tokens: &[Token]) -> String {
        let mut rendered = String::new();
        let mut newlines = 0;
        for token in tokens {
            newlines += token.value.matches('\n').count();
            self.span(token, &mut rendered);
        }

        // A non-newline-terminated final line still gets a number; close it
        // with a synthesized whitespace token.
        let terminated = tokens
            .last()
            .is_none_or(|tok| tok.value.ends_with('\n'));
        let lines = if terminated { newlines } else { newlines + 1 };
        if !terminated {
            self.span(&Token::new(kind::TEXT_WHITESPACE, "\n"), &mut rendered);
        }

        let numbers: Vec<String> = (self.start_line..self.start_line + lines)
            .map(|n| n.to_string())
            .collect();

        let mut html = String::new();
        if !self.nowrap {
            html.push_str(&format!("<div class=\"{}\">\n", self.css_class));
        }
        html.push_str("<table><tbody>\n");
        html.push_str("<td class=\"linenos\"><pre>");
        html.push_str(&numbers.join("\n"));
        html.push_str("</pre></td>\n");
        html.push_str("<td class=\"lines\"><pre><code>");
        html.push_str(&rendered);
        html.push_str("</code></pre></td>\n");
        html.push_str("</tbody></table>\n");
        if !self.nowrap {
            html.push_str("</div>\n");
        }
        html
    }
}

impl Formatter for HtmlFormatter {
    fn format(&self, tokens: &[Token]) -> String {
        if self.line_numbers {
            self.render_numbered(tokens)
        } else {
            self.render_plain(tokens)
        }
    }
}
