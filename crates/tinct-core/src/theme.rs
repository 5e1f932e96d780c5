//! Themes: token kind → style tables with hierarchical fallback.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::kind::TokenKind;
use crate::style::{Color, Style};

/// A named style table.
///
/// Lookup walks up the kind hierarchy: a kind with no style of its own
/// inherits the nearest styled ancestor (`String.Double` falls back to
/// `String`, then to the root, then to nothing).
pub struct Theme {
    name: &'static str,
    background: Option<Color>,
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            background: None,
            styles: HashMap::new(),
        }
    }

    pub fn background(mut self, hex: &str) -> Self {
        self.background = Color::from_hex(hex);
        self
    }

    /// Attach a directive string to a qualified kind name.
    pub fn style(mut self, qualname: &'static str, directives: &str) -> Self {
        self.styles.insert(qualname, Style::parse(directives));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background
    }

    /// The style for `kind`, or for its nearest styled ancestor.
    pub fn style_for(&self, kind: TokenKind) -> Option<&Style> {
        kind.ancestors()
            .find_map(|k| self.styles.get(k.qualname()))
    }
}

/// A black-and-white theme: emphasis only, no colors.
pub fn bw() -> &'static Theme {
    static BW: LazyLock<Theme> = LazyLock::new(|| {
        Theme::new("bw")
            .background("#ffffff")
            .style("Comment", "italic")
            .style("Comment.Preproc", "noitalic")
            .style("Keyword", "bold")
            .style("Keyword.Pseudo", "nobold")
            .style("Keyword.Type", "nobold")
            .style("Operator.Word", "bold")
            .style("Name.Class", "bold")
            .style("Name.Namespace", "bold")
            .style("Name.Exception", "bold")
            .style("Name.Entity", "bold")
            .style("Name.Tag", "bold")
            .style("String", "italic")
            .style("Generic.Heading", "bold")
            .style("Generic.Subheading", "bold")
            .style("Generic.Emph", "italic")
            .style("Generic.Strong", "bold")
            .style("Generic.Prompt", "bold")
            .style("Error", "border:#FF0000")
    });
    &BW
}

/// A dark color theme.
pub fn aurora() -> &'static Theme {
    static AURORA: LazyLock<Theme> = LazyLock::new(|| {
        Theme::new("aurora")
            .background("#1c1e26")
            .style("Text", "#d8dee9")
            .style("Text.Whitespace", "#3b4252")
            .style("Comment", "italic #616e88")
            .style("Comment.Preproc", "noitalic #5e81ac")
            .style("Keyword", "bold #b48ead")
            .style("Keyword.Constant", "nobold #b48ead")
            .style("Keyword.Type", "nobold #8fbcbb")
            .style("Operator", "#81a1c1")
            .style("Operator.Word", "bold #81a1c1")
            .style("Punctuation", "#eceff4")
            .style("Name", "#d8dee9")
            .style("Name.Attribute", "#8fbcbb")
            .style("Name.Builtin", "#88c0d0")
            .style("Name.Class", "bold #8fbcbb")
            .style("Name.Constant", "#ebcb8b")
            .style("Name.Entity", "#d08770")
            .style("Name.Function", "#88c0d0")
            .style("Name.Namespace", "bold #8fbcbb")
            .style("Name.Tag", "bold #81a1c1")
            .style("Name.Variable", "#d8dee9")
            .style("String", "#a3be8c")
            .style("String.Interpol", "#d08770")
            .style("String.Escape", "#ebcb8b")
            .style("Num", "#b48ead")
            .style("Generic.Heading", "bold #88c0d0")
            .style("Generic.Subheading", "bold #88c0d0")
            .style("Generic.Emph", "italic")
            .style("Generic.Strong", "bold")
            .style("Generic.Deleted", "#bf616a")
            .style("Generic.Inserted", "#a3be8c")
            .style("Error", "border:#bf616a #bf616a")
    });
    &AURORA
}

/// All builtin themes.
pub fn all() -> Vec<&'static Theme> {
    vec![bw(), aurora()]
}

/// Find a builtin theme by name.
pub fn find(name: &str) -> Option<&'static Theme> {
    all().into_iter().find(|t| t.name() == name)
}
