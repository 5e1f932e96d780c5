//! The token kind hierarchy.
//!
//! Kinds form a static tree rooted at [`TOKEN`]. Every kind carries a dotted
//! qualified name used for lookup and theming (`"String.Double"`) and a short
//! CSS class name used by formatters (`"s2"`). An empty short name means the
//! token text is emitted without a styling container.

use std::fmt;

use serde::{Serialize, Serializer};

/// Static description of one node in the kind tree.
struct KindInfo {
    qualname: &'static str,
    shortname: &'static str,
    parent: Option<TokenKind>,
}

/// A lexical category. Cheap to copy; an index into the static kind table.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenKind(u16);

impl TokenKind {
    #[inline]
    fn info(self) -> &'static KindInfo {
        &TABLE[self.0 as usize]
    }

    /// Dotted qualified name, e.g. `"Keyword.Constant"`.
    #[inline]
    pub fn qualname(self) -> &'static str {
        self.info().qualname
    }

    /// Short CSS class name, e.g. `"kc"`. Empty for unstyled kinds.
    #[inline]
    pub fn shortname(self) -> &'static str {
        self.info().shortname
    }

    /// Parent kind; `None` only for the root.
    #[inline]
    pub fn parent(self) -> Option<TokenKind> {
        self.info().parent
    }

    /// Iterate from this kind up to the root, starting with `self`.
    pub fn ancestors(self) -> Ancestors {
        Ancestors { next: Some(self) }
    }

    /// True if `ancestor` is this kind or one of its transitive parents.
    pub fn is_within(self, ancestor: TokenKind) -> bool {
        self.ancestors().any(|k| k == ancestor)
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualname())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualname())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.qualname())
    }
}

/// Iterator over a kind and its parents, innermost first.
pub struct Ancestors {
    next: Option<TokenKind>,
}

impl Iterator for Ancestors {
    type Item = TokenKind;

    fn next(&mut self) -> Option<TokenKind> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

// The discriminant enum pins each kind to its table index, so constants,
// table rows, and lookup arms cannot drift apart.
macro_rules! token_kinds {
    ($( $konst:ident => $qual:literal, $short:literal, $parent:expr; )*) => {
        #[allow(non_camel_case_types)]
        enum KindId {
            $($konst),*
        }

        $(
            pub const $konst: TokenKind = TokenKind(KindId::$konst as u16);
        )*

        static TABLE: &[KindInfo] = &[
            $(
                KindInfo {
                    qualname: $qual,
                    shortname: $short,
                    parent: $parent,
                },
            )*
        ];

        /// All kinds, in declaration order.
        pub static ALL: &[TokenKind] = &[$($konst),*];

        /// Resolve a kind from its dotted qualified name.
        pub fn from_qualname(name: &str) -> Option<TokenKind> {
            match name {
                $( $qual => Some($konst), )*
                _ => None,
            }
        }
    };
}

token_kinds! {
    TOKEN => "Token", "", None;

    TEXT => "Text", "", Some(TOKEN);
    TEXT_WHITESPACE => "Text.Whitespace", "w", Some(TEXT);

    ERROR => "Error", "err", Some(TOKEN);

    KEYWORD => "Keyword", "k", Some(TOKEN);
    KEYWORD_CONSTANT => "Keyword.Constant", "kc", Some(KEYWORD);
    KEYWORD_DECLARATION => "Keyword.Declaration", "kd", Some(KEYWORD);
    KEYWORD_NAMESPACE => "Keyword.Namespace", "kn", Some(KEYWORD);
    KEYWORD_PSEUDO => "Keyword.Pseudo", "kp", Some(KEYWORD);
    KEYWORD_RESERVED => "Keyword.Reserved", "kr", Some(KEYWORD);
    KEYWORD_TYPE => "Keyword.Type", "kt", Some(KEYWORD);

    NAME => "Name", "n", Some(TOKEN);
    NAME_ATTRIBUTE => "Name.Attribute", "na", Some(NAME);
    NAME_BUILTIN => "Name.Builtin", "nb", Some(NAME);
    NAME_CLASS => "Name.Class", "nc", Some(NAME);
    NAME_CONSTANT => "Name.Constant", "no", Some(NAME);
    NAME_DECORATOR => "Name.Decorator", "nd", Some(NAME);
    NAME_ENTITY => "Name.Entity", "ni", Some(NAME);
    NAME_EXCEPTION => "Name.Exception", "ne", Some(NAME);
    NAME_FUNCTION => "Name.Function", "nf", Some(NAME);
    NAME_NAMESPACE => "Name.Namespace", "nn", Some(NAME);
    NAME_TAG => "Name.Tag", "nt", Some(NAME);
    NAME_VARIABLE => "Name.Variable", "nv", Some(NAME);

    STRING => "String", "s", Some(TOKEN);
    STRING_BACKTICK => "String.Backtick", "sb", Some(STRING);
    STRING_CHAR => "String.Char", "sc", Some(STRING);
    STRING_DOUBLE => "String.Double", "s2", Some(STRING);
    STRING_ESCAPE => "String.Escape", "se", Some(STRING);
    STRING_INTERPOL => "String.Interpol", "si", Some(STRING);
    STRING_REGEX => "String.Regex", "sr", Some(STRING);
    STRING_SINGLE => "String.Single", "s1", Some(STRING);
    STRING_SYMBOL => "String.Symbol", "ss", Some(STRING);

    NUM => "Num", "m", Some(TOKEN);
    NUM_FLOAT => "Num.Float", "mf", Some(NUM);
    NUM_HEX => "Num.Hex", "mh", Some(NUM);
    NUM_INTEGER => "Num.Integer", "mi", Some(NUM);
    NUM_OCT => "Num.Oct", "mo", Some(NUM);

    OPERATOR => "Operator", "o", Some(TOKEN);
    OPERATOR_WORD => "Operator.Word", "ow", Some(OPERATOR);

    PUNCTUATION => "Punctuation", "p", Some(TOKEN);

    COMMENT => "Comment", "c", Some(TOKEN);
    COMMENT_MULTILINE => "Comment.Multiline", "cm", Some(COMMENT);
    COMMENT_PREPROC => "Comment.Preproc", "cp", Some(COMMENT);
    COMMENT_SINGLE => "Comment.Single", "c1", Some(COMMENT);
    COMMENT_SPECIAL => "Comment.Special", "cs", Some(COMMENT);

    GENERIC => "Generic", "g", Some(TOKEN);
    GENERIC_DELETED => "Generic.Deleted", "gd", Some(GENERIC);
    GENERIC_EMPH => "Generic.Emph", "ge", Some(GENERIC);
    GENERIC_ERROR => "Generic.Error", "gr", Some(GENERIC);
    GENERIC_HEADING => "Generic.Heading", "gh", Some(GENERIC);
    GENERIC_INSERTED => "Generic.Inserted", "gi", Some(GENERIC);
    GENERIC_OUTPUT => "Generic.Output", "go", Some(GENERIC);
    GENERIC_PROMPT => "Generic.Prompt", "gp", Some(GENERIC);
    GENERIC_STRONG => "Generic.Strong", "gs", Some(GENERIC);
    GENERIC_SUBHEADING => "Generic.Subheading", "gu", Some(GENERIC);
    GENERIC_TRACEBACK => "Generic.Traceback", "gt", Some(GENERIC);
}
