//! Token values produced by a lexer.

use serde::Serialize;

use crate::kind::TokenKind;

/// One emitted token: a kind plus the slice of input it covers.
///
/// Adjacent tokens of the same kind are consolidated by the engine, so the
/// value may span several rule matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
