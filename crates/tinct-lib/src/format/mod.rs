//! Formatters: render a finished token sequence for human viewing.
//!
//! Formatters consume consolidated tokens — adjacent same-kind tokens are
//! already merged and empty tokens suppressed. Kinds with an empty short
//! name are rendered without a styling container.

use std::sync::Arc;

use tinct_core::Token;

use crate::Error;
use crate::grammar::Grammar;
use crate::lexer::{Lexer, LexerOptions};

pub mod html;
pub mod terminal;

pub use html::HtmlFormatter;
pub use terminal::TerminalFormatter;

#[cfg(test)]
mod format_tests;

/// Renders a token sequence to a string.
pub trait Formatter {
    fn format(&self, tokens: &[Token]) -> String;
}

/// Emits the raw text with no markup at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFormatter;

impl Formatter for NullFormatter {
    fn format(&self, tokens: &[Token]) -> String {
        tokens.iter().map(|tok| tok.value.as_str()).collect()
    }
}

/// Lex `source` with `grammar` and render the result through `formatter`.
pub fn highlight<F: Formatter>(
    source: &str,
    grammar: Arc<Grammar>,
    formatter: &F,
) -> Result<String, Error> {
    let mut lexer = Lexer::new(grammar, LexerOptions::default());
    let tokens: Vec<Token> = lexer.lex(source)?.collect::<Result<_, _>>()?;
    Ok(formatter.format(&tokens))
}
