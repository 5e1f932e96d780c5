//! tinct: a stateful regex lexing engine for syntax highlighting.
//!
//! Grammars are pure data: named states holding prioritized pattern→action
//! rules, composable through mixins, inheritance, and prepend/append. The
//! engine drives an explicit state stack over the input and yields a lazy,
//! consolidated stream of `(kind, text)` tokens; malformed source never
//! fails the lex — unmatched characters surface as `Error`-kind tokens.
//!
//! # Example
//!
//! ```
//! use tinct_core::kind;
//! use tinct_lib::grammar::Grammar;
//! use tinct_lib::lexer::{Lexer, LexerOptions};
//!
//! let grammar = Grammar::builder("digits")
//!     .state("root", |s| {
//!         s.rule(r"\d+", kind::NUM_INTEGER);
//!         s.rule(r"\s+", kind::TEXT_WHITESPACE);
//!     })
//!     .build();
//!
//! let mut lexer = Lexer::new(grammar, LexerOptions::default());
//! let tokens = lexer.lex("12 34")?.collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].kind, kind::NUM_INTEGER);
//! # Ok::<(), tinct_lib::Error>(())
//! ```

pub mod analyzer;
pub mod format;
pub mod grammar;
pub mod lexer;
pub mod registry;

pub use analyzer::TextAnalyzer;
pub use format::{Formatter, HtmlFormatter, NullFormatter, TerminalFormatter, highlight};
pub use grammar::{Grammar, GrammarBuilder, plain_text};
pub use lexer::{Ctx, Lexer, LexerOptions, NoopTracer, PrintTracer, Tokens, Tracer};
pub use registry::{GuessInput, Registry};


/// Errors raised by engine configuration and usage. Malformed *source text*
/// is never an error: it is absorbed as `Error`-kind tokens in the stream.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Input bytes are not valid UTF-8. Raised before any output.
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The requested grammar tag or alias is not registered.
    #[error("unknown grammar: {0}")]
    UnknownGrammar(String),

    /// A mixin, push, goto, or root referenced an undefined state.
    #[error("unknown state: {0}")]
    UnknownState(String),

    /// The state stack was popped to empty or its top accessed while empty.
    /// Indicates a malformed grammar definition; aborts the lex.
    #[error("state stack is empty")]
    EmptyStack,

    /// `delegate_parent` on a grammar with no parent configured.
    #[error("grammar {0:?} has no parent grammar configured")]
    MissingParent(String),

    /// Strict guessing narrowed the candidates but several remain tied.
    #[error("ambiguous grammar guess: {}", .candidates.join(", "))]
    AmbiguousGrammar { candidates: Vec<String> },

    /// Strict guessing found no signal distinguishing any grammar.
    #[error("no grammar matched the given signals")]
    NoGrammarMatched,
}
