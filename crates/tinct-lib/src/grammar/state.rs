//! Built states: ordered rules and mixin references.

use std::fmt;
use std::sync::Arc;

use tinct_core::TokenKind;

use crate::Error;
use crate::lexer::Ctx;

use super::pattern::Pattern;

/// A grammar-supplied rule callback. Receives an explicit handle to the
/// current match, the emission sink, and the state stack.
pub type Callback = dyn Fn(&mut Ctx<'_, '_>) -> Result<(), Error> + Send + Sync;

/// What to do when a rule's pattern matches.
pub enum Action {
    /// Emit the whole match as one token.
    Emit(TokenKind),
    /// Emit, then push the named state.
    EmitPush(TokenKind, String),
    /// Emit, then push another copy of the current top state.
    EmitPushSelf(TokenKind),
    /// Emit, then pop one state.
    EmitPop(TokenKind),
    /// Emit capture groups 1..=N with the paired kinds.
    Groups(Vec<TokenKind>),
    /// Run grammar-defined logic.
    Callback(Arc<Callback>),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Emit(kind) => write!(f, "Emit({kind:?})"),
            Action::EmitPush(kind, state) => write!(f, "EmitPush({kind:?}, {state:?})"),
            Action::EmitPushSelf(kind) => write!(f, "EmitPushSelf({kind:?})"),
            Action::EmitPop(kind) => write!(f, "EmitPop({kind:?})"),
            Action::Groups(kinds) => write!(f, "Groups({kinds:?})"),
            Action::Callback(_) => write!(f, "Callback"),
        }
    }
}

/// A pattern/action pair. Immutable once built; owned by its state.
pub struct Rule {
    pub(crate) pattern: Pattern,
    pub(crate) action: Action,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({:?})", self.pattern.source())
    }
}

/// One entry of a state, tried in declaration order.
#[derive(Debug)]
pub enum Entry {
    Rule(Rule),
    /// Try another state's rules at this point, depth-first. Held by name and
    /// resolved through the grammar's state table at match time, so mutually
    /// referencing states are representable.
    Mixin(String),
}

/// A named, ordered rule list. Built once per grammar and shared read-only.
#[derive(Debug)]
pub struct State {
    pub(crate) name: String,
    pub(crate) entries: Vec<Entry>,
}

impl State {
    pub fn name(&self) -> &str {
        &self.name
    }
}
