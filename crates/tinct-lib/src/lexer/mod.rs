//! The lexer engine: an explicit state stack driven over a cursor.
//!
//! Each step looks at the state on top of the stack and walks its entries in
//! order, descending into mixins depth-first. The first pattern that matches
//! at the cursor wins; its action runs and the step ends. If nothing matches,
//! one character is consumed as an `Error` token. A bounded counter of
//! consecutive zero-width matches keeps pathological grammars from looping
//! forever.
//!
//! Lexing is lazy: [`Tokens`] advances the engine one step at a time and
//! consolidates adjacent same-kind tokens as a streaming fold.

use std::collections::{HashMap, VecDeque};
use std::ops::Range;
use std::sync::Arc;

use tinct_core::{Token, TokenKind, kind};

use crate::Error;
use crate::grammar::state::{Action, Entry, Rule, State};
use crate::grammar::Grammar;

pub mod trace;

pub use trace::{NoopTracer, PrintTracer, Tracer};


/// Consecutive zero-width matches permitted before a step is treated as a
/// failure. The counter resets only when a match consumes input.
pub const MAX_NULL_STEPS: usize = 5;

/// Per-instance engine configuration.
///
/// Grammars needing open-ended options get explicit fields here; `parent`
/// overrides a template grammar's default parent.
#[derive(Clone, Debug, Default)]
pub struct LexerOptions {
    pub parent: Option<Arc<Grammar>>,
}

/// A lexer instance: one grammar, one state stack.
///
/// The stack survives across [`lex_continue`](Lexer::lex_continue) calls;
/// [`lex`](Lexer::lex) resets it to the grammar's root state and runs the
/// grammar's start hooks. Instances are exclusively owned and never shared
/// between threads; the grammar and its built states are shared read-only.
pub struct Lexer {
    grammar: Arc<Grammar>,
    options: LexerOptions,
    stack: Vec<Arc<State>>,
    initialized: bool,
    delegates: HashMap<String, Lexer>,
}

impl Lexer {
    pub fn new(grammar: Arc<Grammar>, options: LexerOptions) -> Self {
        Self {
            grammar,
            options,
            stack: Vec::new(),
            initialized: false,
            delegates: HashMap::new(),
        }
    }

    pub fn grammar(&self) -> &Arc<Grammar> {
        &self.grammar
    }

    /// Names of the states currently on the stack, bottom to top.
    pub fn stack_names(&self) -> Vec<&str> {
        self.stack.iter().map(|s| s.name()).collect()
    }

    /// Clear the stack back to `[root]` and run the grammar's start hooks.
    pub fn reset(&mut self) -> Result<(), Error> {
        let grammar = Arc::clone(&self.grammar);
        self.stack.clear();
        self.stack.push(grammar.state(grammar.root())?);
        self.initialized = true;
        for hook in grammar.start_hooks() {
            (**hook)(self)?;
        }
        Ok(())
    }

    /// Reset every persistent delegate sub-lexer. Template grammars call
    /// this from a start hook so a fresh lex also resets the parent.
    pub fn reset_delegates(&mut self) -> Result<(), Error> {
        for sub in self.delegates.values_mut() {
            sub.reset()?;
        }
        Ok(())
    }

    /// Lex from a fresh root state.
    pub fn lex<'l, 's>(&'l mut self, source: &'s str) -> Result<Tokens<'l, 's, NoopTracer>, Error> {
        self.lex_with(source, NoopTracer)
    }

    /// Lex from a fresh root state, reporting engine events to `tracer`.
    pub fn lex_with<'l, 's, T: Tracer>(
        &'l mut self,
        source: &'s str,
        tracer: T,
    ) -> Result<Tokens<'l, 's, T>, Error> {
        self.reset()?;
        Ok(Tokens::new(self, source, tracer))
    }

    /// Lex more input with the current stack preserved. Required for
    /// delegation and for chunked input.
    pub fn lex_continue<'l, 's>(
        &'l mut self,
        source: &'s str,
    ) -> Result<Tokens<'l, 's, NoopTracer>, Error> {
        self.lex_continue_with(source, NoopTracer)
    }

    /// [`lex_continue`](Self::lex_continue) with a tracer.
    pub fn lex_continue_with<'l, 's, T: Tracer>(
        &'l mut self,
        source: &'s str,
        tracer: T,
    ) -> Result<Tokens<'l, 's, T>, Error> {
        if !self.initialized {
            let grammar = Arc::clone(&self.grammar);
            self.stack.push(grammar.state(grammar.root())?);
            self.initialized = true;
        }
        Ok(Tokens::new(self, source, tracer))
    }

    /// Validate bytes as UTF-8, then lex. Fails before producing any output
    /// if the input is not valid text.
    pub fn lex_bytes<'l, 's>(
        &'l mut self,
        bytes: &'s [u8],
    ) -> Result<Tokens<'l, 's, NoopTracer>, Error> {
        let source = std::str::from_utf8(bytes)?;
        self.lex(source)
    }

    /// The parent grammar for delegation: the per-instance override if set,
    /// otherwise the grammar's declared default.
    pub fn parent_grammar(&self) -> Option<Arc<Grammar>> {
        self.options
            .parent
            .clone()
            .or_else(|| self.grammar.parent_factory().map(|f| (**f)()))
    }

    /// The persistent sub-lexer for `grammar`, created on first use. Its
    /// stack carries over between delegations.
    fn delegate_mut(&mut self, grammar: &Arc<Grammar>) -> &mut Lexer {
        self.delegates
            .entry(grammar.tag().to_string())
            .or_insert_with(|| Lexer::new(Arc::clone(grammar), LexerOptions::default()))
    }

    /// Pop up to `n` states. Popping with an already-empty stack is a fatal
    /// invariant violation, never a silent no-op.
    fn pop_states(&mut self, n: usize) -> Result<(), Error> {
        if self.stack.is_empty() {
            return Err(Error::EmptyStack);
        }
        for _ in 0..n {
            if self.stack.pop().is_none() {
                break;
            }
        }
        Ok(())
    }
}

/// Lazy token stream over one input buffer.
///
/// Yields `(kind, text)` tokens in strict input order; adjacent tokens of
/// the same kind are merged and empty tokens suppressed before they surface.
/// A fatal engine error ends the stream immediately, discarding any tokens
/// not yet surfaced.
pub struct Tokens<'l, 's, T: Tracer> {
    lexer: &'l mut Lexer,
    source: &'s str,
    tracer: T,
    pos: usize,
    null_steps: usize,
    queue: VecDeque<Token>,
    pending: Option<Token>,
    done: bool,
}

impl<'l, 's, T: Tracer> Tokens<'l, 's, T> {
    fn new(lexer: &'l mut Lexer, source: &'s str, tracer: T) -> Self {
        Self {
            lexer,
            source,
            tracer,
            pos: 0,
            null_steps: 0,
            queue: VecDeque::new(),
            pending: None,
            done: false,
        }
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.source.as_bytes()[self.pos - 1] == b'\n'
    }

    fn emit(&mut self, kind: TokenKind, value: String) {
        if !value.is_empty() {
            self.queue.push_back(Token { kind, value });
        }
    }

    /// Run one engine step: at most one rule application, or one `Error`
    /// character when no rule (or only a stalled zero-width rule) applies.
    fn step(&mut self) -> Result<(), Error> {
        let state = match self.lexer.stack.last() {
            Some(state) => Arc::clone(state),
            None => return Err(Error::EmptyStack),
        };
        self.tracer.step(state.name(), self.lexer.stack.len(), self.pos);

        if !self.try_state(&state)? {
            let start = self.pos;
            let ch = self.source[start..]
                .chars()
                .next()
                .expect("cursor within input");
            self.pos = start + ch.len_utf8();
            self.tracer.error_char(start);
            self.emit(kind::ERROR, self.source[start..self.pos].to_string());
        }
        Ok(())
    }

    /// Try each entry of `state` in order. Returns whether the step applied
    /// a rule productively; a mixin's outcome propagates like a direct rule.
    fn try_state(&mut self, state: &State) -> Result<bool, Error> {
        for entry in &state.entries {
            match entry {
                Entry::Mixin(name) => {
                    let mixed = self.lexer.grammar.state(name)?;
                    if self.try_state(&mixed)? {
                        return Ok(true);
                    }
                }
                Entry::Rule(rule) => {
                    if rule.pattern.bol() && !self.at_line_start() {
                        continue;
                    }
                    let Some(range) = rule.pattern.match_at(self.source, self.pos) else {
                        continue;
                    };
                    self.tracer
                        .rule_matched(rule.pattern.source(), range.start, range.len());
                    self.pos = range.end;
                    self.apply(rule, &range)?;

                    if range.is_empty() {
                        self.null_steps += 1;
                        if self.null_steps > MAX_NULL_STEPS {
                            self.tracer.null_overflow(range.start);
                            return Ok(false);
                        }
                    } else {
                        self.null_steps = 0;
                    }
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn apply(&mut self, rule: &Rule, range: &Range<usize>) -> Result<(), Error> {
        match &rule.action {
            Action::Emit(kind) => {
                self.emit(*kind, self.source[range.clone()].to_string());
            }
            Action::EmitPush(kind, name) => {
                self.emit(*kind, self.source[range.clone()].to_string());
                let state = self.lexer.grammar.state(name)?;
                self.tracer.stack_pushed(state.name());
                self.lexer.stack.push(state);
            }
            Action::EmitPushSelf(kind) => {
                self.emit(*kind, self.source[range.clone()].to_string());
                let top = self
                    .lexer
                    .stack
                    .last()
                    .map(Arc::clone)
                    .ok_or(Error::EmptyStack)?;
                self.tracer.stack_pushed(top.name());
                self.lexer.stack.push(top);
            }
            Action::EmitPop(kind) => {
                self.emit(*kind, self.source[range.clone()].to_string());
                self.lexer.pop_states(1)?;
                self.tracer.stack_popped(self.lexer.stack.len());
            }
            Action::Groups(kinds) => {
                let groups = rule
                    .pattern
                    .captures_at(self.source, range.start)
                    .expect("matched pattern must re-match for captures");
                for (i, kind) in kinds.iter().enumerate() {
                    if let Some(Some(span)) = groups.get(i + 1) {
                        self.emit(*kind, self.source[span.clone()].to_string());
                    }
                }
            }
            Action::Callback(callback) => {
                let groups = rule
                    .pattern
                    .captures_at(self.source, range.start)
                    .expect("matched pattern must re-match for captures");
                let mut ctx = Ctx {
                    source: self.source,
                    whole: range.clone(),
                    groups,
                    lexer: &mut *self.lexer,
                    sink: &mut self.queue,
                };
                (**callback)(&mut ctx)?;
            }
        }
        Ok(())
    }
}

impl<T: Tracer> Iterator for Tokens<'_, '_, T> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            // Drain queued emissions through the consolidation fold.
            while let Some(tok) = self.queue.pop_front() {
                if let Some(pending) = self.pending.as_mut() {
                    if pending.kind == tok.kind {
                        pending.value.push_str(&tok.value);
                        continue;
                    }
                    let out = std::mem::replace(pending, tok);
                    return Some(Ok(out));
                }
                self.pending = Some(tok);
            }

            if self.pos >= self.source.len() {
                self.done = true;
                return self.pending.take().map(Ok);
            }

            if let Err(err) = self.step() {
                self.done = true;
                self.queue.clear();
                self.pending = None;
                return Some(Err(err));
            }
        }
    }
}

/// Explicit handle passed to rule callbacks: the current match and its
/// capture groups, the emission sink, and the state stack.
pub struct Ctx<'r, 's> {
    source: &'s str,
    whole: Range<usize>,
    groups: Vec<Option<Range<usize>>>,
    lexer: &'r mut Lexer,
    sink: &'r mut VecDeque<Token>,
}

impl<'s> Ctx<'_, 's> {
    /// The whole matched text.
    pub fn text(&self) -> &'s str {
        &self.source[self.whole.clone()]
    }

    /// Capture group `i` (0 is the whole match).
    pub fn group(&self, i: usize) -> Option<&'s str> {
        self.groups
            .get(i)
            .and_then(|g| g.clone())
            .map(|range| &self.source[range])
    }

    /// Emit the whole match as `kind`.
    pub fn token(&mut self, kind: TokenKind) {
        let value = self.text().to_string();
        self.emit(kind, value);
    }

    /// Emit an explicit value as `kind`.
    pub fn token_text(&mut self, kind: TokenKind, value: impl Into<String>) {
        self.emit(kind, value.into());
    }

    /// Emit capture groups 1..=N with the paired kinds.
    pub fn groups(&mut self, kinds: &[TokenKind]) {
        for (i, kind) in kinds.iter().enumerate() {
            if let Some(value) = self.group(i + 1) {
                let value = value.to_string();
                self.emit(*kind, value);
            }
        }
    }

    /// Push the named state.
    pub fn push(&mut self, name: &str) -> Result<(), Error> {
        let state = self.lexer.grammar.state(name)?;
        self.lexer.stack.push(state);
        Ok(())
    }

    /// Push another copy of the current top state.
    pub fn push_self(&mut self) -> Result<(), Error> {
        let top = self
            .lexer
            .stack
            .last()
            .map(Arc::clone)
            .ok_or(Error::EmptyStack)?;
        self.lexer.stack.push(top);
        Ok(())
    }

    /// Pop up to `n` states; fatal if the stack is already empty.
    pub fn pop(&mut self, n: usize) -> Result<(), Error> {
        self.lexer.pop_states(n)
    }

    /// Replace the top of the stack with the named state.
    pub fn goto(&mut self, name: &str) -> Result<(), Error> {
        let state = self.lexer.grammar.state(name)?;
        let top = self.lexer.stack.last_mut().ok_or(Error::EmptyStack)?;
        *top = state;
        Ok(())
    }

    /// Clear the stack back to `[root]`.
    pub fn reset_stack(&mut self) -> Result<(), Error> {
        let root = self.lexer.grammar.state(self.lexer.grammar.root())?;
        self.lexer.stack.clear();
        self.lexer.stack.push(root);
        Ok(())
    }

    /// Name of the state on top of the stack.
    pub fn state_name(&self) -> Result<&str, Error> {
        self.lexer
            .stack
            .last()
            .map(|s| s.name())
            .ok_or(Error::EmptyStack)
    }

    /// True if a state with this name is anywhere on the stack.
    pub fn in_state(&self, name: &str) -> bool {
        self.lexer.stack.iter().any(|s| s.name() == name)
    }

    /// Re-lex `text` (default: the whole match) through a persistent
    /// sub-lexer for `grammar`, in continue mode, re-emitting its tokens
    /// here. Sequential delegations to the same grammar continue from the
    /// sub-lexer's prior stack.
    pub fn delegate(&mut self, grammar: &Arc<Grammar>, text: Option<&str>) -> Result<(), Error> {
        let source = self.source;
        let whole = self.whole.clone();
        let chunk = match text {
            Some(t) => t,
            None => &source[whole],
        };
        let sub = self.lexer.delegate_mut(grammar);
        let tokens = sub.lex_continue(chunk)?;
        for tok in tokens {
            self.sink.push_back(tok?);
        }
        Ok(())
    }

    /// Delegate to the template parent grammar.
    pub fn delegate_parent(&mut self, text: Option<&str>) -> Result<(), Error> {
        let parent = self
            .lexer
            .parent_grammar()
            .ok_or_else(|| Error::MissingParent(self.lexer.grammar.tag().to_string()))?;
        self.delegate(&parent, text)
    }

    /// Delegate to a fresh instance of this same grammar, for nested
    /// constructs of identical language.
    pub fn recurse(&mut self, text: Option<&str>) -> Result<(), Error> {
        let source = self.source;
        let whole = self.whole.clone();
        let chunk = match text {
            Some(t) => t,
            None => &source[whole],
        };
        let mut sub = Lexer::new(Arc::clone(&self.lexer.grammar), LexerOptions::default());
        let tokens = sub.lex_continue(chunk)?;
        for tok in tokens {
            self.sink.push_back(tok?);
        }
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind, value: String) {
        if !value.is_empty() {
            self.sink.push_back(Token { kind, value });
        }
    }
}
