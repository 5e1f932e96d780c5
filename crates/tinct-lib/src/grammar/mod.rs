//! Grammar definitions: deferred state builders, composition, and the
//! build-once state table.
//!
//! A grammar is pure data — metadata plus a map of named state definitions.
//! Definitions are deferred closures; each is built into an immutable
//! [`State`] on first reference and cached for the lifetime of the grammar,
//! so all lexer instances of a grammar share one rule table.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, RwLock};

use globset::{Glob, GlobMatcher};
use indexmap::IndexMap;
use tinct_core::{TokenKind, kind};

use crate::Error;
use crate::analyzer::TextAnalyzer;
use crate::lexer::{Ctx, Lexer};

pub mod pattern;
pub mod state;

pub use pattern::Pattern;
pub use state::{Action, Callback, Entry, Rule, State};

#[cfg(test)]
mod grammar_tests;

/// Deferred state construction logic.
pub type StateBuildFn = dyn Fn(&mut StateBuilder) + Send + Sync;

/// Content-based confidence scorer, in `[0, 1]`.
pub type AnalyzeFn = dyn Fn(&TextAnalyzer<'_>) -> Option<f32> + Send + Sync;

/// Produces the default parent grammar of a template grammar.
pub type ParentFn = dyn Fn() -> Arc<Grammar> + Send + Sync;

/// Hook run on every fresh (non-continued) lex.
pub type StartHook = dyn Fn(&mut Lexer) -> Result<(), Error> + Send + Sync;

/// A named but not-yet-built state: the builder closure runs on first use.
///
/// `prepended`/`appended` compose a new closure around the existing one
/// without touching it, so several derived grammars can extend the same
/// inherited state independently.
#[derive(Clone)]
pub struct StateDef {
    name: String,
    build: Arc<StateBuildFn>,
}

impl StateDef {
    fn new(name: &str, build: Arc<StateBuildFn>) -> Self {
        Self {
            name: name.to_string(),
            build,
        }
    }

    fn prepended(&self, extra: Arc<StateBuildFn>) -> Self {
        let base = Arc::clone(&self.build);
        Self {
            name: self.name.clone(),
            build: Arc::new(move |s| {
                (*extra)(s);
                (*base)(s);
            }),
        }
    }

    fn appended(&self, extra: Arc<StateBuildFn>) -> Self {
        let base = Arc::clone(&self.build);
        Self {
            name: self.name.clone(),
            build: Arc::new(move |s| {
                (*base)(s);
                (*extra)(s);
            }),
        }
    }

    fn build_state(&self) -> State {
        let mut builder = StateBuilder {
            entries: Vec::new(),
        };
        (*self.build)(&mut builder);
        State {
            name: self.name.clone(),
            entries: builder.entries,
        }
    }
}

impl fmt::Debug for StateDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateDef({:?})", self.name)
    }
}

/// Assembles one state's rule list. Passed to state definition closures.
pub struct StateBuilder {
    entries: Vec<state::Entry>,
}

impl StateBuilder {
    /// Emit `kind` for the whole match.
    pub fn rule(&mut self, pattern: &str, kind: TokenKind) {
        self.push_rule(pattern, Action::Emit(kind));
    }

    /// Emit `kind`, then push the named state.
    pub fn rule_push(&mut self, pattern: &str, kind: TokenKind, state: &str) {
        self.push_rule(pattern, Action::EmitPush(kind, state.to_string()));
    }

    /// Emit `kind`, then push another copy of the current top state.
    pub fn rule_push_self(&mut self, pattern: &str, kind: TokenKind) {
        self.push_rule(pattern, Action::EmitPushSelf(kind));
    }

    /// Emit `kind`, then pop one state.
    pub fn rule_pop(&mut self, pattern: &str, kind: TokenKind) {
        self.push_rule(pattern, Action::EmitPop(kind));
    }

    /// Emit capture groups 1..=N with the paired kinds.
    pub fn rule_groups(&mut self, pattern: &str, kinds: &[TokenKind]) {
        self.push_rule(pattern, Action::Groups(kinds.to_vec()));
    }

    /// Run an arbitrary callback on match.
    pub fn rule_with<F>(&mut self, pattern: &str, callback: F)
    where
        F: Fn(&mut Ctx<'_, '_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.push_rule(pattern, Action::Callback(Arc::new(callback)));
    }

    /// Try another state's rules at this point, before later entries here.
    pub fn mixin(&mut self, state: &str) {
        self.entries.push(Entry::Mixin(state.to_string()));
    }

    fn push_rule(&mut self, pattern: &str, action: Action) {
        self.entries.push(Entry::Rule(Rule {
            pattern: Pattern::compile(pattern),
            action,
        }));
    }
}

/// A filename glob with its precompiled matcher and specificity score.
#[derive(Clone)]
pub struct FilePattern {
    raw: String,
    matcher: GlobMatcher,
    wildcards: usize,
}

impl FilePattern {
    fn new(raw: &str) -> Self {
        let matcher = Glob::new(raw)
            .unwrap_or_else(|err| panic!("invalid filename pattern {raw:?}: {err}"))
            .compile_matcher();
        Self {
            raw: raw.to_string(),
            matcher,
            wildcards: raw.chars().filter(|c| matches!(c, '*' | '?' | '[')).count(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Number of wildcard characters; fewer means more specific.
    pub fn wildcards(&self) -> usize {
        self.wildcards
    }

    pub fn matches(&self, basename: &str) -> bool {
        self.matcher.is_match(basename)
    }
}

impl fmt::Debug for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FilePattern({:?})", self.raw)
    }
}

/// A language definition: metadata plus named state definitions.
///
/// Grammars are shared as `Arc<Grammar>` and are immutable after
/// construction except for the internal build cache, which memoizes each
/// state on first use (synchronized, built at most once).
pub struct Grammar {
    tag: String,
    title: String,
    description: String,
    aliases: Vec<String>,
    filenames: Vec<FilePattern>,
    mimetypes: Vec<String>,
    analyze: Option<Arc<AnalyzeFn>>,
    parent: Option<Arc<ParentFn>>,
    start_hooks: Vec<Arc<StartHook>>,
    root: String,
    defs: IndexMap<String, StateDef>,
    built: RwLock<HashMap<String, Arc<State>>>,
}

impl Grammar {
    /// Start defining a grammar with the given unique tag.
    pub fn builder(tag: &str) -> GrammarBuilder {
        GrammarBuilder {
            tag: tag.to_string(),
            title: tag.to_string(),
            description: String::new(),
            aliases: Vec::new(),
            filenames: Vec::new(),
            mimetypes: Vec::new(),
            analyze: None,
            parent: None,
            start_hooks: Vec::new(),
            root: "root".to_string(),
            defs: IndexMap::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn filenames(&self) -> &[FilePattern] {
        &self.filenames
    }

    pub fn mimetypes(&self) -> &[String] {
        &self.mimetypes
    }

    /// The name of the initial state.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// True if `name` equals the tag or any alias, ignoring ASCII case.
    pub fn matches_name(&self, name: &str) -> bool {
        self.tag.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Run this grammar's content confidence scorer, if it has one.
    pub fn analyze(&self, text: &TextAnalyzer<'_>) -> Option<f32> {
        self.analyze.as_ref().and_then(|f| (**f)(text))
    }

    pub(crate) fn parent_factory(&self) -> Option<&Arc<ParentFn>> {
        self.parent.as_ref()
    }

    pub(crate) fn start_hooks(&self) -> &[Arc<StartHook>] {
        &self.start_hooks
    }

    /// Look up a state, building and caching it on first reference.
    pub(crate) fn state(&self, name: &str) -> Result<Arc<State>, Error> {
        if let Some(built) = self
            .built
            .read()
            .expect("state cache poisoned")
            .get(name)
        {
            return Ok(Arc::clone(built));
        }

        let mut cache = self.built.write().expect("state cache poisoned");
        // Double check: another thread may have built it while we waited.
        if let Some(built) = cache.get(name) {
            return Ok(Arc::clone(built));
        }
        let def = self
            .defs
            .get(name)
            .ok_or_else(|| Error::UnknownState(name.to_string()))?;
        let built = Arc::new(def.build_state());
        cache.insert(name.to_string(), Arc::clone(&built));
        Ok(built)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("tag", &self.tag)
            .field("aliases", &self.aliases)
            .field("filenames", &self.filenames)
            .field("mimetypes", &self.mimetypes)
            .field("states", &self.defs.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Assembles a [`Grammar`].
pub struct GrammarBuilder {
    tag: String,
    title: String,
    description: String,
    aliases: Vec<String>,
    filenames: Vec<FilePattern>,
    mimetypes: Vec<String>,
    analyze: Option<Arc<AnalyzeFn>>,
    parent: Option<Arc<ParentFn>>,
    start_hooks: Vec<Arc<StartHook>>,
    root: String,
    defs: IndexMap<String, StateDef>,
}

impl GrammarBuilder {
    /// Start from another grammar's state definitions, start hooks, and
    /// parent factory. Metadata is not inherited. Overlaying a state name
    /// afterwards replaces the inherited definition without affecting the
    /// parent grammar.
    pub fn derive(tag: &str, parent: &Arc<Grammar>) -> Self {
        let mut builder = Grammar::builder(tag);
        builder.defs = parent.defs.clone();
        builder.start_hooks = parent.start_hooks.clone();
        builder.parent = parent.parent.clone();
        builder.root = parent.root.clone();
        builder
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn aliases<I>(mut self, aliases: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn filenames<'a, I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.filenames.extend(patterns.into_iter().map(FilePattern::new));
        self
    }

    pub fn mimetypes<I>(mut self, mimetypes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.mimetypes.extend(mimetypes.into_iter().map(Into::into));
        self
    }

    /// Attach a content confidence scorer.
    pub fn analyze<F>(mut self, f: F) -> Self
    where
        F: Fn(&TextAnalyzer<'_>) -> Option<f32> + Send + Sync + 'static,
    {
        self.analyze = Some(Arc::new(f));
        self
    }

    /// Mark this grammar as a template grammar with the given default parent.
    /// The parent's own stack survives across delegations within one lex and
    /// is reset whenever the template grammar resets.
    pub fn parent<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Arc<Grammar> + Send + Sync + 'static,
    {
        self.parent = Some(Arc::new(f));
        self.start_hooks
            .push(Arc::new(|lexer: &mut Lexer| lexer.reset_delegates()));
        self
    }

    /// Register a hook that runs on every fresh lex.
    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Lexer) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.start_hooks.push(Arc::new(f));
        self
    }

    /// Define (or redefine) a named state.
    pub fn state<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&mut StateBuilder) + Send + Sync + 'static,
    {
        self.defs.insert(name.to_string(), StateDef::new(name, Arc::new(f)));
        self
    }

    /// Insert rules before an existing state's rules.
    pub fn prepend<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&mut StateBuilder) + Send + Sync + 'static,
    {
        let def = self
            .defs
            .get(name)
            .unwrap_or_else(|| panic!("no state {name:?} to prepend to"))
            .prepended(Arc::new(f));
        self.defs.insert(name.to_string(), def);
        self
    }

    /// Insert rules after an existing state's rules.
    pub fn append<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&mut StateBuilder) + Send + Sync + 'static,
    {
        let def = self
            .defs
            .get(name)
            .unwrap_or_else(|| panic!("no state {name:?} to append to"))
            .appended(Arc::new(f));
        self.defs.insert(name.to_string(), def);
        self
    }

    pub fn build(self) -> Arc<Grammar> {
        Arc::new(Grammar {
            tag: self.tag,
            title: self.title,
            description: self.description,
            aliases: self.aliases,
            filenames: self.filenames,
            mimetypes: self.mimetypes,
            analyze: self.analyze,
            parent: self.parent,
            start_hooks: self.start_hooks,
            root: self.root,
            defs: self.defs,
            built: RwLock::new(HashMap::new()),
        })
    }
}

/// The fallback grammar: everything is `Text`.
pub fn plain_text() -> Arc<Grammar> {
    static PLAIN: LazyLock<Arc<Grammar>> = LazyLock::new(|| {
        Grammar::builder("plaintext")
            .title("Plain Text")
            .description("A boring grammar that doesn't highlight anything")
            .aliases(["text"])
            .filenames(["*.txt"])
            .mimetypes(["text/plain"])
            .state("root", |s| s.rule(r"(?s).+", kind::TEXT))
            .build()
    });
    Arc::clone(&PLAIN)
}
