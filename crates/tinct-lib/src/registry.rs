//! The lexer registry: tag/alias lookup and grammar guessing.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use tinct_core::Token;

use crate::Error;
use crate::analyzer::TextAnalyzer;
use crate::grammar::{Grammar, plain_text};
use crate::lexer::{Lexer, LexerOptions};

/// The signals available for guessing a grammar. All optional; stronger
/// signals are consulted first.
#[derive(Clone, Copy, Debug, Default)]
pub struct GuessInput<'a> {
    pub mimetype: Option<&'a str>,
    pub filename: Option<&'a str>,
    pub source: Option<&'a str>,
}

impl<'a> GuessInput<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mimetype(mut self, mimetype: &'a str) -> Self {
        self.mimetype = Some(mimetype);
        self
    }

    pub fn filename(mut self, filename: &'a str) -> Self {
        self.filename = Some(filename);
        self
    }

    pub fn source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }
}

/// Maps tags and aliases to grammars. Built once at registration time and
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct Registry {
    by_tag: IndexMap<String, Arc<Grammar>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grammar under its tag. Re-registering a tag replaces the
    /// earlier entry.
    pub fn register(&mut self, grammar: Arc<Grammar>) {
        self.by_tag.insert(grammar.tag().to_string(), grammar);
    }

    /// Find a grammar by tag or alias, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<Arc<Grammar>> {
        self.by_tag
            .values()
            .find(|g| g.matches_name(name))
            .map(Arc::clone)
    }

    /// All registered grammars, deduplicated by tag, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<Grammar>> {
        self.by_tag.values()
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Lex `source` with the named grammar, materializing the stream.
    pub fn lex(&self, name: &str, source: &str, options: LexerOptions) -> Result<Vec<Token>, Error> {
        let grammar = self
            .find(name)
            .ok_or_else(|| Error::UnknownGrammar(name.to_string()))?;
        let mut lexer = Lexer::new(grammar, options);
        lexer.lex(source)?.collect()
    }

    /// Select a grammar from the given signals.
    ///
    /// Mimetype and filename filters narrow the candidate set (never to
    /// empty); filename matches are ranked by specificity — the fewest
    /// wildcard characters among a candidate's matching patterns wins.
    /// Content scoring consults each surviving candidate's own confidence
    /// function: an exact 1.0 short-circuits, otherwise the strictly highest
    /// score wins if it exceeds the threshold — 0 when the pool was already
    /// narrowed, 0.5 when guessing across all registered grammars.
    ///
    /// Fails with [`Error::AmbiguousGrammar`] when the signals narrowed the
    /// pool but several candidates remain tied, and [`Error::NoGrammarMatched`]
    /// when nothing distinguished any candidate.
    pub fn guess(&self, input: &GuessInput<'_>) -> Result<Arc<Grammar>, Error> {
        let total = self.by_tag.len();
        let mut candidates: Vec<Arc<Grammar>> = self.all().map(Arc::clone).collect();

        if let Some(mimetype) = input.mimetype {
            let filtered: Vec<_> = candidates
                .iter()
                .filter(|g| g.mimetypes().iter().any(|m| m == mimetype))
                .map(Arc::clone)
                .collect();
            if !filtered.is_empty() {
                candidates = filtered;
            }
        }
        if candidates.len() == 1 {
            return Ok(candidates.remove(0));
        }

        if let Some(filename) = input.filename {
            candidates = filter_by_filename(candidates, filename);
        }
        if candidates.len() == 1 {
            return Ok(candidates.remove(0));
        }

        if let Some(source) = input.source {
            let analyzer = TextAnalyzer::new(source);
            // Trust content analysis more once other signals narrowed the
            // pool; across all grammars, demand real confidence.
            let threshold = if candidates.len() < total { 0.0 } else { 0.5 };
            let mut best: Option<(f32, Arc<Grammar>)> = None;
            for grammar in &candidates {
                let Some(score) = grammar.analyze(&analyzer) else {
                    continue;
                };
                if score >= 1.0 {
                    return Ok(Arc::clone(grammar));
                }
                if score > threshold && best.as_ref().is_none_or(|(b, _)| score > *b) {
                    best = Some((score, Arc::clone(grammar)));
                }
            }
            if let Some((_, grammar)) = best {
                return Ok(grammar);
            }
        }

        if candidates.len() < total {
            Err(Error::AmbiguousGrammar {
                candidates: candidates.iter().map(|g| g.tag().to_string()).collect(),
            })
        } else {
            Err(Error::NoGrammarMatched)
        }
    }

    /// Lenient [`guess`](Self::guess): falls back to the plaintext grammar
    /// instead of failing.
    pub fn guess_or_plaintext(&self, input: &GuessInput<'_>) -> Arc<Grammar> {
        self.guess(input)
            .unwrap_or_else(|_| self.find("plaintext").unwrap_or_else(plain_text))
    }
}

/// Keep the candidates whose patterns match `filename` with the globally
/// lowest wildcard count; ties keep all of them. No match leaves the set
/// unchanged. This is what lets a `nginx.conf` pattern beat `*.conf`.
fn filter_by_filename(candidates: Vec<Arc<Grammar>>, filename: &str) -> Vec<Arc<Grammar>> {
    let basename = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    let mut best_seen: Option<usize> = None;
    let mut out: Vec<Arc<Grammar>> = Vec::new();
    for grammar in &candidates {
        let score = grammar
            .filenames()
            .iter()
            .filter(|pattern| pattern.matches(&basename))
            .map(|pattern| pattern.wildcards())
            .min();
        let Some(score) = score else {
            continue;
        };
        match best_seen {
            None => {
                best_seen = Some(score);
                out.push(Arc::clone(grammar));
            }
            Some(best) if score < best => {
                best_seen = Some(score);
                out.clear();
                out.push(Arc::clone(grammar));
            }
            Some(best) if score == best => {
                out.push(Arc::clone(grammar));
            }
            Some(_) => {}
        }
    }

    if out.is_empty() { candidates } else { out }
}
