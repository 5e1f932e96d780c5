//! Read-only helpers over raw source text, used by grammar confidence
//! scorers and the guessing heuristics.

use std::cell::OnceCell;
use std::ops::Range;
use std::sync::{Arc, LazyLock};

use regex_automata::util::syntax;
use regex_automata::{Anchored, Input, meta};
use tinct_core::kind;

use crate::grammar::Grammar;
use crate::lexer::{Lexer, LexerOptions};

fn probe(pattern: &str) -> meta::Regex {
    meta::Regex::builder()
        .syntax(syntax::Config::new().multi_line(true))
        .build(pattern)
        .unwrap_or_else(|err| panic!("invalid probe pattern {pattern:?}: {err}"))
}

static SHEBANG: LazyLock<meta::Regex> = LazyLock::new(|| probe(r"\s*#!(.*)"));
static DOCTYPE: LazyLock<meta::Regex> =
    LazyLock::new(|| probe(r"\s*(?:<\?.*?\?>\s*)?<!DOCTYPE\s+([^>]+)>"));

fn capture_at_start(re: &meta::Regex, text: &str) -> Option<Range<usize>> {
    let input = Input::new(text).anchored(Anchored::Yes);
    let mut caps = re.create_captures();
    re.search_captures(&input, &mut caps);
    if !caps.is_match() {
        return None;
    }
    caps.get_group(1).map(|span| span.start..span.end)
}

/// Wraps source text with lazily-cached content probes.
pub struct TextAnalyzer<'s> {
    text: &'s str,
    shebang: OnceCell<Option<Range<usize>>>,
    doctype: OnceCell<Option<Range<usize>>>,
}

impl<'s> TextAnalyzer<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            shebang: OnceCell::new(),
            doctype: OnceCell::new(),
        }
    }

    pub fn text(&self) -> &'s str {
        self.text
    }

    /// The shebang interpreter line, without `#!`. Leading whitespace before
    /// the shebang is tolerated.
    pub fn shebang(&self) -> Option<&'s str> {
        self.shebang
            .get_or_init(|| capture_at_start(&SHEBANG, self.text))
            .clone()
            .map(|range| &self.text[range])
    }

    /// Check for an interpreter word in the shebang. Matches `#!/bin/bash`,
    /// `#!/usr/bin/env bash`, and `#!/bin/bash -x` alike.
    pub fn has_shebang(&self, interpreter: &str) -> bool {
        let Some(line) = self.shebang() else {
            return false;
        };
        let pattern = format!(r"\b{}(\s|$)", regex_syntax::escape(interpreter));
        probe(&pattern).is_match(line)
    }

    /// The contents of a leading `<!DOCTYPE …>` tag, if present. A preceding
    /// `<?xml …?>` declaration is skipped.
    pub fn doctype(&self) -> Option<&'s str> {
        self.doctype
            .get_or_init(|| capture_at_start(&DOCTYPE, self.text))
            .clone()
            .map(|range| &self.text[range])
    }

    /// Check the doctype contents against a pattern.
    pub fn doctype_matches(&self, pattern: &str) -> bool {
        match self.doctype() {
            Some(doctype) => probe(pattern).is_match(doctype),
            None => false,
        }
    }

    /// True if lexing the text with `grammar` produces no `Error` tokens.
    pub fn lexes_cleanly(&self, grammar: &Arc<Grammar>) -> bool {
        let mut lexer = Lexer::new(Arc::clone(grammar), LexerOptions::default());
        let tokens = match lexer.lex(self.text) {
            Ok(tokens) => tokens,
            Err(_) => return false,
        };
        for tok in tokens {
            match tok {
                Ok(tok) if tok.kind == kind::ERROR => return false,
                Ok(_) => {}
                Err(_) => return false,
            }
        }
        true
    }
}
