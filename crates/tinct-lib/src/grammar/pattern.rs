//! Compiled rule patterns with anchored-at-cursor matching.

use std::fmt;
use std::ops::Range;

use regex_automata::meta;
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input};

/// A rule pattern: the compiled regex plus the flags the engine needs.
///
/// Patterns whose source begins with `^` are additionally gated on the cursor
/// sitting at the start of a line; the engine skips them elsewhere. Multi-line
/// syntax is always on so `^`/`$` stay line-oriented inside patterns.
pub struct Pattern {
    re: meta::Regex,
    source: String,
    bol: bool,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// Grammar patterns are static data; an invalid one is a defect in the
    /// grammar definition, so this panics rather than returning an error.
    pub fn compile(source: &str) -> Self {
        let re = meta::Regex::builder()
            .syntax(syntax::Config::new().multi_line(true))
            .build(source)
            .unwrap_or_else(|err| panic!("invalid rule pattern {source:?}: {err}"));
        Self {
            re,
            source: source.to_string(),
            bol: source.starts_with('^'),
        }
    }

    /// The original pattern text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether this pattern only applies at the beginning of a line.
    pub fn bol(&self) -> bool {
        self.bol
    }

    /// Match anchored at `at`; the returned range starts exactly there.
    /// Zero-length matches are real matches.
    pub fn match_at(&self, haystack: &str, at: usize) -> Option<Range<usize>> {
        let input = Input::new(haystack).range(at..).anchored(Anchored::Yes);
        self.re.search(&input).map(|m| m.range())
    }

    /// Like [`match_at`](Self::match_at) but extracts all capture groups.
    /// Index 0 is the whole match.
    pub fn captures_at(&self, haystack: &str, at: usize) -> Option<Vec<Option<Range<usize>>>> {
        let input = Input::new(haystack).range(at..).anchored(Anchored::Yes);
        let mut caps = self.re.create_captures();
        self.re.search_captures(&input, &mut caps);
        if !caps.is_match() {
            return None;
        }
        let groups = (0..caps.group_len())
            .map(|i| caps.get_group(i).map(|span| span.start..span.end))
            .collect();
        Some(groups)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.source)
    }
}
