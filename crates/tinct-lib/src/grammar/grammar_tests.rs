use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tinct_core::{Token, kind};

use crate::grammar::{Grammar, GrammarBuilder, plain_text};
use crate::grammar::pattern::Pattern;
use crate::lexer::{Lexer, LexerOptions};

fn lex(grammar: &Arc<Grammar>, source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(Arc::clone(grammar), LexerOptions::default());
    lexer
        .lex(source)
        .expect("lex setup")
        .collect::<Result<Vec<_>, _>>()
        .expect("lex run")
}

#[test]
fn state_builders_run_at_most_once() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);
    let grammar = Grammar::builder("memo")
        .state("root", move |s| {
            counter.fetch_add(1, Ordering::SeqCst);
            s.rule("a", kind::TEXT);
        })
        .build();

    grammar.state("root").expect("build root");
    grammar.state("root").expect("cached root");
    lex(&grammar, "aaa");
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn states_build_lazily_on_first_reference() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);
    let grammar = Grammar::builder("lazy")
        .state("root", |s| s.rule("a", kind::TEXT))
        .state("unused", move |s| {
            counter.fetch_add(1, Ordering::SeqCst);
            s.rule("b", kind::TEXT);
        })
        .build();

    lex(&grammar, "aa");
    assert_eq!(builds.load(Ordering::SeqCst), 0);
    grammar.state("unused").expect("build on demand");
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn redefining_a_state_replaces_it() {
    let grammar = Grammar::builder("redef")
        .state("root", |s| s.rule("a", kind::TEXT))
        .state("root", |s| s.rule("a", kind::KEYWORD))
        .build();
    assert_eq!(lex(&grammar, "a"), [Token::new(kind::KEYWORD, "a")]);
}

#[test]
fn derive_overlays_without_touching_the_parent() {
    let parent = Grammar::builder("parent")
        .state("root", |s| s.rule("a", kind::KEYWORD))
        .build();
    let child = GrammarBuilder::derive("child", &parent)
        .state("root", |s| s.rule("a", kind::NAME))
        .build();

    assert_eq!(lex(&child, "a"), [Token::new(kind::NAME, "a")]);
    assert_eq!(lex(&parent, "a"), [Token::new(kind::KEYWORD, "a")]);
}

#[test]
fn derive_inherits_unoverridden_states() {
    let parent = Grammar::builder("parent")
        .state("root", |s| {
            s.mixin("common");
            s.rule("b", kind::TEXT);
        })
        .state("common", |s| s.rule("a", kind::KEYWORD))
        .build();
    let child = GrammarBuilder::derive("child", &parent)
        .state("common", |s| s.rule("a", kind::NAME))
        .build();

    // The child's overridden mixin target applies; 'b' still comes from the
    // inherited root definition.
    assert_eq!(
        lex(&child, "ab"),
        [Token::new(kind::NAME, "a"), Token::new(kind::TEXT, "b")]
    );
    assert_eq!(
        lex(&parent, "ab"),
        [Token::new(kind::KEYWORD, "a"), Token::new(kind::TEXT, "b")]
    );
}

#[test]
fn prepend_rules_take_priority() {
    let parent = Grammar::builder("base")
        .state("root", |s| s.rule(r"[ab]+", kind::TEXT))
        .build();
    let child = GrammarBuilder::derive("eager", &parent)
        .prepend("root", |s| s.rule("a+", kind::KEYWORD))
        .build();

    assert_eq!(
        lex(&child, "aab"),
        [Token::new(kind::KEYWORD, "aa"), Token::new(kind::TEXT, "b")]
    );
}

#[test]
fn append_rules_come_last() {
    let parent = Grammar::builder("base")
        .state("root", |s| s.rule("a", kind::TEXT))
        .build();
    let child = GrammarBuilder::derive("patient", &parent)
        .append("root", |s| s.rule(".", kind::NAME))
        .build();

    assert_eq!(
        lex(&child, "ab"),
        [Token::new(kind::TEXT, "a"), Token::new(kind::NAME, "b")]
    );
}

#[test]
fn siblings_compose_the_same_parent_state_independently() {
    let parent = Grammar::builder("base")
        .state("root", |s| s.rule("b", kind::TEXT))
        .build();
    let left = GrammarBuilder::derive("left", &parent)
        .prepend("root", |s| s.rule("a", kind::KEYWORD))
        .build();
    let right = GrammarBuilder::derive("right", &parent)
        .prepend("root", |s| s.rule("a", kind::NAME))
        .build();

    assert_eq!(lex(&left, "ab")[0].kind, kind::KEYWORD);
    assert_eq!(lex(&right, "ab")[0].kind, kind::NAME);
    // The parent never learned an 'a' rule.
    assert_eq!(lex(&parent, "a"), [Token::new(kind::ERROR, "a")]);
}

#[test]
fn patterns_match_anchored_at_the_cursor() {
    let pattern = Pattern::compile("b");
    assert_eq!(pattern.match_at("abc", 1), Some(1..2));
    assert_eq!(pattern.match_at("abc", 0), None);
}

#[test]
fn zero_width_matches_are_matches() {
    let pattern = Pattern::compile("x*");
    assert_eq!(pattern.match_at("abc", 0), Some(0..0));
}

#[test]
fn bol_flag_follows_a_leading_caret() {
    assert!(Pattern::compile("^a").bol());
    assert!(!Pattern::compile("a").bol());
}

#[test]
fn captures_cover_optional_groups() {
    let pattern = Pattern::compile("(a)(b)?(c)");
    let groups = pattern.captures_at("ac", 0).expect("match");
    assert_eq!(
        groups,
        [Some(0..2), Some(0..1), None, Some(1..2)]
    );
}

#[test]
fn filename_patterns_score_wildcards() {
    let grammar = Grammar::builder("conf")
        .filenames(["nginx.conf", "*.conf", "c[ab]?.*"])
        .build();
    let patterns = grammar.filenames();
    assert_eq!(patterns[0].wildcards(), 0);
    assert_eq!(patterns[1].wildcards(), 1);
    assert_eq!(patterns[2].wildcards(), 3);
    assert!(patterns[0].matches("nginx.conf"));
    assert!(patterns[1].matches("nginx.conf"));
    assert!(!patterns[0].matches("other.conf"));
}

#[test]
fn grammar_name_matching_is_case_insensitive() {
    let grammar = Grammar::builder("ruby").aliases(["rb"]).build();
    assert!(grammar.matches_name("Ruby"));
    assert!(grammar.matches_name("RB"));
    assert!(!grammar.matches_name("python"));
}

#[test]
fn plaintext_emits_everything_as_text() {
    let grammar = plain_text();
    assert_eq!(grammar.tag(), "plaintext");
    assert!(grammar.matches_name("text"));
    let tokens = lex(&grammar, "anything\ngoes");
    assert_eq!(tokens, [Token::new(kind::TEXT, "anything\ngoes")]);
}
