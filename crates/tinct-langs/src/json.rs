//! JSON grammar.

use std::sync::{Arc, LazyLock};

use tinct_core::kind;
use tinct_lib::grammar::Grammar;

pub fn grammar() -> Arc<Grammar> {
    static GRAMMAR: LazyLock<Arc<Grammar>> = LazyLock::new(build);
    Arc::clone(&GRAMMAR)
}

fn build() -> Arc<Grammar> {
    Grammar::builder("json")
        .title("JSON")
        .description("JavaScript Object Notation (json.org)")
        .filenames(["*.json"])
        .mimetypes(["application/json"])
        .analyze(|text| {
            let leading_brace = text.text().trim_start().starts_with('{');
            (leading_brace && text.lexes_cleanly(&grammar())).then_some(0.8)
        })
        .state("root", |s| {
            s.mixin("whitespace");
            // special case for empty objects
            s.rule_groups(
                r"(\{)(\s*)(\})",
                &[kind::PUNCTUATION, kind::TEXT_WHITESPACE, kind::PUNCTUATION],
            );
            s.rule(r"(?:true|false|null)\b", kind::KEYWORD_CONSTANT);
            s.rule_push(r"\{", kind::PUNCTUATION, "object_key");
            s.rule_push(r"\[", kind::PUNCTUATION, "array");
            s.rule(r"(?i)-?(?:0|[1-9]\d*)\.\d+(?:e[+-]\d+)?", kind::NUM_FLOAT);
            s.rule(r"(?i)-?(?:0|[1-9]\d*)(?:e[+-]\d+)?", kind::NUM_INTEGER);
            s.mixin("has_string");
        })
        .state("whitespace", |s| {
            s.rule(r"\s+", kind::TEXT_WHITESPACE);
        })
        .state("has_string", |s| {
            s.rule(r#""(\\.|[^"])*""#, kind::STRING_DOUBLE);
        })
        .state("object_key", |s| {
            s.mixin("whitespace");
            s.mixin("has_string");
            s.rule_push(":", kind::PUNCTUATION, "object_val");
            s.rule_pop(r"\}", kind::ERROR);
        })
        .state("object_val", |s| {
            s.rule_pop(",", kind::PUNCTUATION);
            s.rule_with(r"\}", |c| {
                c.token(kind::PUNCTUATION);
                c.pop(2)
            });
            s.mixin("root");
        })
        .state("array", |s| {
            s.rule_pop(r"\]", kind::PUNCTUATION);
            s.rule(",", kind::PUNCTUATION);
            s.mixin("root");
        })
        .build()
}

#[cfg(test)]
mod json_tests {
    use tinct_core::{Token, kind};
    use tinct_lib::analyzer::TextAnalyzer;
    use tinct_lib::lexer::{Lexer, LexerOptions};

    use super::grammar;

    fn lex(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(grammar(), LexerOptions::default());
        lexer
            .lex(source)
            .expect("lex setup")
            .collect::<Result<Vec<_>, _>>()
            .expect("lex run")
    }

    fn dump(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|tok| format!("{}: {:?}", tok.kind, tok.value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_object_consolidates_to_one_token() {
        // The empty-object rule emits two Punctuation tokens back to back;
        // stream consolidation merges them.
        let tokens = lex("{}");
        assert_eq!(tokens, [Token::new(kind::PUNCTUATION, "{}")]);
    }

    #[test]
    fn empty_object_with_inner_whitespace() {
        let tokens = lex("{ }");
        assert_eq!(
            tokens,
            [
                Token::new(kind::PUNCTUATION, "{"),
                Token::new(kind::TEXT_WHITESPACE, " "),
                Token::new(kind::PUNCTUATION, "}"),
            ]
        );
    }

    #[test]
    fn simple_object() {
        let tokens = lex(r#"{"a":1}"#);
        insta::assert_snapshot!(dump(&tokens), @r#"
Punctuation: "{"
String.Double: "\"a\""
Punctuation: ":"
Num.Integer: "1"
Punctuation: "}"
"#);
    }

    #[test]
    fn arrays_numbers_and_constants() {
        let tokens = lex(r#"[1, 2.5e+3, true, "s"]"#);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                kind::PUNCTUATION,
                kind::NUM_INTEGER,
                kind::PUNCTUATION,
                kind::TEXT_WHITESPACE,
                kind::NUM_FLOAT,
                kind::PUNCTUATION,
                kind::TEXT_WHITESPACE,
                kind::KEYWORD_CONSTANT,
                kind::PUNCTUATION,
                kind::TEXT_WHITESPACE,
                kind::STRING_DOUBLE,
                kind::PUNCTUATION,
            ]
        );
    }

    #[test]
    fn escaped_quotes_stay_inside_the_string() {
        let tokens = lex(r#"{"a\"b":1}"#);
        assert_eq!(tokens[1], Token::new(kind::STRING_DOUBLE, r#""a\"b""#));
    }

    #[test]
    fn stray_close_in_object_key_is_an_error() {
        let tokens = lex("{]");
        assert_eq!(tokens.last().unwrap().kind, kind::ERROR);
    }

    #[test]
    fn nested_structures_balance_the_stack() {
        let tokens = lex(r#"{"a": {"b": [1, null]}}"#);
        let concat: String = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(concat, r#"{"a": {"b": [1, null]}}"#);
        assert!(tokens.iter().all(|t| t.kind != kind::ERROR));
    }

    #[test]
    fn analyze_wants_a_leading_brace_and_a_clean_lex() {
        let analyzer = TextAnalyzer::new(r#"  {"a": 1}"#);
        assert_eq!(grammar().analyze(&analyzer), Some(0.8));

        let analyzer = TextAnalyzer::new("[1, 2]");
        assert_eq!(grammar().analyze(&analyzer), None);

        let analyzer = TextAnalyzer::new("{not json at all~~");
        assert_eq!(grammar().analyze(&analyzer), None);
    }
}
