//! Shell grammar covering the common Bourne family.

use std::sync::{Arc, LazyLock};

use tinct_core::kind;
use tinct_lib::grammar::Grammar;

pub fn grammar() -> Arc<Grammar> {
    static GRAMMAR: LazyLock<Arc<Grammar>> = LazyLock::new(build);
    Arc::clone(&GRAMMAR)
}

fn build() -> Arc<Grammar> {
    Grammar::builder("shell")
        .title("shell")
        .description("Various shell languages, including sh and bash")
        .aliases(["bash", "zsh", "ksh", "sh"])
        .filenames(["*.sh", "*.bash", "*.zsh", "*.ksh", ".bashrc", ".zshrc", ".kshrc"])
        .mimetypes(["application/x-sh", "application/x-shellscript"])
        .analyze(|text| {
            ["bash", "sh", "zsh", "ksh"]
                .iter()
                .any(|interp| text.has_shebang(interp))
                .then_some(1.0)
        })
        .state("root", |s| {
            s.mixin("basic");
            s.rule_push("\"", kind::STRING_DOUBLE, "double");
            s.rule("'[^']*'", kind::STRING_SINGLE);
            s.mixin("data");
        })
        .state("basic", |s| {
            s.rule(r"^#![^\n]*", kind::COMMENT_PREPROC);
            s.rule(r"#[^\n]*", kind::COMMENT_SINGLE);
            s.rule(
                r"\b(?:if|fi|then|else|elif|case|esac|for|while|until|do|done|in|function|select|time|return|break|continue|exit)\b",
                kind::KEYWORD,
            );
            s.rule(
                r"\b(?:alias|cd|echo|eval|exec|export|local|printf|pwd|read|set|shift|source|test|trap|unset|wait)\b",
                kind::NAME_BUILTIN,
            );
            s.rule(r"\$\{[^}]*\}", kind::STRING_INTERPOL);
            s.rule(r"\$[a-zA-Z_]\w*", kind::NAME_VARIABLE);
            s.rule(r"\$[0-9@*#?$!-]", kind::NAME_VARIABLE);
            s.rule(r"[\[\]{}()=;|&<>]+", kind::OPERATOR);
        })
        .state("double", |s| {
            s.rule_pop("\"", kind::STRING_DOUBLE);
            s.rule(r"\$\{[^}]*\}", kind::STRING_INTERPOL);
            s.rule(r"\$[a-zA-Z_]\w*", kind::STRING_INTERPOL);
            s.rule(r#"(?s)(?:\\.|[^"\\$])+"#, kind::STRING_DOUBLE);
            s.rule(r"\$", kind::STRING_DOUBLE);
        })
        .state("data", |s| {
            s.rule(r"\s+", kind::TEXT_WHITESPACE);
            s.rule(r"\b\d+\b", kind::NUM_INTEGER);
            s.rule(r#"[^\s\[\]{}()$"'#=;|&<>]+"#, kind::TEXT);
        })
        .build()
}

#[cfg(test)]
mod shell_tests {
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

    #[test]
    fn shebang_line_and_builtins() {
        let tokens = lex("#!/bin/bash\necho hi\n");
        assert_eq!(tokens[0], Token::new(kind::COMMENT_PREPROC, "#!/bin/bash"));
        assert!(tokens.contains(&Token::new(kind::NAME_BUILTIN, "echo")));
    }

    #[test]
    fn shebang_rule_only_fires_at_line_start() {
        let tokens = lex("echo x #!notashebang\n");
        assert!(
            tokens
                .iter()
                .any(|t| t.kind == kind::COMMENT_SINGLE && t.value == "#!notashebang")
        );
    }

    #[test]
    fn double_quotes_with_interpolation() {
        let tokens = lex(r#"echo "a $x b""#);
        assert_eq!(
            tokens,
            [
                Token::new(kind::NAME_BUILTIN, "echo"),
                Token::new(kind::TEXT_WHITESPACE, " "),
                Token::new(kind::STRING_DOUBLE, "\"a "),
                Token::new(kind::STRING_INTERPOL, "$x"),
                Token::new(kind::STRING_DOUBLE, " b\""),
            ]
        );
    }

    #[test]
    fn keywords_and_variables() {
        let tokens = lex("if [ $1 = x ]; then exit; fi\n");
        assert!(tokens.contains(&Token::new(kind::KEYWORD, "if")));
        assert!(tokens.contains(&Token::new(kind::NAME_VARIABLE, "$1")));
        assert!(tokens.contains(&Token::new(kind::KEYWORD, "fi")));
        assert!(tokens.iter().all(|t| t.kind != kind::ERROR));
    }

    #[test]
    fn analyze_is_certain_about_recognized_shebangs() {
        let analyzer = TextAnalyzer::new("#!/usr/bin/env bash\nls\n");
        assert_eq!(grammar().analyze(&analyzer), Some(1.0));

        let analyzer = TextAnalyzer::new("#!/usr/bin/env python\n");
        assert_eq!(grammar().analyze(&analyzer), None);

        let analyzer = TextAnalyzer::new("no shebang here");
        assert_eq!(grammar().analyze(&analyzer), None);
    }
}
