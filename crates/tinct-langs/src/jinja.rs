//! Jinja/Django template grammar.
//!
//! A template grammar: everything outside `{{ … }}`, `{% … %}`, and
//! `{# … #}` is handed to the parent grammar (HTML unless overridden via
//! `LexerOptions::parent`), whose own state stack survives across chunks.

use std::sync::{Arc, LazyLock};

use tinct_core::kind;
use tinct_lib::grammar::Grammar;

pub fn grammar() -> Arc<Grammar> {
    static GRAMMAR: LazyLock<Arc<Grammar>> = LazyLock::new(build);
    Arc::clone(&GRAMMAR)
}

fn build() -> Arc<Grammar> {
    Grammar::builder("jinja")
        .title("Jinja")
        .description("Django/Jinja template engine")
        .aliases(["django", "jinja2"])
        .filenames(["*.j2", "*.jinja"])
        .mimetypes(["application/x-jinja", "application/x-django-templating"])
        .parent(|| crate::html::grammar())
        .analyze(|text| {
            (text.text().contains("{%") && text.text().contains("%}")).then_some(0.4)
        })
        .state("root", |s| {
            s.rule(r"(?s)\{#.*?#\}", kind::COMMENT);
            s.rule_push(r"\{\{", kind::COMMENT_PREPROC, "expression");
            s.rule_push(r"\{%", kind::COMMENT_PREPROC, "statement");
            s.rule_with(r"[^{]+", |c| c.delegate_parent(None));
            s.rule_with(r"\{", |c| c.delegate_parent(None));
        })
        .state("expression", |s| {
            s.rule_pop(r"\}\}", kind::COMMENT_PREPROC);
            s.mixin("expr_common");
        })
        .state("statement", |s| {
            s.rule_pop(r"%\}", kind::COMMENT_PREPROC);
            s.rule(
                r"\b(?:if|else|elif|endif|for|endfor|in|is|not|and|or|block|endblock|extends|include|import|set|macro|endmacro|with|endwith|filter|endfilter)\b",
                kind::KEYWORD,
            );
            s.mixin("expr_common");
        })
        .state("expr_common", |s| {
            s.rule(r"\s+", kind::TEXT_WHITESPACE);
            s.rule(r#""[^"]*""#, kind::STRING_DOUBLE);
            s.rule("'[^']*'", kind::STRING_SINGLE);
            s.rule(r"\d+\.\d+", kind::NUM_FLOAT);
            s.rule(r"\d+", kind::NUM_INTEGER);
            s.rule(r"[a-zA-Z_]\w*", kind::NAME_VARIABLE);
            s.rule(r"[|.,:~+\-*/%=<>!\[\]()]+", kind::OPERATOR);
        })
        .build()
}

#[cfg(test)]
mod jinja_tests {
    use tinct_core::{Token, TokenKind, kind};
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

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn expressions_inside_markup() {
        let tokens = lex("<b>{{ name }}</b>");
        assert_eq!(
            kinds(&tokens),
            [
                kind::NAME_TAG,
                kind::COMMENT_PREPROC,
                kind::TEXT_WHITESPACE,
                kind::NAME_VARIABLE,
                kind::TEXT_WHITESPACE,
                kind::COMMENT_PREPROC,
                kind::NAME_TAG,
            ]
        );
        let concat: String = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(concat, "<b>{{ name }}</b>");
    }

    #[test]
    fn statement_keywords() {
        let tokens = lex("{% if user %}");
        assert_eq!(
            kinds(&tokens),
            [
                kind::COMMENT_PREPROC,
                kind::TEXT_WHITESPACE,
                kind::KEYWORD,
                kind::TEXT_WHITESPACE,
                kind::NAME_VARIABLE,
                kind::TEXT_WHITESPACE,
                kind::COMMENT_PREPROC,
            ]
        );
    }

    #[test]
    fn template_comments() {
        let tokens = lex("{# note #}x");
        assert_eq!(
            tokens,
            [
                Token::new(kind::COMMENT, "{# note #}"),
                Token::new(kind::TEXT, "x"),
            ]
        );
    }

    #[test]
    fn parent_state_survives_template_interruptions() {
        // The HTML sub-lexer is mid-tag when the expression interrupts; the
        // following chunk continues inside that tag state.
        let tokens = lex("<b {{x}} c='d'>e");
        assert_eq!(
            kinds(&tokens),
            [
                kind::NAME_TAG,
                kind::TEXT,
                kind::COMMENT_PREPROC,
                kind::NAME_VARIABLE,
                kind::COMMENT_PREPROC,
                kind::TEXT,
                kind::NAME_ATTRIBUTE,
                kind::STRING,
                kind::NAME_TAG,
                kind::TEXT,
            ]
        );
    }

    #[test]
    fn lone_braces_go_to_the_parent() {
        let tokens = lex("{x");
        let concat: String = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(concat, "{x");
        assert!(tokens.iter().all(|t| t.kind != kind::ERROR));
    }
}
