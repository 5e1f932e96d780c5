//! nginx configuration grammar.

use std::sync::{Arc, LazyLock};

use tinct_core::kind;
use tinct_lib::grammar::Grammar;

pub fn grammar() -> Arc<Grammar> {
    static GRAMMAR: LazyLock<Arc<Grammar>> = LazyLock::new(build);
    Arc::clone(&GRAMMAR)
}

fn build() -> Arc<Grammar> {
    Grammar::builder("nginx")
        .title("nginx")
        .description("Configuration files for the nginx web server")
        .filenames(["nginx.conf"])
        .mimetypes(["text/x-nginx-conf"])
        .state("root", |s| {
            s.mixin("space");
            s.rule_push(r"[^\s;#{}]+", kind::KEYWORD, "statement");
        })
        .state("statement", |s| {
            s.mixin("space");
            s.rule_with(r"\{", |c| {
                c.token(kind::PUNCTUATION);
                c.goto("block")
            });
            s.rule_pop(";", kind::PUNCTUATION);
            s.rule(r"\$[a-zA-Z_]\w*", kind::NAME_VARIABLE);
            s.rule(r"[^\s;#{}$]+", kind::STRING);
        })
        .state("block", |s| {
            s.mixin("space");
            s.rule_pop(r"\}", kind::PUNCTUATION);
            s.rule_push(r"[^\s;#{}]+", kind::KEYWORD, "statement");
        })
        .state("space", |s| {
            s.rule(r"\s+", kind::TEXT_WHITESPACE);
            s.rule(r"#[^\n]*", kind::COMMENT_SINGLE);
        })
        .build()
}
