//! INI configuration file grammar.

use std::sync::{Arc, LazyLock};

use tinct_core::kind;
use tinct_lib::grammar::Grammar;

pub fn grammar() -> Arc<Grammar> {
    static GRAMMAR: LazyLock<Arc<Grammar>> = LazyLock::new(build);
    Arc::clone(&GRAMMAR)
}

fn build() -> Arc<Grammar> {
    Grammar::builder("ini")
        .title("INI")
        .description("The INI configuration file format")
        .aliases(["cfg", "dosini"])
        .filenames(["*.ini", "*.cfg", "*.conf"])
        .mimetypes(["text/x-ini"])
        .state("root", |s| {
            s.rule(r"\s+", kind::TEXT_WHITESPACE);
            s.rule(r"[;#][^\n]*", kind::COMMENT_SINGLE);
            s.rule(r"\[[^\]\n]+\]", kind::NAME_NAMESPACE);
            s.rule_groups(
                r"([^\s=;#\[\]]+)([ \t]*)(=)([ \t]*)([^\n]*)",
                &[
                    kind::NAME_ATTRIBUTE,
                    kind::TEXT_WHITESPACE,
                    kind::OPERATOR,
                    kind::TEXT_WHITESPACE,
                    kind::STRING,
                ],
            );
            s.rule(r"\S+", kind::TEXT);
        })
        .build()
}
