//! HTML grammar.
//!
//! `<script>` and `<style>` bodies are consumed as plain text up to their
//! closing tag; this engine has no JavaScript or CSS grammar to hand them to.

use std::sync::{Arc, LazyLock};

use tinct_core::kind;
use tinct_lib::grammar::Grammar;

pub fn grammar() -> Arc<Grammar> {
    static GRAMMAR: LazyLock<Arc<Grammar>> = LazyLock::new(build);
    Arc::clone(&GRAMMAR)
}

fn build() -> Arc<Grammar> {
    Grammar::builder("html")
        .title("HTML")
        .description("HTML, the standard markup language")
        .filenames(["*.html", "*.htm", "*.xhtml"])
        .mimetypes(["text/html", "application/xhtml+xml"])
        .analyze(|text| {
            if text.doctype_matches("(?i)html") {
                return Some(1.0);
            }
            let head = text.text().trim_start();
            head.get(..5)
                .is_some_and(|lead| lead.eq_ignore_ascii_case("<html"))
                .then_some(0.6)
        })
        .state("root", |s| {
            s.rule(r"[^<&]+", kind::TEXT);
            s.rule(r"&\S*?;", kind::NAME_ENTITY);
            s.rule(r"(?s)<!\[CDATA\[.*?\]\]>", kind::COMMENT_PREPROC);
            s.rule(r"(?s)<!DOCTYPE.*?>", kind::COMMENT_PREPROC);
            s.rule_push("<!--", kind::COMMENT, "comment");
            s.rule(r"(?s)<\?.*?\?>", kind::COMMENT_PREPROC);
            s.rule_with(r"(?i)<\s*script\s*", |c| {
                c.token(kind::NAME_TAG);
                c.push("script_content")?;
                c.push("tag")
            });
            s.rule_with(r"(?i)<\s*style\s*", |c| {
                c.token(kind::NAME_TAG);
                c.push("style_content")?;
                c.push("tag")
            });
            s.rule_push(r"<\s*[a-zA-Z0-9:-]+", kind::NAME_TAG, "tag");
            s.rule(r"<\s*/\s*[a-zA-Z0-9:-]+\s*>", kind::NAME_TAG);
            s.rule("<", kind::TEXT);
        })
        .state("comment", |s| {
            s.rule("[^-]+", kind::COMMENT);
            s.rule_pop("-->", kind::COMMENT);
            s.rule("-", kind::COMMENT);
        })
        .state("tag", |s| {
            s.rule(r"\s+", kind::TEXT);
            s.rule_push(r"[a-zA-Z0-9_:-]+\s*=", kind::NAME_ATTRIBUTE, "attr");
            s.rule(r"[a-zA-Z0-9_:-]+", kind::NAME_ATTRIBUTE);
            s.rule_pop(r"/?\s*>", kind::NAME_TAG);
        })
        .state("attr", |s| {
            s.rule_pop(r#""[^"]*""#, kind::STRING);
            s.rule_pop("'[^']*'", kind::STRING);
            s.rule_pop(r"[^\s>]+", kind::STRING);
        })
        .state("script_content", |s| {
            s.rule_pop(r"(?i)<\s*/\s*script\s*>", kind::NAME_TAG);
            s.rule("[^<]+", kind::TEXT);
            s.rule("<", kind::TEXT);
        })
        .state("style_content", |s| {
            s.rule_pop(r"(?i)<\s*/\s*style\s*>", kind::NAME_TAG);
            s.rule("[^<]+", kind::TEXT);
            s.rule("<", kind::TEXT);
        })
        .build()
}
