use tinct_core::{Token, kind, theme};

use crate::format::html::escape_html;
use crate::format::{Formatter, HtmlFormatter, NullFormatter, TerminalFormatter, highlight};
use crate::grammar::Grammar;

fn escaped(text: &str) -> String {
    let mut out = String::new();
    escape_html(text, &mut out);
    out
}

#[test]
fn html_escaping() {
    assert_eq!(escaped("<&>\"'"), "&lt;&amp;&gt;&quot;&#39;");
    assert_eq!(escaped("plain"), "plain");
}

#[test]
fn spans_use_shortname_classes() {
    let tokens = [
        Token::new(kind::KEYWORD, "if"),
        Token::new(kind::TEXT, " x<y"),
    ];
    let html = HtmlFormatter::new().format(&tokens);
    assert_eq!(
        html,
        "<pre class=\"highlight\"><code><span class=\"k\">if</span> x&lt;y</code></pre>\n"
    );
}

#[test]
fn nowrap_skips_the_container() {
    let tokens = [Token::new(kind::KEYWORD, "if")];
    let html = HtmlFormatter::new().nowrap(true).format(&tokens);
    assert_eq!(html, "<span class=\"k\">if</span>");
}

#[test]
fn custom_css_class() {
    let html = HtmlFormatter::new()
        .css_class("chroma")
        .format(&[Token::new(kind::TEXT, "x")]);
    assert!(html.starts_with("<pre class=\"chroma\">"));
}

#[test]
fn inline_theme_emits_style_attributes() {
    let tokens = [
        Token::new(kind::NAME_TAG, "div"),
        Token::new(kind::PUNCTUATION, ">"),
    ];
    let html = HtmlFormatter::new()
        .nowrap(true)
        .inline_theme(theme::bw())
        .format(&tokens);
    // Name.Tag is bold in bw; Punctuation is unstyled and stays bare.
    assert_eq!(
        html,
        "<span style=\"font-weight: bold;\">div</span>&gt;"
    );
}

#[test]
fn line_numbers_cover_an_unterminated_final_line() {
    let tokens = [Token::new(kind::TEXT, "a\nb")];
    let html = HtmlFormatter::new()
        .nowrap(true)
        .line_numbers(true)
        .format(&tokens);
    assert!(html.contains("<td class=\"linenos\"><pre>1\n2</pre></td>"));
    // The synthesized trailing whitespace closes the last line.
    assert!(html.contains("a\nb<span class=\"w\">\n</span>"));
}

#[test]
fn line_numbers_with_terminated_input() {
    let tokens = [Token::new(kind::TEXT, "a\nb\n")];
    let html = HtmlFormatter::new()
        .nowrap(true)
        .line_numbers(true)
        .format(&tokens);
    assert!(html.contains("<td class=\"linenos\"><pre>1\n2</pre></td>"));
    assert!(!html.contains("<span class=\"w\">"));
}

#[test]
fn terminal_styles_tokens_from_the_theme() {
    let tokens = [Token::new(kind::KEYWORD, "fn")];
    let out = TerminalFormatter::new(theme::aurora()).format(&tokens);
    // aurora keywords: bold, fg #b48ead.
    assert_eq!(out, "\x1b[1;38;2;180;142;173mfn\x1b[0m");
}

#[test]
fn terminal_passes_unstyled_tokens_through() {
    let tokens = [Token::new(kind::PUNCTUATION, "{")];
    let out = TerminalFormatter::new(theme::bw()).format(&tokens);
    assert_eq!(out, "{");
}

#[test]
fn null_formatter_reproduces_the_source() {
    let tokens = [
        Token::new(kind::KEYWORD, "if"),
        Token::new(kind::TEXT, " x"),
    ];
    assert_eq!(NullFormatter.format(&tokens), "if x");
}

#[test]
fn highlight_end_to_end() {
    let grammar = Grammar::builder("digits")
        .state("root", |s| {
            s.rule(r"\d+", kind::NUM_INTEGER);
            s.rule(r"\s+", kind::TEXT_WHITESPACE);
        })
        .build();
    let out = highlight("12 34", grammar, &NullFormatter).expect("highlight");
    assert_eq!(out, "12 34");
}
