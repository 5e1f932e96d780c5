use tinct_lib::registry::GuessInput;

use crate::registry;

#[test]
fn registry_exposes_all_enabled_grammars() {
    let grammars = crate::all();
    assert!(!grammars.is_empty());
    for grammar in &grammars {
        assert!(!grammar.tag().is_empty());
    }
    assert!(crate::find("plaintext").is_some());
}

#[test]
fn find_resolves_aliases_case_insensitively() {
    assert_eq!(crate::find("text").unwrap().tag(), "plaintext");

    #[cfg(feature = "lang-jinja")]
    assert_eq!(crate::find("Django").unwrap().tag(), "jinja");

    #[cfg(feature = "lang-shell")]
    assert_eq!(crate::find("BASH").unwrap().tag(), "shell");

    assert!(crate::find("cobol").is_none());
}

#[test]
#[cfg(feature = "lang-json")]
fn guess_by_mimetype() {
    let guessed = registry()
        .guess(&GuessInput::new().mimetype("application/json"))
        .expect("guess");
    assert_eq!(guessed.tag(), "json");
}

#[test]
#[cfg(all(feature = "lang-nginx", feature = "lang-ini"))]
fn guess_prefers_the_more_specific_filename() {
    // nginx.conf (no wildcards) must beat ini's *.conf (one wildcard).
    let guessed = registry()
        .guess(&GuessInput::new().filename("/etc/nginx/nginx.conf"))
        .expect("guess");
    assert_eq!(guessed.tag(), "nginx");

    let guessed = registry()
        .guess(&GuessInput::new().filename("site.conf"))
        .expect("guess");
    assert_eq!(guessed.tag(), "ini");
}

#[test]
#[cfg(feature = "lang-shell")]
fn guess_by_shebang() {
    let guessed = registry()
        .guess(&GuessInput::new().source("#!/bin/bash\necho hi\n"))
        .expect("guess");
    assert_eq!(guessed.tag(), "shell");
}

#[test]
#[cfg(feature = "lang-html")]
fn guess_by_doctype() {
    let guessed = registry()
        .guess(&GuessInput::new().source("<!DOCTYPE html>\n<html></html>\n"))
        .expect("guess");
    assert_eq!(guessed.tag(), "html");
}

#[test]
#[cfg(feature = "lang-json")]
fn guess_by_content_without_filename_match() {
    // No filename signal narrows the pool, so json's 0.8 must clear the
    // strict 0.5 threshold on its own.
    let guessed = registry()
        .guess(&GuessInput::new().filename("README").source("{\"a\": [1, 2]}"))
        .expect("guess");
    assert_eq!(guessed.tag(), "json");
}

#[test]
fn lenient_guess_defaults_to_plaintext() {
    let guessed = registry().guess_or_plaintext(&GuessInput::new().source("just some prose"));
    assert_eq!(guessed.tag(), "plaintext");
}

#[test]
fn grammar_metadata_is_complete() {
    for grammar in crate::all() {
        assert!(!grammar.title().is_empty(), "{} has no title", grammar.tag());
        assert!(
            !grammar.description().is_empty(),
            "{} has no description",
            grammar.tag()
        );
    }
}
