use std::collections::HashSet;

use crate::kind::{self, TokenKind};

#[test]
fn lookup_by_qualname() {
    assert_eq!(kind::from_qualname("String.Double"), Some(kind::STRING_DOUBLE));
    assert_eq!(kind::from_qualname("Token"), Some(kind::TOKEN));
    assert_eq!(kind::from_qualname("Keyword.Constant"), Some(kind::KEYWORD_CONSTANT));
    assert_eq!(kind::from_qualname("NoSuchKind"), None);
}

#[test]
fn parents_reach_the_root() {
    assert_eq!(kind::STRING_DOUBLE.parent(), Some(kind::STRING));
    assert_eq!(kind::STRING.parent(), Some(kind::TOKEN));
    assert_eq!(kind::TOKEN.parent(), None);
}

#[test]
fn every_kind_but_the_root_has_a_parent() {
    for &k in kind::ALL {
        if k != kind::TOKEN {
            assert!(k.parent().is_some(), "{} has no parent", k.qualname());
        }
    }
}

#[test]
fn ancestors_innermost_first() {
    let names: Vec<&str> = kind::NUM_INTEGER
        .ancestors()
        .map(TokenKind::qualname)
        .collect();
    assert_eq!(names, ["Num.Integer", "Num", "Token"]);
}

#[test]
fn is_within_walks_upward() {
    assert!(kind::STRING_DOUBLE.is_within(kind::STRING));
    assert!(kind::STRING_DOUBLE.is_within(kind::TOKEN));
    assert!(!kind::STRING_DOUBLE.is_within(kind::NUM));
}

#[test]
fn shortnames() {
    assert_eq!(kind::TEXT.shortname(), "");
    assert_eq!(kind::TOKEN.shortname(), "");
    assert_eq!(kind::ERROR.shortname(), "err");
    assert_eq!(kind::STRING_DOUBLE.shortname(), "s2");
    assert_eq!(kind::TEXT_WHITESPACE.shortname(), "w");
}

#[test]
fn qualnames_are_unique() {
    let mut seen = HashSet::new();
    for &k in kind::ALL {
        assert!(seen.insert(k.qualname()), "duplicate {}", k.qualname());
    }
}

#[test]
fn identity_equality() {
    let a = kind::KEYWORD;
    let b = kind::KEYWORD;
    assert_eq!(a, b);
    assert_ne!(kind::KEYWORD, kind::KEYWORD_CONSTANT);
}
