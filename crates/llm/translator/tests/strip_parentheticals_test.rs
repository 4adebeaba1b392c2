//! Unit tests for [`translator::strip_parentheticals`].
//!
//! The model is told not to add parenthetical asides, but when it does they
//! must be removed client-side: every `(...)` span goes, and the final
//! translation carries no surrounding whitespace.

use translator::strip_parentheticals;

#[test]
fn strip_removes_single_span() {
    assert_eq!(
        strip_parentheticals("buy limit 1.2345 (entry zone)"),
        "buy limit 1.2345 "
    );
}

#[test]
fn strip_removes_every_span() {
    assert_eq!(
        strip_parentheticals("TP 1.2400 (first) SL 1.2300 (tight)"),
        "TP 1.2400  SL 1.2300 "
    );
}

#[test]
fn strip_is_non_nested() {
    // Removal runs from a `(` to the next `)`; the outer remainder stays.
    assert_eq!(strip_parentheticals("a(b(c)d)e"), "ad)e");
}

#[test]
fn strip_keeps_unmatched_open_paren() {
    assert_eq!(strip_parentheticals("sell stop (no close"), "sell stop (no close");
    assert_eq!(strip_parentheticals("a)b(c"), "a)b(c");
}

#[test]
fn strip_handles_empty_span_and_no_parens() {
    assert_eq!(strip_parentheticals("TP() hit"), "TP hit");
    assert_eq!(strip_parentheticals("plain signal"), "plain signal");
    assert_eq!(strip_parentheticals(""), "");
}

#[test]
fn strip_handles_multibyte_text() {
    assert_eq!(
        strip_parentheticals("خرید EURUSD (توضیح) حد سود"),
        "خرید EURUSD  حد سود"
    );
}
