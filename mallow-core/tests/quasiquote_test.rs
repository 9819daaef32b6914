// mallow-core - Quasiquote integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for quasiquote, unquote and splice-unquote.

mod common;

use common::MallowVal;

#[test]
fn test_quasiquote_without_holes() {
    assert_eval!("`x", MallowVal::sym("x"));
    assert_eval!("`7", MallowVal::Int(7));
    assert_prints!("`(a (b c) [d])", "(a (b c) [d])");
}

#[test]
fn test_unquote() {
    assert_prints!("(def! x 5) `(a ~x b)", "(a 5 b)");
    assert_prints!("(def! lst '(b c)) `(a ~lst d)", "(a (b c) d)");
    assert_prints!("`(1 ~(+ 1 1))", "(1 2)");
    assert_eval!("(def! x 5) `~x", MallowVal::Int(5));
}

#[test]
fn test_splice_unquote() {
    assert_prints!("(def! lst '(b c)) `(a ~@lst d)", "(a b c d)");
    assert_prints!("(def! v [1 2]) `[0 ~@v 3]", "[0 1 2 3]");
    assert_prints!("`(1 ~@() 2)", "(1 2)");
}

#[test]
fn test_nested_structure() {
    assert_prints!(
        "(def! x 1) (def! xs [2 3]) `(a (b ~x [~@xs]))",
        "(a (b 1 [2 3]))"
    );
}

#[test]
fn test_quasiquote_long_forms() {
    assert_prints!("(quasiquote (a (unquote (* 2 3))))", "(a 6)");
    assert_prints!(
        "(quasiquote (a (splice-unquote (list 1 2))))",
        "(a 1 2)"
    );
}

#[test]
fn test_splice_non_sequence() {
    assert_eval_err_contains!("`(a ~@1)", "splice-unquote: expected list or vector, got int");
}

#[test]
fn test_unquote_arity() {
    assert_eval_err_contains!("`(a (unquote 1 2))", "Wrong number of arguments to 'unquote'");
}
