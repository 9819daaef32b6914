// mallow-core - Special forms integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for Mallow special forms.
//!
//! Tests for: def!, let*, do, if, fn*, quote

mod common;

use common::{Keyword, MallowVal, eval_str, eval_with, new_interp};

fn kw(name: &str) -> MallowVal {
    MallowVal::keyword(Keyword::new(name))
}

// =============================================================================
// def!
// =============================================================================

#[test]
fn test_def_returns_value() {
    assert_eval!("(def! x 3)", MallowVal::Int(3));
    assert_eval!("(def! x 3) (+ x 1)", MallowVal::Int(4));
}

#[test]
fn test_def_persists_across_calls() {
    let (interp, _) = new_interp();
    eval_with(&interp, "(def! a 6)").unwrap();
    eval_with(&interp, "(def! b (* a 7))").unwrap();
    assert_eq!(eval_with(&interp, "b"), Ok(MallowVal::Int(42)));
}

#[test]
fn test_def_redefines() {
    assert_eval!("(def! x 1) (def! x 2) x", MallowVal::Int(2));
}

#[test]
fn test_def_failure_leaves_binding_untouched() {
    let (interp, _) = new_interp();
    eval_with(&interp, "(def! x 1)").unwrap();
    assert!(eval_with(&interp, "(def! x (undefined-thing))").is_err());
    assert_eq!(eval_with(&interp, "x"), Ok(MallowVal::Int(1)));
}

#[test]
fn test_def_bad_forms() {
    assert_eval_err_contains!("(def! 1 2)", "Invalid 'def!' syntax");
    assert_eval_err_contains!("(def! x)", "Wrong number of arguments to 'def!'");
    assert_eval_err_contains!("(def! x 1 2)", "expected 2, got 3");
}

// =============================================================================
// let*
// =============================================================================

#[test]
fn test_let_basic() {
    assert_eval!("(let* (a 1 b 2) (+ a b))", MallowVal::Int(3));
    assert_eval!("(let* [a 1 b 2] (+ a b))", MallowVal::Int(3));
    assert_eval!("(let* () 5)", MallowVal::Int(5));
}

#[test]
fn test_let_sequential() {
    assert_eval!("(let* (a 2 b (* a 10)) b)", MallowVal::Int(20));
}

#[test]
fn test_let_shadows_without_leaking() {
    assert_eval!("(def! a 1) (let* (a 2) a)", MallowVal::Int(2));
    assert_eval!("(def! a 1) (let* (a 2) a) a", MallowVal::Int(1));
}

#[test]
fn test_let_bad_forms() {
    assert_eval_err_contains!("(let* (a) a)", "even number");
    assert_eval_err_contains!("(let* (1 2) 3)", "must be symbols");
    assert_eval_err_contains!("(let* 5 5)", "list or vector");
    assert_eval_err_contains!("(let* (a 1))", "Wrong number of arguments to 'let*'");
}

// =============================================================================
// do
// =============================================================================

#[test]
fn test_do() {
    assert_eval!("(do)", MallowVal::Nil);
    assert_eval!("(do 1 2 3)", MallowVal::Int(3));
    assert_eval!("(do (def! a 5) (+ a 1))", MallowVal::Int(6));
}

// =============================================================================
// if
// =============================================================================

#[test]
fn test_if_branches() {
    assert_eval!("(if true 1 2)", MallowVal::Int(1));
    assert_eval!("(if false 1 2)", MallowVal::Int(2));
    assert_eval!("(if nil 1 2)", MallowVal::Int(2));
    assert_eval!("(if false 1)", MallowVal::Nil);
}

#[test]
fn test_if_truthiness() {
    // Everything except nil and false is truthy
    assert_eval!("(if 0 :t :f)", kw("t"));
    assert_eval!("(if \"\" :t :f)", kw("t"));
    assert_eval!("(if () :t :f)", kw("t"));
    assert_eval!("(if [] :t :f)", kw("t"));
    assert_eval!("(if {} :t :f)", kw("t"));
}

#[test]
fn test_if_arity() {
    assert_eval_err_contains!("(if true)", "expected 2 to 3, got 1");
    assert_eval_err_contains!("(if true 1 2 3)", "expected 2 to 3, got 4");
}

#[test]
fn test_if_does_not_evaluate_other_branch() {
    assert_eval!("(if true 1 (undefined-thing))", MallowVal::Int(1));
}

// =============================================================================
// fn* and quote
// =============================================================================

#[test]
fn test_fn_creation() {
    assert!(matches!(eval_str("(fn* (x) x)"), Ok(MallowVal::Fn(_))));
    assert!(matches!(eval_str("(fn* [] 1)"), Ok(MallowVal::Fn(_))));
}

#[test]
fn test_fn_bad_forms() {
    assert_eval_err_contains!("(fn* (x))", "Wrong number of arguments to 'fn*'");
    assert_eval_err_contains!("(fn* (1) 1)", "must be symbols");
    assert_eval_err_contains!("(fn* (& ) 1)", "& must be followed");
    assert_eval_err_contains!("(fn* (& a b) 1)", "& must be followed");
    assert_eval_err_contains!("(fn* x 1)", "list or vector");
}

#[test]
fn test_quote() {
    assert_eval!("(quote x)", MallowVal::sym("x"));
    assert_eval!(
        "'(1 a)",
        MallowVal::list(vec![MallowVal::Int(1), MallowVal::sym("a")])
    );
    assert_eval_err_contains!("(quote)", "Wrong number of arguments to 'quote'");
}

// =============================================================================
// Evaluation of non-list forms
// =============================================================================

#[test]
fn test_self_evaluating() {
    assert_eval!("()", MallowVal::empty_list());
    assert_eval!("nil", MallowVal::Nil);
    assert_eval!(":k", kw("k"));
    assert_eval!("\"s\"", MallowVal::string("s"));
}

#[test]
fn test_vector_and_map_elements_evaluated() {
    assert_prints!("[1 (+ 1 1) (* 3 1)]", "[1 2 3]");
    assert_prints!("{:a (+ 1 1) :b [(- 5 1)]}", "{:a 2 :b [4]}");
}

#[test]
fn test_unbound_symbol() {
    assert_eval_err_contains!("abc", "'abc' not found");
    assert_eval_err_contains!("(abc 1 2)", "'abc' not found");
}
