// mallow-core - Error handling integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for error reporting and recovery.

mod common;

use common::{Error, MallowVal, eval_with, new_interp};
use mallow_core::{
    DEFAULT_MAX_EVAL_DEPTH, MAX_NESTING_DEPTH, get_eval_depth, get_max_eval_depth,
    set_max_eval_depth,
};

/// Restores the previous depth limit when dropped.
struct DepthLimit(usize);

impl DepthLimit {
    fn set(max: usize) -> Self {
        DepthLimit(set_max_eval_depth(max))
    }
}

impl Drop for DepthLimit {
    fn drop(&mut self) {
        let _ = set_max_eval_depth(self.0);
    }
}

#[test]
fn test_error_messages() {
    assert_eval_err_contains!("nope", "'nope' not found");
    assert_eval_err_contains!("(count 1)", "count: expected countable, got int");
    assert_eval_err_contains!("(first 1)", "first: expected list or vector, got int");
    assert_eval_err_contains!("(slurp 1)", "slurp: expected string, got int");
}

#[test]
fn test_error_aborts_only_current_evaluation() {
    let (interp, _) = new_interp();
    eval_with(&interp, "(def! a 1)").unwrap();
    assert!(eval_with(&interp, "(+ a :oops)").is_err());
    assert_eq!(eval_with(&interp, "(+ a 1)"), Ok(MallowVal::Int(2)));
}

#[test]
fn test_rep_reports_errors() {
    let (interp, _) = new_interp();
    let err = interp.rep("(undefined-thing)").unwrap_err();
    assert!(matches!(err, Error::UnboundSymbol(_)));
    assert_eq!(interp.rep("(+ 1 1)").map_err(|e| e.to_string()), Ok("2".to_string()));
}

#[test]
fn test_runaway_recursion_is_stack_overflow() {
    let _limit = DepthLimit::set(100);
    let (interp, _) = new_interp();
    eval_with(&interp, "(def! down (fn* (n) (+ 1 (down (- n 1)))))").unwrap();

    let err = interp.eval_str("(down 0)").unwrap_err();
    assert!(matches!(err, Error::StackOverflow(100)), "got {:?}", err);

    // The depth counter unwinds with the error
    assert_eq!(get_eval_depth(), 0);
    assert_eq!(eval_with(&interp, "(+ 1 1)"), Ok(MallowVal::Int(2)));
}

#[test]
fn test_default_depth_limit_holds_on_test_thread() {
    assert_eq!(get_max_eval_depth(), DEFAULT_MAX_EVAL_DEPTH);
    let (interp, _) = new_interp();
    eval_with(
        &interp,
        "(def! down (fn* (n) (if (= n 0) 0 (+ 1 (down (- n 1))))))",
    )
    .unwrap();

    assert_eq!(eval_with(&interp, "(down 9000)"), Ok(MallowVal::Int(9000)));

    let err = interp.eval_str("(down 20000)").unwrap_err();
    assert!(
        matches!(err, Error::StackOverflow(n) if n == DEFAULT_MAX_EVAL_DEPTH),
        "got {:?}",
        err
    );
    assert_eq!(get_eval_depth(), 0);
    assert_eq!(eval_with(&interp, "(+ 1 1)"), Ok(MallowVal::Int(2)));
}

#[test]
fn test_deeply_nested_source_is_syntax_error() {
    let (interp, _) = new_interp();
    let src = "(".repeat(200_000);
    let err = interp.eval_str(&src).unwrap_err();
    assert!(matches!(err, Error::Syntax(_)), "got {:?}", err);
    assert!(err.to_string().contains("nesting too deep"));

    let form = format!("(read-string \"{}\")", "[".repeat(MAX_NESTING_DEPTH + 1));
    let err = interp.eval_str(&form).unwrap_err();
    assert!(err.to_string().contains("nesting too deep"), "got {}", err);

    assert_eq!(eval_with(&interp, "(+ 1 1)"), Ok(MallowVal::Int(2)));
}

#[test]
fn test_tail_calls_do_not_count_toward_depth() {
    let _limit = DepthLimit::set(100);
    assert_eq!(get_max_eval_depth(), 100);
    let (interp, _) = new_interp();
    let result = eval_with(
        &interp,
        "(def! loop (fn* (n) (if (= n 0) :done (loop (- n 1)))))
         (loop 10000)",
    );
    assert_eq!(
        result,
        Ok(MallowVal::keyword(common::Keyword::new("done")))
    );
}

#[test]
fn test_io_error_is_typed() {
    let (interp, _) = new_interp();
    match interp.eval_str("(slurp \"nowhere.txt\")") {
        Err(Error::Io { path, .. }) => assert_eq!(path, "nowhere.txt"),
        other => panic!("expected Io error, got {:?}", other),
    }
}
