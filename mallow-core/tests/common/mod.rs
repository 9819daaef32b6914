// mallow-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers and utilities for Mallow integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh interpreter
//! - [`rep`] - Evaluate code in a fresh interpreter and print the result
//! - [`new_interp`] - Create an interpreter wired to a [`CaptureHost`]
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_prints!`] - Assert the printed rendering of a result
//! - [`assert_eval_err_contains!`] - Assert that code fails with a message

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

// Re-export common types for convenience
#[allow(unused_imports)]
pub use mallow_core::{Error, Host, Interpreter};
#[allow(unused_imports)]
pub use mallow_parser::{Keyword, MallowVal, Symbol};

/// In-memory host: records output lines and serves files from a map.
#[derive(Debug, Default)]
pub struct CaptureHost {
    lines: RefCell<Vec<String>>,
    files: RefCell<HashMap<String, String>>,
}

impl CaptureHost {
    /// Make `contents` readable at `path`.
    pub fn add_file(&self, path: &str, contents: &str) {
        self.files
            .borrow_mut()
            .insert(path.to_string(), contents.to_string());
    }

    /// Every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Host for CaptureHost {
    fn write_line(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }

    fn read_file(&self, path: &str) -> io::Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory")
        })
    }
}

/// Create an interpreter whose output and files go through a [`CaptureHost`].
///
/// # Panics
///
/// Panics if the prelude fails to load (should never happen).
#[must_use]
pub fn new_interp() -> (Interpreter, Rc<CaptureHost>) {
    let host = Rc::new(CaptureHost::default());
    let interp = Interpreter::new(host.clone()).expect("prelude should load");
    (interp, host)
}

/// Evaluate every form in `s` in a fresh interpreter, returning the last.
///
/// # Returns
///
/// Returns the evaluated value, or an error message string.
pub fn eval_str(s: &str) -> Result<MallowVal, String> {
    let (interp, _) = new_interp();
    interp.eval_str(s).map_err(|e| e.to_string())
}

/// Evaluate every form in `s` in a fresh interpreter and print the last
/// value readably.
pub fn rep(s: &str) -> Result<String, String> {
    let (interp, _) = new_interp();
    interp.rep(s).map_err(|e| e.to_string())
}

/// Evaluate in an existing interpreter, returning the error as a string.
pub fn eval_with(interp: &Interpreter, s: &str) -> Result<MallowVal, String> {
    interp.eval_str(s).map_err(|e| e.to_string())
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", MallowVal::Int(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert the readable rendering of evaluating `input`.
///
/// # Example
///
/// ```ignore
/// assert_prints!("(list 1 2)", "(1 2)");
/// ```
#[macro_export]
macro_rules! assert_prints {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::rep($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Printed result of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error containing `pattern`
/// (case-insensitive).
///
/// # Example
///
/// ```ignore
/// assert_eval_err_contains!("(/ 1 0)", "division by zero");
/// ```
#[macro_export]
macro_rules! assert_eval_err_contains {
    ($input:expr, $pattern:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
        let err_msg = result.unwrap_err();
        assert!(
            err_msg.to_lowercase().contains(&$pattern.to_lowercase()),
            "Error message '{}' does not contain '{}'",
            err_msg,
            $pattern
        );
    };
}
