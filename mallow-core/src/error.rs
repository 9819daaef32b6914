// mallow-core - Error types for the Mallow evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for Mallow evaluation.

use std::fmt;
use std::io;
use std::rc::Rc;

use mallow_parser::{MallowVal, ParseError, Symbol};
use thiserror::Error;

/// Result type for Mallow evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or evaluating.
///
/// Any error aborts the current top-level evaluation only.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed source text
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// Symbol not bound anywhere in the environment chain
    #[error("'{0}' not found")]
    UnboundSymbol(Symbol),

    /// Wrong number of arguments or operands
    #[error("{}", format_arity(.name, .expected, .got))]
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },

    /// Application head is neither a closure nor a native function
    #[error("Cannot call value: {0}")]
    NotCallable(String),

    /// Wrong type for an operation
    #[error("{}: expected {expected}, got {got}", type_context(.context))]
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },

    /// Index outside a sequence
    #[error("Index {index} out of bounds for collection of length {length}")]
    IndexOutOfBounds { index: i64, length: usize },

    /// Malformed special form
    #[error("Invalid '{form}' syntax: {message}")]
    InvalidSyntax { form: &'static str, message: String },

    /// Integer division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Integer arithmetic overflow
    #[error("Integer overflow in '{0}'")]
    Overflow(&'static str),

    /// Nested evaluation exceeded the configured depth
    #[error("Stack overflow: evaluation depth exceeded {0}")]
    StackOverflow(usize),

    /// File could not be read
    #[error("Error reading '{path}': {err}")]
    Io { path: String, err: Rc<io::Error> },
}

/// Specification for expected arity.
#[derive(Debug, Clone, PartialEq)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

fn format_arity(name: &Option<String>, expected: &AritySpec, got: &usize) -> String {
    match name {
        Some(name) => format!(
            "Wrong number of arguments to '{}': expected {}, got {}",
            name, expected, got
        ),
        None => format!(
            "Wrong number of arguments: expected {}, got {}",
            expected, got
        ),
    }
}

fn type_context(context: &Option<String>) -> &str {
    context.as_deref().unwrap_or("Type error")
}

impl Error {
    /// Create an arity error for exact arity.
    pub fn arity(expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: None,
        }
    }

    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity with function name.
    pub fn arity_at_least_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for a range with function name.
    pub fn arity_range_named(
        name: impl Into<String>,
        min: usize,
        max: usize,
        got: usize,
    ) -> Self {
        Error::ArityError {
            expected: AritySpec::Range(min, max),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }

    /// Create a not-callable error for a value.
    pub fn not_callable(val: &MallowVal) -> Self {
        Error::NotCallable(val.to_string())
    }

    /// Wrap an I/O failure on `path`.
    pub fn io(path: impl Into<String>, err: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            err: Rc::new(err),
        }
    }
}
