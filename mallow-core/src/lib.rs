// mallow-core - Runtime and evaluator for the Mallow language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # mallow-core
//!
//! Runtime and evaluator for the Mallow language.
//! Provides a tail-call-optimizing interpreter for `MallowVal` expressions.

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod host;
pub mod interpreter;

pub use builtins::register_builtins;
pub use env::{Env, WeakEnv};
pub use error::{AritySpec, Error, Result};
pub use eval::{
    DEFAULT_MAX_EVAL_DEPTH, NativeFnImpl, apply, eval, get_eval_depth, get_max_eval_depth,
    make_native_fn, set_max_eval_depth,
};
pub use host::{Host, StdHost};
pub use interpreter::Interpreter;

// Re-export parser types for convenience
pub use mallow_parser::{
    Keyword, MAX_NESTING_DEPTH, MallowVal, ParseError, Symbol, pr_str, read_str,
};
