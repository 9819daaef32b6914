// mallow-core - Tail-call-optimising evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Evaluator for Mallow expressions.
//!
//! `eval` runs a loop over an `(expr, env)` pair. Special forms in tail
//! position (`if`, `do`, `let*`) and closure application replace the pair and
//! go round the loop again instead of recursing, so tail recursion in Mallow
//! code runs in constant host stack. Everything else (argument evaluation,
//! native calls, binding initialisers) recurses through `eval` and is counted
//! by the depth guard. Each recursive `eval` runs under
//! [`ensure_sufficient_stack`], so the guard, not the size of the calling
//! thread's stack, decides how deep evaluation may go.

// Atoms hold a RefCell, but their Hash/Eq only look at the pointer
#![allow(clippy::mutable_key_type)]

pub mod apply;
pub mod special_forms;

pub use apply::{NativeFnImpl, apply, make_native_fn};

use std::cell::Cell;

use mallow_parser::{IndexMap, MallowVal, Vector, ensure_sufficient_stack};
use tracing::trace;

use crate::env::Env;
use crate::error::{Error, Result};

use apply::{apply_native, bind_params};
use special_forms::{
    eval_def, eval_do, eval_fn, eval_if, eval_let, eval_quasiquote, eval_quote,
};

// ============================================================================
// Stack Overflow Protection
// ============================================================================

/// Maximum nesting depth for eval. Can be configured via `set_max_eval_depth`.
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 10_000;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum eval nesting depth. Returns the previous value.
#[inline]
#[must_use]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval nesting depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Get the current eval nesting depth.
#[inline]
#[must_use]
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

/// RAII guard to manage the eval depth counter.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get() + 1;
            d.set(current);
            (current, MAX_EVAL_DEPTH.with(|m| m.get()))
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::StackOverflow(max))
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Outcome of one evaluation step.
pub(crate) enum Step {
    /// Evaluation finished with a value.
    Done(MallowVal),
    /// Continue the loop with a new expression and environment.
    Continue(MallowVal, Env),
}

/// Evaluate an expression in an environment.
///
/// # Errors
///
/// Returns an error if:
/// - A symbol is not bound
/// - A special form is malformed
/// - The head of a call is not callable, or gets the wrong number of arguments
/// - A native function fails
/// - Nesting exceeds the limit set by [`set_max_eval_depth`]
pub fn eval(expr: &MallowVal, env: &Env) -> Result<MallowVal> {
    let _guard = EvalDepthGuard::new()?;
    ensure_sufficient_stack(|| eval_loop(expr, env))
}

fn eval_loop(expr: &MallowVal, env: &Env) -> Result<MallowVal> {
    trace!(form = %expr, "eval");

    let mut expr = expr.clone();
    let mut env = env.clone();

    loop {
        let items: Vec<MallowVal> = match &expr {
            MallowVal::List(items) if !items.is_empty() => items.iter().cloned().collect(),
            _ => return eval_ast(&expr, &env),
        };

        match eval_list(&items, &env)? {
            Step::Done(val) => return Ok(val),
            Step::Continue(next_expr, next_env) => {
                expr = next_expr;
                env = next_env;
            }
        }
    }
}

/// Evaluate a form that is not a non-empty list.
fn eval_ast(expr: &MallowVal, env: &Env) -> Result<MallowVal> {
    match expr {
        MallowVal::Symbol(sym) => env.lookup(sym),

        MallowVal::Vector(items) => {
            let evaluated = items
                .iter()
                .map(|item| eval(item, env))
                .collect::<Result<Vector<_>>>()?;
            Ok(MallowVal::Vector(evaluated))
        }

        MallowVal::Map(map) => {
            let mut evaluated = IndexMap::with_capacity(map.len());
            for (k, v) in map.iter() {
                evaluated.insert(eval(k, env)?, eval(v, env)?);
            }
            Ok(MallowVal::Map(evaluated.into()))
        }

        // Everything else, including the empty list, evaluates to itself
        _ => Ok(expr.clone()),
    }
}

/// Evaluate a non-empty list: a special form or an application.
fn eval_list(items: &[MallowVal], env: &Env) -> Result<Step> {
    if let MallowVal::Symbol(sym) = &items[0] {
        let args = &items[1..];
        match sym.name() {
            "def!" => return eval_def(args, env).map(Step::Done),
            "let*" => return eval_let(args, env),
            "do" => return eval_do(args, env),
            "if" => return eval_if(args, env),
            "fn*" => return eval_fn(args, env).map(Step::Done),
            "quote" => return eval_quote(args).map(Step::Done),
            "quasiquote" => return eval_quasiquote(args, env).map(Step::Done),
            _ => {}
        }
    }

    let op = eval(&items[0], env)?;
    let args = items[1..]
        .iter()
        .map(|item| eval(item, env))
        .collect::<Result<Vec<_>>>()?;

    match op {
        MallowVal::Fn(f) => {
            let fn_env = bind_params(&f, args)?;
            trace!(name = ?f.name, "tail call");
            Ok(Step::Continue((*f.body).clone(), fn_env))
        }
        MallowVal::NativeFn(nf) => apply_native(&nf, &args).map(Step::Done),
        other => Err(Error::not_callable(&other)),
    }
}
