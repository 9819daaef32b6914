// mallow-core - Special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Special forms: `def!`, `let*`, `do`, `if`, `fn*`, `quote` and
//! `quasiquote`.
//!
//! Forms that end in a tail position return a [`Step`] so the caller's loop
//! can carry on without growing the stack.

use std::any::Any;
use std::rc::Rc;

use mallow_parser::{MallowFn, MallowVal, Symbol, Vector};
use tracing::debug;

use super::{Step, eval};
use crate::env::Env;
use crate::error::{Error, Result};

/// (def! name expr) - bind in the current scope
pub(crate) fn eval_def(args: &[MallowVal], env: &Env) -> Result<MallowVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("def!", 2, args.len()));
    }

    let sym = match &args[0] {
        MallowVal::Symbol(s) => s.clone(),
        other => {
            return Err(Error::syntax(
                "def!",
                format!("first argument must be a symbol, got {}", other.type_name()),
            ));
        }
    };

    let val = match eval(&args[1], env)? {
        // Anonymous closures take the name they are first bound to
        MallowVal::Fn(f) if f.name.is_none() => MallowVal::Fn(f.with_name(sym.clone())),
        other => other,
    };

    debug!(name = %sym, value = %val, "def!");
    env.define(sym, val.clone());
    Ok(val)
}

/// (let* bindings body) - sequential bindings in a new scope
pub(crate) fn eval_let(args: &[MallowVal], env: &Env) -> Result<Step> {
    if args.len() != 2 {
        return Err(Error::arity_named("let*", 2, args.len()));
    }

    let bindings = args[0].as_seq().ok_or_else(|| {
        Error::syntax("let*", "bindings must be a list or vector")
    })?;

    if bindings.len() % 2 != 0 {
        return Err(Error::syntax(
            "let*",
            "bindings must have an even number of forms",
        ));
    }

    let let_env = env.child();
    let bindings: Vec<&MallowVal> = bindings.iter().collect();
    for pair in bindings.chunks(2) {
        let sym = match pair[0] {
            MallowVal::Symbol(s) => s.clone(),
            other => {
                return Err(Error::syntax(
                    "let*",
                    format!("binding names must be symbols, got {}", other.type_name()),
                ));
            }
        };
        // Later initialisers see earlier bindings
        let val = eval(pair[1], &let_env)?;
        let_env.define(sym, val);
    }

    Ok(Step::Continue(args[1].clone(), let_env))
}

/// (do exprs*) - evaluate in order, last one in tail position
pub(crate) fn eval_do(args: &[MallowVal], env: &Env) -> Result<Step> {
    let Some((last, init)) = args.split_last() else {
        return Ok(Step::Done(MallowVal::Nil));
    };

    for expr in init {
        eval(expr, env)?;
    }
    Ok(Step::Continue(last.clone(), env.clone()))
}

/// (if test then else?) - only nil and false are falsy
pub(crate) fn eval_if(args: &[MallowVal], env: &Env) -> Result<Step> {
    if args.len() < 2 || args.len() > 3 {
        return Err(Error::arity_range_named("if", 2, 3, args.len()));
    }

    let test = eval(&args[0], env)?;

    if test.is_truthy() {
        Ok(Step::Continue(args[1].clone(), env.clone()))
    } else if let Some(else_branch) = args.get(2) {
        Ok(Step::Continue(else_branch.clone(), env.clone()))
    } else {
        Ok(Step::Done(MallowVal::Nil))
    }
}

/// (fn* params body) - create a closure over the current environment
pub(crate) fn eval_fn(args: &[MallowVal], env: &Env) -> Result<MallowVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("fn*", 2, args.len()));
    }

    let param_forms = args[0].as_seq().ok_or_else(|| {
        Error::syntax("fn*", "parameters must be a list or vector")
    })?;
    let (params, rest_param) = parse_params(param_forms)?;

    let captured: Rc<dyn Any> = Rc::new(env.clone());
    Ok(MallowVal::Fn(MallowFn::new(
        params,
        rest_param,
        args[1].clone(),
        captured,
    )))
}

/// Split a parameter list into fixed parameters and an optional `& rest`.
fn parse_params(forms: &Vector<MallowVal>) -> Result<(Vec<Symbol>, Option<Symbol>)> {
    let mut params = Vec::with_capacity(forms.len());
    let mut iter = forms.iter();

    while let Some(form) = iter.next() {
        let sym = match form {
            MallowVal::Symbol(s) => s,
            other => {
                return Err(Error::syntax(
                    "fn*",
                    format!("parameters must be symbols, got {}", other.type_name()),
                ));
            }
        };

        if sym.name() == "&" {
            return match (iter.next(), iter.next()) {
                (Some(MallowVal::Symbol(rest)), None) => Ok((params, Some(rest.clone()))),
                _ => Err(Error::syntax(
                    "fn*",
                    "& must be followed by exactly one symbol",
                )),
            };
        }
        params.push(sym.clone());
    }

    Ok((params, None))
}

/// (quote form) - return form unevaluated
pub(crate) fn eval_quote(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("quote", 1, args.len()));
    }
    Ok(args[0].clone())
}

// ============================================================================
// Quasiquote
// ============================================================================

/// (quasiquote form) - quote with `unquote` and `splice-unquote` holes
pub(crate) fn eval_quasiquote(args: &[MallowVal], env: &Env) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("quasiquote", 1, args.len()));
    }
    quasiquote(&args[0], env)
}

fn quasiquote(form: &MallowVal, env: &Env) -> Result<MallowVal> {
    match form {
        MallowVal::List(items) => {
            if let Some(arg) = marked_operand(items, "unquote")? {
                return eval(arg, env);
            }
            Ok(MallowVal::List(quasiquote_items(items, env)?))
        }
        MallowVal::Vector(items) => Ok(MallowVal::Vector(quasiquote_items(items, env)?)),
        _ => Ok(form.clone()),
    }
}

fn quasiquote_items(items: &Vector<MallowVal>, env: &Env) -> Result<Vector<MallowVal>> {
    let mut out = Vector::new();
    for item in items {
        let spliced = match item {
            MallowVal::List(inner) => marked_operand(inner, "splice-unquote")?,
            _ => None,
        };

        match spliced {
            Some(arg) => match eval(arg, env)? {
                MallowVal::List(elems) | MallowVal::Vector(elems) => out.append(elems),
                other => {
                    return Err(Error::type_error_in(
                        "splice-unquote",
                        "list or vector",
                        other.type_name(),
                    ));
                }
            },
            None => out.push_back(quasiquote(item, env)?),
        }
    }
    Ok(out)
}

/// If `items` is `(marker x)`, return `x`.
fn marked_operand<'a>(
    items: &'a Vector<MallowVal>,
    marker: &'static str,
) -> Result<Option<&'a MallowVal>> {
    match items.front() {
        Some(MallowVal::Symbol(s)) if s.name() == marker => {
            if items.len() != 2 {
                return Err(Error::arity_named(marker, 1, items.len() - 1));
            }
            Ok(items.get(1))
        }
        _ => Ok(None),
    }
}
