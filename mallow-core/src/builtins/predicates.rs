// mallow-core - Type predicate built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates: nil?, true?, false?, symbol?, keyword?, string?,
//! number?, fn?, list?, vector?, map?

use mallow_parser::MallowVal;

use crate::error::{Error, Result};

/// Check a single argument against a predicate.
fn check_one(
    name: &'static str,
    args: &[MallowVal],
    pred: fn(&MallowVal) -> bool,
) -> Result<MallowVal> {
    match args {
        [val] => Ok(MallowVal::Bool(pred(val))),
        _ => Err(Error::arity_named(name, 1, args.len())),
    }
}

pub(crate) fn builtin_nil_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("nil?", args, |v| matches!(v, MallowVal::Nil))
}

pub(crate) fn builtin_true_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("true?", args, |v| matches!(v, MallowVal::Bool(true)))
}

pub(crate) fn builtin_false_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("false?", args, |v| matches!(v, MallowVal::Bool(false)))
}

pub(crate) fn builtin_symbol_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("symbol?", args, |v| matches!(v, MallowVal::Symbol(_)))
}

pub(crate) fn builtin_keyword_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("keyword?", args, |v| matches!(v, MallowVal::Keyword(_)))
}

pub(crate) fn builtin_string_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("string?", args, |v| matches!(v, MallowVal::String(_)))
}

pub(crate) fn builtin_number_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("number?", args, |v| {
        matches!(v, MallowVal::Int(_) | MallowVal::Float(_))
    })
}

pub(crate) fn builtin_fn_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("fn?", args, MallowVal::is_callable)
}

pub(crate) fn builtin_list_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("list?", args, |v| matches!(v, MallowVal::List(_)))
}

pub(crate) fn builtin_vector_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("vector?", args, |v| matches!(v, MallowVal::Vector(_)))
}

pub(crate) fn builtin_map_p(args: &[MallowVal]) -> Result<MallowVal> {
    check_one("map?", args, |v| matches!(v, MallowVal::Map(_)))
}
