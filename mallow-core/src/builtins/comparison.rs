// mallow-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: =, <, >, <=, >=
//!
//! All five are binary.

use std::cmp::Ordering;

use mallow_parser::{MallowVal, ensure_sufficient_stack};

use crate::error::{Error, Result};

use super::arithmetic::Num;

// ============================================================================
// Equality
// ============================================================================

/// Equality as seen from Mallow code.
///
/// Looser than `PartialEq` on values: integers and floats compare by numeric
/// value, and a list equals a vector with equal elements. Map values are
/// compared the same way; map keys are looked up structurally.
pub(crate) fn values_equal(a: &MallowVal, b: &MallowVal) -> bool {
    match (a, b) {
        (MallowVal::Int(x), MallowVal::Int(y)) => x == y,
        (MallowVal::Float(x), MallowVal::Float(y)) => x == y,
        (MallowVal::Int(x), MallowVal::Float(y)) | (MallowVal::Float(y), MallowVal::Int(x)) => {
            (*x as f64) == *y
        }
        (
            MallowVal::List(xs) | MallowVal::Vector(xs),
            MallowVal::List(ys) | MallowVal::Vector(ys),
        ) => {
            xs.len() == ys.len()
                && ensure_sufficient_stack(|| {
                    xs.iter().zip(ys.iter()).all(|(x, y)| values_equal(x, y))
                })
        }
        (MallowVal::Map(xs), MallowVal::Map(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, v)| ys.get(k).is_some_and(|other| values_equal(v, other)))
        }
        _ => a == b,
    }
}

pub(crate) fn builtin_eq(args: &[MallowVal]) -> Result<MallowVal> {
    match args {
        [a, b] => Ok(MallowVal::Bool(values_equal(a, b))),
        _ => Err(Error::arity_named("=", 2, args.len())),
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Compare two numbers. `None` when either is NaN.
fn compare_numbers(name: &'static str, a: &MallowVal, b: &MallowVal) -> Result<Option<Ordering>> {
    let ordering = match (Num::from_val(name, a)?, Num::from_val(name, b)?) {
        (Num::Int(x), Num::Int(y)) => Some(x.cmp(&y)),
        (x, y) => x.as_f64().partial_cmp(&y.as_f64()),
    };
    Ok(ordering)
}

fn compare_with(
    name: &'static str,
    args: &[MallowVal],
    accept: fn(Ordering) -> bool,
) -> Result<MallowVal> {
    match args {
        [a, b] => Ok(MallowVal::Bool(
            compare_numbers(name, a, b)?.is_some_and(accept),
        )),
        _ => Err(Error::arity_named(name, 2, args.len())),
    }
}

pub(crate) fn builtin_lt(args: &[MallowVal]) -> Result<MallowVal> {
    compare_with("<", args, Ordering::is_lt)
}

pub(crate) fn builtin_gt(args: &[MallowVal]) -> Result<MallowVal> {
    compare_with(">", args, Ordering::is_gt)
}

pub(crate) fn builtin_le(args: &[MallowVal]) -> Result<MallowVal> {
    compare_with("<=", args, Ordering::is_le)
}

pub(crate) fn builtin_ge(args: &[MallowVal]) -> Result<MallowVal> {
    compare_with(">=", args, Ordering::is_ge)
}
