// mallow-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /
//!
//! ## Integer Overflow Behaviour
//!
//! Integer arithmetic is checked and returns an `Overflow` error rather than
//! wrapping. Any float operand promotes the whole operation to float, and
//! float operations follow IEEE 754 (so float division by zero gives an
//! infinity rather than an error).

use mallow_parser::MallowVal;

use crate::error::{Error, Result};

/// A number pulled out of a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub(crate) fn from_val(name: &'static str, val: &MallowVal) -> Result<Self> {
        match val {
            MallowVal::Int(n) => Ok(Num::Int(*n)),
            MallowVal::Float(n) => Ok(Num::Float(*n)),
            other => Err(Error::type_error_in(name, "number", other.type_name())),
        }
    }

    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(n) => n,
        }
    }

    fn into_val(self) -> MallowVal {
        match self {
            Num::Int(n) => MallowVal::Int(n),
            Num::Float(n) => MallowVal::Float(n),
        }
    }
}

// ============================================================================
// Binary operations
// ============================================================================

fn add(a: Num, b: Num) -> Result<Num> {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x.checked_add(y).map(Num::Int).ok_or(Error::Overflow("+")),
        _ => Ok(Num::Float(a.as_f64() + b.as_f64())),
    }
}

fn sub(a: Num, b: Num) -> Result<Num> {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x.checked_sub(y).map(Num::Int).ok_or(Error::Overflow("-")),
        _ => Ok(Num::Float(a.as_f64() - b.as_f64())),
    }
}

fn mul(a: Num, b: Num) -> Result<Num> {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x.checked_mul(y).map(Num::Int).ok_or(Error::Overflow("*")),
        _ => Ok(Num::Float(a.as_f64() * b.as_f64())),
    }
}

/// Integer division stays integral only when exact.
fn div(a: Num, b: Num) -> Result<Num> {
    match (a, b) {
        (Num::Int(_), Num::Int(0)) => Err(Error::DivisionByZero),
        (Num::Int(x), Num::Int(y)) => match x.checked_rem(y) {
            Some(0) => x.checked_div(y).map(Num::Int).ok_or(Error::Overflow("/")),
            Some(_) => Ok(Num::Float(x as f64 / y as f64)),
            // i64::MIN / -1
            None => Err(Error::Overflow("/")),
        },
        _ => Ok(Num::Float(a.as_f64() / b.as_f64())),
    }
}

fn negate(a: Num) -> Result<Num> {
    match a {
        Num::Int(x) => x.checked_neg().map(Num::Int).ok_or(Error::Overflow("-")),
        Num::Float(x) => Ok(Num::Float(-x)),
    }
}

/// Left fold over `args` starting from `init`.
fn fold(
    name: &'static str,
    init: Num,
    args: &[MallowVal],
    op: fn(Num, Num) -> Result<Num>,
) -> Result<MallowVal> {
    args.iter()
        .try_fold(init, |acc, arg| op(acc, Num::from_val(name, arg)?))
        .map(Num::into_val)
}

// ============================================================================
// Builtins
// ============================================================================

/// (+ & nums) - sum, 0 for no arguments
pub(crate) fn builtin_add(args: &[MallowVal]) -> Result<MallowVal> {
    fold("+", Num::Int(0), args, add)
}

/// (* & nums) - product, 1 for no arguments
pub(crate) fn builtin_mul(args: &[MallowVal]) -> Result<MallowVal> {
    fold("*", Num::Int(1), args, mul)
}

/// (- x & more) - negate one argument, otherwise subtract left to right
pub(crate) fn builtin_sub(args: &[MallowVal]) -> Result<MallowVal> {
    match args {
        [] => Err(Error::arity_at_least_named("-", 1, 0)),
        [x] => negate(Num::from_val("-", x)?).map(Num::into_val),
        [first, rest @ ..] => fold("-", Num::from_val("-", first)?, rest, sub),
    }
}

/// (/ x & more) - reciprocal of one argument, otherwise divide left to right
pub(crate) fn builtin_div(args: &[MallowVal]) -> Result<MallowVal> {
    match args {
        [] => Err(Error::arity_at_least_named("/", 1, 0)),
        [x] => div(Num::Int(1), Num::from_val("/", x)?).map(Num::into_val),
        [first, rest @ ..] => fold("/", Num::from_val("/", first)?, rest, div),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Vec<MallowVal> {
        ns.iter().map(|n| MallowVal::Int(*n)).collect()
    }

    #[test]
    fn test_add() {
        assert_eq!(builtin_add(&[]).unwrap(), MallowVal::Int(0));
        assert_eq!(builtin_add(&ints(&[1, 2, 3])).unwrap(), MallowVal::Int(6));
        assert_eq!(
            builtin_add(&[MallowVal::Int(1), MallowVal::Float(0.5)]).unwrap(),
            MallowVal::Float(1.5)
        );
    }

    #[test]
    fn test_mul() {
        assert_eq!(builtin_mul(&[]).unwrap(), MallowVal::Int(1));
        assert_eq!(builtin_mul(&ints(&[2, 3, 4])).unwrap(), MallowVal::Int(24));
    }

    #[test]
    fn test_sub() {
        assert_eq!(builtin_sub(&ints(&[5])).unwrap(), MallowVal::Int(-5));
        assert_eq!(builtin_sub(&ints(&[10, 3, 2])).unwrap(), MallowVal::Int(5));
        assert_eq!(
            builtin_sub(&[MallowVal::Float(0.0)]).unwrap(),
            MallowVal::Float(-0.0)
        );
        assert!(matches!(builtin_sub(&[]), Err(Error::ArityError { .. })));
    }

    #[test]
    fn test_div() {
        assert_eq!(builtin_div(&ints(&[2])).unwrap(), MallowVal::Float(0.5));
        assert_eq!(builtin_div(&ints(&[1])).unwrap(), MallowVal::Int(1));
        assert_eq!(builtin_div(&ints(&[6, 3])).unwrap(), MallowVal::Int(2));
        assert_eq!(builtin_div(&ints(&[7, 2])).unwrap(), MallowVal::Float(3.5));
        assert_eq!(builtin_div(&ints(&[100, 5, 2])).unwrap(), MallowVal::Int(10));
        assert!(matches!(builtin_div(&[]), Err(Error::ArityError { .. })));
    }

    #[test]
    fn test_div_by_zero() {
        assert!(matches!(
            builtin_div(&ints(&[1, 0])),
            Err(Error::DivisionByZero)
        ));
        assert!(matches!(builtin_div(&ints(&[0])), Err(Error::DivisionByZero)));
        assert_eq!(
            builtin_div(&[MallowVal::Float(1.0), MallowVal::Int(0)]).unwrap(),
            MallowVal::Float(f64::INFINITY)
        );
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            builtin_add(&ints(&[i64::MAX, 1])),
            Err(Error::Overflow("+"))
        ));
        assert!(matches!(
            builtin_sub(&ints(&[i64::MIN])),
            Err(Error::Overflow("-"))
        ));
        assert!(matches!(
            builtin_mul(&ints(&[i64::MAX, 2])),
            Err(Error::Overflow("*"))
        ));
        assert!(matches!(
            builtin_div(&ints(&[i64::MIN, -1])),
            Err(Error::Overflow("/"))
        ));
    }

    #[test]
    fn test_non_number() {
        match builtin_add(&[MallowVal::Int(1), MallowVal::string("x")]) {
            Err(Error::TypeError { expected, got, .. }) => {
                assert_eq!(expected, "number");
                assert_eq!(got, "string");
            }
            other => panic!("expected TypeError, got {:?}", other),
        }
    }
}
