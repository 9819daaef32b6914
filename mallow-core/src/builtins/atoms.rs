// mallow-core - Atom built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Atom operations: atom, atom?, deref, reset!, swap!

use mallow_parser::{MallowAtom, MallowVal};

use crate::error::{Error, Result};
use crate::eval::apply;

fn require_atom<'a>(name: &'static str, val: &'a MallowVal) -> Result<&'a MallowAtom> {
    match val {
        MallowVal::Atom(a) => Ok(a),
        other => Err(Error::type_error_in(name, "atom", other.type_name())),
    }
}

// ============================================================================
// Atom Creation and Predicate
// ============================================================================

/// (atom x) - Create an atom with initial value x
pub(crate) fn builtin_atom(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("atom", 1, args.len()));
    }
    Ok(MallowVal::atom(args[0].clone()))
}

/// (atom? x) - Returns true if x is an atom
pub(crate) fn builtin_atom_p(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("atom?", 1, args.len()));
    }
    Ok(MallowVal::Bool(matches!(args[0], MallowVal::Atom(_))))
}

// ============================================================================
// Basic Operations
// ============================================================================

/// (deref atom) - current value, also written `@atom`
pub(crate) fn builtin_deref(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("deref", 1, args.len()));
    }
    Ok(require_atom("deref", &args[0])?.deref())
}

/// (reset! atom newval) - Set atom value, returns newval
pub(crate) fn builtin_reset(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("reset!", 2, args.len()));
    }
    let atom = require_atom("reset!", &args[0])?;
    atom.reset(args[1].clone());
    Ok(args[1].clone())
}

/// (swap! atom f & args) - store and return (f @atom args...)
///
/// The current value is read before `f` runs and the result written after,
/// so a nested update of the same atom from inside `f` is overwritten.
pub(crate) fn builtin_swap(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() < 2 {
        return Err(Error::arity_at_least_named("swap!", 2, args.len()));
    }
    let atom = require_atom("swap!", &args[0])?;

    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(atom.deref());
    call_args.extend_from_slice(&args[2..]);

    let new_val = apply(&args[1], &call_args)?;
    atom.reset(new_val.clone());
    Ok(new_val)
}
