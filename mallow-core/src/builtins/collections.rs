// mallow-core - Collection built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Collection operations: list, vector, hash-map, count, empty?, cons, concat,
//! first, rest, nth, get, contains?, keys, vals

use mallow_parser::{IndexMap, MallowVal, Vector};

use crate::error::{Error, Result};

/// Elements of a list, vector or nil (as empty).
fn seq_items(name: &'static str, val: &MallowVal) -> Result<Vector<MallowVal>> {
    match val {
        MallowVal::Nil => Ok(Vector::new()),
        MallowVal::List(items) | MallowVal::Vector(items) => Ok(items.clone()),
        other => Err(Error::type_error_in(name, "list or vector", other.type_name())),
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// (list & items)
pub(crate) fn builtin_list(args: &[MallowVal]) -> Result<MallowVal> {
    Ok(MallowVal::list(args.to_vec()))
}

/// (vector & items)
pub(crate) fn builtin_vector(args: &[MallowVal]) -> Result<MallowVal> {
    Ok(MallowVal::vector(args.to_vec()))
}

/// (hash-map & kvs)
pub(crate) fn builtin_hash_map(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() % 2 != 0 {
        return Err(Error::syntax(
            "hash-map",
            "requires an even number of arguments",
        ));
    }
    let map: IndexMap<MallowVal, MallowVal> = args
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();
    Ok(MallowVal::Map(map.into()))
}

// ============================================================================
// Size
// ============================================================================

/// (count coll) - nil counts as 0
pub(crate) fn builtin_count(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("count", 1, args.len()));
    }

    let len = match &args[0] {
        MallowVal::Nil => 0,
        MallowVal::List(items) | MallowVal::Vector(items) => items.len(),
        MallowVal::Map(map) => map.len(),
        MallowVal::String(s) => s.chars().count(),
        other => {
            return Err(Error::type_error_in(
                "count",
                "countable",
                other.type_name(),
            ));
        }
    };
    Ok(MallowVal::Int(len as i64))
}

/// (empty? coll)
pub(crate) fn builtin_empty_p(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("empty?", 1, args.len()));
    }

    let empty = match &args[0] {
        MallowVal::Nil => true,
        MallowVal::List(items) | MallowVal::Vector(items) => items.is_empty(),
        MallowVal::Map(map) => map.is_empty(),
        MallowVal::String(s) => s.is_empty(),
        other => {
            return Err(Error::type_error_in(
                "empty?",
                "countable",
                other.type_name(),
            ));
        }
    };
    Ok(MallowVal::Bool(empty))
}

// ============================================================================
// Sequences
// ============================================================================

/// (cons x seq) - always returns a list
pub(crate) fn builtin_cons(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("cons", 2, args.len()));
    }
    let mut items = seq_items("cons", &args[1])?;
    items.push_front(args[0].clone());
    Ok(MallowVal::List(items))
}

/// (concat & seqs) - always returns a list
pub(crate) fn builtin_concat(args: &[MallowVal]) -> Result<MallowVal> {
    let mut out = Vector::new();
    for arg in args {
        out.append(seq_items("concat", arg)?);
    }
    Ok(MallowVal::List(out))
}

/// (first seq) - nil when empty
pub(crate) fn builtin_first(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("first", 1, args.len()));
    }
    Ok(seq_items("first", &args[0])?
        .front()
        .cloned()
        .unwrap_or(MallowVal::Nil))
}

/// (rest seq) - a list, empty when there is nothing left
pub(crate) fn builtin_rest(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("rest", 1, args.len()));
    }
    let items = seq_items("rest", &args[0])?;
    if items.is_empty() {
        return Ok(MallowVal::empty_list());
    }
    Ok(MallowVal::List(items.skip(1)))
}

/// (nth seq index)
pub(crate) fn builtin_nth(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("nth", 2, args.len()));
    }
    let items = seq_items("nth", &args[0])?;
    let index = match &args[1] {
        MallowVal::Int(i) => *i,
        other => return Err(Error::type_error_in("nth", "int", other.type_name())),
    };

    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i).cloned())
        .ok_or(Error::IndexOutOfBounds {
            index,
            length: items.len(),
        })
}

// ============================================================================
// Maps
// ============================================================================

/// (get map key) - nil when missing or when map is nil
pub(crate) fn builtin_get(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("get", 2, args.len()));
    }
    match &args[0] {
        MallowVal::Nil => Ok(MallowVal::Nil),
        MallowVal::Map(map) => Ok(map.get(&args[1]).cloned().unwrap_or(MallowVal::Nil)),
        other => Err(Error::type_error_in("get", "map", other.type_name())),
    }
}

/// (contains? map key)
pub(crate) fn builtin_contains_p(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("contains?", 2, args.len()));
    }
    match &args[0] {
        MallowVal::Nil => Ok(MallowVal::Bool(false)),
        MallowVal::Map(map) => Ok(MallowVal::Bool(map.contains_key(&args[1]))),
        other => Err(Error::type_error_in("contains?", "map", other.type_name())),
    }
}

/// (keys map) - in insertion order
pub(crate) fn builtin_keys(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("keys", 1, args.len()));
    }
    match &args[0] {
        MallowVal::Map(map) => Ok(MallowVal::List(map.keys().cloned().collect())),
        other => Err(Error::type_error_in("keys", "map", other.type_name())),
    }
}

/// (vals map) - in insertion order
pub(crate) fn builtin_vals(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("vals", 1, args.len()));
    }
    match &args[0] {
        MallowVal::Map(map) => Ok(MallowVal::List(map.values().cloned().collect())),
        other => Err(Error::type_error_in("vals", "map", other.type_name())),
    }
}
