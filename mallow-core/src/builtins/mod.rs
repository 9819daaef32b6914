// mallow-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in functions for Mallow.

// MallowVal holds atoms, which have interior mutability
#![allow(clippy::mutable_key_type)]

mod arithmetic;
mod atoms;
mod collections;
mod comparison;
mod io;
mod predicates;
mod strings;

use std::rc::Rc;

use mallow_parser::MallowVal;

use crate::env::Env;
use crate::error::Error;
use crate::eval::eval;
use crate::host::Host;

use arithmetic::{builtin_add, builtin_div, builtin_mul, builtin_sub};
use atoms::{builtin_atom, builtin_atom_p, builtin_deref, builtin_reset, builtin_swap};
use collections::{
    builtin_concat, builtin_cons, builtin_contains_p, builtin_count, builtin_empty_p,
    builtin_first, builtin_get, builtin_hash_map, builtin_keys, builtin_list, builtin_nth,
    builtin_rest, builtin_vals, builtin_vector,
};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt};
use predicates::{
    builtin_false_p, builtin_fn_p, builtin_keyword_p, builtin_list_p, builtin_map_p,
    builtin_nil_p, builtin_number_p, builtin_string_p, builtin_symbol_p, builtin_true_p,
    builtin_vector_p,
};
use strings::{builtin_pr_str, builtin_read_string, builtin_str};

/// Register all built-in functions in `env`.
///
/// `env` should be the root environment: `eval` evaluates against it.
/// Output and file access go through `host`.
pub fn register_builtins(env: &Env, host: Rc<dyn Host>) {
    // Arithmetic
    env.define_native("+", builtin_add);
    env.define_native("-", builtin_sub);
    env.define_native("*", builtin_mul);
    env.define_native("/", builtin_div);

    // Comparison
    env.define_native("=", builtin_eq);
    env.define_native("<", builtin_lt);
    env.define_native(">", builtin_gt);
    env.define_native("<=", builtin_le);
    env.define_native(">=", builtin_ge);

    // Collections
    env.define_native("list", builtin_list);
    env.define_native("vector", builtin_vector);
    env.define_native("hash-map", builtin_hash_map);
    env.define_native("count", builtin_count);
    env.define_native("empty?", builtin_empty_p);
    env.define_native("cons", builtin_cons);
    env.define_native("concat", builtin_concat);
    env.define_native("first", builtin_first);
    env.define_native("rest", builtin_rest);
    env.define_native("nth", builtin_nth);
    env.define_native("get", builtin_get);
    env.define_native("contains?", builtin_contains_p);
    env.define_native("keys", builtin_keys);
    env.define_native("vals", builtin_vals);

    // Predicates
    env.define_native("nil?", builtin_nil_p);
    env.define_native("true?", builtin_true_p);
    env.define_native("false?", builtin_false_p);
    env.define_native("symbol?", builtin_symbol_p);
    env.define_native("keyword?", builtin_keyword_p);
    env.define_native("string?", builtin_string_p);
    env.define_native("number?", builtin_number_p);
    env.define_native("fn?", builtin_fn_p);
    env.define_native("list?", builtin_list_p);
    env.define_native("vector?", builtin_vector_p);
    env.define_native("map?", builtin_map_p);

    // Strings
    env.define_native("str", builtin_str);
    env.define_native("pr-str", builtin_pr_str);
    env.define_native("read-string", builtin_read_string);

    // Atoms
    env.define_native("atom", builtin_atom);
    env.define_native("atom?", builtin_atom_p);
    env.define_native("deref", builtin_deref);
    env.define_native("reset!", builtin_reset);
    env.define_native("swap!", builtin_swap);

    // I/O
    io::register(env, &host);

    // eval lives in the root scope, so a strong handle would be a cycle
    let root = env.downgrade();
    env.define_native("eval", move |args| {
        if args.len() != 1 {
            return Err(Error::arity_named("eval", 1, args.len()));
        }
        let env = root
            .upgrade()
            .ok_or_else(|| Error::not_callable(&MallowVal::sym("eval")))?;
        eval(&args[0], &env)
    });
}
