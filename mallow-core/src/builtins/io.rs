// mallow-core - I/O built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! I/O operations: prn, println, slurp
//!
//! All of these go through a [`Host`], so they are closures over it rather
//! than plain functions.

use std::rc::Rc;

use mallow_parser::{MallowVal, pr_seq};

use crate::env::Env;
use crate::error::{Error, Result};
use crate::host::Host;

/// Register `prn`, `println` and `slurp` against `host`.
pub(crate) fn register(env: &Env, host: &Rc<dyn Host>) {
    let out = Rc::clone(host);
    env.define_native("prn", move |args| {
        out.write_line(&pr_seq(args, true, " "));
        Ok(MallowVal::Nil)
    });

    let out = Rc::clone(host);
    env.define_native("println", move |args| {
        out.write_line(&pr_seq(args, false, " "));
        Ok(MallowVal::Nil)
    });

    let fs = Rc::clone(host);
    env.define_native("slurp", move |args| slurp(fs.as_ref(), args));
}

/// (slurp path) - file contents as a string
fn slurp(host: &dyn Host, args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("slurp", 1, args.len()));
    }
    let path = match &args[0] {
        MallowVal::String(s) => s.as_ref(),
        other => return Err(Error::type_error_in("slurp", "string", other.type_name())),
    };

    host.read_file(path)
        .map(MallowVal::string)
        .map_err(|e| Error::io(path, e))
}
