// mallow-core - String built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! String operations: str, pr-str, read-string

use mallow_parser::{MallowVal, pr_seq, read_str};

use crate::error::{Error, Result};

/// (str & args) - concatenate the non-readable renderings
pub(crate) fn builtin_str(args: &[MallowVal]) -> Result<MallowVal> {
    Ok(MallowVal::string(pr_seq(args, false, "")))
}

/// (pr-str & args) - readable renderings, space separated
pub(crate) fn builtin_pr_str(args: &[MallowVal]) -> Result<MallowVal> {
    Ok(MallowVal::string(pr_seq(args, true, " ")))
}

/// (read-string s) - parse the first form in s, nil when there is none
pub(crate) fn builtin_read_string(args: &[MallowVal]) -> Result<MallowVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("read-string", 1, args.len()));
    }
    let s = match &args[0] {
        MallowVal::String(s) => s.as_ref(),
        other => {
            return Err(Error::type_error_in(
                "read-string",
                "string",
                other.type_name(),
            ));
        }
    };

    Ok(read_str(s)?.unwrap_or(MallowVal::Nil))
}
