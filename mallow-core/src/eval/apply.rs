// mallow-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application for Mallow.

use std::any::Any;
use std::rc::Rc;

use mallow_parser::{MallowFn, MallowNativeFn, MallowVal};

use super::eval;
use crate::env::Env;
use crate::error::{AritySpec, Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[MallowVal]) -> Result<MallowVal>;

/// Apply a function to arguments.
///
/// Unlike a call written in Mallow code, this is never a tail call: the
/// closure body is evaluated to completion before returning.
pub fn apply(func: &MallowVal, args: &[MallowVal]) -> Result<MallowVal> {
    match func {
        MallowVal::Fn(f) => {
            let fn_env = bind_params(f, args.to_vec())?;
            eval(&f.body, &fn_env)
        }
        MallowVal::NativeFn(f) => apply_native(f, args),
        other => Err(Error::not_callable(other)),
    }
}

/// Build the environment for a closure call.
///
/// The new scope's outer is the closure's captured environment. Fixed
/// parameters bind positionally; a rest parameter gets a list of the rest.
pub(crate) fn bind_params(func: &MallowFn, mut args: Vec<MallowVal>) -> Result<Env> {
    if !func.accepts(args.len()) {
        let fixed = func.params.len();
        return Err(Error::ArityError {
            expected: if func.rest_param.is_some() {
                AritySpec::AtLeast(fixed)
            } else {
                AritySpec::Exact(fixed)
            },
            got: args.len(),
            name: Some(
                func.name
                    .as_ref()
                    .map_or_else(|| "fn".to_string(), |n| n.name().to_string()),
            ),
        });
    }

    let captured_env = func
        .env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::not_callable(&MallowVal::Fn(func.clone())))?;

    let fn_env = captured_env.child();

    let rest = args.split_off(func.params.len());
    for (param, arg) in func.params.iter().zip(args) {
        fn_env.define(param.clone(), arg);
    }
    if let Some(rest_param) = &func.rest_param {
        fn_env.define(rest_param.clone(), MallowVal::list(rest));
    }

    Ok(fn_env)
}

/// Apply a native function.
pub(crate) fn apply_native(func: &MallowNativeFn, args: &[MallowVal]) -> Result<MallowVal> {
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::not_callable(&MallowVal::NativeFn(func.clone())))?;
    f(args)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[MallowVal]) -> Result<MallowVal> + 'static,
) -> MallowVal {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    MallowVal::NativeFn(MallowNativeFn::new(name, func_any))
}
