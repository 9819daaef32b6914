// mallow-core - Interpreter facade
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The Interpreter struct - a root environment with the core library loaded.

use std::rc::Rc;

use mallow_parser::{MallowVal, Parser, Symbol, pr_str};
use tracing::debug;

use crate::builtins::register_builtins;
use crate::env::Env;
use crate::error::Result;
use crate::eval::{apply, eval};
use crate::host::Host;

/// Mallow source evaluated into the root environment at start-up.
const PRELUDE: &str = include_str!("../prelude.mal");

/// A Mallow interpreter.
///
/// Owns the root environment. Every call evaluates against that same
/// environment, so definitions persist between calls.
///
/// `Interpreter` is not thread-safe: values and environments are `Rc` based.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use mallow_core::{Interpreter, StdHost};
///
/// let interp = Interpreter::new(Rc::new(StdHost)).unwrap();
/// interp.eval_str("(def! sq (fn* (x) (* x x)))").unwrap();
/// assert_eq!(interp.rep("(sq 7)").unwrap(), "49");
/// ```
pub struct Interpreter {
    env: Env,
}

impl Interpreter {
    /// Create an interpreter with builtins registered and the prelude loaded.
    pub fn new(host: Rc<dyn Host>) -> Result<Self> {
        let env = Env::new();
        register_builtins(&env, host);
        let interp = Interpreter { env };
        interp.eval_str(PRELUDE)?;
        debug!("interpreter ready");
        Ok(interp)
    }

    /// The root environment.
    #[must_use]
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Evaluate every form in `src`, returning the last value (nil if none).
    pub fn eval_str(&self, src: &str) -> Result<MallowVal> {
        let mut parser = Parser::new(src)?;
        let mut result = MallowVal::Nil;
        while let Some(form) = parser.parse()? {
            result = eval(&form, &self.env)?;
        }
        Ok(result)
    }

    /// Read, evaluate and print one line of input.
    ///
    /// Returns the readable rendering of the last value, or an empty string
    /// when the line holds no forms.
    pub fn rep(&self, line: &str) -> Result<String> {
        let mut parser = Parser::new(line)?;
        let mut last = None;
        while let Some(form) = parser.parse()? {
            last = Some(eval(&form, &self.env)?);
        }
        Ok(last.map(|val| pr_str(&val, true)).unwrap_or_default())
    }

    /// Bind `*ARGV*` to a list of strings.
    pub fn set_argv<I, S>(&self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let argv = args
            .into_iter()
            .map(|arg| MallowVal::string(arg.as_ref()))
            .collect();
        self.env
            .define(Symbol::new("*ARGV*"), MallowVal::list(argv));
    }

    /// Load a source file through the `load-file` function.
    pub fn load_file(&self, path: &str) -> Result<MallowVal> {
        debug!(path, "load-file");
        let load = self.env.lookup(&Symbol::new("load-file"))?;
        apply(&load, &[MallowVal::string(path)])
    }
}
