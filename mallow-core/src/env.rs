// mallow-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use mallow_parser::{MallowVal, Symbol};

use crate::error::{Error, Result};
use crate::eval::make_native_fn;

/// A lexical environment for variable bindings.
///
/// Environments form a chain through outer references, enabling
/// lexical scoping. Each environment has its own bindings map
/// and optionally an outer environment for lookup. Cloning an `Env` clones
/// the handle, not the scope.
///
/// # Examples
///
/// ```
/// use mallow_core::Env;
/// use mallow_parser::{MallowVal, Symbol};
///
/// let env = Env::new();
/// env.define(Symbol::new("x"), MallowVal::Int(42));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), MallowVal::Int(42));
///
/// // A child sees its outer scope, and can shadow it
/// let child = env.child();
/// child.define(Symbol::new("x"), MallowVal::Int(100));
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), MallowVal::Int(100));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), MallowVal::Int(42));
/// ```
#[derive(Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

struct EnvInner {
    bindings: HashMap<Symbol, MallowVal>,
    outer: Option<Env>,
}

/// A non-owning handle to an environment.
///
/// Used by natives that must reach the root scope without keeping it alive,
/// since the root scope itself holds those natives.
#[derive(Clone)]
pub struct WeakEnv {
    inner: Weak<RefCell<EnvInner>>,
}

impl Env {
    /// Create a new root environment with no outer scope.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                outer: None,
            })),
        }
    }

    /// Create a child environment with this environment as its outer scope.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                outer: Some(self.clone()),
            })),
        }
    }

    /// Define a binding in this scope only, replacing any existing one.
    pub fn define(&self, sym: Symbol, val: MallowVal) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// Define a native function under `name`.
    pub fn define_native<F>(&self, name: &'static str, f: F)
    where
        F: Fn(&[MallowVal]) -> Result<MallowVal> + 'static,
    {
        self.define(Symbol::new(name), make_native_fn(name, f));
    }

    /// Look up a symbol in this environment or its outer chain.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    pub fn lookup(&self, sym: &Symbol) -> Result<MallowVal> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Ok(val.clone());
            }
            let outer = inner.outer.clone();
            drop(inner);
            match outer {
                Some(o) => current = o,
                None => return Err(Error::UnboundSymbol(sym.clone())),
            }
        }
    }

    /// Check if a symbol is defined in this environment or its outer chain.
    #[must_use]
    pub fn is_defined(&self, sym: &Symbol) -> bool {
        self.lookup(sym).is_ok()
    }

    /// Get a non-owning handle to this environment.
    pub fn downgrade(&self) -> WeakEnv {
        WeakEnv {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether two handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl WeakEnv {
    /// Get the environment back, if it is still alive.
    pub fn upgrade(&self) -> Option<Env> {
        self.inner.upgrade().map(|inner| Env { inner })
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Env")
            .field("bindings", &inner.bindings.len())
            .field("has_outer", &inner.outer.is_some())
            .finish()
    }
}
