// mallow-parser - Value types for Mallow
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value type for Mallow.
//!
//! `MallowVal` is the closed enum of every value the reader, evaluator and
//! printer deal with. Collections are persistent (`im::Vector`) or shared
//! behind an `Rc` (`IndexMap`), so cloning a value never deep-copies it.
//!
//! Equality and hashing are structural for data and identity-based for atoms
//! and closures. Native functions compare by name.

// Atoms hold a RefCell, but their Hash/Eq only look at the pointer
#![allow(clippy::mutable_key_type)]

use std::any::Any;
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use im::Vector;
use indexmap::IndexMap;

use crate::keyword::Keyword;
use crate::printer::pr_str;
use crate::stack::ensure_sufficient_stack;
use crate::symbol::Symbol;

/// The central value type.
#[derive(Clone)]
pub enum MallowVal {
    /// The nil value, representing nothing/absence
    Nil,
    /// Boolean true or false
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// Immutable string
    String(Rc<str>),
    /// Symbol, resolved through the environment when evaluated
    Symbol(Symbol),
    /// Keyword, evaluates to itself
    Keyword(Keyword),
    /// List - evaluated as a call or special form
    List(Vector<MallowVal>),
    /// Vector - evaluated elementwise
    Vector(Vector<MallowVal>),
    /// Map with insertion order preserved
    Map(Rc<IndexMap<MallowVal, MallowVal>>),
    /// Native (Rust) function
    NativeFn(MallowNativeFn),
    /// User-defined closure
    Fn(MallowFn),
    /// Mutable reference cell
    Atom(MallowAtom),
}

// ============================================================================
// Function Types
// ============================================================================

/// A user-defined function (closure).
///
/// The captured environment is type-erased because the environment type lives
/// in mallow-core; the evaluator downcasts it back.
#[derive(Clone)]
pub struct MallowFn {
    /// Name given by `def!`, used in printing and arity errors
    pub name: Option<Symbol>,
    /// Fixed positional parameters
    pub params: Rc<[Symbol]>,
    /// Parameter after `&`, bound to a list of the remaining arguments
    pub rest_param: Option<Symbol>,
    /// Body expression
    pub body: Rc<MallowVal>,
    /// Captured environment (type-erased to avoid a circular dependency)
    pub env: Rc<dyn Any>,
}

impl MallowFn {
    /// Create a new anonymous closure.
    pub fn new(
        params: Vec<Symbol>,
        rest_param: Option<Symbol>,
        body: MallowVal,
        env: Rc<dyn Any>,
    ) -> Self {
        MallowFn {
            name: None,
            params: params.into(),
            rest_param,
            body: Rc::new(body),
            env,
        }
    }

    /// Return the same closure carrying a name.
    ///
    /// The copy shares body and environment with the original, so the two stay
    /// equal.
    pub fn with_name(&self, name: Symbol) -> Self {
        MallowFn {
            name: Some(name),
            ..self.clone()
        }
    }

    /// Check if this closure can accept the given number of arguments.
    pub fn accepts(&self, arg_count: usize) -> bool {
        if self.rest_param.is_some() {
            arg_count >= self.params.len()
        } else {
            arg_count == self.params.len()
        }
    }
}

impl fmt::Debug for MallowFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "#<fn {}>", name),
            None => write!(f, "#<fn>"),
        }
    }
}

impl PartialEq for MallowFn {
    fn eq(&self, other: &Self) -> bool {
        // One `fn*` evaluation allocates one body; renamed copies share it
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.env, &other.env)
    }
}

/// A native (Rust) function.
#[derive(Clone)]
pub struct MallowNativeFn {
    /// Function name for display
    pub name: &'static str,
    /// The actual function (type-erased)
    func: Rc<dyn Any>,
}

impl MallowNativeFn {
    /// Create a new native function with a type-erased function.
    pub fn new(name: &'static str, func: Rc<dyn Any>) -> Self {
        MallowNativeFn { name, func }
    }

    /// Get the function name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the inner function reference.
    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }
}

impl fmt::Debug for MallowNativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<native-fn {}>", self.name)
    }
}

impl PartialEq for MallowNativeFn {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

// ============================================================================
// Atom Type
// ============================================================================

/// A mutable reference cell.
///
/// Clones share the same cell; a `reset` is visible through every handle.
#[derive(Clone)]
pub struct MallowAtom {
    value: Rc<RefCell<MallowVal>>,
}

impl MallowAtom {
    /// Create a new atom with an initial value.
    pub fn new(value: MallowVal) -> Self {
        MallowAtom {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Get the current value.
    pub fn deref(&self) -> MallowVal {
        self.value.borrow().clone()
    }

    /// Replace the held value, returning the previous one.
    pub fn reset(&self, new_val: MallowVal) -> MallowVal {
        self.value.replace(new_val)
    }

    /// Address of the shared cell; equal for every handle to the same atom.
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.value) as usize
    }
}

impl fmt::Debug for MallowAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pr_str(&MallowVal::Atom(self.clone()), true))
    }
}

impl PartialEq for MallowAtom {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl MallowVal {
    /// Create a string value
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        MallowVal::String(s.into())
    }

    /// Create a symbol value
    pub fn symbol(sym: Symbol) -> Self {
        MallowVal::Symbol(sym)
    }

    /// Create a symbol value from its name
    pub fn sym(name: &str) -> Self {
        MallowVal::Symbol(Symbol::new(name))
    }

    /// Create a keyword value
    pub fn keyword(kw: Keyword) -> Self {
        MallowVal::Keyword(kw)
    }

    /// Create a list from elements
    pub fn list(elements: Vec<MallowVal>) -> Self {
        MallowVal::List(elements.into_iter().collect())
    }

    /// Create an empty list
    pub fn empty_list() -> Self {
        MallowVal::List(Vector::new())
    }

    /// Create a vector from elements
    pub fn vector(elements: Vec<MallowVal>) -> Self {
        MallowVal::Vector(elements.into_iter().collect())
    }

    /// Create a map from key-value pairs. A repeated key keeps its first
    /// position and takes the last value.
    pub fn map(pairs: Vec<(MallowVal, MallowVal)>) -> Self {
        MallowVal::Map(Rc::new(pairs.into_iter().collect()))
    }

    /// Create an atom holding `value`
    pub fn atom(value: MallowVal) -> Self {
        MallowVal::Atom(MallowAtom::new(value))
    }

    /// Check if this value is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, MallowVal::Nil)
    }

    /// Only `nil` and `false` are falsy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, MallowVal::Nil | MallowVal::Bool(false))
    }

    /// Check if this value can be applied
    pub fn is_callable(&self) -> bool {
        matches!(self, MallowVal::Fn(_) | MallowVal::NativeFn(_))
    }

    /// Get the elements of a list or vector
    pub fn as_seq(&self) -> Option<&Vector<MallowVal>> {
        match self {
            MallowVal::List(items) | MallowVal::Vector(items) => Some(items),
            _ => None,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            MallowVal::Nil => "nil",
            MallowVal::Bool(_) => "bool",
            MallowVal::Int(_) => "int",
            MallowVal::Float(_) => "float",
            MallowVal::String(_) => "string",
            MallowVal::Symbol(_) => "symbol",
            MallowVal::Keyword(_) => "keyword",
            MallowVal::List(_) => "list",
            MallowVal::Vector(_) => "vector",
            MallowVal::Map(_) => "map",
            MallowVal::NativeFn(_) | MallowVal::Fn(_) => "fn",
            MallowVal::Atom(_) => "atom",
        }
    }
}

impl From<bool> for MallowVal {
    fn from(b: bool) -> Self {
        MallowVal::Bool(b)
    }
}

impl From<i64> for MallowVal {
    fn from(n: i64) -> Self {
        MallowVal::Int(n)
    }
}

impl From<f64> for MallowVal {
    fn from(n: f64) -> Self {
        MallowVal::Float(n)
    }
}

impl From<&str> for MallowVal {
    fn from(s: &str) -> Self {
        MallowVal::string(s)
    }
}

// ============================================================================
// Display, equality, hashing
// ============================================================================

impl fmt::Display for MallowVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pr_str(self, true))
    }
}

impl fmt::Debug for MallowVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialEq for MallowVal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MallowVal::Nil, MallowVal::Nil) => true,
            (MallowVal::Bool(a), MallowVal::Bool(b)) => a == b,
            (MallowVal::Int(a), MallowVal::Int(b)) => a == b,
            (MallowVal::Float(a), MallowVal::Float(b)) => a.to_bits() == b.to_bits(),
            (MallowVal::String(a), MallowVal::String(b)) => a == b,
            (MallowVal::Symbol(a), MallowVal::Symbol(b)) => a == b,
            (MallowVal::Keyword(a), MallowVal::Keyword(b)) => a == b,
            (MallowVal::List(a), MallowVal::List(b))
            | (MallowVal::Vector(a), MallowVal::Vector(b)) => ensure_sufficient_stack(|| a == b),
            (MallowVal::Map(a), MallowVal::Map(b)) => Rc::ptr_eq(a, b) || a == b,
            (MallowVal::NativeFn(a), MallowVal::NativeFn(b)) => a == b,
            (MallowVal::Fn(a), MallowVal::Fn(b)) => a == b,
            (MallowVal::Atom(a), MallowVal::Atom(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for MallowVal {}

impl Hash for MallowVal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            MallowVal::Nil => {}
            MallowVal::Bool(b) => b.hash(state),
            MallowVal::Int(n) => n.hash(state),
            MallowVal::Float(n) => n.to_bits().hash(state),
            MallowVal::String(s) => s.hash(state),
            MallowVal::Symbol(sym) => sym.hash(state),
            MallowVal::Keyword(kw) => kw.hash(state),
            MallowVal::List(items) | MallowVal::Vector(items) => {
                ensure_sufficient_stack(|| items.hash(state))
            }
            MallowVal::Map(map) => {
                // Map equality ignores entry order, so combine entry hashes
                // with a commutative operation
                let mut combined: u64 = 0;
                for (k, v) in map.iter() {
                    let mut h = DefaultHasher::new();
                    k.hash(&mut h);
                    v.hash(&mut h);
                    combined = combined.wrapping_add(h.finish());
                }
                map.len().hash(state);
                combined.hash(state);
            }
            MallowVal::NativeFn(nf) => nf.name.hash(state),
            MallowVal::Fn(f) => (Rc::as_ptr(&f.body) as usize).hash(state),
            MallowVal::Atom(a) => a.addr().hash(state),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
