// mallow-parser - Symbol type
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are identifiers resolved through the environment chain.
//!
//! Two symbols are the same binding name when their text is equal. The name is
//! held in an `Rc<str>` so cloning a symbol out of the AST for every lookup or
//! binding is a reference-count bump rather than a string copy.

use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

/// A symbol, compared and hashed by name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    name: Rc<str>,
}

impl Symbol {
    /// Create a new symbol.
    pub fn new(name: &str) -> Self {
        Symbol { name: name.into() }
    }

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

// Lets a `HashMap<Symbol, _>` be queried with a plain `&str`.
impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.name)
    }
}
