// mallow-parser - Keyword type
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords are self-evaluating identifiers written with a leading colon.

use std::fmt;
use std::rc::Rc;

/// A keyword. The stored name excludes the leading `:`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword {
    name: Rc<str>,
}

impl Keyword {
    /// Create a new keyword from its name (without the colon).
    pub fn new(name: &str) -> Self {
        Keyword { name: name.into() }
    }

    /// Get the name, without the leading colon.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword(:{})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_keyword() {
        let kw = Keyword::new("foo");
        assert_eq!(kw.name(), "foo");
        assert_eq!(format!("{}", kw), ":foo");
    }

    #[test]
    fn test_keyword_equality() {
        assert_eq!(Keyword::new("a"), Keyword::new("a"));
        assert_ne!(Keyword::new("a"), Keyword::new("b"));
    }
}
