// mallow-parser - Reader, value model and printer for Mallow
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # mallow-parser
//!
//! Lexer, parser and printer for the Mallow language.
//! Produces `MallowVal` trees from source strings and renders them back.

pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod stack;
pub mod symbol;
pub mod value;

pub use im::Vector;
pub use indexmap::IndexMap;
pub use keyword::Keyword;
pub use lexer::{Lexer, LexerError, Token};
pub use parser::{MAX_NESTING_DEPTH, ParseError, Parser, read_all, read_str};
pub use printer::{pr_seq, pr_str};
pub use stack::ensure_sufficient_stack;
pub use symbol::Symbol;
pub use value::{MallowAtom, MallowFn, MallowNativeFn, MallowVal};
