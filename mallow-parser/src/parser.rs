// mallow-parser - Parser for Mallow
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for Mallow source code.
//!
//! Converts tokens into `MallowVal` trees. Reader macros expand to two-element
//! lists: `'x` to `(quote x)`, `` `x `` to `(quasiquote x)`, `~x` to
//! `(unquote x)`, `~@x` to `(splice-unquote x)` and `@x` to `(deref x)`.

use thiserror::Error;

use crate::keyword::Keyword;
use crate::lexer::{Lexer, LexerError, Token};
use crate::stack::ensure_sufficient_stack;
use crate::symbol::Symbol;
use crate::value::MallowVal;

/// How deeply collections and reader macros may nest in one form.
pub const MAX_NESTING_DEPTH: usize = 1_000;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Syntax error at {line}:{column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// The parser converts tokens into `MallowVal` trees.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code.
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let line = lexer.line();
        let column = lexer.column();
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            line,
            column,
            depth: 0,
        })
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<MallowVal>, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        let val = self.parse_form()?;
        Ok(Some(val))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<MallowVal>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let prev = std::mem::replace(&mut self.current, Token::Eof);
        self.line = self.lexer.line();
        self.column = self.lexer.column();
        self.current = self.lexer.next_token()?;
        Ok(prev)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            line: self.line,
            column: self.column,
        }
    }

    fn parse_form(&mut self) -> Result<MallowVal, ParseError> {
        match self.advance()? {
            // Literals
            Token::Nil => Ok(MallowVal::Nil),
            Token::True => Ok(MallowVal::Bool(true)),
            Token::False => Ok(MallowVal::Bool(false)),
            Token::Int(n) => Ok(MallowVal::Int(n)),
            Token::Float(n) => Ok(MallowVal::Float(n)),
            Token::String(s) => Ok(MallowVal::string(s)),
            Token::Symbol(s) => Ok(MallowVal::symbol(Symbol::new(&s))),
            Token::Keyword(s) => Ok(MallowVal::keyword(Keyword::new(&s))),

            // Collections
            Token::LParen => self.nested(|p| Ok(MallowVal::list(p.parse_seq(Token::RParen)?))),
            Token::LBracket => {
                self.nested(|p| Ok(MallowVal::vector(p.parse_seq(Token::RBracket)?)))
            }
            Token::LBrace => self.nested(Self::parse_map),

            // Reader macros
            Token::Quote => self.nested(|p| p.parse_wrapped("quote")),
            Token::Quasiquote => self.nested(|p| p.parse_wrapped("quasiquote")),
            Token::Unquote => self.nested(|p| p.parse_wrapped("unquote")),
            Token::SpliceUnquote => self.nested(|p| p.parse_wrapped("splice-unquote")),
            Token::Deref => self.nested(|p| p.parse_wrapped("deref")),
            Token::Meta => Err(self.error("metadata (^) is not supported")),

            // Unexpected tokens
            tok @ (Token::RParen | Token::RBracket | Token::RBrace) => {
                Err(self.error(format!("unbalanced: unexpected '{}'", tok)))
            }
            Token::Eof => Err(self.error("unexpected end of input")),
        }
    }

    /// Run `f` one nesting level deeper, failing past `MAX_NESTING_DEPTH`.
    fn nested(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<MallowVal, ParseError>,
    ) -> Result<MallowVal, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!(
                "nesting too deep (limit {})",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /// Parse forms up to and including the closing delimiter.
    fn parse_seq(&mut self, close: Token) -> Result<Vec<MallowVal>, ParseError> {
        let mut elements = Vec::new();
        loop {
            if self.current == close {
                self.advance()?;
                return Ok(elements);
            }
            if matches!(self.current, Token::Eof) {
                return Err(self.error(format!("unbalanced: expected '{}', got EOF", close)));
            }
            elements.push(self.parse_form()?);
        }
    }

    fn parse_map(&mut self) -> Result<MallowVal, ParseError> {
        let elements = self.parse_seq(Token::RBrace)?;
        if elements.len() % 2 != 0 {
            return Err(self.error("map literal must contain an even number of forms"));
        }

        let mut pairs = Vec::with_capacity(elements.len() / 2);
        let mut iter = elements.into_iter();
        while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            pairs.push((key, value));
        }
        Ok(MallowVal::map(pairs))
    }

    fn parse_wrapped(&mut self, name: &str) -> Result<MallowVal, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Err(self.error(format!("expected a form after {}", name)));
        }
        let form = self.parse_form()?;
        Ok(MallowVal::list(vec![MallowVal::sym(name), form]))
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Read the first form from a string. Returns `None` for blank or
/// comment-only input.
pub fn read_str(source: &str) -> Result<Option<MallowVal>, ParseError> {
    Parser::new(source)?.parse()
}

/// Read every form from a string.
pub fn read_all(source: &str) -> Result<Vec<MallowVal>, ParseError> {
    Parser::new(source)?.parse_all()
}

// ============================================================================
// Tests
// ============================================================================
