//! Errors raised while lexing, parsing and evaluating SQ queries.
//!
//! Every error is fatal to the current query. Errors that relate to a
//! position in the query text render the query with a caret under the
//! offending character:
//!
//! ```text
//! parse error: unexpected RBrace token (}) at position 4; expecting one of: Identifier, LessThan
//! a { }
//!     ^
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::ast::{Token, TokenKind};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Integer literal too large, or an element/slice outside a sequence.
    #[error("{0}")]
    OutOfRange(String),

    #[error("missing argument {name} of type {type_name}")]
    ArgumentMissing {
        name: String,
        type_name: &'static str,
    },

    #[error("invalid argument {received} of type {received_type}, expecting {expected}")]
    ArgumentType {
        received: String,
        received_type: &'static str,
        expected: &'static str,
    },

    #[error("{type_name} has no field \"{field}\"")]
    InvalidField { type_name: String, field: String },

    /// Filter syntax used on a field that yields a single object.
    #[error("{0}")]
    NotAnArray(String),

    /// A single object was required but a sequence was produced.
    #[error("{0}")]
    NotAScalar(String),

    #[error("cannot convert {from} to {to}")]
    InvalidConversion {
        from: &'static str,
        to: &'static str,
    },

    #[error("pullup access of field \"{field}\" is not allowed when the field has siblings")]
    PullupWithSiblings { field: String },

    #[error("filesystem error for {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invariant violation inside the engine itself.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Error::OutOfRange(message.into())
    }

    /// Out of range error pointing at a token of the query.
    pub fn out_of_range_at(token: &Token<'_>, message: impl fmt::Display) -> Self {
        Error::OutOfRange(format!(
            "out of range error at {}: {}\n{}",
            token,
            message,
            Caret {
                query: token.query(),
                pos: token.pos()
            }
        ))
    }

    pub fn not_an_array() -> Self {
        Error::NotAnArray("cannot apply array filter to non-array field".to_string())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }

    /// True for errors caused by malformed query text.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Error::Lex(_) | Error::Parse(_))
    }
}

/// No lexical rule matches the query text at `pos`.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub pos: usize,
    pub query: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lex error: failed to identify token at position {}\n{}",
            self.pos,
            Caret {
                query: &self.query,
                pos: self.pos
            }
        )
    }
}

impl std::error::Error for LexError {}

/// The parser met a token that no grammar rule accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: TokenKind,
    pub text: String,
    pub pos: usize,
    pub query: String,
    /// Token kinds that would have been accepted instead.
    pub expecting: BTreeSet<TokenKind>,
    pub detail: Option<String>,
}

impl ParseError {
    pub fn new(token: &Token<'_>, expecting: &BTreeSet<TokenKind>) -> Self {
        ParseError {
            kind: token.kind(),
            text: token.text().to_string(),
            pos: token.pos(),
            query: token.query().to_string(),
            expecting: expecting.clone(),
            detail: None,
        }
    }

    pub fn with_detail(token: &Token<'_>, detail: impl Into<String>) -> Self {
        ParseError {
            detail: Some(detail.into()),
            ..ParseError::new(token, &BTreeSet::new())
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error: unexpected {} token ({}) at position {}",
            self.kind, self.text, self.pos
        )?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        if !self.expecting.is_empty() {
            let kinds: Vec<String> = self.expecting.iter().map(|k| k.to_string()).collect();
            write!(f, "; expecting one of: {}", kinds.join(", "))?;
        }
        write!(
            f,
            "\n{}",
            Caret {
                query: &self.query,
                pos: self.pos
            }
        )
    }
}

impl std::error::Error for ParseError {}

/// Renders a query with a `^` marker under byte offset `pos`.
struct Caret<'a> {
    query: &'a str,
    pos: usize,
}

impl fmt::Display for Caret<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = self
            .query
            .get(..self.pos)
            .map_or(self.pos, |prefix| prefix.chars().count());
        write!(f, "{}\n{}^", self.query, " ".repeat(column))
    }
}
