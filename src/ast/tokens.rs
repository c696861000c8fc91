use std::fmt;

/// Kind of a lexical token.
///
/// Variants are declared in alphabetical order so that sets of kinds (as
/// reported in parse errors) print in a stable, readable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// `false`
    BoolFalse,

    /// `true`
    BoolTrue,

    /// Slice separator (`:`)
    Colon,

    /// Parameter separator (`,`)
    Comma,

    /// Field access chaining (`.`)
    ///
    /// # Examples
    /// ```text
    /// path.parent.filename
    /// ```
    Dot,

    /// Equality operator in comparison filters (`==`)
    DoubleEquals,

    /// Double quoted string with backslash escapes
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "say \"hi\""
    /// ```
    DQString,

    /// End of the query
    Eof,

    /// Named parameter assignment or equality comparison (`=`)
    Equals,

    /// Floating point literal
    ///
    /// # Examples
    /// ```text
    /// 1.5
    /// -0.25
    /// 1e10
    /// ```
    Float,

    /// `>`
    GreaterThan,

    /// `>=`
    GreaterThanOrEqualTo,

    /// Field or parameter name
    ///
    /// Must start with a letter or underscore, followed by letters, digits,
    /// or underscores.
    Identifier,

    /// Base 10 integer with an optional leading `-`
    Integer,

    /// Opens a brace expression (`{`)
    LBrace,

    /// Opens a list filter (`[`)
    LBracket,

    /// `<`, also the pullup access prefix
    ///
    /// # Examples
    /// ```text
    /// <ints(0, 3)
    /// path { <children }
    /// ```
    LessThan,

    /// `<=`
    LessThanOrEqualTo,

    /// Opens a parameter pack (`(`)
    LParen,

    /// `}`
    RBrace,

    /// `]`
    RBracket,

    /// `)`
    RParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single token of an SQ query.
///
/// Tokens do not own their text: they point into the query string they
/// were scanned from and cannot outlive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    query: &'a str,
    pos: usize,
    len: usize,
    kind: TokenKind,
}

impl<'a> Token<'a> {
    pub fn new(query: &'a str, pos: usize, len: usize, kind: TokenKind) -> Self {
        Token {
            query,
            pos,
            len,
            kind,
        }
    }

    /// The full query the token was found in.
    pub fn query(&self) -> &'a str {
        self.query
    }

    /// Byte offset of the token within the query.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Length of the token in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The characters that make up the token.
    pub fn text(&self) -> &'a str {
        &self.query[self.pos..self.pos + self.len]
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} token ({}) at position {}",
            self.kind,
            self.text(),
            self.pos
        )
    }
}
