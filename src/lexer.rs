use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Token, TokenKind};
use crate::error::{LexError, Result};

/// Lexical rules, tried in order at the current position. The first match
/// wins, so longer operators come before their prefixes (`<=` before `<`,
/// `==` before `=`), keywords before identifiers, and floats before
/// integers.
static RULES: LazyLock<Vec<(TokenKind, Regex)>> = LazyLock::new(|| {
    [
        (TokenKind::LParen, r"\("),
        (TokenKind::RParen, r"\)"),
        (TokenKind::LBrace, r"\{"),
        (TokenKind::RBrace, r"\}"),
        (TokenKind::LBracket, r"\["),
        (TokenKind::RBracket, r"\]"),
        (TokenKind::Comma, ","),
        (TokenKind::Colon, ":"),
        (TokenKind::DQString, r#""(?:[^"\\]|\\.)*""#),
        (TokenKind::LessThanOrEqualTo, "<="),
        (TokenKind::LessThan, "<"),
        (TokenKind::GreaterThanOrEqualTo, ">="),
        (TokenKind::GreaterThan, ">"),
        (TokenKind::DoubleEquals, "=="),
        (TokenKind::Equals, "="),
        // `true1` and `false_x` are identifiers
        (TokenKind::BoolTrue, r"true\b"),
        (TokenKind::BoolFalse, r"false\b"),
        (TokenKind::Identifier, "[A-Za-z_][A-Za-z_0-9]*"),
        (
            TokenKind::Float,
            r"[+-]?(?:[0-9]+\.[0-9]*(?:[Ee][+-]?[0-9]+)?|\.[0-9]+(?:[Ee][+-]?[0-9]+)?|[0-9]+[Ee][+-]?[0-9]+)",
        ),
        (TokenKind::Integer, "-?[0-9]+"),
        (TokenKind::Dot, r"\."),
    ]
    .into_iter()
    .map(|(kind, pattern)| {
        let regex = Regex::new(&format!("^(?:{})", pattern)).expect("lexer rules are valid regexes");
        (kind, regex)
    })
    .collect()
});

/// Lazy token stream over a query with one token of lookahead.
///
/// Tokens are only scanned when they are first looked at, and the current
/// token is cached until [`Lexer::advance`] is called.
pub struct Lexer<'a> {
    query: &'a str,
    position: usize,
    cache: Option<Token<'a>>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(query: &'a str) -> Self {
        Lexer {
            query,
            position: 0,
            cache: None,
            finished: false,
        }
    }

    /// The token at the cursor. Repeated calls return the same token.
    pub fn peek(&mut self) -> Result<Token<'a>> {
        if let Some(token) = self.cache {
            return Ok(token);
        }
        let token = self.scan_token()?;
        tracing::trace!(%token, "scanned token");
        self.cache = Some(token);
        Ok(token)
    }

    /// Move past the current token.
    pub fn advance(&mut self) -> Result<()> {
        let token = self.peek()?;
        self.cache = None;
        if token.kind() == TokenKind::Eof {
            self.finished = true;
        } else {
            self.position = token.pos() + token.len();
        }
        Ok(())
    }

    /// Whether the end of input token has been consumed.
    pub fn at_end(&self) -> bool {
        self.finished
    }

    /// Return the current token and move past it.
    pub fn next_token(&mut self) -> Result<Token<'a>> {
        let token = self.peek()?;
        self.advance()?;
        Ok(token)
    }

    fn skip_whitespace(&self) -> usize {
        let remaining = &self.query[self.position..];
        let trimmed = remaining.trim_start_matches([' ', '\t', '\r', '\n']);
        self.position + (remaining.len() - trimmed.len())
    }

    fn scan_token(&self) -> Result<Token<'a>> {
        let pos = self.skip_whitespace();
        let remaining = &self.query[pos..];

        if remaining.is_empty() {
            return Ok(Token::new(self.query, pos, 0, TokenKind::Eof));
        }

        RULES
            .iter()
            .find_map(|(kind, regex)| {
                regex
                    .find(remaining)
                    .map(|m| Token::new(self.query, pos, m.end(), *kind))
            })
            .ok_or_else(|| {
                LexError {
                    pos,
                    query: self.query.to_string(),
                }
                .into()
            })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    /// Yields every token up to and including `Eof`, or the first lex error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode the contents of a `DQString` token: strip the quotes and resolve
/// backslash escapes (`\x` stands for `x`, plus `\n`, `\t` and `\r`).
pub fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some(other) => result.push(other),
                None => result.push('\\'),
            },
            _ => result.push(ch),
        }
    }
    result
}

#[test]
fn test_keywords() {
    let kinds: Vec<TokenKind> = Lexer::new("true false true1 false_")
        .map(|t| t.unwrap().kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::BoolTrue,
            TokenKind::BoolFalse,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_peek_is_idempotent() {
    let mut lexer = Lexer::new("  a.b");
    let first = lexer.peek().unwrap();
    assert_eq!(lexer.peek().unwrap(), first);
    assert_eq!(first.pos(), 2);
    assert_eq!(first.text(), "a");
    lexer.advance().unwrap();
    assert_eq!(lexer.peek().unwrap().kind(), TokenKind::Dot);
}

#[test]
fn test_iterating_after_peek() {
    let mut lexer = Lexer::new("a[1]");
    assert_eq!(lexer.peek().unwrap().kind(), TokenKind::Identifier);
    let kinds: Vec<TokenKind> = lexer.map(|t| t.unwrap().kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::LBracket,
            TokenKind::Integer,
            TokenKind::RBracket,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_unquote() {
    assert_eq!(unquote(r#""a\"b\\c""#), "a\"b\\c");
    assert_eq!(unquote(r#""line\n""#), "line\n");
}
