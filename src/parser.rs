//! Recursive descent parser for SQ queries.
//!
//! Grammar:
//!
//! ```text
//! query            := field_tree_list Eof
//! field_tree_list  := field_tree+
//! field_tree       := dot_expression brace_expression?
//! dot_expression   := field_call (Dot field_call)*
//! brace_expression := LBrace field_tree_list RBrace
//! field_call       := LessThan? Identifier parameter_pack? list_filter?
//! parameter_pack   := LParen parameter_list? RParen
//! parameter_list   := parameter (Comma parameter)*
//! parameter        := primitive_value | Identifier Equals primitive_value
//! primitive_value  := Float | Integer | DQString | BoolTrue | BoolFalse
//! list_filter      := LBracket (slice_or_element | condition) RBracket
//! slice_or_element := Integer | Integer? Colon Integer? (Colon Integer?)?
//! condition        := Identifier? comparison_operator primitive_value
//! ```
//!
//! Positional parameters must come before named ones.
//!
//! Every `parse_*` method returns `Ok(false)` (or `Ok(None)`) when the rule
//! does not start at the current token, without consuming anything. Each
//! token kind tried and not found is remembered until the next token is
//! consumed, so that a parse error can list what would have been accepted.

use std::collections::BTreeSet;

use tracing::debug;

use crate::ast::{AccessKind, Ast, ComparisonOperator, FilterSpec, Token, TokenKind};
use crate::error::{Error, ParseError, Result};
use crate::lexer::{self, Lexer};
use crate::value::Primitive;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    expecting: BTreeSet<TokenKind>,
}

impl<'a> Parser<'a> {
    pub fn new(query: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(query),
            expecting: BTreeSet::new(),
        }
    }

    /// Parse the whole query. The returned tree's root is named `root`.
    pub fn parse(mut self) -> Result<Ast> {
        let mut ast = Ast::root();
        if !self.parse_field_tree_list(&mut ast)? {
            return Err(self.unexpected());
        }
        self.expect(TokenKind::Eof)?;
        debug!("parsed query:\n{}", ast);
        Ok(ast)
    }

    fn parse_field_tree_list(&mut self, parent: &mut Ast) -> Result<bool> {
        if !self.parse_field_tree(parent)? {
            return Ok(false);
        }
        while self.parse_field_tree(parent)? {}
        Ok(true)
    }

    fn parse_field_tree(&mut self, parent: &mut Ast) -> Result<bool> {
        match self.parse_dot_expression(parent)? {
            Some(last) => {
                self.parse_brace_expression(last)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn parse_brace_expression(&mut self, parent: &mut Ast) -> Result<bool> {
        if self.accept(TokenKind::LBrace)?.is_none() {
            return Ok(false);
        }
        if !self.parse_field_tree_list(parent)? {
            return Err(self.unexpected());
        }
        self.expect(TokenKind::RBrace)?;
        Ok(true)
    }

    /// Returns the last node of the chain, which any following brace
    /// expression attaches to.
    fn parse_dot_expression<'t>(&mut self, parent: &'t mut Ast) -> Result<Option<&'t mut Ast>> {
        if !self.parse_field_call(parent)? {
            return Ok(None);
        }
        let mut current = last_child(parent)?;
        while self.accept(TokenKind::Dot)?.is_some() {
            if !self.parse_field_call(current)? {
                return Err(self.unexpected());
            }
            current = last_child(current)?;
        }
        Ok(Some(current))
    }

    fn parse_field_call(&mut self, parent: &mut Ast) -> Result<bool> {
        let access = if self.accept(TokenKind::LessThan)?.is_some() {
            AccessKind::Pullup
        } else {
            AccessKind::Default
        };
        let Some(name) = self.accept(TokenKind::Identifier)? else {
            if access == AccessKind::Pullup {
                return Err(self.unexpected());
            }
            return Ok(false);
        };

        let mut child = Ast::new(name.text(), access);
        self.parse_parameter_pack(&mut child)?;
        self.parse_list_filter(&mut child)?;
        parent.children.push(child);
        Ok(true)
    }

    fn parse_parameter_pack(&mut self, node: &mut Ast) -> Result<bool> {
        if self.accept(TokenKind::LParen)?.is_none() {
            return Ok(false);
        }
        let mut count = 0;
        while self.parse_parameter(node, count)? {
            count += 1;
        }
        self.expect(TokenKind::RParen)?;
        Ok(true)
    }

    /// One parameter of a list, including the comma before it when it is
    /// not the first.
    fn parse_parameter(&mut self, node: &mut Ast, count: usize) -> Result<bool> {
        if count > 0 && self.accept(TokenKind::Comma)?.is_none() {
            return Ok(false);
        }
        if node.params.named.is_empty() {
            if let Some(value) = self.parse_primitive_value()? {
                node.params.positional.push(value);
                return Ok(true);
            }
        }
        if self.parse_named_parameter(node)? {
            return Ok(true);
        }
        if count > 0 {
            // a comma with no parameter after it
            return Err(self.unexpected());
        }
        Ok(false)
    }

    fn parse_named_parameter(&mut self, node: &mut Ast) -> Result<bool> {
        let Some(name) = self.accept(TokenKind::Identifier)? else {
            return Ok(false);
        };
        self.expect(TokenKind::Equals)?;
        let Some(value) = self.parse_primitive_value()? else {
            return Err(self.unexpected());
        };
        if node.params.named.contains_key(name.text()) {
            return Err(ParseError::with_detail(
                &name,
                format!("duplicate named parameter \"{}\"", name.text()),
            )
            .into());
        }
        node.params.named.insert(name.text().to_string(), value);
        Ok(true)
    }

    fn parse_primitive_value(&mut self) -> Result<Option<Primitive>> {
        if let Some(value) = self.parse_float()? {
            return Ok(Some(Primitive::Float(value)));
        }
        if let Some((value, _)) = self.parse_integer()? {
            return Ok(Some(Primitive::Int(value)));
        }
        if let Some(token) = self.accept(TokenKind::DQString)? {
            return Ok(Some(Primitive::String(lexer::unquote(token.text()))));
        }
        if self.accept(TokenKind::BoolTrue)?.is_some() {
            return Ok(Some(Primitive::Bool(true)));
        }
        if self.accept(TokenKind::BoolFalse)?.is_some() {
            return Ok(Some(Primitive::Bool(false)));
        }
        Ok(None)
    }

    fn parse_float(&mut self) -> Result<Option<f64>> {
        let Some(token) = self.accept(TokenKind::Float)? else {
            return Ok(None);
        };
        let value: f64 = token
            .text()
            .parse()
            .map_err(|_| Error::internal(format!("invalid float literal {}", token.text())))?;
        if value.is_infinite() {
            return Err(Error::out_of_range_at(
                &token,
                format!(
                    "float {} does not fit in required type; must be in the closed interval [{:e}, {:e}]",
                    token.text(),
                    f64::MIN,
                    f64::MAX
                ),
            ));
        }
        Ok(Some(value))
    }

    fn parse_integer(&mut self) -> Result<Option<(i64, Token<'a>)>> {
        let Some(token) = self.accept(TokenKind::Integer)? else {
            return Ok(None);
        };
        match token.text().parse::<i64>() {
            Ok(value) => Ok(Some((value, token))),
            Err(_) => Err(Error::out_of_range_at(
                &token,
                format!(
                    "integer {} does not fit in required type; must be in the closed interval [{}, {}]",
                    token.text(),
                    i64::MIN,
                    i64::MAX
                ),
            )),
        }
    }

    fn parse_list_filter(&mut self, node: &mut Ast) -> Result<bool> {
        if self.accept(TokenKind::LBracket)?.is_none() {
            return Ok(false);
        }
        if !self.parse_slice_or_element_access(node)? && !self.parse_condition(node)? {
            return Err(self.unexpected());
        }
        self.expect(TokenKind::RBracket)?;
        Ok(true)
    }

    /// Slices and element accesses can both start with an integer, so they
    /// are parsed together.
    fn parse_slice_or_element_access(&mut self, node: &mut Ast) -> Result<bool> {
        let start = self.parse_integer()?;
        let colon = self.accept(TokenKind::Colon)?;
        match (start, colon) {
            (None, None) => return Ok(false),
            (Some((index, _)), None) => {
                node.filter = FilterSpec::ElementAccess { index };
                return Ok(true);
            }
            _ => {}
        }

        let stop = self.parse_integer()?;
        let step = if self.accept(TokenKind::Colon)?.is_some() {
            self.parse_integer()?
        } else {
            None
        };
        if let Some((0, token)) = step {
            return Err(Error::out_of_range_at(&token, "slice step cannot be zero"));
        }

        node.filter = FilterSpec::Slice {
            start: start.map(|(value, _)| value),
            stop: stop.map(|(value, _)| value),
            step: step.map(|(value, _)| value),
        };
        Ok(true)
    }

    fn parse_condition(&mut self, node: &mut Ast) -> Result<bool> {
        let member = self.accept(TokenKind::Identifier)?;
        let op = self.parse_comparison_operator()?;
        let op = match (member, op) {
            (None, None) => return Ok(false),
            (Some(_), None) => return Err(self.unexpected()),
            (_, Some(op)) => op,
        };
        let Some(value) = self.parse_primitive_value()? else {
            return Err(self.unexpected());
        };
        node.filter = FilterSpec::Comparison {
            member: member.map(|token| token.text().to_string()),
            op,
            value,
        };
        Ok(true)
    }

    fn parse_comparison_operator(&mut self) -> Result<Option<ComparisonOperator>> {
        const OPERATORS: [(TokenKind, ComparisonOperator); 6] = [
            (
                TokenKind::GreaterThanOrEqualTo,
                ComparisonOperator::GreaterThanOrEqualTo,
            ),
            (TokenKind::GreaterThan, ComparisonOperator::GreaterThan),
            (
                TokenKind::LessThanOrEqualTo,
                ComparisonOperator::LessThanOrEqualTo,
            ),
            (TokenKind::LessThan, ComparisonOperator::LessThan),
            (TokenKind::DoubleEquals, ComparisonOperator::Equals),
            (TokenKind::Equals, ComparisonOperator::Equals),
        ];
        for (kind, op) in OPERATORS {
            if self.accept(kind)?.is_some() {
                return Ok(Some(op));
            }
        }
        Ok(None)
    }

    fn shift(&mut self) -> Result<()> {
        self.lexer.advance()?;
        self.expecting.clear();
        Ok(())
    }

    /// Consume the current token if it is of the given kind.
    fn accept(&mut self, kind: TokenKind) -> Result<Option<Token<'a>>> {
        let token = self.lexer.peek()?;
        if token.kind() == kind {
            self.shift()?;
            return Ok(Some(token));
        }
        self.expecting.insert(kind);
        Ok(None)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>> {
        match self.accept(kind)? {
            Some(token) => Ok(token),
            None => Err(self.unexpected()),
        }
    }

    /// Parse error at the current token.
    fn unexpected(&mut self) -> Error {
        match self.lexer.peek() {
            Ok(token) => ParseError::new(&token, &self.expecting).into(),
            Err(e) => e,
        }
    }
}

fn last_child(ast: &mut Ast) -> Result<&mut Ast> {
    ast.children
        .last_mut()
        .ok_or_else(|| Error::internal("field call did not add a node"))
}

/// Parse `query` into an AST.
pub fn parse(query: &str) -> Result<Ast> {
    Parser::new(query).parse()
}
