//! Expression grammar.
//!
//! Precedence climbing for binary operators; everything else is plain
//! recursive descent. Arrow functions are recognized by lookahead: an
//! identifier followed by `=>`, or a balanced parenthesis group followed by
//! `=>`.

use loopify_ir::build;
use loopify_ir::stack::ensure_sufficient_stack;
use loopify_ir::{Node, Tag};

use super::Parser;
use crate::lexer::{unquote, TokenKind};
use crate::precedence::{self, Precedence};
use crate::ParseError;

fn is_assignable(node: &Node) -> bool {
    matches!(
        node.tag(),
        Tag::Identifier | Tag::PropertyAccessExpression | Tag::ElementAccessExpression
    )
}

impl Parser<'_> {
    pub(crate) fn expression(&mut self) -> Result<Node, ParseError> {
        self.assignment()
    }

    pub(crate) fn assignment(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| self.assignment_inner())
    }

    fn assignment_inner(&mut self) -> Result<Node, ParseError> {
        if self.at_arrow_function() {
            return self
                .arrow_function()
                .map_err(|e| e.in_context("arrow function"));
        }
        let left = self.conditional()?;
        let Some(op) = self.cursor.peek().and_then(precedence::assignment_operator) else {
            return Ok(left);
        };
        if !is_assignable(&left) {
            return Err(ParseError::new(
                "invalid assignment target",
                left.span(),
            ));
        }
        self.cursor.bump();
        let right = self.assignment()?;
        let span = left.span().merge(right.span());
        Ok(build::binary(left, op, right, span))
    }

    fn at_arrow_function(&self) -> bool {
        match self.cursor.peek() {
            Some(TokenKind::Ident) => self.cursor.peek_nth(1) == Some(TokenKind::FatArrow),
            Some(TokenKind::LParen) => self
                .cursor
                .matching_close(self.cursor.position())
                .is_some_and(|close| self.cursor.kind_at(close + 1) == Some(TokenKind::FatArrow)),
            _ => false,
        }
    }

    /// `x => body` or `(params) => body`
    fn arrow_function(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.current_span();
        let parameters = if self.cursor.check(TokenKind::Ident) {
            let name = self.identifier()?;
            let span = name.span();
            vec![build::parameter(name, None, span)]
        } else {
            self.cursor.expect(TokenKind::LParen)?;
            self.parameter_list()?
        };
        self.cursor.expect(TokenKind::FatArrow)?;
        let body = if self.cursor.check(TokenKind::LBrace) {
            self.block()?
        } else {
            self.assignment()?
        };
        Ok(build::arrow(parameters, body, self.cursor.span_from(start)))
    }

    /// Parameters after the opening `(`, through the closing `)`.
    pub(crate) fn parameter_list(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut parameters = Vec::new();
        while !self.cursor.eat(TokenKind::RParen) {
            let name = self.identifier()?;
            let start = name.span();
            let initializer = if self.cursor.eat(TokenKind::Eq) {
                Some(self.assignment()?)
            } else {
                None
            };
            parameters.push(build::parameter(
                name,
                initializer,
                self.cursor.span_from(start),
            ));
            if !self.cursor.eat(TokenKind::Comma) {
                self.cursor.expect(TokenKind::RParen)?;
                break;
            }
        }
        Ok(parameters)
    }

    fn conditional(&mut self) -> Result<Node, ParseError> {
        let condition = self.binary(precedence::LOGICAL_OR)?;
        if !self.cursor.eat(TokenKind::Question) {
            return Ok(condition);
        }
        let when_true = self.assignment()?;
        self.cursor.expect(TokenKind::Colon)?;
        let when_false = self.assignment()?;
        let span = condition.span().merge(when_false.span());
        Ok(build::conditional(condition, when_true, when_false, span))
    }

    fn binary(&mut self, min: Precedence) -> Result<Node, ParseError> {
        let mut left = self.unary()?;
        while let Some(op) = self.cursor.peek().and_then(precedence::binary_operator) {
            let prec = precedence::binary(op);
            if prec < min {
                break;
            }
            self.cursor.bump();
            let right = ensure_sufficient_stack(|| self.binary(prec + 1))?;
            let span = left.span().merge(right.span());
            left = build::binary(left, op, right, span);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        let Some(op) = self.cursor.peek().and_then(precedence::prefix_operator) else {
            return self.postfix();
        };
        let start = self.cursor.current_span();
        self.cursor.bump();
        let operand = ensure_sufficient_stack(|| self.unary())?;
        if matches!(op, Tag::PlusPlusToken | Tag::MinusMinusToken) && !is_assignable(&operand) {
            return Err(ParseError::new("invalid increment operand", operand.span()));
        }
        let span = start.merge(operand.span());
        Ok(build::prefix(op, operand, span))
    }

    fn postfix(&mut self) -> Result<Node, ParseError> {
        let operand = self.member()?;
        match self.cursor.peek().and_then(precedence::postfix_operator) {
            Some(op) if is_assignable(&operand) => {
                self.cursor.bump();
                let span = self.cursor.span_from(operand.span());
                Ok(build::postfix(operand, op, span))
            }
            _ => Ok(operand),
        }
    }

    /// Primary followed by any number of `.name`, `[index]` and `(args)`.
    fn member(&mut self) -> Result<Node, ParseError> {
        let mut expression = self.primary()?;
        loop {
            let start = expression.span();
            expression = match self.cursor.peek() {
                Some(TokenKind::Dot) => {
                    self.cursor.bump();
                    let name = self.identifier()?;
                    build::property_access(expression, name, self.cursor.span_from(start))
                }
                Some(TokenKind::LBracket) => {
                    self.cursor.bump();
                    let index = self.expression()?;
                    self.cursor.expect(TokenKind::RBracket)?;
                    build::element_access(expression, index, self.cursor.span_from(start))
                }
                Some(TokenKind::LParen) => {
                    self.cursor.bump();
                    let arguments = self.comma_list(TokenKind::RParen)?;
                    build::call(expression, arguments, self.cursor.span_from(start))
                }
                _ => return Ok(expression),
            };
        }
    }

    /// Comma-separated expressions through the closing `close` token.
    fn comma_list(&mut self, close: TokenKind) -> Result<Vec<Node>, ParseError> {
        let mut items = Vec::new();
        while !self.cursor.eat(close) {
            items.push(self.assignment()?);
            if !self.cursor.eat(TokenKind::Comma) {
                self.cursor.expect(close)?;
                break;
            }
        }
        Ok(items)
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let span = self.cursor.current_span();
        match self.cursor.peek() {
            Some(TokenKind::Number) => {
                self.cursor.bump();
                Ok(build::numeric(self.cursor.slice(span), span))
            }
            Some(TokenKind::String) => {
                self.cursor.bump();
                Ok(build::string(unquote(self.cursor.slice(span)), span))
            }
            Some(TokenKind::Ident) => self.identifier(),
            Some(TokenKind::True) => Ok(self.keyword(Tag::TrueKeyword)),
            Some(TokenKind::False) => Ok(self.keyword(Tag::FalseKeyword)),
            Some(TokenKind::Null) => Ok(self.keyword(Tag::NullKeyword)),
            Some(TokenKind::This) => Ok(self.keyword(Tag::ThisKeyword)),
            Some(TokenKind::LParen) => {
                self.cursor.bump();
                let inner = self.expression()?;
                self.cursor.expect(TokenKind::RParen)?;
                Ok(build::paren(inner, self.cursor.span_from(span)))
            }
            Some(TokenKind::LBracket) => {
                self.cursor.bump();
                let elements = self
                    .comma_list(TokenKind::RBracket)
                    .map_err(|e| e.in_context("array literal"))?;
                Ok(build::array(elements, self.cursor.span_from(span)))
            }
            Some(TokenKind::LBrace) => self
                .object_literal()
                .map_err(|e| e.in_context("object literal")),
            _ => Err(self.cursor.unexpected("expression")),
        }
    }

    /// `{ key: value, shorthand, ... }`
    fn object_literal(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.expect(TokenKind::LBrace)?.span;
        let mut properties = Vec::new();
        while !self.cursor.eat(TokenKind::RBrace) {
            let key_span = self.cursor.current_span();
            let key = match self.cursor.peek() {
                Some(TokenKind::Ident) => self.identifier()?,
                Some(TokenKind::String) => {
                    self.cursor.bump();
                    build::string(unquote(self.cursor.slice(key_span)), key_span)
                }
                Some(TokenKind::Number) => {
                    self.cursor.bump();
                    build::numeric(self.cursor.slice(key_span), key_span)
                }
                _ => return Err(self.cursor.unexpected("property name")),
            };
            let initializer = if self.cursor.eat(TokenKind::Colon) {
                self.assignment()?
            } else if key.tag() == Tag::Identifier {
                key.clone()
            } else {
                return Err(self.cursor.unexpected("`:`"));
            };
            properties.push(build::property_assignment(
                key,
                initializer,
                self.cursor.span_from(key_span),
            ));
            if !self.cursor.eat(TokenKind::Comma) {
                self.cursor.expect(TokenKind::RBrace)?;
                break;
            }
        }
        Ok(build::object(properties, self.cursor.span_from(start)))
    }

    fn keyword(&mut self, tag: Tag) -> Node {
        let span = self.cursor.current_span();
        self.cursor.bump();
        build::token(tag, span)
    }

    pub(crate) fn identifier(&mut self) -> Result<Node, ParseError> {
        let token = self.cursor.expect(TokenKind::Ident)?;
        Ok(build::identifier(self.cursor.slice(token.span), token.span))
    }
}
