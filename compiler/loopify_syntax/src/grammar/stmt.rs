//! Statement grammar.

use loopify_ir::build::{self, DeclKind};
use loopify_ir::stack::ensure_sufficient_stack;
use loopify_ir::{Node, Tag};

use super::Parser;
use crate::lexer::TokenKind;
use crate::ParseError;

impl Parser<'_> {
    pub(crate) fn statement(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| self.statement_inner())
    }

    fn statement_inner(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.current_span();
        match self.cursor.peek() {
            Some(TokenKind::Const | TokenKind::Let | TokenKind::Var) => {
                let list = self.declaration_list()?;
                self.eat_semicolon();
                Ok(build::variable_statement(list, self.cursor.span_from(start)))
            }
            Some(TokenKind::Function) => self
                .function_declaration()
                .map_err(|e| e.in_context("function declaration")),
            Some(TokenKind::Return) => {
                self.cursor.bump();
                let expression = match self.cursor.peek() {
                    None | Some(TokenKind::Semicolon | TokenKind::RBrace) => None,
                    Some(_) => Some(self.expression()?),
                };
                self.eat_semicolon();
                Ok(build::return_statement(expression, self.cursor.span_from(start)))
            }
            Some(TokenKind::If) => self.if_statement().map_err(|e| e.in_context("if statement")),
            Some(TokenKind::For) => self.for_statement().map_err(|e| e.in_context("for loop")),
            Some(TokenKind::LBrace) => self.block(),
            Some(TokenKind::Break) => Ok(self.jump(Tag::BreakStatement)),
            Some(TokenKind::Continue) => Ok(self.jump(Tag::ContinueStatement)),
            Some(TokenKind::Semicolon) => {
                self.cursor.bump();
                Ok(build::token(Tag::EmptyStatement, start))
            }
            _ => {
                let expression = self.expression()?;
                self.eat_semicolon();
                Ok(build::expression_statement(
                    expression,
                    self.cursor.span_from(start),
                ))
            }
        }
    }

    fn jump(&mut self, tag: Tag) -> Node {
        let start = self.cursor.current_span();
        self.cursor.bump();
        self.eat_semicolon();
        build::token(tag, self.cursor.span_from(start))
    }

    /// `{ statement* }`
    pub(crate) fn block(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.expect(TokenKind::LBrace)?.span;
        let mut statements = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected("`}`").in_context("block"));
            }
            statements.push(self.statement()?);
        }
        self.cursor.bump();
        Ok(build::block(statements, self.cursor.span_from(start)))
    }

    /// `const|let|var name (= init)? (, name (= init)?)*`
    fn declaration_list(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.bump().map(|t| t.kind) {
            Some(TokenKind::Const) => DeclKind::Const,
            Some(TokenKind::Let) => DeclKind::Let,
            _ => DeclKind::Var,
        };
        let mut declarations = Vec::new();
        loop {
            let name = self.identifier()?;
            let decl_start = name.span();
            let initializer = if self.cursor.eat(TokenKind::Eq) {
                Some(self.assignment()?)
            } else {
                None
            };
            declarations.push(build::variable_declaration(
                name,
                initializer,
                self.cursor.span_from(decl_start),
            ));
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(build::declaration_list(
            kind,
            declarations,
            self.cursor.span_from(start),
        ))
    }

    fn function_declaration(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.expect(TokenKind::Function)?.span;
        let name = self.identifier()?;
        self.cursor.expect(TokenKind::LParen)?;
        let parameters = self.parameter_list()?;
        let body = self.block()?;
        Ok(build::function_declaration(
            name,
            parameters,
            body,
            self.cursor.span_from(start),
        ))
    }

    fn if_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.expect(TokenKind::If)?.span;
        self.cursor.expect(TokenKind::LParen)?;
        let condition = self.expression()?;
        self.cursor.expect(TokenKind::RParen)?;
        let then_statement = self.statement()?;
        let else_statement = if self.cursor.eat(TokenKind::Else) {
            Some(self.statement()?)
        } else {
            None
        };
        Ok(build::if_statement(
            condition,
            then_statement,
            else_statement,
            self.cursor.span_from(start),
        ))
    }

    /// `for (init?; condition?; incrementor?) statement`
    fn for_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.expect(TokenKind::For)?.span;
        self.cursor.expect(TokenKind::LParen)?;
        let initializer = match self.cursor.peek() {
            Some(TokenKind::Semicolon) => None,
            Some(TokenKind::Const | TokenKind::Let | TokenKind::Var) => {
                Some(self.declaration_list()?)
            }
            _ => Some(self.expression()?),
        };
        self.cursor.expect(TokenKind::Semicolon)?;
        let condition = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.cursor.expect(TokenKind::Semicolon)?;
        let incrementor = if self.cursor.check(TokenKind::RParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.cursor.expect(TokenKind::RParen)?;
        let statement = self.statement()?;
        Ok(build::for_statement(
            initializer,
            condition,
            incrementor,
            statement,
            self.cursor.span_from(start),
        ))
    }
}
