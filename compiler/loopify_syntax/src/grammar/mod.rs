//! Recursive-descent grammar.
//!
//! Statements live in `stmt`, expressions in `expr`. Both recurse through
//! [`ensure_sufficient_stack`] so deeply nested sources cannot overflow.

mod expr;
mod stmt;

use loopify_ir::{build, Node, Span};

use crate::cursor::Cursor;
use crate::lexer::TokenKind;
use crate::ParseError;

pub(crate) struct Parser<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(cursor: Cursor<'src>) -> Self {
        Parser { cursor }
    }

    /// Parse statements until end of input, recovering at statement
    /// boundaries. Unparseable statements become `Error` nodes.
    pub(crate) fn source_file(&mut self, errors: &mut Vec<ParseError>) -> Node {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            let start = self.cursor.current_span();
            match self.statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    errors.push(error);
                    self.recover();
                    let span = self.cursor.span_from(start);
                    statements.push(build::error(self.cursor.slice(span), span));
                }
            }
        }
        let end = self.cursor.current_span();
        build::source_file(statements, Span::new(0, end.end))
    }

    /// Parse exactly one expression spanning the whole input.
    pub(crate) fn lone_expression(&mut self) -> Result<Node, ParseError> {
        let expression = self.expression()?;
        self.cursor.eat(TokenKind::Semicolon);
        if self.cursor.is_at_end() {
            Ok(expression)
        } else {
            Err(self.cursor.unexpected("end of input"))
        }
    }

    /// Skip to just past the next statement boundary at the current nesting
    /// depth. Always consumes at least one token.
    fn recover(&mut self) {
        let mut depth = 0usize;
        let mut first = true;
        while let Some(kind) = self.cursor.peek() {
            match kind {
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    if depth == 0 && !first {
                        return;
                    }
                    depth = depth.saturating_sub(1);
                    if depth == 0 && kind == TokenKind::RBrace {
                        self.cursor.bump();
                        return;
                    }
                }
                TokenKind::Semicolon if depth == 0 => {
                    self.cursor.bump();
                    return;
                }
                _ => {}
            }
            self.cursor.bump();
            first = false;
        }
    }

    fn eat_semicolon(&mut self) {
        self.cursor.eat(TokenKind::Semicolon);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
