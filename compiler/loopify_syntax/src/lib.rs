//! Loopify host-language syntax.
//!
//! A lexer, parser and printer for the small JavaScript-like language Loopify
//! rewrites. Trees are [`loopify_ir::Node`]s carrying byte spans into the
//! parsed text.
//!
//! ```text
//! source ──lex──▶ tokens ──parse──▶ Node ──print──▶ source
//! ```

mod cursor;
mod error;
mod grammar;
pub mod lexer;
pub mod precedence;
mod printer;

use loopify_ir::{build, Node, Span};

pub use error::ParseError;
pub use printer::print;

use cursor::Cursor;
use grammar::Parser;

/// Result of parsing a whole source file.
///
/// Parsing never gives up on a file: statements that fail to parse are
/// recorded in `errors` and kept in the tree as `Error` nodes holding their
/// source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOutput {
    pub tree: Node,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<Node, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(self.tree)
        } else {
            Err(self.errors)
        }
    }
}

/// Parse a complete source file into a `SourceFile` node.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_source(source: &str) -> ParseOutput {
    let tokens = match lexer::lex(source) {
        Ok(tokens) => tokens,
        Err(error) => {
            let span = Span::from_range(0..source.len());
            let tree = build::source_file(vec![build::error(source, span)], span);
            return ParseOutput {
                tree,
                errors: vec![error],
            };
        }
    };
    tracing::trace!(tokens = tokens.len(), "lexed");
    let mut errors = Vec::new();
    let tree = Parser::new(Cursor::new(source, tokens)).source_file(&mut errors);
    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "source has syntax errors");
    }
    ParseOutput { tree, errors }
}

/// Parse text holding exactly one expression (an optional trailing `;` is
/// allowed).
pub fn parse_expression(source: &str) -> Result<Node, ParseError> {
    let tokens = lexer::lex(source)?;
    Parser::new(Cursor::new(source, tokens)).lone_expression()
}
