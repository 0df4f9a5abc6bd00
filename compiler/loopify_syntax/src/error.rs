//! Parse errors.

use loopify_ir::Span;

/// A syntax error with the span it was detected at.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    /// What was being parsed, for "while parsing ..." notes.
    pub context: Option<&'static str>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
            context: None,
        }
    }

    #[must_use]
    pub fn in_context(mut self, context: &'static str) -> Self {
        self.context.get_or_insert(context);
        self
    }
}
