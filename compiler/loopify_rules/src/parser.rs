//! Template parsing with the host-language parser.

use loopify_ir::Node;
use loopify_rewrite::SourceParser;

/// [`SourceParser`] over [`loopify_syntax::parse_expression`].
#[derive(Copy, Clone, Debug, Default)]
pub struct SyntaxParser;

impl SourceParser for SyntaxParser {
    fn parse_expression(&self, text: &str) -> Result<Node, String> {
        loopify_syntax::parse_expression(text).map_err(|error| error.to_string())
    }
}
