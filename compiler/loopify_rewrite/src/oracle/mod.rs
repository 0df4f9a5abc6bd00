//! Type oracle client.
//!
//! The engine never infers types itself. Predicates that need a static type
//! (is this receiver a sequence?) ask a [`TypeOracle`], which answers with a
//! coarse [`TypeDesc`].

use std::fmt;

use loopify_ir::{Node, Span, Tag};
use rustc_hash::FxHashMap;

/// Coarse static type of an expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Array(Box<TypeDesc>),
    Number,
    String,
    Boolean,
    Null,
    Object,
    Function,
    Unknown,
}

impl TypeDesc {
    pub fn array(element: TypeDesc) -> Self {
        TypeDesc::Array(Box::new(element))
    }

    /// Whether values of this type support the sequence idioms.
    pub fn is_sequence(&self) -> bool {
        matches!(self, TypeDesc::Array(_))
    }

    /// Element type of a sequence.
    pub fn element(&self) -> Option<&TypeDesc> {
        match self {
            TypeDesc::Array(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Array(element) => write!(f, "{element}[]"),
            TypeDesc::Number => f.write_str("number"),
            TypeDesc::String => f.write_str("string"),
            TypeDesc::Boolean => f.write_str("boolean"),
            TypeDesc::Null => f.write_str("null"),
            TypeDesc::Object => f.write_str("object"),
            TypeDesc::Function => f.write_str("function"),
            TypeDesc::Unknown => f.write_str("unknown"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// The node was not part of the analyzed source.
    #[error("no type recorded for `{tag}` at {span}")]
    NotAnalyzed { tag: Tag, span: Span },

    #[error("type oracle unavailable: {0}")]
    Unavailable(String),
}

/// Reports the static type of a subexpression.
pub trait TypeOracle {
    fn type_of(&self, node: &Node) -> Result<TypeDesc, OracleError>;
}

impl<T: TypeOracle + ?Sized> TypeOracle for &T {
    fn type_of(&self, node: &Node) -> Result<TypeDesc, OracleError> {
        (**self).type_of(node)
    }
}

/// Oracle answering from a fixed identifier table.
///
/// Identifiers are looked up by name; array literals are sequences;
/// `map`/`filter`/`slice`/`concat` called on a sequence yield a sequence.
/// Everything else is [`TypeDesc::Unknown`].
#[derive(Clone, Debug, Default)]
pub struct FixedOracle {
    names: FxHashMap<String, TypeDesc>,
}

impl FixedOracle {
    pub fn new() -> Self {
        FixedOracle::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.names.insert(name.into(), ty);
        self
    }

    fn infer(&self, node: &Node) -> TypeDesc {
        match node.tag() {
            Tag::Identifier => node
                .identifier()
                .and_then(|name| self.names.get(name))
                .cloned()
                .unwrap_or(TypeDesc::Unknown),
            Tag::NumericLiteral => TypeDesc::Number,
            Tag::StringLiteral => TypeDesc::String,
            Tag::TrueKeyword | Tag::FalseKeyword => TypeDesc::Boolean,
            Tag::NullKeyword => TypeDesc::Null,
            Tag::ObjectLiteralExpression => TypeDesc::Object,
            Tag::ArrowFunction => TypeDesc::Function,
            Tag::ArrayLiteralExpression => TypeDesc::array(TypeDesc::Unknown),
            Tag::ParenthesizedExpression => node
                .child("expression")
                .map_or(TypeDesc::Unknown, |inner| self.infer(inner)),
            Tag::CallExpression => {
                let Some(callee) = node.child("expression") else {
                    return TypeDesc::Unknown;
                };
                let method = callee.child("name").and_then(Node::identifier);
                let receiver = callee.child("expression").map(|r| self.infer(r));
                match (method, receiver) {
                    (Some("map"), Some(r)) if r.is_sequence() => TypeDesc::array(TypeDesc::Unknown),
                    (Some("filter" | "slice" | "concat"), Some(r)) if r.is_sequence() => r,
                    _ => TypeDesc::Unknown,
                }
            }
            _ => TypeDesc::Unknown,
        }
    }
}

impl TypeOracle for FixedOracle {
    fn type_of(&self, node: &Node) -> Result<TypeDesc, OracleError> {
        Ok(self.infer(node))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
