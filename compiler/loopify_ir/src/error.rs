//! Node model errors.

use crate::Tag;

/// Errors raised by the schema registry and the tag constructors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// The tag is not known to the registry consulted.
    #[error("unknown node tag `{0}`")]
    UnknownTag(String),

    /// A schema-declared, non-optional field is absent.
    #[error("`{tag}` node is missing required field `{field}`")]
    MissingField { tag: Tag, field: &'static str },

    /// The tag declares no field with this name (after alias resolution).
    #[error("`{tag}` has no field named `{field}`")]
    NoSuchField { tag: Tag, field: String },

    /// A field holds a value of the wrong shape for its descriptor.
    #[error("`{tag}.{field}`: expected {expected}, found {found}")]
    FieldMismatch {
        tag: Tag,
        field: &'static str,
        expected: String,
        found: String,
    },

    /// A constructor was handed the wrong number of field values.
    #[error("`{tag}` takes {expected} fields, got {found}")]
    Arity {
        tag: Tag,
        expected: usize,
        found: usize,
    },
}

impl IrError {
    /// Whether the error means the registry itself is incomplete.
    ///
    /// No rule can succeed on a node whose tag the registry does not know, so
    /// the rewrite driver escalates these instead of skipping one rule.
    pub fn is_schema_gap(&self) -> bool {
        matches!(self, IrError::UnknownTag(_))
    }
}
