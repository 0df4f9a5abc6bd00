//! Tagged tree nodes.
//!
//! A [`Node`] is a [`Tag`] plus one [`Value`] per field of the tag's schema,
//! stored in schema order. Nodes built through [`Node::new`] are validated
//! against the standard schema; the typed helpers in [`crate::build`] produce
//! well-formed nodes by construction.

use smallvec::SmallVec;

use crate::schema::{standard_fields, Schema};
use crate::stack::ensure_sufficient_stack;
use crate::{IrError, Span, Tag};

/// Field storage. Three inline slots cover every tag except `ForStatement`.
pub type Fields = SmallVec<[Value; 3]>;

/// Value held by one field of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// An optional field that is not present.
    Absent,
    /// Scalar text.
    Text(String),
    /// A single child.
    Node(Box<Node>),
    /// An ordered sequence of children.
    List(Vec<Node>),
}

impl Value {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Absent => "nothing".to_owned(),
            Value::Text(text) => format!("text `{text}`"),
            Value::Node(node) => format!("`{}` node", node.tag()),
            Value::List(nodes) => format!("list of {} nodes", nodes.len()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Value::List(nodes) => Some(nodes),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    fn same_shape(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a.same_shape(b),
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            _ => false,
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(Box::new(node))
    }
}

impl From<Option<Node>> for Value {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Value::Absent, Value::from)
    }
}

impl From<Vec<Node>> for Value {
    fn from(nodes: Vec<Node>) -> Self {
        Value::List(nodes)
    }
}

/// A tagged tree element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    tag: Tag,
    span: Span,
    fields: Fields,
}

impl Node {
    /// Assemble a node without validation. Callers guarantee the shape.
    pub(crate) fn assemble(tag: Tag, span: Span, values: impl IntoIterator<Item = Value>) -> Node {
        let fields: Fields = values.into_iter().collect();
        debug_assert!(
            validate(tag, &fields).is_ok(),
            "malformed `{tag}` node: {:?}",
            validate(tag, &fields)
        );
        Node { tag, span, fields }
    }

    /// Build a node, checking the values against the standard schema.
    pub fn new(
        tag: Tag,
        span: Span,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Node, IrError> {
        let fields: Fields = values.into_iter().collect();
        validate(tag, &fields)?;
        Ok(Node { tag, span, fields })
    }

    /// Rebuild a field-less tag.
    pub fn bare(tag: Tag, span: Span) -> Result<Node, IrError> {
        Node::new(tag, span, std::iter::empty())
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Field values in schema order.
    #[inline]
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    /// Read a field by name (aliases accepted).
    ///
    /// Returns `None` when the tag declares no such field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        Schema::standard().get(self, field).ok()
    }

    /// A single-child field.
    pub fn child(&self, field: &str) -> Option<&Node> {
        self.get(field).and_then(Value::as_node)
    }

    /// A list field; empty when absent or not declared.
    pub fn list(&self, field: &str) -> &[Node] {
        self.get(field).and_then(Value::as_list).unwrap_or_default()
    }

    /// The `text` field of leaves (identifiers, literals).
    pub fn text(&self) -> Option<&str> {
        self.get("text").and_then(Value::as_text)
    }

    /// Identifier text, if this is an identifier.
    pub fn identifier(&self) -> Option<&str> {
        if self.tag == Tag::Identifier {
            self.text()
        } else {
            None
        }
    }

    pub fn is_identifier_named(&self, name: &str) -> bool {
        self.identifier() == Some(name)
    }

    /// Direct children in field order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.fields.iter().flat_map(|value| match value {
            Value::Node(node) => std::slice::from_ref(node.as_ref()),
            Value::List(nodes) => nodes.as_slice(),
            Value::Absent | Value::Text(_) => &[],
        })
    }

    /// Pre-order traversal.
    pub fn walk(&self, visit: &mut impl FnMut(&Node)) {
        ensure_sufficient_stack(|| {
            visit(self);
            for child in self.children() {
                child.walk(visit);
            }
        });
    }

    /// Structural equality that ignores spans.
    pub fn same_shape(&self, other: &Node) -> bool {
        ensure_sufficient_stack(|| {
            self.tag == other.tag
                && self.fields.len() == other.fields.len()
                && self
                    .fields
                    .iter()
                    .zip(&other.fields)
                    .all(|(a, b)| a.same_shape(b))
        })
    }

    /// Reset every span in the tree to [`Span::DUMMY`].
    pub fn clear_spans(&mut self) {
        ensure_sufficient_stack(|| {
            self.span = Span::DUMMY;
            for value in &mut self.fields {
                match value {
                    Value::Node(node) => node.clear_spans(),
                    Value::List(nodes) => nodes.iter_mut().for_each(Node::clear_spans),
                    Value::Absent | Value::Text(_) => {}
                }
            }
        });
    }

    /// Replace every direct child, keeping tag, span and scalar fields.
    ///
    /// The replacement children are trusted to fit their slots; this is how the
    /// rewrite driver descends into a node after deciding its own fate.
    pub fn try_map_children<E>(
        self,
        mut f: impl FnMut(Node) -> Result<Node, E>,
    ) -> Result<Node, E> {
        let Node { tag, span, fields } = self;
        let mut mapped = Fields::with_capacity(fields.len());
        for value in fields {
            mapped.push(match value {
                Value::Node(node) => Value::from(f(*node)?),
                Value::List(nodes) => {
                    Value::List(nodes.into_iter().map(&mut f).collect::<Result<_, _>>()?)
                }
                other @ (Value::Absent | Value::Text(_)) => other,
            });
        }
        Ok(Node {
            tag,
            span,
            fields: mapped,
        })
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_: &Node| count += 1);
        count
    }
}

/// Check `fields` against `tag`'s standard schema.
pub(crate) fn validate(tag: Tag, fields: &[Value]) -> Result<(), IrError> {
    let descs = standard_fields(tag);
    if descs.len() != fields.len() {
        return Err(IrError::Arity {
            tag,
            expected: descs.len(),
            found: fields.len(),
        });
    }
    for (desc, value) in descs.iter().zip(fields) {
        if value.is_absent() {
            if !desc.is_optional() {
                return Err(IrError::MissingField {
                    tag,
                    field: desc.name,
                });
            }
        } else if !desc.kind.admits(value) {
            return Err(IrError::FieldMismatch {
                tag,
                field: desc.name,
                expected: desc.kind.describe().to_owned(),
                found: value.describe(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
