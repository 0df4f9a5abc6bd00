//! Tag-indexed constructor table.
//!
//! The instantiator rebuilds every node it copies through the constructor
//! registered for the node's tag. The table is a closed `match`, decided at
//! compile time: there is no lookup by tag name.
//!
//! Constructors check more than the schema does. The schema only knows that a
//! binary expression has a node in its `operator_token` slot; the constructor
//! also insists that node is a binary operator token. That is what keeps a
//! template substitution from splicing, say, a call expression into an
//! operator position.
//!
//! Field-less tags have no constructor: they are rebuilt from the tag alone
//! with [`Node::bare`]. `Error` nodes are produced by parsers only and have no
//! constructor either.

use crate::{IrError, Node, Span, Tag, Value};

/// Rebuild primitive for one tag. Values are in schema order.
pub type Constructor = fn(Tag, Span, Vec<Value>) -> Result<Node, IrError>;

/// Look up the constructor for `tag`.
pub fn constructor(tag: Tag) -> Option<Constructor> {
    match tag {
        Tag::Error => None,
        _ if tag.is_token() => None,
        Tag::Identifier => Some(make_identifier),
        Tag::NumericLiteral => Some(make_numeric),
        Tag::BinaryExpression => Some(make_binary),
        Tag::PrefixUnaryExpression => Some(make_prefix),
        Tag::PostfixUnaryExpression => Some(make_postfix),
        Tag::Parameter
        | Tag::VariableDeclaration
        | Tag::FunctionDeclaration
        | Tag::PropertyAccessExpression => Some(make_named),
        Tag::PropertyAssignment => Some(make_property),
        Tag::VariableDeclarationList => Some(make_declaration_list),
        _ => Some(make_plain),
    }
}

/// Rebuild `tag` from `values`, choosing [`Node::bare`] for tokens.
///
/// Returns `None` when the tag has neither fields nor a constructor.
pub fn rebuild(tag: Tag, span: Span, values: Vec<Value>) -> Option<Result<Node, IrError>> {
    if tag.is_token() {
        return Some(if values.is_empty() {
            Node::bare(tag, span)
        } else {
            Err(IrError::Arity {
                tag,
                expected: 0,
                found: values.len(),
            })
        });
    }
    constructor(tag).map(|construct| construct(tag, span, values))
}

fn mismatch(tag: Tag, field: &'static str, expected: &str, found: &Value) -> IrError {
    IrError::FieldMismatch {
        tag,
        field,
        expected: expected.to_owned(),
        found: found.describe(),
    }
}

fn node_at<'a>(values: &'a [Value], index: usize) -> Option<&'a Node> {
    values.get(index).and_then(Value::as_node)
}

/// Generic construction plus list element checks.
fn make_plain(tag: Tag, span: Span, values: Vec<Value>) -> Result<Node, IrError> {
    let (field, expected): (&'static str, fn(Tag) -> bool) = match tag {
        Tag::ArrowFunction => ("parameters", |t| t == Tag::Parameter),
        Tag::ObjectLiteralExpression => ("properties", |t| t == Tag::PropertyAssignment),
        Tag::Block | Tag::SourceFile => ("statements", Tag::is_statement),
        _ => return Node::new(tag, span, values),
    };
    let node = Node::new(tag, span, values)?;
    if let Some(bad) = node.list(field).iter().find(|child| !expected(child.tag())) {
        return Err(IrError::FieldMismatch {
            tag,
            field,
            expected: format!("{field} entries"),
            found: format!("`{}` node", bad.tag()),
        });
    }
    Ok(node)
}

fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn make_identifier(tag: Tag, span: Span, values: Vec<Value>) -> Result<Node, IrError> {
    if let Some(value) = values.first() {
        if !value.as_text().is_some_and(is_identifier_text) {
            return Err(mismatch(tag, "text", "identifier name", value));
        }
    }
    Node::new(tag, span, values)
}

fn make_numeric(tag: Tag, span: Span, values: Vec<Value>) -> Result<Node, IrError> {
    if let Some(value) = values.first() {
        if !value.as_text().is_some_and(|t| t.parse::<f64>().is_ok()) {
            return Err(mismatch(tag, "text", "numeric literal", value));
        }
    }
    Node::new(tag, span, values)
}

fn is_assignable(node: &Node) -> bool {
    matches!(
        node.tag(),
        Tag::Identifier | Tag::PropertyAccessExpression | Tag::ElementAccessExpression
    )
}

fn make_binary(tag: Tag, span: Span, values: Vec<Value>) -> Result<Node, IrError> {
    if let Some(op) = node_at(&values, 1) {
        if !op.tag().is_binary_operator() {
            return Err(mismatch(tag, "operator_token", "binary operator", &values[1]));
        }
        if op.tag().is_assignment_operator() && !node_at(&values, 0).is_some_and(is_assignable) {
            return Err(mismatch(tag, "left", "assignment target", &values[0]));
        }
    }
    Node::new(tag, span, values)
}

fn make_prefix(tag: Tag, span: Span, values: Vec<Value>) -> Result<Node, IrError> {
    if let Some(op) = node_at(&values, 0) {
        if !op.tag().is_prefix_operator() {
            return Err(mismatch(tag, "operator_token", "prefix operator", &values[0]));
        }
    }
    Node::new(tag, span, values)
}

fn make_postfix(tag: Tag, span: Span, values: Vec<Value>) -> Result<Node, IrError> {
    if let Some(op) = node_at(&values, 1) {
        if !op.tag().is_postfix_operator() {
            return Err(mismatch(tag, "operator_token", "postfix operator", &values[1]));
        }
    }
    Node::new(tag, span, values)
}

/// Tags whose `name` slot must hold an identifier.
fn make_named(tag: Tag, span: Span, values: Vec<Value>) -> Result<Node, IrError> {
    let index = usize::from(tag == Tag::PropertyAccessExpression);
    if let Some(name) = values.get(index) {
        if !name.as_node().is_some_and(|n| n.tag() == Tag::Identifier) {
            return Err(mismatch(tag, "name", "identifier", name));
        }
    }
    if tag == Tag::FunctionDeclaration {
        return make_function(tag, span, values);
    }
    Node::new(tag, span, values)
}

fn make_function(tag: Tag, span: Span, values: Vec<Value>) -> Result<Node, IrError> {
    if let Some(body) = values.get(2) {
        if !body.as_node().is_some_and(|b| b.tag() == Tag::Block) {
            return Err(mismatch(tag, "body", "block", body));
        }
    }
    Node::new(tag, span, values)
}

fn make_property(tag: Tag, span: Span, values: Vec<Value>) -> Result<Node, IrError> {
    if let Some(name) = values.first() {
        let ok = name.as_node().is_some_and(|n| {
            matches!(
                n.tag(),
                Tag::Identifier | Tag::StringLiteral | Tag::NumericLiteral
            )
        });
        if !ok {
            return Err(mismatch(tag, "name", "property key", name));
        }
    }
    Node::new(tag, span, values)
}

fn make_declaration_list(tag: Tag, span: Span, values: Vec<Value>) -> Result<Node, IrError> {
    if let Some(flags) = values.first() {
        if !flags
            .as_text()
            .is_some_and(|k| crate::build::DeclKind::from_keyword(k).is_some())
        {
            return Err(mismatch(tag, "flags", "`const`, `let` or `var`", flags));
        }
    }
    if let Some(Value::List(decls)) = values.get(1) {
        if decls.is_empty() {
            return Err(mismatch(tag, "declarations", "at least one declaration", &values[1]));
        }
        if let Some(bad) = decls.iter().find(|d| d.tag() != Tag::VariableDeclaration) {
            return Err(IrError::FieldMismatch {
                tag,
                field: "declarations",
                expected: "variable declarations".to_owned(),
                found: format!("`{}` node", bad.tag()),
            });
        }
    }
    Node::new(tag, span, values)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
