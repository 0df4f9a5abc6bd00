//! Pattern combinators for rule catalogs.

use loopify_ir::Tag;

use super::{NodePattern, Pattern, Predicate};

/// Match a node by tag.
pub fn node(tag: Tag) -> NodePattern {
    NodePattern::new().tag(tag)
}

/// `receiver.name(args...)`
///
/// The method name is checked before the receiver, so receiver predicates
/// that consult the type oracle only run on calls of the right method.
pub fn method_call(name: &str, receiver: impl Into<Pattern>, args: Vec<Pattern>) -> NodePattern {
    let callee = node(Tag::PropertyAccessExpression)
        .field(
            "name",
            node(Tag::Identifier).field("text", Pattern::text(name)),
        )
        .field("expression", receiver);
    node(Tag::CallExpression)
        .field("expression", callee)
        .field("arguments", Pattern::Sequence(args))
}

/// An arrow function with value-expression body.
///
/// Each parameter name is captured as the parameter's identifier. A trailing
/// `?` makes the parameter optional, so `arrow_fn(&["x", "i?"], "body")`
/// accepts both `x => ...` and `(x, i) => ...`.
///
/// A callback with any defaulted parameter never matches, optional position
/// or not. A failed optional parameter only unbinds its capture, so the
/// check lives on the arrow.
pub fn arrow_fn(params: &[&str], body_capture: &str) -> NodePattern {
    let params = params.iter().map(|param| {
        let (name, optional) = match param.strip_suffix('?') {
            Some(name) => (name, true),
            None => (*param, false),
        };
        let pattern = node(Tag::Parameter).field("name", node(Tag::Identifier).capture(name));
        Pattern::from(if optional { pattern.optional() } else { pattern })
    });
    node(Tag::ArrowFunction)
        .check(Predicate::new("plain parameters", |n, _| {
            Ok(n.list("parameters")
                .iter()
                .all(|parameter| parameter.child("initializer").is_none()))
        }))
        .field("parameters", Pattern::sequence(params))
        .field("body", value_expr(body_capture))
}

/// Capture any value-producing expression.
pub fn value_expr(capture: &str) -> NodePattern {
    NodePattern::new()
        .check(Predicate::new("value expression", |n, _| Ok(n.tag().is_value())))
        .capture(capture)
}

/// Capture an expression the type oracle reports as a sequence.
pub fn sequence_expr(capture: &str) -> NodePattern {
    NodePattern::new()
        .check(Predicate::new("value expression", |n, _| Ok(n.tag().is_value())))
        .check(Predicate::new("sequence type", |n, oracle| {
            oracle.type_of(n).map(|ty| ty.is_sequence())
        }))
        .capture(capture)
}
