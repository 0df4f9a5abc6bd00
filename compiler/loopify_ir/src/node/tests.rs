use pretty_assertions::assert_eq;

use super::*;
use crate::build;

fn ident(name: &str, at: u32) -> Node {
    build::identifier(name, Span::new(at, at + u32::try_from(name.len()).unwrap()))
}

#[test]
fn new_checks_arity() {
    let err = Node::new(Tag::Identifier, Span::DUMMY, []).unwrap_err();
    assert_eq!(
        err,
        IrError::Arity {
            tag: Tag::Identifier,
            expected: 1,
            found: 0,
        }
    );
}

#[test]
fn new_rejects_absent_required_field() {
    let err = Node::new(
        Tag::PropertyAccessExpression,
        Span::DUMMY,
        [Value::from(ident("a", 0)), Value::Absent],
    )
    .unwrap_err();
    assert_eq!(
        err,
        IrError::MissingField {
            tag: Tag::PropertyAccessExpression,
            field: "name",
        }
    );
}

#[test]
fn new_rejects_wrong_kind() {
    let err = Node::new(
        Tag::CallExpression,
        Span::DUMMY,
        [Value::from(ident("f", 0)), Value::from(ident("x", 2))],
    )
    .unwrap_err();
    assert!(matches!(err, IrError::FieldMismatch { field: "arguments", .. }));
}

#[test]
fn optional_fields_may_be_absent() {
    let node = Node::new(Tag::ReturnStatement, Span::DUMMY, [Value::Absent]).unwrap();
    assert_eq!(node.child("expression"), None);
    assert_eq!(node.get("expression"), Some(&Value::Absent));
}

#[test]
fn accessors_follow_schema_names() {
    let call = build::method_call(ident("xs", 0), "map", vec![ident("f", 7)], Span::new(0, 9));
    let callee = call.child("expression").unwrap();
    assert_eq!(callee.tag(), Tag::PropertyAccessExpression);
    assert!(callee.child("name").unwrap().is_identifier_named("map"));
    assert_eq!(call.list("arguments").len(), 1);
    assert!(call.list("nonexistent").is_empty());
    assert_eq!(call.get("nonexistent"), None);
}

#[test]
fn children_are_in_field_order() {
    let sum = build::binary(ident("a", 0), Tag::PlusToken, ident("b", 4), Span::new(0, 5));
    let tags: Vec<_> = sum.children().map(Node::tag).collect();
    assert_eq!(
        tags,
        vec![Tag::Identifier, Tag::PlusToken, Tag::Identifier]
    );
}

#[test]
fn same_shape_ignores_spans() {
    let a = build::binary(ident("a", 0), Tag::PlusToken, ident("b", 4), Span::new(0, 5));
    let b = build::binary(ident("a", 10), Tag::PlusToken, ident("b", 14), Span::new(10, 15));
    assert_ne!(a, b);
    assert!(a.same_shape(&b));

    let c = build::binary(ident("a", 0), Tag::MinusToken, ident("b", 4), Span::new(0, 5));
    assert!(!a.same_shape(&c));
}

#[test]
fn clear_spans_resets_whole_tree() {
    let mut tree = build::call(ident("f", 0), vec![ident("x", 2)], Span::new(0, 4));
    tree.clear_spans();
    let mut spans = Vec::new();
    tree.walk(&mut |n: &Node| spans.push(n.span()));
    assert_eq!(spans.len(), 3);
    assert!(spans.iter().all(Span::is_dummy));
}

#[test]
fn try_map_children_replaces_direct_children() {
    let call = build::call(ident("f", 0), vec![ident("x", 2), ident("y", 5)], Span::new(0, 7));
    let renamed = call
        .try_map_children(|child| {
            Ok::<_, ()>(match child.identifier() {
                Some(name) => build::identifier(name.to_uppercase(), child.span()),
                None => child,
            })
        })
        .unwrap();
    assert_eq!(renamed.span(), Span::new(0, 7));
    let names: Vec<_> = renamed.children().filter_map(Node::identifier).collect();
    assert_eq!(names, vec!["F", "X", "Y"]);
}

#[test]
fn try_map_children_propagates_errors() {
    let call = build::call(ident("f", 0), vec![ident("x", 2)], Span::DUMMY);
    let result = call.try_map_children(|child| {
        if child.is_identifier_named("x") {
            Err("boom")
        } else {
            Ok(child)
        }
    });
    assert_eq!(result, Err("boom"));
}

#[test]
fn size_counts_every_node() {
    let tree = build::binary(ident("a", 0), Tag::PlusToken, ident("b", 4), Span::DUMMY);
    assert_eq!(tree.size(), 4);
}

#[test]
fn describe_values() {
    assert_eq!(Value::Absent.describe(), "nothing");
    assert_eq!(Value::Text("x".into()).describe(), "text `x`");
    assert_eq!(Value::from(ident("x", 0)).describe(), "`Identifier` node");
    assert_eq!(Value::from(vec![ident("x", 0)]).describe(), "list of 1 nodes");
}
