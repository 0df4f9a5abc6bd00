use std::cell::Cell;

use loopify_ir::{Node, Schema, Span, Tag};
use loopify_syntax::parse_expression;
use pretty_assertions::assert_eq;

use super::*;
use crate::oracle::{FixedOracle, OracleError, TypeDesc};
use crate::pattern::{arrow_fn, method_call, node, sequence_expr};

fn expr(source: &str) -> Node {
    parse_expression(source).unwrap()
}

fn numbers() -> FixedOracle {
    FixedOracle::new()
        .with("nums", TypeDesc::array(TypeDesc::Number))
        .with("obj", TypeDesc::Object)
}

fn map_pattern() -> NodePattern {
    method_call(
        "map",
        sequence_expr("arr"),
        vec![arrow_fn(&["x", "i?"], "body").into()],
    )
}

fn texts(captures: &CaptureMap<'_>) -> Vec<(String, String)> {
    captures
        .iter()
        .map(|(name, node)| (name.to_owned(), loopify_syntax::print(node)))
        .collect()
}

/// Counts oracle queries.
struct Counting<'a> {
    inner: &'a FixedOracle,
    calls: Cell<usize>,
}

impl TypeOracle for Counting<'_> {
    fn type_of(&self, node: &Node) -> Result<TypeDesc, OracleError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.type_of(node)
    }
}

struct Broken;

impl TypeOracle for Broken {
    fn type_of(&self, _: &Node) -> Result<TypeDesc, OracleError> {
        Err(OracleError::Unavailable("checker crashed".to_owned()))
    }
}

#[test]
fn binds_receiver_parameter_and_body() {
    let tree = expr("nums.map((x) => x * 2)");
    let pattern = map_pattern();
    let captures = match_node(&tree, &pattern, &numbers(), Schema::standard())
        .unwrap()
        .unwrap();
    assert_eq!(
        texts(&captures),
        vec![
            ("arr".to_owned(), "nums".to_owned()),
            ("x".to_owned(), "x".to_owned()),
            ("body".to_owned(), "x * 2".to_owned()),
        ]
    );
    assert!(!captures.contains("i"));
}

#[test]
fn optional_parameter_binds_when_present() {
    let tree = expr("nums.map((x, i) => x + i)");
    let pattern = map_pattern();
    let captures = match_node(&tree, &pattern, &numbers(), Schema::standard())
        .unwrap()
        .unwrap();
    assert_eq!(captures.get("i").and_then(Node::identifier), Some("i"));
    assert_eq!(captures.names().collect::<Vec<_>>(), vec!["arr", "x", "i", "body"]);
}

#[test]
fn non_sequence_receiver_does_not_match() {
    let tree = expr("obj.map((x) => x)");
    let pattern = map_pattern();
    assert_eq!(
        match_node(&tree, &pattern, &numbers(), Schema::standard()).unwrap(),
        None
    );
}

#[test]
fn unknown_receiver_does_not_match() {
    let tree = expr("other.map((x) => x)");
    let pattern = map_pattern();
    assert_eq!(
        match_node(&tree, &pattern, &numbers(), Schema::standard()).unwrap(),
        None
    );
}

#[test]
fn wrong_method_skips_the_oracle() {
    let tree = expr("nums.filter((x) => x)");
    let pattern = map_pattern();
    let fixed = numbers();
    let oracle = Counting {
        inner: &fixed,
        calls: Cell::new(0),
    };
    assert_eq!(
        match_node(&tree, &pattern, &oracle, Schema::standard()).unwrap(),
        None
    );
    assert_eq!(oracle.calls.get(), 0);
}

#[test]
fn extra_arguments_do_not_match() {
    let tree = expr("nums.map((x) => x, self)");
    let pattern = map_pattern();
    assert_eq!(
        match_node(&tree, &pattern, &numbers(), Schema::standard()).unwrap(),
        None
    );
}

#[test]
fn too_many_parameters_do_not_match() {
    let tree = expr("nums.map((x, i, a, extra) => x)");
    let pattern = map_pattern();
    assert_eq!(
        match_node(&tree, &pattern, &numbers(), Schema::standard()).unwrap(),
        None
    );
}

#[test]
fn block_body_is_not_a_value_expression() {
    let tree = expr("nums.map((x) => { return x; })");
    let pattern = map_pattern();
    assert_eq!(
        match_node(&tree, &pattern, &numbers(), Schema::standard()).unwrap(),
        None
    );
}

#[test]
fn defaulted_parameter_does_not_match() {
    let tree = expr("nums.map((x = 1) => x)");
    let pattern = map_pattern();
    assert_eq!(
        match_node(&tree, &pattern, &numbers(), Schema::standard()).unwrap(),
        None
    );
}

#[test]
fn defaulted_optional_parameter_rejects_the_callback() {
    let pattern = map_pattern();
    for source in ["nums.map((x, i = 10) => x + i)", "nums.map((x = 0, i) => x + i)"] {
        let tree = expr(source);
        assert_eq!(
            match_node(&tree, &pattern, &numbers(), Schema::standard()).unwrap(),
            None,
            "{source}"
        );
    }
}

#[test]
fn failed_optional_pattern_rolls_back_its_captures() {
    let tree = expr("a.b()");
    let pattern = node(Tag::CallExpression).field(
        "expression",
        NodePattern::new()
            .capture("callee")
            .tag(Tag::Identifier)
            .optional(),
    );
    let captures = match_node(&tree, &pattern, &numbers(), Schema::standard())
        .unwrap()
        .unwrap();
    assert!(captures.is_empty());
}

#[test]
fn undeclared_field_only_satisfies_optional_patterns() {
    let tree = expr("x");
    let loose = node(Tag::Identifier).field("body", Pattern::Wildcard);
    let strict = node(Tag::Identifier).field("body", node(Tag::Block));
    let schema = Schema::standard();
    assert!(match_node(&tree, &loose, &numbers(), schema).unwrap().is_some());
    assert!(match_node(&tree, &strict, &numbers(), schema).unwrap().is_none());
}

#[test]
fn field_aliases_resolve() {
    let tree = expr("42");
    let pattern = node(Tag::NumericLiteral).field("value", Pattern::text("42"));
    assert!(match_node(&tree, &pattern, &numbers(), Schema::standard())
        .unwrap()
        .is_some());
}

#[test]
fn oracle_failure_surfaces_as_predicate_error() {
    let tree = expr("nums.map((x) => x)");
    let pattern = map_pattern();
    let error = match_node(&tree, &pattern, &Broken, Schema::standard()).unwrap_err();
    assert_eq!(
        error,
        RewriteError::PredicateEvaluation {
            predicate: "sequence type".to_owned(),
            source: OracleError::Unavailable("checker crashed".to_owned()),
        }
    );
    assert!(!error.is_fatal());
}

#[test]
fn unregistered_tag_is_a_schema_gap() {
    let schema = Schema::builder().register(Tag::Identifier).build();
    let tree = expr("f(x)");
    let pattern = node(Tag::CallExpression).field("expression", Pattern::Wildcard);
    // The tag clause passes; reading a field of the unregistered tag fails.
    let error = match_node(&tree, &pattern, &numbers(), &schema).unwrap_err();
    assert!(error.is_fatal(), "{error}");
}

#[test]
fn later_binding_replaces_earlier_in_place() {
    let a = loopify_ir::build::identifier("a", Span::DUMMY);
    let b = loopify_ir::build::identifier("b", Span::DUMMY);
    let mut captures = CaptureMap::new();
    captures.insert("first", &a);
    captures.insert("second", &a);
    captures.insert("first", &b);
    assert_eq!(captures.len(), 2);
    assert_eq!(captures.get("first").and_then(Node::identifier), Some("b"));
    assert_eq!(captures.names().collect::<Vec<_>>(), vec!["first", "second"]);
}
