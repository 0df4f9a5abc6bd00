use loopify_ir::build;
use loopify_ir::{Node, Span, Tag};
use pretty_assertions::assert_eq;

use crate::{parse_expression, parse_source};

fn expr(source: &str) -> Node {
    parse_expression(source).unwrap()
}

fn ident(name: &str) -> Node {
    build::identifier(name, Span::DUMMY)
}

#[test]
fn method_chain_nests_left_to_right() {
    let tree = expr("xs.filter(f).map(g)");
    let expected = build::method_call(
        build::method_call(ident("xs"), "filter", vec![ident("f")], Span::DUMMY),
        "map",
        vec![ident("g")],
        Span::DUMMY,
    );
    assert!(tree.same_shape(&expected), "{tree:#?}");
}

#[test]
fn binary_precedence_and_associativity() {
    let tree = expr("a - b - c * d");
    let expected = build::binary(
        build::binary(ident("a"), Tag::MinusToken, ident("b"), Span::DUMMY),
        Tag::MinusToken,
        build::binary(ident("c"), Tag::AsteriskToken, ident("d"), Span::DUMMY),
        Span::DUMMY,
    );
    assert!(tree.same_shape(&expected));
}

#[test]
fn assignment_is_right_associative() {
    let tree = expr("a = b += 1");
    assert_eq!(tree.tag(), Tag::BinaryExpression);
    let right = tree.child("right").unwrap();
    assert_eq!(
        right.child("operator_token").map(Node::tag),
        Some(Tag::PlusEqualsToken)
    );
}

#[test]
fn arrow_forms() {
    let bare = expr("x => x + 1");
    assert_eq!(bare.tag(), Tag::ArrowFunction);
    assert_eq!(bare.list("parameters").len(), 1);

    let paren = expr("(acc, x, i) => acc");
    assert_eq!(paren.list("parameters").len(), 3);

    let empty = expr("() => { return 1; }");
    assert!(empty.list("parameters").is_empty());
    assert_eq!(empty.child("body").map(Node::tag), Some(Tag::Block));

    let defaulted = expr("(x = 0) => x");
    assert!(defaulted.list("parameters")[0].child("initializer").is_some());
}

#[test]
fn parenthesized_expression_is_not_an_arrow() {
    let tree = expr("(a + b) * c");
    let left = tree.child("left").unwrap();
    assert_eq!(left.tag(), Tag::ParenthesizedExpression);
}

#[test]
fn immediately_invoked_arrow() {
    let tree = expr("((arr) => arr.length)(xs)");
    assert_eq!(tree.tag(), Tag::CallExpression);
    let callee = tree.child("expression").unwrap();
    assert_eq!(callee.tag(), Tag::ParenthesizedExpression);
    assert_eq!(
        callee.child("expression").map(Node::tag),
        Some(Tag::ArrowFunction)
    );
}

#[test]
fn object_literal_with_shorthand() {
    let tree = expr("({ a: 1, b, 'c': x })");
    let object = tree.child("expression").unwrap();
    let props = object.list("properties");
    assert_eq!(props.len(), 3);
    assert!(props[1].child("initializer").unwrap().is_identifier_named("b"));
    assert_eq!(props[2].child("name").map(Node::tag), Some(Tag::StringLiteral));
}

#[test]
fn unary_and_postfix() {
    let tree = expr("!a && i++");
    let left = tree.child("left").unwrap();
    assert_eq!(left.tag(), Tag::PrefixUnaryExpression);
    let right = tree.child("right").unwrap();
    assert_eq!(right.tag(), Tag::PostfixUnaryExpression);
}

#[test]
fn spans_cover_source() {
    let tree = expr("xs.map(f)");
    assert_eq!(tree.span(), Span::new(0, 9));
    let callee = tree.child("expression").unwrap();
    assert_eq!(callee.span(), Span::new(0, 6));
}

#[test]
fn statements() {
    let output = parse_source(
        "const xs = [1, 2];
         let total = 0;
         function add(a, b) { return a + b; }
         for (let i = 0; i < xs.length; i++) { total += xs[i]; }
         if (total > 2) { total = 2; } else total = 0;
         ;",
    );
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    let tags: Vec<_> = output.tree.list("statements").iter().map(Node::tag).collect();
    assert_eq!(
        tags,
        vec![
            Tag::VariableStatement,
            Tag::VariableStatement,
            Tag::FunctionDeclaration,
            Tag::ForStatement,
            Tag::IfStatement,
            Tag::EmptyStatement,
        ]
    );
}

#[test]
fn for_with_empty_clauses() {
    let output = parse_source("for (;;) { break; }");
    let for_stmt = &output.tree.list("statements")[0];
    assert_eq!(for_stmt.child("initializer"), None);
    assert_eq!(for_stmt.child("condition"), None);
    assert_eq!(for_stmt.child("incrementor"), None);
}

#[test]
fn recovery_keeps_following_statements() {
    let output = parse_source("let a = ;\nlet b = 2;");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].message, "expected expression, found `;`");
    let statements = output.tree.list("statements");
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].tag(), Tag::Error);
    assert_eq!(statements[0].text(), Some("let a = ;"));
    assert_eq!(statements[1].tag(), Tag::VariableStatement);
}

#[test]
fn lone_expression_rejects_trailing_tokens() {
    let err = parse_expression("a b").unwrap_err();
    assert_eq!(err.message, "expected end of input, found identifier");
}

#[test]
fn invalid_assignment_target() {
    let err = parse_expression("1 = a").unwrap_err();
    assert_eq!(err.message, "invalid assignment target");
}

#[test]
fn context_is_attached() {
    let err = parse_source("for (let i = 0 i < 3; i++) {}").errors.remove(0);
    assert_eq!(err.context, Some("for loop"));
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 2_000;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    assert!(parse_expression(&source).is_ok());
}
