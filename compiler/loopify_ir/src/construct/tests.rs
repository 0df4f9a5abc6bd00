use pretty_assertions::assert_eq;

use super::*;
use crate::build;

fn ident(name: &str) -> Node {
    build::identifier(name, Span::DUMMY)
}

fn token(tag: Tag) -> Value {
    Value::from(build::token(tag, Span::DUMMY))
}

#[test]
fn tokens_and_error_have_no_constructor() {
    assert!(constructor(Tag::PlusToken).is_none());
    assert!(constructor(Tag::BreakStatement).is_none());
    assert!(constructor(Tag::Error).is_none());
    assert!(constructor(Tag::CallExpression).is_some());
}

#[test]
fn every_fielded_tag_except_error_has_a_constructor() {
    for tag in Tag::ALL {
        let expected = !tag.is_token() && tag != Tag::Error;
        assert_eq!(constructor(tag).is_some(), expected, "{tag}");
    }
}

#[test]
fn rebuild_tokens_from_tag_alone() {
    let node = rebuild(Tag::TrueKeyword, Span::new(3, 7), Vec::new());
    assert_eq!(
        node,
        Some(Ok(build::token(Tag::TrueKeyword, Span::new(3, 7))))
    );
    assert_eq!(rebuild(Tag::Error, Span::DUMMY, Vec::new()), None);
}

#[test]
fn rebuild_token_with_values_is_arity_error() {
    let result = rebuild(Tag::PlusToken, Span::DUMMY, vec![Value::Absent]);
    assert_eq!(
        result,
        Some(Err(IrError::Arity {
            tag: Tag::PlusToken,
            expected: 0,
            found: 1,
        }))
    );
}

#[test]
fn identifier_text_is_checked() {
    let make = constructor(Tag::Identifier).unwrap();
    assert!(make(Tag::Identifier, Span::DUMMY, vec![Value::Text("_x1".into())]).is_ok());
    assert!(make(Tag::Identifier, Span::DUMMY, vec![Value::Text("$".into())]).is_ok());
    let err = make(Tag::Identifier, Span::DUMMY, vec![Value::Text("1x".into())]).unwrap_err();
    assert!(matches!(err, IrError::FieldMismatch { field: "text", .. }));
}

#[test]
fn numeric_text_is_checked() {
    let make = constructor(Tag::NumericLiteral).unwrap();
    assert!(make(Tag::NumericLiteral, Span::DUMMY, vec![Value::Text("1.5".into())]).is_ok());
    assert!(make(Tag::NumericLiteral, Span::DUMMY, vec![Value::Text("one".into())]).is_err());
}

#[test]
fn binary_operator_slot_rejects_non_operators() {
    let make = constructor(Tag::BinaryExpression).unwrap();
    let ok = make(
        Tag::BinaryExpression,
        Span::DUMMY,
        vec![ident("a").into(), token(Tag::PlusToken), ident("b").into()],
    );
    assert!(ok.is_ok());

    let err = make(
        Tag::BinaryExpression,
        Span::DUMMY,
        vec![ident("a").into(), ident("plus").into(), ident("b").into()],
    )
    .unwrap_err();
    assert_eq!(
        err,
        IrError::FieldMismatch {
            tag: Tag::BinaryExpression,
            field: "operator_token",
            expected: "binary operator".to_owned(),
            found: "`Identifier` node".to_owned(),
        }
    );
}

#[test]
fn assignment_needs_assignable_left_side() {
    let make = constructor(Tag::BinaryExpression).unwrap();
    let literal = build::numeric("1", Span::DUMMY);
    let err = make(
        Tag::BinaryExpression,
        Span::DUMMY,
        vec![literal.into(), token(Tag::EqualsToken), ident("b").into()],
    )
    .unwrap_err();
    assert!(matches!(err, IrError::FieldMismatch { field: "left", .. }));
}

#[test]
fn unary_operators_are_positional() {
    let prefix = constructor(Tag::PrefixUnaryExpression).unwrap();
    assert!(prefix(
        Tag::PrefixUnaryExpression,
        Span::DUMMY,
        vec![token(Tag::ExclamationToken), ident("a").into()]
    )
    .is_ok());

    let postfix = constructor(Tag::PostfixUnaryExpression).unwrap();
    assert!(postfix(
        Tag::PostfixUnaryExpression,
        Span::DUMMY,
        vec![ident("a").into(), token(Tag::ExclamationToken)]
    )
    .is_err());
}

#[test]
fn parameter_name_must_be_identifier() {
    let make = constructor(Tag::Parameter).unwrap();
    let err = make(
        Tag::Parameter,
        Span::DUMMY,
        vec![build::numeric("0", Span::DUMMY).into(), Value::Absent],
    )
    .unwrap_err();
    assert!(matches!(err, IrError::FieldMismatch { field: "name", .. }));
}

#[test]
fn property_access_name_is_second_slot() {
    let make = constructor(Tag::PropertyAccessExpression).unwrap();
    let call = build::call(ident("f"), vec![], Span::DUMMY);
    assert!(make(
        Tag::PropertyAccessExpression,
        Span::DUMMY,
        vec![call.into(), ident("length").into()]
    )
    .is_ok());
}

#[test]
fn declaration_list_checks_keyword_and_entries() {
    let make = constructor(Tag::VariableDeclarationList).unwrap();
    let decl = build::variable_declaration(ident("x"), None, Span::DUMMY);
    assert!(make(
        Tag::VariableDeclarationList,
        Span::DUMMY,
        vec![Value::Text("let".into()), Value::from(vec![decl.clone()])]
    )
    .is_ok());
    assert!(make(
        Tag::VariableDeclarationList,
        Span::DUMMY,
        vec![Value::Text("static".into()), Value::from(vec![decl])]
    )
    .is_err());
    assert!(make(
        Tag::VariableDeclarationList,
        Span::DUMMY,
        vec![Value::Text("let".into()), Value::from(Vec::<Node>::new())]
    )
    .is_err());
}

#[test]
fn block_rejects_bare_expressions() {
    let make = constructor(Tag::Block).unwrap();
    let err = make(Tag::Block, Span::DUMMY, vec![Value::from(vec![ident("x")])]).unwrap_err();
    assert!(matches!(err, IrError::FieldMismatch { field: "statements", .. }));
}

#[test]
fn arrow_parameters_must_be_parameters() {
    let make = constructor(Tag::ArrowFunction).unwrap();
    let err = make(
        Tag::ArrowFunction,
        Span::DUMMY,
        vec![Value::from(vec![ident("x")]), ident("x").into()],
    )
    .unwrap_err();
    assert!(matches!(err, IrError::FieldMismatch { field: "parameters", .. }));
}

#[test]
fn generic_tags_validate_shape() {
    let make = constructor(Tag::CallExpression).unwrap();
    let err = make(Tag::CallExpression, Span::DUMMY, vec![Value::Absent, Value::from(vec![])])
        .unwrap_err();
    assert_eq!(
        err,
        IrError::MissingField {
            tag: Tag::CallExpression,
            field: "expression",
        }
    );
}
