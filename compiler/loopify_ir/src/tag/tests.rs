use super::*;

#[test]
fn names_round_trip_through_from_name() {
    for tag in Tag::ALL {
        assert_eq!(Tag::from_name(tag.name()), Ok(tag));
    }
}

#[test]
fn all_is_unique() {
    let mut seen = rustc_hash::FxHashSet::default();
    for tag in Tag::ALL {
        assert!(seen.insert(tag), "duplicate tag {tag}");
    }
}

#[test]
fn unknown_name_is_rejected() {
    assert_eq!(
        Tag::from_name("JsxElement"),
        Err(IrError::UnknownTag("JsxElement".to_owned()))
    );
}

#[test]
fn assignment_operators_are_binary() {
    assert!(Tag::EqualsToken.is_binary_operator());
    assert!(Tag::PlusEqualsToken.is_assignment_operator());
    assert!(!Tag::PlusToken.is_assignment_operator());
}

#[test]
fn prefix_and_postfix_operators() {
    assert!(Tag::ExclamationToken.is_prefix_operator());
    assert!(!Tag::ExclamationToken.is_postfix_operator());
    assert!(Tag::PlusPlusToken.is_postfix_operator());
    assert!(!Tag::AsteriskToken.is_prefix_operator());
}

#[test]
fn value_tags_exclude_statements() {
    assert!(Tag::CallExpression.is_value());
    assert!(Tag::TrueKeyword.is_value());
    assert!(!Tag::Block.is_value());
    assert!(Tag::Block.is_statement());
    assert!(!Tag::Parameter.is_value());
}

#[test]
fn token_text_covers_every_operator() {
    for tag in Tag::ALL {
        if tag.is_operator() || tag.is_keyword() {
            assert!(tag.token_text().is_some(), "{tag} has no spelling");
        }
    }
    assert_eq!(Tag::Identifier.token_text(), None);
}

#[test]
fn tokens_have_no_fields() {
    assert!(Tag::PlusToken.is_token());
    assert!(Tag::BreakStatement.is_token());
    assert!(!Tag::Identifier.is_token());
    assert!(!Tag::Error.is_token());
}
