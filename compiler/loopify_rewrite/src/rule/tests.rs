use loopify_ir::{build, Span, Tag};
use pretty_assertions::assert_eq;

use super::*;
use crate::pattern::{arrow_fn, method_call, node, sequence_expr};

fn map_pattern() -> NodePattern {
    method_call(
        "map",
        sequence_expr("array"),
        vec![arrow_fn(&["item", "idx?"], "body").into()],
    )
}

fn map_rule(name: &str) -> Rule {
    Rule::new(name, map_pattern(), Template::text("f(array, body)"))
        .temps(&["x", "i"])
        .splice("array", &[])
        .splice("body", &[("item", "x"), ("idx", "i")])
}

#[test]
fn valid_table_keeps_declaration_order() {
    let table = RuleTable::new(vec![map_rule("b"), map_rule("a")]).unwrap();
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(table.len(), 2);
    assert!(table.get("a").is_some());
    assert!(table.get("c").is_none());
    assert_eq!((&table).into_iter().count(), 2);
}

#[test]
fn duplicate_rule_names_are_rejected() {
    let error = RuleTable::new(vec![map_rule("map"), map_rule("map")]).unwrap_err();
    assert_eq!(error, RuleError::DuplicateRule("map".to_owned()));
}

#[test]
fn duplicate_temps_are_rejected() {
    let rule = Rule::new("r", map_pattern(), Template::text("x")).temps(&["x", "x"]);
    assert_eq!(
        RuleTable::new(vec![rule]).unwrap_err(),
        RuleError::DuplicateTemp {
            rule: "r".to_owned(),
            temp: "x".to_owned()
        }
    );
}

#[test]
fn splicing_an_unbound_capture_is_rejected() {
    let rule = Rule::new("r", map_pattern(), Template::text("x")).splice("callback", &[]);
    assert_eq!(
        RuleTable::new(vec![rule]).unwrap_err(),
        RuleError::UnknownCapture {
            rule: "r".to_owned(),
            capture: "callback".to_owned()
        }
    );
}

#[test]
fn retargeting_onto_an_undeclared_temp_is_rejected() {
    let rule = Rule::new("r", map_pattern(), Template::text("x"))
        .temps(&["x"])
        .splice("body", &[("item", "x"), ("idx", "array")]);
    assert_eq!(
        RuleTable::new(vec![rule]).unwrap_err(),
        RuleError::UnknownTemp {
            rule: "r".to_owned(),
            capture: "idx".to_owned(),
            temp: "array".to_owned()
        }
    );
}

#[test]
fn retargeting_an_unbound_parameter_is_rejected() {
    let rule = Rule::new("r", map_pattern(), Template::text("x"))
        .temps(&["x"])
        .splice("body", &[("acc", "x")]);
    assert!(matches!(
        RuleTable::new(vec![rule]),
        Err(RuleError::UnknownCapture { capture, .. }) if capture == "acc"
    ));
}

#[test]
fn splicing_twice_is_rejected() {
    let rule = Rule::new("r", map_pattern(), Template::text("x"))
        .splice("body", &[])
        .splice("body", &[]);
    assert!(matches!(
        RuleTable::new(vec![rule]),
        Err(RuleError::DuplicateSplice { .. })
    ));
}

#[test]
fn computed_template_sees_captures() {
    let template = Template::computed(|captures| {
        if captures.contains("idx") {
            "with_index".to_owned()
        } else {
            "plain".to_owned()
        }
    });
    let idx = build::identifier("i", Span::DUMMY);
    let mut captures = CaptureMap::new();
    assert_eq!(template.realize(&captures), "plain");
    captures.insert("idx", &idx);
    assert_eq!(template.realize(&captures), "with_index");
    assert_eq!(format!("{template:?}"), "Computed(..)");
}

#[test]
fn empty_table_is_valid() {
    let table = RuleTable::new(Vec::new()).unwrap();
    assert!(table.is_empty());
    let single = RuleTable::new(vec![Rule::new("id", node(Tag::Identifier), Template::text("x"))]);
    assert!(single.is_ok());
}
