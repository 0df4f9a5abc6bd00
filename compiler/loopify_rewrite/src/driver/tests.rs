use loopify_ir::{IrError, Node, Schema, Tag};
use loopify_syntax::{parse_expression, parse_source, print};
use pretty_assertions::assert_eq;

use super::*;
use crate::oracle::{FixedOracle, TypeDesc};
use crate::pattern::{arrow_fn, method_call, sequence_expr};
use crate::{FireCounts, Template};

const MAP: &str = "((arr) => { const res = []; for (let i = 0; i < arr.length; i++) { \
                   const x = arr[i]; res.push(mapExpression); } return res; })(arrayExpression)";

fn map_rule() -> Rule {
    Rule::new(
        "map",
        method_call(
            "map",
            sequence_expr("arrayExpression"),
            vec![arrow_fn(&["mapItem", "mapIdx?"], "mapExpression").into()],
        ),
        Template::text(MAP),
    )
    .temps(&["arr", "res", "i", "x"])
    .splice("arrayExpression", &[])
    .splice("mapExpression", &[("mapItem", "x"), ("mapIdx", "i")])
}

fn parser(text: &str) -> Result<Node, String> {
    parse_expression(text).map_err(|error| error.to_string())
}

fn oracle() -> FixedOracle {
    FixedOracle::new().with("nums", TypeDesc::array(TypeDesc::Number))
}

fn run(rules: Vec<Rule>, source: &str) -> RewriteOutcome {
    run_with(rules, source, RewriteOptions::default())
}

fn run_with(rules: Vec<Rule>, source: &str, options: RewriteOptions) -> RewriteOutcome {
    let table = RuleTable::new(rules).unwrap();
    let tree = parse_source(source).into_result().unwrap();
    let oracle = oracle();
    Rewriter::new(&table, &parser, &oracle, Schema::standard())
        .with_options(options)
        .rewrite(tree)
        .unwrap()
}

#[test]
fn rewrites_map_into_a_loop() {
    let outcome = run(vec![map_rule()], "const ys = nums.map((n) => n * 2);");
    assert_eq!(
        print(&outcome.tree),
        "const ys = ((_arr0) => {
  const _res1 = [];
  for (let _i2 = 0; _i2 < _arr0.length; _i2++) {
    const _x3 = _arr0[_i2];
    _res1.push(_x3 * 2);
  }
  return _res1;
})(nums);
"
    );
    assert_eq!(outcome.fire_counts.get("map"), 1);
    assert!(outcome.failures.is_empty());
}

#[test]
fn index_parameter_is_retargeted() {
    let outcome = run(vec![map_rule()], "nums.map((n, k) => n + k);");
    let printed = print(&outcome.tree);
    assert!(printed.contains("_res1.push(_x3 + _i2);"), "{printed}");
}

#[test]
fn unmatched_tree_is_returned_unchanged() {
    let source = "const ys = other.map((n) => n);\nconst zs = nums.filter((n) => n);\n";
    let tree = parse_source(source).into_result().unwrap();
    let outcome = run(vec![map_rule()], source);
    assert_eq!(outcome.tree, tree);
    assert!(outcome.fire_counts.is_empty());
    assert_eq!(outcome.fire_counts.get("map"), 0);
}

#[test]
fn nested_idioms_are_rewritten_top_down() {
    let outcome = run(
        vec![map_rule()],
        "const ys = nums.map((n) => n + 1).map((m) => m * 2);",
    );
    assert_eq!(outcome.fire_counts.get("map"), 2);
    let printed = print(&outcome.tree);
    assert!(!printed.contains(".map("), "{printed}");
    // The outer call is visited first, so it takes the first names.
    assert!(printed.contains("_res1.push(_x3 * 2);"), "{printed}");
    assert!(printed.contains("_res5.push(_x7 + 1);"), "{printed}");
}

#[test]
fn inner_callbacks_keep_their_own_parameters() {
    let outcome = run(
        vec![map_rule()],
        "nums.map((n) => n + others.map((n) => n).length);",
    );
    let printed = print(&outcome.tree);
    assert!(
        printed.contains("_res1.push(_x3 + others.map((n) => n).length);"),
        "{printed}"
    );
}

#[test]
fn minted_names_avoid_input_identifiers() {
    let outcome = run(
        vec![map_rule()],
        "const _arr0 = 1;\nconst ys = nums.map((n) => n);",
    );
    let printed = print(&outcome.tree);
    assert!(printed.contains("((_arr1) => {"), "{printed}");
    assert!(printed.contains("const _arr0 = 1;"), "{printed}");
}

#[test]
fn custom_prefix() {
    let options = RewriteOptions {
        temp_prefix: "tmp_".to_owned(),
        ..RewriteOptions::default()
    };
    let outcome = run_with(vec![map_rule()], "nums.map((n) => n);", options);
    assert!(print(&outcome.tree).contains("((tmp_arr0) => {"));
}

#[test]
fn unparsable_template_is_downgraded() {
    let broken = Rule::new(
        "broken",
        method_call("map", sequence_expr("array"), vec![arrow_fn(&["x"], "body").into()]),
        Template::text("((arr) => {"),
    );
    let outcome = run(vec![broken, map_rule()], "nums.map((n) => n);");
    assert_eq!(outcome.fire_counts.get("broken"), 0);
    assert_eq!(outcome.fire_counts.get("map"), 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].rule, "broken");
    assert!(matches!(
        outcome.failures[0].error,
        RewriteError::TemplateParse { .. }
    ));
}

#[test]
fn failed_instantiation_releases_its_temps() {
    // Assigning to a call expression cannot be built.
    let broken = Rule::new(
        "broken",
        method_call("map", sequence_expr("array"), vec![arrow_fn(&["x"], "body").into()]),
        Template::text("array = t"),
    )
    .temps(&["t"])
    .splice("array", &[]);
    let outcome = run(vec![broken, map_rule()], "nums.slice(1).map((n) => n);");
    assert_eq!(outcome.failures.len(), 1);
    assert!(matches!(
        outcome.failures[0].error,
        RewriteError::Ir(IrError::FieldMismatch { .. })
    ));
    assert!(print(&outcome.tree).contains("((_arr0) => {"));
}

#[test]
fn missing_schema_entry_aborts() {
    let table = RuleTable::new(vec![map_rule()]).unwrap();
    let schema = Schema::builder().register(Tag::Identifier).build();
    let tree = parse_source("nums.map((n) => n);").into_result().unwrap();
    let oracle = oracle();
    let error = Rewriter::new(&table, &parser, &oracle, &schema)
        .rewrite(tree)
        .unwrap_err();
    assert_eq!(
        error,
        DriverError::Schema(IrError::UnknownTag("SourceFile".to_owned()))
    );
}

#[test]
fn fire_counts_merge_and_display() {
    let mut counts = FireCounts::default();
    counts.record("map");
    counts.record("filter");
    counts.record("map");
    let mut other = FireCounts::default();
    other.record("reduce");
    other.record("map");
    counts.merge(&other);
    assert_eq!(counts.to_string(), "map: 3, filter: 1, reduce: 1");
    assert_eq!(counts.total(), 5);
}
