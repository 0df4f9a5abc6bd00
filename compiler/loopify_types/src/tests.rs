use loopify_ir::{Node, Span, Tag};
use loopify_syntax::{parse_source, print};
use pretty_assertions::assert_eq;

use super::*;

fn analyzed(source: &str) -> (Node, ScopeOracle) {
    let tree = parse_source(source).into_result().unwrap();
    let oracle = ScopeOracle::analyze(&tree);
    (tree, oracle)
}

/// Type of the first analyzed expression in pre-order that prints as `text`.
fn typed(node: &Node, text: &str, oracle: &ScopeOracle) -> Option<TypeDesc> {
    if node.tag().is_value() && print(node) == text {
        if let Ok(ty) = oracle.type_of(node) {
            return Some(ty);
        }
    }
    node.children().find_map(|child| typed(child, text, oracle))
}

fn type_of(source: &str, text: &str) -> TypeDesc {
    let (tree, oracle) = analyzed(source);
    typed(&tree, text, &oracle).unwrap_or_else(|| panic!("no typed `{text}` in {source}"))
}

#[test]
fn literals_and_declarations() {
    let source = "const nums = [1, 2, 3];\nconst names = [\"a\"];\nconst obj = {};\nnums; names; obj;";
    assert_eq!(type_of(source, "nums"), TypeDesc::array(TypeDesc::Number));
    assert_eq!(type_of(source, "names"), TypeDesc::array(TypeDesc::String));
    assert_eq!(type_of(source, "obj"), TypeDesc::Object);
}

#[test]
fn mixed_and_empty_arrays_are_sequences_of_unknown() {
    assert_eq!(
        type_of("const xs = [];\nxs;", "xs"),
        TypeDesc::array(TypeDesc::Unknown)
    );
    assert_eq!(
        type_of("const xs = [1, \"a\"];\nxs;", "xs"),
        TypeDesc::array(TypeDesc::Unknown)
    );
}

#[test]
fn chains_stay_sequences() {
    let source = "const nums = [1, 2];\nconst r = nums.map((x) => x + \"!\").filter((s) => s);";
    assert_eq!(
        type_of(source, "nums.map((x) => x + \"!\")"),
        TypeDesc::array(TypeDesc::String)
    );
    assert_eq!(
        type_of(source, "nums.map((x) => x + \"!\").filter((s) => s)"),
        TypeDesc::array(TypeDesc::String)
    );
}

#[test]
fn callback_parameters_are_typed_from_the_receiver() {
    let source = "const grid = [[1], [2]];\ngrid.forEach((row, i) => row.map((v) => v * i));";
    assert_eq!(type_of(source, "row"), TypeDesc::array(TypeDesc::Number));
    assert_eq!(type_of(source, "i"), TypeDesc::Number);
    assert_eq!(
        type_of(source, "row.map((v) => v * i)"),
        TypeDesc::array(TypeDesc::Number)
    );
}

#[test]
fn reduce_accumulator_takes_the_initial_value() {
    let source = "const nums = [1];\nconst total = nums.reduce((acc, x) => acc + x, \"\");\ntotal;";
    assert_eq!(type_of(source, "acc"), TypeDesc::String);
    assert_eq!(type_of(source, "total"), TypeDesc::String);
}

#[test]
fn scopes_shadow_and_end() {
    let source = "const xs = [1];\nfunction f(xs) {\n  return xs;\n}\n{\n  const ys = xs;\n}\nys;";
    let (tree, oracle) = analyzed(source);
    let mut xs_types = Vec::new();
    tree.walk(&mut |node: &Node| {
        if node.is_identifier_named("xs") {
            if let Ok(ty) = oracle.type_of(node) {
                xs_types.push(ty);
            }
        }
    });
    // The parameter shadows; the block sees the outer binding.
    assert_eq!(
        xs_types,
        vec![TypeDesc::Unknown, TypeDesc::array(TypeDesc::Number)]
    );
    // Outside the block `ys` is unbound.
    assert_eq!(type_of(source, "ys"), TypeDesc::Unknown);
}

#[test]
fn non_array_receivers_are_not_sequences() {
    let source = "const nums = {};\nconst r = nums.map((x) => x);";
    let ty = type_of(source, "nums.map((x) => x)");
    assert_eq!(ty, TypeDesc::Unknown);
    assert!(!type_of(source, "nums").is_sequence());
}

#[test]
fn unanalyzed_nodes_are_reported() {
    let (_, oracle) = analyzed("const a = 1;");
    let synthetic = loopify_ir::build::identifier("a", Span::new(100, 101));
    assert_eq!(
        oracle.type_of(&synthetic),
        Err(OracleError::NotAnalyzed {
            tag: Tag::Identifier,
            span: Span::new(100, 101)
        })
    );
}
