use loopify_ir::build;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn display_uses_host_syntax() {
    assert_eq!(TypeDesc::array(TypeDesc::Number).to_string(), "number[]");
    assert_eq!(
        TypeDesc::array(TypeDesc::array(TypeDesc::String)).to_string(),
        "string[][]"
    );
    assert_eq!(TypeDesc::Unknown.to_string(), "unknown");
}

#[test]
fn only_arrays_are_sequences() {
    assert!(TypeDesc::array(TypeDesc::Unknown).is_sequence());
    assert!(!TypeDesc::Object.is_sequence());
    assert!(!TypeDesc::String.is_sequence());
}

#[test]
fn fixed_oracle_follows_chains() {
    let oracle = FixedOracle::new().with("nums", TypeDesc::array(TypeDesc::Number));
    let nums = build::identifier("nums", Span::DUMMY);
    let f = build::identifier("f", Span::DUMMY);
    let filtered = build::method_call(nums.clone(), "filter", vec![f.clone()], Span::DUMMY);
    let mapped = build::method_call(filtered.clone(), "map", vec![f.clone()], Span::DUMMY);
    let joined = build::method_call(nums.clone(), "join", vec![], Span::DUMMY);

    assert_eq!(
        oracle.type_of(&filtered).unwrap(),
        TypeDesc::array(TypeDesc::Number)
    );
    assert!(oracle.type_of(&mapped).unwrap().is_sequence());
    assert_eq!(oracle.type_of(&joined).unwrap(), TypeDesc::Unknown);
    assert_eq!(oracle.type_of(&f).unwrap(), TypeDesc::Unknown);
}

#[test]
fn references_are_oracles() {
    fn ask(oracle: &dyn TypeOracle) -> TypeDesc {
        oracle.type_of(&build::numeric("1", Span::DUMMY)).unwrap()
    }
    let oracle = FixedOracle::new();
    assert_eq!(ask(&&oracle), TypeDesc::Number);
}
