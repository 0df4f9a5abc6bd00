//! Property: a rewritten program logs exactly what the original logs.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use loopify_eval::evaluate;
use loopify_ir::Schema;
use loopify_rewrite::Rewriter;
use loopify_rules::{builtin_rules, SyntaxParser};
use loopify_syntax::{parse_source, print};
use loopify_types::ScopeOracle;
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(0i32..20, 0..7).prop_map(|items| {
        let items: Vec<String> = items.iter().map(ToString::to_string).collect();
        format!("[{}]", items.join(", "))
    })
}

/// One call of a chain, with its callback.
fn call_strategy() -> impl Strategy<Value = String> {
    (0u32..6, 1i32..5).prop_map(|(kind, k)| match kind {
        0 => format!(".filter((v) => v % {k} === 0)"),
        1 => format!(".filter((v, i) => v > i + {k})"),
        2 => format!(".map((v) => v * {k})"),
        3 => format!(".map((v, i) => v - i * {k})"),
        4 => format!(".map((v, i, all) => v + all.length + {k})"),
        _ => format!(".filter((v, i, all) => all[0] < v + {k})"),
    })
}

fn terminal_strategy() -> impl Strategy<Value = String> {
    (0u32..7, 0i32..4).prop_map(|(kind, k)| match kind {
        0 => format!(".reduce((a, v) => a + v, {k})"),
        1 => format!(".reduce((a, v, i) => a * 2 + v - i, {k})"),
        2 => format!(".find((v) => v > {k})"),
        3 => format!(".some((v, i) => v === i + {k})"),
        4 => format!(".every((v) => v >= {k})"),
        5 => ".length".to_owned(),
        _ => String::new(),
    })
}

fn program_strategy() -> impl Strategy<Value = String> {
    (
        input_strategy(),
        prop::collection::vec(call_strategy(), 0..4),
        terminal_strategy(),
    )
        .prop_map(|(input, calls, terminal)| {
            format!(
                "const xs = {input};\nconst out = xs{}{terminal};\nconsole.log(out);\n",
                calls.concat()
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rewrite_preserves_output(source in program_strategy()) {
        let tree = parse_source(&source).into_result().unwrap();
        let expected = evaluate(&tree).unwrap();

        let rules = builtin_rules().unwrap();
        let oracle = ScopeOracle::analyze(&tree);
        let outcome = Rewriter::new(&rules, &SyntaxParser, &oracle, Schema::standard())
            .rewrite(tree)
            .unwrap();
        let printed = print(&outcome.tree);
        let reparsed = parse_source(&printed).into_result().unwrap();
        let actual = evaluate(&reparsed).unwrap();
        prop_assert_eq!(actual, expected, "{}\n{}", source, printed);
    }
}
