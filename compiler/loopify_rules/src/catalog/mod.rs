//! The built-in rule catalog.
//!
//! Rules are declared in resolution order. Fused chains come before their
//! sub-chains, so `xs.filter(f).map(g)` becomes one loop rather than a loop
//! over the result of another. Every rule replaces the chain with an
//! immediately invoked arrow function (see [`crate::template`]); callbacks
//! must have expression bodies and plain parameters.
//!
//! | rule | chain |
//! |------|-------|
//! | `filter_map_reduce` | `xs.filter(f).map(g).reduce(h, init)` |
//! | `filter_map` | `xs.filter(f).map(g)` |
//! | `filter_reduce` | `xs.filter(f).reduce(h, init)` |
//! | `map_reduce` | `xs.map(g).reduce(h, init)` |
//! | `filter` | `xs.filter(f)` |
//! | `map` | `xs.map(g)` |
//! | `reduce` | `xs.reduce(h, init)` |
//! | `for_each` | `xs.forEach(f)` |
//! | `find` | `xs.find(f)` |
//! | `some` | `xs.some(f)` |
//! | `every` | `xs.every(f)` |
//!
//! `reduce` without an initial value is left alone.

mod fused;
mod single;
mod visit;

use loopify_rewrite::pattern::{arrow_fn, method_call, value_expr, NodePattern, Pattern};
use loopify_rewrite::Rule;

/// Filter callback parameters. The sequence argument is the receiver.
const FILTER_PARAMS: &[&str] = &["filterItem?", "filterIdx?", "filterArr?"];

/// Map callback parameters when the map reads the receiver directly.
const MAP_PARAMS: &[&str] = &["mapItem?", "mapIdx?", "mapArr?"];

/// Map callback parameters after a filter. The filtered sequence is never
/// materialized, so a callback that asks for it does not match.
const FILTERED_MAP_PARAMS: &[&str] = &["mapItem?", "mapIdx?"];

const REDUCE_PARAMS: &[&str] = &["reduceAcc", "reduceCurrent?", "reduceIdx?", "reduceArr?"];

/// Reduce callback parameters at the end of a fused chain.
const FUSED_REDUCE_PARAMS: &[&str] = &["reduceAcc", "reduceCurrent?", "reduceIdx?"];

/// All built-in rules, in resolution order.
pub(crate) fn builtin() -> Vec<Rule> {
    vec![
        fused::filter_map_reduce(),
        fused::filter_map(),
        fused::filter_reduce(),
        fused::map_reduce(),
        single::filter(),
        single::map(),
        single::reduce(),
        visit::for_each(),
        visit::find(),
        visit::some(),
        visit::every(),
    ]
}

fn filter_call(receiver: impl Into<Pattern>) -> NodePattern {
    method_call(
        "filter",
        receiver,
        vec![arrow_fn(FILTER_PARAMS, "filterExpression").into()],
    )
}

fn map_call(receiver: impl Into<Pattern>, params: &[&str]) -> NodePattern {
    method_call("map", receiver, vec![arrow_fn(params, "mapExpression").into()])
}

/// `receiver.reduce(callback, init)`; the initial value is required.
fn reduce_call(receiver: impl Into<Pattern>, params: &[&str]) -> NodePattern {
    method_call(
        "reduce",
        receiver,
        vec![
            arrow_fn(params, "reduceExpression").into(),
            value_expr("reduceInitVal").into(),
        ],
    )
}
