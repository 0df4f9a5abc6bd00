//! Rules for a single `filter`, `map` or `reduce` call.

use loopify_rewrite::pattern::sequence_expr;
use loopify_rewrite::{Rule, Template};

use super::{filter_call, map_call, reduce_call, MAP_PARAMS, REDUCE_PARAMS};
use crate::template::LoopTemplate;

pub(super) fn filter() -> Rule {
    let pattern = filter_call(sequence_expr("arrayExpression"));
    // The kept element is pushed whether or not the callback names it.
    let template = Template::computed(|captures| {
        LoopTemplate::new()
            .setup("const res = [];")
            .step("const x = arr[i];")
            .bind(
                captures,
                &[("filterIdx", "const idx = i;"), ("filterArr", "const array = arr;")],
            )
            .step("if (filterExpression) res.push(x);")
            .finish("return res;")
            .render()
    });
    Rule::new("filter", pattern, template)
        .temps(&["arr", "res", "i", "x", "idx", "array"])
        .splice("arrayExpression", &[])
        .splice(
            "filterExpression",
            &[("filterItem", "x"), ("filterIdx", "idx"), ("filterArr", "array")],
        )
}

pub(super) fn map() -> Rule {
    let pattern = map_call(sequence_expr("arrayExpression"), MAP_PARAMS);
    let template = Template::computed(|captures| {
        LoopTemplate::new()
            .setup("const res = [];")
            .bind(
                captures,
                &[
                    ("mapItem", "const x = arr[i];"),
                    ("mapIdx", "const idx = i;"),
                    ("mapArr", "const array = arr;"),
                ],
            )
            .step("res.push(mapExpression);")
            .finish("return res;")
            .render()
    });
    Rule::new("map", pattern, template)
        .temps(&["arr", "res", "i", "x", "idx", "array"])
        .splice("arrayExpression", &[])
        .splice(
            "mapExpression",
            &[("mapItem", "x"), ("mapIdx", "idx"), ("mapArr", "array")],
        )
}

pub(super) fn reduce() -> Rule {
    let pattern = reduce_call(sequence_expr("arrayExpression"), REDUCE_PARAMS);
    let template = Template::computed(|captures| {
        LoopTemplate::new()
            .setup("let acc = reduceInitVal;")
            .bind(
                captures,
                &[
                    ("reduceCurrent", "const x = arr[i];"),
                    ("reduceIdx", "const idx = i;"),
                    ("reduceArr", "const array = arr;"),
                ],
            )
            .step("acc = reduceExpression;")
            .finish("return acc;")
            .render()
    });
    Rule::new("reduce", pattern, template)
        .temps(&["arr", "acc", "i", "x", "idx", "array"])
        .splice("arrayExpression", &[])
        .splice("reduceInitVal", &[])
        .splice(
            "reduceExpression",
            &[
                ("reduceAcc", "acc"),
                ("reduceCurrent", "x"),
                ("reduceIdx", "idx"),
                ("reduceArr", "array"),
            ],
        )
}
