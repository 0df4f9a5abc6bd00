//! Rules for chains of two or three calls, fused into one loop.
//!
//! The intermediate sequences never exist. An index the user's callback
//! asks for after a filter is the position among kept elements, so it is
//! counted separately from the loop index.

use loopify_rewrite::pattern::sequence_expr;
use loopify_rewrite::{Rule, Template};

use super::{
    filter_call, map_call, reduce_call, FILTERED_MAP_PARAMS, FUSED_REDUCE_PARAMS, MAP_PARAMS,
};
use crate::template::{any_bound, LoopTemplate};

const FILTER_BINDINGS: &[(&str, &str)] = &[
    ("filterIdx", "const idx = i;"),
    ("filterArr", "const array = arr;"),
];

const FILTER_RETARGET: &[(&str, &str)] = &[
    ("filterItem", "x"),
    ("filterIdx", "idx"),
    ("filterArr", "array"),
];

pub(super) fn filter_map_reduce() -> Rule {
    let pattern = reduce_call(
        map_call(
            filter_call(sequence_expr("arrayExpression")),
            FILTERED_MAP_PARAMS,
        ),
        FUSED_REDUCE_PARAMS,
    );
    let template = Template::computed(|captures| {
        let counted = any_bound(captures, &["mapIdx", "reduceIdx"]);
        LoopTemplate::new()
            .setup("let acc = reduceInitVal;")
            .setup_if(counted, "let n = 0;")
            .step("const x = arr[i];")
            .bind(captures, FILTER_BINDINGS)
            .step("if (filterExpression) {")
            .step_if(counted, "const k = n;")
            .step("const y = mapExpression;")
            .step("acc = reduceExpression;")
            .step_if(counted, "n++;")
            .step("}")
            .finish("return acc;")
            .render()
    });
    Rule::new("filter_map_reduce", pattern, template)
        .temps(&["arr", "acc", "n", "i", "x", "idx", "array", "k", "y"])
        .splice("arrayExpression", &[])
        .splice("reduceInitVal", &[])
        .splice("filterExpression", FILTER_RETARGET)
        .splice("mapExpression", &[("mapItem", "x"), ("mapIdx", "k")])
        .splice(
            "reduceExpression",
            &[("reduceAcc", "acc"), ("reduceCurrent", "y"), ("reduceIdx", "k")],
        )
}

pub(super) fn filter_map() -> Rule {
    let pattern = map_call(
        filter_call(sequence_expr("arrayExpression")),
        FILTERED_MAP_PARAMS,
    );
    let template = Template::computed(|captures| {
        LoopTemplate::new()
            .setup("const res = [];")
            .step_if(
                any_bound(captures, &["filterItem", "mapItem"]),
                "const x = arr[i];",
            )
            .bind(captures, FILTER_BINDINGS)
            .step("if (filterExpression) {")
            .step_if(captures.contains("mapIdx"), "const k = res.length;")
            .step("res.push(mapExpression);")
            .step("}")
            .finish("return res;")
            .render()
    });
    Rule::new("filter_map", pattern, template)
        .temps(&["arr", "res", "i", "x", "idx", "array", "k"])
        .splice("arrayExpression", &[])
        .splice("filterExpression", FILTER_RETARGET)
        .splice("mapExpression", &[("mapItem", "x"), ("mapIdx", "k")])
}

pub(super) fn filter_reduce() -> Rule {
    let pattern = reduce_call(
        filter_call(sequence_expr("arrayExpression")),
        FUSED_REDUCE_PARAMS,
    );
    let template = Template::computed(|captures| {
        let counted = captures.contains("reduceIdx");
        LoopTemplate::new()
            .setup("let acc = reduceInitVal;")
            .setup_if(counted, "let n = 0;")
            .step_if(
                any_bound(captures, &["filterItem", "reduceCurrent"]),
                "const x = arr[i];",
            )
            .bind(captures, FILTER_BINDINGS)
            .step("if (filterExpression) {")
            .step_if(counted, "const k = n;")
            .step("acc = reduceExpression;")
            .step_if(counted, "n++;")
            .step("}")
            .finish("return acc;")
            .render()
    });
    Rule::new("filter_reduce", pattern, template)
        .temps(&["arr", "acc", "n", "i", "x", "idx", "array", "k"])
        .splice("arrayExpression", &[])
        .splice("reduceInitVal", &[])
        .splice("filterExpression", FILTER_RETARGET)
        .splice(
            "reduceExpression",
            &[("reduceAcc", "acc"), ("reduceCurrent", "x"), ("reduceIdx", "k")],
        )
}

pub(super) fn map_reduce() -> Rule {
    let pattern = reduce_call(
        map_call(sequence_expr("arrayExpression"), MAP_PARAMS),
        FUSED_REDUCE_PARAMS,
    );
    let template = Template::computed(|captures| {
        LoopTemplate::new()
            .setup("let acc = reduceInitVal;")
            .bind(captures, &[("mapItem", "const x = arr[i];")])
            .step_if(
                any_bound(captures, &["mapIdx", "reduceIdx"]),
                "const idx = i;",
            )
            .bind(captures, &[("mapArr", "const array = arr;")])
            .step("const y = mapExpression;")
            .step("acc = reduceExpression;")
            .finish("return acc;")
            .render()
    });
    Rule::new("map_reduce", pattern, template)
        .temps(&["arr", "acc", "i", "x", "idx", "array", "y"])
        .splice("arrayExpression", &[])
        .splice("reduceInitVal", &[])
        .splice(
            "mapExpression",
            &[("mapItem", "x"), ("mapIdx", "idx"), ("mapArr", "array")],
        )
        .splice(
            "reduceExpression",
            &[("reduceAcc", "acc"), ("reduceCurrent", "y"), ("reduceIdx", "idx")],
        )
}
