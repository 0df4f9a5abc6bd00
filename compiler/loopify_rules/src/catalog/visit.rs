//! Rules for visiting and searching calls: `forEach`, `find`, `some` and
//! `every`. The searching rules return from inside the loop as soon as the
//! answer is known.

use loopify_rewrite::pattern::{arrow_fn, method_call, sequence_expr};
use loopify_rewrite::{Rule, Template};

use crate::template::LoopTemplate;

/// A rule over `xs.<method>(callback)` whose loop body is built by `body`.
///
/// Callback parameters are captured as `<method>Item`, `<method>Idx` and
/// `<method>Arr`, and the callback body as `<method>Expression`.
struct Visit {
    rule: &'static str,
    method: &'static str,
}

impl Visit {
    fn capture(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.method)
    }

    fn build(self, always_bind_item: bool, test: &'static str, finish: Option<&'static str>) -> Rule {
        let item = self.capture("Item");
        let idx = self.capture("Idx");
        let array = self.capture("Arr");
        let expression = self.capture("Expression");
        let params = [format!("{item}?"), format!("{idx}?"), format!("{array}?")];
        let params: Vec<&str> = params.iter().map(String::as_str).collect();
        let pattern = method_call(
            self.method,
            sequence_expr("arrayExpression"),
            vec![arrow_fn(&params, &expression).into()],
        );

        let bindings = [idx.clone(), array.clone()];
        let template = Template::computed(move |captures| {
            let mut template = LoopTemplate::new()
                .step_if(always_bind_item || captures.contains(&item), "const x = arr[i];")
                .bind(
                    captures,
                    &[
                        (bindings[0].as_str(), "const idx = i;"),
                        (bindings[1].as_str(), "const array = arr;"),
                    ],
                )
                .step(test);
            if let Some(finish) = finish {
                template = template.finish(finish);
            }
            template.render()
        });

        let item = self.capture("Item");
        Rule::new(self.rule, pattern, template)
            .temps(&["arr", "i", "x", "idx", "array"])
            .splice("arrayExpression", &[])
            .splice(
                &expression,
                &[(item.as_str(), "x"), (idx.as_str(), "idx"), (array.as_str(), "array")],
            )
    }
}

pub(super) fn for_each() -> Rule {
    Visit { rule: "for_each", method: "forEach" }.build(
        false,
        "forEachExpression;",
        None,
    )
}

pub(super) fn find() -> Rule {
    Visit { rule: "find", method: "find" }.build(
        true,
        "if (findExpression) return x;",
        Some("return undefined;"),
    )
}

pub(super) fn some() -> Rule {
    Visit { rule: "some", method: "some" }.build(
        false,
        "if (someExpression) return true;",
        Some("return false;"),
    )
}

pub(super) fn every() -> Rule {
    Visit { rule: "every", method: "every" }.build(
        false,
        "if (!(everyExpression)) return false;",
        Some("return true;"),
    )
}
