//! Text assembly for loop replacements.
//!
//! Every built-in rule replaces a chain with an immediately invoked arrow
//! function that runs one indexed `for` loop over the receiver:
//!
//! ```text
//! ((arr) => { <setup> for (let i = 0; i < arr.length; i++) { <body> } <finish> })(arrayExpression)
//! ```
//!
//! Bindings for optional callback parameters are only emitted when the
//! callback declares the parameter.

use loopify_rewrite::CaptureMap;

#[derive(Debug, Default)]
pub(crate) struct LoopTemplate {
    setup: Vec<&'static str>,
    body: Vec<&'static str>,
    finish: Vec<&'static str>,
}

impl LoopTemplate {
    pub(crate) fn new() -> Self {
        LoopTemplate::default()
    }

    /// Statement before the loop.
    #[must_use]
    pub(crate) fn setup(mut self, statement: &'static str) -> Self {
        self.setup.push(statement);
        self
    }

    #[must_use]
    pub(crate) fn setup_if(self, condition: bool, statement: &'static str) -> Self {
        if condition {
            self.setup(statement)
        } else {
            self
        }
    }

    /// Statement in the loop body.
    #[must_use]
    pub(crate) fn step(mut self, statement: &'static str) -> Self {
        self.body.push(statement);
        self
    }

    #[must_use]
    pub(crate) fn step_if(self, condition: bool, statement: &'static str) -> Self {
        if condition {
            self.step(statement)
        } else {
            self
        }
    }

    /// Loop-body bindings for whichever of `bindings`' captures matched.
    #[must_use]
    pub(crate) fn bind(
        mut self,
        captures: &CaptureMap<'_>,
        bindings: &[(&str, &'static str)],
    ) -> Self {
        for &(capture, statement) in bindings {
            if captures.contains(capture) {
                self.body.push(statement);
            }
        }
        self
    }

    /// Statement after the loop.
    #[must_use]
    pub(crate) fn finish(mut self, statement: &'static str) -> Self {
        self.finish.push(statement);
        self
    }

    pub(crate) fn render(&self) -> String {
        format!(
            "((arr) => {{ {} for (let i = 0; i < arr.length; i++) {{ {} }} {} }})(arrayExpression)",
            self.setup.join(" "),
            self.body.join(" "),
            self.finish.join(" "),
        )
    }
}

/// Whether any of `names` is bound.
pub(crate) fn any_bound(captures: &CaptureMap<'_>, names: &[&str]) -> bool {
    names.iter().any(|name| captures.contains(name))
}

#[cfg(test)]
mod tests {
    use loopify_ir::{build, Span};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn renders_only_requested_pieces() {
        let item = build::identifier("n", Span::DUMMY);
        let mut captures = CaptureMap::new();
        captures.insert("item", &item);
        let text = LoopTemplate::new()
            .setup("const res = [];")
            .bind(&captures, &[("item", "const x = arr[i];"), ("idx", "const idx = i;")])
            .step("res.push(x);")
            .finish("return res;")
            .render();
        assert_eq!(
            text,
            "((arr) => { const res = []; for (let i = 0; i < arr.length; i++) \
             { const x = arr[i]; res.push(x); } return res; })(arrayExpression)"
        );
        assert!(any_bound(&captures, &["idx", "item"]));
        assert!(!any_bound(&captures, &["idx"]));
    }
}
