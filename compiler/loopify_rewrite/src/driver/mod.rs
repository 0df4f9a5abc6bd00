//! Rule table driver.
//!
//! The driver walks the tree top-down. At each node the rules are tried in
//! table order and the first one that applies replaces the node; descent
//! then continues into the replacement's children, so nested idioms (a
//! `map` inside a `filter` callback, say) are rewritten too. A replacement
//! is never re-matched at its own root, which keeps the traversal finite.
//!
//! A rule that matches but fails to instantiate is recorded as a
//! [`RuleFailure`] and the next rule is tried. Only a schema gap aborts the
//! run.

use loopify_ir::stack::ensure_sufficient_stack;
use loopify_ir::{Node, Schema};
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::hygiene::{collect_identifiers, identifiers, TempMinter};
use crate::instantiate::{instantiate, instantiate_scoped, Substitution, Substitutions};
use crate::matcher::{match_node, CaptureMap};
use crate::oracle::TypeOracle;
use crate::{
    DriverError, RewriteContext, RewriteError, RewriteOptions, RewriteOutcome, Rule, RuleFailure,
    RuleTable,
};

/// Parses realized template text into a tree.
///
/// Implemented for any `Fn(&str) -> Result<Node, String>`, so tests can pass
/// a closure over their parser of choice.
pub trait SourceParser {
    fn parse_expression(&self, text: &str) -> Result<Node, String>;
}

impl<F> SourceParser for F
where
    F: Fn(&str) -> Result<Node, String>,
{
    fn parse_expression(&self, text: &str) -> Result<Node, String> {
        self(text)
    }
}

/// Where a node is in its visit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeState {
    Idle,
    Matching,
    Rewritten,
    Unmatched,
}

/// Applies a [`RuleTable`] to whole trees.
pub struct Rewriter<'r> {
    rules: &'r RuleTable,
    parser: &'r dyn SourceParser,
    oracle: &'r dyn TypeOracle,
    schema: &'r Schema,
    options: RewriteOptions,
}

impl<'r> Rewriter<'r> {
    pub fn new(
        rules: &'r RuleTable,
        parser: &'r dyn SourceParser,
        oracle: &'r dyn TypeOracle,
        schema: &'r Schema,
    ) -> Self {
        Rewriter {
            rules,
            parser,
            oracle,
            schema,
            options: RewriteOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RewriteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrite `tree`, returning the new tree with fire counts and the
    /// failures that were downgraded along the way.
    #[tracing::instrument(level = "debug", skip_all, fields(rules = self.rules.len(), nodes = tree.size()))]
    pub fn rewrite(&self, tree: Node) -> Result<RewriteOutcome, DriverError> {
        let reserved = if self.options.reserve_input_names {
            identifiers(&tree)
        } else {
            Default::default()
        };
        let minter = TempMinter::new(self.options.temp_prefix.clone(), reserved);
        let mut cx = RewriteContext::new(self.options.clone(), minter);
        let tree = self.visit(tree, &mut cx)?;
        debug!(
            fired = cx.fire_counts.total(),
            failed = cx.failures.len(),
            "rewrite finished"
        );
        Ok(cx.into_outcome(tree))
    }

    fn visit(&self, node: Node, cx: &mut RewriteContext) -> Result<Node, DriverError> {
        ensure_sufficient_stack(|| {
            self.schema
                .fields_of(node.tag())
                .map_err(DriverError::Schema)?;

            let mut state = NodeState::Idle;
            let mut node = node;
            for rule in self.rules {
                state = transition(state, NodeState::Matching, &node);
                match self.apply(rule, &node, cx) {
                    Ok(Some(replacement)) => {
                        cx.fire_counts.record(rule.name());
                        debug!(rule = rule.name(), span = %node.span(), "rule fired");
                        node = replacement;
                        state = transition(state, NodeState::Rewritten, &node);
                        break;
                    }
                    Ok(None) => {}
                    Err(error) => match error.fatal() {
                        Some(fatal) => return Err(fatal),
                        None => self.record_failure(rule, &node, error, cx),
                    },
                }
            }
            if state != NodeState::Rewritten {
                transition(state, NodeState::Unmatched, &node);
            }

            node.try_map_children(|child| self.visit(child, cx))
        })
    }

    /// Match `rule` at `node` and build its replacement.
    ///
    /// `Ok(None)` means the pattern did not match.
    fn apply(
        &self,
        rule: &Rule,
        node: &Node,
        cx: &mut RewriteContext,
    ) -> Result<Option<Node>, RewriteError> {
        let Some(captures) = match_node(node, rule.pattern(), self.oracle, self.schema)? else {
            return Ok(None);
        };
        trace!(rule = rule.name(), captures = captures.len(), "matched");

        let text = rule.template().realize(&captures);
        let mut template = self
            .parser
            .parse_expression(&text)
            .map_err(|message| RewriteError::TemplateParse { message })?;
        template.clear_spans();

        let mut local = identifiers(&template);
        if !cx.options.reserve_input_names {
            collect_identifiers(node, &mut local);
        }
        let checkpoint = cx.minter.counter();
        let temps: FxHashMap<&str, String> = rule
            .temp_names()
            .iter()
            .map(|temp| (temp.as_str(), cx.minter.mint(temp, &local)))
            .collect();

        let result = self.instantiate(rule, &template, &captures, &temps);
        if result.is_err() {
            cx.minter.rollback(checkpoint, temps.values());
        }
        result.map(Some)
    }

    fn instantiate(
        &self,
        rule: &Rule,
        template: &Node,
        captures: &CaptureMap<'_>,
        temps: &FxHashMap<&str, String>,
    ) -> Result<Node, RewriteError> {
        let mut substitutions = Substitutions::new();
        for (&temp, minted) in temps {
            substitutions.rename(temp, minted.clone());
        }
        for splice in rule.splices() {
            // Optional captures that did not bind leave the template's
            // placeholder identifier in place.
            let Some(captured) = captures.get(&splice.capture) else {
                continue;
            };
            let mut retarget = Substitutions::new();
            for (param, temp) in &splice.retarget {
                let name = captures.get(param).and_then(Node::identifier);
                if let (Some(name), Some(minted)) = (name, temps.get(temp.as_str())) {
                    retarget.rename(name, minted.clone());
                }
            }
            let schema = self.schema;
            substitutions.insert(
                splice.capture.clone(),
                Substitution::Thunk(Box::new(move || {
                    instantiate_scoped(captured, &retarget, schema)
                })),
            );
        }
        instantiate(template, &substitutions, self.schema)
    }

    fn record_failure(&self, rule: &Rule, node: &Node, error: RewriteError, cx: &mut RewriteContext) {
        if cx.failures.len() < cx.options.max_failures_logged {
            warn!(rule = rule.name(), span = %node.span(), %error, "rule matched but did not apply");
        }
        cx.failures.push(RuleFailure {
            rule: rule.name().to_owned(),
            span: node.span(),
            error,
        });
    }
}

fn transition(from: NodeState, to: NodeState, node: &Node) -> NodeState {
    trace!(tag = %node.tag(), ?from, ?to, "node state");
    to
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
