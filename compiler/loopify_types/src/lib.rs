//! Scope-aware type oracle.
//!
//! [`ScopeOracle::analyze`] types a whole source file up front; afterwards
//! every `type_of` query is a memo lookup keyed by the queried node's span and
//! tag. The rewrite engine preserves the spans of captured subtrees, so
//! receivers spliced into a replacement are still recognized when the driver
//! descends into it.

mod analyze;
mod scope;

use loopify_ir::Node;
use loopify_rewrite::{OracleError, TypeDesc, TypeOracle};

pub use scope::Scope;

use analyze::{Analyzer, TypeMemo};

/// Type oracle backed by a one-pass analysis of a source file.
#[derive(Clone, Debug, Default)]
pub struct ScopeOracle {
    memo: TypeMemo,
}

impl ScopeOracle {
    /// Analyze `tree`, a `SourceFile` or any single statement or expression.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn analyze(tree: &Node) -> Self {
        let mut analyzer = Analyzer::new();
        if tree.tag().is_value() {
            analyzer.expr(tree);
        } else if tree.tag() == loopify_ir::Tag::SourceFile {
            analyzer.statements(tree.list("statements"));
        } else {
            analyzer.statements(std::slice::from_ref(tree));
        }
        let memo = analyzer.finish();
        tracing::debug!(expressions = memo.len(), "types recorded");
        ScopeOracle { memo }
    }

    /// Number of typed expressions.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}

impl TypeOracle for ScopeOracle {
    fn type_of(&self, node: &Node) -> Result<TypeDesc, OracleError> {
        self.memo
            .get(&(node.span(), node.tag()))
            .cloned()
            .ok_or(OracleError::NotAnalyzed {
                tag: node.tag(),
                span: node.span(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
