//! Rewrite engine errors.

use loopify_ir::{IrError, Tag};

use crate::oracle::OracleError;

/// Failure while applying one rule to one node.
///
/// The driver downgrades these to "rule did not apply" unless
/// [`RewriteError::is_fatal`] says otherwise.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    #[error(transparent)]
    Ir(#[from] IrError),

    /// The instantiator met a tag with no registered constructor.
    #[error("no constructor registered for `{0}`")]
    ConstructorNotFound(Tag),

    /// A pattern predicate could not be evaluated.
    #[error("predicate `{predicate}` failed: {source}")]
    PredicateEvaluation {
        predicate: String,
        #[source]
        source: OracleError,
    },

    /// The realized template text did not parse.
    #[error("template does not parse: {message}")]
    TemplateParse { message: String },
}

impl RewriteError {
    /// Errors that invalidate the whole traversal rather than one rule.
    pub fn is_fatal(&self) -> bool {
        self.fatal().is_some()
    }

    /// The traversal-level error a fatal failure becomes.
    pub fn fatal(&self) -> Option<DriverError> {
        match self {
            RewriteError::Ir(error) if error.is_schema_gap() => {
                Some(DriverError::Schema(error.clone()))
            }
            _ => None,
        }
    }
}

/// Rule catalog validation failure, reported by [`crate::RuleTable::new`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("rule `{0}` is declared twice")]
    DuplicateRule(String),

    #[error("rule `{rule}` declares temp `{temp}` twice")]
    DuplicateTemp { rule: String, temp: String },

    /// A splice names a capture the pattern never binds.
    #[error("rule `{rule}` splices `{capture}`, which its pattern never captures")]
    UnknownCapture { rule: String, capture: String },

    /// A splice retargets a parameter onto an undeclared temp.
    #[error("rule `{rule}` retargets `{capture}` to `{temp}`, which is not a declared temp")]
    UnknownTemp {
        rule: String,
        capture: String,
        temp: String,
    },

    #[error("rule `{rule}` splices `{capture}` twice")]
    DuplicateSplice { rule: String, capture: String },
}

/// Failure that aborts a whole traversal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    /// The schema registry does not know a tag found in the tree or a
    /// template. No rule can succeed until the registry is extended.
    #[error("schema registry is incomplete: {0}")]
    Schema(#[source] IrError),
}
