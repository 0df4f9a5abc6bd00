//! Errors surfaced by the CLI.

use loopify_eval::EvalError;
use loopify_rewrite::{DriverError, RuleError};
use loopify_syntax::ParseError;

/// Anything that ends a CLI invocation with a non-zero exit.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad flags or arguments.
    #[error("{0}")]
    Usage(String),

    /// An input file could not be read.
    #[error("cannot read `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("cannot write `{path}`: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The text did not parse. Carries the text so the errors can be
    /// rendered against it.
    #[error("`{path}` has {count} syntax error(s)", count = .errors.len())]
    Parse {
        path: String,
        text: String,
        errors: Vec<ParseError>,
    },

    /// The rule catalog failed validation.
    #[error("invalid rule catalog: {0}")]
    Rules(#[from] RuleError),

    /// The traversal aborted on a schema gap.
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// The original or rewritten program raised at runtime.
    #[error("evaluation of `{path}` failed: {error}")]
    Eval {
        path: String,
        #[source]
        error: EvalError,
    },

    /// The rewritten program logged something different from the original.
    #[error("rewrite of `{path}` changed its output")]
    Mismatch {
        path: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}
