//! Read, parse, rewrite and verify: the steps every command is built from.

use loopify_eval::evaluate;
use loopify_ir::{Node, Schema};
use loopify_rewrite::{RewriteOptions, RewriteOutcome, Rewriter, RuleTable};
use loopify_rules::SyntaxParser;
use loopify_syntax::parse_source;
use loopify_types::ScopeOracle;
use tracing::debug;

use crate::CliError;

/// A source file and its path, as given on the command line.
#[derive(Clone, Debug)]
pub struct SourceText {
    pub path: String,
    pub text: String,
}

impl SourceText {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        SourceText {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn read(path: &str) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_owned(),
            source,
        })?;
        Ok(SourceText::new(path, text))
    }

    /// Parse the whole text; any syntax error fails the file.
    pub fn parse(&self) -> Result<Node, CliError> {
        parse_source(&self.text)
            .into_result()
            .map_err(|errors| CliError::Parse {
                path: self.path.clone(),
                text: self.text.clone(),
                errors,
            })
    }
}

/// Analyze `tree` and rewrite it with `rules`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn rewrite(
    rules: &RuleTable,
    tree: Node,
    options: &RewriteOptions,
) -> Result<RewriteOutcome, CliError> {
    let oracle = ScopeOracle::analyze(&tree);
    let outcome = Rewriter::new(rules, &SyntaxParser, &oracle, Schema::standard())
        .with_options(options.clone())
        .rewrite(tree)?;
    debug!(
        rewrites = outcome.fire_counts.total(),
        failures = outcome.failures.len(),
        "rewrite finished"
    );
    Ok(outcome)
}

/// Run `tree` and collect what it logs.
pub fn run(path: &str, tree: &Node) -> Result<Vec<String>, CliError> {
    evaluate(tree).map_err(|error| CliError::Eval {
        path: path.to_owned(),
        error,
    })
}

/// Check that the printed rewrite of `original` logs the same lines.
///
/// The printed text is parsed again, so printer and parser disagreements
/// are caught too. Returns the lines both programs logged.
pub fn verify(path: &str, original: &Node, printed: &str) -> Result<Vec<String>, CliError> {
    let expected = run(path, original)?;
    let rewritten = SourceText::new(format!("{path} (rewritten)"), printed);
    let actual = run(&rewritten.path, &rewritten.parse()?)?;
    if actual != expected {
        return Err(CliError::Mismatch {
            path: path.to_owned(),
            expected,
            actual,
        });
    }
    Ok(actual)
}

/// Whether `prefix` can start a minted identifier.
pub fn is_valid_temp_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
