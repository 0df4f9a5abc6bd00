//! Loopify rewrite engine.
//!
//! A rule pairs a tree [`pattern::NodePattern`] with a source-text
//! [`Template`]. The [`Rewriter`] walks a tree, and wherever a rule's pattern
//! matches it parses the template, renames its temps to fresh names, splices
//! in the captured subtrees and replaces the node with the result.
//!
//! ```text
//! tree ──match──▶ captures ──instantiate(template)──▶ replacement
//! ```
//!
//! The engine knows nothing about concrete idioms; catalogs of rules live in
//! their own crate.

mod context;
mod driver;
mod error;
pub mod hygiene;
pub mod instantiate;
pub mod matcher;
pub mod oracle;
mod options;
pub mod pattern;
mod rule;

pub use context::{FireCounts, RewriteContext, RewriteOutcome, RuleFailure};
pub use driver::{NodeState, Rewriter, SourceParser};
pub use error::{DriverError, RewriteError, RuleError};
pub use matcher::{match_node, CaptureMap};
pub use oracle::{FixedOracle, OracleError, TypeDesc, TypeOracle};
pub use options::RewriteOptions;
pub use rule::{Rule, RuleTable, Splice, Template};
