//! Loopify Rules - the built-in catalog of sequence-idiom rewrites.
//!
//! Each rule turns a `filter`/`map`/`reduce`/`forEach`/`find`/`some`/`every`
//! chain over a sequence into one explicit indexed loop. The engine in
//! `loopify_rewrite` does the matching and instantiation; this crate only
//! declares the rules and supplies the host-language template parser.
//!
//! ```text
//! let rules = builtin_rules()?;
//! let outcome = Rewriter::new(&rules, &SyntaxParser, &oracle, Schema::standard()).rewrite(tree)?;
//! ```

mod catalog;
mod parser;
mod template;

use loopify_rewrite::{RuleError, RuleTable};

pub use parser::SyntaxParser;

/// The built-in rules, validated, in resolution order.
pub fn builtin_rules() -> Result<RuleTable, RuleError> {
    let table = RuleTable::new(catalog::builtin())?;
    tracing::trace!(rules = table.len(), "built-in catalog validated");
    Ok(table)
}
