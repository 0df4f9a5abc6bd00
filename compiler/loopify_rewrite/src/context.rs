//! Per-traversal state.

use std::fmt;

use loopify_ir::{Node, Span};

use crate::hygiene::TempMinter;
use crate::{RewriteError, RewriteOptions};

/// Rule name to number of successful applications, in first-fire order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FireCounts {
    entries: Vec<(String, usize)>,
}

impl FireCounts {
    pub fn record(&mut self, rule: &str) {
        self.add(rule, 1);
    }

    fn add(&mut self, rule: &str, count: usize) {
        match self.entries.iter_mut().find(|(name, _)| name == rule) {
            Some(entry) => entry.1 += count,
            None => self.entries.push((rule.to_owned(), count)),
        }
    }

    /// Fire count of `rule`; zero if it never fired.
    pub fn get(&self, rule: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == rule)
            .map_or(0, |&(_, count)| count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add another traversal's counts into this one.
    pub fn merge(&mut self, other: &FireCounts) {
        for (rule, count) in other.iter() {
            self.add(rule, count);
        }
    }
}

impl fmt::Display for FireCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (rule, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{rule}: {count}")?;
        }
        Ok(())
    }
}

/// A rule application that matched but could not be completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleFailure {
    pub rule: String,
    pub span: Span,
    pub error: RewriteError,
}

/// Mutable state threaded through one traversal.
#[derive(Debug)]
pub struct RewriteContext {
    pub(crate) options: RewriteOptions,
    pub(crate) minter: TempMinter,
    pub(crate) fire_counts: FireCounts,
    pub(crate) failures: Vec<RuleFailure>,
}

impl RewriteContext {
    pub fn new(options: RewriteOptions, minter: TempMinter) -> Self {
        RewriteContext {
            options,
            minter,
            fire_counts: FireCounts::default(),
            failures: Vec::new(),
        }
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    pub fn fire_counts(&self) -> &FireCounts {
        &self.fire_counts
    }

    pub fn failures(&self) -> &[RuleFailure] {
        &self.failures
    }

    pub(crate) fn into_outcome(self, tree: Node) -> RewriteOutcome {
        RewriteOutcome {
            tree,
            fire_counts: self.fire_counts,
            failures: self.failures,
        }
    }
}

/// Result of a traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub tree: Node,
    pub fire_counts: FireCounts,
    pub failures: Vec<RuleFailure>,
}
