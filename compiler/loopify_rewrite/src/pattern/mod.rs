//! Tree patterns.
//!
//! A [`Pattern`] describes the value expected in one field of a node. The
//! interesting case is [`NodePattern`]: an ordered list of [`Clause`]s applied
//! to a single node, plus an `optional` flag that lets a failed match be
//! skipped instead of failing the enclosing pattern.
//!
//! Clauses run in the order they are declared, so a pattern can test the tag
//! first and only then ask the (possibly expensive) type oracle.

mod combinator;

use std::fmt;
use std::sync::Arc;

use loopify_ir::{Node, Tag};

use crate::oracle::{OracleError, TypeOracle};

pub use combinator::{arrow_fn, method_call, node, sequence_expr, value_expr};

/// Expected value of a field.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Anything, including an absent optional field.
    Wildcard,
    /// Exact scalar text.
    Text(String),
    /// A single node.
    Node(NodePattern),
    /// A fixed-length node sequence. The node list may be shorter than the
    /// pattern when the missing tail entries are optional.
    Sequence(Vec<Pattern>),
}

impl Pattern {
    pub fn text(text: impl Into<String>) -> Self {
        Pattern::Text(text.into())
    }

    pub fn sequence(items: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Sequence(items.into_iter().collect())
    }

    /// Whether a failed match of this pattern may be skipped.
    pub fn is_optional(&self) -> bool {
        match self {
            Pattern::Wildcard => true,
            Pattern::Node(node) => node.optional,
            Pattern::Text(_) | Pattern::Sequence(_) => false,
        }
    }

    /// Every capture name bound anywhere in the pattern, in declaration
    /// order, without duplicates.
    pub fn capture_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_captures(&mut names);
        names
    }

    fn collect_captures<'p>(&'p self, names: &mut Vec<&'p str>) {
        match self {
            Pattern::Node(node) => node.collect_captures(names),
            Pattern::Sequence(items) => {
                for item in items {
                    item.collect_captures(names);
                }
            }
            Pattern::Wildcard | Pattern::Text(_) => {}
        }
    }
}

impl From<NodePattern> for Pattern {
    fn from(node: NodePattern) -> Self {
        Pattern::Node(node)
    }
}

/// One step of a [`NodePattern`].
#[derive(Clone, Debug)]
pub enum Clause {
    /// The node's tag must equal this one.
    Tag(Tag),
    /// The predicate must hold.
    Check(Predicate),
    /// Bind the name to the current node.
    Capture(String),
    /// The named field must match the sub-pattern.
    Field(String, Pattern),
}

/// Clause list matched against one node.
#[derive(Clone, Debug, Default)]
pub struct NodePattern {
    pub clauses: Vec<Clause>,
    pub optional: bool,
}

impl NodePattern {
    pub fn new() -> Self {
        NodePattern::default()
    }

    #[must_use]
    pub fn tag(mut self, tag: Tag) -> Self {
        self.clauses.push(Clause::Tag(tag));
        self
    }

    #[must_use]
    pub fn check(mut self, predicate: Predicate) -> Self {
        self.clauses.push(Clause::Check(predicate));
        self
    }

    #[must_use]
    pub fn capture(mut self, name: impl Into<String>) -> Self {
        self.clauses.push(Clause::Capture(name.into()));
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, pattern: impl Into<Pattern>) -> Self {
        self.clauses.push(Clause::Field(name.into(), pattern.into()));
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Capture names bound by this pattern, in declaration order.
    pub fn capture_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_captures(&mut names);
        names
    }

    fn collect_captures<'p>(&'p self, names: &mut Vec<&'p str>) {
        for clause in &self.clauses {
            match clause {
                Clause::Capture(name) => {
                    if !names.contains(&name.as_str()) {
                        names.push(name);
                    }
                }
                Clause::Field(_, pattern) => pattern.collect_captures(names),
                Clause::Tag(_) | Clause::Check(_) => {}
            }
        }
    }
}

type PredicateFn = dyn Fn(&Node, &dyn TypeOracle) -> Result<bool, OracleError> + Send + Sync;

/// Named external test on a node.
#[derive(Clone)]
pub struct Predicate {
    name: Arc<str>,
    test: Arc<PredicateFn>,
}

impl Predicate {
    pub fn new(
        name: &str,
        test: impl Fn(&Node, &dyn TypeOracle) -> Result<bool, OracleError> + Send + Sync + 'static,
    ) -> Self {
        Predicate {
            name: Arc::from(name),
            test: Arc::new(test),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn test(&self, node: &Node, oracle: &dyn TypeOracle) -> Result<bool, OracleError> {
        (self.test)(node, oracle)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.name)
    }
}
