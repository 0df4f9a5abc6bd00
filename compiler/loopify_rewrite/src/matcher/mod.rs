//! Structural pattern matcher.
//!
//! Matching is recursive, short-circuiting and non-backtracking: clauses run
//! in declaration order and the first failing non-optional clause aborts the
//! attempt. An optional sub-pattern that fails is skipped, and any captures
//! it bound before failing are rolled back.

use loopify_ir::stack::ensure_sufficient_stack;
use loopify_ir::{IrError, Node, Schema, Value};
use smallvec::SmallVec;

use crate::oracle::TypeOracle;
use crate::pattern::{Clause, NodePattern, Pattern};
use crate::RewriteError;

/// Capture name to matched node, in first-binding order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureMap<'a> {
    entries: SmallVec<[(&'a str, &'a Node); 8]>,
}

impl<'a> CaptureMap<'a> {
    pub fn new() -> Self {
        CaptureMap::default()
    }

    pub fn get(&self, name: &str) -> Option<&'a Node> {
        self.entries
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|&(_, node)| node)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Bind `name`, replacing an earlier binding in place.
    pub fn insert(&mut self, name: &'a str, node: &'a Node) {
        match self.entries.iter_mut().find(|(bound, _)| *bound == name) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((name, node)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|&(name, _)| name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Node)> + '_ {
        self.entries.iter().copied()
    }
}

/// Match `node` against `pattern` with a fresh capture map.
///
/// Returns `Ok(None)` on a structural mismatch. Errors are predicate
/// failures and schema gaps.
pub fn match_node<'a>(
    node: &'a Node,
    pattern: &'a NodePattern,
    oracle: &dyn TypeOracle,
    schema: &Schema,
) -> Result<Option<CaptureMap<'a>>, RewriteError> {
    let mut matcher = Matcher {
        oracle,
        schema,
        captures: CaptureMap::new(),
    };
    Ok(matcher.node(node, pattern)?.then_some(matcher.captures))
}

struct Matcher<'a, 'o> {
    oracle: &'o dyn TypeOracle,
    schema: &'o Schema,
    captures: CaptureMap<'a>,
}

impl<'a> Matcher<'a, '_> {
    fn node(&mut self, node: &'a Node, pattern: &'a NodePattern) -> Result<bool, RewriteError> {
        ensure_sufficient_stack(|| {
            for clause in &pattern.clauses {
                let matched = match clause {
                    Clause::Tag(tag) => node.tag() == *tag,
                    Clause::Check(predicate) => predicate.test(node, self.oracle).map_err(|source| {
                        RewriteError::PredicateEvaluation {
                            predicate: predicate.name().to_owned(),
                            source,
                        }
                    })?,
                    Clause::Capture(name) => {
                        self.captures.insert(name, node);
                        true
                    }
                    Clause::Field(field, sub) => match self.field(node, field)? {
                        Some(value) => self.optional_tolerant(|m| m.value(value, sub), sub)?,
                        None => sub.is_optional(),
                    },
                };
                if !matched {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    /// Resolve a field; `None` when the tag does not declare it.
    fn field(&self, node: &'a Node, field: &str) -> Result<Option<&'a Value>, RewriteError> {
        match self.schema.field_index(node.tag(), field) {
            Ok(index) => Ok(node.fields().get(index)),
            Err(IrError::NoSuchField { .. }) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Run `attempt`; an optional pattern's failure is rolled back and
    /// reported as success.
    fn optional_tolerant(
        &mut self,
        attempt: impl FnOnce(&mut Self) -> Result<bool, RewriteError>,
        pattern: &Pattern,
    ) -> Result<bool, RewriteError> {
        if !pattern.is_optional() {
            return attempt(self);
        }
        let saved = self.captures.clone();
        if !attempt(self)? {
            self.captures = saved;
        }
        Ok(true)
    }

    fn value(&mut self, value: &'a Value, pattern: &'a Pattern) -> Result<bool, RewriteError> {
        match (pattern, value) {
            (Pattern::Wildcard, _) => Ok(true),
            (_, Value::Absent) => Ok(false),
            (Pattern::Text(expected), Value::Text(actual)) => Ok(expected == actual),
            (Pattern::Node(sub), Value::Node(child)) => self.node(child, sub),
            (Pattern::Sequence(items), Value::List(nodes)) => self.sequence(nodes, items),
            _ => Ok(false),
        }
    }

    fn sequence(&mut self, nodes: &'a [Node], items: &'a [Pattern]) -> Result<bool, RewriteError> {
        if nodes.len() > items.len() {
            return Ok(false);
        }
        for (i, item) in items.iter().enumerate() {
            let matched = match nodes.get(i) {
                Some(node) => self.optional_tolerant(
                    |m| match item {
                        Pattern::Node(sub) => m.node(node, sub),
                        Pattern::Wildcard => Ok(true),
                        Pattern::Text(_) | Pattern::Sequence(_) => Ok(false),
                    },
                    item,
                )?,
                None => item.is_optional(),
            };
            if !matched {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
