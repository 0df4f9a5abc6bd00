//! Fresh temp-variable names.
//!
//! A minted name is distinct from every identifier the minter was told to
//! avoid and from every name minted before it in the same run. Names are
//! `<prefix><base><n>`, where `n` is a run-wide counter, so output stays
//! deterministic for a given input.

use loopify_ir::{Node, Tag};
use rustc_hash::FxHashSet;

/// Add the text of every identifier in `node` to `names`.
pub fn collect_identifiers(node: &Node, names: &mut FxHashSet<String>) {
    node.walk(&mut |n: &Node| {
        if n.tag() == Tag::Identifier {
            if let Some(text) = n.text() {
                if !names.contains(text) {
                    names.insert(text.to_owned());
                }
            }
        }
    });
}

/// Every identifier in `node`.
pub fn identifiers(node: &Node) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    collect_identifiers(node, &mut names);
    names
}

/// Mints temp-variable names for one traversal.
#[derive(Clone, Debug)]
pub struct TempMinter {
    prefix: String,
    counter: usize,
    reserved: FxHashSet<String>,
}

impl TempMinter {
    /// A minter that will never produce a name in `reserved`.
    pub fn new(prefix: impl Into<String>, reserved: FxHashSet<String>) -> Self {
        TempMinter {
            prefix: prefix.into(),
            counter: 0,
            reserved,
        }
    }

    /// Reserve additional names for the rest of the run.
    pub fn reserve(&mut self, names: impl IntoIterator<Item = String>) {
        self.reserved.extend(names);
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Number of names minted so far, skipped candidates included.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Undo the mints made since `counter` was read, releasing `names`.
    ///
    /// Used when a rule application fails after minting its temps.
    pub fn rollback<'n>(&mut self, counter: usize, names: impl IntoIterator<Item = &'n String>) {
        self.counter = counter;
        for name in names {
            self.reserved.remove(name);
        }
    }

    /// Mint a fresh name derived from `base`, also avoiding `local`.
    pub fn mint(&mut self, base: &str, local: &FxHashSet<String>) -> String {
        loop {
            let candidate = format!("{}{}{}", self.prefix, base, self.counter);
            self.counter += 1;
            if !self.reserved.contains(&candidate) && !local.contains(&candidate) {
                self.reserved.insert(candidate.clone());
                return candidate;
            }
        }
    }
}
