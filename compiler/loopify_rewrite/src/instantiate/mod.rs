//! Hygienic template instantiation.
//!
//! [`instantiate`] copies a tree depth-first, rebuilding every node through
//! the tag-indexed constructor table so that a substitution which does not fit
//! its slot is an error instead of a malformed tree. Identifiers in reference
//! position whose text is a substitution key are replaced; identifiers in
//! label fields (property names, object keys) are copied untouched.
//!
//! Spans are copied from the source nodes. Templates are parsed with cleared
//! spans, so scaffolding ends up with dummy spans while spliced captures keep
//! the spans the type oracle knows them by.

use loopify_ir::stack::ensure_sufficient_stack;
use loopify_ir::{rebuild, Node, Schema, Tag, Value};
use rustc_hash::FxHashMap;

use crate::RewriteError;

/// Lazily produced replacement node.
pub type Thunk<'s> = Box<dyn Fn() -> Result<Node, RewriteError> + 's>;

/// What an identifier is replaced with.
pub enum Substitution<'s> {
    /// An identifier with different text, keeping the original span.
    Rename(String),
    /// A fixed node.
    Node(Node),
    /// A node produced on demand, once per occurrence.
    Thunk(Thunk<'s>),
}

/// Identifier text to replacement.
#[derive(Default)]
pub struct Substitutions<'s> {
    map: FxHashMap<String, Substitution<'s>>,
}

impl<'s> Substitutions<'s> {
    pub fn new() -> Self {
        Substitutions::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, substitution: Substitution<'s>) {
        self.map.insert(name.into(), substitution);
    }

    pub fn rename(&mut self, name: impl Into<String>, to: impl Into<String>) {
        self.insert(name, Substitution::Rename(to.into()));
    }

    pub fn get(&self, name: &str) -> Option<&Substitution<'s>> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Copy `template`, applying `substitutions` everywhere.
///
/// Binding positions are substituted too: a template parameter named after a
/// temp is renamed along with its uses.
pub fn instantiate(
    template: &Node,
    substitutions: &Substitutions<'_>,
    schema: &Schema,
) -> Result<Node, RewriteError> {
    Instantiator {
        substitutions,
        schema,
        scoped: false,
        shadowed: Vec::new(),
    }
    .copy(template)
}

/// Copy a captured subtree, applying `substitutions` outside nested
/// functions that rebind a key.
///
/// In `x => x + xs.map(x => x)` retargeting the outer `x` must leave the
/// inner lambda's `x` alone.
pub fn instantiate_scoped(
    tree: &Node,
    substitutions: &Substitutions<'_>,
    schema: &Schema,
) -> Result<Node, RewriteError> {
    Instantiator {
        substitutions,
        schema,
        scoped: true,
        shadowed: Vec::new(),
    }
    .copy(tree)
}

struct Instantiator<'a, 's> {
    substitutions: &'a Substitutions<'s>,
    schema: &'a Schema,
    scoped: bool,
    shadowed: Vec<&'a str>,
}

impl<'a, 's> Instantiator<'a, 's> {
    fn copy(&mut self, node: &'a Node) -> Result<Node, RewriteError> {
        ensure_sufficient_stack(|| {
            if let Some(name) = node.identifier() {
                if let Some(substitution) = self.lookup(name) {
                    return resolve(substitution, node);
                }
            }

            let tag = node.tag();
            let descs = self.schema.fields_of(tag)?;
            let scope_depth = self.shadowed.len();
            if self.scoped {
                self.enter_scope(node);
            }
            let mut values = Vec::with_capacity(descs.len());
            for (desc, value) in descs.iter().zip(node.fields()) {
                values.push(if desc.is_label() {
                    value.clone()
                } else {
                    self.copy_value(value)?
                });
            }
            self.shadowed.truncate(scope_depth);

            rebuild(tag, node.span(), values)
                .ok_or(RewriteError::ConstructorNotFound(tag))?
                .map_err(RewriteError::from)
        })
    }

    fn copy_value(&mut self, value: &'a Value) -> Result<Value, RewriteError> {
        Ok(match value {
            Value::Absent => Value::Absent,
            Value::Text(text) => Value::Text(text.clone()),
            Value::Node(child) => Value::from(self.copy(child)?),
            Value::List(children) => Value::List(
                children
                    .iter()
                    .map(|child| self.copy(child))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    fn lookup(&self, name: &str) -> Option<&'a Substitution<'s>> {
        if self.shadowed.iter().any(|shadowed| *shadowed == name) {
            return None;
        }
        self.substitutions.get(name)
    }

    /// Shadow keys rebound by a function's parameters.
    fn enter_scope(&mut self, node: &'a Node) {
        if !matches!(node.tag(), Tag::ArrowFunction | Tag::FunctionDeclaration) {
            return;
        }
        for parameter in node.list("parameters") {
            if let Some(name) = parameter.child("name").and_then(Node::identifier) {
                if self.substitutions.contains(name) {
                    self.shadowed.push(name);
                }
            }
        }
    }
}

fn resolve(substitution: &Substitution<'_>, original: &Node) -> Result<Node, RewriteError> {
    match substitution {
        Substitution::Rename(text) => rebuild(
            Tag::Identifier,
            original.span(),
            vec![Value::Text(text.clone())],
        )
        .ok_or(RewriteError::ConstructorNotFound(Tag::Identifier))?
        .map_err(RewriteError::from),
        Substitution::Node(node) => Ok(node.clone()),
        Substitution::Thunk(produce) => produce(),
    }
}
