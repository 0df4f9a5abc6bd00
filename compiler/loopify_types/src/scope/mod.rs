//! Lexical scopes for name resolution.

use std::rc::Rc;

use loopify_rewrite::TypeDesc;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
struct ScopeInner {
    bindings: FxHashMap<String, TypeDesc>,
    parent: Option<Scope>,
}

/// A scope in the lexical chain.
///
/// Cloning is O(1): child scopes share their parent through an `Rc`, and a
/// binding only copies the innermost table when it is shared.
#[derive(Clone, Debug, Default)]
pub struct Scope(Rc<ScopeInner>);

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// A new innermost scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Scope(Rc::new(ScopeInner {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    /// Bind `name` in this scope, shadowing outer bindings.
    pub fn bind(&mut self, name: impl Into<String>, ty: TypeDesc) {
        Rc::make_mut(&mut self.0).bindings.insert(name.into(), ty);
    }

    /// Look up a name, searching parent scopes.
    pub fn lookup(&self, name: &str) -> Option<&TypeDesc> {
        self.0
            .bindings
            .get(name)
            .or_else(|| self.0.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    /// Whether `name` is bound in this scope itself.
    pub fn binds_locally(&self, name: &str) -> bool {
        self.0.bindings.contains_key(name)
    }

    /// Nesting depth; the root scope is 0.
    pub fn depth(&self) -> usize {
        self.0.parent.as_ref().map_or(0, |p| p.depth() + 1)
    }
}
