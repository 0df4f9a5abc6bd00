//! Variable scoping for the interpreter.
//!
//! Scopes form a parent chain behind shared handles. A closure keeps a handle
//! to the scope it was created in, so it observes later assignments to the
//! variables it closes over, as the host language requires.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `let`, `var`, parameters and function declarations.
    Mutable,
    /// `const`.
    Immutable,
}

impl Mutability {
    /// Returns `true` for `Mutable`.
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Why `Scope::assign` failed.
///
/// The interpreter turns each case into its own `EvalError`, so a write to a
/// `const` and a write to an undeclared name report differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The name resolves to a `const` binding.
    Immutable,
    /// No scope in the chain declares the name.
    Undefined,
}

/// Single-threaded shared scope handle.
///
/// Wraps `Rc<RefCell<T>>` so every scope allocation goes through
/// `LocalScope::new`. Sharing is what lets a closure and the activation that
/// created it see the same bindings; cloning the handle never copies the scope.
///
/// Not `Send`: an interpreter and its scopes stay on one thread.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    /// Allocate a new shared scope holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A variable binding.
#[derive(Clone, Debug)]
struct Binding {
    /// Current value.
    value: Value,
    /// Whether `assign` may replace `value`.
    mutability: Mutability,
}

/// One lexical scope: a block, a loop body or a function activation.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    /// Names declared directly in this scope.
    bindings: FxHashMap<String, Binding>,
    /// Enclosing scope; `None` only for the global scope.
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// An empty scope with no parent.
    pub fn new() -> Self {
        Scope::default()
    }

    /// An empty scope nested in `parent`.
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Declare `name` in this scope, shadowing any outer binding.
    ///
    /// Redeclaring a name already in this scope replaces it.
    #[inline]
    pub fn define(&mut self, name: &str, value: Value, mutability: Mutability) {
        self.bindings
            .insert(name.to_owned(), Binding { value, mutability });
    }

    /// Resolve `name` through this scope and its parents.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Overwrite the nearest binding of `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.bindings.get_mut(name) {
            if !binding.mutability.is_mutable() {
                return Err(AssignError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }
}

/// The scope stack of one function activation.
///
/// Blocks push and pop scopes here rather than cloning the environment. The
/// base scope is the closure's captured scope (or the global one) and stays
/// on the stack for the whole call.
pub struct Environment {
    scopes: Vec<LocalScope<Scope>>,
}

impl Environment {
    /// An activation whose outermost scope is `base`.
    pub fn new(base: LocalScope<Scope>) -> Self {
        Environment { scopes: vec![base] }
    }

    /// Number of scopes on the stack, the base included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// The innermost scope.
    ///
    /// The stack is never empty: `pop_scope` keeps the base.
    pub fn current(&self) -> LocalScope<Scope> {
        self.scopes[self.scopes.len() - 1].clone()
    }

    /// Enter a block scope nested in the current one.
    pub fn push_scope(&mut self) {
        let child = Scope::with_parent(self.current());
        self.scopes.push(LocalScope::new(child));
    }

    /// Leave the innermost block scope. The base scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declare a variable in the innermost scope.
    pub fn define(&mut self, name: &str, value: Value, mutability: Mutability) {
        self.current().borrow_mut().define(name, value, mutability);
    }

    /// Look up a variable from the innermost scope outward.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current().borrow().lookup(name)
    }

    /// Assign to the nearest visible binding.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        self.current().borrow_mut().assign(name, value)
    }
}
