//! Loopify Eval - interpreter for the rewritten host language.
//!
//! Rewrites are only worth having if they preserve behavior. This crate runs
//! a tree, original or rewritten, and records what it logs, so the two can be
//! compared line for line.
//!
//! # Architecture
//!
//! - `Environment`: lexical scopes behind shared handles; closures keep theirs
//! - `Value`: host-language values with reference semantics for sequences
//! - `Interpreter`: statement execution, expression evaluation and the
//!   built-in sequence methods, bounded by a step limit

mod environment;
mod error;
pub mod interpreter;
mod value;

use loopify_ir::Node;

pub use environment::{AssignError, Environment, LocalScope, Mutability, Scope};
pub use error::{EvalError, EvalResult};
pub use interpreter::{Interpreter, DEFAULT_STEP_LIMIT, MAX_ARRAY_GAP, MAX_CALL_DEPTH};
pub use value::{Closure, Heap, Native, Value};

/// Run `tree` with a fresh interpreter and return the lines it logged.
pub fn evaluate(tree: &Node) -> EvalResult<Vec<String>> {
    let mut interpreter = Interpreter::new();
    interpreter.run(tree)?;
    Ok(interpreter.take_output())
}
