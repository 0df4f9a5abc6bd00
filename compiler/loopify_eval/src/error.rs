//! Evaluation errors.

use loopify_ir::Tag;

/// Runtime failure of an evaluated program.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Read or write of a name no scope declares.
    #[error("`{0}` is not defined")]
    UndefinedVariable(String),

    /// Write to a `const` binding.
    #[error("assignment to constant `{0}`")]
    AssignToConstant(String),

    /// Call of a value that is neither a closure nor a built-in.
    #[error("{0} is not a function")]
    NotCallable(String),

    /// Member access on a receiver with no such property or method.
    #[error("cannot read property `{property}` of {receiver}")]
    NoProperty { property: String, receiver: String },

    /// Left-hand side that is not a name, member or element.
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,

    /// `reduce` with no seed over an empty array.
    #[error("reduce of empty array with no initial value")]
    ReduceOfEmpty,

    /// `break` or `continue` that escaped every loop.
    #[error("`{0}` outside of a loop")]
    OutsideLoop(&'static str),

    /// The tree holds a statement that failed to parse.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// A node kind the evaluator has no semantics for.
    #[error("`{0}` cannot be evaluated")]
    Unsupported(Tag),

    /// The program ran longer than the step budget.
    #[error("evaluation exceeded {0} steps")]
    StepLimit(usize),

    /// Recursion deeper than the frame limit.
    #[error("call stack exceeded {0} frames")]
    CallDepth(usize),

    /// An element assignment far past the end; arrays here are dense.
    #[error("assignment to index {index} of an array of length {len}")]
    SparseAssignment { index: usize, len: usize },
}

/// Result alias used throughout the interpreter.
pub type EvalResult<T> = Result<T, EvalError>;
