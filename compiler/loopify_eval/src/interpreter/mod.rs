//! Tree-walking interpreter.
//!
//! Statements are executed by `stmt`, expressions evaluated by `expr`, and
//! the built-in sequence and string methods live in `methods`. Output of
//! `console.log` is buffered as lines rather than written to stdout, so a
//! program and its rewrite can be run side by side and compared.
//!
//! Every statement, loop iteration and call costs one step. Running past
//! the step limit stops evaluation with [`EvalError::StepLimit`], which
//! keeps a rewrite that loops forever from hanging its checker.

mod expr;
mod methods;
mod stmt;

use std::rc::Rc;

use loopify_ir::{Node, Tag};
use tracing::trace;

use crate::environment::{Environment, LocalScope, Mutability, Scope};
use crate::value::{Closure, Native, Value};
use crate::{EvalError, EvalResult};

/// Steps allowed before evaluation gives up.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Nested calls allowed before evaluation gives up.
pub const MAX_CALL_DEPTH: usize = 512;

/// Holes an element assignment may open past the end of an array.
pub const MAX_ARRAY_GAP: usize = 1 << 20;

/// How a statement finished.
#[derive(Clone, Debug)]
pub(crate) enum Flow {
    Normal,
    Return(Value),
    Break,
    Continue,
}

pub struct Interpreter {
    env: Environment,
    output: Vec<String>,
    steps: usize,
    step_limit: usize,
    call_depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut global = Scope::new();
        let console = Value::object(vec![("log".to_owned(), Value::Native(Native::ConsoleLog))]);
        global.define("console", console, Mutability::Immutable);
        Interpreter {
            env: Environment::new(LocalScope::new(global)),
            output: Vec::new(),
            steps: 0,
            step_limit: DEFAULT_STEP_LIMIT,
            call_depth: 0,
        }
    }

    #[must_use]
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = limit;
        self
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Lines logged so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Run a `SourceFile`, a single statement, or an expression.
    ///
    /// An expression's value is returned; statements produce `undefined`.
    #[tracing::instrument(level = "debug", skip_all, fields(tag = %tree.tag()))]
    pub fn run(&mut self, tree: &Node) -> EvalResult<Value> {
        let flow = match tree.tag() {
            Tag::SourceFile => self.exec_statements(tree.list("statements"))?,
            tag if tag.is_statement() => self.exec_statement(tree)?,
            _ => return self.eval(tree),
        };
        match flow {
            Flow::Normal | Flow::Return(_) => Ok(Value::Undefined),
            Flow::Break => Err(EvalError::OutsideLoop("break")),
            Flow::Continue => Err(EvalError::OutsideLoop("continue")),
        }
    }

    fn tick(&mut self) -> EvalResult<()> {
        self.steps += 1;
        if self.steps > self.step_limit {
            return Err(EvalError::StepLimit(self.step_limit));
        }
        Ok(())
    }

    /// Call a function value with evaluated arguments.
    pub(crate) fn call(&mut self, callee: &Value, arguments: Vec<Value>) -> EvalResult<Value> {
        self.tick()?;
        match callee {
            Value::Native(Native::ConsoleLog) => {
                let parts: Vec<String> = arguments.iter().map(Value::log_text).collect();
                let line = parts.join(" ");
                trace!(%line, "console.log");
                self.output.push(line);
                Ok(Value::Undefined)
            }
            Value::Function(closure) => self.call_closure(closure, arguments),
            other => Err(EvalError::NotCallable(other.type_name().to_owned())),
        }
    }

    fn call_closure(&mut self, closure: &Rc<Closure>, arguments: Vec<Value>) -> EvalResult<Value> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(EvalError::CallDepth(MAX_CALL_DEPTH));
        }
        let frame = Scope::with_parent(closure.scope.clone());
        let caller = std::mem::replace(&mut self.env, Environment::new(LocalScope::new(frame)));
        self.call_depth += 1;
        let result = self.invoke(closure, arguments);
        self.call_depth -= 1;
        self.env = caller;
        result
    }

    fn invoke(&mut self, closure: &Closure, arguments: Vec<Value>) -> EvalResult<Value> {
        let mut arguments = arguments.into_iter();
        for parameter in &closure.parameters {
            let mut value = arguments.next().unwrap_or(Value::Undefined);
            if matches!(value, Value::Undefined) {
                if let Some(default) = parameter.child("initializer") {
                    value = self.eval(default)?;
                }
            }
            if let Some(name) = parameter.child("name").and_then(Node::identifier) {
                self.env.define(name, value, Mutability::Mutable);
            }
        }

        if closure.body.tag() != Tag::Block {
            return self.eval(&closure.body);
        }
        match self.exec_statements(closure.body.list("statements"))? {
            Flow::Normal => Ok(Value::Undefined),
            Flow::Return(value) => Ok(value),
            Flow::Break => Err(EvalError::OutsideLoop("break")),
            Flow::Continue => Err(EvalError::OutsideLoop("continue")),
        }
    }

    /// A closure over the current scope.
    pub(crate) fn closure(&self, name: Option<&str>, parameters: &[Node], body: &Node) -> Value {
        Value::Function(Rc::new(Closure {
            name: name.map(str::to_owned),
            parameters: parameters.to_vec(),
            body: body.clone(),
            scope: self.env.current(),
        }))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
