//! Statement execution.

use loopify_ir::build::DeclKind;
use loopify_ir::stack::ensure_sufficient_stack;
use loopify_ir::{Node, Tag};

use super::{Flow, Interpreter};
use crate::environment::Mutability;
use crate::value::Value;
use crate::{EvalError, EvalResult};

impl Interpreter {
    /// Execute a statement list in the current scope, hoisting function
    /// declarations first.
    pub(crate) fn exec_statements(&mut self, statements: &[Node]) -> EvalResult<Flow> {
        for statement in statements {
            if statement.tag() != Tag::FunctionDeclaration {
                continue;
            }
            let name = statement.child("name").and_then(Node::identifier);
            if let (Some(name), Some(body)) = (name, statement.child("body")) {
                let function = self.closure(Some(name), statement.list("parameters"), body);
                self.env.define(name, function, Mutability::Mutable);
            }
        }
        for statement in statements {
            match self.exec_statement(statement)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    pub(crate) fn exec_statement(&mut self, node: &Node) -> EvalResult<Flow> {
        ensure_sufficient_stack(|| {
            self.tick()?;
            match node.tag() {
                Tag::Block => self.scoped(|this| this.exec_statements(node.list("statements"))),
                Tag::ExpressionStatement => {
                    if let Some(expression) = node.child("expression") {
                        self.eval(expression)?;
                    }
                    Ok(Flow::Normal)
                }
                Tag::VariableStatement => {
                    if let Some(list) = node.child("declaration_list") {
                        self.declare(list)?;
                    }
                    Ok(Flow::Normal)
                }
                Tag::FunctionDeclaration | Tag::EmptyStatement => Ok(Flow::Normal),
                Tag::ReturnStatement => {
                    let value = match node.child("expression") {
                        Some(expression) => self.eval(expression)?,
                        None => Value::Undefined,
                    };
                    Ok(Flow::Return(value))
                }
                Tag::IfStatement => {
                    let condition = match node.child("expression") {
                        Some(condition) => self.eval(condition)?,
                        None => Value::Undefined,
                    };
                    let branch = if condition.is_truthy() {
                        node.child("then_statement")
                    } else {
                        node.child("else_statement")
                    };
                    match branch {
                        Some(branch) => self.scoped(|this| this.exec_statement(branch)),
                        None => Ok(Flow::Normal),
                    }
                }
                Tag::ForStatement => self.scoped(|this| this.exec_for(node)),
                Tag::BreakStatement => Ok(Flow::Break),
                Tag::ContinueStatement => Ok(Flow::Continue),
                Tag::Error => Err(EvalError::Syntax(node.text().unwrap_or_default().to_owned())),
                tag => Err(EvalError::Unsupported(tag)),
            }
        })
    }

    fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<R>) -> EvalResult<R> {
        self.env.push_scope();
        let result = f(self);
        self.env.pop_scope();
        result
    }

    /// Bind every declaration of a `VariableDeclarationList`; returns the
    /// declared names.
    fn declare(&mut self, list: &Node) -> EvalResult<Vec<String>> {
        let kind = list
            .get("flags")
            .and_then(loopify_ir::Value::as_text)
            .and_then(DeclKind::from_keyword)
            .unwrap_or(DeclKind::Let);
        let mutability = if kind == DeclKind::Const {
            Mutability::Immutable
        } else {
            Mutability::Mutable
        };
        let mut names = Vec::new();
        for declaration in list.list("declarations") {
            let value = match declaration.child("initializer") {
                Some(init) => self.eval(init)?,
                None => Value::Undefined,
            };
            if let Some(name) = declaration.child("name").and_then(Node::identifier) {
                self.env.define(name, value, mutability);
                names.push(name.to_owned());
            }
        }
        Ok(names)
    }

    /// Run a `for` loop in the scope the caller pushed.
    ///
    /// Variables declared by the initializer get a fresh binding per
    /// iteration, so closures created in the body keep the value of their
    /// own iteration.
    fn exec_for(&mut self, node: &Node) -> EvalResult<Flow> {
        let loop_variables = match node.child("initializer") {
            Some(init) if init.tag() == Tag::VariableDeclarationList => self.declare(init)?,
            Some(init) => {
                self.eval(init)?;
                Vec::new()
            }
            None => Vec::new(),
        };

        loop {
            self.tick()?;
            if let Some(condition) = node.child("condition") {
                if !self.eval(condition)?.is_truthy() {
                    break;
                }
            }
            if let Some(body) = node.child("statement") {
                match self.exec_statement(body)? {
                    Flow::Normal | Flow::Continue => {}
                    Flow::Break => break,
                    flow @ Flow::Return(_) => return Ok(flow),
                }
            }
            if !loop_variables.is_empty() {
                self.rebind(&loop_variables);
            }
            if let Some(incrementor) = node.child("incrementor") {
                self.eval(incrementor)?;
            }
        }
        Ok(Flow::Normal)
    }

    /// Copy `names` into a fresh innermost scope.
    fn rebind(&mut self, names: &[String]) {
        let values: Vec<Value> = names
            .iter()
            .map(|name| self.env.lookup(name).unwrap_or(Value::Undefined))
            .collect();
        self.env.pop_scope();
        self.env.push_scope();
        for (name, value) in names.iter().zip(values) {
            self.env.define(name, value, Mutability::Mutable);
        }
    }
}
