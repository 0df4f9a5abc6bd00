//! One-pass type annotation.
//!
//! The analyzer walks a source file once, binding declared names to the
//! coarse type of their initializer and recording the type of every
//! expression it visits, keyed by the expression's span and tag.
//!
//! Callback parameters of the sequence methods are typed from the receiver:
//! in `xs.map((x, i) => ...)` over a `number[]`, `x` is a number and `i` an
//! index. That is what lets a chain such as `xs.map(f).filter(g)` be known
//! to produce a sequence at every step.

use loopify_ir::stack::ensure_sufficient_stack;
use loopify_ir::{Node, Span, Tag};
use loopify_rewrite::TypeDesc;
use rustc_hash::FxHashMap;

use crate::scope::Scope;

/// Recorded expression types.
pub(crate) type TypeMemo = FxHashMap<(Span, Tag), TypeDesc>;

pub(crate) struct Analyzer {
    scope: Scope,
    memo: TypeMemo,
}

impl Analyzer {
    pub(crate) fn new() -> Self {
        Analyzer {
            scope: Scope::new(),
            memo: TypeMemo::default(),
        }
    }

    pub(crate) fn finish(self) -> TypeMemo {
        self.memo
    }

    /// Run `f` in a child scope.
    fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let outer = self.scope.child();
        let saved = std::mem::replace(&mut self.scope, outer);
        let result = f(self);
        self.scope = saved;
        result
    }

    pub(crate) fn statements(&mut self, statements: &[Node]) {
        // Function declarations are visible before their position.
        for statement in statements {
            if statement.tag() == Tag::FunctionDeclaration {
                if let Some(name) = statement.child("name").and_then(Node::identifier) {
                    self.scope.bind(name, TypeDesc::Function);
                }
            }
        }
        for statement in statements {
            self.statement(statement);
        }
    }

    fn statement(&mut self, node: &Node) {
        ensure_sufficient_stack(|| match node.tag() {
            Tag::Block => self.scoped(|a| a.statements(node.list("statements"))),
            Tag::ExpressionStatement | Tag::ReturnStatement => {
                if let Some(expression) = node.child("expression") {
                    self.expr(expression);
                }
            }
            Tag::VariableStatement => {
                if let Some(list) = node.child("declaration_list") {
                    self.declarations(list);
                }
            }
            Tag::FunctionDeclaration => {
                self.scoped(|a| {
                    a.bind_parameters(node.list("parameters"), &[]);
                    if let Some(body) = node.child("body") {
                        a.statements(body.list("statements"));
                    }
                });
            }
            Tag::IfStatement => {
                if let Some(condition) = node.child("expression") {
                    self.expr(condition);
                }
                for branch in ["then_statement", "else_statement"] {
                    if let Some(branch) = node.child(branch) {
                        self.scoped(|a| a.statement(branch));
                    }
                }
            }
            Tag::ForStatement => self.scoped(|a| {
                match node.child("initializer") {
                    Some(init) if init.tag() == Tag::VariableDeclarationList => {
                        a.declarations(init);
                    }
                    Some(init) => {
                        a.expr(init);
                    }
                    None => {}
                }
                for part in ["condition", "incrementor"] {
                    if let Some(part) = node.child(part) {
                        a.expr(part);
                    }
                }
                if let Some(body) = node.child("statement") {
                    a.statement(body);
                }
            }),
            _ => {}
        });
    }

    fn declarations(&mut self, list: &Node) {
        for declaration in list.list("declarations") {
            let ty = declaration
                .child("initializer")
                .map_or(TypeDesc::Unknown, |init| self.expr(init));
            if let Some(name) = declaration.child("name").and_then(Node::identifier) {
                self.scope.bind(name, ty);
            }
        }
    }

    /// Bind parameters positionally; missing types are unknown.
    fn bind_parameters(&mut self, parameters: &[Node], types: &[TypeDesc]) {
        for (i, parameter) in parameters.iter().enumerate() {
            let default = parameter.child("initializer").map(|init| self.expr(init));
            let ty = types
                .get(i)
                .cloned()
                .or(default)
                .unwrap_or(TypeDesc::Unknown);
            if let Some(name) = parameter.child("name").and_then(Node::identifier) {
                self.scope.bind(name, ty);
            }
        }
    }

    /// Analyze an arrow function whose parameters have `types`; returns the
    /// type of an expression body.
    fn arrow(&mut self, node: &Node, types: &[TypeDesc]) -> TypeDesc {
        self.record(node, TypeDesc::Function);
        self.scoped(|a| {
            a.bind_parameters(node.list("parameters"), types);
            match node.child("body") {
                Some(body) if body.tag() == Tag::Block => {
                    a.statements(body.list("statements"));
                    TypeDesc::Unknown
                }
                Some(body) => a.expr(body),
                None => TypeDesc::Unknown,
            }
        })
    }

    fn record(&mut self, node: &Node, ty: TypeDesc) -> TypeDesc {
        self.memo.insert((node.span(), node.tag()), ty.clone());
        ty
    }

    pub(crate) fn expr(&mut self, node: &Node) -> TypeDesc {
        ensure_sufficient_stack(|| {
            let ty = self.infer(node);
            self.record(node, ty)
        })
    }

    fn infer(&mut self, node: &Node) -> TypeDesc {
        match node.tag() {
            Tag::Identifier => match node.identifier() {
                Some("undefined") => TypeDesc::Null,
                Some(name) => self.scope.lookup(name).cloned().unwrap_or(TypeDesc::Unknown),
                None => TypeDesc::Unknown,
            },
            Tag::NumericLiteral => TypeDesc::Number,
            Tag::StringLiteral => TypeDesc::String,
            Tag::TrueKeyword | Tag::FalseKeyword => TypeDesc::Boolean,
            Tag::NullKeyword => TypeDesc::Null,
            Tag::ArrayLiteralExpression => {
                let elements: Vec<TypeDesc> =
                    node.list("elements").iter().map(|e| self.expr(e)).collect();
                TypeDesc::array(join_all(&elements))
            }
            Tag::ObjectLiteralExpression => {
                for property in node.list("properties") {
                    if let Some(init) = property.child("initializer") {
                        self.expr(init);
                    }
                }
                TypeDesc::Object
            }
            Tag::ParenthesizedExpression => node
                .child("expression")
                .map_or(TypeDesc::Unknown, |inner| self.expr(inner)),
            Tag::ArrowFunction => {
                self.arrow(node, &[]);
                TypeDesc::Function
            }
            Tag::PropertyAccessExpression => {
                let receiver = self.child_type(node, "expression");
                let name = node.child("name").and_then(Node::identifier);
                match (name, &receiver) {
                    (Some("length"), TypeDesc::Array(_) | TypeDesc::String) => TypeDesc::Number,
                    _ => TypeDesc::Unknown,
                }
            }
            Tag::ElementAccessExpression => {
                let receiver = self.child_type(node, "expression");
                self.child_type(node, "argument_expression");
                match receiver {
                    TypeDesc::Array(element) => *element,
                    TypeDesc::String => TypeDesc::String,
                    _ => TypeDesc::Unknown,
                }
            }
            Tag::CallExpression => self.call(node),
            Tag::PrefixUnaryExpression => {
                self.child_type(node, "operand");
                match node.child("operator_token").map(Node::tag) {
                    Some(Tag::ExclamationToken) => TypeDesc::Boolean,
                    _ => TypeDesc::Number,
                }
            }
            Tag::PostfixUnaryExpression => {
                self.child_type(node, "operand");
                TypeDesc::Number
            }
            Tag::BinaryExpression => self.binary(node),
            Tag::ConditionalExpression => {
                self.child_type(node, "condition");
                let when_true = self.child_type(node, "when_true");
                let when_false = self.child_type(node, "when_false");
                join(&when_true, &when_false)
            }
            _ => TypeDesc::Unknown,
        }
    }

    fn child_type(&mut self, node: &Node, field: &str) -> TypeDesc {
        node.child(field)
            .map_or(TypeDesc::Unknown, |child| self.expr(child))
    }

    fn binary(&mut self, node: &Node) -> TypeDesc {
        let left = self.child_type(node, "left");
        let right = self.child_type(node, "right");
        let Some(op) = node.child("operator_token").map(Node::tag) else {
            return TypeDesc::Unknown;
        };
        match op {
            Tag::PlusToken | Tag::PlusEqualsToken => match (&left, &right) {
                (TypeDesc::String, _) | (_, TypeDesc::String) => TypeDesc::String,
                (TypeDesc::Number, TypeDesc::Number) => TypeDesc::Number,
                _ => TypeDesc::Unknown,
            },
            Tag::MinusToken
            | Tag::AsteriskToken
            | Tag::SlashToken
            | Tag::PercentToken
            | Tag::AmpersandToken
            | Tag::BarToken
            | Tag::CaretToken
            | Tag::MinusEqualsToken
            | Tag::AsteriskEqualsToken => TypeDesc::Number,
            Tag::LessThanToken
            | Tag::GreaterThanToken
            | Tag::LessThanEqualsToken
            | Tag::GreaterThanEqualsToken
            | Tag::EqualsEqualsToken
            | Tag::EqualsEqualsEqualsToken
            | Tag::ExclamationEqualsToken
            | Tag::ExclamationEqualsEqualsToken => TypeDesc::Boolean,
            Tag::AmpersandAmpersandToken | Tag::BarBarToken => join(&left, &right),
            Tag::EqualsToken => right,
            _ => TypeDesc::Unknown,
        }
    }

    fn call(&mut self, node: &Node) -> TypeDesc {
        let Some(callee) = node.child("expression") else {
            return TypeDesc::Unknown;
        };
        let arguments = node.list("arguments");
        if callee.tag() != Tag::PropertyAccessExpression {
            self.expr(callee);
            for argument in arguments {
                self.expr(argument);
            }
            return TypeDesc::Unknown;
        }

        let receiver = self.child_type(callee, "expression");
        self.record(callee, TypeDesc::Unknown);
        let method = callee.child("name").and_then(Node::identifier).unwrap_or_default();
        let Some(element) = receiver.element().cloned() else {
            for argument in arguments {
                self.expr(argument);
            }
            return TypeDesc::Unknown;
        };

        // The accumulator of `reduce` starts as the initial value.
        let initial = if method == "reduce" {
            arguments.get(1).map(|init| self.expr(init))
        } else {
            None
        };
        let mut callback_result = TypeDesc::Unknown;
        for (i, argument) in arguments.iter().enumerate() {
            match (i, argument.tag()) {
                (0, Tag::ArrowFunction) => {
                    let params = callback_parameters(method, &receiver, &element, initial.as_ref());
                    callback_result = self.arrow(argument, &params);
                }
                (1, _) if initial.is_some() => {}
                _ => {
                    self.expr(argument);
                }
            }
        }

        match method {
            "map" => TypeDesc::array(callback_result),
            "filter" | "slice" | "concat" | "reverse" | "sort" => receiver,
            "find" | "pop" | "shift" => element,
            "reduce" => initial.unwrap_or(element),
            "some" | "every" | "includes" => TypeDesc::Boolean,
            "indexOf" | "findIndex" | "push" => TypeDesc::Number,
            "join" => TypeDesc::String,
            _ => TypeDesc::Unknown,
        }
    }
}

/// Parameter types of a sequence-method callback.
fn callback_parameters(
    method: &str,
    receiver: &TypeDesc,
    element: &TypeDesc,
    initial: Option<&TypeDesc>,
) -> Vec<TypeDesc> {
    if method == "reduce" {
        let accumulator = initial.cloned().unwrap_or_else(|| element.clone());
        return vec![accumulator, element.clone(), TypeDesc::Number, receiver.clone()];
    }
    vec![element.clone(), TypeDesc::Number, receiver.clone()]
}

/// The common type of two types, or unknown.
fn join(a: &TypeDesc, b: &TypeDesc) -> TypeDesc {
    if a == b {
        a.clone()
    } else {
        TypeDesc::Unknown
    }
}

fn join_all(types: &[TypeDesc]) -> TypeDesc {
    match types.split_first() {
        Some((first, rest)) if rest.iter().all(|t| t == first) => first.clone(),
        _ => TypeDesc::Unknown,
    }
}
