//! Source printer.
//!
//! Renders any node as host-language text. Output is deterministic: two-space
//! indentation, one statement per line, double-quoted strings, and
//! parentheses inserted wherever a child binds looser than its position
//! requires. Original formatting and comments are not preserved.

use loopify_ir::stack::ensure_sufficient_stack;
use loopify_ir::{Node, Tag, Value};

use crate::precedence::{self, Precedence};

/// Print `node` as source text.
pub fn print(node: &Node) -> String {
    let mut printer = Printer::default();
    printer.node(node);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

/// Binding strength of an expression node.
fn precedence_of(node: &Node) -> Precedence {
    match node.tag() {
        Tag::ArrowFunction => precedence::ASSIGNMENT,
        Tag::BinaryExpression => node
            .child("operator_token")
            .map_or(precedence::ASSIGNMENT, |op| precedence::binary(op.tag())),
        Tag::ConditionalExpression => precedence::CONDITIONAL,
        Tag::PrefixUnaryExpression => precedence::PREFIX,
        Tag::PostfixUnaryExpression => precedence::POSTFIX,
        Tag::CallExpression | Tag::PropertyAccessExpression | Tag::ElementAccessExpression => {
            precedence::MEMBER
        }
        _ => precedence::PRIMARY,
    }
}

/// Whether printing `node` would begin with `{`.
fn starts_with_brace(node: &Node) -> bool {
    match node.tag() {
        Tag::ObjectLiteralExpression => true,
        Tag::BinaryExpression | Tag::PostfixUnaryExpression => {
            node.child("left").or_else(|| node.child("operand")).is_some_and(starts_with_brace)
        }
        Tag::ConditionalExpression => node.child("condition").is_some_and(starts_with_brace),
        Tag::CallExpression | Tag::PropertyAccessExpression | Tag::ElementAccessExpression => {
            node.child("expression").is_some_and(starts_with_brace)
        }
        _ => false,
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl Printer {
    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn node(&mut self, node: &Node) {
        match node.tag() {
            Tag::SourceFile => {
                for statement in node.list("statements") {
                    self.statement(statement);
                    self.out.push('\n');
                }
            }
            Tag::Parameter | Tag::VariableDeclaration => self.binding(node),
            Tag::VariableDeclarationList => self.declaration_list(node),
            Tag::PropertyAssignment => self.property(node),
            tag if tag.is_statement() => self.statement(node),
            _ => self.expr(node, precedence::ASSIGNMENT),
        }
    }

    fn statement(&mut self, node: &Node) {
        ensure_sufficient_stack(|| self.statement_inner(node));
    }

    fn statement_inner(&mut self, node: &Node) {
        match node.tag() {
            Tag::Block => self.block(node),
            Tag::ExpressionStatement => {
                if let Some(expression) = node.child("expression") {
                    if starts_with_brace(expression) {
                        self.out.push('(');
                        self.expr(expression, precedence::ASSIGNMENT);
                        self.out.push(')');
                    } else {
                        self.expr(expression, precedence::ASSIGNMENT);
                    }
                }
                self.out.push(';');
            }
            Tag::VariableStatement => {
                if let Some(list) = node.child("declaration_list") {
                    self.declaration_list(list);
                }
                self.out.push(';');
            }
            Tag::FunctionDeclaration => {
                self.out.push_str("function ");
                if let Some(name) = node.child("name") {
                    self.expr(name, precedence::PRIMARY);
                }
                self.parameters(node.list("parameters"));
                self.out.push(' ');
                if let Some(body) = node.child("body") {
                    self.block(body);
                }
            }
            Tag::ReturnStatement => match node.child("expression") {
                Some(expression) => {
                    self.out.push_str("return ");
                    self.expr(expression, precedence::ASSIGNMENT);
                    self.out.push(';');
                }
                None => self.out.push_str("return;"),
            },
            Tag::IfStatement => {
                self.out.push_str("if (");
                if let Some(condition) = node.child("expression") {
                    self.expr(condition, precedence::ASSIGNMENT);
                }
                self.out.push_str(") ");
                if let Some(then_statement) = node.child("then_statement") {
                    self.statement(then_statement);
                }
                if let Some(else_statement) = node.child("else_statement") {
                    self.out.push_str(" else ");
                    self.statement(else_statement);
                }
            }
            Tag::ForStatement => self.for_statement(node),
            Tag::BreakStatement => self.out.push_str("break;"),
            Tag::ContinueStatement => self.out.push_str("continue;"),
            Tag::EmptyStatement => self.out.push(';'),
            Tag::Error => self.out.push_str(node.text().unwrap_or_default()),
            _ => {
                self.expr(node, precedence::ASSIGNMENT);
                self.out.push(';');
            }
        }
    }

    fn block(&mut self, node: &Node) {
        let statements = node.list("statements");
        if statements.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        self.indent += 1;
        for statement in statements {
            self.newline();
            self.statement(statement);
        }
        self.indent -= 1;
        self.newline();
        self.out.push('}');
    }

    fn for_statement(&mut self, node: &Node) {
        self.out.push_str("for (");
        if let Some(initializer) = node.child("initializer") {
            self.node(initializer);
        }
        self.out.push(';');
        if let Some(condition) = node.child("condition") {
            self.out.push(' ');
            self.expr(condition, precedence::ASSIGNMENT);
        }
        self.out.push(';');
        if let Some(incrementor) = node.child("incrementor") {
            self.out.push(' ');
            self.expr(incrementor, precedence::ASSIGNMENT);
        }
        self.out.push_str(") ");
        if let Some(statement) = node.child("statement") {
            self.statement(statement);
        }
    }

    fn declaration_list(&mut self, node: &Node) {
        if let Some(Value::Text(keyword)) = node.get("flags") {
            self.out.push_str(keyword);
            self.out.push(' ');
        }
        self.comma_separated(node.list("declarations"), Self::binding);
    }

    /// `name` or `name = initializer`.
    fn binding(&mut self, node: &Node) {
        if let Some(name) = node.child("name") {
            self.expr(name, precedence::PRIMARY);
        }
        if let Some(initializer) = node.child("initializer") {
            self.out.push_str(" = ");
            self.expr(initializer, precedence::ASSIGNMENT);
        }
    }

    fn property(&mut self, node: &Node) {
        let (Some(name), Some(initializer)) = (node.child("name"), node.child("initializer")) else {
            return;
        };
        self.expr(name, precedence::PRIMARY);
        if name.tag() == Tag::Identifier && initializer.same_shape(name) {
            return;
        }
        self.out.push_str(": ");
        self.expr(initializer, precedence::ASSIGNMENT);
    }

    fn parameters(&mut self, parameters: &[Node]) {
        self.out.push('(');
        self.comma_separated(parameters, Self::binding);
        self.out.push(')');
    }

    fn comma_separated(&mut self, nodes: &[Node], mut each: impl FnMut(&mut Self, &Node)) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            each(self, node);
        }
    }

    fn arguments(&mut self, nodes: &[Node]) {
        self.comma_separated(nodes, |p, n| p.expr(n, precedence::ASSIGNMENT));
    }

    /// Print an expression, parenthesized if it binds looser than `min`.
    fn expr(&mut self, node: &Node, min: Precedence) {
        ensure_sufficient_stack(|| {
            if precedence_of(node) < min {
                self.out.push('(');
                self.expr_inner(node);
                self.out.push(')');
            } else {
                self.expr_inner(node);
            }
        });
    }

    fn expr_inner(&mut self, node: &Node) {
        let tag = node.tag();
        match tag {
            Tag::Identifier | Tag::NumericLiteral | Tag::Error => {
                self.out.push_str(node.text().unwrap_or_default());
            }
            Tag::StringLiteral => {
                let quoted = escape(node.text().unwrap_or_default());
                self.out.push_str(&quoted);
            }
            Tag::ArrayLiteralExpression => {
                self.out.push('[');
                self.arguments(node.list("elements"));
                self.out.push(']');
            }
            Tag::ObjectLiteralExpression => {
                let properties = node.list("properties");
                if properties.is_empty() {
                    self.out.push_str("{}");
                } else {
                    self.out.push_str("{ ");
                    self.comma_separated(properties, Self::property);
                    self.out.push_str(" }");
                }
            }
            Tag::ParenthesizedExpression => {
                self.out.push('(');
                if let Some(inner) = node.child("expression") {
                    self.expr(inner, precedence::ASSIGNMENT);
                }
                self.out.push(')');
            }
            Tag::PropertyAccessExpression => {
                if let Some(object) = node.child("expression") {
                    self.expr(object, precedence::MEMBER);
                }
                self.out.push('.');
                if let Some(name) = node.child("name") {
                    self.expr(name, precedence::PRIMARY);
                }
            }
            Tag::ElementAccessExpression => {
                if let Some(object) = node.child("expression") {
                    self.expr(object, precedence::MEMBER);
                }
                self.out.push('[');
                if let Some(index) = node.child("argument_expression") {
                    self.expr(index, precedence::ASSIGNMENT);
                }
                self.out.push(']');
            }
            Tag::CallExpression => {
                if let Some(callee) = node.child("expression") {
                    self.expr(callee, precedence::MEMBER);
                }
                self.out.push('(');
                self.arguments(node.list("arguments"));
                self.out.push(')');
            }
            Tag::ArrowFunction => {
                self.parameters(node.list("parameters"));
                self.out.push_str(" => ");
                match node.child("body") {
                    Some(body) if body.tag() == Tag::Block => self.block(body),
                    Some(body) if starts_with_brace(body) => {
                        self.out.push('(');
                        self.expr(body, precedence::ASSIGNMENT);
                        self.out.push(')');
                    }
                    Some(body) => self.expr(body, precedence::ASSIGNMENT),
                    None => {}
                }
            }
            Tag::PrefixUnaryExpression => {
                let (Some(op), Some(operand)) = (node.child("operator_token"), node.child("operand"))
                else {
                    return;
                };
                let spelling = op.tag().token_text().unwrap_or_default();
                self.out.push_str(spelling);
                let operand_op = operand
                    .child("operator_token")
                    .filter(|_| operand.tag() == Tag::PrefixUnaryExpression)
                    .and_then(|o| o.tag().token_text())
                    .unwrap_or_default();
                let sign = spelling.chars().next().filter(|c| matches!(c, '+' | '-'));
                if sign.is_some_and(|c| operand_op.starts_with(c)) {
                    self.out.push(' ');
                }
                self.expr(operand, precedence::PREFIX);
            }
            Tag::PostfixUnaryExpression => {
                if let Some(operand) = node.child("operand") {
                    self.expr(operand, precedence::POSTFIX);
                }
                if let Some(op) = node.child("operator_token") {
                    self.out.push_str(op.tag().token_text().unwrap_or_default());
                }
            }
            Tag::BinaryExpression => self.binary(node),
            Tag::ConditionalExpression => {
                if let Some(condition) = node.child("condition") {
                    self.expr(condition, precedence::LOGICAL_OR);
                }
                self.out.push_str(" ? ");
                if let Some(when_true) = node.child("when_true") {
                    self.expr(when_true, precedence::ASSIGNMENT);
                }
                self.out.push_str(" : ");
                if let Some(when_false) = node.child("when_false") {
                    self.expr(when_false, precedence::ASSIGNMENT);
                }
            }
            _ if tag.is_token() => {
                self.out.push_str(tag.token_text().unwrap_or_default());
            }
            _ => self.node(node),
        }
    }

    fn binary(&mut self, node: &Node) {
        let (Some(left), Some(op), Some(right)) = (
            node.child("left"),
            node.child("operator_token"),
            node.child("right"),
        ) else {
            return;
        };
        let (left_min, right_min) = if op.tag().is_assignment_operator() {
            (precedence::MEMBER, precedence::ASSIGNMENT)
        } else {
            let prec = precedence::binary(op.tag());
            (prec, prec + 1)
        };
        self.expr(left, left_min);
        self.out.push(' ');
        self.out.push_str(op.tag().token_text().unwrap_or_default());
        self.out.push(' ');
        self.expr(right, right_min);
    }
}
