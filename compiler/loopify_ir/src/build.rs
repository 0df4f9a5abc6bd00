//! Typed node builders.
//!
//! Each helper produces a well-formed node for one tag. Parsers and tests use
//! these instead of [`Node::new`] so that shape errors are impossible rather
//! than reported.

use crate::{Node, Span, Tag, Value};

fn leaf(tag: Tag, text: impl Into<String>, span: Span) -> Node {
    Node::assemble(tag, span, [Value::Text(text.into())])
}

pub fn identifier(name: impl Into<String>, span: Span) -> Node {
    leaf(Tag::Identifier, name, span)
}

pub fn numeric(text: impl Into<String>, span: Span) -> Node {
    leaf(Tag::NumericLiteral, text, span)
}

/// String literal; `text` is the unquoted contents.
pub fn string(text: impl Into<String>, span: Span) -> Node {
    leaf(Tag::StringLiteral, text, span)
}

pub fn error(text: impl Into<String>, span: Span) -> Node {
    leaf(Tag::Error, text, span)
}

/// Keyword, operator, or field-less statement.
pub fn token(tag: Tag, span: Span) -> Node {
    debug_assert!(tag.is_token(), "`{tag}` is not a token");
    Node::assemble(tag, span, [])
}

pub fn array(elements: Vec<Node>, span: Span) -> Node {
    Node::assemble(Tag::ArrayLiteralExpression, span, [Value::from(elements)])
}

pub fn object(properties: Vec<Node>, span: Span) -> Node {
    Node::assemble(
        Tag::ObjectLiteralExpression,
        span,
        [Value::from(properties)],
    )
}

pub fn property_assignment(name: Node, initializer: Node, span: Span) -> Node {
    Node::assemble(
        Tag::PropertyAssignment,
        span,
        [Value::from(name), Value::from(initializer)],
    )
}

pub fn paren(expression: Node, span: Span) -> Node {
    Node::assemble(
        Tag::ParenthesizedExpression,
        span,
        [Value::from(expression)],
    )
}

pub fn property_access(expression: Node, name: Node, span: Span) -> Node {
    Node::assemble(
        Tag::PropertyAccessExpression,
        span,
        [Value::from(expression), Value::from(name)],
    )
}

pub fn element_access(expression: Node, index: Node, span: Span) -> Node {
    Node::assemble(
        Tag::ElementAccessExpression,
        span,
        [Value::from(expression), Value::from(index)],
    )
}

pub fn call(callee: Node, arguments: Vec<Node>, span: Span) -> Node {
    Node::assemble(
        Tag::CallExpression,
        span,
        [Value::from(callee), Value::from(arguments)],
    )
}

/// `receiver.method(arguments)`
pub fn method_call(receiver: Node, method: &str, arguments: Vec<Node>, span: Span) -> Node {
    let callee = property_access(receiver, identifier(method, Span::DUMMY), span);
    call(callee, arguments, span)
}

pub fn arrow(parameters: Vec<Node>, body: Node, span: Span) -> Node {
    Node::assemble(
        Tag::ArrowFunction,
        span,
        [Value::from(parameters), Value::from(body)],
    )
}

pub fn parameter(name: Node, initializer: Option<Node>, span: Span) -> Node {
    Node::assemble(
        Tag::Parameter,
        span,
        [Value::from(name), Value::from(initializer)],
    )
}

pub fn prefix(operator: Tag, operand: Node, span: Span) -> Node {
    Node::assemble(
        Tag::PrefixUnaryExpression,
        span,
        [Value::from(token(operator, Span::DUMMY)), Value::from(operand)],
    )
}

pub fn postfix(operand: Node, operator: Tag, span: Span) -> Node {
    Node::assemble(
        Tag::PostfixUnaryExpression,
        span,
        [Value::from(operand), Value::from(token(operator, Span::DUMMY))],
    )
}

pub fn binary(left: Node, operator: Tag, right: Node, span: Span) -> Node {
    Node::assemble(
        Tag::BinaryExpression,
        span,
        [
            Value::from(left),
            Value::from(token(operator, Span::DUMMY)),
            Value::from(right)
        ],
    )
}

pub fn conditional(condition: Node, when_true: Node, when_false: Node, span: Span) -> Node {
    Node::assemble(
        Tag::ConditionalExpression,
        span,
        [Value::from(condition), Value::from(when_true), Value::from(when_false)],
    )
}

pub fn block(statements: Vec<Node>, span: Span) -> Node {
    Node::assemble(Tag::Block, span, [Value::from(statements)])
}

pub fn expression_statement(expression: Node, span: Span) -> Node {
    Node::assemble(
        Tag::ExpressionStatement,
        span,
        [Value::from(expression)],
    )
}

/// Declaration keyword of a variable statement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Const,
    Let,
    Var,
}

impl DeclKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            DeclKind::Const => "const",
            DeclKind::Let => "let",
            DeclKind::Var => "var",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<DeclKind> {
        match keyword {
            "const" => Some(DeclKind::Const),
            "let" => Some(DeclKind::Let),
            "var" => Some(DeclKind::Var),
            _ => None,
        }
    }
}

pub fn variable_declaration(name: Node, initializer: Option<Node>, span: Span) -> Node {
    Node::assemble(
        Tag::VariableDeclaration,
        span,
        [Value::from(name), Value::from(initializer)],
    )
}

pub fn declaration_list(kind: DeclKind, declarations: Vec<Node>, span: Span) -> Node {
    Node::assemble(
        Tag::VariableDeclarationList,
        span,
        [
            Value::Text(kind.keyword().to_owned()),
            Value::from(declarations)
        ],
    )
}

pub fn variable_statement(declaration_list: Node, span: Span) -> Node {
    Node::assemble(
        Tag::VariableStatement,
        span,
        [Value::from(declaration_list)],
    )
}

/// `let name = initializer;` in one call.
pub fn let_statement(kind: DeclKind, name: &str, initializer: Node, span: Span) -> Node {
    let decl = variable_declaration(identifier(name, Span::DUMMY), Some(initializer), span);
    variable_statement(declaration_list(kind, vec![decl], span), span)
}

pub fn function_declaration(name: Node, parameters: Vec<Node>, body: Node, span: Span) -> Node {
    Node::assemble(
        Tag::FunctionDeclaration,
        span,
        [Value::from(name), Value::from(parameters), Value::from(body)],
    )
}

pub fn return_statement(expression: Option<Node>, span: Span) -> Node {
    Node::assemble(Tag::ReturnStatement, span, [Value::from(expression)])
}

pub fn if_statement(
    condition: Node,
    then_statement: Node,
    else_statement: Option<Node>,
    span: Span,
) -> Node {
    Node::assemble(
        Tag::IfStatement,
        span,
        [
            Value::from(condition),
            Value::from(then_statement),
            Value::from(else_statement)
        ],
    )
}

pub fn for_statement(
    initializer: Option<Node>,
    condition: Option<Node>,
    incrementor: Option<Node>,
    statement: Node,
    span: Span,
) -> Node {
    Node::assemble(
        Tag::ForStatement,
        span,
        [
            Value::from(initializer),
            Value::from(condition),
            Value::from(incrementor),
            Value::from(statement)
        ],
    )
}

pub fn source_file(statements: Vec<Node>, span: Span) -> Node {
    Node::assemble(Tag::SourceFile, span, [Value::from(statements)])
}
