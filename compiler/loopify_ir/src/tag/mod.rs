//! Closed enumeration of node kinds.
//!
//! Every node in a Loopify tree carries exactly one `Tag`. The tag alone
//! determines the node's field set (see [`crate::schema`]), so the enum is
//! the single source of truth for what shapes a tree may contain.
//!
//! Tags fall into a handful of categories:
//!
//! | Category    | Examples                                   | Fields |
//! |-------------|--------------------------------------------|--------|
//! | Leaves      | `Identifier`, `NumericLiteral`             | `text` |
//! | Keywords    | `TrueKeyword`, `NullKeyword`               | none   |
//! | Operators   | `PlusToken`, `EqualsEqualsEqualsToken`     | none   |
//! | Expressions | `CallExpression`, `ArrowFunction`          | varies |
//! | Statements  | `ForStatement`, `VariableStatement`        | varies |
//! | Root        | `SourceFile`                               | `statements` |
//! | Recovery    | `Error`                                    | `text` |

use std::fmt;

use crate::IrError;

/// Node kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    // === Leaves ===
    Identifier,
    NumericLiteral,
    StringLiteral,

    // === Keywords ===
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ThisKeyword,

    // === Operator tokens ===
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsToken,
    ExclamationEqualsEqualsToken,
    AmpersandAmpersandToken,
    BarBarToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    PlusPlusToken,
    MinusMinusToken,
    ExclamationToken,

    // === Expressions ===
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAssignment,
    ParenthesizedExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    ArrowFunction,
    Parameter,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,

    // === Statements ===
    Block,
    ExpressionStatement,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    FunctionDeclaration,
    ReturnStatement,
    IfStatement,
    ForStatement,
    BreakStatement,
    ContinueStatement,
    EmptyStatement,

    // === Root / recovery ===
    SourceFile,
    Error,
}

impl Tag {
    /// Every tag, in declaration order.
    pub const ALL: [Tag; 59] = [
        Tag::Identifier,
        Tag::NumericLiteral,
        Tag::StringLiteral,
        Tag::TrueKeyword,
        Tag::FalseKeyword,
        Tag::NullKeyword,
        Tag::ThisKeyword,
        Tag::PlusToken,
        Tag::MinusToken,
        Tag::AsteriskToken,
        Tag::SlashToken,
        Tag::PercentToken,
        Tag::LessThanToken,
        Tag::GreaterThanToken,
        Tag::LessThanEqualsToken,
        Tag::GreaterThanEqualsToken,
        Tag::EqualsEqualsToken,
        Tag::EqualsEqualsEqualsToken,
        Tag::ExclamationEqualsToken,
        Tag::ExclamationEqualsEqualsToken,
        Tag::AmpersandAmpersandToken,
        Tag::BarBarToken,
        Tag::AmpersandToken,
        Tag::BarToken,
        Tag::CaretToken,
        Tag::EqualsToken,
        Tag::PlusEqualsToken,
        Tag::MinusEqualsToken,
        Tag::AsteriskEqualsToken,
        Tag::PlusPlusToken,
        Tag::MinusMinusToken,
        Tag::ExclamationToken,
        Tag::ArrayLiteralExpression,
        Tag::ObjectLiteralExpression,
        Tag::PropertyAssignment,
        Tag::ParenthesizedExpression,
        Tag::PropertyAccessExpression,
        Tag::ElementAccessExpression,
        Tag::CallExpression,
        Tag::ArrowFunction,
        Tag::Parameter,
        Tag::PrefixUnaryExpression,
        Tag::PostfixUnaryExpression,
        Tag::BinaryExpression,
        Tag::ConditionalExpression,
        Tag::Block,
        Tag::ExpressionStatement,
        Tag::VariableStatement,
        Tag::VariableDeclarationList,
        Tag::VariableDeclaration,
        Tag::FunctionDeclaration,
        Tag::ReturnStatement,
        Tag::IfStatement,
        Tag::ForStatement,
        Tag::BreakStatement,
        Tag::ContinueStatement,
        Tag::EmptyStatement,
        Tag::SourceFile,
        Tag::Error,
    ];

    /// Canonical spelling of the tag.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Identifier => "Identifier",
            Tag::NumericLiteral => "NumericLiteral",
            Tag::StringLiteral => "StringLiteral",
            Tag::TrueKeyword => "TrueKeyword",
            Tag::FalseKeyword => "FalseKeyword",
            Tag::NullKeyword => "NullKeyword",
            Tag::ThisKeyword => "ThisKeyword",
            Tag::PlusToken => "PlusToken",
            Tag::MinusToken => "MinusToken",
            Tag::AsteriskToken => "AsteriskToken",
            Tag::SlashToken => "SlashToken",
            Tag::PercentToken => "PercentToken",
            Tag::LessThanToken => "LessThanToken",
            Tag::GreaterThanToken => "GreaterThanToken",
            Tag::LessThanEqualsToken => "LessThanEqualsToken",
            Tag::GreaterThanEqualsToken => "GreaterThanEqualsToken",
            Tag::EqualsEqualsToken => "EqualsEqualsToken",
            Tag::EqualsEqualsEqualsToken => "EqualsEqualsEqualsToken",
            Tag::ExclamationEqualsToken => "ExclamationEqualsToken",
            Tag::ExclamationEqualsEqualsToken => "ExclamationEqualsEqualsToken",
            Tag::AmpersandAmpersandToken => "AmpersandAmpersandToken",
            Tag::BarBarToken => "BarBarToken",
            Tag::AmpersandToken => "AmpersandToken",
            Tag::BarToken => "BarToken",
            Tag::CaretToken => "CaretToken",
            Tag::EqualsToken => "EqualsToken",
            Tag::PlusEqualsToken => "PlusEqualsToken",
            Tag::MinusEqualsToken => "MinusEqualsToken",
            Tag::AsteriskEqualsToken => "AsteriskEqualsToken",
            Tag::PlusPlusToken => "PlusPlusToken",
            Tag::MinusMinusToken => "MinusMinusToken",
            Tag::ExclamationToken => "ExclamationToken",
            Tag::ArrayLiteralExpression => "ArrayLiteralExpression",
            Tag::ObjectLiteralExpression => "ObjectLiteralExpression",
            Tag::PropertyAssignment => "PropertyAssignment",
            Tag::ParenthesizedExpression => "ParenthesizedExpression",
            Tag::PropertyAccessExpression => "PropertyAccessExpression",
            Tag::ElementAccessExpression => "ElementAccessExpression",
            Tag::CallExpression => "CallExpression",
            Tag::ArrowFunction => "ArrowFunction",
            Tag::Parameter => "Parameter",
            Tag::PrefixUnaryExpression => "PrefixUnaryExpression",
            Tag::PostfixUnaryExpression => "PostfixUnaryExpression",
            Tag::BinaryExpression => "BinaryExpression",
            Tag::ConditionalExpression => "ConditionalExpression",
            Tag::Block => "Block",
            Tag::ExpressionStatement => "ExpressionStatement",
            Tag::VariableStatement => "VariableStatement",
            Tag::VariableDeclarationList => "VariableDeclarationList",
            Tag::VariableDeclaration => "VariableDeclaration",
            Tag::FunctionDeclaration => "FunctionDeclaration",
            Tag::ReturnStatement => "ReturnStatement",
            Tag::IfStatement => "IfStatement",
            Tag::ForStatement => "ForStatement",
            Tag::BreakStatement => "BreakStatement",
            Tag::ContinueStatement => "ContinueStatement",
            Tag::EmptyStatement => "EmptyStatement",
            Tag::SourceFile => "SourceFile",
            Tag::Error => "Error",
        }
    }

    /// Resolve a tag from its canonical spelling.
    pub fn from_name(name: &str) -> Result<Tag, IrError> {
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == name)
            .ok_or_else(|| IrError::UnknownTag(name.to_owned()))
    }

    /// Tags whose nodes carry no fields at all.
    ///
    /// These are rebuilt from the tag alone and need no constructor.
    pub const fn is_token(self) -> bool {
        crate::schema::standard_fields(self).is_empty()
    }

    /// Keyword tokens that stand alone as values.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Tag::TrueKeyword | Tag::FalseKeyword | Tag::NullKeyword | Tag::ThisKeyword
        )
    }

    /// Operators accepted between the operands of a `BinaryExpression`.
    pub const fn is_binary_operator(self) -> bool {
        matches!(
            self,
            Tag::PlusToken
                | Tag::MinusToken
                | Tag::AsteriskToken
                | Tag::SlashToken
                | Tag::PercentToken
                | Tag::LessThanToken
                | Tag::GreaterThanToken
                | Tag::LessThanEqualsToken
                | Tag::GreaterThanEqualsToken
                | Tag::EqualsEqualsToken
                | Tag::EqualsEqualsEqualsToken
                | Tag::ExclamationEqualsToken
                | Tag::ExclamationEqualsEqualsToken
                | Tag::AmpersandAmpersandToken
                | Tag::BarBarToken
                | Tag::AmpersandToken
                | Tag::BarToken
                | Tag::CaretToken
        ) || self.is_assignment_operator()
    }

    /// Assignment operators (a subset of binary operators).
    pub const fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            Tag::EqualsToken | Tag::PlusEqualsToken | Tag::MinusEqualsToken | Tag::AsteriskEqualsToken
        )
    }

    /// Operators accepted in prefix position.
    pub const fn is_prefix_operator(self) -> bool {
        matches!(
            self,
            Tag::PlusToken
                | Tag::MinusToken
                | Tag::ExclamationToken
                | Tag::PlusPlusToken
                | Tag::MinusMinusToken
        )
    }

    /// Operators accepted in postfix position.
    pub const fn is_postfix_operator(self) -> bool {
        matches!(self, Tag::PlusPlusToken | Tag::MinusMinusToken)
    }

    /// Any operator token.
    pub const fn is_operator(self) -> bool {
        self.is_binary_operator() || self.is_prefix_operator()
    }

    /// Tags that produce a value when evaluated.
    ///
    /// Arrow-function bodies are restricted to these by the rule catalog so
    /// that block-bodied lambdas are never spliced where an expression is
    /// expected.
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Tag::Identifier
                | Tag::NumericLiteral
                | Tag::StringLiteral
                | Tag::ArrayLiteralExpression
                | Tag::ObjectLiteralExpression
                | Tag::ParenthesizedExpression
                | Tag::PropertyAccessExpression
                | Tag::ElementAccessExpression
                | Tag::CallExpression
                | Tag::ArrowFunction
                | Tag::PrefixUnaryExpression
                | Tag::PostfixUnaryExpression
                | Tag::BinaryExpression
                | Tag::ConditionalExpression
        ) || self.is_keyword()
    }

    /// Statement tags.
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            Tag::Block
                | Tag::ExpressionStatement
                | Tag::VariableStatement
                | Tag::FunctionDeclaration
                | Tag::ReturnStatement
                | Tag::IfStatement
                | Tag::ForStatement
                | Tag::BreakStatement
                | Tag::ContinueStatement
                | Tag::EmptyStatement
        )
    }

    /// Source spelling of an operator or keyword token.
    pub const fn token_text(self) -> Option<&'static str> {
        Some(match self {
            Tag::TrueKeyword => "true",
            Tag::FalseKeyword => "false",
            Tag::NullKeyword => "null",
            Tag::ThisKeyword => "this",
            Tag::PlusToken => "+",
            Tag::MinusToken => "-",
            Tag::AsteriskToken => "*",
            Tag::SlashToken => "/",
            Tag::PercentToken => "%",
            Tag::LessThanToken => "<",
            Tag::GreaterThanToken => ">",
            Tag::LessThanEqualsToken => "<=",
            Tag::GreaterThanEqualsToken => ">=",
            Tag::EqualsEqualsToken => "==",
            Tag::EqualsEqualsEqualsToken => "===",
            Tag::ExclamationEqualsToken => "!=",
            Tag::ExclamationEqualsEqualsToken => "!==",
            Tag::AmpersandAmpersandToken => "&&",
            Tag::BarBarToken => "||",
            Tag::AmpersandToken => "&",
            Tag::BarToken => "|",
            Tag::CaretToken => "^",
            Tag::EqualsToken => "=",
            Tag::PlusEqualsToken => "+=",
            Tag::MinusEqualsToken => "-=",
            Tag::AsteriskEqualsToken => "*=",
            Tag::PlusPlusToken => "++",
            Tag::MinusMinusToken => "--",
            Tag::ExclamationToken => "!",
            _ => return None,
        })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
