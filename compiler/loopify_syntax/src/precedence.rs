//! Operator precedence shared by the parser and the printer.

use loopify_ir::Tag;

use crate::lexer::TokenKind;

/// Binding strength of an expression form. Higher binds tighter.
pub type Precedence = u8;

pub const ASSIGNMENT: Precedence = 1;
pub const CONDITIONAL: Precedence = 2;
pub const LOGICAL_OR: Precedence = 3;
pub const LOGICAL_AND: Precedence = 4;
pub const BIT_OR: Precedence = 5;
pub const BIT_XOR: Precedence = 6;
pub const BIT_AND: Precedence = 7;
pub const EQUALITY: Precedence = 8;
pub const RELATIONAL: Precedence = 9;
pub const ADDITIVE: Precedence = 10;
pub const MULTIPLICATIVE: Precedence = 11;
pub const PREFIX: Precedence = 12;
pub const POSTFIX: Precedence = 13;
pub const MEMBER: Precedence = 14;
pub const PRIMARY: Precedence = 15;

/// Precedence of a binary operator tag.
pub fn binary(op: Tag) -> Precedence {
    match op {
        Tag::BarBarToken => LOGICAL_OR,
        Tag::AmpersandAmpersandToken => LOGICAL_AND,
        Tag::BarToken => BIT_OR,
        Tag::CaretToken => BIT_XOR,
        Tag::AmpersandToken => BIT_AND,
        Tag::EqualsEqualsToken
        | Tag::EqualsEqualsEqualsToken
        | Tag::ExclamationEqualsToken
        | Tag::ExclamationEqualsEqualsToken => EQUALITY,
        Tag::LessThanToken
        | Tag::GreaterThanToken
        | Tag::LessThanEqualsToken
        | Tag::GreaterThanEqualsToken => RELATIONAL,
        Tag::PlusToken | Tag::MinusToken => ADDITIVE,
        Tag::AsteriskToken | Tag::SlashToken | Tag::PercentToken => MULTIPLICATIVE,
        _ => ASSIGNMENT,
    }
}

/// Binary (non-assignment) operator spelled by `kind`.
pub(crate) fn binary_operator(kind: TokenKind) -> Option<Tag> {
    Some(match kind {
        TokenKind::PipePipe => Tag::BarBarToken,
        TokenKind::AmpAmp => Tag::AmpersandAmpersandToken,
        TokenKind::Pipe => Tag::BarToken,
        TokenKind::Caret => Tag::CaretToken,
        TokenKind::Amp => Tag::AmpersandToken,
        TokenKind::EqEq => Tag::EqualsEqualsToken,
        TokenKind::EqEqEq => Tag::EqualsEqualsEqualsToken,
        TokenKind::NotEq => Tag::ExclamationEqualsToken,
        TokenKind::NotEqEq => Tag::ExclamationEqualsEqualsToken,
        TokenKind::Lt => Tag::LessThanToken,
        TokenKind::Gt => Tag::GreaterThanToken,
        TokenKind::LtEq => Tag::LessThanEqualsToken,
        TokenKind::GtEq => Tag::GreaterThanEqualsToken,
        TokenKind::Plus => Tag::PlusToken,
        TokenKind::Minus => Tag::MinusToken,
        TokenKind::Star => Tag::AsteriskToken,
        TokenKind::Slash => Tag::SlashToken,
        TokenKind::Percent => Tag::PercentToken,
        _ => return None,
    })
}

pub(crate) fn assignment_operator(kind: TokenKind) -> Option<Tag> {
    Some(match kind {
        TokenKind::Eq => Tag::EqualsToken,
        TokenKind::PlusEq => Tag::PlusEqualsToken,
        TokenKind::MinusEq => Tag::MinusEqualsToken,
        TokenKind::StarEq => Tag::AsteriskEqualsToken,
        _ => return None,
    })
}

pub(crate) fn prefix_operator(kind: TokenKind) -> Option<Tag> {
    Some(match kind {
        TokenKind::Bang => Tag::ExclamationToken,
        TokenKind::Minus => Tag::MinusToken,
        TokenKind::Plus => Tag::PlusToken,
        TokenKind::PlusPlus => Tag::PlusPlusToken,
        TokenKind::MinusMinus => Tag::MinusMinusToken,
        _ => return None,
    })
}

pub(crate) fn postfix_operator(kind: TokenKind) -> Option<Tag> {
    Some(match kind {
        TokenKind::PlusPlus => Tag::PlusPlusToken,
        TokenKind::MinusMinus => Tag::MinusMinusToken,
        _ => return None,
    })
}
