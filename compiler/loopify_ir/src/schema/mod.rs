//! Per-tag field schema registry.
//!
//! The schema is authored data: for every [`Tag`] it lists the ordered field
//! descriptors a node of that tag carries. Nothing is derived at runtime from
//! constructor signatures; the matcher, the instantiator and the printer all
//! read the same tables.
//!
//! # Aliases
//!
//! Some rule catalogs address fields by legacy names. The alias table maps
//! those onto the canonical names:
//!
//! | Alias      | Canonical             |
//! |------------|-----------------------|
//! | `value`    | `text`                |
//! | `operator` | `operator_token`      |
//! | `index`    | `argument_expression` |

use std::sync::OnceLock;

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::{IrError, Node, Tag, Value};

bitflags! {
    /// Per-field properties.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u8 {
        /// The field may be absent on a concrete node.
        const OPTIONAL = 1 << 0;
        /// The field names something (a property key) rather than referring
        /// to a binding, so identifier substitution skips it.
        const LABEL = 1 << 1;
    }
}

/// Shape of a field's value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Scalar text (identifier name, literal spelling, declaration keyword).
    Text,
    /// A single child node.
    Node,
    /// An ordered sequence of child nodes.
    List,
}

impl FieldKind {
    pub const fn describe(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Node => "node",
            FieldKind::List => "node list",
        }
    }

    /// Whether `value` has this shape.
    pub fn admits(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (FieldKind::Text, Value::Text(_))
                | (FieldKind::Node, Value::Node(_))
                | (FieldKind::List, Value::List(_))
        )
    }
}

/// Field descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDesc {
    pub name: &'static str,
    pub kind: FieldKind,
    pub flags: FieldFlags,
}

impl FieldDesc {
    const fn text(name: &'static str) -> Self {
        FieldDesc {
            name,
            kind: FieldKind::Text,
            flags: FieldFlags::empty(),
        }
    }

    const fn node(name: &'static str) -> Self {
        FieldDesc {
            name,
            kind: FieldKind::Node,
            flags: FieldFlags::empty(),
        }
    }

    const fn list(name: &'static str) -> Self {
        FieldDesc {
            name,
            kind: FieldKind::List,
            flags: FieldFlags::empty(),
        }
    }

    const fn optional(self) -> Self {
        FieldDesc {
            flags: self.flags.union(FieldFlags::OPTIONAL),
            ..self
        }
    }

    const fn label(self) -> Self {
        FieldDesc {
            flags: self.flags.union(FieldFlags::LABEL),
            ..self
        }
    }

    #[inline]
    pub const fn is_optional(&self) -> bool {
        self.flags.contains(FieldFlags::OPTIONAL)
    }

    #[inline]
    pub const fn is_label(&self) -> bool {
        self.flags.contains(FieldFlags::LABEL)
    }
}

static ABSENT: Value = Value::Absent;

const TEXT: &[FieldDesc] = &[FieldDesc::text("text")];
const NONE: &[FieldDesc] = &[];
const ELEMENTS: &[FieldDesc] = &[FieldDesc::list("elements")];
const PROPERTIES: &[FieldDesc] = &[FieldDesc::list("properties")];
const PROPERTY_ASSIGNMENT: &[FieldDesc] = &[
    FieldDesc::node("name").label(),
    FieldDesc::node("initializer"),
];
const EXPRESSION: &[FieldDesc] = &[FieldDesc::node("expression")];
const PROPERTY_ACCESS: &[FieldDesc] = &[
    FieldDesc::node("expression"),
    FieldDesc::node("name").label(),
];
const ELEMENT_ACCESS: &[FieldDesc] = &[
    FieldDesc::node("expression"),
    FieldDesc::node("argument_expression"),
];
const CALL: &[FieldDesc] = &[FieldDesc::node("expression"), FieldDesc::list("arguments")];
const ARROW: &[FieldDesc] = &[FieldDesc::list("parameters"), FieldDesc::node("body")];
const BINDING: &[FieldDesc] = &[
    FieldDesc::node("name"),
    FieldDesc::node("initializer").optional(),
];
const PREFIX: &[FieldDesc] = &[
    FieldDesc::node("operator_token"),
    FieldDesc::node("operand"),
];
const POSTFIX: &[FieldDesc] = &[
    FieldDesc::node("operand"),
    FieldDesc::node("operator_token"),
];
const BINARY: &[FieldDesc] = &[
    FieldDesc::node("left"),
    FieldDesc::node("operator_token"),
    FieldDesc::node("right"),
];
const CONDITIONAL: &[FieldDesc] = &[
    FieldDesc::node("condition"),
    FieldDesc::node("when_true"),
    FieldDesc::node("when_false"),
];
const STATEMENTS: &[FieldDesc] = &[FieldDesc::list("statements")];
const VARIABLE_STATEMENT: &[FieldDesc] = &[FieldDesc::node("declaration_list")];
const DECLARATION_LIST: &[FieldDesc] = &[FieldDesc::text("flags"), FieldDesc::list("declarations")];
const FUNCTION: &[FieldDesc] = &[
    FieldDesc::node("name"),
    FieldDesc::list("parameters"),
    FieldDesc::node("body"),
];
const RETURN: &[FieldDesc] = &[FieldDesc::node("expression").optional()];
const IF: &[FieldDesc] = &[
    FieldDesc::node("expression"),
    FieldDesc::node("then_statement"),
    FieldDesc::node("else_statement").optional(),
];
const FOR: &[FieldDesc] = &[
    FieldDesc::node("initializer").optional(),
    FieldDesc::node("condition").optional(),
    FieldDesc::node("incrementor").optional(),
    FieldDesc::node("statement"),
];

/// The standard field table for `tag`.
///
/// Field order is significant: it is the order values are passed to
/// constructors, the order the printer and the rewrite driver visit children
/// in, and the order identifiers are collected in for hygiene.
pub const fn standard_fields(tag: Tag) -> &'static [FieldDesc] {
    match tag {
        Tag::Identifier | Tag::NumericLiteral | Tag::StringLiteral | Tag::Error => TEXT,
        Tag::ArrayLiteralExpression => ELEMENTS,
        Tag::ObjectLiteralExpression => PROPERTIES,
        Tag::PropertyAssignment => PROPERTY_ASSIGNMENT,
        Tag::ParenthesizedExpression | Tag::ExpressionStatement => EXPRESSION,
        Tag::PropertyAccessExpression => PROPERTY_ACCESS,
        Tag::ElementAccessExpression => ELEMENT_ACCESS,
        Tag::CallExpression => CALL,
        Tag::ArrowFunction => ARROW,
        Tag::Parameter | Tag::VariableDeclaration => BINDING,
        Tag::PrefixUnaryExpression => PREFIX,
        Tag::PostfixUnaryExpression => POSTFIX,
        Tag::BinaryExpression => BINARY,
        Tag::ConditionalExpression => CONDITIONAL,
        Tag::Block | Tag::SourceFile => STATEMENTS,
        Tag::VariableStatement => VARIABLE_STATEMENT,
        Tag::VariableDeclarationList => DECLARATION_LIST,
        Tag::FunctionDeclaration => FUNCTION,
        Tag::ReturnStatement => RETURN,
        Tag::IfStatement => IF,
        Tag::ForStatement => FOR,
        Tag::TrueKeyword
        | Tag::FalseKeyword
        | Tag::NullKeyword
        | Tag::ThisKeyword
        | Tag::PlusToken
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
        | Tag::EqualsToken
        | Tag::PlusEqualsToken
        | Tag::MinusEqualsToken
        | Tag::AsteriskEqualsToken
        | Tag::PlusPlusToken
        | Tag::MinusMinusToken
        | Tag::ExclamationToken
        | Tag::BreakStatement
        | Tag::ContinueStatement
        | Tag::EmptyStatement => NONE,
    }
}

/// Legacy field spellings accepted by the registry.
pub const FIELD_ALIASES: &[(&str, &str)] = &[
    ("value", "text"),
    ("operator", "operator_token"),
    ("index", "argument_expression"),
];

/// Schema registry.
///
/// [`Schema::standard`] registers every tag with its standard table and the
/// standard aliases. [`Schema::builder`] starts from an empty registry, which
/// is how a host embedding only part of the language declares the subset it
/// supports; lookups for anything else fail with [`IrError::UnknownTag`].
#[derive(Clone, Debug, Default)]
pub struct Schema {
    tables: FxHashMap<Tag, &'static [FieldDesc]>,
    aliases: FxHashMap<&'static str, &'static str>,
}

impl Schema {
    /// The full registry, built once per process.
    pub fn standard() -> &'static Schema {
        static STANDARD: OnceLock<Schema> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let mut builder = Schema::builder();
            for tag in Tag::ALL {
                builder = builder.register(tag);
            }
            for &(alias, canonical) in FIELD_ALIASES {
                builder = builder.alias(alias, canonical);
            }
            builder.build()
        })
    }

    /// Start an empty registry.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder {
            schema: Schema::default(),
        }
    }

    pub fn is_registered(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    /// Ordered field descriptors for `tag`.
    pub fn fields_of(&self, tag: Tag) -> Result<&'static [FieldDesc], IrError> {
        self.tables
            .get(&tag)
            .copied()
            .ok_or_else(|| IrError::UnknownTag(tag.name().to_owned()))
    }

    /// Canonical spelling of a field name.
    pub fn canonical<'a>(&self, field: &'a str) -> &'a str {
        self.aliases.get(field).copied().unwrap_or(field)
    }

    /// Position of `field` within `tag`'s table.
    ///
    /// The name is tried as written first and through the alias table second.
    pub fn field_index(&self, tag: Tag, field: &str) -> Result<usize, IrError> {
        let fields = self.fields_of(tag)?;
        let position = |name: &str| fields.iter().position(|desc| desc.name == name);
        position(field)
            .or_else(|| position(self.canonical(field)))
            .ok_or_else(|| IrError::NoSuchField {
                tag,
                field: field.to_owned(),
            })
    }

    /// Read a field of a concrete node.
    ///
    /// Absent optional fields yield [`Value::Absent`]; an absent required field
    /// is [`IrError::MissingField`].
    pub fn get<'n>(&self, node: &'n Node, field: &str) -> Result<&'n Value, IrError> {
        let index = self.field_index(node.tag(), field)?;
        let desc = self.fields_of(node.tag())?[index];
        match node.fields().get(index) {
            Some(Value::Absent) | None if !desc.is_optional() => Err(IrError::MissingField {
                tag: node.tag(),
                field: desc.name,
            }),
            Some(value) => Ok(value),
            None => Ok(&ABSENT),
        }
    }
}

/// Incremental construction of a [`Schema`].
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Register `tag` with its standard field table.
    #[must_use]
    pub fn register(mut self, tag: Tag) -> Self {
        self.schema.tables.insert(tag, standard_fields(tag));
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: &'static str, canonical: &'static str) -> Self {
        self.schema.aliases.insert(alias, canonical);
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}
