//! Expression evaluation.

use loopify_ir::stack::ensure_sufficient_stack;
use loopify_ir::{Node, Tag};

use super::{Interpreter, MAX_ARRAY_GAP};
use crate::environment::AssignError;
use crate::value::Value;
use crate::{EvalError, EvalResult};

impl Interpreter {
    /// Evaluate an expression in the current scope.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        ensure_sufficient_stack(|| match node.tag() {
            Tag::Identifier => self.identifier(node),
            Tag::NumericLiteral => Ok(Value::Number(parse_number(node.text().unwrap_or("0")))),
            Tag::StringLiteral => Ok(Value::string(node.text().unwrap_or_default())),
            Tag::TrueKeyword => Ok(Value::Bool(true)),
            Tag::FalseKeyword => Ok(Value::Bool(false)),
            Tag::NullKeyword => Ok(Value::Null),
            Tag::ThisKeyword => Ok(Value::Undefined),
            Tag::ArrayLiteralExpression => {
                let elements = self.eval_all(node.list("elements"))?;
                Ok(Value::array(elements))
            }
            Tag::ObjectLiteralExpression => {
                let mut properties: Vec<(String, Value)> = Vec::new();
                for property in node.list("properties") {
                    let key = property.child("name").and_then(Node::text).unwrap_or_default();
                    let value = match property.child("initializer") {
                        Some(init) => self.eval(init)?,
                        None => Value::Undefined,
                    };
                    match properties.iter_mut().find(|(k, _)| k == key) {
                        Some(slot) => slot.1 = value,
                        None => properties.push((key.to_owned(), value)),
                    }
                }
                Ok(Value::object(properties))
            }
            Tag::ParenthesizedExpression => self.operand(node, "expression"),
            Tag::PropertyAccessExpression => {
                let receiver = self.operand(node, "expression")?;
                let name = property_name(node);
                self.get_property(&receiver, name)
            }
            Tag::ElementAccessExpression => {
                let receiver = self.operand(node, "expression")?;
                let index = self.operand(node, "argument_expression")?;
                self.get_element(&receiver, &index)
            }
            Tag::CallExpression => self.call_expression(node),
            Tag::ArrowFunction => match node.child("body") {
                Some(body) => Ok(self.closure(None, node.list("parameters"), body)),
                None => Err(EvalError::Unsupported(node.tag())),
            },
            Tag::PrefixUnaryExpression => self.prefix(node),
            Tag::PostfixUnaryExpression => {
                let operand = node.child("operand").ok_or(EvalError::InvalidAssignmentTarget)?;
                let old = self.eval(operand)?.to_number();
                let delta = match node.child("operator_token").map(Node::tag) {
                    Some(Tag::MinusMinusToken) => -1.0,
                    _ => 1.0,
                };
                self.assign(operand, Value::Number(old + delta))?;
                Ok(Value::Number(old))
            }
            Tag::BinaryExpression => self.binary(node),
            Tag::ConditionalExpression => {
                if self.operand(node, "condition")?.is_truthy() {
                    self.operand(node, "when_true")
                } else {
                    self.operand(node, "when_false")
                }
            }
            Tag::Error => Err(EvalError::Syntax(node.text().unwrap_or_default().to_owned())),
            tag => Err(EvalError::Unsupported(tag)),
        })
    }

    fn eval_all(&mut self, nodes: &[Node]) -> EvalResult<Vec<Value>> {
        nodes.iter().map(|node| self.eval(node)).collect()
    }

    fn operand(&mut self, node: &Node, field: &str) -> EvalResult<Value> {
        match node.child(field) {
            Some(child) => self.eval(child),
            None => Ok(Value::Undefined),
        }
    }

    fn identifier(&mut self, node: &Node) -> EvalResult<Value> {
        let name = node.identifier().unwrap_or_default();
        match self.env.lookup(name) {
            Some(value) => Ok(value),
            None if name == "undefined" => Ok(Value::Undefined),
            None => Err(EvalError::UndefinedVariable(name.to_owned())),
        }
    }

    fn call_expression(&mut self, node: &Node) -> EvalResult<Value> {
        let callee = node.child("expression").ok_or(EvalError::Unsupported(node.tag()))?;
        if callee.tag() == Tag::PropertyAccessExpression {
            let receiver = self.operand(callee, "expression")?;
            let method = property_name(callee);
            let arguments = self.eval_all(node.list("arguments"))?;
            return self.call_method(&receiver, method, arguments);
        }
        let function = self.eval(callee)?;
        let arguments = self.eval_all(node.list("arguments"))?;
        match function {
            Value::Function(_) | Value::Native(_) => self.call(&function, arguments),
            _ => Err(EvalError::NotCallable(describe(callee))),
        }
    }

    pub(crate) fn get_property(&self, receiver: &Value, name: &str) -> EvalResult<Value> {
        match receiver {
            Value::Undefined | Value::Null => Err(EvalError::NoProperty {
                property: name.to_owned(),
                receiver: receiver.to_string(),
            }),
            Value::Array(elements) if name == "length" => {
                Ok(Value::Number(length(elements.borrow().len())))
            }
            Value::Str(s) if name == "length" => Ok(Value::Number(length(s.chars().count()))),
            Value::Object(properties) => Ok(properties
                .borrow()
                .iter()
                .find(|(key, _)| key == name)
                .map_or(Value::Undefined, |(_, value)| value.clone())),
            _ => Ok(Value::Undefined),
        }
    }

    fn get_element(&self, receiver: &Value, index: &Value) -> EvalResult<Value> {
        match (receiver, index) {
            (Value::Array(elements), Value::Number(n)) => Ok(array_index(*n)
                .and_then(|i| elements.borrow().get(i).cloned())
                .unwrap_or(Value::Undefined)),
            (Value::Str(s), Value::Number(n)) => Ok(array_index(*n)
                .and_then(|i| s.chars().nth(i))
                .map_or(Value::Undefined, |c| Value::string(c.encode_utf8(&mut [0; 4])))),
            _ => self.get_property(receiver, &index.to_string()),
        }
    }

    fn prefix(&mut self, node: &Node) -> EvalResult<Value> {
        let operand = node.child("operand").ok_or(EvalError::InvalidAssignmentTarget)?;
        match node.child("operator_token").map(Node::tag) {
            Some(Tag::ExclamationToken) => Ok(Value::Bool(!self.eval(operand)?.is_truthy())),
            Some(Tag::MinusToken) => Ok(Value::Number(-self.eval(operand)?.to_number())),
            Some(Tag::PlusToken) => Ok(Value::Number(self.eval(operand)?.to_number())),
            Some(op @ (Tag::PlusPlusToken | Tag::MinusMinusToken)) => {
                let delta = if op == Tag::PlusPlusToken { 1.0 } else { -1.0 };
                let value = Value::Number(self.eval(operand)?.to_number() + delta);
                self.assign(operand, value.clone())?;
                Ok(value)
            }
            _ => Err(EvalError::Unsupported(node.tag())),
        }
    }

    fn binary(&mut self, node: &Node) -> EvalResult<Value> {
        let op = node
            .child("operator_token")
            .map(Node::tag)
            .ok_or(EvalError::Unsupported(node.tag()))?;
        let left = node.child("left").ok_or(EvalError::Unsupported(node.tag()))?;

        match op {
            Tag::EqualsToken => {
                let value = self.operand(node, "right")?;
                self.assign(left, value.clone())?;
                return Ok(value);
            }
            Tag::PlusEqualsToken | Tag::MinusEqualsToken | Tag::AsteriskEqualsToken => {
                let current = self.eval(left)?;
                let right = self.operand(node, "right")?;
                let arithmetic = match op {
                    Tag::PlusEqualsToken => Tag::PlusToken,
                    Tag::MinusEqualsToken => Tag::MinusToken,
                    _ => Tag::AsteriskToken,
                };
                let value = arithmetic_op(arithmetic, &current, &right);
                self.assign(left, value.clone())?;
                return Ok(value);
            }
            Tag::AmpersandAmpersandToken => {
                let left = self.eval(left)?;
                return if left.is_truthy() { self.operand(node, "right") } else { Ok(left) };
            }
            Tag::BarBarToken => {
                let left = self.eval(left)?;
                return if left.is_truthy() { Ok(left) } else { self.operand(node, "right") };
            }
            _ => {}
        }

        let left = self.eval(left)?;
        let right = self.operand(node, "right")?;
        Ok(match op {
            Tag::EqualsEqualsEqualsToken => Value::Bool(left.strict_equals(&right)),
            Tag::ExclamationEqualsEqualsToken => Value::Bool(!left.strict_equals(&right)),
            Tag::EqualsEqualsToken => Value::Bool(left.loose_equals(&right)),
            Tag::ExclamationEqualsToken => Value::Bool(!left.loose_equals(&right)),
            Tag::LessThanToken
            | Tag::GreaterThanToken
            | Tag::LessThanEqualsToken
            | Tag::GreaterThanEqualsToken => Value::Bool(compare(op, &left, &right)),
            _ => arithmetic_op(op, &left, &right),
        })
    }

    /// Store `value` into an assignment target.
    pub(crate) fn assign(&mut self, target: &Node, value: Value) -> EvalResult<()> {
        match target.tag() {
            Tag::Identifier => {
                let name = target.identifier().unwrap_or_default();
                self.env.assign(name, value).map_err(|error| match error {
                    AssignError::Immutable => EvalError::AssignToConstant(name.to_owned()),
                    AssignError::Undefined => EvalError::UndefinedVariable(name.to_owned()),
                })
            }
            Tag::ParenthesizedExpression => match target.child("expression") {
                Some(inner) => self.assign(inner, value),
                None => Err(EvalError::InvalidAssignmentTarget),
            },
            Tag::PropertyAccessExpression => {
                let receiver = self.operand(target, "expression")?;
                set_property(&receiver, property_name(target), value)
            }
            Tag::ElementAccessExpression => {
                let receiver = self.operand(target, "expression")?;
                let index = self.operand(target, "argument_expression")?;
                match (&receiver, &index) {
                    (Value::Array(elements), Value::Number(n)) => {
                        let i = array_index(*n).ok_or(EvalError::InvalidAssignmentTarget)?;
                        let mut elements = elements.borrow_mut();
                        if i >= elements.len() {
                            if i - elements.len() > MAX_ARRAY_GAP {
                                return Err(EvalError::SparseAssignment {
                                    index: i,
                                    len: elements.len(),
                                });
                            }
                            elements.resize(i + 1, Value::Undefined);
                        }
                        elements[i] = value;
                        Ok(())
                    }
                    _ => set_property(&receiver, &index.to_string(), value),
                }
            }
            _ => Err(EvalError::InvalidAssignmentTarget),
        }
    }
}

fn set_property(receiver: &Value, name: &str, value: Value) -> EvalResult<()> {
    let Value::Object(properties) = receiver else {
        return Err(EvalError::InvalidAssignmentTarget);
    };
    let mut properties = properties.borrow_mut();
    match properties.iter_mut().find(|(key, _)| key == name) {
        Some(slot) => slot.1 = value,
        None => properties.push((name.to_owned(), value)),
    }
    Ok(())
}

fn property_name(access: &Node) -> &str {
    access.child("name").and_then(Node::text).unwrap_or_default()
}

/// Source-like description of a callee, for error messages.
fn describe(callee: &Node) -> String {
    match callee.tag() {
        Tag::Identifier => callee.identifier().unwrap_or_default().to_owned(),
        Tag::PropertyAccessExpression => {
            let receiver = callee.child("expression").map_or_else(String::new, describe);
            format!("{receiver}.{}", property_name(callee))
        }
        tag => tag.name().to_owned(),
    }
}

pub(crate) fn parse_number(text: &str) -> f64 {
    let text = text.replace('_', "");
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    text.parse().unwrap_or(f64::NAN)
}

/// `n` as an array index, if it is a non-negative integer.
pub(crate) fn array_index(n: f64) -> Option<usize> {
    if n >= 0.0 && n.fract() == 0.0 && n < 4_294_967_295.0 {
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "range checked")]
        let index = n as usize;
        Some(index)
    } else {
        None
    }
}

#[expect(clippy::cast_precision_loss, reason = "array lengths stay far below 2^53")]
pub(crate) fn length(n: usize) -> f64 {
    n as f64
}

fn compare(op: Tag, left: &Value, right: &Value) -> bool {
    if let (Value::Str(a), Value::Str(b)) = (left, right) {
        return match op {
            Tag::LessThanToken => a < b,
            Tag::GreaterThanToken => a > b,
            Tag::LessThanEqualsToken => a <= b,
            _ => a >= b,
        };
    }
    let (a, b) = (left.to_number(), right.to_number());
    match op {
        Tag::LessThanToken => a < b,
        Tag::GreaterThanToken => a > b,
        Tag::LessThanEqualsToken => a <= b,
        _ => a >= b,
    }
}

fn arithmetic_op(op: Tag, left: &Value, right: &Value) -> Value {
    if op == Tag::PlusToken {
        if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
            return Value::string(&format!("{left}{right}"));
        }
        if matches!(left, Value::Array(_) | Value::Object(_))
            || matches!(right, Value::Array(_) | Value::Object(_))
        {
            return Value::string(&format!("{left}{right}"));
        }
    }
    let (a, b) = (left.to_number(), right.to_number());
    Value::Number(match op {
        Tag::PlusToken => a + b,
        Tag::MinusToken => a - b,
        Tag::AsteriskToken => a * b,
        Tag::SlashToken => a / b,
        Tag::PercentToken => a % b,
        Tag::AmpersandToken => f64::from(to_int32(a) & to_int32(b)),
        Tag::BarToken => f64::from(to_int32(a) | to_int32(b)),
        Tag::CaretToken => f64::from(to_int32(a) ^ to_int32(b)),
        _ => f64::NAN,
    })
}

/// Host-language `ToInt32`.
fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    #[expect(clippy::cast_possible_truncation, reason = "wrapping is the intent")]
    let wrapped = ((n.trunc() % 4_294_967_296.0) as i64) as i32;
    wrapped
}
