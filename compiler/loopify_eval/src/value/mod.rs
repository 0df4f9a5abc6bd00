//! Runtime values.
//!
//! Arrays and objects are shared and mutable, like the host language's
//! reference types: cloning a [`Value`] clones the handle, not the contents.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use loopify_ir::Node;

use crate::environment::LocalScope;
use crate::environment::Scope;

/// Shared mutable storage.
pub type Heap<T> = Rc<RefCell<T>>;

/// Built-in functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Native {
    /// `console.log`; appends one line to the interpreter output.
    ConsoleLog,
}

/// A user-defined function and the scope it closes over.
pub struct Closure {
    /// Declared name; `None` for arrows and anonymous function expressions.
    pub name: Option<String>,
    /// `Parameter` nodes, initializers included.
    pub parameters: Vec<Node>,
    /// A `Block`, or the expression body of an arrow function.
    pub body: Node,
    /// Scope the function was created in.
    pub scope: LocalScope<Scope>,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("parameters", &self.parameters.len())
            .finish_non_exhaustive()
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Array(Heap<Vec<Value>>),
    /// Properties in insertion order.
    Object(Heap<Vec<(String, Value)>>),
    Function(Rc<Closure>),
    Native(Native),
}

impl Value {
    pub fn string(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn object(properties: Vec<(String, Value)>) -> Self {
        Value::Object(Rc::new(RefCell::new(properties)))
    }

    /// Host-language truthiness: `0`, `NaN`, `""`, `null` and `undefined` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Native(_) => true,
        }
    }

    /// Numeric coercion as the unary `+` operator performs it.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Undefined
            | Value::Array(_)
            | Value::Object(_)
            | Value::Function(_)
            | Value::Native(_) => f64::NAN,
        }
    }

    /// `typeof`-style name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) | Value::Native(_) => "function",
        }
    }

    /// `===`
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            #[allow(clippy::float_cmp, reason = "host-language equality is exact")]
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a == b,
            _ => false,
        }
    }

    /// `==`
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
            (Value::Number(_), Value::Str(_) | Value::Bool(_))
            | (Value::Str(_) | Value::Bool(_), Value::Number(_))
            | (Value::Bool(_), Value::Str(_))
            | (Value::Str(_), Value::Bool(_)) => {
                Value::Number(self.to_number()).strict_equals(&Value::Number(other.to_number()))
            }
            _ => self.strict_equals(other),
        }
    }

    /// Text for `console.log`: strings bare, nested values inspected.
    pub fn log_text(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            other => other.inspect(),
        }
    }

    fn inspect(&self) -> String {
        match self {
            Value::Str(s) => format!("'{s}'"),
            Value::Array(elements) => {
                let elements = elements.borrow();
                if elements.is_empty() {
                    return "[]".to_owned();
                }
                let parts: Vec<String> = elements.iter().map(Value::inspect).collect();
                format!("[ {} ]", parts.join(", "))
            }
            Value::Object(properties) => {
                let properties = properties.borrow();
                if properties.is_empty() {
                    return "{}".to_owned();
                }
                let parts: Vec<String> = properties
                    .iter()
                    .map(|(key, value)| format!("{key}: {}", value.inspect()))
                    .collect();
                format!("{{ {} }}", parts.join(", "))
            }
            Value::Function(_) | Value::Native(_) => "[Function]".to_owned(),
            other => other.to_string(),
        }
    }
}

/// Host-language string conversion.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write_number(f, *n),
            Value::Str(s) => f.write_str(s),
            Value::Array(elements) => {
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !matches!(element, Value::Undefined | Value::Null) {
                        write!(f, "{element}")?;
                    }
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Function(closure) => match &closure.name {
                Some(name) => write!(f, "function {name}"),
                None => f.write_str("function"),
            },
            Value::Native(_) => f.write_str("function"),
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == n.trunc() && n.abs() < 1e15 {
        #[expect(clippy::cast_possible_truncation, reason = "checked integral and in range")]
        let int = n as i64;
        write!(f, "{int}")
    } else {
        write!(f, "{n}")
    }
}

#[cfg(test)]
mod tests;
