//! Built-in methods of sequences and strings.
//!
//! Callback-taking methods visit the elements the sequence held when the
//! call began. No borrow of the sequence is held while a callback runs, so
//! callbacks may push to it.

use super::expr::{array_index, length};
use super::Interpreter;
use crate::value::{Heap, Value};
use crate::{EvalError, EvalResult};

impl Interpreter {
    /// `receiver.method(arguments)`.
    pub(crate) fn call_method(
        &mut self,
        receiver: &Value,
        method: &str,
        arguments: Vec<Value>,
    ) -> EvalResult<Value> {
        match receiver {
            Value::Array(elements) => {
                if let Some(result) = self.array_method(elements, method, &arguments)? {
                    return Ok(result);
                }
            }
            Value::Str(text) => {
                if let Some(result) = string_method(text, method, &arguments) {
                    return Ok(result);
                }
            }
            _ => {}
        }
        let function = self.get_property(receiver, method)?;
        match function {
            Value::Function(_) | Value::Native(_) => self.call(&function, arguments),
            _ => Err(EvalError::NotCallable(format!("{}.{method}", receiver.type_name()))),
        }
    }

    /// `Ok(None)` when `method` is not a sequence method.
    fn array_method(
        &mut self,
        elements: &Heap<Vec<Value>>,
        method: &str,
        arguments: &[Value],
    ) -> EvalResult<Option<Value>> {
        let array = Value::Array(elements.clone());
        let argument = |i: usize| arguments.get(i).cloned().unwrap_or(Value::Undefined);
        let result = match method {
            "push" => {
                let mut elements = elements.borrow_mut();
                elements.extend(arguments.iter().cloned());
                Value::Number(length(elements.len()))
            }
            "pop" => elements.borrow_mut().pop().unwrap_or(Value::Undefined),
            "shift" => {
                let mut elements = elements.borrow_mut();
                if elements.is_empty() {
                    Value::Undefined
                } else {
                    elements.remove(0)
                }
            }
            "map" => {
                let callback = argument(0);
                let mut mapped = Vec::new();
                for (i, element) in snapshot(elements) {
                    mapped.push(self.call_back(&callback, element, i, &array)?);
                }
                Value::array(mapped)
            }
            "filter" => {
                let callback = argument(0);
                let mut kept = Vec::new();
                for (i, element) in snapshot(elements) {
                    if self.call_back(&callback, element.clone(), i, &array)?.is_truthy() {
                        kept.push(element);
                    }
                }
                Value::array(kept)
            }
            "forEach" => {
                let callback = argument(0);
                for (i, element) in snapshot(elements) {
                    self.call_back(&callback, element, i, &array)?;
                }
                Value::Undefined
            }
            "find" | "findIndex" => {
                let callback = argument(0);
                let mut found = None;
                for (i, element) in snapshot(elements) {
                    if self.call_back(&callback, element.clone(), i, &array)?.is_truthy() {
                        found = Some((i, element));
                        break;
                    }
                }
                match (method, found) {
                    ("find", found) => found.map_or(Value::Undefined, |(_, element)| element),
                    (_, Some((i, _))) => Value::Number(length(i)),
                    (_, None) => Value::Number(-1.0),
                }
            }
            "some" | "every" => {
                let callback = argument(0);
                let wanted = method == "some";
                let mut result = !wanted;
                for (i, element) in snapshot(elements) {
                    if self.call_back(&callback, element, i, &array)?.is_truthy() == wanted {
                        result = wanted;
                        break;
                    }
                }
                Value::Bool(result)
            }
            "reduce" => {
                let callback = argument(0);
                let mut items = snapshot(elements).into_iter();
                let mut accumulator = match arguments.get(1) {
                    Some(initial) => initial.clone(),
                    None => items.next().map(|(_, first)| first).ok_or(EvalError::ReduceOfEmpty)?,
                };
                for (i, element) in items {
                    let index = Value::Number(length(i));
                    accumulator =
                        self.call(&callback, vec![accumulator, element, index, array.clone()])?;
                }
                accumulator
            }
            "join" => {
                let separator = match arguments.first() {
                    None | Some(Value::Undefined) => ",".to_owned(),
                    Some(separator) => separator.to_string(),
                };
                let parts: Vec<String> = elements
                    .borrow()
                    .iter()
                    .map(|element| match element {
                        Value::Undefined | Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect();
                Value::string(&parts.join(&separator))
            }
            "slice" => {
                let elements = elements.borrow();
                let (start, end) = slice_bounds(elements.len(), &argument(0), &argument(1));
                Value::array(elements[start..end].to_vec())
            }
            "concat" => {
                let mut joined = elements.borrow().clone();
                for argument in arguments {
                    match argument {
                        Value::Array(other) => joined.extend(other.borrow().iter().cloned()),
                        other => joined.push(other.clone()),
                    }
                }
                Value::array(joined)
            }
            "indexOf" => {
                let target = argument(0);
                let position = elements.borrow().iter().position(|e| e.strict_equals(&target));
                Value::Number(position.map_or(-1.0, length))
            }
            "includes" => {
                let target = argument(0);
                let nan = matches!(target, Value::Number(n) if n.is_nan());
                let found = elements.borrow().iter().any(|e| {
                    e.strict_equals(&target) || (nan && matches!(e, Value::Number(n) if n.is_nan()))
                });
                Value::Bool(found)
            }
            "reverse" => {
                elements.borrow_mut().reverse();
                array
            }
            _ => return Ok(None),
        };
        Ok(Some(result))
    }

    /// `callback(element, index, array)`.
    fn call_back(
        &mut self,
        callback: &Value,
        element: Value,
        index: usize,
        array: &Value,
    ) -> EvalResult<Value> {
        let index = Value::Number(length(index));
        self.call(callback, vec![element, index, array.clone()])
    }
}

fn snapshot(elements: &Heap<Vec<Value>>) -> Vec<(usize, Value)> {
    elements.borrow().iter().cloned().enumerate().collect()
}

fn string_method(text: &str, method: &str, arguments: &[Value]) -> Option<Value> {
    let argument = |i: usize| arguments.get(i).cloned().unwrap_or(Value::Undefined);
    Some(match method {
        "toUpperCase" => Value::string(&text.to_uppercase()),
        "toLowerCase" => Value::string(&text.to_lowercase()),
        "trim" => Value::string(text.trim()),
        "includes" => Value::Bool(text.contains(argument(0).to_string().as_str())),
        "startsWith" => Value::Bool(text.starts_with(argument(0).to_string().as_str())),
        "slice" => {
            let chars: Vec<char> = text.chars().collect();
            let (start, end) = slice_bounds(chars.len(), &argument(0), &argument(1));
            Value::string(&chars[start..end].iter().collect::<String>())
        }
        _ => return None,
    })
}

/// Resolve `slice(start, end)` arguments against `len`, counting negative
/// positions from the end.
fn slice_bounds(len: usize, start: &Value, end: &Value) -> (usize, usize) {
    let resolve = |value: &Value, default: usize| -> usize {
        if matches!(value, Value::Undefined) {
            return default;
        }
        let n = value.to_number().trunc();
        if n.is_nan() {
            return 0;
        }
        let position = if n < 0.0 { length(len) + n } else { n };
        array_index(position.max(0.0)).map_or(len, |i| i.min(len))
    };
    let start = resolve(start, 0);
    let end = resolve(end, len);
    (start, end.max(start))
}
