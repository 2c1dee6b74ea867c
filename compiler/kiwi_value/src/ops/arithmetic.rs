//! `+ - * / % **` and unary negation.
//!
//! Integer arithmetic wraps on overflow. Integer/Float pairs widen to
//! Float.

use crate::{Value, ValueError, ValueResult};

#[allow(clippy::cast_precision_loss)]
#[inline]
fn widen(n: i64) -> f64 {
    n as f64
}

/// Addition, tried in this order: integers, floats, mixed numbers,
/// string concatenation, string with anything, list append, anything
/// with string.
pub fn add(left: &Value, right: &Value) -> ValueResult {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_add(*b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(widen(*a) + b)),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a + widen(*b))),
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
        (Value::String(a), other) => Ok(Value::String(format!("{a}{}", other.serialize()))),
        (Value::List(items), other) => {
            let mut combined: Vec<Value> = items.borrow().clone();
            match other {
                Value::List(tail) => combined.extend(tail.borrow().iter().cloned()),
                single => combined.push(single.clone()),
            }
            Ok(Value::list(combined))
        }
        (other, Value::String(b)) => Ok(Value::String(format!("{}{b}", other.serialize()))),
        _ => Err(ValueError::unsupported_operands("add", left, right)),
    }
}

/// Subtraction. On lists, removes the first structurally equal element,
/// or every element equal to any element of a list operand.
pub fn subtract(left: &Value, right: &Value) -> ValueResult {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_sub(*b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a - b)),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(widen(*a) - b)),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a - widen(*b))),
        (Value::List(items), Value::List(removed)) => {
            let removed: Vec<Value> = removed.borrow().clone();
            let kept = items
                .borrow()
                .iter()
                .filter(|item| !removed.contains(item))
                .cloned()
                .collect();
            Ok(Value::list(kept))
        }
        (Value::List(items), other) => {
            let mut kept: Vec<Value> = items.borrow().clone();
            if let Some(at) = kept.iter().position(|item| item == other) {
                kept.remove(at);
            }
            Ok(Value::list(kept))
        }
        _ => Err(ValueError::unsupported_operands("subtract", left, right)),
    }
}

/// Multiplication, string repetition and list repetition.
pub fn multiply(left: &Value, right: &Value) -> ValueResult {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_mul(*b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a * b)),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(widen(*a) * b)),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a * widen(*b))),
        (Value::String(s), Value::Integer(n)) => {
            let count = usize::try_from(*n).map_err(|_| {
                ValueError::syntax("String multiplier must be a non-negative integer.")
            })?;
            repeated_len(s.len(), count, 1)
                .ok_or_else(|| ValueError::range("String repetition is too large."))?;
            Ok(Value::String(s.repeat(count)))
        }
        (Value::List(items), Value::Integer(n)) => {
            let count = usize::try_from(*n)
                .ok()
                .filter(|&c| c > 0)
                .ok_or_else(|| ValueError::syntax("List multiplier must be a positive integer."))?;
            let items = items.borrow();
            if items.is_empty() {
                return Err(ValueError::syntax("Cannot multiply an empty list."));
            }
            let len = repeated_len(items.len(), count, std::mem::size_of::<Value>())
                .ok_or_else(|| ValueError::range("List repetition is too large."))?;
            let mut repeated = Vec::with_capacity(len);
            for _ in 0..count {
                repeated.extend(items.iter().map(Value::deep_clone));
            }
            Ok(Value::list(repeated))
        }
        _ => Err(ValueError::unsupported_operands("multiply", left, right)),
    }
}

/// `len * count` elements, if that many of `element_size` bytes fit in
/// one allocation.
fn repeated_len(len: usize, count: usize, element_size: usize) -> Option<usize> {
    let limit = isize::MAX.unsigned_abs() / element_size.max(1);
    len.checked_mul(count).filter(|&total| total <= limit)
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Integer(n) => *n == 0,
        Value::Float(n) => *n == 0.0,
        _ => false,
    }
}

pub fn divide(left: &Value, right: &Value) -> ValueResult {
    if left.is_numeric() && is_zero(right) {
        return Err(ValueError::divide_by_zero());
    }
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_div(*b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a / b)),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(widen(*a) / b)),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a / widen(*b))),
        _ => Err(ValueError::unsupported_operands("divide", left, right)),
    }
}

pub fn modulus(left: &Value, right: &Value) -> ValueResult {
    if left.is_numeric() && is_zero(right) {
        return Err(ValueError::divide_by_zero());
    }
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_rem(*b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a % b)),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(widen(*a) % b)),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a % widen(*b))),
        _ => Err(ValueError::unsupported_operands("modulus", left, right)),
    }
}

/// Exponentiation. A non-negative integer power of an integer stays an
/// integer; everything else is a float.
pub fn exponent(left: &Value, right: &Value) -> ValueResult {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => match u32::try_from(*b) {
            Ok(power) => Ok(Value::Integer(a.wrapping_pow(power))),
            Err(_) => Ok(Value::Float(widen(*a).powf(widen(*b)))),
        },
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a.powf(*b))),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(widen(*a).powf(*b))),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a.powf(widen(*b)))),
        _ => Err(ValueError::unsupported_operands("exponentiation", left, right)),
    }
}

pub fn negate(operand: &Value) -> ValueResult {
    match operand {
        Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
        Value::Float(n) => Ok(Value::Float(-n)),
        other => Err(ValueError::unsupported_operand("negation", other)),
    }
}
