//! `& | ^ ~ << >> >>>`.

use crate::{Value, ValueError, ValueResult};

/// Right operand of `&`, `|` and `^`: integers as-is, floats truncated
/// toward zero, booleans as 0 or 1.
#[allow(clippy::cast_possible_truncation)]
fn bit_operand(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(n) => Some(*n),
        Value::Float(n) => Some(n.trunc() as i64),
        Value::Boolean(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn bitwise(
    name: &str,
    left: &Value,
    right: &Value,
    apply: impl FnOnce(i64, i64) -> i64,
) -> ValueResult {
    match (left, bit_operand(right)) {
        (Value::Integer(a), Some(b)) => Ok(Value::Integer(apply(*a, b))),
        _ => Err(ValueError::unsupported_operands(name, left, right)),
    }
}

pub fn bit_and(left: &Value, right: &Value) -> ValueResult {
    bitwise("bitwise and", left, right, |a, b| a & b)
}

pub fn bit_or(left: &Value, right: &Value) -> ValueResult {
    bitwise("bitwise or", left, right, |a, b| a | b)
}

pub fn bit_xor(left: &Value, right: &Value) -> ValueResult {
    bitwise("bitwise xor", left, right, |a, b| a ^ b)
}

pub fn bit_not(operand: &Value) -> ValueResult {
    match operand {
        Value::Integer(n) => Ok(Value::Integer(!n)),
        other => Err(ValueError::unsupported_operand("bitwise not", other)),
    }
}

/// Shift amounts are taken modulo 64.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shift_amount(n: i64) -> u32 {
    (n & 63) as u32
}

pub fn shift_left(left: &Value, right: &Value) -> ValueResult {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_shl(shift_amount(*b)))),
        _ => Err(ValueError::unsupported_operands("left shift", left, right)),
    }
}

pub fn shift_right(left: &Value, right: &Value) -> ValueResult {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_shr(shift_amount(*b)))),
        _ => Err(ValueError::unsupported_operands("right shift", left, right)),
    }
}

/// `>>>` works on the low 32 bits of the left operand. Shifts of 32 or
/// more give 0; otherwise the 32-bit result is reinterpreted as signed.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn unsigned_shift_right(left: &Value, right: &Value) -> ValueResult {
    match (left, right) {
        (Value::Integer(_), Value::Integer(b)) if *b >= 32 => Ok(Value::Integer(0)),
        (Value::Integer(a), Value::Integer(b)) => {
            let low = *a as u32;
            let shift = (*b & 31) as u32;
            Ok(Value::Integer(i64::from((low >> shift) as i32)))
        }
        _ => Err(ValueError::unsupported_operands("unsigned right shift", left, right)),
    }
}
