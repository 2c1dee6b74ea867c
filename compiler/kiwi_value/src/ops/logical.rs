//! `&& || ! ??` over truthiness.

use crate::Value;

/// `left && right`. With `do_assign` the result is also stored into
/// `left`, which is how `&&=` mutates its target.
pub fn logical_and(left: &mut Value, right: &Value, do_assign: bool) -> Value {
    let result = Value::Boolean(left.is_truthy() && right.is_truthy());
    if do_assign {
        *left = result.clone();
    }
    result
}

/// `left || right`; see [`logical_and`] for `do_assign`.
pub fn logical_or(left: &mut Value, right: &Value, do_assign: bool) -> Value {
    let result = Value::Boolean(left.is_truthy() || right.is_truthy());
    if do_assign {
        *left = result.clone();
    }
    result
}

pub fn logical_not(operand: &Value) -> Value {
    Value::Boolean(!operand.is_truthy())
}

/// `left ?? right`: `right` only when `left` is null.
pub fn null_coalesce(left: &Value, right: &Value) -> Value {
    if left.is_none() {
        right.clone()
    } else {
        left.clone()
    }
}
