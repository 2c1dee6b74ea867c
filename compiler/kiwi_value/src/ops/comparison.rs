//! `== != < <= > >=`.

use std::cmp::Ordering;

use crate::Value;

/// Sameness behind `==` and `!=`.
///
/// Tags must match. Scalars compare by value. Lists and hashmaps are the
/// same only when they are the same collection; objects, lambdas,
/// structs and pointers when their identifiers match.
pub fn is_same(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Date(a), Value::Date(b)) => a == b,
        (Value::List(a), Value::List(b)) => a.ptr_eq(b),
        (Value::Hashmap(a), Value::Hashmap(b)) => a.ptr_eq(b),
        (Value::Object(a), Value::Object(b)) => {
            a.ptr_eq(b) || a.borrow().identifier == b.borrow().identifier
        }
        (Value::Lambda(a), Value::Lambda(b)) => a.identifier == b.identifier,
        (Value::Struct(a), Value::Struct(b)) => a.identifier == b.identifier,
        (Value::Pointer(a), Value::Pointer(b)) => a.identifier == b.identifier,
        (Value::None, Value::None) => true,
        _ => false,
    }
}

/// The order used by relational operators.
///
/// Differing tags order by rank, so every integer is below every float,
/// as in `compare_to`. Lists and hashmaps order by size only. `None`
/// means unordered (a NaN compared with a float).
pub fn relational_order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::List(a), Value::List(b)) => Some(a.borrow().len().cmp(&b.borrow().len())),
        (Value::Hashmap(a), Value::Hashmap(b)) => Some(a.borrow().len().cmp(&b.borrow().len())),
        (Value::Object(a), Value::Object(b)) => {
            Some(a.borrow().identifier.cmp(&b.borrow().identifier))
        }
        (Value::Lambda(a), Value::Lambda(b)) => Some(a.identifier.cmp(&b.identifier)),
        (Value::Struct(a), Value::Struct(b)) => Some(a.identifier.cmp(&b.identifier)),
        (Value::Pointer(a), Value::Pointer(b)) => Some(a.identifier.cmp(&b.identifier)),
        (Value::None, Value::None) => Some(Ordering::Equal),
        _ => Some(left.type_tag().rank().cmp(&right.type_tag().rank())),
    }
}

pub fn less_than(left: &Value, right: &Value) -> bool {
    matches!(relational_order(left, right), Some(Ordering::Less))
}

pub fn less_than_or_equal(left: &Value, right: &Value) -> bool {
    matches!(relational_order(left, right), Some(Ordering::Less | Ordering::Equal))
}

pub fn greater_than(left: &Value, right: &Value) -> bool {
    matches!(relational_order(left, right), Some(Ordering::Greater))
}

pub fn greater_than_or_equal(left: &Value, right: &Value) -> bool {
    matches!(relational_order(left, right), Some(Ordering::Greater | Ordering::Equal))
}
