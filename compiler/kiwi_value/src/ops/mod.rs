//! Operator semantics.
//!
//! Every binary operator is an explicit case analysis over the pair of
//! operand tags; there is no implicit coercion beyond what each case
//! spells out. [`apply_binary`] is the single entry point the
//! interpreter uses for a binary AST node.
//!
//! `==` and `!=` use [`is_same`], which compares lists and hashmaps by
//! handle. Structural equality is the `PartialEq` impl on `Value`.

mod arithmetic;
mod bitwise;
mod comparison;
mod conversion;
mod logical;

use std::fmt;

pub use arithmetic::{add, divide, exponent, modulus, multiply, negate, subtract};
pub use bitwise::{bit_and, bit_not, bit_or, bit_xor, shift_left, shift_right, unsigned_shift_right};
pub use comparison::{
    greater_than, greater_than_or_equal, is_same, less_than, less_than_or_equal, relational_order,
};
pub use conversion::{convert, to_boolean, to_float, to_integer, to_string_value};
pub use logical::{logical_and, logical_not, logical_or, null_coalesce};

use crate::{Value, ValueResult};

/// Binary operators with value-level semantics.
///
/// `&&` and `||` are listed for completeness; short-circuiting is the
/// evaluator's job, so by the time they get here both operands exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Exponent,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    NullCoalesce,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulus => "%",
            BinaryOperator::Exponent => "**",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::UnsignedRightShift => ">>>",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::NullCoalesce => "??",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Evaluate `left op right`.
pub fn apply_binary(op: BinaryOperator, left: &Value, right: &Value) -> ValueResult {
    match op {
        BinaryOperator::Add => add(left, right),
        BinaryOperator::Subtract => subtract(left, right),
        BinaryOperator::Multiply => multiply(left, right),
        BinaryOperator::Divide => divide(left, right),
        BinaryOperator::Modulus => modulus(left, right),
        BinaryOperator::Exponent => exponent(left, right),
        BinaryOperator::BitwiseAnd => bit_and(left, right),
        BinaryOperator::BitwiseOr => bit_or(left, right),
        BinaryOperator::BitwiseXor => bit_xor(left, right),
        BinaryOperator::LeftShift => shift_left(left, right),
        BinaryOperator::RightShift => shift_right(left, right),
        BinaryOperator::UnsignedRightShift => unsigned_shift_right(left, right),
        BinaryOperator::Equal => Ok(Value::Boolean(is_same(left, right))),
        BinaryOperator::NotEqual => Ok(Value::Boolean(!is_same(left, right))),
        BinaryOperator::LessThan => Ok(Value::Boolean(less_than(left, right))),
        BinaryOperator::LessThanOrEqual => Ok(Value::Boolean(less_than_or_equal(left, right))),
        BinaryOperator::GreaterThan => Ok(Value::Boolean(greater_than(left, right))),
        BinaryOperator::GreaterThanOrEqual => {
            Ok(Value::Boolean(greater_than_or_equal(left, right)))
        }
        BinaryOperator::And => {
            let mut target = left.clone();
            Ok(logical_and(&mut target, right, false))
        }
        BinaryOperator::Or => {
            let mut target = left.clone();
            Ok(logical_or(&mut target, right, false))
        }
        BinaryOperator::NullCoalesce => Ok(null_coalesce(left, right)),
    }
}

#[cfg(test)]
mod tests;
