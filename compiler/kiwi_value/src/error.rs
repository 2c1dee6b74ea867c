//! Errors raised by value operators.
//!
//! These carry no source location: the interpreter evaluating an AST
//! node attaches the node's token when it turns one into a diagnostic.

use thiserror::Error;

/// Result of a value operation.
pub type ValueResult = Result<crate::Value, ValueError>;

/// Category of a value-level failure.
///
/// A subset of the front end's error taxonomy; the diagnostic crate maps
/// each variant onto its own kind one to one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueErrorKind {
    Syntax,
    Conversion,
    DivideByZero,
    Index,
    Type,
    Range,
}

/// A failed value operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValueError {
    pub kind: ValueErrorKind,
    pub message: String,
}

impl ValueError {
    pub fn new(kind: ValueErrorKind, message: impl Into<String>) -> Self {
        ValueError {
            kind,
            message: message.into(),
        }
    }

    /// No case of an operator covers this pair of operand types.
    pub fn unsupported_operands(operation: &str, left: &crate::Value, right: &crate::Value) -> Self {
        Self::new(
            ValueErrorKind::Conversion,
            format!(
                "Conversion failed in {operation} operation for types `{}` and `{}`.",
                left.type_tag().name(),
                right.type_tag().name()
            ),
        )
    }

    /// A unary operator was applied to an operand it does not support.
    pub fn unsupported_operand(operation: &str, operand: &crate::Value) -> Self {
        Self::new(
            ValueErrorKind::Conversion,
            format!(
                "Conversion failed in {operation} operation for type `{}`.",
                operand.type_tag().name()
            ),
        )
    }

    pub fn divide_by_zero() -> Self {
        Self::new(ValueErrorKind::DivideByZero, "Attempted to divide by zero.")
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::new(ValueErrorKind::Conversion, message)
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ValueErrorKind::Syntax, message)
    }

    pub fn index(message: impl Into<String>) -> Self {
        Self::new(ValueErrorKind::Index, message)
    }

    pub fn range(message: impl Into<String>) -> Self {
        Self::new(ValueErrorKind::Range, message)
    }
}
