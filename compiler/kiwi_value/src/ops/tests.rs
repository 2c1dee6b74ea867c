#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::{InstanceRef, Value, ValueErrorKind, ValueType};

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::Integer).collect())
}

fn int(n: i64) -> Value {
    Value::Integer(n)
}

// Arithmetic

#[test]
fn numeric_addition_widens_mixed_operands() {
    assert_eq!(add(&int(2), &int(3)).unwrap(), int(5));
    assert_eq!(add(&int(2), &Value::Float(0.5)).unwrap(), Value::Float(2.5));
    assert_eq!(add(&Value::Float(0.5), &int(2)).unwrap(), Value::Float(2.5));
    assert_eq!(add(&int(i64::MAX), &int(1)).unwrap(), int(i64::MIN));
}

#[test]
fn addition_with_strings_serializes_the_other_side() {
    assert_eq!(add(&Value::string("a"), &Value::string("b")).unwrap(), Value::string("ab"));
    assert_eq!(add(&Value::string("n="), &int(4)).unwrap(), Value::string("n=4"));
    assert_eq!(add(&Value::Boolean(true), &Value::string("!")).unwrap(), Value::string("true!"));
    assert_eq!(
        add(&Value::string("xs="), &ints(&[1, 2])).unwrap(),
        Value::string("xs=[1, 2]")
    );
}

#[test]
fn addition_onto_lists_appends_or_spreads() {
    let base = ints(&[1]);
    assert_eq!(add(&base, &int(2)).unwrap(), ints(&[1, 2]));
    assert_eq!(add(&base, &ints(&[2, 3])).unwrap(), ints(&[1, 2, 3]));
    assert_eq!(
        add(&base, &Value::string("s")).unwrap(),
        Value::list(vec![int(1), Value::string("s")])
    );
    // The left operand is untouched.
    assert_eq!(base, ints(&[1]));
}

#[test]
fn unsupported_addition_is_a_conversion_error() {
    let err = add(&Value::None, &int(1)).unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::Conversion);
    assert!(err.message.contains("add"));
}

#[test]
fn list_subtraction() {
    assert_eq!(subtract(&ints(&[1, 2, 1, 3]), &int(1)).unwrap(), ints(&[2, 1, 3]));
    assert_eq!(subtract(&ints(&[1, 2, 1, 3]), &ints(&[1, 3])).unwrap(), ints(&[2]));
    assert_eq!(subtract(&ints(&[1, 2]), &int(9)).unwrap(), ints(&[1, 2]));
    let nested = Value::list(vec![ints(&[1]), ints(&[2])]);
    assert_eq!(subtract(&nested, &ints(&[1])).unwrap(), Value::list(vec![ints(&[2])]));
}

#[test]
fn string_repetition() {
    assert_eq!(multiply(&Value::string("ab"), &int(3)).unwrap(), Value::string("ababab"));
    assert_eq!(multiply(&Value::string("ab"), &int(0)).unwrap(), Value::string(""));
    assert_eq!(
        multiply(&Value::string("ab"), &int(-1)).unwrap_err().kind,
        ValueErrorKind::Syntax
    );
}

#[test]
fn list_repetition_copies_elements() {
    let inner = ints(&[0]);
    let repeated = multiply(&Value::list(vec![inner.clone()]), &int(2)).unwrap();
    assert_eq!(repeated, Value::list(vec![ints(&[0]), ints(&[0])]));
    let Value::List(items) = &repeated else { unreachable!() };
    let first = items.borrow()[0].clone();
    let (Value::List(first), Value::List(original)) = (&first, &inner) else {
        unreachable!()
    };
    assert!(!first.ptr_eq(original));
}

#[test]
fn list_repetition_rejects_non_positive_and_empty() {
    assert_eq!(multiply(&ints(&[1]), &int(0)).unwrap_err().kind, ValueErrorKind::Syntax);
    assert_eq!(multiply(&ints(&[1]), &int(-2)).unwrap_err().kind, ValueErrorKind::Syntax);
    assert_eq!(multiply(&ints(&[]), &int(2)).unwrap_err().kind, ValueErrorKind::Syntax);
}

#[test]
fn oversized_repetition_is_a_range_error() {
    assert_eq!(
        multiply(&Value::string("ab"), &int(i64::MAX)).unwrap_err().kind,
        ValueErrorKind::Range
    );
    assert_eq!(multiply(&ints(&[1]), &int(i64::MAX)).unwrap_err().kind, ValueErrorKind::Range);
    assert_eq!(multiply(&ints(&[1, 2, 3]), &int(i64::MAX)).unwrap_err().kind, ValueErrorKind::Range);
}

#[test]
fn division_and_modulus_by_zero_fail() {
    assert_eq!(divide(&int(5), &int(0)).unwrap_err().kind, ValueErrorKind::DivideByZero);
    assert_eq!(
        modulus(&Value::Float(5.0), &Value::Float(0.0)).unwrap_err().kind,
        ValueErrorKind::DivideByZero
    );
    assert_eq!(
        divide(&Value::Float(1.0), &int(0)).unwrap_err().kind,
        ValueErrorKind::DivideByZero
    );
    assert_eq!(modulus(&int(7), &int(3)).unwrap(), int(1));
    assert_eq!(divide(&int(7), &int(2)).unwrap(), int(3));
    assert_eq!(divide(&int(7), &Value::Float(2.0)).unwrap(), Value::Float(3.5));
}

#[test]
fn exponent_stays_integer_for_non_negative_powers() {
    assert_eq!(exponent(&int(2), &int(10)).unwrap(), int(1024));
    assert_eq!(exponent(&int(2), &int(-1)).unwrap(), Value::Float(0.5));
    assert_eq!(exponent(&Value::Float(9.0), &Value::Float(0.5)).unwrap(), Value::Float(3.0));
}

#[test]
fn negation() {
    assert_eq!(negate(&int(3)).unwrap(), int(-3));
    assert_eq!(negate(&Value::Float(1.5)).unwrap(), Value::Float(-1.5));
    assert!(negate(&Value::string("x")).is_err());
}

// Bitwise

#[test]
fn bitwise_right_operand_coercions() {
    assert_eq!(bit_and(&int(0b1110), &int(0b0111)).unwrap(), int(0b0110));
    assert_eq!(bit_or(&int(0b1000), &Value::Float(3.9)).unwrap(), int(0b1011));
    assert_eq!(bit_xor(&int(1), &Value::Boolean(true)).unwrap(), int(0));
    assert_eq!(bit_or(&int(0), &Value::Float(-2.7)).unwrap(), int(-2));
    assert!(bit_and(&Value::Float(1.0), &int(1)).is_err());
    assert!(bit_and(&int(1), &Value::string("1")).is_err());
}

#[test]
fn bitwise_not_and_shifts() {
    assert_eq!(bit_not(&int(0)).unwrap(), int(-1));
    assert_eq!(shift_left(&int(1), &int(4)).unwrap(), int(16));
    assert_eq!(shift_right(&int(-16), &int(2)).unwrap(), int(-4));
    assert!(shift_left(&int(1), &Value::Float(1.0)).is_err());
}

#[test]
fn unsigned_shift_uses_low_32_bits() {
    assert_eq!(unsigned_shift_right(&int(-1), &int(28)).unwrap(), int(15));
    assert_eq!(unsigned_shift_right(&int(-16), &int(0)).unwrap(), int(-16));
    assert_eq!(unsigned_shift_right(&int(0x1_0000_0010), &int(4)).unwrap(), int(1));
}

proptest! {
    #[test]
    fn unsigned_shift_by_32_or_more_is_zero(left in any::<i64>(), shift in 32_i64..10_000) {
        prop_assert_eq!(unsigned_shift_right(&int(left), &int(shift)).unwrap(), int(0));
    }
}

// Logical

#[test]
fn logical_operators_follow_truthiness() {
    let mut left = int(1);
    assert_eq!(logical_and(&mut left, &Value::string(""), false), Value::Boolean(false));
    assert_eq!(left, int(1));
    assert_eq!(logical_or(&mut left, &Value::None, false), Value::Boolean(true));
    assert_eq!(logical_not(&ints(&[])), Value::Boolean(true));
}

#[test]
fn logical_assignment_mutates_left() {
    let mut target = Value::string("yes");
    let result = logical_and(&mut target, &int(0), true);
    assert_eq!(result, Value::Boolean(false));
    assert_eq!(target, Value::Boolean(false));
}

#[test]
fn null_coalescing() {
    assert_eq!(null_coalesce(&Value::None, &int(2)), int(2));
    assert_eq!(null_coalesce(&int(0), &int(2)), int(0));
}

// Comparison

#[test]
fn sameness_is_by_handle_for_lists_and_hashmaps() {
    let list = ints(&[1, 2]);
    let alias = list.clone();
    let copy = ints(&[1, 2]);
    assert!(is_same(&list, &alias));
    assert!(!is_same(&list, &copy));
    // Structural equality still holds.
    assert_eq!(list, copy);

    let map = Value::hashmap_from([(int(1), int(1))]);
    assert!(is_same(&map, &map.clone()));
    assert!(!is_same(&map, &map.deep_clone()));
}

#[test]
fn sameness_requires_matching_tags() {
    assert!(!is_same(&int(1), &Value::Float(1.0)));
    assert!(is_same(&Value::None, &Value::None));
    assert!(is_same(&Value::string("a"), &Value::string("a")));
    let a = Value::object(InstanceRef::new("id7", "S"));
    let b = Value::object(InstanceRef::new("id7", "S"));
    assert!(is_same(&a, &b));
}

#[test]
fn equality_operator_goes_through_sameness() {
    let list = ints(&[1]);
    assert_eq!(
        apply_binary(BinaryOperator::Equal, &list, &ints(&[1])).unwrap(),
        Value::Boolean(false)
    );
    assert_eq!(
        apply_binary(BinaryOperator::NotEqual, &list, &list.clone()).unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn relational_order_of_containers_is_by_count() {
    assert!(less_than(&ints(&[1, 2]), &ints(&[9, 9, 9])));
    assert!(!less_than(&ints(&[1, 2]), &ints(&[9, 9])));
    assert!(less_than_or_equal(&ints(&[1, 2]), &ints(&[9, 9])));
    assert!(greater_than(&ints(&[9, 9, 9]), &ints(&[1, 2])));
    let small = Value::hashmap_from([(int(100), int(100))]);
    let large = Value::hashmap_from([(int(1), int(1)), (int(2), int(2))]);
    assert!(less_than(&small, &large));
}

#[test]
fn relational_order_of_scalars() {
    assert!(less_than(&Value::Float(1.5), &Value::Float(2.5)));
    assert!(less_than(&Value::string("apple"), &Value::string("banana")));
    assert!(less_than(&Value::Boolean(false), &Value::Boolean(true)));
    // Differing tags fall back to rank.
    assert!(less_than(&Value::Boolean(true), &Value::string("")));
    assert!(greater_than(&Value::None, &ints(&[])));
    assert!(!less_than(&Value::Float(f64::NAN), &Value::Float(1.0)));
    assert!(!greater_than_or_equal(&Value::Float(f64::NAN), &Value::Float(1.0)));
}

#[test]
fn mixed_numbers_order_by_tag_like_sorting() {
    let two = int(2);
    let one_and_a_half = Value::Float(1.5);
    assert!(less_than(&two, &one_and_a_half));
    assert!(!greater_than_or_equal(&two, &one_and_a_half));
    assert_eq!(two.compare_to(&one_and_a_half), std::cmp::Ordering::Less);
    assert_eq!(
        relational_order(&one_and_a_half, &two),
        Some(one_and_a_half.compare_to(&two))
    );
}

// Conversion

#[test]
fn integer_conversion() {
    assert_eq!(to_integer(&Value::Float(-2.9)).unwrap(), int(-2));
    assert_eq!(to_integer(&Value::string(" 42 ")).unwrap(), int(42));
    assert_eq!(to_integer(&Value::string("4.7")).unwrap(), int(4));
    assert_eq!(to_integer(&Value::Boolean(true)).unwrap(), int(1));
    assert_eq!(
        to_integer(&Value::string("kiwi")).unwrap_err().kind,
        ValueErrorKind::Conversion
    );
    assert!(to_integer(&Value::Float(f64::INFINITY)).is_err());
    assert_eq!(to_integer(&Value::date(Value::default_date())).unwrap(), int(0));
}

#[test]
fn float_boolean_and_string_conversion() {
    assert_eq!(to_float(&int(3)).unwrap(), Value::Float(3.0));
    assert_eq!(to_float(&Value::string("2.5")).unwrap(), Value::Float(2.5));
    assert_eq!(to_boolean(&Value::string("False")), Value::Boolean(false));
    assert_eq!(to_boolean(&Value::string("no")), Value::Boolean(true));
    assert_eq!(to_boolean(&int(0)), Value::Boolean(false));
    assert_eq!(to_string_value(&ints(&[1])), Value::string("[1]"));
}

#[test]
fn convert_to_target_tags() {
    assert_eq!(convert(&Value::string("7"), ValueType::Integer).unwrap(), int(7));
    assert_eq!(
        convert(&Value::string("ab"), ValueType::List).unwrap(),
        Value::list(vec![Value::string("a"), Value::string("b")])
    );
    let date = convert(&Value::string("2024-01-02"), ValueType::Date).unwrap();
    assert_eq!(date.serialize(), "2024-01-02 00:00:00");
    assert_eq!(
        convert(&Value::lambda("f"), ValueType::Integer).unwrap_err().kind,
        ValueErrorKind::Conversion
    );
    let list = ints(&[1]);
    let Value::List(original) = &list else { unreachable!() };
    let Value::List(same) = convert(&list, ValueType::List).unwrap() else {
        unreachable!()
    };
    assert!(same.ptr_eq(original));
}

// Dispatch

#[test]
fn apply_binary_dispatches_every_family() {
    assert_eq!(apply_binary(BinaryOperator::Exponent, &int(3), &int(2)).unwrap(), int(9));
    assert_eq!(apply_binary(BinaryOperator::BitwiseXor, &int(6), &int(3)).unwrap(), int(5));
    assert_eq!(
        apply_binary(BinaryOperator::UnsignedRightShift, &int(8), &int(40)).unwrap(),
        int(0)
    );
    assert_eq!(
        apply_binary(BinaryOperator::GreaterThan, &int(3), &int(2)).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        apply_binary(BinaryOperator::Or, &int(0), &Value::string("x")).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        apply_binary(BinaryOperator::NullCoalesce, &Value::None, &int(1)).unwrap(),
        int(1)
    );
    assert_eq!(
        apply_binary(BinaryOperator::Divide, &int(1), &int(0)).unwrap_err().kind,
        ValueErrorKind::DivideByZero
    );
    assert_eq!(BinaryOperator::UnsignedRightShift.to_string(), ">>>");
}
