#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rustc_hash::FxHasher;

use crate::{InstanceRef, Value};

fn hash_of(value: &Value) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::Integer).collect())
}

fn self_containing_list() -> Value {
    let list = ints(&[1]);
    if let Value::List(items) = &list {
        items.borrow_mut().push(list.clone());
    }
    list
}

#[test]
fn lists_compare_element_wise() {
    assert_eq!(ints(&[1, 2, 3]), ints(&[1, 2, 3]));
    assert_ne!(ints(&[1, 2, 3]), ints(&[1, 2]));
    assert_ne!(ints(&[1, 2, 3]), ints(&[1, 2, 4]));
}

#[test]
fn integer_and_float_are_distinct() {
    assert_ne!(Value::Integer(1), Value::Float(1.0));
}

#[test]
fn nan_equals_itself_and_zeroes_hash_alike() {
    assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    assert_eq!(hash_of(&Value::Float(f64::NAN)), hash_of(&Value::Float(-f64::NAN)));
    assert_eq!(Value::Float(0.0), Value::Float(-0.0));
    assert_eq!(hash_of(&Value::Float(0.0)), hash_of(&Value::Float(-0.0)));
}

#[test]
fn cyclic_lists_compare_without_looping() {
    let a = self_containing_list();
    let b = self_containing_list();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(a.compare_to(&b), Ordering::Equal);
}

#[test]
fn cycles_of_different_period_are_equal_and_hash_alike() {
    // a = [a]
    let a = Value::list(vec![]);
    if let Value::List(items) = &a {
        items.borrow_mut().push(a.clone());
    }
    // b = [[b]]
    let b = Value::list(vec![]);
    let inner = Value::list(vec![b.clone()]);
    if let Value::List(items) = &b {
        items.borrow_mut().push(inner);
    }
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn hashmap_equality_ignores_insertion_order() {
    let first = Value::hashmap_from([
        (Value::string("a"), Value::Integer(1)),
        (Value::string("b"), Value::Integer(2)),
    ]);
    let second = Value::hashmap_from([
        (Value::string("b"), Value::Integer(2)),
        (Value::string("a"), Value::Integer(1)),
    ]);
    assert_eq!(first, second);
    assert_eq!(hash_of(&first), hash_of(&second));
}

#[test]
fn lists_work_as_hashmap_keys() {
    let map = Value::hashmap_from([(ints(&[1, 2]), Value::string("pair"))]);
    let Value::Hashmap(entries) = &map else {
        panic!("expected hashmap");
    };
    assert_eq!(
        entries.borrow().get(&ints(&[1, 2])),
        Some(&Value::string("pair"))
    );
}

#[test]
fn objects_compare_by_name_identifier_and_variables() {
    let mut left = InstanceRef::new("p1", "Point");
    left.set_variable("x", Value::Integer(1));
    let mut right = InstanceRef::new("p1", "Point");
    right.set_variable("x", Value::Integer(1));
    assert_eq!(Value::object(left.clone()), Value::object(right.clone()));

    right.set_variable("x", Value::Integer(2));
    let (l, r) = (Value::object(left), Value::object(right));
    assert_ne!(l, r);
    assert_eq!(l.compare_to(&r), Ordering::Less);
}

#[test]
fn differing_tags_order_by_rank() {
    assert_eq!(Value::Integer(100).compare_to(&Value::Float(-1.0)), Ordering::Less);
    assert_eq!(Value::string("a").compare_to(&Value::Boolean(true)), Ordering::Greater);
    assert_eq!(Value::None.compare_to(&Value::lambda("f")), Ordering::Greater);
}

#[test]
fn lists_order_lexicographically_then_by_length() {
    assert_eq!(ints(&[1, 9]).compare_to(&ints(&[2])), Ordering::Less);
    assert_eq!(ints(&[1, 2]).compare_to(&ints(&[1, 2, 0])), Ordering::Less);
    assert_eq!(ints(&[3]).compare_to(&ints(&[1, 2, 3])), Ordering::Greater);
}

#[test]
fn hashmaps_order_by_count_before_contents() {
    let small = Value::hashmap_from([(Value::Integer(9), Value::Integer(9))]);
    let large = Value::hashmap_from([
        (Value::Integer(1), Value::Integer(1)),
        (Value::Integer(2), Value::Integer(2)),
    ]);
    assert_eq!(small.compare_to(&large), Ordering::Less);

    let other = Value::hashmap_from([(Value::Integer(9), Value::Integer(10))]);
    assert_eq!(small.compare_to(&other), Ordering::Less);
}

#[test]
fn nan_sorts_above_numbers() {
    assert_eq!(
        Value::Float(f64::NAN).compare_to(&Value::Float(f64::INFINITY)),
        Ordering::Greater
    );
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        prop_oneof![Just(f64::NAN), Just(0.0), Just(-0.0), -1e6..1e6_f64].prop_map(Value::Float),
        any::<bool>().prop_map(Value::Boolean),
        "[a-c]{0,3}".prop_map(Value::String),
        Just(Value::None),
        "[fg]".prop_map(Value::lambda),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::list),
            prop::collection::vec((inner.clone(), inner), 0..3).prop_map(Value::hashmap_from),
        ]
    })
}

proptest! {
    #[test]
    fn equality_is_symmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(a == b, b == a);
    }

    #[test]
    fn equal_values_hash_equal(a in arb_value(), b in arb_value()) {
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    #[test]
    fn deep_clone_is_equal_and_hashes_equal(a in arb_value()) {
        let copy = a.deep_clone();
        prop_assert_eq!(&copy, &a);
        prop_assert_eq!(hash_of(&copy), hash_of(&a));
    }

    #[test]
    fn compare_to_is_antisymmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(a.compare_to(&b), b.compare_to(&a).reverse());
    }

    #[test]
    fn equal_values_compare_equal(a in arb_value()) {
        let copy = a.deep_clone();
        prop_assert_eq!(a.compare_to(&copy), Ordering::Equal);
    }
}
