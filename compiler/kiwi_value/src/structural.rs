//! Deep structural equality, hashing and ordering.
//!
//! Lists, hashmaps and objects can contain themselves. Equality and
//! ordering keep a set of container pairs already under comparison and
//! treat a revisited pair as equal, so comparing two cyclic values
//! terminates. Hashing walks at most [`HASH_DEPTH`] levels of nesting:
//! equal values unfold into the same tree, so a depth-bounded hash stays
//! consistent with equality even for cyclic values.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashSet, FxHasher};

use crate::{Value, ValueMap};

/// Nesting depth below which containers hash only their tag and size.
const HASH_DEPTH: usize = 6;

type Visited = FxHashSet<(usize, usize)>;

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut visited = Visited::default();
        structural_eq(self, other, &mut visited)
    }
}

impl Eq for Value {}

/// NaN equals NaN here so that `Eq` holds.
#[inline]
fn float_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn structural_eq(a: &Value, b: &Value, visited: &mut Visited) -> bool {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => float_eq(*x, *y),
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::List(x), Value::List(y)) => {
            if x.ptr_eq(y) || !visited.insert((x.addr(), y.addr())) {
                return true;
            }
            let (xs, ys) = (x.borrow(), y.borrow());
            xs.len() == ys.len()
                && kiwi_stack::ensure_sufficient_stack(|| {
                    xs.iter().zip(ys.iter()).all(|(l, r)| structural_eq(l, r, visited))
                })
        }
        (Value::Hashmap(x), Value::Hashmap(y)) => {
            if x.ptr_eq(y) || !visited.insert((x.addr(), y.addr())) {
                return true;
            }
            let (xm, ym) = (x.borrow(), y.borrow());
            xm.len() == ym.len()
                && kiwi_stack::ensure_sufficient_stack(|| {
                    xm.iter().all(|(key, lv)| match ym.get(key) {
                        Some(rv) => structural_eq(lv, rv, visited),
                        None => false,
                    })
                })
        }
        (Value::Object(x), Value::Object(y)) => {
            if x.ptr_eq(y) || !visited.insert((x.addr(), y.addr())) {
                return true;
            }
            let (xi, yi) = (x.borrow(), y.borrow());
            xi.struct_name == yi.struct_name
                && xi.identifier == yi.identifier
                && xi.instance_variables.len() == yi.instance_variables.len()
                && kiwi_stack::ensure_sufficient_stack(|| {
                    xi.instance_variables
                        .iter()
                        .all(|(name, lv)| match yi.instance_variables.get(name) {
                            Some(rv) => structural_eq(lv, rv, visited),
                            None => false,
                        })
                })
        }
        (Value::Lambda(x), Value::Lambda(y)) => x.identifier == y.identifier,
        (Value::Struct(x), Value::Struct(y)) => x.identifier == y.identifier,
        (Value::Pointer(x), Value::Pointer(y)) => x.identifier == y.identifier,
        (Value::None, Value::None) => true,
        _ => false,
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(self, state, HASH_DEPTH);
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H, depth: usize) {
    value.type_tag().rank().hash(state);
    match value {
        Value::Integer(n) => n.hash(state),
        Value::Float(n) => {
            // -0.0 == 0.0 and NaN == NaN must hash alike.
            let bits = if *n == 0.0 {
                0_u64
            } else if n.is_nan() {
                f64::NAN.to_bits()
            } else {
                n.to_bits()
            };
            bits.hash(state);
        }
        Value::Boolean(b) => b.hash(state),
        Value::String(s) => s.hash(state),
        Value::Date(d) => d.hash(state),
        Value::List(items) => {
            let items = items.borrow();
            items.len().hash(state);
            if depth > 0 {
                for item in items.iter() {
                    hash_value(item, state, depth - 1);
                }
            }
        }
        Value::Hashmap(map) => {
            let map = map.borrow();
            map.len().hash(state);
            if depth > 0 {
                hash_entries(&map, depth - 1).hash(state);
            }
        }
        Value::Object(instance) => {
            let instance = instance.borrow();
            instance.struct_name.hash(state);
            instance.identifier.hash(state);
        }
        Value::Lambda(l) => l.identifier.hash(state),
        Value::Struct(s) => s.identifier.hash(state),
        Value::Pointer(p) => p.identifier.hash(state),
        Value::None => {}
    }
}

/// Order-independent combination of entry hashes.
fn hash_entries(map: &ValueMap, depth: usize) -> u64 {
    map.iter().fold(0_u64, |acc, (k, v)| {
        let mut hasher = FxHasher::default();
        hash_value(k, &mut hasher, depth);
        hash_value(v, &mut hasher, depth);
        acc.wrapping_add(hasher.finish())
    })
}

impl Value {
    /// The deep total order used for sorting.
    ///
    /// Differing tags order by [`ValueType`](crate::ValueType) rank. Lists
    /// compare element by element and then by length; hashmaps by entry
    /// count, then by their entries sorted by key; objects by struct name,
    /// identifier, then instance variables sorted by name. Relational
    /// operators use a coarser order, see [`crate::ops::less_than`].
    pub fn compare_to(&self, other: &Value) -> Ordering {
        let mut visited = Visited::default();
        compare_values(self, other, &mut visited)
    }
}

/// Floats order numerically with every NaN above every number.
fn compare_floats(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ord) => ord,
        None => match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            _ => Ordering::Less,
        },
    }
}

fn compare_values(a: &Value, b: &Value, visited: &mut Visited) -> Ordering {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => compare_floats(*x, *y),
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        (Value::List(x), Value::List(y)) => {
            if x.ptr_eq(y) || !visited.insert((x.addr(), y.addr())) {
                return Ordering::Equal;
            }
            let (xs, ys) = (x.borrow(), y.borrow());
            kiwi_stack::ensure_sufficient_stack(|| {
                compare_sequences(xs.iter(), ys.iter(), visited)
            })
            .then(xs.len().cmp(&ys.len()))
        }
        (Value::Hashmap(x), Value::Hashmap(y)) => {
            if x.ptr_eq(y) || !visited.insert((x.addr(), y.addr())) {
                return Ordering::Equal;
            }
            let (xm, ym) = (x.borrow(), y.borrow());
            xm.len().cmp(&ym.len()).then_with(|| {
                let left = sorted_entries(&xm);
                let right = sorted_entries(&ym);
                kiwi_stack::ensure_sufficient_stack(|| {
                    for ((lk, lv), (rk, rv)) in left.iter().zip(right.iter()) {
                        let ord = compare_values(lk, rk, visited)
                            .then_with(|| compare_values(lv, rv, visited));
                        if ord != Ordering::Equal {
                            return ord;
                        }
                    }
                    Ordering::Equal
                })
            })
        }
        (Value::Object(x), Value::Object(y)) => {
            if x.ptr_eq(y) || !visited.insert((x.addr(), y.addr())) {
                return Ordering::Equal;
            }
            let (xi, yi) = (x.borrow(), y.borrow());
            xi.struct_name
                .cmp(&yi.struct_name)
                .then_with(|| xi.identifier.cmp(&yi.identifier))
                .then_with(|| {
                    let left = xi.sorted_variables();
                    let right = yi.sorted_variables();
                    kiwi_stack::ensure_sufficient_stack(|| {
                        for ((ln, lv), (rn, rv)) in left.iter().zip(right.iter()) {
                            let ord = ln.cmp(rn).then_with(|| compare_values(lv, rv, visited));
                            if ord != Ordering::Equal {
                                return ord;
                            }
                        }
                        left.len().cmp(&right.len())
                    })
                })
        }
        (Value::Lambda(x), Value::Lambda(y)) => x.identifier.cmp(&y.identifier),
        (Value::Struct(x), Value::Struct(y)) => x.identifier.cmp(&y.identifier),
        (Value::Pointer(x), Value::Pointer(y)) => x.identifier.cmp(&y.identifier),
        (Value::None, Value::None) => Ordering::Equal,
        _ => a.type_tag().rank().cmp(&b.type_tag().rank()),
    }
}

fn compare_sequences<'a>(
    left: impl Iterator<Item = &'a Value>,
    right: impl Iterator<Item = &'a Value>,
    visited: &mut Visited,
) -> Ordering {
    for (l, r) in left.zip(right) {
        let ord = compare_values(l, r, visited);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Entries sorted by key under the deep order.
fn sorted_entries(map: &ValueMap) -> Vec<(Value, Value)> {
    let mut entries: Vec<(Value, Value)> =
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    entries.sort_by(|a, b| a.0.compare_to(&b.0));
    entries
}

#[cfg(test)]
mod tests;
