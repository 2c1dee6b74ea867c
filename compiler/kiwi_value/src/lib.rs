//! Kiwi dynamic values.
//!
//! This crate holds the tagged [`Value`] union every other part of the
//! front end and the interpreter pass around, together with the operator
//! semantics the interpreter applies to it.
//!
//! # Two Notions of Equality
//!
//! Values carry two deliberately different equality relations:
//!
//! - **Structural** (`PartialEq`/`Eq`/`Hash` and [`Value::compare_to`]):
//!   deep, recursive, cycle-safe. Used for hashmap keys, sorting, list
//!   subtraction and anything that needs `equals`-style comparison.
//! - **Sameness** ([`ops::is_same`], behind the `==`/`!=` operators):
//!   shallow. Lists and hashmaps are the same only when they are the
//!   same underlying collection.
//!
//! Relational operators (`<`, `<=`, ...) likewise order lists and
//! hashmaps by element count only, while [`Value::compare_to`] is a full
//! lexicographic order used for sorting.
//!
//! # Cloning
//!
//! The `Clone` trait copies handles (an `Rc` clone for aggregates).
//! [`Value::deep_clone`] is the language-level copy: lists and hashmaps
//! are copied recursively, objects and lambdas stay shared.

// Hashmap keys are values, and aggregates sit behind `RefCell`.
#![allow(clippy::mutable_key_type)]

mod error;
mod heap;
pub mod ops;
mod refs;
mod serialize;
mod slice;
mod structural;
mod value;

pub use error::{ValueError, ValueErrorKind, ValueResult};
pub use heap::Heap;
pub use refs::{InstanceRef, LambdaRef, PointerRef, StructRef};
pub use slice::{ResolvedSlice, SliceIndex};
pub use value::{Value, ValueMap, ValueType};
