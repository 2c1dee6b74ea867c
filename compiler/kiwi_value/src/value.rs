//! The tagged dynamic value.

use std::fmt;
use std::rc::Rc;

use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;

use crate::heap::Heap;
use crate::refs::{InstanceRef, LambdaRef, PointerRef, StructRef};

/// Backing storage of a hashmap value.
pub type ValueMap = FxHashMap<Value, Value>;

/// A Kiwi runtime value.
///
/// Scalars are stored inline. Lists, hashmaps and struct instances live
/// behind a shared [`Heap`] handle and are built through the factory
/// methods (`Value::list`, `Value::hashmap`, `Value::object`).
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Date(NaiveDateTime),
    List(Heap<Vec<Value>>),
    Hashmap(Heap<ValueMap>),
    /// Struct instance, shared by every value that refers to it.
    Object(Heap<InstanceRef>),
    Lambda(LambdaRef),
    Struct(StructRef),
    /// Opaque native handle.
    Pointer(PointerRef),
    None,
}

/// The tag of a [`Value`].
///
/// Declaration order is the rank used to order values of differing
/// tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    Integer,
    Float,
    Boolean,
    String,
    Date,
    List,
    Hashmap,
    Object,
    Lambda,
    Struct,
    Pointer,
    None,
}

impl ValueType {
    pub const ALL: [ValueType; 12] = [
        ValueType::Integer,
        ValueType::Float,
        ValueType::Boolean,
        ValueType::String,
        ValueType::Date,
        ValueType::List,
        ValueType::Hashmap,
        ValueType::Object,
        ValueType::Lambda,
        ValueType::Struct,
        ValueType::Pointer,
        ValueType::None,
    ];

    /// Numeric rank for cross-tag ordering.
    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::String => "string",
            ValueType::Date => "date",
            ValueType::List => "list",
            ValueType::Hashmap => "hashmap",
            ValueType::Object => "object",
            ValueType::Lambda => "lambda",
            ValueType::Struct => "struct",
            ValueType::Pointer => "pointer",
            ValueType::None => "none",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Factory methods

impl Value {
    #[inline]
    pub fn integer(n: i64) -> Self {
        Value::Integer(n)
    }

    #[inline]
    pub fn float(n: f64) -> Self {
        Value::Float(n)
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    #[inline]
    pub fn date(d: NaiveDateTime) -> Self {
        Value::Date(d)
    }

    /// Create a list value.
    ///
    /// ```text
    /// let nums = Value::list(vec![Value::integer(1), Value::integer(2)]);
    /// ```
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a hashmap value.
    #[inline]
    pub fn hashmap(entries: ValueMap) -> Self {
        Value::Hashmap(Heap::new(entries))
    }

    /// Create a hashmap from key/value pairs. Later duplicates win.
    pub fn hashmap_from(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::hashmap(entries.into_iter().collect())
    }

    /// Wrap a new struct instance.
    #[inline]
    pub fn object(instance: InstanceRef) -> Self {
        Value::Object(Heap::new(instance))
    }

    #[inline]
    pub fn lambda(identifier: impl Into<String>) -> Self {
        Value::Lambda(LambdaRef::new(identifier))
    }

    #[inline]
    pub fn struct_ref(identifier: impl Into<String>) -> Self {
        Value::Struct(StructRef::new(identifier))
    }

    #[inline]
    pub fn pointer(identifier: impl Into<String>, handle: Rc<dyn std::any::Any>) -> Self {
        Value::Pointer(PointerRef::new(identifier, handle))
    }

    /// A list of byte-valued integers, as produced by byte-string literals.
    pub fn bytes(data: &[u8]) -> Self {
        Value::list(data.iter().map(|&b| Value::Integer(i64::from(b))).collect())
    }

    /// The default date: the Unix epoch. It is the only falsy date.
    #[inline]
    pub fn default_date() -> NaiveDateTime {
        NaiveDateTime::default()
    }
}

impl Default for Value {
    /// Integer zero, the payload of every non-literal token.
    fn default() -> Self {
        Value::Integer(0)
    }
}

// Inspection

impl Value {
    pub fn type_tag(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Boolean(_) => ValueType::Boolean,
            Value::String(_) => ValueType::String,
            Value::Date(_) => ValueType::Date,
            Value::List(_) => ValueType::List,
            Value::Hashmap(_) => ValueType::Hashmap,
            Value::Object(_) => ValueType::Object,
            Value::Lambda(_) => ValueType::Lambda,
            Value::Struct(_) => ValueType::Struct,
            Value::Pointer(_) => ValueType::Pointer,
            Value::None => ValueType::None,
        }
    }

    /// Truthiness used by conditionals and logical operators.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Integer(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Boolean(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::Date(d) => *d != Value::default_date(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Hashmap(map) => !map.borrow().is_empty(),
            Value::Object(_) | Value::Lambda(_) | Value::Struct(_) | Value::Pointer(_) => true,
            Value::None => false,
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric payload widened to `f64`.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the value's type as scripts see it: the struct name for
    /// objects, the tag name otherwise.
    pub fn type_name(&self) -> String {
        match self {
            Value::Object(instance) => instance.borrow().struct_name.clone(),
            other => other.type_tag().name().to_string(),
        }
    }
}

// Cloning

impl Value {
    /// The language-level copy.
    ///
    /// Scalars are copied, lists and hashmaps are copied recursively
    /// (shared sub-collections stay shared in the copy, cycles included),
    /// and objects, lambdas, structs and pointers keep pointing at the
    /// same referent.
    pub fn deep_clone(&self) -> Value {
        let mut copies = FxHashMap::default();
        self.deep_clone_with(&mut copies)
    }

    fn deep_clone_with(&self, copies: &mut FxHashMap<usize, Value>) -> Value {
        match self {
            Value::List(items) => {
                if let Some(copy) = copies.get(&items.addr()) {
                    return copy.clone();
                }
                let target = Heap::new(Vec::new());
                copies.insert(items.addr(), Value::List(target.clone()));
                let source: Vec<Value> = items.borrow().clone();
                let copied: Vec<Value> = kiwi_stack::ensure_sufficient_stack(|| {
                    source.iter().map(|v| v.deep_clone_with(copies)).collect()
                });
                *target.borrow_mut() = copied;
                Value::List(target)
            }
            Value::Hashmap(map) => {
                if let Some(copy) = copies.get(&map.addr()) {
                    return copy.clone();
                }
                let target = Heap::new(ValueMap::default());
                copies.insert(map.addr(), Value::Hashmap(target.clone()));
                let source: Vec<(Value, Value)> = map
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                let copied: ValueMap = kiwi_stack::ensure_sufficient_stack(|| {
                    source
                        .iter()
                        .map(|(k, v)| (k.deep_clone_with(copies), v.deep_clone_with(copies)))
                        .collect()
                });
                *target.borrow_mut() = copied;
                Value::Hashmap(target)
            }
            other => other.clone(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "Integer({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Date(d) => write!(f, "Date({d})"),
            Value::List(_) => write!(f, "List({})", self.serialize()),
            Value::Hashmap(_) => write!(f, "Hashmap({})", self.serialize()),
            Value::Object(instance) => match instance.try_borrow() {
                Some(inst) => write!(f, "Object({}:{})", inst.struct_name, inst.identifier),
                None => write!(f, "Object(<borrowed>)"),
            },
            Value::Lambda(l) => write!(f, "Lambda({})", l.identifier),
            Value::Struct(s) => write!(f, "Struct({})", s.identifier),
            Value::Pointer(p) => write!(f, "Pointer({})", p.identifier),
            Value::None => write!(f, "None"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
