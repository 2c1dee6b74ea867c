//! Handles for reference-semantic values.
//!
//! The interpreter owns struct definitions, closures and native
//! resources; a `Value` only carries the identifier it uses to find them.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::Value;

/// A struct instance.
///
/// Several `Value::Object`s may share one `InstanceRef` (through a
/// [`Heap`](crate::Heap)); the environment that created it governs its
/// lifetime.
#[derive(Clone, Debug, Default)]
pub struct InstanceRef {
    /// Unique instance handle.
    pub identifier: String,
    /// Name of the struct this is an instance of.
    pub struct_name: String,
    /// Field name to value.
    pub instance_variables: FxHashMap<String, Value>,
}

impl InstanceRef {
    pub fn new(identifier: impl Into<String>, struct_name: impl Into<String>) -> Self {
        InstanceRef {
            identifier: identifier.into(),
            struct_name: struct_name.into(),
            instance_variables: FxHashMap::default(),
        }
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.instance_variables.contains_key(name)
    }

    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.instance_variables.get(name)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.instance_variables.insert(name.into(), value);
    }

    /// Instance variables sorted by name, for stable output and ordering.
    pub fn sorted_variables(&self) -> Vec<(&String, &Value)> {
        let mut vars: Vec<_> = self.instance_variables.iter().collect();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        vars
    }
}

/// Identifier of a closure held in the interpreter's lambda table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LambdaRef {
    pub identifier: String,
}

impl LambdaRef {
    pub fn new(identifier: impl Into<String>) -> Self {
        LambdaRef {
            identifier: identifier.into(),
        }
    }
}

/// Identifier of a struct definition held by the interpreter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructRef {
    pub identifier: String,
}

impl StructRef {
    pub fn new(identifier: impl Into<String>) -> Self {
        StructRef {
            identifier: identifier.into(),
        }
    }
}

/// Opaque native handle (sockets, files, FFI objects).
///
/// Identity is the identifier; the payload is never inspected here.
#[derive(Clone)]
pub struct PointerRef {
    pub identifier: String,
    handle: Rc<dyn Any>,
}

impl PointerRef {
    pub fn new(identifier: impl Into<String>, handle: Rc<dyn Any>) -> Self {
        PointerRef {
            identifier: identifier.into(),
            handle,
        }
    }

    /// Downcast the native payload.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }
}

impl fmt::Debug for PointerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointerRef({})", self.identifier)
    }
}
