//! Append-only type name table.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use kiwi_diagnostic::{KiwiError, KiwiResult};
use kiwi_ir::{Token, TypeId};
use kiwi_value::{Value, ValueType};

/// Names registered before anything else, in id order.
///
/// `any` must stay first: id 0 doubles as "no type hint".
pub const PRIMITIVE_TYPES: [&str; 13] = [
    "any", "integer", "float", "boolean", "date", "hashmap", "lambda", "string", "list", "bytes",
    "object", "pointer", "none",
];

/// Value tag each primitive (other than `any`) accepts.
fn primitive_value_type(name: &str) -> Option<ValueType> {
    let tag = match name {
        "integer" => ValueType::Integer,
        "float" => ValueType::Float,
        "boolean" => ValueType::Boolean,
        "date" => ValueType::Date,
        "hashmap" => ValueType::Hashmap,
        "lambda" => ValueType::Lambda,
        "string" => ValueType::String,
        // Byte strings are lists of integers.
        "list" | "bytes" => ValueType::List,
        "object" => ValueType::Object,
        "pointer" => ValueType::Pointer,
        "none" => ValueType::None,
        _ => return None,
    };
    Some(tag)
}

pub type SharedTypeRegistry = Arc<TypeRegistry>;

struct TypeTable {
    names: Vec<String>,
    ids: FxHashMap<String, TypeId>,
    primitives: FxHashMap<TypeId, ValueType>,
}

/// Bidirectional type name ⇄ id table.
///
/// Grows monotonically; ids are never reused. Registration takes the
/// write lock, so one writer at a time.
pub struct TypeRegistry {
    table: RwLock<TypeTable>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// A registry seeded with the primitive types.
    pub fn new() -> Self {
        let mut table = TypeTable {
            names: Vec::with_capacity(PRIMITIVE_TYPES.len()),
            ids: FxHashMap::default(),
            primitives: FxHashMap::default(),
        };
        for name in PRIMITIVE_TYPES {
            let id = push_name(&mut table, name);
            if let Some(tag) = primitive_value_type(name) {
                table.primitives.insert(id, tag);
            }
        }
        TypeRegistry {
            table: RwLock::new(table),
        }
    }

    pub fn shared() -> SharedTypeRegistry {
        Arc::new(Self::new())
    }

    /// Append `name` and return its fresh id.
    ///
    /// Callers check [`contains`](Self::contains) first; registering a
    /// name twice gives it a second id, and lookups see the newest.
    pub fn register_type(&self, name: &str) -> TypeId {
        let mut table = self.table.write();
        let id = push_name(&mut table, name);
        trace!(type_name = name, id = id.raw(), "registered type");
        id
    }

    /// Id of `name`, registering it if unknown. Never fails.
    pub fn get_type(&self, name: &str) -> TypeId {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let mut table = self.table.write();
        // Another writer may have registered it since the read lock.
        if let Some(&id) = table.ids.get(name) {
            return id;
        }
        let id = push_name(&mut table, name);
        trace!(type_name = name, id = id.raw(), "registered type");
        id
    }

    /// Id of `name`, or a `TypeError` at `token` if it was never
    /// registered.
    pub fn get_type_strict(&self, token: &Token, name: &str) -> KiwiResult<TypeId> {
        self.lookup(name)
            .ok_or_else(|| KiwiError::type_error(token, format!("Unknown type `{name}`.")))
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.table.read().ids.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn name_of(&self, id: TypeId) -> Option<String> {
        let index = usize::try_from(id.raw()).ok()?;
        self.table.read().names.get(index).cloned()
    }

    /// True for the primitives that correspond to a value tag. `any`
    /// accepts everything and so is not one of them.
    pub fn is_primitive(&self, id: TypeId) -> bool {
        self.table.read().primitives.contains_key(&id)
    }

    /// The value tag a primitive type id accepts.
    pub fn value_type(&self, id: TypeId) -> Option<ValueType> {
        self.table.read().primitives.get(&id).copied()
    }

    /// Canonical type name of a runtime value; objects report their
    /// struct name.
    pub fn type_name_of(value: &Value) -> String {
        value.type_name()
    }

    /// Whether `value` satisfies a hint of type `id`. Unknown and
    /// non-primitive ids match objects of the struct with that name.
    pub fn accepts(&self, id: TypeId, value: &Value) -> bool {
        if id.is_any() {
            return true;
        }
        if let Some(tag) = self.value_type(id) {
            return value.type_tag() == tag;
        }
        match (self.name_of(id), value) {
            (Some(name), Value::Object(instance)) => instance.borrow().struct_name == name,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.table.read().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn push_name(table: &mut TypeTable, name: &str) -> TypeId {
    let raw = u32::try_from(table.names.len()).unwrap_or(u32::MAX);
    let id = TypeId::from_raw(raw);
    table.names.push(name.to_string());
    table.ids.insert(name.to_string(), id);
    id
}

#[cfg(test)]
mod tests;
