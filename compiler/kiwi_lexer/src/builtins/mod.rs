//! Builtin name tables.

use kiwi_ir::BuiltinTable;
use rustc_hash::FxHashSet;

/// Membership test over the runtime's builtin name tables.
///
/// Implementations must answer with the first table, in
/// [`BuiltinTable`] declaration order, that contains `name`.
pub trait BuiltinLookup {
    fn lookup_function(&self, name: &str) -> Option<BuiltinTable>;
    fn lookup_method(&self, name: &str) -> Option<BuiltinTable>;
}

/// Method names every value supports.
const CORE_METHODS: &[&str] = &[
    "append", "begins_with", "chars", "clear", "clone", "concat", "contains", "downcase",
    "each", "empty", "ends_with", "enqueue", "dequeue", "filter", "first", "flatten", "get",
    "has_key", "index", "insert", "join", "keys", "last", "last_index", "lstrip", "map",
    "max", "merge", "min", "pop", "push", "reduce", "remove", "remove_at", "replace",
    "reverse", "rstrip", "select", "set", "shift", "size", "slice", "sort", "split", "strip",
    "sum", "to_bytes", "to_hex", "to_integer", "to_float", "to_string", "truthy", "type",
    "unshift", "uppercase", "upcase", "values", "zip",
];

/// Builtin names grouped by table.
///
/// Tables are stored in [`BuiltinTable`] order, so a linear scan finds
/// the table with the highest precedence first.
#[derive(Clone, Debug, Default)]
pub struct BuiltinRegistry {
    functions: Vec<(BuiltinTable, FxHashSet<String>)>,
    methods: Vec<(BuiltinTable, FxHashSet<String>)>,
}

impl BuiltinRegistry {
    /// A registry with no builtins at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the core value methods.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for name in CORE_METHODS {
            registry.add_method(BuiltinTable::Core, name);
        }
        registry
    }

    pub fn add_function(&mut self, table: BuiltinTable, name: &str) {
        insert(&mut self.functions, table, name);
    }

    pub fn add_method(&mut self, table: BuiltinTable, name: &str) {
        insert(&mut self.methods, table, name);
    }
}

fn insert(tables: &mut Vec<(BuiltinTable, FxHashSet<String>)>, table: BuiltinTable, name: &str) {
    let index = match tables.binary_search_by_key(&table, |(t, _)| *t) {
        Ok(index) => index,
        Err(index) => {
            tables.insert(index, (table, FxHashSet::default()));
            index
        }
    };
    tables[index].1.insert(name.to_string());
}

fn find(tables: &[(BuiltinTable, FxHashSet<String>)], name: &str) -> Option<BuiltinTable> {
    tables
        .iter()
        .find(|(_, names)| names.contains(name))
        .map(|(table, _)| *table)
}

impl BuiltinLookup for BuiltinRegistry {
    fn lookup_function(&self, name: &str) -> Option<BuiltinTable> {
        find(&self.functions, name)
    }

    fn lookup_method(&self, name: &str) -> Option<BuiltinTable> {
        find(&self.methods, name)
    }
}
