#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use kiwi_diagnostic::ErrorKind;
use kiwi_ir::{Token, TokenSpan};
use kiwi_value::{InstanceRef, Value, ValueType};

use super::*;

#[test]
fn any_is_id_zero() {
    let registry = TypeRegistry::new();
    assert_eq!(registry.lookup("any"), Some(TypeId::ANY));
    assert!(TypeId::ANY.is_any());
    assert!(!registry.is_primitive(TypeId::ANY));
}

#[test]
fn primitives_are_seeded_in_order() {
    let registry = TypeRegistry::new();
    for (index, name) in PRIMITIVE_TYPES.iter().enumerate() {
        assert_eq!(
            registry.lookup(name),
            Some(TypeId::from_raw(u32::try_from(index).unwrap()))
        );
    }
    assert_eq!(registry.len(), 13);
    let bytes = registry.lookup("bytes").unwrap();
    assert_eq!(registry.value_type(bytes), Some(ValueType::List));
    let none = registry.lookup("none").unwrap();
    assert_eq!(registry.value_type(none), Some(ValueType::None));
}

#[test]
fn get_type_registers_on_demand() {
    let registry = TypeRegistry::new();
    assert!(!registry.contains("Point"));
    let id = registry.get_type("Point");
    assert_eq!(id, TypeId::from_raw(13));
    assert_eq!(registry.get_type("Point"), id);
    assert_eq!(registry.name_of(id).as_deref(), Some("Point"));
    assert!(!registry.is_primitive(id));
}

#[test]
fn register_type_appends() {
    let registry = TypeRegistry::new();
    let a = registry.register_type("A");
    let b = registry.register_type("B");
    assert_eq!(b.raw(), a.raw() + 1);
}

#[test]
fn strict_lookup_reports_type_error() {
    let registry = TypeRegistry::new();
    let token = Token::eof(TokenSpan::default());
    let err = registry.get_type_strict(&token, "Missing").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);
    assert!(err.message.contains("Missing"));
    assert_eq!(
        registry.get_type_strict(&token, "float").unwrap(),
        registry.lookup("float").unwrap()
    );
}

#[test]
fn type_names_of_values() {
    assert_eq!(TypeRegistry::type_name_of(&Value::Integer(1)), "integer");
    assert_eq!(TypeRegistry::type_name_of(&Value::list(vec![])), "list");
    assert_eq!(
        TypeRegistry::type_name_of(&Value::object(InstanceRef::new("i", "Point"))),
        "Point"
    );
}

#[test]
fn hints_accept_matching_values() {
    let registry = TypeRegistry::new();
    let integer = registry.lookup("integer").unwrap();
    let point = registry.get_type("Point");
    assert!(registry.accepts(TypeId::ANY, &Value::None));
    assert!(registry.accepts(integer, &Value::Integer(3)));
    assert!(!registry.accepts(integer, &Value::Float(3.0)));
    assert!(registry.accepts(point, &Value::object(InstanceRef::new("p", "Point"))));
    assert!(!registry.accepts(point, &Value::object(InstanceRef::new("q", "Line"))));
}

#[test]
fn shared_registry_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TypeRegistry>();
    assert_send_sync::<kiwi_ir::FileRegistry>();
}

#[test]
fn concurrent_get_type_registers_once() {
    let registry = TypeRegistry::shared();
    let before = registry.len();

    let ids: Vec<TypeId> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| registry.get_type("Point")))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert!(ids.iter().all(|&id| id == ids[0]));
    assert_eq!(registry.len(), before + 1);
    assert_eq!(registry.name_of(ids[0]).as_deref(), Some("Point"));
}
