#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn registration_is_idempotent() {
    let registry = FileRegistry::new();
    let a = registry.register("a.kiwi");
    let b = registry.register("b.kiwi");
    assert_eq!(registry.register("a.kiwi"), a);
    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.id_of("b.kiwi"), Some(b));
    assert_eq!(registry.path(b).as_deref(), Some("b.kiwi"));
}

#[test]
fn stdin_has_a_fixed_id() {
    let registry = FileRegistry::new();
    assert!(FileId::STDIN.is_stdin());
    assert_eq!(registry.path(FileId::STDIN).as_deref(), Some("<stdin>"));
    assert_eq!(registry.line(FileId::STDIN, 1), None);
    registry.set_stdin_source("print 1\nprint 2");
    assert_eq!(registry.line(FileId::STDIN, 2).as_deref(), Some("print 2"));
}

#[test]
fn lines_from_registered_source() {
    let registry = FileRegistry::new();
    let id = registry.register_source("mem.kiwi", "one\r\ntwo\rthree\nfour");
    assert_eq!(registry.line(id, 1).as_deref(), Some("one"));
    assert_eq!(registry.line(id, 2).as_deref(), Some("two"));
    assert_eq!(registry.line(id, 3).as_deref(), Some("three"));
    assert_eq!(registry.line(id, 4).as_deref(), Some("four"));
    assert_eq!(registry.line(id, 0), None);
    assert_eq!(registry.line(id, 5), None);
}

#[test]
fn lines_are_read_from_disk_on_demand() {
    let dir = std::env::temp_dir().join(format!("kiwi_ir_registry_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("disk.kiwi");
    std::fs::write(&path, "first\nsecond\n").unwrap();

    let registry = FileRegistry::new();
    let id = registry.register(path.to_str().unwrap());
    assert_eq!(registry.line(id, 2).as_deref(), Some("second"));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unknown_ids_have_no_path() {
    let registry = FileRegistry::new();
    assert_eq!(registry.path(FileId::new(4)), None);
}
