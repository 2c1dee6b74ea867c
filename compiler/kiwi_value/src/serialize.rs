//! Canonical stringification.
//!
//! This is the text `print` writes and `+` appends when one operand is a
//! string. Strings print bare at the top level and quoted inside
//! containers. A container that contains itself prints as `[...]` or
//! `{...}` at the point of recursion.

use std::fmt::Write;

use crate::{Value, ValueMap};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Value {
    /// Render the value as script-visible text.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        Serializer::default().write_value(&mut out, self, false);
        out
    }
}

#[derive(Default)]
struct Serializer {
    /// Containers currently being written, innermost last.
    path: Vec<usize>,
}

impl Serializer {
    fn write_value(&mut self, out: &mut String, value: &Value, nested: bool) {
        match value {
            Value::Integer(n) => {
                let _ = write!(out, "{n}");
            }
            Value::Float(n) => {
                let _ = write!(out, "{n}");
            }
            Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::String(s) if nested => write_quoted(out, s),
            Value::String(s) => out.push_str(s),
            Value::Date(d) => {
                let _ = write!(out, "{}", d.format(DATE_FORMAT));
            }
            Value::List(items) => {
                if self.path.contains(&items.addr()) {
                    out.push_str("[...]");
                    return;
                }
                self.path.push(items.addr());
                out.push('[');
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    kiwi_stack::ensure_sufficient_stack(|| self.write_value(out, item, true));
                }
                out.push(']');
                self.path.pop();
            }
            Value::Hashmap(map) => {
                if self.path.contains(&map.addr()) {
                    out.push_str("{...}");
                    return;
                }
                self.path.push(map.addr());
                out.push('{');
                for (i, (key, item)) in sorted(&map.borrow()).iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    kiwi_stack::ensure_sufficient_stack(|| {
                        self.write_value(out, key, true);
                        out.push_str(": ");
                        self.write_value(out, item, true);
                    });
                }
                out.push('}');
                self.path.pop();
            }
            Value::Object(instance) => {
                let instance = instance.borrow();
                let _ = write!(out, "<object {}>", instance.struct_name);
            }
            Value::Lambda(l) => {
                let _ = write!(out, "<lambda {}>", l.identifier);
            }
            Value::Struct(s) => {
                let _ = write!(out, "<struct {}>", s.identifier);
            }
            Value::Pointer(p) => {
                let _ = write!(out, "<pointer {}>", p.identifier);
            }
            Value::None => out.push_str("null"),
        }
    }
}

/// Entries in key order so output is stable across runs.
fn sorted(map: &ValueMap) -> Vec<(Value, Value)> {
    let mut entries: Vec<(Value, Value)> =
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    entries.sort_by(|a, b| a.0.compare_to(&b.0));
    entries
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}
