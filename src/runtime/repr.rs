use crate::runtime::{
    heap::Heap,
    object::{MAX_CONTAINER_DEPTH, Object, ObjectId},
};

/// Placeholder shown for a list slot that was never assigned.
pub const UNSET_SLOT: &str = "<NULL>";

/// Source-like rendering: strings are quoted.
pub fn repr(heap: &Heap, id: ObjectId) -> String {
    let mut out = String::new();
    write_repr(heap, id, &mut out, 0);
    out
}

/// Display rendering: strings are written raw, everything else as `repr`.
pub fn str_of(heap: &Heap, id: ObjectId) -> String {
    match heap.get(id) {
        Object::Str(value) => value.to_string(),
        _ => repr(heap, id),
    }
}

fn write_repr(heap: &Heap, id: ObjectId, out: &mut String, depth: usize) {
    match heap.get(id) {
        Object::List(_) if depth >= MAX_CONTAINER_DEPTH => out.push_str("[...]"),
        Object::Dict(_) if depth >= MAX_CONTAINER_DEPTH => out.push_str("{...}"),
        Object::Int(value) => out.push_str(&value.to_string()),
        Object::Bool(true) => out.push_str("True"),
        Object::Bool(false) => out.push_str("False"),
        Object::None => out.push_str("None"),
        Object::Str(value) => write_quoted(value, out),
        Object::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                match item {
                    Some(item) => write_repr(heap, *item, out, depth + 1),
                    None => out.push_str(UNSET_SLOT),
                }
            }
            out.push(']');
        }
        Object::Dict(entries) => {
            out.push('{');
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(key, out);
                out.push_str(": ");
                write_repr(heap, *value, out, depth + 1);
            }
            out.push('}');
        }
        Object::Module { name, .. } => out.push_str(&format!("<module '{}'>", name)),
        Object::Function(def) => {
            out.push_str(&format!("<function {}.{}>", def.module, def.name))
        }
        Object::Builtin(builtin) => {
            out.push_str(&format!("<built-in function {}>", builtin.name))
        }
    }
}

fn write_quoted(value: &str, out: &mut String) {
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            ch => out.push(ch),
        }
    }
    out.push('\'');
}
