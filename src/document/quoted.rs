//! YAML emitter that double-quotes every scalar.
//!
//! Collections stay in block style and lines are never folded. Non-string
//! scalars are written with their core-schema tag so they keep their type
//! once quoted (`!!int "3"`, `!!bool "true"`, `!!null "null"`). Consumers of
//! the cloud-provider manifest reject the tagged null, so [`fix_null_tokens`]
//! rewrites it to a bare `null` after emission.

use serde_json::{Map, Value};
use std::fmt::Write;

/// Token sequence produced for an explicit null
pub const TAGGED_NULL: &str = "!!null \"null\"";

const INDENT: usize = 2;

/// Render `value` as quoted-style YAML, with tagged nulls still in place
pub fn emit(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(map) if !map.is_empty() => write_mapping(&mut out, map, 0, false),
        Value::Array(items) if !items.is_empty() => write_sequence(&mut out, items, 0, false),
        other => {
            out.push_str(&inline_node(other));
            out.push('\n');
        }
    }
    out
}

/// Replace every tagged null with a bare `null`
pub fn fix_null_tokens(text: &str) -> String {
    text.replace(TAGGED_NULL, "null")
}

fn write_mapping(out: &mut String, map: &Map<String, Value>, indent: usize, inline_first: bool) {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 || !inline_first {
            pad(out, indent);
        }
        out.push_str(&quote(key));
        out.push(':');
        match value {
            Value::Object(child) if !child.is_empty() => {
                out.push('\n');
                write_mapping(out, child, indent + INDENT, false);
            }
            // Sequences under a key sit at the key's own indentation
            Value::Array(items) if !items.is_empty() => {
                out.push('\n');
                write_sequence(out, items, indent, false);
            }
            other => {
                out.push(' ');
                out.push_str(&inline_node(other));
                out.push('\n');
            }
        }
    }
}

fn write_sequence(out: &mut String, items: &[Value], indent: usize, inline_first: bool) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 || !inline_first {
            pad(out, indent);
        }
        out.push_str("- ");
        match item {
            Value::Object(child) if !child.is_empty() => {
                write_mapping(out, child, indent + INDENT, true);
            }
            Value::Array(nested) if !nested.is_empty() => {
                write_sequence(out, nested, indent + INDENT, true);
            }
            other => {
                out.push_str(&inline_node(other));
                out.push('\n');
            }
        }
    }
}

/// Scalars and empty collections, which fit on the current line
fn inline_node(value: &Value) -> String {
    match value {
        Value::Null => TAGGED_NULL.to_string(),
        Value::Bool(b) => format!("!!bool {}", quote(&b.to_string())),
        Value::Number(n) if n.is_f64() => format!("!!float {}", quote(&n.to_string())),
        Value::Number(n) => format!("!!int {}", quote(&n.to_string())),
        Value::String(s) => quote(s),
        Value::Object(_) => "{}".to_string(),
        Value::Array(_) => "[]".to_string(),
    }
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

/// Double-quote `s` using YAML escapes; the result is pure ASCII
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\x0b' => out.push_str("\\v"),
            '\x0c' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\x1b' => out.push_str("\\e"),
            ' '..='~' => out.push(c),
            c if (c as u32) <= 0xFF => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c if (c as u32) <= 0xFFFF => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08X}", c as u32);
            }
        }
    }
    out.push('"');
    out
}
