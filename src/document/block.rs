//! Block-style YAML output that stays unambiguous for YAML 1.1 readers.
//!
//! serde_yaml quotes strings a YAML 1.2 reader would mistake for another
//! type, but leaves the 1.1-only booleans (`yes`, `on`, `n`, ...) plain.
//! Kubernetes parses manifests as YAML 1.1, so those strings are swapped for
//! unique markers before serialization and written back single-quoted.

use serde_json::{Map, Value};

const MARKER: &str = "upi-patch-keyword";

/// Scalars that only a YAML 1.1 reader resolves to a boolean
pub fn is_yaml11_keyword(s: &str) -> bool {
    matches!(
        s,
        "y" | "Y"
            | "yes"
            | "Yes"
            | "YES"
            | "n"
            | "N"
            | "no"
            | "No"
            | "NO"
            | "on"
            | "On"
            | "ON"
            | "off"
            | "Off"
            | "OFF"
    )
}

/// Render `value` as block YAML with YAML 1.1 keywords single-quoted
pub fn emit(value: &Value) -> Result<String, serde_yaml::Error> {
    let mut marker = MARKER.to_string();
    while mentions(value, &marker) {
        marker.push('x');
    }

    let mut keywords = Vec::new();
    let masked = mask(value, &marker, &mut keywords);
    let mut text = serde_yaml::to_string(&masked)?;
    for (i, keyword) in keywords.iter().enumerate() {
        text = text.replace(&placeholder(&marker, i), &format!("'{}'", keyword));
    }
    Ok(text)
}

fn placeholder(marker: &str, index: usize) -> String {
    format!("{}-{}-end", marker, index)
}

fn mask_str(s: &str, marker: &str, keywords: &mut Vec<String>) -> String {
    if is_yaml11_keyword(s) {
        keywords.push(s.to_string());
        placeholder(marker, keywords.len() - 1)
    } else {
        s.to_string()
    }
}

fn mask(value: &Value, marker: &str, keywords: &mut Vec<String>) -> Value {
    match value {
        Value::String(s) => Value::String(mask_str(s, marker, keywords)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| mask(item, marker, keywords))
                .collect(),
        ),
        Value::Object(map) => {
            let mut masked = Map::new();
            for (key, child) in map {
                let key = mask_str(key, marker, keywords);
                masked.insert(key, mask(child, marker, keywords));
            }
            Value::Object(masked)
        }
        other => other.clone(),
    }
}

/// Whether any key or string in `value` contains `needle`
fn mentions(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.contains(needle),
        Value::Array(items) => items.iter().any(|item| mentions(item, needle)),
        Value::Object(map) => map
            .iter()
            .any(|(key, child)| key.contains(needle) || mentions(child, needle)),
        _ => false,
    }
}
