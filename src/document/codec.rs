//! Parsing and serialization of [`Document`]s.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Number, Value};

use super::{block, quoted, Document, FieldPath, Format};
use crate::error::{ErrorCode, PatchError, Result};

/// How a YAML document is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YamlStyle {
    /// Multi-line block collections with plain scalars where unambiguous
    Block,
    /// Block collections, every scalar double-quoted, tagged nulls fixed up
    QuotedFlow,
}

/// How a JSON document is laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonStyle {
    Compact,
    /// Pretty-printed with the given indent string (e.g. `"\t"`)
    Indented(String),
}

/// Full output style for [`serialize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputStyle {
    Yaml(YamlStyle),
    Json(JsonStyle),
}

/// Parse `text` as a document in the given format
pub fn parse(text: &str, format: Format) -> Result<Document> {
    let root = match format {
        Format::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
            from_yaml(yaml, &FieldPath::root())?
        }
        Format::Json => serde_json::from_str(text)?,
    };
    Ok(Document::new(root))
}

/// Convert a YAML tree, refusing values the JSON-shaped tree cannot hold
fn from_yaml(value: serde_yaml::Value, path: &FieldPath) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => from_yaml_number(&n, path)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| from_yaml(item, &path.child(i.to_string())))
                .collect::<Result<_>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, child) in mapping {
                let Yaml::String(key) = key else {
                    return Err(PatchError::format(
                        Format::Yaml,
                        format!("'{}' has a mapping key that is not a string", path),
                    ));
                };
                let child = from_yaml(child, &path.child(key.as_str()))?;
                map.insert(key, child);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => {
            return Err(PatchError::format(
                Format::Yaml,
                format!("'{}' has unsupported tag {}", path, tagged.tag),
            ))
        }
    })
}

fn from_yaml_number(n: &serde_yaml::Number, path: &FieldPath) -> Result<Value> {
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| {
            PatchError::format(
                Format::Yaml,
                format!("'{}' holds {}, which has no JSON representation", path, n),
            )
        })
}

/// Render `doc` in the given style
pub fn serialize(doc: &Document, style: &OutputStyle) -> Result<String> {
    match style {
        OutputStyle::Yaml(YamlStyle::Block) => block::emit(doc.root()).map_err(|e| {
            PatchError::format_with_code(
                ErrorCode::FORMAT_SERIALIZE_FAILED,
                Format::Yaml,
                e.to_string(),
            )
            .with_source(e)
        }),
        OutputStyle::Yaml(YamlStyle::QuotedFlow) => {
            Ok(quoted::fix_null_tokens(&quoted::emit(doc.root())))
        }
        OutputStyle::Json(JsonStyle::Compact) => {
            serde_json::to_string(doc.root()).map_err(json_serialize_error)
        }
        OutputStyle::Json(JsonStyle::Indented(indent)) => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            doc.root()
                .serialize(&mut ser)
                .map_err(json_serialize_error)?;
            String::from_utf8(buf).map_err(|e| PatchError::encoding(e.to_string()).with_source(e))
        }
    }
}

fn json_serialize_error(err: serde_json::Error) -> PatchError {
    PatchError::format_with_code(
        ErrorCode::FORMAT_SERIALIZE_FAILED,
        Format::Json,
        err.to_string(),
    )
    .with_source(err)
}

impl Document {
    pub fn parse(text: &str, format: Format) -> Result<Self> {
        parse(text, format)
    }

    pub fn to_text(&self, style: &OutputStyle) -> Result<String> {
        serialize(self, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_yaml_round_trip_is_byte_identical() {
        let text = "\
apiVersion: v1
kind: Secret
metadata:
  name: azure-credentials
  namespace: kube-system
data:
  azure_region: ZWFzdHVz
  azure_subscription_id: MDAwMA==
type: Opaque
";
        let doc = parse(text, Format::Yaml).unwrap();
        let out = serialize(&doc, &OutputStyle::Yaml(YamlStyle::Block)).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_yaml_preserves_null_and_empty_mapping() {
        let doc = parse("a: null\nb: {}\nc: ''\n", Format::Yaml).unwrap();
        assert_eq!(doc.root(), &json!({"a": null, "b": {}, "c": ""}));
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        for text in ["ratio: .inf\n", "ratio: -.inf\n", "ratio: .nan\n"] {
            let err = parse(text, Format::Yaml).unwrap_err();
            assert_eq!(err.code(), ErrorCode::FORMAT_INVALID_YAML);
            assert!(err.to_string().contains("'ratio' holds"), "{}", err);
        }

        let err = parse("spec:\n  weights: [1.5, .nan]\n", Format::Yaml).unwrap_err();
        assert!(err.to_string().contains("'spec.weights.1'"));
    }

    #[test]
    fn test_numbers_survive_round_trip() {
        let text = "count: 3\nnegative: -7\nratio: 0.25\nmax: 18446744073709551615\n";
        let doc = parse(text, Format::Yaml).unwrap();
        let out = serialize(&doc, &OutputStyle::Yaml(YamlStyle::Block)).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_integer_wider_than_64_bits_is_format_error() {
        let err = parse("big: 123456789012345678901234567890\n", Format::Yaml).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FORMAT_INVALID_YAML);
    }

    #[test]
    fn test_block_quotes_yaml11_booleans() {
        let doc = parse("name: 'on'\nother: 'no'\n", Format::Yaml).unwrap();
        assert_eq!(doc.root()["name"], "on");
        let out = serialize(&doc, &OutputStyle::Yaml(YamlStyle::Block)).unwrap();
        assert_eq!(out, "name: 'on'\nother: 'no'\n");
    }

    #[test]
    fn test_malformed_yaml_is_format_error() {
        let err = parse("key: [unclosed", Format::Yaml).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FORMAT_INVALID_YAML);
    }

    #[test]
    fn test_malformed_json_is_format_error() {
        let err = parse("{\"a\": ", Format::Json).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FORMAT_INVALID_JSON);
    }

    #[test]
    fn test_json_tab_indentation() {
        let doc = Document::new(json!({"cloud": "AzurePublicCloud", "useInstanceMetadata": true}));
        let out = serialize(&doc, &OutputStyle::Json(JsonStyle::Indented("\t".into()))).unwrap();
        assert_eq!(
            out,
            "{\n\t\"cloud\": \"AzurePublicCloud\",\n\t\"useInstanceMetadata\": true\n}"
        );
    }

    #[test]
    fn test_json_compact_preserves_order() {
        let doc = parse(r#"{"z": 1, "a": {"y": [1, 2], "b": null}}"#, Format::Json).unwrap();
        let out = serialize(&doc, &OutputStyle::Json(JsonStyle::Compact)).unwrap();
        assert_eq!(out, r#"{"z":1,"a":{"y":[1,2],"b":null}}"#);
    }

    #[test]
    fn test_quoted_flow_never_leaves_tagged_null() {
        let doc = parse("metadata:\n  creationTimestamp: null\n", Format::Yaml).unwrap();
        let out = serialize(&doc, &OutputStyle::Yaml(YamlStyle::QuotedFlow)).unwrap();
        assert_eq!(out, "\"metadata\":\n  \"creationTimestamp\": null\n");
    }
}
