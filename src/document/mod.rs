//! Ordered document tree shared by the YAML and JSON templates.
//!
//! - [`block`]: block YAML safe for YAML 1.1 readers
//! - [`codec`]: parsing and the output styles the templates need
//! - [`path`]: dotted field paths and the set/delete/merge mutator
//! - [`quoted`]: the all-double-quoted YAML emitter

pub mod block;
pub mod codec;
pub mod path;
pub mod quoted;

use serde_json::Value;
use std::fmt;

pub use codec::{parse, serialize, JsonStyle, OutputStyle, YamlStyle};
pub use path::FieldPath;

/// Text format of a document on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => write!(f, "YAML"),
            Format::Json => write!(f, "JSON"),
        }
    }
}

/// An in-memory document: an ordered tree of mappings, sequences and scalars.
///
/// Mapping key order follows the source text and survives mutation; a key
/// that is overwritten keeps its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}
