//! Dotted field paths and the operations that mutate a [`Document`] by path.

use serde_json::{Map, Value};
use std::fmt;

use super::Document;
use crate::error::{PatchError, Result};

/// A location inside a document, e.g. `status.platformStatus.azure.resourceGroupName`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The document root
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Extend the path by one key
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self { segments }
    }

    /// Split into the parent path and the leaf key
    fn split_leaf(&self) -> Option<(FieldPath, &str)> {
        let (leaf, parent) = self.segments.split_last()?;
        Some((FieldPath::from_segments(parent.iter().cloned()), leaf.as_str()))
    }

    /// The path made of the first `len` segments, used in error messages
    fn prefix(&self, len: usize) -> String {
        FieldPath::from_segments(self.segments[..len].iter().cloned()).to_string()
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self::from_segments(path.split('.'))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

impl Document {
    /// Read the value at `path`, if every segment exists
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self.root(), |node, key| node.as_object()?.get(key))
    }

    /// Read a string field
    pub fn get_str(&self, path: &FieldPath) -> Result<&str> {
        match self.get(path) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(PatchError::type_mismatch(path.to_string(), "a string")),
            None => Err(PatchError::path_not_found(
                path.to_string(),
                "field does not exist",
            )),
        }
    }

    /// Assign `value` at `path`, creating every missing intermediate mapping.
    ///
    /// A null intermediate is replaced by an empty mapping; any other
    /// non-mapping intermediate is a type mismatch.
    pub fn set(&mut self, path: &FieldPath, value: impl Into<Value>) -> Result<()> {
        let (parent, leaf) = path
            .split_leaf()
            .ok_or_else(|| PatchError::path_not_found(path.to_string(), "cannot set the root"))?;

        let map = self.mapping_mut(&parent, true)?;
        map.insert(leaf.to_string(), value.into());
        tracing::debug!("set {}", path);
        Ok(())
    }

    /// Remove the leaf key at `path`.
    ///
    /// Fails when the parent mapping is missing; an absent leaf is a no-op.
    pub fn delete(&mut self, path: &FieldPath) -> Result<()> {
        let (parent, leaf) = path.split_leaf().ok_or_else(|| {
            PatchError::path_not_found(path.to_string(), "cannot delete the root")
        })?;

        let map = self.mapping_mut(&parent, false)?;
        if map.shift_remove(leaf).is_some() {
            tracing::debug!("deleted {}", path);
        } else {
            tracing::debug!("{} already absent", path);
        }
        Ok(())
    }

    /// Set every `(key, value)` of `fields` on the mapping at `path`
    pub fn merge<I, K>(&mut self, path: &FieldPath, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let map = self.mapping_mut(path, true)?;
        for (key, value) in fields {
            map.insert(key.into(), value);
        }
        tracing::debug!("merged fields into {}", path);
        Ok(())
    }

    /// Walk to the mapping at `path`, optionally creating it on the way
    fn mapping_mut(&mut self, path: &FieldPath, create: bool) -> Result<&mut Map<String, Value>> {
        let mut node = self.root_mut();
        for (depth, key) in path.segments().iter().enumerate() {
            let map = as_mapping(node, path, depth, create)?;
            node = if create {
                map.entry(key.clone()).or_insert(Value::Null)
            } else {
                map.get_mut(key).ok_or_else(|| {
                    PatchError::path_not_found(
                        path.to_string(),
                        format!("'{}' does not exist", path.prefix(depth + 1)),
                    )
                })?
            };
        }
        as_mapping(node, path, path.segments().len(), create)
    }
}

/// View `node` (the value at the first `depth` segments of `path`) as a mapping
fn as_mapping<'a>(
    node: &'a mut Value,
    path: &FieldPath,
    depth: usize,
    create: bool,
) -> Result<&'a mut Map<String, Value>> {
    if node.is_null() && create {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => Ok(map),
        Value::Null => Err(PatchError::path_not_found(
            path.to_string(),
            format!("'{}' is null", path.prefix(depth)),
        )),
        _ => Err(PatchError::type_mismatch(path.prefix(depth), "a mapping")),
    }
}
