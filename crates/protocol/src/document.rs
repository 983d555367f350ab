//! Dataset documents: JSON or TOML text checked against a closed set of field
//! names before it is deserialized.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct DocumentError(String);

/// Parses `bytes` as JSON, falling back to TOML, into a JSON object.
///
/// `what` names the document in error messages, e.g. "catalog config".
pub fn parse_document(bytes: &[u8], what: &str) -> Result<Value, DocumentError> {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes)
                .map_err(|err| DocumentError(format!("{json_err}; {err}")))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                DocumentError(format!(
                    "not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}"
                ))
            })?;
            serde_json::to_value(toml_value).map_err(|err| {
                DocumentError(format!("failed to convert TOML {what} to JSON: {err}"))
            })?
        }
    };

    if !value.is_object() {
        return Err(DocumentError(format!("{what} must be an object")));
    }
    Ok(value)
}

/// Objects of the array stored under `field`, with their index. Non-objects are skipped.
pub fn each_object<'a>(
    parent: &'a Map<String, Value>,
    field: &str,
) -> impl Iterator<Item = (usize, &'a Map<String, Value>)> {
    parent
        .get(field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(idx, item)| item.as_object().map(|obj| (idx, obj)))
}

/// Collects dotted paths of fields outside an allow-list.
#[derive(Debug, Default)]
pub struct UnknownFields {
    paths: Vec<String>,
}

impl UnknownFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, obj: &Map<String, Value>, base: &str, allowed: &[&str]) {
        for key in obj.keys() {
            if allowed.contains(&key.as_str()) {
                continue;
            }
            if base.is_empty() {
                self.paths.push(key.clone());
            } else {
                self.paths.push(format!("{base}.{key}"));
            }
        }
    }

    /// Checks every object in `parent[field]`, reporting paths like `field[2].extra`.
    pub fn check_list(&mut self, parent: &Map<String, Value>, field: &str, allowed: &[&str]) {
        for (idx, obj) in each_object(parent, field) {
            self.check(obj, &format!("{field}[{idx}]"), allowed);
        }
    }

    /// Checks the object stored under `parent[field]`, if there is one.
    pub fn check_nested(
        &mut self,
        parent: &Map<String, Value>,
        base: &str,
        field: &str,
        allowed: &[&str],
    ) {
        if let Some(obj) = parent.get(field).and_then(Value::as_object) {
            self.check(obj, &format!("{base}.{field}"), allowed);
        }
    }

    #[must_use]
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.paths.is_empty() {
            Ok(())
        } else {
            Err(self.paths)
        }
    }
}
