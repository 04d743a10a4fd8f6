use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::data::Catalog;

pub fn parse_json_file(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    parse_json_catalog(&content).with_context(|| format!("Failed to parse JSON file: {:?}", path))
}

/// Parse a JSON catalog into flat `key -> text` entries.
///
/// Nested objects are flattened with `.` (`{"a": {"b": "x"}}` gives `a.b`). Numbers and
/// booleans keep their JSON text; arrays and nulls hold no translation and are dropped.
pub fn parse_json_catalog(content: &str) -> Result<Catalog> {
    let json: Value = serde_json::from_str(content)?;
    if !json.is_object() {
        bail!("Expected a JSON object at the root of the catalog");
    }

    let mut catalog = Catalog::new();
    flatten_json(&json, String::new(), &mut catalog);
    Ok(catalog)
}

fn flatten_json(value: &Value, prefix: String, result: &mut Catalog) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_json(val, new_prefix, result);
            }
        }
        Value::String(s) => {
            result.insert(prefix, s.clone());
        }
        Value::Number(n) => {
            result.insert(prefix, n.to_string());
        }
        Value::Bool(b) => {
            result.insert(prefix, b.to_string());
        }
        Value::Array(_) | Value::Null => {}
    }
}
