//! Shared test utilities for the shapeguard workspace.
//!
//! Integration tests in several crates write type-graph fixtures to disk and compare JSON
//! reports; both helpers live here so they are not duplicated per crate.

use camino::Utf8Path;
use serde_json::{Value, json};

/// Normalize non-deterministic JSON fields for golden comparison.
///
/// `tool.version` is replaced with `"__VERSION__"` only when the *root* object is a report
/// envelope (`schema`, `tool`, `verdict`, `diagnostics`, `data`), so diagnostic payloads that
/// happen to carry a `tool` object are left alone. Timestamps are normalized at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "verdict", "diagnostics", "data"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("name")
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// One field of a fixture struct: `(name, type signature, raw struct tag)`.
pub type FixtureField<'a> = (&'a str, &'a str, Option<&'a str>);

/// Write `<root>/<package>/types.json` describing struct types with the given fields.
///
/// Every type lives in `types.go`; lines are assigned sequentially so locations are stable.
pub fn write_package_fixture(
    root: &Utf8Path,
    package: &str,
    types: &[(&str, Vec<FixtureField<'_>>)],
) -> std::io::Result<()> {
    let mut line = 1u32;
    let mut type_docs = Vec::new();
    for (name, fields) in types {
        let type_line = line;
        let field_docs: Vec<Value> = fields
            .iter()
            .map(|(field, sig, tag)| {
                line += 1;
                let mut doc = json!({ "name": field, "type": sig, "line": line });
                if let Some(tag) = tag {
                    doc["tag"] = json!(tag);
                }
                doc
            })
            .collect();
        line += 3;
        type_docs.push(json!({
            "name": name,
            "kind": "struct",
            "file": "types.go",
            "line": type_line,
            "fields": field_docs,
        }));
    }

    let doc = json!({ "package": package, "types": type_docs });
    let dir = root.join(package);
    std::fs::create_dir_all(&dir)?;
    let text = serde_json::to_string_pretty(&doc).map_err(std::io::Error::other)?;
    std::fs::write(dir.join("types.json"), text)
}
