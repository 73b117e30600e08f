//! Dot-path flattening and render context construction

use serde_json::{Map, Value};
use tracing::debug;

use crate::schema::SsaInput;

/// Name of the context field holding the flattened mapping
pub const FLAT_KEY: &str = "flat";

/// Flatten nested objects into a single-level map keyed by dot-joined paths
///
/// Only object edges are followed. Scalars, nulls and arrays are leaves and
/// are stored whole at their own path; arrays are never expanded into
/// indexed keys. An empty nested object contributes no entries.
pub fn flatten(object: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    flatten_into(object, "", &mut flat);
    debug!(entries = flat.len(), "flatten: done");
    flat
}

fn flatten_into(object: &Map<String, Value>, prefix: &str, flat: &mut Map<String, Value>) {
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(child) => flatten_into(child, &path, flat),
            leaf => {
                flat.insert(path, leaf.clone());
            }
        }
    }
}

/// Merge a document with its flattened mapping under [`FLAT_KEY`]
///
/// The flattened mapping always wins over a document field of the same name.
pub fn with_flat(mut document: Map<String, Value>, flat: Map<String, Value>) -> Value {
    document.insert(FLAT_KEY.to_string(), Value::Object(flat));
    Value::Object(document)
}

/// Build the value a template is rendered against
pub fn build_context(input: &SsaInput) -> Value {
    let document = input.to_map();
    let flat = flatten(&document);
    with_flat(document, flat)
}
