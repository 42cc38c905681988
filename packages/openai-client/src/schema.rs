//! Schema generation for OpenAI structured outputs.
//!
//! Generates JSON schemas from Rust types via `schemars` and reshapes them
//! into the form OpenAI's strict mode accepts:
//!
//! 1. every object schema carries `additionalProperties: false`
//! 2. every property is listed in `required` (nullable fields included)
//! 3. `$ref` references are fully inlined (strict mode does not follow them)

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Types usable as the target of a schema-constrained completion.
///
/// Blanket-implemented for anything that is both `JsonSchema` and
/// `DeserializeOwned`, so deriving those two is all a caller needs.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate an OpenAI strict-mode compatible JSON schema for this type.
    fn openai_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        enforce_strict_objects(&mut value);

        let definitions = value.get("definitions").cloned();
        if let Some(defs) = definitions {
            resolve_refs(&mut value, &defs);
        }

        if let Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }

    /// Schema name reported to the API.
    fn schema_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Add `additionalProperties: false` to every object schema and force all
/// of its properties into `required`, recursively.
fn enforce_strict_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type") == Some(&Value::String("object".to_string())) {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
                if let Some(Value::Object(props)) = map.get("properties") {
                    let keys: Vec<Value> =
                        props.keys().map(|k| Value::String(k.clone())).collect();
                    map.insert("required".to_string(), Value::Array(keys));
                }
            }
            for (_, v) in map.iter_mut() {
                enforce_strict_objects(v);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                enforce_strict_objects(item);
            }
        }
        _ => {}
    }
}

/// Replace `#/definitions/...` references with the referenced schema.
fn resolve_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(path)) = map.get("$ref").cloned() {
                if let Some(name) = path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(name) {
                        *value = def.clone();
                        // The inlined schema may itself contain refs.
                        resolve_refs(value, definitions);
                        return;
                    }
                }
            }
            for (_, v) in map.iter_mut() {
                resolve_refs(v, definitions);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                resolve_refs(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct Inner {
        label: String,
        note: Option<String>,
    }

    #[derive(Deserialize, JsonSchema)]
    struct Outer {
        items: Vec<Inner>,
        count: u32,
    }

    #[test]
    fn objects_forbid_additional_properties() {
        let schema = Outer::openai_schema();
        let rendered = serde_json::to_string(&schema).unwrap();
        assert!(rendered.contains("\"additionalProperties\":false"));
    }

    #[test]
    fn all_properties_are_required() {
        let schema = Outer::openai_schema();
        let required = schema["required"].as_array().unwrap();
        let names: Vec<&str> = required.iter().filter_map(|v| v.as_str()).collect();
        assert!(names.contains(&"items"));
        assert!(names.contains(&"count"));
    }

    #[test]
    fn refs_are_inlined() {
        let schema = Outer::openai_schema();
        let rendered = serde_json::to_string(&schema).unwrap();
        assert!(!rendered.contains("$ref"));
        assert!(!rendered.contains("definitions"));
        // The Inner properties must appear inline under items.
        assert!(rendered.contains("label"));
    }

    #[test]
    fn nullable_fields_stay_required() {
        let schema = Inner::openai_schema();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v.as_str() == Some("note")));
    }
}
