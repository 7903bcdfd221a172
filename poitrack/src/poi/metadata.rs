//! POI metadata flattening.
//!
//! Metadata arrives as a free-form JSON object but is stored as a flat
//! string-to-string map. Only scalar values survive the conversion.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Flat metadata attached to a POI.
pub type Metadata = BTreeMap<String, String>;

/// Flatten a JSON object into string metadata.
///
/// Strings are kept verbatim, numbers and booleans are rendered as text and
/// `null` becomes the literal `"null"`. Nested objects and arrays are
/// dropped.
pub fn flatten_metadata(object: &Map<String, Value>) -> Metadata {
    let mut metadata = Metadata::new();

    for (key, value) in object {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Object(_) | Value::Array(_) => {
                tracing::warn!(key = %key, "Ignoring POI metadata entry with non-scalar value");
                continue;
            }
        };
        metadata.insert(key.clone(), text);
    }

    metadata
}

/// Serde helper: read a metadata field that may be absent, null, a non-object
/// or an object holding nested values.
pub(crate) fn deserialize_metadata<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(object)) => flatten_metadata(&object),
        _ => Metadata::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_scalars_become_strings() {
        let metadata = flatten_metadata(&object(json!({
            "city": "San Jose",
            "floor": 3,
            "ratio": 1.5,
            "open": true,
            "owner": null
        })));

        assert_eq!(metadata["city"], "San Jose");
        assert_eq!(metadata["floor"], "3");
        assert_eq!(metadata["ratio"], "1.5");
        assert_eq!(metadata["open"], "true");
        assert_eq!(metadata["owner"], "null");
    }

    #[test]
    fn test_nested_values_are_dropped() {
        let metadata = flatten_metadata(&object(json!({
            "keep": "yes",
            "nested": { "a": 1 },
            "list": [1, 2, 3]
        })));

        assert_eq!(metadata.len(), 1);
        assert!(metadata.contains_key("keep"));
    }

    #[test]
    fn test_empty_string_value_is_kept() {
        let metadata = flatten_metadata(&object(json!({ "blank": "" })));
        assert_eq!(metadata["blank"], "");
    }
}
