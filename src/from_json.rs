//! Decoding from generic JSON trees.
//!
//! Decoding is best-effort: documents are schema-less, so nodes that do not
//! have a recognisable shape are dropped instead of failing the whole decode.

use crate::data::Data;
use crate::property::Property;
use crate::value::Value;
use serde_json::Map;
use std::collections::BTreeMap;

/// Decode a property node.
///
/// Returns `None` unless `node` is an object with a string `name`. The payload
/// shape is chosen by the first of these that holds:
///
/// 1. `array` is a JSON array: an array property.
/// 2. `object` is a JSON object: an object property.
/// 3. otherwise a scalar property taken from `value`.
///
/// A `value` that is not a scalar leaves the property without a value, and
/// non-scalar array elements or object entries are skipped one by one.
pub fn property_from_json(node: &serde_json::Value) -> Option<Property> {
    let fields = node.as_object()?;
    let name = match fields.get("name") {
        Some(serde_json::Value::String(name)) => name.clone(),
        _ => {
            log::trace!("skipping property node without a string name: {}", node);
            return None;
        }
    };
    let prompt = fields
        .get("prompt")
        .and_then(|p| p.as_str())
        .map(str::to_string);

    if let Some(serde_json::Value::Array(elements)) = fields.get("array") {
        let values = values_from_json(&name, elements);
        return Some(Property::with_array(name, prompt, values));
    }
    if let Some(serde_json::Value::Object(entries)) = fields.get("object") {
        let entries = entries_from_json(&name, entries);
        return Some(Property::with_object(name, prompt, entries));
    }
    let value = fields.get("value").and_then(|v| {
        let decoded = Value::from_json(v);
        if decoded.is_none() {
            log::trace!("dropping non-scalar value of property '{}'", name);
        }
        decoded
    });
    Some(Property::with_value(name, prompt, value))
}

/// Decode an array of property nodes. Entries that are not property nodes are
/// skipped; anything other than an array decodes to empty data.
pub fn data_from_json(node: &serde_json::Value) -> Data {
    match node {
        serde_json::Value::Array(nodes) => nodes.iter().filter_map(property_from_json).collect(),
        other => {
            log::trace!("expected an array of properties, found {}", other);
            Data::default()
        }
    }
}

/// Rebuild data from a flattened `name -> value` object, the inverse of
/// [`crate::json::to_tree`]. Prompts do not survive flattening.
pub fn from_tree(tree: &Map<String, serde_json::Value>) -> Data {
    tree.iter()
        .map(|(name, field)| match field {
            serde_json::Value::Array(elements) => {
                Property::with_array(name.clone(), None, values_from_json(name, elements))
            }
            serde_json::Value::Object(entries) => {
                Property::with_object(name.clone(), None, entries_from_json(name, entries))
            }
            scalar => Property::with_value(name.clone(), None, Value::from_json(scalar)),
        })
        .collect()
}

fn values_from_json(name: &str, elements: &[serde_json::Value]) -> Vec<Value> {
    elements
        .iter()
        .filter_map(|element| {
            let value = Value::from_json(element);
            if value.is_none() {
                log::trace!("dropping non-scalar array element of property '{}'", name);
            }
            value
        })
        .collect()
}

fn entries_from_json(
    name: &str,
    entries: &Map<String, serde_json::Value>,
) -> BTreeMap<String, Value> {
    entries
        .iter()
        .filter_map(|(key, entry)| match Value::from_json(entry) {
            Some(value) => Some((key.clone(), value)),
            None => {
                log::trace!("dropping non-scalar entry '{}' of property '{}'", key, name);
                None
            }
        })
        .collect()
}
