use crate::data::Data;
use crate::property::{Payload, Property};
use crate::value::Value;
use serde::de::DeserializeOwned;
use serde_json::Map;

// ── Property nodes ──────────────────────────────────────────────────

/// Encode a property as its document node:
/// `{"name": .., "prompt": .., "value"|"array"|"object": ..}`.
///
/// `prompt` is omitted when absent, and so is `value` for a scalar property
/// that has none.
pub fn property_to_json(property: &Property) -> serde_json::Value {
    let mut node = Map::new();
    node.insert("name".to_string(), property.name().into());
    if let Some(prompt) = property.prompt() {
        node.insert("prompt".to_string(), prompt.into());
    }
    match property.payload() {
        Payload::Value(Some(value)) => {
            node.insert("value".to_string(), value.as_json());
        }
        Payload::Value(None) => {}
        Payload::Array(values) => {
            node.insert("array".to_string(), array_to_json(values));
        }
        Payload::Object(entries) => {
            node.insert("object".to_string(), object_to_json(entries.iter()));
        }
    }
    serde_json::Value::Object(node)
}

/// Encode data as the array of property nodes found under a `data` key.
pub fn data_to_json(data: &Data) -> serde_json::Value {
    serde_json::Value::Array(data.iter().map(property_to_json).collect())
}

// ── Flattened tree ──────────────────────────────────────────────────

/// Flatten data into a plain JSON object with one field per property.
///
/// Scalars land directly under the property name, arrays and objects become
/// JSON arrays and objects. A scalar property without a value contributes no
/// field at all. When names repeat, the later property's field wins.
pub fn to_tree(data: &Data) -> Map<String, serde_json::Value> {
    let mut node = Map::new();
    for property in data {
        let field = match property.payload() {
            Payload::Value(Some(value)) => value.as_json(),
            Payload::Value(None) => continue,
            Payload::Array(values) => array_to_json(values),
            Payload::Object(entries) => object_to_json(entries.iter()),
        };
        node.insert(property.name().to_string(), field);
    }
    node
}

/// Deserialize the flattened tree of `data` into `T`.
///
/// Any mapper failure (wrong shape, missing field, bad type) yields `None`.
pub fn to_typed<T: DeserializeOwned>(data: &Data) -> Option<T> {
    let tree = serde_json::Value::Object(to_tree(data));
    match serde_json::from_value(tree) {
        Ok(typed) => Some(typed),
        Err(err) => {
            log::debug!(
                "cannot map data onto {}: {}",
                std::any::type_name::<T>(),
                err
            );
            None
        }
    }
}

fn array_to_json(values: &[Value]) -> serde_json::Value {
    serde_json::Value::Array(values.iter().map(Value::as_json).collect())
}

fn object_to_json<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>) -> serde_json::Value {
    serde_json::Value::Object(entries.map(|(k, v)| (k.clone(), v.as_json())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    fn sample() -> Data {
        Data::new(vec![
            Property::with_value("name", Some("Full name".to_string()), Some(Value::from("Ada"))),
            Property::with_value("age", None, Some(Value::from(36))),
            Property::with_value("nickname", None, None),
            Property::with_value("email", None, Some(Value::Null)),
            Property::with_array(
                "tags",
                None,
                vec![Value::from("a"), Value::Null, Value::from(true)],
            ),
            Property::with_object(
                "address",
                None,
                vec![("city".to_string(), Value::from("London"))],
            ),
        ])
    }

    #[test]
    fn property_nodes() {
        let data = sample();
        assert_eq!(
            data.to_json(),
            json!([
                {"name": "name", "prompt": "Full name", "value": "Ada"},
                {"name": "age", "value": 36},
                {"name": "nickname"},
                {"name": "email", "value": null},
                {"name": "tags", "array": ["a", null, true]},
                {"name": "address", "object": {"city": "London"}}
            ])
        );
    }

    #[test]
    fn flattened_tree() {
        let tree = sample().to_tree();
        assert_eq!(
            serde_json::Value::Object(tree),
            json!({
                "name": "Ada",
                "age": 36,
                "email": null,
                "tags": ["a", null, true],
                "address": {"city": "London"}
            })
        );
    }

    #[test]
    fn valueless_scalar_is_omitted_not_null() {
        let data = Data::new(vec![Property::with_value("x", None, None)]);
        assert!(data.to_tree().is_empty());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Person {
        name: String,
        age: u32,
        #[serde(default)]
        tags: Vec<Option<serde_json::Value>>,
    }

    #[test]
    fn typed_conversion() {
        let person: Person = sample().to_typed().unwrap();
        assert_eq!(person.name, "Ada");
        assert_eq!(person.age, 36);
        assert_eq!(person.tags.len(), 3);
    }

    #[test]
    fn typed_conversion_failure_is_none() {
        let missing_age =
            Data::new(vec![Property::with_value("name", None, Some(Value::from("Ada")))]);
        assert_eq!(missing_age.to_typed::<Person>(), None);

        let wrong_type = Data::new(vec![
            Property::with_value("name", None, Some(Value::from(1))),
            Property::with_value("age", None, Some(Value::from(1))),
        ]);
        assert_eq!(wrong_type.to_typed::<Person>(), None);
    }
}
