use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

static EMPTY_OBJECT: BTreeMap<String, Value> = BTreeMap::new();

/// What a property carries: one scalar slot, an ordered list, or a keyed map.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `None` is a placeholder with no value yet, distinct from `Some(Value::Null)`.
    Value(Option<Value>),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

/// A named field of a document.
///
/// Properties are immutable once built. Use [`Property::with_value`],
/// [`Property::with_array`] or [`Property::with_object`] to create one.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    prompt: Option<String>,
    payload: Payload,
}

impl Property {
    /// A scalar property. `value: None` leaves the property without a value.
    pub fn with_value(
        name: impl Into<String>,
        prompt: Option<String>,
        value: Option<Value>,
    ) -> Self {
        Property {
            name: name.into(),
            prompt,
            payload: Payload::Value(value),
        }
    }

    pub fn with_array(
        name: impl Into<String>,
        prompt: Option<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        Property {
            name: name.into(),
            prompt,
            payload: Payload::Array(values.into_iter().collect()),
        }
    }

    pub fn with_object(
        name: impl Into<String>,
        prompt: Option<String>,
        entries: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        Property {
            name: name.into(),
            prompt,
            payload: Payload::Object(entries.into_iter().collect()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The scalar value, if this is a scalar property that has one.
    pub fn value(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Value(v) => v.as_ref(),
            _ => None,
        }
    }

    /// The list values; empty unless this is an array property.
    pub fn array(&self) -> &[Value] {
        match &self.payload {
            Payload::Array(values) => values,
            _ => &[],
        }
    }

    /// The keyed values; empty unless this is an object property.
    pub fn object(&self) -> &BTreeMap<String, Value> {
        match &self.payload {
            Payload::Object(entries) => entries,
            _ => &EMPTY_OBJECT,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.payload, Payload::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.payload, Payload::Object(_))
    }

    /// Encode as a `{"name": .., "prompt": .., "value"|"array"|"object": ..}` node.
    pub fn to_json(&self) -> serde_json::Value {
        crate::json::property_to_json(self)
    }

    /// Decode a property node. See [`crate::from_json::property_from_json`].
    pub fn from_json(node: &serde_json::Value) -> Option<Property> {
        crate::from_json::property_from_json(node)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property with name {}", self.name)?;
        match &self.payload {
            Payload::Value(Some(v)) => write!(f, ", value {}", v.as_json())?,
            Payload::Value(None) => f.write_str(", no value")?,
            Payload::Array(values) => {
                let items: Vec<String> = values.iter().map(|v| v.as_json().to_string()).collect();
                write!(f, ", array [{}]", items.join(", "))?;
            }
            Payload::Object(entries) => {
                let items: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.as_json()))
                    .collect();
                write!(f, ", object {{{}}}", items.join(", "))?;
            }
        }
        if let Some(prompt) = &self.prompt {
            write!(f, ", prompt {}", prompt)?;
        }
        Ok(())
    }
}
