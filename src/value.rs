use crate::error::{Error, Result};
use serde_json::Number;
use std::fmt;

/// A single JSON scalar carried by a property.
///
/// Equality is variant-aware: `Value::from("1") != Value::from(1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
}

/// The variant of a [`Value`], used in type-mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Null,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
        })
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text of a `String` value.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch(ValueKind::String, other.kind())),
        }
    }

    pub fn as_number(&self) -> Result<&Number> {
        match self {
            Value::Number(n) => Ok(n),
            other => Err(Error::type_mismatch(ValueKind::Number, other.kind())),
        }
    }

    /// The numeric payload widened to `f64`.
    pub fn as_f64(&self) -> Result<f64> {
        // Every finite `Number` has an f64 form; arbitrary precision is not enabled.
        self.as_number().map(|n| n.as_f64().unwrap_or(f64::NAN))
    }

    pub fn as_boolean(&self) -> Result<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(Error::type_mismatch(ValueKind::Boolean, other.kind())),
        }
    }

    /// Canonical textual form of any variant. Strings are returned verbatim,
    /// numbers and booleans as their JSON literals, and `Null` as `null`.
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    /// Convert to the generic JSON tree representation.
    pub fn as_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Null => serde_json::Value::Null,
        }
    }

    /// Decode a JSON scalar. Arrays and objects are not values and yield `None`.
    pub fn from_json(node: &serde_json::Value) -> Option<Value> {
        match node {
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Number(n) => Some(Value::Number(n.clone())),
            serde_json::Value::Bool(b) => Some(Value::Boolean(*b)),
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

/// NaN and the infinities have no JSON form and become `Null`.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equality_is_variant_aware() {
        assert_ne!(Value::from("1"), Value::from(1));
        assert_ne!(Value::from("true"), Value::from(true));
        assert_eq!(Value::from(2.5), Value::from(2.5));
    }

    #[test]
    fn strict_accessors_reject_other_variants() {
        let v = Value::from("yes");
        assert_eq!(v.as_str().unwrap(), "yes");
        let err = v.as_boolean().unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: ValueKind::Boolean,
                found: ValueKind::String
            }
        ));
        assert!(Value::Null.as_number().is_err());
        assert_eq!(Value::from(3).as_f64().unwrap(), 3.0);
        assert!(Value::from(false).as_boolean().is_ok());
    }

    #[test]
    fn as_string_coerces() {
        assert_eq!(Value::from("a b").as_string(), "a b");
        assert_eq!(Value::from(42).as_string(), "42");
        assert_eq!(Value::from(1.5).as_string(), "1.5");
        assert_eq!(Value::from(true).as_string(), "true");
        assert_eq!(Value::Null.as_string(), "null");
    }

    #[test]
    fn json_conversion() {
        assert_eq!(Value::from("x").as_json(), json!("x"));
        assert_eq!(Value::from(7).as_json(), json!(7));
        assert_eq!(Value::Null.as_json(), json!(null));
        assert_eq!(Value::from_json(&json!(false)), Some(Value::from(false)));
        assert_eq!(Value::from_json(&json!(null)), Some(Value::Null));
        assert_eq!(Value::from_json(&json!([1])), None);
        assert_eq!(Value::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert!(Value::from(f64::NAN).is_null());
        assert!(Value::from(f64::INFINITY).is_null());
    }
}
