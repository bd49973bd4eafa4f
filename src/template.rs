//! Mapping document values onto URI Template variables.
//!
//! Only the variable bindings are built here. The template grammar itself
//! (operators, modifiers, percent-encoding) belongs to `iri-string`.

use crate::data::Data;
use crate::error::{Error, Result};
use crate::property::Payload;
use crate::value::Value;
use iri_string::spec::UriSpec;
use iri_string::template::simple_context::{SimpleContext, Value as TemplateValue};
use iri_string::template::UriTemplateStr;
use iri_string::types::{UriReferenceStr, UriReferenceString};
use std::collections::BTreeMap;

/// What a template variable is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    String(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl From<Binding> for TemplateValue {
    fn from(binding: Binding) -> Self {
        match binding {
            Binding::String(s) => TemplateValue::String(s),
            Binding::List(items) => TemplateValue::List(items),
            Binding::Map(entries) => TemplateValue::Assoc(entries.into_iter().collect()),
        }
    }
}

/// Build template variable bindings from the current values of `data`.
///
/// * array property: its values minus nulls, as strings, in order
/// * object property: its entries minus null values, as strings
/// * scalar property: its value as a string, unless absent or null, in which
///   case the variable is left unbound
///
/// A later property with the same name replaces an earlier binding.
pub fn bindings(data: &Data) -> BTreeMap<String, Binding> {
    let mut bound = BTreeMap::new();
    for property in data {
        let binding = match property.payload() {
            Payload::Array(values) => Binding::List(
                values
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(Value::as_string)
                    .collect(),
            ),
            Payload::Object(entries) => Binding::Map(
                entries
                    .iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), v.as_string()))
                    .collect(),
            ),
            Payload::Value(Some(value)) if !value.is_null() => Binding::String(value.as_string()),
            Payload::Value(_) => continue,
        };
        bound.insert(property.name().to_string(), binding);
    }
    bound
}

/// Expand `template` with `bindings`. Unbound variables are undefined and
/// expand to nothing.
pub fn expand(
    template: &UriTemplateStr,
    bindings: &BTreeMap<String, Binding>,
) -> Result<UriReferenceString> {
    let mut context = SimpleContext::new();
    for (name, binding) in bindings {
        context.insert(name.clone(), TemplateValue::from(binding.clone()));
    }
    let expanded = template
        .expand::<UriSpec, _>(&context)
        .map_err(|source| Error::Expansion {
            template: template.as_str().to_string(),
            source,
        })?
        .to_string();
    parse_uri(&expanded)
}

pub(crate) fn parse_uri(uri: &str) -> Result<UriReferenceString> {
    UriReferenceStr::new(uri)
        .map(ToOwned::to_owned)
        .map_err(|source| Error::InvalidUri {
            uri: uri.to_string(),
            source,
        })
}
