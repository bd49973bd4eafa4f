use crate::error::Result;
use crate::property::Property;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

/// An ordered, immutable set of properties.
///
/// Every operation that "changes" a `Data` returns a new one and leaves the
/// receiver untouched. Cloning is cheap, and derived values share the
/// properties they did not replace.
///
/// Names are not required to be unique. Name-based lookups only ever see the
/// first property with a given name; positional access sees all of them.
#[derive(Debug, Clone)]
pub struct Data {
    properties: Arc<[Arc<Property>]>,
}

impl Data {
    pub fn new(properties: impl IntoIterator<Item = Property>) -> Self {
        properties.into_iter().collect()
    }

    fn from_shared(properties: Vec<Arc<Property>>) -> Self {
        Data {
            properties: properties.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> + '_ {
        self.properties.iter().map(unshare)
    }

    pub fn get(&self, index: usize) -> Option<&Property> {
        self.properties.get(index).map(unshare)
    }

    pub fn find_property(&self, mut predicate: impl FnMut(&Property) -> bool) -> Option<&Property> {
        self.iter().find(|&p| predicate(p))
    }

    /// The first property called `name`.
    pub fn property_by_name(&self, name: &str) -> Option<&Property> {
        self.find_property(|p| p.name() == name)
    }

    /// Properties keyed by name. A later duplicate overwrites an earlier one.
    pub fn as_map(&self) -> HashMap<&str, &Property> {
        self.iter().map(|p| (p.name(), p)).collect()
    }

    /// Substitute the first property with the same name as `property`.
    ///
    /// A name that matches nothing does not append: the result holds the same
    /// properties as the receiver. An empty receiver is returned as is.
    pub fn replace(&self, property: Property) -> Data {
        let mut props = self.properties.to_vec();
        if let Some(slot) = props.iter_mut().find(|p| p.name() == property.name()) {
            *slot = Arc::new(property);
        }
        if props.is_empty() {
            return self.clone();
        }
        Data::from_shared(props)
    }

    pub fn add(&self, property: Property) -> Data {
        self.add_all(std::iter::once(property))
    }

    /// Append `to_add` in order. Nothing to add returns the receiver itself.
    pub fn add_all(&self, to_add: impl IntoIterator<Item = Property>) -> Data {
        let mut added = to_add.into_iter().map(Arc::new).peekable();
        if added.peek().is_none() {
            return self.clone();
        }
        let mut props = self.properties.to_vec();
        props.extend(added);
        Data::from_shared(props)
    }

    /// Replace every property. An empty `properties` returns the receiver itself.
    pub fn set(&self, properties: impl IntoIterator<Item = Property>) -> Data {
        let mut props = properties.into_iter().peekable();
        if props.peek().is_none() {
            return self.clone();
        }
        props.collect()
    }

    /// True when both handles point at the same property storage.
    pub fn ptr_eq(a: &Data, b: &Data) -> bool {
        Arc::ptr_eq(&a.properties, &b.properties)
    }

    /// Encode as a JSON array of property nodes.
    pub fn to_json(&self) -> serde_json::Value {
        crate::json::data_to_json(self)
    }

    /// Decode a JSON array of property nodes, skipping anything unrecognised.
    pub fn from_json(node: &serde_json::Value) -> Data {
        crate::from_json::data_from_json(node)
    }

    /// Parse JSON text holding an array of property nodes.
    pub fn from_json_str(input: &str) -> Result<Data> {
        let node: serde_json::Value = serde_json::from_str(input)?;
        Ok(Data::from_json(&node))
    }

    /// Flatten into a `name -> value` object. See [`crate::json::to_tree`].
    pub fn to_tree(&self) -> serde_json::Map<String, serde_json::Value> {
        crate::json::to_tree(self)
    }

    /// Deserialize the flattened tree into `T`, or `None` if it does not fit.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Option<T> {
        crate::json::to_typed(self)
    }
}

impl Default for Data {
    fn default() -> Self {
        Data::from_shared(Vec::new())
    }
}

impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl FromIterator<Property> for Data {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        Data::from_shared(iter.into_iter().map(Arc::new).collect())
    }
}

impl<'a> IntoIterator for &'a Data {
    type Item = &'a Property;
    type IntoIter =
        std::iter::Map<std::slice::Iter<'a, Arc<Property>>, fn(&'a Arc<Property>) -> &'a Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter().map(unshare as fn(&'a Arc<Property>) -> &'a Property)
    }
}

fn unshare(property: &Arc<Property>) -> &Property {
    property
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn prop(name: &str, n: i64) -> Property {
        Property::with_value(name, None, Some(Value::from(n)))
    }

    #[test]
    fn lookup_by_name_takes_first_duplicate() {
        let data = Data::new(vec![prop("a", 1), prop("a", 2)]);
        assert_eq!(data.property_by_name("a"), Some(&prop("a", 1)));
        assert_eq!(data.get(1), Some(&prop("a", 2)));
        assert_eq!(data.get(2), None);
        assert_eq!(data.property_by_name("b"), None);
    }

    #[test]
    fn as_map_keeps_last_duplicate() {
        let data = Data::new(vec![prop("a", 1), prop("a", 2), prop("b", 3)]);
        let map = data.as_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], &prop("a", 2));
    }

    #[test]
    fn replace_substitutes_first_match() {
        let data = Data::new(vec![prop("a", 1), prop("b", 2)]);
        let replaced = data.replace(prop("a", 9));
        assert_eq!(replaced, Data::new(vec![prop("a", 9), prop("b", 2)]));
        // receiver untouched
        assert_eq!(data, Data::new(vec![prop("a", 1), prop("b", 2)]));
    }

    #[test]
    fn replace_only_touches_first_duplicate() {
        let data = Data::new(vec![prop("a", 1), prop("a", 2)]);
        let replaced = data.replace(prop("a", 9));
        assert_eq!(replaced, Data::new(vec![prop("a", 9), prop("a", 2)]));
    }

    #[test]
    fn replace_without_match_does_not_append() {
        let data = Data::new(vec![prop("a", 1), prop("b", 2)]);
        let replaced = data.replace(prop("c", 9));
        assert_eq!(replaced, data);
        assert_eq!(replaced.len(), 2);
    }

    #[test]
    fn replace_on_empty_returns_receiver() {
        let data = Data::default();
        let replaced = data.replace(prop("a", 1));
        assert!(replaced.is_empty());
        assert!(Data::ptr_eq(&data, &replaced));
    }

    #[test]
    fn no_op_mutators_return_receiver() {
        let data = Data::new(vec![prop("a", 1)]);
        assert!(Data::ptr_eq(&data, &data.add_all(Vec::<Property>::new())));
        assert!(Data::ptr_eq(&data, &data.set(Vec::<Property>::new())));
    }

    #[test]
    fn add_appends_and_shares_existing_properties() {
        let data = Data::new(vec![prop("a", 1)]);
        let added = data.add(prop("b", 2));
        assert_eq!(added, Data::new(vec![prop("a", 1), prop("b", 2)]));
        assert_eq!(data.len(), 1);
        assert!(Arc::ptr_eq(&data.properties[0], &added.properties[0]));

        let more = added.add_all(vec![prop("c", 3), prop("d", 4)]);
        let names: Vec<&str> = more.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn set_replaces_everything() {
        let data = Data::new(vec![prop("a", 1), prop("b", 2)]);
        let set = data.set(vec![prop("z", 0)]);
        assert_eq!(set, Data::new(vec![prop("z", 0)]));
    }

    #[test]
    fn find_property_with_predicate() {
        let data = Data::new(vec![
            prop("a", 1),
            Property::with_array("tags", None, vec![Value::from("x")]),
        ]);
        let found = data.find_property(|p| p.is_array()).unwrap();
        assert_eq!(found.name(), "tags");
        assert!(data.find_property(|p| p.is_object()).is_none());
    }

    #[test]
    fn iterates_in_insertion_order() {
        let data = Data::new(vec![prop("b", 1), prop("a", 2), prop("c", 3)]);
        let names: Vec<&str> = (&data).into_iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
