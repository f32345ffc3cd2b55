//! DOM Attribute handling.

use indexmap::IndexMap;
use std::sync::Arc;

/// Map of element attributes preserving insertion order.
#[derive(Clone, Debug, Default)]
pub struct AttributeMap {
    attrs: IndexMap<Arc<str>, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self {
            attrs: IndexMap::new(),
        }
    }

    /// Set an attribute value.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.attrs.get_mut(name) {
            Some(existing) => {
                existing.clear();
                existing.push_str(value);
            }
            None => {
                self.attrs.insert(Arc::from(name), value.to_string());
            }
        }
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    /// Remove an attribute.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.attrs.shift_remove(name)
    }

    /// Check if attribute exists.
    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Get attribute names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(|k| k.as_ref())
    }
}

/// Read-only view over the `data-*` attributes of an element.
pub struct DataAttributes<'a> {
    attrs: &'a AttributeMap,
}

impl<'a> DataAttributes<'a> {
    pub fn new(attrs: &'a AttributeMap) -> Self {
        Self { attrs }
    }

    /// Get a data attribute value by its short name (`value` for `data-value`).
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.attrs.get(&data_attribute_name(name))
    }

    /// Iterate over data attributes, yielding short names.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.attrs
            .iter()
            .filter(|(k, _)| k.starts_with("data-"))
            .map(|(k, v)| (&k[5..], v))
    }
}

/// Full attribute name for a dataset key.
pub fn data_attribute_name(name: &str) -> String {
    format!("data-{}", name.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_map() {
        let mut map = AttributeMap::new();
        map.set("id", "test");
        map.set("class", "foo bar");

        assert_eq!(map.get("id"), Some("test"));
        assert_eq!(map.get("class"), Some("foo bar"));
        assert!(map.contains("id"));
        assert!(!map.contains("style"));
    }

    #[test]
    fn test_overwrite_keeps_order() {
        let mut map = AttributeMap::new();
        map.set("class", "a");
        map.set("tabindex", "0");
        map.set("class", "b");

        let names: Vec<_> = map.names().collect();
        assert_eq!(names, vec!["class", "tabindex"]);
        assert_eq!(map.get("class"), Some("b"));

        map.remove("class");
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["tabindex"]);
    }

    #[test]
    fn test_data_attributes() {
        let mut map = AttributeMap::new();
        map.set("data-value", "apple");
        map.set("data-custom", "");
        map.set("class", "custom-select-option");

        let data = DataAttributes::new(&map);
        assert_eq!(data.get("value"), Some("apple"));
        assert_eq!(data.get("VALUE"), Some("apple"));
        assert_eq!(data.iter().count(), 2);
    }
}
