//! Capability traits for array-like and mapping-like values.
//!
//! These replace runtime attribute probing: a value is array-like exactly
//! when it can hand out an [`Indexable`], and mapping-like exactly when it
//! can hand out a [`Keyed`]. See [`Value::as_indexable`] and
//! [`Value::as_keyed`].

use indexmap::IndexMap;

use crate::value::Value;

/// Indexed element access plus iteration.
pub trait Indexable {
    /// Number of items along the leading axis.
    fn len(&self) -> usize;

    /// Item at `index` along the leading axis, or `None` when out of range.
    fn item(&self, index: usize) -> Option<Value>;

    /// Whether there are no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all items along the leading axis.
    fn items(&self) -> Box<dyn Iterator<Item = Value> + '_> {
        Box::new((0..self.len()).filter_map(move |i| self.item(i)))
    }
}

/// Access by key plus key enumeration.
pub trait Keyed {
    /// Keys in iteration order.
    fn keys(&self) -> Vec<&str>;

    /// Value stored under `key`.
    fn value(&self, key: &str) -> Option<&Value>;

    /// Whether `key` is present.
    fn contains_key(&self, key: &str) -> bool {
        self.value(key).is_some()
    }
}

impl Indexable for [Value] {
    fn len(&self) -> usize {
        <[Value]>::len(self)
    }

    fn item(&self, index: usize) -> Option<Value> {
        self.get(index).cloned()
    }
}

impl Indexable for Vec<Value> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Option<Value> {
        self.get(index).cloned()
    }
}

impl Keyed for IndexMap<String, Value> {
    fn keys(&self) -> Vec<&str> {
        IndexMap::keys(self).map(String::as_str).collect()
    }

    fn value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_items_in_order() {
        let list = vec![Value::Int(1), Value::from("a"), Value::Null];
        let items: Vec<_> = Indexable::items(&list).collect();
        assert_eq!(items, list);
        assert_eq!(Indexable::item(&list, 3), None);
    }

    #[test]
    fn map_keys_in_insertion_order() {
        let mut map = IndexMap::new();
        map.insert("b".to_string(), Value::Int(2));
        map.insert("a".to_string(), Value::Int(1));
        assert_eq!(Keyed::keys(&map), ["b", "a"]);
        assert!(Keyed::contains_key(&map, "a"));
        assert_eq!(Keyed::value(&map, "c"), None);
    }
}
