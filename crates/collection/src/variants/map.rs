//! Keyed mapping collection

use std::io::Write;

use serde_json::{Map, Value};

use super::{boxed_map, boxed_sequence, shape_mismatch};
use crate::contract::{
    Aggregate, BoxedCollection, CollectionCore, Convert, Inspect, Mutate, Search, SetAlgebra,
    Transform, dump_payload,
};
use crate::error::{CollectionError, CollectionResult};
use crate::payload::{Payload, Record, Variant};
use crate::value_utils::{key_string, values_equal};

/// Collection over an insertion-ordered JSON object
#[derive(Debug, Clone, Default)]
pub struct MapCollection {
    map: Record,
    pending: Option<CollectionError>,
}

impl MapCollection {
    pub fn new(map: Record) -> Self {
        Self { map, pending: None }
    }

    /// Borrow the entries
    pub fn entries(&self) -> &Record {
        &self.map
    }

    fn retain_keys(&self, keep: impl Fn(&str) -> bool) -> Record {
        self.map
            .iter()
            .filter(|(key, _)| keep(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl From<Record> for MapCollection {
    fn from(map: Record) -> Self {
        Self::new(map)
    }
}

impl CollectionCore for MapCollection {
    fn variant(&self) -> Variant {
        Variant::Map
    }

    fn value(&self) -> Payload {
        Payload::Map(self.map.clone())
    }

    fn count(&self) -> usize {
        self.map.len()
    }

    fn pending_error(&self) -> Option<&CollectionError> {
        self.pending.as_ref()
    }

    fn boxed(&self) -> BoxedCollection {
        Box::new(self.clone())
    }

    fn with_error(&self, error: CollectionError) -> BoxedCollection {
        let mut copy = self.clone();
        copy.pending.get_or_insert(error);
        Box::new(copy)
    }
}

impl Transform for MapCollection {
    fn try_select(&self, keys: &[&str]) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(self.retain_keys(|key| keys.contains(&key))))
    }

    fn try_only(&self, keys: &[&str]) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(self.retain_keys(|key| keys.contains(&key))))
    }

    fn try_except(&self, keys: &[&str]) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(self.retain_keys(|key| !keys.contains(&key))))
    }

    fn try_keys(&self) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(
            self.map.keys().cloned().map(Value::String).collect(),
        ))
    }

    /// Map from each value (as a key) to its key; the last key wins
    fn try_flip(&self) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(
            self.map
                .iter()
                .map(|(key, value)| (key_string(value), Value::String(key.clone())))
                .collect(),
        ))
    }
}

impl SetAlgebra for MapCollection {
    fn try_diff_assoc(&self, other: &Map<String, Value>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(
            self.map
                .iter()
                .filter(|(key, value)| {
                    other
                        .get(key.as_str())
                        .is_none_or(|theirs| !values_equal(value, theirs))
                })
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ))
    }

    fn try_diff_keys(&self, other: &Map<String, Value>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(self.retain_keys(|key| !other.contains_key(key))))
    }

    fn try_intersect_by_keys(
        &self,
        other: &Map<String, Value>,
    ) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(self.retain_keys(|key| other.contains_key(key))))
    }

    /// Right-hand entries replace left-hand ones; new keys are appended
    fn try_merge(&self, other: &Payload) -> CollectionResult<BoxedCollection> {
        let Payload::Map(theirs) = other else {
            return Err(shape_mismatch("merge", "map", other));
        };
        let mut merged = self.map.clone();
        for (key, value) in theirs {
            merged.insert(key.clone(), value.clone());
        }
        Ok(boxed_map(merged))
    }
}

impl Aggregate for MapCollection {}

impl Search for MapCollection {
    fn try_contains(&self, value: &Value) -> CollectionResult<bool> {
        Ok(self.map.values().any(|ours| values_equal(ours, value)))
    }

    fn try_has(&self, keys: &[&str]) -> CollectionResult<bool> {
        Ok(keys.iter().all(|key| self.map.contains_key(*key)))
    }

    fn try_get(&self, key: &str) -> CollectionResult<Option<Value>> {
        Ok(self.map.get(key).cloned())
    }

    fn try_is_empty(&self) -> CollectionResult<bool> {
        Ok(self.map.is_empty())
    }

    fn try_is_not_empty(&self) -> CollectionResult<bool> {
        Ok(!self.map.is_empty())
    }
}

impl Mutate for MapCollection {
    fn try_pull(&self, key: &str) -> CollectionResult<BoxedCollection> {
        if !self.map.contains_key(key) {
            return Err(CollectionError::key_not_found(key));
        }
        Ok(boxed_map(self.retain_keys(|ours| ours != key)))
    }

    fn try_put(&self, key: &str, value: Value) -> CollectionResult<BoxedCollection> {
        let mut map = self.map.clone();
        map.insert(key.to_owned(), value);
        Ok(boxed_map(map))
    }

    fn try_forget(&self, key: &str) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(self.retain_keys(|ours| ours != key)))
    }
}

impl Convert for MapCollection {
    fn try_to_map(&self) -> CollectionResult<Map<String, Value>> {
        Ok(self.map.clone())
    }

    fn try_mapping_source(&self) -> CollectionResult<Value> {
        Ok(Value::Object(self.map.clone()))
    }
}

impl Inspect for MapCollection {
    fn try_dump_to(&self, sink: &mut dyn Write) -> CollectionResult<()> {
        dump_payload(self, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> MapCollection {
        MapCollection::new(value.as_object().cloned().unwrap_or_default())
    }

    fn keys_of(collection: &BoxedCollection) -> Vec<String> {
        collection.to_map().keys().cloned().collect()
    }

    #[test]
    fn only_and_except_keep_order() {
        let m = map(json!({"a": 1, "b": 2, "c": 3}));
        assert_eq!(keys_of(&m.only(&["c", "a"])), vec!["a", "c"]);
        assert_eq!(keys_of(&m.except(&["b"])), vec!["a", "c"]);
        assert_eq!(keys_of(&m.select(&["b", "zz"])), vec!["b"]);
    }

    #[test]
    fn keys_are_items() {
        let m = map(json!({"x": 1, "y": 2}));
        assert_eq!(m.keys().all(), vec![json!("x"), json!("y")]);
    }

    #[test]
    fn flip_maps_values_to_keys() {
        let m = map(json!({"a": "x", "b": 1}));
        assert_eq!(m.flip().to_map(), map(json!({"x": "a", "1": "b"})).map);
    }

    #[test]
    fn merge_right_wins() {
        let m = map(json!({"a": 1, "b": 2}));
        let merged = m.merge(&Payload::from(json!({"b": 3, "c": 4})));
        assert_eq!(merged.to_map(), map(json!({"a": 1, "b": 3, "c": 4})).map);
        assert_eq!(
            m.try_merge(&Payload::from(json!([1]))).unwrap_err(),
            CollectionError::type_mismatch("merge", "map", "items")
        );
    }

    #[test]
    fn diff_assoc_compares_values() {
        let m = map(json!({"a": 1, "b": 2, "c": 3}));
        let other = map(json!({"a": 1.0, "b": 5})).map;
        assert_eq!(keys_of(&m.diff_assoc(&other)), vec!["b", "c"]);
        assert_eq!(keys_of(&m.diff_keys(&other)), vec!["c"]);
        assert_eq!(keys_of(&m.intersect_by_keys(&other)), vec!["a", "b"]);
    }

    #[test]
    fn pull_missing_key_is_an_error_but_forget_is_not() {
        let m = map(json!({"a": 1}));
        assert_eq!(
            m.try_pull("b").unwrap_err(),
            CollectionError::key_not_found("b")
        );
        let failed = m.pull("b");
        assert_eq!(failed.pending_error(), Some(&CollectionError::key_not_found("b")));
        assert_eq!(failed.count(), 1);
        assert_eq!(m.forget("b").count(), 1);
        assert_eq!(m.pull("a").count(), 0);
    }

    #[test]
    fn put_inserts_or_replaces() {
        let m = map(json!({"a": 1}));
        assert_eq!(m.put("a", json!(2)).get("a"), Some(json!(2)));
        assert_eq!(m.put("b", json!(3)).count(), 2);
        assert_eq!(m.get("a"), Some(json!(1)));
    }

    #[test]
    fn lookups() {
        let m = map(json!({"a": 1, "b": null}));
        assert!(m.has(&["a", "b"]));
        assert!(!m.has(&["a", "z"]));
        assert!(m.contains(&json!(1)));
        assert!(!m.contains(&json!("a")));
        assert!(m.is_not_empty());
        assert!(map(json!({})).is_empty());
    }

    #[test]
    fn to_json_keeps_insertion_order() {
        let m = map(json!({"z": 1, "a": 2}));
        assert_eq!(m.to_json(), r#"{"z":1,"a":2}"#);
    }
}
