//! Search and predicate family

use serde_json::{Map, Value};

use super::{BoxedCollection, CollectionCore, Predicate, recover, settle};
use crate::error::{CollectionError, CollectionResult};
use crate::operator::Operator;

/// Lookups, membership tests and record queries
pub trait Search: CollectionCore {
    /// Whether `value` is among the items (among the values for maps)
    fn try_contains(&self, value: &Value) -> CollectionResult<bool> {
        let _ = value;
        Err(CollectionError::not_implemented("contains"))
    }

    fn contains(&self, value: &Value) -> bool {
        settle(self.try_contains(value), false)
    }

    /// Position of the first item equal to `value`
    fn try_search(&self, value: &Value) -> CollectionResult<Option<usize>> {
        let _ = value;
        Err(CollectionError::not_implemented("search"))
    }

    fn search(&self, value: &Value) -> Option<usize> {
        settle(self.try_search(value), None)
    }

    /// First item, or the first passing `predicate`
    fn try_first(&self, predicate: Option<Predicate<'_>>) -> CollectionResult<Option<Value>> {
        let _ = predicate;
        Err(CollectionError::not_implemented("first"))
    }

    fn first(&self, predicate: Option<Predicate<'_>>) -> Option<Value> {
        settle(self.try_first(predicate), None)
    }

    /// Last item, or the last passing `predicate`
    fn try_last(&self, predicate: Option<Predicate<'_>>) -> CollectionResult<Option<Value>> {
        let _ = predicate;
        Err(CollectionError::not_implemented("last"))
    }

    fn last(&self, predicate: Option<Predicate<'_>>) -> Option<Value> {
        settle(self.try_last(predicate), None)
    }

    /// First record whose `key` field satisfies `operator` against `value`
    fn try_first_where(
        &self,
        key: &str,
        operator: Operator,
        value: &Value,
    ) -> CollectionResult<Option<Map<String, Value>>> {
        let _ = (key, operator, value);
        Err(CollectionError::not_implemented("first_where"))
    }

    fn first_where(
        &self,
        key: &str,
        operator: Operator,
        value: &Value,
    ) -> Option<Map<String, Value>> {
        settle(self.try_first_where(key, operator, value), None)
    }

    /// Whether every one of `keys` is present
    fn try_has(&self, keys: &[&str]) -> CollectionResult<bool> {
        let _ = keys;
        Err(CollectionError::not_implemented("has"))
    }

    fn has(&self, keys: &[&str]) -> bool {
        settle(self.try_has(keys), false)
    }

    fn try_get(&self, key: &str) -> CollectionResult<Option<Value>> {
        let _ = key;
        Err(CollectionError::not_implemented("get"))
    }

    fn get(&self, key: &str) -> Option<Value> {
        settle(self.try_get(key), None)
    }

    fn try_is_empty(&self) -> CollectionResult<bool> {
        Err(CollectionError::not_implemented("is_empty"))
    }

    fn is_empty(&self) -> bool {
        settle(self.try_is_empty(), false)
    }

    fn try_is_not_empty(&self) -> CollectionResult<bool> {
        Err(CollectionError::not_implemented("is_not_empty"))
    }

    fn is_not_empty(&self) -> bool {
        settle(self.try_is_not_empty(), false)
    }

    /// Whether every item passes `predicate`; true when empty
    fn try_every(&self, predicate: Predicate<'_>) -> CollectionResult<bool> {
        let _ = predicate;
        Err(CollectionError::not_implemented("every"))
    }

    fn every(&self, predicate: Predicate<'_>) -> bool {
        settle(self.try_every(predicate), false)
    }

    /// Records whose `key` field satisfies `operator` against `value`
    fn try_where_by(
        &self,
        key: &str,
        operator: Operator,
        value: &Value,
    ) -> CollectionResult<BoxedCollection> {
        let _ = (key, operator, value);
        Err(CollectionError::not_implemented("where_by"))
    }

    fn where_by(&self, key: &str, operator: Operator, value: &Value) -> BoxedCollection {
        recover(self, self.try_where_by(key, operator, value))
    }

    /// Records whose `key` field is among `values`
    fn try_where_in(&self, key: &str, values: &[Value]) -> CollectionResult<BoxedCollection> {
        let _ = (key, values);
        Err(CollectionError::not_implemented("where_in"))
    }

    fn where_in(&self, key: &str, values: &[Value]) -> BoxedCollection {
        recover(self, self.try_where_in(key, values))
    }

    /// Records whose `key` field is not among `values`
    fn try_where_not_in(&self, key: &str, values: &[Value]) -> CollectionResult<BoxedCollection> {
        let _ = (key, values);
        Err(CollectionError::not_implemented("where_not_in"))
    }

    fn where_not_in(&self, key: &str, values: &[Value]) -> BoxedCollection {
        recover(self, self.try_where_not_in(key, values))
    }
}
