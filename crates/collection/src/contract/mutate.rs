//! Mutation family
//!
//! Nothing here mutates in place: each operation returns a new collection
//! and leaves the receiver untouched.

use serde_json::Value;

use super::{BoxedCollection, CollectionCore, recover};
use crate::error::{CollectionError, CollectionResult};

/// Insert and remove operations
pub trait Mutate: CollectionCore {
    /// Append `item`
    fn try_push(&self, item: Value) -> CollectionResult<BoxedCollection> {
        let _ = item;
        Err(CollectionError::not_implemented("push"))
    }

    fn push(&self, item: Value) -> BoxedCollection {
        recover(self, self.try_push(item))
    }

    /// Insert `item` at the front
    fn try_prepend(&self, item: Value) -> CollectionResult<BoxedCollection> {
        let _ = item;
        Err(CollectionError::not_implemented("prepend"))
    }

    fn prepend(&self, item: Value) -> BoxedCollection {
        recover(self, self.try_prepend(item))
    }

    /// Remove the last item, returning the rest and the removed item
    fn try_pop(&self) -> CollectionResult<(BoxedCollection, Option<Value>)> {
        Err(CollectionError::not_implemented("pop"))
    }

    fn pop(&self) -> (BoxedCollection, Option<Value>) {
        self.try_pop()
            .unwrap_or_else(|error| (recover(self, Err(error)), None))
    }

    /// Remove the first item, returning the rest and the removed item
    fn try_shift(&self) -> CollectionResult<(BoxedCollection, Option<Value>)> {
        Err(CollectionError::not_implemented("shift"))
    }

    fn shift(&self) -> (BoxedCollection, Option<Value>) {
        self.try_shift()
            .unwrap_or_else(|error| (recover(self, Err(error)), None))
    }

    /// Remove `key`; a missing key is an error
    fn try_pull(&self, key: &str) -> CollectionResult<BoxedCollection> {
        let _ = key;
        Err(CollectionError::not_implemented("pull"))
    }

    fn pull(&self, key: &str) -> BoxedCollection {
        recover(self, self.try_pull(key))
    }

    /// Insert or replace `key`
    fn try_put(&self, key: &str, value: Value) -> CollectionResult<BoxedCollection> {
        let _ = (key, value);
        Err(CollectionError::not_implemented("put"))
    }

    fn put(&self, key: &str, value: Value) -> BoxedCollection {
        recover(self, self.try_put(key, value))
    }

    /// Remove `key` if present
    fn try_forget(&self, key: &str) -> CollectionResult<BoxedCollection> {
        let _ = key;
        Err(CollectionError::not_implemented("forget"))
    }

    fn forget(&self, key: &str) -> BoxedCollection {
        recover(self, self.try_forget(key))
    }
}
