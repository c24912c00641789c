//! Set and combination family

use serde_json::{Map, Value};

use super::{BoxedCollection, CollectionCore, recover};
use crate::error::{CollectionError, CollectionResult};
use crate::payload::Payload;

/// Operations combining the receiver with another payload
pub trait SetAlgebra: CollectionCore {
    /// Items absent from `other`, receiver order kept
    fn try_diff(&self, other: &[Value]) -> CollectionResult<BoxedCollection> {
        let _ = other;
        Err(CollectionError::not_implemented("diff"))
    }

    fn diff(&self, other: &[Value]) -> BoxedCollection {
        recover(self, self.try_diff(other))
    }

    /// Entries whose key or value differs from `other`
    fn try_diff_assoc(&self, other: &Map<String, Value>) -> CollectionResult<BoxedCollection> {
        let _ = other;
        Err(CollectionError::not_implemented("diff_assoc"))
    }

    fn diff_assoc(&self, other: &Map<String, Value>) -> BoxedCollection {
        recover(self, self.try_diff_assoc(other))
    }

    /// Entries whose key is absent from `other`
    fn try_diff_keys(&self, other: &Map<String, Value>) -> CollectionResult<BoxedCollection> {
        let _ = other;
        Err(CollectionError::not_implemented("diff_keys"))
    }

    fn diff_keys(&self, other: &Map<String, Value>) -> BoxedCollection {
        recover(self, self.try_diff_keys(other))
    }

    /// Items also present in `other`, receiver order kept
    fn try_intersect(&self, other: &[Value]) -> CollectionResult<BoxedCollection> {
        let _ = other;
        Err(CollectionError::not_implemented("intersect"))
    }

    fn intersect(&self, other: &[Value]) -> BoxedCollection {
        recover(self, self.try_intersect(other))
    }

    /// Entries whose key is also present in `other`
    fn try_intersect_by_keys(
        &self,
        other: &Map<String, Value>,
    ) -> CollectionResult<BoxedCollection> {
        let _ = other;
        Err(CollectionError::not_implemented("intersect_by_keys"))
    }

    fn intersect_by_keys(&self, other: &Map<String, Value>) -> BoxedCollection {
        recover(self, self.try_intersect_by_keys(other))
    }

    /// Merge a payload of the same shape into the receiver
    fn try_merge(&self, other: &Payload) -> CollectionResult<BoxedCollection> {
        let _ = other;
        Err(CollectionError::not_implemented("merge"))
    }

    fn merge(&self, other: &Payload) -> BoxedCollection {
        recover(self, self.try_merge(other))
    }

    /// Map pairing the receiver's items (as keys) with `values`
    fn try_combine(&self, values: &[Value]) -> CollectionResult<BoxedCollection> {
        let _ = values;
        Err(CollectionError::not_implemented("combine"))
    }

    fn combine(&self, values: &[Value]) -> BoxedCollection {
        recover(self, self.try_combine(values))
    }

    /// Receiver followed by `other`, which must have the receiver's shape
    fn try_concat(&self, other: &Payload) -> CollectionResult<BoxedCollection> {
        let _ = other;
        Err(CollectionError::not_implemented("concat"))
    }

    fn concat(&self, other: &Payload) -> BoxedCollection {
        recover(self, self.try_concat(other))
    }
}
