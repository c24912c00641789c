//! Generic collection
//!
//! Holds scalar and opaque payloads. Only the core accessors and the shared
//! JSON encoding work here; every shape-dependent operation reports
//! not-implemented.

use crate::contract::{
    Aggregate, BoxedCollection, CollectionCore, Convert, Inspect, Mutate, Search, SetAlgebra,
    Transform,
};
use crate::error::CollectionError;
use crate::payload::{Payload, Variant};

/// Collection over a payload with no specialized variant
#[derive(Debug, Clone, Default)]
pub struct BaseCollection {
    payload: Payload,
    pending: Option<CollectionError>,
}

impl BaseCollection {
    /// Wrap any payload
    pub fn new(payload: impl Into<Payload>) -> Self {
        Self {
            payload: payload.into(),
            pending: None,
        }
    }
}

impl CollectionCore for BaseCollection {
    fn variant(&self) -> Variant {
        Variant::Base
    }

    fn value(&self) -> Payload {
        self.payload.clone()
    }

    fn count(&self) -> usize {
        self.payload.len()
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

impl Transform for BaseCollection {}
impl SetAlgebra for BaseCollection {}
impl Aggregate for BaseCollection {}
impl Search for BaseCollection {}
impl Mutate for BaseCollection {}
impl Convert for BaseCollection {}
impl Inspect for BaseCollection {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn scalar_count() {
        assert_eq!(BaseCollection::new(json!(5)).count(), 1);
        assert_eq!(BaseCollection::new(Value::Null).count(), 0);
        assert_eq!(BaseCollection::default().length(), 0);
    }

    #[test]
    fn shape_operations_are_not_implemented() {
        let base = BaseCollection::new(json!("text"));
        assert_eq!(
            base.try_reverse().unwrap_err(),
            CollectionError::not_implemented("reverse")
        );
        assert_eq!(
            base.try_sum(None).unwrap_err(),
            CollectionError::not_implemented("sum")
        );
        assert!(!base.contains(&json!("text")));
        assert!(base.try_dump_to(&mut Vec::<u8>::new()).is_err());
    }

    #[test]
    fn with_error_keeps_payload() {
        let base = BaseCollection::new(json!(true));
        let failed = base.take(3);
        assert_eq!(failed.value(), Payload::Scalar(json!(true)));
        assert_eq!(failed.pending_error(), Some(&CollectionError::not_implemented("take")));
        assert!(base.pending_error().is_none());
    }
}
