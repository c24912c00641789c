//! Two-dimensional collection
//!
//! Supports only the accessors, `collapse`, `concat`, dumps and JSON
//! encoding. Everything else reports not-implemented exactly as
//! [`BaseCollection`](super::BaseCollection) does.

use std::io::Write;

use serde_json::Value;

use super::{boxed_matrix, boxed_sequence, shape_mismatch};
use crate::contract::{
    Aggregate, BoxedCollection, CollectionCore, Convert, Inspect, Mutate, Search, SetAlgebra,
    Transform, dump_payload,
};
use crate::error::{CollectionError, CollectionResult};
use crate::payload::{Payload, Variant};

/// Collection over a sequence of rows
#[derive(Debug, Clone, Default)]
pub struct MatrixCollection {
    rows: Vec<Vec<Value>>,
    pending: Option<CollectionError>,
}

impl MatrixCollection {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows,
            pending: None,
        }
    }

    /// Borrow the rows
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }
}

impl From<Vec<Vec<Value>>> for MatrixCollection {
    fn from(rows: Vec<Vec<Value>>) -> Self {
        Self::new(rows)
    }
}

impl CollectionCore for MatrixCollection {
    fn variant(&self) -> Variant {
        Variant::Matrix
    }

    fn value(&self) -> Payload {
        Payload::Matrix(self.rows.clone())
    }

    fn count(&self) -> usize {
        self.rows.len()
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

impl Transform for MatrixCollection {
    /// Rows flattened in order
    ///
    /// An empty first row yields an empty collection even when later rows
    /// hold items. The flattened items are classified like any collected
    /// sequence, so rows of objects collapse into records.
    fn try_collapse(&self) -> CollectionResult<BoxedCollection> {
        if self.rows.first().is_none_or(Vec::is_empty) {
            return Ok(boxed_sequence(Vec::new()));
        }
        Ok(boxed_sequence(self.rows.concat()))
    }
}

impl SetAlgebra for MatrixCollection {
    fn try_concat(&self, other: &Payload) -> CollectionResult<BoxedCollection> {
        let tail: &[Vec<Value>] = match other {
            Payload::Matrix(tail) => tail,
            Payload::Items(tail) if tail.is_empty() => &[],
            _ => return Err(shape_mismatch("concat", "matrix", other)),
        };
        let mut rows = Vec::with_capacity(self.rows.len() + tail.len());
        rows.extend_from_slice(&self.rows);
        rows.extend_from_slice(tail);
        Ok(boxed_matrix(rows))
    }
}

impl Aggregate for MatrixCollection {}
impl Search for MatrixCollection {}
impl Mutate for MatrixCollection {}

impl Convert for MatrixCollection {
    fn try_to_multi_dimensional_array(&self) -> CollectionResult<Vec<Vec<Value>>> {
        Ok(self.rows.clone())
    }

    fn try_to_json(&self) -> CollectionResult<String> {
        serde_json::to_string(&self.rows).map_err(|e| CollectionError::serialization(&e))
    }
}

impl Inspect for MatrixCollection {
    fn try_dump_to(&self, sink: &mut dyn Write) -> CollectionResult<()> {
        dump_payload(self, sink)
    }
}
