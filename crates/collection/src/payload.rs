//! Payload shapes
//!
//! A collection wraps exactly one [`Payload`]. The tag decides which
//! collection variant [`collect`](crate::collect) builds, and every
//! shape-dependent operation matches on it before doing any work.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Map, Value};

/// A JSON object as stored in map and record payloads
pub type Record = Map<String, Value>;

/// The closed set of shapes a collection can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Ordered sequence of items
    Items(Vec<Value>),
    /// Ordered sequence of ordered sequences
    Matrix(Vec<Vec<Value>>),
    /// Keyed mapping, insertion ordered
    Map(Record),
    /// Ordered sequence of keyed mappings
    Records(Vec<Record>),
    /// Any other JSON value
    Scalar(Value),
    /// A host value with no JSON form
    Opaque(Opaque),
}

impl Payload {
    /// Build an `Items` payload from anything convertible into JSON values
    pub fn items<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Items(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Matrix` payload from nested rows
    pub fn matrix<R, I, T>(rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Matrix(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Wrap a host value that cannot be encoded as JSON
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Opaque::new(value))
    }

    /// Top-level item count
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Matrix(rows) => rows.len(),
            Self::Map(map) => map.len(),
            Self::Records(records) => records.len(),
            Self::Scalar(Value::Null) => 0,
            Self::Scalar(_) | Self::Opaque(_) => 1,
        }
    }

    /// Check if there are no top-level items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Variant that [`collect`](crate::collect) builds for this payload
    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Items(_) => Variant::Items,
            Self::Matrix(_) => Variant::Matrix,
            Self::Map(_) => Variant::Map,
            Self::Records(_) => Variant::Records,
            Self::Scalar(_) | Self::Opaque(_) => Variant::Base,
        }
    }

    /// Shape name used in type-mismatch errors
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Items(_) => "items",
            Self::Matrix(_) => "matrix",
            Self::Map(_) => "map",
            Self::Records(_) => "records",
            Self::Scalar(_) => "scalar",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Top-level elements of any sequence shape
    ///
    /// Rows and records come back as JSON arrays and objects. Maps, scalars
    /// and opaque values are not sequences.
    #[must_use]
    pub fn sequence_items(&self) -> Option<Vec<Value>> {
        match self {
            Self::Items(items) => Some(items.clone()),
            Self::Matrix(rows) => Some(rows.iter().cloned().map(Value::Array).collect()),
            Self::Records(records) => Some(records.iter().cloned().map(Value::Object).collect()),
            Self::Map(_) | Self::Scalar(_) | Self::Opaque(_) => None,
        }
    }

    /// JSON form of the payload, `None` for opaque values
    #[must_use]
    pub fn to_json_value(&self) -> Option<Value> {
        match self {
            Self::Items(_) | Self::Matrix(_) | Self::Records(_) => {
                self.sequence_items().map(Value::Array)
            }
            Self::Map(map) => Some(Value::Object(map.clone())),
            Self::Scalar(value) => Some(value.clone()),
            Self::Opaque(_) => None,
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::Scalar(Value::Null)
    }
}

// ==================== Classification ====================

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_array) => {
                Self::Matrix(
                    items
                        .into_iter()
                        .filter_map(|row| match row {
                            Value::Array(row) => Some(row),
                            _ => None,
                        })
                        .collect(),
                )
            }
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                Self::Records(
                    items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::Object(record) => Some(record),
                            _ => None,
                        })
                        .collect(),
                )
            }
            Value::Array(items) => Self::Items(items),
            Value::Object(map) => Self::Map(map),
            other => Self::Scalar(other),
        }
    }
}

impl From<Vec<Value>> for Payload {
    fn from(items: Vec<Value>) -> Self {
        Self::Items(items)
    }
}

impl From<Vec<Vec<Value>>> for Payload {
    fn from(rows: Vec<Vec<Value>>) -> Self {
        Self::Matrix(rows)
    }
}

impl From<Record> for Payload {
    fn from(map: Record) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<Record>> for Payload {
    fn from(records: Vec<Record>) -> Self {
        Self::Records(records)
    }
}

impl From<Opaque> for Payload {
    fn from(value: Opaque) -> Self {
        Self::Opaque(value)
    }
}

// ==================== Serialization ====================

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Items(items) => items.serialize(serializer),
            Self::Matrix(rows) => rows.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
            Self::Records(records) => records.serialize(serializer),
            Self::Scalar(value) => value.serialize(serializer),
            Self::Opaque(opaque) => Err(S::Error::custom(format!(
                "opaque payload `{}` has no JSON representation",
                opaque.type_name()
            ))),
        }
    }
}

// ============================================================================
// OPAQUE HOST VALUES
// ============================================================================

/// Host value carried through a collection without a JSON form
///
/// Cloning shares the underlying value.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    /// Wrap a host value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    /// Rust type name of the wrapped value
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the wrapped value as `T`
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.type_name)
    }
}

/// Identity comparison: two opaque values are equal when they share storage
impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

// ============================================================================
// VARIANTS
// ============================================================================

/// Concrete collection variant, one per payload shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Generic container, shape-dependent operations unsupported
    Base,
    /// Flat sequence
    Items,
    /// Keyed mapping
    Map,
    /// Sequence of keyed mappings
    Records,
    /// Sequence of sequences
    Matrix,
}

impl Variant {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Items => "items",
            Self::Map => "map",
            Self::Records => "records",
            Self::Matrix => "matrix",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_nested_arrays_as_matrix() {
        let payload = Payload::from(json!([[1, 2], [3]]));
        assert_eq!(
            payload,
            Payload::Matrix(vec![vec![json!(1), json!(2)], vec![json!(3)]])
        );
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.variant(), Variant::Matrix);
    }

    #[test]
    fn classifies_object_arrays_as_records() {
        let payload = Payload::from(json!([{"a": 1}, {"a": 2}]));
        assert_eq!(payload.variant(), Variant::Records);
        assert_eq!(payload.len(), 2);
    }

    #[test]
    fn sequence_items_flatten_one_level() {
        assert_eq!(
            Payload::from(json!([[1], [2, 3]])).sequence_items(),
            Some(vec![json!([1]), json!([2, 3])])
        );
        assert_eq!(Payload::from(json!([{"a": 1}])).sequence_items(), Some(vec![json!({"a": 1})]));
        assert_eq!(Payload::from(json!({"a": 1})).sequence_items(), None);
        assert_eq!(Payload::from(json!(7)).sequence_items(), None);
    }

    #[test]
    fn mixed_and_empty_arrays_stay_items() {
        assert_eq!(Payload::from(json!([])), Payload::Items(vec![]));
        assert_eq!(
            Payload::from(json!([[1], 2])).variant(),
            Variant::Items
        );
        assert_eq!(
            Payload::from(json!([{"a": 1}, 2])).variant(),
            Variant::Items
        );
    }

    #[test]
    fn scalars_and_objects() {
        assert_eq!(Payload::from(json!({"a": 1})).variant(), Variant::Map);
        assert_eq!(Payload::from(json!("x")).variant(), Variant::Base);
        assert_eq!(Payload::from(Value::Null).len(), 0);
        assert_eq!(Payload::from(json!(7)).len(), 1);
    }

    #[test]
    fn opaque_payload_refuses_to_serialize() {
        let payload = Payload::opaque(|| 42);
        let err = serde_json::to_string(&payload).unwrap_err();
        assert!(err.to_string().contains("has no JSON representation"));
        assert_eq!(payload.to_json_value(), None);
    }

    #[test]
    fn opaque_equality_is_identity() {
        let a = Opaque::new(5_u8);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Opaque::new(5_u8));
        assert_eq!(a.downcast_ref::<u8>(), Some(&5));
    }

    #[test]
    fn payload_serializes_like_its_json_value() {
        let payload = Payload::from(json!({"a": 1, "b": [1, 2]}));
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"a":1,"b":[1,2]}"#
        );
    }
}
