//! Collection variants, one per payload shape

mod base;
mod items;
mod map;
mod matrix;
mod records;
mod sequence;

pub use base::BaseCollection;
pub use items::ItemsCollection;
pub use map::MapCollection;
pub use matrix::MatrixCollection;
pub use records::RecordsCollection;

use serde_json::Value;

use crate::contract::BoxedCollection;
use crate::error::{CollectionError, CollectionResult};
use crate::payload::{Payload, Record};

/// Build the variant matching the payload's tag
pub fn from_payload(payload: Payload) -> BoxedCollection {
    match payload {
        Payload::Items(items) => Box::new(ItemsCollection::new(items)),
        Payload::Matrix(rows) => Box::new(MatrixCollection::new(rows)),
        Payload::Map(map) => Box::new(MapCollection::new(map)),
        Payload::Records(records) => Box::new(RecordsCollection::new(records)),
        other @ (Payload::Scalar(_) | Payload::Opaque(_)) => Box::new(BaseCollection::new(other)),
    }
}

/// Sequence result, classified the same way `collect` classifies a payload
fn boxed_sequence(items: Vec<Value>) -> BoxedCollection {
    from_payload(Payload::from(Value::Array(items)))
}

fn boxed_map(map: Record) -> BoxedCollection {
    Box::new(MapCollection::new(map))
}

fn boxed_records(records: Vec<Value>) -> BoxedCollection {
    Box::new(RecordsCollection::from_values(records))
}

fn boxed_matrix(rows: Vec<Vec<Value>>) -> BoxedCollection {
    Box::new(MatrixCollection::new(rows))
}

/// Operand shape check for `merge` / `concat`
fn shape_mismatch(operation: &'static str, expected: &str, other: &Payload) -> CollectionError {
    CollectionError::type_mismatch(operation, expected, other.shape_name())
}

/// Flat sequences aggregate whole items and take no field key
fn reject_key(operation: &'static str, key: Option<&str>) -> CollectionResult<()> {
    match key {
        None => Ok(()),
        Some(key) => Err(CollectionError::invalid_argument(
            operation,
            format!("flat sequences take no field key, got '{key}'"),
        )),
    }
}
