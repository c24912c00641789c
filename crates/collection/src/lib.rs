#![warn(clippy::all)]
//! # nebula-collection
//!
//! Fluent, chainable collections over JSON-shaped payloads.
//!
//! [`collect`] inspects a [`Payload`] and builds the matching variant:
//!
//! - flat sequences become [`ItemsCollection`]
//! - keyed mappings become [`MapCollection`]
//! - sequences of mappings become [`RecordsCollection`]
//! - sequences of sequences become [`MatrixCollection`]
//! - anything else lands in [`BaseCollection`]
//!
//! Every variant implements the whole [`Collection`] contract. Operations a
//! shape cannot support report [`CollectionError::NotImplemented`].
//!
//! ## Two forms per operation
//!
//! `try_<op>` returns a [`CollectionResult`]; `<op>` returns a zero value on
//! failure so calls can be chained. A chained call that fails hands back a
//! copy of its receiver with the error in
//! [`pending_error`](CollectionCore::pending_error).
//!
//! ```
//! use nebula_collection::prelude::*;
//!
//! let orders = collect(json!([
//!     {"sku": "a", "qty": 2, "price": 1.5},
//!     {"sku": "b", "qty": 0, "price": 4},
//!     {"sku": "c", "qty": 5, "price": 0.1},
//! ]));
//!
//! let in_stock = orders.where_by("qty", Operator::Gt, &json!(0));
//! assert_eq!(in_stock.count(), 2);
//! assert_eq!(in_stock.sum(Some("price")).to_string(), "1.6");
//!
//! // Matrix payloads cannot be summed.
//! let grid = collect(json!([[1, 2], [3]]));
//! assert!(grid.try_sum(None).unwrap_err().is_not_implemented());
//! assert_eq!(grid.collapse().all(), vec![json!(1), json!(2), json!(3)]);
//! ```

pub mod aggregate;
pub mod config;
pub mod contract;
pub mod dump;
pub mod error;
pub mod operator;
pub mod payload;
pub mod value_utils;
pub mod variants;

pub use config::{CollectionConfig, DumpConfig, DumpFormat, DumpTarget};
pub use contract::{
    Aggregate, BoxedCollection, Collection, CollectionCore, Convert, ConvertExt, Inspect,
    KeyedMapper, Mapper, Mutate, Predicate, Reducer, Search, SetAlgebra, Transform, Visitor,
};
pub use dump::Halt;
pub use error::{CollectionError, CollectionResult};
pub use operator::Operator;
pub use payload::{Opaque, Payload, Record, Variant};
pub use variants::{
    BaseCollection, ItemsCollection, MapCollection, MatrixCollection, RecordsCollection,
};

/// Wrap a payload in the collection variant matching its shape
pub fn collect(payload: impl Into<Payload>) -> BoxedCollection {
    let payload = payload.into();
    tracing::trace!(
        variant = %payload.variant(),
        length = payload.len(),
        "building collection"
    );
    variants::from_payload(payload)
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Aggregate, BoxedCollection, Collection, CollectionCore, CollectionError,
        CollectionResult, Convert, ConvertExt, Halt, Inspect, Mutate, Operator, Payload, Search,
        SetAlgebra, Transform, collect,
    };
    pub use rust_decimal::Decimal;
    pub use serde_json::json;
}
