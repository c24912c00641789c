//! The collection contract
//!
//! The contract is a set of capability traits, one per operation family.
//! Every operation comes in two forms:
//!
//! - **explicit** (`try_take`, `try_sum`, ...) returns a [`CollectionResult`].
//!   These are the only methods a variant overrides. The default body
//!   reports [`CollectionError::NotImplemented`].
//! - **plain** (`take`, `sum`, ...) is provided once, here, on top of the
//!   explicit form. On failure it returns the operation's zero value; for
//!   operations producing a collection, that is a copy of the receiver
//!   carrying the error in [`CollectionCore::pending_error`].
//!
//! Both forms agree on success by construction.

mod aggregate;
mod convert;
mod inspect;
mod mutate;
mod search;
mod set_algebra;
mod transform;

pub use aggregate::Aggregate;
pub use convert::{Convert, ConvertExt};
pub use inspect::Inspect;
pub use mutate::Mutate;
pub use search::Search;
pub use set_algebra::SetAlgebra;
pub use transform::Transform;

pub(crate) use inspect::dump_payload;

use std::fmt;

use serde_json::Value;

use crate::error::{CollectionError, CollectionResult};
use crate::payload::{Payload, Variant};

/// A chained collection
pub type BoxedCollection = Box<dyn Collection>;

/// Item predicate, called with the item's position
pub type Predicate<'a> = &'a dyn Fn(usize, &Value) -> bool;

/// Item transform, called with the item's position
pub type Mapper<'a> = &'a dyn Fn(usize, &Value) -> Value;

/// Item transform producing a map entry
pub type KeyedMapper<'a> = &'a dyn Fn(usize, &Value) -> (String, Value);

/// Fold step
pub type Reducer<'a> = &'a dyn Fn(Value, &Value) -> Value;

/// Visitor for `each`; returning `false` stops the walk
pub type Visitor<'a> = &'a mut dyn FnMut(usize, &Value) -> bool;

/// Shape-agnostic operations every variant implements
pub trait CollectionCore: fmt::Debug + Send + Sync {
    /// Variant tag
    fn variant(&self) -> Variant;

    /// The wrapped payload
    fn value(&self) -> Payload;

    /// Number of top-level items, fixed at construction
    fn count(&self) -> usize;

    /// Alias of [`count`](Self::count)
    fn length(&self) -> usize {
        self.count()
    }

    /// First error recorded by a plain-form call that produced this copy
    fn pending_error(&self) -> Option<&CollectionError>;

    /// Clone into a box
    fn boxed(&self) -> BoxedCollection;

    /// Copy of this collection carrying `error`, unless it already carries one
    fn with_error(&self, error: CollectionError) -> BoxedCollection;
}

/// The full collection contract
pub trait Collection:
    CollectionCore + Transform + SetAlgebra + Aggregate + Search + Mutate + Convert + Inspect
{
}

impl<T> Collection for T where
    T: CollectionCore + Transform + SetAlgebra + Aggregate + Search + Mutate + Convert + Inspect
{
}

impl Clone for BoxedCollection {
    fn clone(&self) -> Self {
        self.boxed()
    }
}

/// Plain form of a collection-producing operation
pub(crate) fn recover<C>(receiver: &C, result: CollectionResult<BoxedCollection>) -> BoxedCollection
where
    C: CollectionCore + ?Sized,
{
    result.unwrap_or_else(|error| {
        tracing::debug!(
            variant = %receiver.variant(),
            %error,
            "collection operation failed; returning receiver with pending error"
        );
        receiver.with_error(error)
    })
}

/// Plain form of an operation producing a pair of collections
pub(crate) fn recover_pair<C>(
    receiver: &C,
    result: CollectionResult<(BoxedCollection, BoxedCollection)>,
) -> (BoxedCollection, BoxedCollection)
where
    C: CollectionCore + ?Sized,
{
    result.unwrap_or_else(|error| {
        tracing::debug!(
            variant = %receiver.variant(),
            %error,
            "collection operation failed; returning receiver with pending error"
        );
        (receiver.with_error(error.clone()), receiver.with_error(error))
    })
}

/// Plain form of an operation producing a scalar
pub(crate) fn settle<T>(result: CollectionResult<T>, zero: T) -> T {
    result.unwrap_or_else(|error| {
        tracing::trace!(%error, "collection operation failed; returning zero value");
        zero
    })
}
