//! Aggregation family
//!
//! `key` selects the numeric field for record sequences and must be `None`
//! for flat sequences.

use rust_decimal::Decimal;
use serde_json::Value;

use super::{CollectionCore, Mapper, Reducer, settle};
use crate::error::{CollectionError, CollectionResult};

/// Numeric and frequency aggregates
pub trait Aggregate: CollectionCore {
    /// Decimal sum; zero when empty
    fn try_sum(&self, key: Option<&str>) -> CollectionResult<Decimal> {
        let _ = key;
        Err(CollectionError::not_implemented("sum"))
    }

    fn sum(&self, key: Option<&str>) -> Decimal {
        settle(self.try_sum(key), Decimal::ZERO)
    }

    /// Arithmetic mean
    fn try_avg(&self, key: Option<&str>) -> CollectionResult<Decimal> {
        let _ = key;
        Err(CollectionError::not_implemented("avg"))
    }

    fn avg(&self, key: Option<&str>) -> Decimal {
        settle(self.try_avg(key), Decimal::ZERO)
    }

    fn try_min(&self, key: Option<&str>) -> CollectionResult<Decimal> {
        let _ = key;
        Err(CollectionError::not_implemented("min"))
    }

    fn min(&self, key: Option<&str>) -> Decimal {
        settle(self.try_min(key), Decimal::ZERO)
    }

    fn try_max(&self, key: Option<&str>) -> CollectionResult<Decimal> {
        let _ = key;
        Err(CollectionError::not_implemented("max"))
    }

    fn max(&self, key: Option<&str>) -> Decimal {
        settle(self.try_max(key), Decimal::ZERO)
    }

    fn try_median(&self, key: Option<&str>) -> CollectionResult<Decimal> {
        let _ = key;
        Err(CollectionError::not_implemented("median"))
    }

    fn median(&self, key: Option<&str>) -> Decimal {
        settle(self.try_median(key), Decimal::ZERO)
    }

    /// Every most-frequent value, first occurrence first
    fn try_mode(&self, key: Option<&str>) -> CollectionResult<Vec<Value>> {
        let _ = key;
        Err(CollectionError::not_implemented("mode"))
    }

    fn mode(&self, key: Option<&str>) -> Vec<Value> {
        settle(self.try_mode(key), Vec::new())
    }

    /// Occurrence counts of each item, or of `mapper`'s result per item
    fn try_count_by(&self, mapper: Option<Mapper<'_>>) -> CollectionResult<Vec<(Value, usize)>> {
        let _ = mapper;
        Err(CollectionError::not_implemented("count_by"))
    }

    fn count_by(&self, mapper: Option<Mapper<'_>>) -> Vec<(Value, usize)> {
        settle(self.try_count_by(mapper), Vec::new())
    }

    /// Left fold starting from `initial`
    fn try_reduce(&self, reducer: Reducer<'_>, initial: Value) -> CollectionResult<Value> {
        let _ = (reducer, initial);
        Err(CollectionError::not_implemented("reduce"))
    }

    fn reduce(&self, reducer: Reducer<'_>, initial: Value) -> Value {
        settle(self.try_reduce(reducer, initial), Value::Null)
    }
}
