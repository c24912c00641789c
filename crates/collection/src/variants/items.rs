//! Flat sequence collection

use std::collections::HashSet;
use std::io::Write;

use rand::RngCore;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value};

use super::{boxed_map, boxed_matrix, boxed_sequence, reject_key, sequence, shape_mismatch};
use crate::aggregate;
use crate::contract::{
    Aggregate, BoxedCollection, CollectionCore, Convert, Inspect, KeyedMapper, Mapper, Mutate,
    Predicate, Reducer, Search, SetAlgebra, Transform, Visitor, dump_payload,
};
use crate::error::{CollectionError, CollectionResult};
use crate::payload::{Payload, Variant};
use crate::value_utils::{
    canonical_key, compare_values, key_string, number_to_decimal, value_type_name, values_equal,
};

/// Collection over an ordered sequence of JSON values
#[derive(Debug, Clone, Default)]
pub struct ItemsCollection {
    items: Vec<Value>,
    pending: Option<CollectionError>,
}

impl ItemsCollection {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            pending: None,
        }
    }

    /// Borrow the items
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    fn numbers(
        &self,
        operation: &'static str,
        key: Option<&str>,
    ) -> CollectionResult<Vec<Decimal>> {
        reject_key(operation, key)?;
        aggregate::decimals(operation, &self.items)
    }
}

impl From<Vec<Value>> for ItemsCollection {
    fn from(items: Vec<Value>) -> Self {
        Self::new(items)
    }
}

/// Integer form of an integral JSON number
fn integer(operation: &'static str, value: &Value) -> CollectionResult<i64> {
    let Value::Number(number) = value else {
        return Err(CollectionError::type_mismatch(
            operation,
            "integer",
            value_type_name(value),
        ));
    };
    if let Some(i) = number.as_i64() {
        return Ok(i);
    }
    let decimal = number_to_decimal(number)
        .ok_or_else(|| CollectionError::type_mismatch(operation, "integer", number.to_string()))?;
    if !decimal.fract().is_zero() {
        return Err(CollectionError::type_mismatch(
            operation,
            "integer",
            "fractional number",
        ));
    }
    decimal.to_i64().ok_or(CollectionError::overflow(operation))
}

impl CollectionCore for ItemsCollection {
    fn variant(&self) -> Variant {
        Variant::Items
    }

    fn value(&self) -> Payload {
        Payload::Items(self.items.clone())
    }

    fn count(&self) -> usize {
        self.items.len()
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

impl Transform for ItemsCollection {
    fn try_filter(&self, predicate: Predicate<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::filter(&self.items, predicate, true)))
    }

    fn try_reject(&self, predicate: Predicate<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::filter(&self.items, predicate, false)))
    }

    fn try_partition(
        &self,
        predicate: Predicate<'_>,
    ) -> CollectionResult<(BoxedCollection, BoxedCollection)> {
        let (passed, failed) = sequence::partition(&self.items, predicate);
        Ok((boxed_sequence(passed), boxed_sequence(failed)))
    }

    fn try_unique(&self) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::unique(&self.items)))
    }

    fn try_map(&self, mapper: Mapper<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::map(&self.items, mapper)))
    }

    fn try_map_with_keys(&self, mapper: KeyedMapper<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(sequence::map_with_keys(&self.items, mapper)))
    }

    fn try_map_to_groups(&self, mapper: KeyedMapper<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(sequence::map_to_groups(&self.items, mapper)))
    }

    fn try_flat_map(&self, mapper: Mapper<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::flat_map(&self.items, mapper)))
    }

    fn try_each(&self, visitor: Visitor<'_>) -> CollectionResult<BoxedCollection> {
        sequence::each(&self.items, visitor);
        Ok(boxed_sequence(self.items.clone()))
    }

    /// Map from each item (as a key) to its position; the last position wins
    fn try_flip(&self) -> CollectionResult<BoxedCollection> {
        let flipped: Map<String, Value> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (key_string(item), Value::from(i)))
            .collect();
        Ok(boxed_map(flipped))
    }

    fn try_cross_join(&self, arrays: &[Vec<Value>]) -> CollectionResult<BoxedCollection> {
        let mut rows: Vec<Vec<Value>> = self.items.iter().map(|item| vec![item.clone()]).collect();
        for array in arrays {
            rows = rows
                .iter()
                .flat_map(|row| {
                    array.iter().map(move |value| {
                        let mut next = row.clone();
                        next.push(value.clone());
                        next
                    })
                })
                .collect();
        }
        Ok(boxed_matrix(rows))
    }

    fn try_sort(&self) -> CollectionResult<BoxedCollection> {
        let mut sorted = self.items.clone();
        sorted.sort_by(compare_values);
        Ok(boxed_sequence(sorted))
    }

    fn try_sort_desc(&self) -> CollectionResult<BoxedCollection> {
        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| compare_values(b, a));
        Ok(boxed_sequence(sorted))
    }

    fn try_reverse(&self) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::reversed(&self.items)))
    }

    fn try_shuffle_with(&self, rng: &mut dyn RngCore) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::shuffled(&self.items, rng)))
    }

    fn try_random_with(
        &self,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> CollectionResult<BoxedCollection> {
        sequence::random(&self.items, count, rng).map(boxed_sequence)
    }

    fn try_chunk(&self, size: usize) -> CollectionResult<BoxedCollection> {
        sequence::chunk(&self.items, size).map(boxed_matrix)
    }

    fn try_split(&self, groups: usize) -> CollectionResult<BoxedCollection> {
        sequence::split(&self.items, groups).map(boxed_matrix)
    }

    fn try_splice(
        &self,
        offset: usize,
        length: Option<usize>,
        replacement: &[Value],
    ) -> CollectionResult<(BoxedCollection, BoxedCollection)> {
        let (spliced, removed) = sequence::splice(&self.items, offset, length, replacement);
        Ok((boxed_sequence(spliced), boxed_sequence(removed)))
    }

    fn try_slice(&self, offset: usize, length: Option<usize>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::slice(&self.items, offset, length)))
    }

    fn try_take(&self, limit: isize) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::take(&self.items, limit)))
    }

    fn try_for_page(&self, page: usize, per_page: usize) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::for_page(&self.items, page, per_page)))
    }

    fn try_pad(&self, size: isize, fill: Value) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::pad(&self.items, size, &fill)))
    }

    fn try_nth(&self, step: usize, offset: usize) -> CollectionResult<BoxedCollection> {
        sequence::nth(&self.items, step, offset).map(boxed_sequence)
    }
}

impl SetAlgebra for ItemsCollection {
    fn try_diff(&self, other: &[Value]) -> CollectionResult<BoxedCollection> {
        let excluded: HashSet<String> = other.iter().map(canonical_key).collect();
        Ok(boxed_sequence(
            self.items
                .iter()
                .filter(|item| !excluded.contains(&canonical_key(item)))
                .cloned()
                .collect(),
        ))
    }

    fn try_intersect(&self, other: &[Value]) -> CollectionResult<BoxedCollection> {
        let kept: HashSet<String> = other.iter().map(canonical_key).collect();
        Ok(boxed_sequence(
            self.items
                .iter()
                .filter(|item| kept.contains(&canonical_key(item)))
                .cloned()
                .collect(),
        ))
    }

    fn try_merge(&self, other: &Payload) -> CollectionResult<BoxedCollection> {
        self.try_concat(other)
            .map_err(|_| shape_mismatch("merge", "items", other))
    }

    fn try_combine(&self, values: &[Value]) -> CollectionResult<BoxedCollection> {
        if values.len() != self.items.len() {
            return Err(CollectionError::invalid_argument(
                "combine",
                format!(
                    "{} keys but {} values",
                    self.items.len(),
                    values.len()
                ),
            ));
        }
        Ok(boxed_map(
            self.items
                .iter()
                .map(key_string)
                .zip(values.iter().cloned())
                .collect(),
        ))
    }

    /// Append the top-level elements of any sequence shape
    fn try_concat(&self, other: &Payload) -> CollectionResult<BoxedCollection> {
        let tail = other
            .sequence_items()
            .ok_or_else(|| shape_mismatch("concat", "items", other))?;
        let mut joined = Vec::with_capacity(self.items.len() + tail.len());
        joined.extend_from_slice(&self.items);
        joined.extend(tail);
        Ok(boxed_sequence(joined))
    }
}

impl Aggregate for ItemsCollection {
    fn try_sum(&self, key: Option<&str>) -> CollectionResult<Decimal> {
        aggregate::sum("sum", &self.numbers("sum", key)?)
    }

    fn try_avg(&self, key: Option<&str>) -> CollectionResult<Decimal> {
        aggregate::mean("avg", &self.numbers("avg", key)?)
    }

    fn try_min(&self, key: Option<&str>) -> CollectionResult<Decimal> {
        aggregate::min("min", &self.numbers("min", key)?)
    }

    fn try_max(&self, key: Option<&str>) -> CollectionResult<Decimal> {
        aggregate::max("max", &self.numbers("max", key)?)
    }

    fn try_median(&self, key: Option<&str>) -> CollectionResult<Decimal> {
        aggregate::median("median", &self.numbers("median", key)?)
    }

    fn try_mode(&self, key: Option<&str>) -> CollectionResult<Vec<Value>> {
        reject_key("mode", key)?;
        Ok(aggregate::mode(&self.items))
    }

    fn try_count_by(&self, mapper: Option<Mapper<'_>>) -> CollectionResult<Vec<(Value, usize)>> {
        Ok(sequence::count_by(&self.items, mapper))
    }

    fn try_reduce(&self, reducer: Reducer<'_>, initial: Value) -> CollectionResult<Value> {
        Ok(sequence::reduce(&self.items, reducer, initial))
    }
}

impl Search for ItemsCollection {
    fn try_contains(&self, value: &Value) -> CollectionResult<bool> {
        Ok(sequence::contains(&self.items, value))
    }

    fn try_search(&self, value: &Value) -> CollectionResult<Option<usize>> {
        Ok(self.items.iter().position(|item| values_equal(item, value)))
    }

    fn try_first(&self, predicate: Option<Predicate<'_>>) -> CollectionResult<Option<Value>> {
        Ok(sequence::first(&self.items, predicate))
    }

    fn try_last(&self, predicate: Option<Predicate<'_>>) -> CollectionResult<Option<Value>> {
        Ok(sequence::last(&self.items, predicate))
    }

    fn try_is_empty(&self) -> CollectionResult<bool> {
        Ok(self.items.is_empty())
    }

    fn try_is_not_empty(&self) -> CollectionResult<bool> {
        Ok(!self.items.is_empty())
    }

    fn try_every(&self, predicate: Predicate<'_>) -> CollectionResult<bool> {
        Ok(sequence::every(&self.items, predicate))
    }
}

impl Mutate for ItemsCollection {
    fn try_push(&self, item: Value) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::pushed(&self.items, item)))
    }

    fn try_prepend(&self, item: Value) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::prepended(&self.items, item)))
    }

    fn try_pop(&self) -> CollectionResult<(BoxedCollection, Option<Value>)> {
        let (rest, last) = sequence::popped(&self.items);
        Ok((boxed_sequence(rest), last))
    }

    fn try_shift(&self) -> CollectionResult<(BoxedCollection, Option<Value>)> {
        let (rest, first) = sequence::shifted(&self.items);
        Ok((boxed_sequence(rest), first))
    }
}

impl Convert for ItemsCollection {
    fn try_all(&self) -> CollectionResult<Vec<Value>> {
        Ok(self.items.clone())
    }

    fn try_to_int_array(&self) -> CollectionResult<Vec<isize>> {
        self.items
            .iter()
            .map(|item| {
                let wide = integer("to_int_array", item)?;
                isize::try_from(wide).map_err(|_| CollectionError::overflow("to_int_array"))
            })
            .collect()
    }

    fn try_to_int64_array(&self) -> CollectionResult<Vec<i64>> {
        self.items
            .iter()
            .map(|item| integer("to_int64_array", item))
            .collect()
    }

    fn try_to_number_array(&self) -> CollectionResult<Vec<Decimal>> {
        aggregate::decimals("to_number_array", &self.items)
    }

    fn try_to_string_array(&self) -> CollectionResult<Vec<String>> {
        self.items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                other => Err(CollectionError::type_mismatch(
                    "to_string_array",
                    "scalar",
                    value_type_name(other),
                )),
            })
            .collect()
    }

    fn try_join(&self, delimiter: &str) -> CollectionResult<String> {
        Ok(self
            .items
            .iter()
            .map(key_string)
            .collect::<Vec<_>>()
            .join(delimiter))
    }
}

impl Inspect for ItemsCollection {
    fn try_dump_to(&self, sink: &mut dyn Write) -> CollectionResult<()> {
        dump_payload(self, sink)
    }
}
