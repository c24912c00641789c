//! Record sequence collection
//!
//! Records are stored as `Value::Object`s so predicates and mappers see the
//! same `&Value` they would for flat items. Every stored element is an object.

use std::io::Write;

use rand::RngCore;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::{boxed_map, boxed_matrix, boxed_records, boxed_sequence, sequence, shape_mismatch};
use crate::aggregate;
use crate::contract::{
    Aggregate, BoxedCollection, CollectionCore, Convert, Inspect, KeyedMapper, Mapper, Mutate,
    Predicate, Reducer, Search, SetAlgebra, Transform, Visitor, dump_payload,
};
use crate::error::{CollectionError, CollectionResult};
use crate::operator::Operator;
use crate::payload::{Payload, Record, Variant};
use crate::value_utils::{compare_values, field, key_string, value_type_name, values_equal};

/// Collection over an ordered sequence of JSON objects
#[derive(Debug, Clone, Default)]
pub struct RecordsCollection {
    records: Vec<Value>,
    pending: Option<CollectionError>,
}

impl RecordsCollection {
    pub fn new(records: Vec<Record>) -> Self {
        Self::from_values(records.into_iter().map(Value::Object).collect())
    }

    /// Wrap values already known to be objects
    pub(crate) fn from_values(records: Vec<Value>) -> Self {
        debug_assert!(records.iter().all(Value::is_object));
        Self {
            records,
            pending: None,
        }
    }

    /// Field values used as aggregation operands
    fn operands<'a>(
        &'a self,
        operation: &'static str,
        key: Option<&str>,
    ) -> CollectionResult<Vec<&'a Value>> {
        let key = key.ok_or_else(|| {
            CollectionError::invalid_argument(operation, "record sequences need a field key")
        })?;
        self.records
            .iter()
            .map(|record| field(record, key).ok_or_else(|| CollectionError::key_not_found(key)))
            .collect()
    }

    fn numbers(
        &self,
        operation: &'static str,
        key: Option<&str>,
    ) -> CollectionResult<Vec<Decimal>> {
        aggregate::decimals(operation, self.operands(operation, key)?)
    }

    fn matching(&self, key: &str, test: impl Fn(&Value) -> bool) -> Vec<Value> {
        self.records
            .iter()
            .filter(|record| field(record, key).is_some_and(&test))
            .cloned()
            .collect()
    }

    fn sorted_by(&self, key: &str, descending: bool) -> Vec<Value> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| {
            let a = field(a, key).unwrap_or(&Value::Null);
            let b = field(b, key).unwrap_or(&Value::Null);
            if descending {
                compare_values(b, a)
            } else {
                compare_values(a, b)
            }
        });
        sorted
    }
}

impl From<Vec<Record>> for RecordsCollection {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

/// Group key for a record; records lacking the field share the empty key
fn group_key(record: &Value, key: &str) -> String {
    field(record, key).map(key_string).unwrap_or_default()
}

fn require_object(operation: &'static str, item: &Value) -> CollectionResult<()> {
    if item.is_object() {
        Ok(())
    } else {
        Err(CollectionError::type_mismatch(
            operation,
            "object",
            value_type_name(item),
        ))
    }
}

impl CollectionCore for RecordsCollection {
    fn variant(&self) -> Variant {
        Variant::Records
    }

    fn value(&self) -> Payload {
        Payload::Records(
            self.records
                .iter()
                .filter_map(|record| record.as_object().cloned())
                .collect(),
        )
    }

    fn count(&self) -> usize {
        self.records.len()
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

impl Transform for RecordsCollection {
    fn try_select(&self, keys: &[&str]) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(
            self.records
                .iter()
                .map(|record| {
                    let selected: Record = keys
                        .iter()
                        .filter_map(|key| {
                            field(record, key).map(|value| ((*key).to_owned(), value.clone()))
                        })
                        .collect();
                    Value::Object(selected)
                })
                .collect(),
        ))
    }

    fn try_column(&self, key: &str) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(
            self.records
                .iter()
                .map(|record| field(record, key).cloned().unwrap_or(Value::Null))
                .collect(),
        ))
    }

    fn try_pluck(&self, key: &str) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(
            self.records
                .iter()
                .filter_map(|record| field(record, key).cloned())
                .collect(),
        ))
    }

    fn try_filter(&self, predicate: Predicate<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(sequence::filter(&self.records, predicate, true)))
    }

    fn try_reject(&self, predicate: Predicate<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(sequence::filter(&self.records, predicate, false)))
    }

    fn try_partition(
        &self,
        predicate: Predicate<'_>,
    ) -> CollectionResult<(BoxedCollection, BoxedCollection)> {
        let (passed, failed) = sequence::partition(&self.records, predicate);
        Ok((boxed_records(passed), boxed_records(failed)))
    }

    fn try_map(&self, mapper: Mapper<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::map(&self.records, mapper)))
    }

    fn try_map_with_keys(&self, mapper: KeyedMapper<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(sequence::map_with_keys(&self.records, mapper)))
    }

    fn try_map_to_groups(&self, mapper: KeyedMapper<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(sequence::map_to_groups(&self.records, mapper)))
    }

    fn try_flat_map(&self, mapper: Mapper<'_>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_sequence(sequence::flat_map(&self.records, mapper)))
    }

    fn try_each(&self, visitor: Visitor<'_>) -> CollectionResult<BoxedCollection> {
        sequence::each(&self.records, visitor);
        Ok(boxed_records(self.records.clone()))
    }

    fn try_group_by(&self, key: &str) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(sequence::map_to_groups(&self.records, &|_, record| {
            (group_key(record, key), record.clone())
        })))
    }

    fn try_key_by(&self, key: &str) -> CollectionResult<BoxedCollection> {
        Ok(boxed_map(sequence::map_with_keys(&self.records, &|_, record| {
            (group_key(record, key), record.clone())
        })))
    }

    fn try_sort_by(&self, key: &str) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(self.sorted_by(key, false)))
    }

    fn try_sort_by_desc(&self, key: &str) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(self.sorted_by(key, true)))
    }

    fn try_reverse(&self) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(sequence::reversed(&self.records)))
    }

    fn try_shuffle_with(&self, rng: &mut dyn RngCore) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(sequence::shuffled(&self.records, rng)))
    }

    fn try_random_with(
        &self,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> CollectionResult<BoxedCollection> {
        sequence::random(&self.records, count, rng).map(boxed_records)
    }

    fn try_chunk(&self, size: usize) -> CollectionResult<BoxedCollection> {
        sequence::chunk(&self.records, size).map(boxed_matrix)
    }

    fn try_split(&self, groups: usize) -> CollectionResult<BoxedCollection> {
        sequence::split(&self.records, groups).map(boxed_matrix)
    }

    fn try_slice(&self, offset: usize, length: Option<usize>) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(sequence::slice(&self.records, offset, length)))
    }

    fn try_take(&self, limit: isize) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(sequence::take(&self.records, limit)))
    }

    fn try_for_page(&self, page: usize, per_page: usize) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(sequence::for_page(&self.records, page, per_page)))
    }

    fn try_nth(&self, step: usize, offset: usize) -> CollectionResult<BoxedCollection> {
        sequence::nth(&self.records, step, offset).map(boxed_records)
    }
}

impl SetAlgebra for RecordsCollection {
    fn try_concat(&self, other: &Payload) -> CollectionResult<BoxedCollection> {
        let mut joined = self.records.clone();
        match other {
            Payload::Records(tail) => joined.extend(tail.iter().cloned().map(Value::Object)),
            Payload::Items(tail) if tail.is_empty() => {}
            _ => return Err(shape_mismatch("concat", "records", other)),
        }
        Ok(boxed_records(joined))
    }
}

impl Aggregate for RecordsCollection {
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
        Ok(aggregate::mode(self.operands("mode", key)?))
    }

    fn try_count_by(&self, mapper: Option<Mapper<'_>>) -> CollectionResult<Vec<(Value, usize)>> {
        Ok(sequence::count_by(&self.records, mapper))
    }

    fn try_reduce(&self, reducer: Reducer<'_>, initial: Value) -> CollectionResult<Value> {
        Ok(sequence::reduce(&self.records, reducer, initial))
    }
}

impl Search for RecordsCollection {
    fn try_contains(&self, value: &Value) -> CollectionResult<bool> {
        Ok(sequence::contains(&self.records, value))
    }

    fn try_first(&self, predicate: Option<Predicate<'_>>) -> CollectionResult<Option<Value>> {
        Ok(sequence::first(&self.records, predicate))
    }

    fn try_last(&self, predicate: Option<Predicate<'_>>) -> CollectionResult<Option<Value>> {
        Ok(sequence::last(&self.records, predicate))
    }

    fn try_first_where(
        &self,
        key: &str,
        operator: Operator,
        value: &Value,
    ) -> CollectionResult<Option<Map<String, Value>>> {
        Ok(self
            .records
            .iter()
            .find(|record| field(record, key).is_some_and(|ours| operator.matches(ours, value)))
            .and_then(|record| record.as_object().cloned()))
    }

    fn try_is_empty(&self) -> CollectionResult<bool> {
        Ok(self.records.is_empty())
    }

    fn try_is_not_empty(&self) -> CollectionResult<bool> {
        Ok(!self.records.is_empty())
    }

    fn try_every(&self, predicate: Predicate<'_>) -> CollectionResult<bool> {
        Ok(sequence::every(&self.records, predicate))
    }

    fn try_where_by(
        &self,
        key: &str,
        operator: Operator,
        value: &Value,
    ) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(
            self.matching(key, |ours| operator.matches(ours, value)),
        ))
    }

    fn try_where_in(&self, key: &str, values: &[Value]) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(
            self.matching(key, |ours| sequence::contains(values, ours)),
        ))
    }

    /// Records lacking `key` count as not in `values`
    fn try_where_not_in(&self, key: &str, values: &[Value]) -> CollectionResult<BoxedCollection> {
        Ok(boxed_records(
            self.records
                .iter()
                .filter(|record| {
                    field(record, key)
                        .is_none_or(|ours| !values.iter().any(|v| values_equal(ours, v)))
                })
                .cloned()
                .collect(),
        ))
    }
}

impl Mutate for RecordsCollection {
    fn try_push(&self, item: Value) -> CollectionResult<BoxedCollection> {
        require_object("push", &item)?;
        Ok(boxed_records(sequence::pushed(&self.records, item)))
    }

    fn try_prepend(&self, item: Value) -> CollectionResult<BoxedCollection> {
        require_object("prepend", &item)?;
        Ok(boxed_records(sequence::prepended(&self.records, item)))
    }

    fn try_pop(&self) -> CollectionResult<(BoxedCollection, Option<Value>)> {
        let (rest, last) = sequence::popped(&self.records);
        Ok((boxed_records(rest), last))
    }

    fn try_shift(&self) -> CollectionResult<(BoxedCollection, Option<Value>)> {
        let (rest, first) = sequence::shifted(&self.records);
        Ok((boxed_records(rest), first))
    }
}

impl Convert for RecordsCollection {
    fn try_all(&self) -> CollectionResult<Vec<Value>> {
        Ok(self.records.clone())
    }

    fn try_to_map_array(&self) -> CollectionResult<Vec<Map<String, Value>>> {
        Ok(self
            .records
            .iter()
            .filter_map(|record| record.as_object().cloned())
            .collect())
    }

    /// Records lacking `key` are skipped
    fn try_implode(&self, key: &str, delimiter: &str) -> CollectionResult<String> {
        Ok(self
            .records
            .iter()
            .filter_map(|record| field(record, key).map(key_string))
            .collect::<Vec<_>>()
            .join(delimiter))
    }

    fn try_mapping_source(&self) -> CollectionResult<Value> {
        Ok(Value::Array(self.records.clone()))
    }
}

impl Inspect for RecordsCollection {
    fn try_dump_to(&self, sink: &mut dyn Write) -> CollectionResult<()> {
        dump_payload(self, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ConvertExt;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use serde::Deserialize;
    use serde_json::json;

    fn people() -> RecordsCollection {
        let Value::Array(records) = json!([
            {"name": "ada", "age": 36, "team": "core"},
            {"name": "bob", "age": 25, "team": "ops"},
            {"name": "cy", "age": 36, "team": "core"},
            {"name": "dee", "team": "ops"},
        ]) else {
            unreachable!()
        };
        RecordsCollection::from_values(records)
    }

    fn names(collection: &BoxedCollection) -> Vec<String> {
        collection.pluck("name").to_string_array()
    }

    #[test]
    fn column_fills_missing_with_null() {
        let ages = people().column("age");
        assert_eq!(ages.all(), vec![json!(36), json!(25), json!(36), Value::Null]);
        assert_eq!(people().pluck("age").count(), 3);
    }

    #[test]
    fn select_keeps_requested_fields() {
        let selected = people().select(&["name"]);
        assert_eq!(selected.first(None), Some(json!({"name": "ada"})));
    }

    #[test]
    fn where_by_and_first_where() {
        let p = people();
        let older = p.where_by("age", Operator::Gt, &json!(30));
        assert_eq!(names(&older), vec!["ada", "cy"]);
        let bob = p.first_where("age", Operator::Lt, &json!(30));
        assert_eq!(bob.and_then(|r| r.get("name").cloned()), Some(json!("bob")));
        assert_eq!(p.first_where("age", Operator::Gt, &json!(99)), None);
    }

    #[test]
    fn where_in_and_not_in() {
        let p = people();
        assert_eq!(names(&p.where_in("age", &[json!(25)])), vec!["bob"]);
        assert_eq!(
            names(&p.where_not_in("age", &[json!(25)])),
            vec!["ada", "cy", "dee"]
        );
    }

    #[test]
    fn group_by_and_key_by() {
        let p = people();
        let groups = p.group_by("team").to_map();
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["core", "ops"]);
        assert_eq!(groups["core"].as_array().map(Vec::len), Some(2));

        let keyed = p.key_by("age").to_map();
        assert_eq!(keyed["36"]["name"], json!("cy"));
        assert_eq!(keyed[""]["name"], json!("dee"));
    }

    #[test]
    fn sort_by_is_stable() {
        let p = people();
        assert_eq!(names(&p.sort_by("age")), vec!["dee", "bob", "ada", "cy"]);
        assert_eq!(names(&p.sort_by_desc("age")), vec!["ada", "cy", "bob", "dee"]);
    }

    #[test]
    fn aggregates_need_a_key() {
        let p = people().take(3);
        assert_eq!(p.sum(Some("age")), Decimal::from(97));
        assert_eq!(p.max(Some("age")), Decimal::from(36));
        assert_eq!(p.mode(Some("age")), vec![json!(36)]);
        assert!(matches!(
            p.try_sum(None),
            Err(CollectionError::InvalidArgument { operation: "sum", .. })
        ));
        assert_eq!(
            p.try_sum(Some("name")).unwrap_err(),
            CollectionError::type_mismatch("sum", "number", "string")
        );
        assert_eq!(
            people().try_sum(Some("age")).unwrap_err(),
            CollectionError::key_not_found("age")
        );
    }

    #[test]
    fn push_requires_an_object() {
        let p = people();
        assert_eq!(p.push(json!({"name": "eve"})).count(), 5);
        assert_eq!(
            p.try_push(json!(1)).unwrap_err(),
            CollectionError::type_mismatch("push", "object", "number")
        );
        assert_eq!(p.prepend(json!("x")).count(), 4);
    }

    #[test]
    fn map_produces_items() {
        let ages = people().map(&|i, _| json!(i));
        assert_eq!(ages.variant(), Variant::Items);
        assert_eq!(ages.count(), 4);
    }

    #[test]
    fn map_returning_objects_stays_queryable() {
        let same = people().map(&|_, record| record.clone());
        assert_eq!(same.variant(), Variant::Records);
        let core = same.where_by("team", Operator::Eq, &json!("core"));
        assert_eq!(names(&core), vec!["ada", "cy"]);
    }

    #[test]
    fn implode_skips_missing() {
        assert_eq!(people().implode("age", "|"), "36|25|36");
    }

    #[test]
    fn concat_requires_records() {
        let p = people();
        let more = Payload::from(json!([{"name": "eve"}]));
        assert_eq!(p.concat(&more).count(), 5);
        assert_eq!(
            p.try_concat(&Payload::from(json!([1]))).unwrap_err(),
            CollectionError::type_mismatch("concat", "records", "items")
        );
        let unchanged = p.try_concat(&Payload::from(json!([]))).unwrap();
        assert_eq!(unchanged.variant(), Variant::Records);
        assert_eq!(unchanged.count(), 4);
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Person {
        name: String,
        #[serde(default)]
        age: Option<u32>,
    }

    #[test]
    fn maps_into_structs() {
        let people: Vec<Person> = people().try_to_struct().unwrap();
        assert_eq!(people.len(), 4);
        assert_eq!(people[3], Person { name: "dee".into(), age: None });
    }
}
