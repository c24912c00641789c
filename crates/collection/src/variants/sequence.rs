//! Slice operations shared by the sequence variants
//!
//! Items and record sequences both store `Vec<Value>`, so everything that
//! only depends on positions lives here. Callers wrap the results in the
//! variant they need.

use std::collections::HashSet;

use rand::RngCore;
use rand::seq::SliceRandom;
use rand::seq::index;
use serde_json::{Map, Value};

use crate::aggregate::tally;
use crate::contract::{KeyedMapper, Mapper, Predicate, Reducer, Visitor};
use crate::error::{CollectionError, CollectionResult};
use crate::value_utils::{canonical_key, values_equal};

pub fn filter(items: &[Value], predicate: Predicate<'_>, keep: bool) -> Vec<Value> {
    items
        .iter()
        .enumerate()
        .filter(|(i, item)| predicate(*i, item) == keep)
        .map(|(_, item)| item.clone())
        .collect()
}

pub fn partition(items: &[Value], predicate: Predicate<'_>) -> (Vec<Value>, Vec<Value>) {
    let mut passed = Vec::new();
    let mut failed = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if predicate(i, item) {
            passed.push(item.clone());
        } else {
            failed.push(item.clone());
        }
    }
    (passed, failed)
}

pub fn map(items: &[Value], mapper: Mapper<'_>) -> Vec<Value> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| mapper(i, item))
        .collect()
}

pub fn flat_map(items: &[Value], mapper: Mapper<'_>) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match mapper(i, item) {
            Value::Array(inner) => out.extend(inner),
            other => out.push(other),
        }
    }
    out
}

pub fn map_with_keys(items: &[Value], mapper: KeyedMapper<'_>) -> Map<String, Value> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| mapper(i, item))
        .collect()
}

pub fn map_to_groups(items: &[Value], mapper: KeyedMapper<'_>) -> Map<String, Value> {
    let mut groups: Map<String, Value> = Map::new();
    for (i, item) in items.iter().enumerate() {
        let (key, value) = mapper(i, item);
        if let Value::Array(group) = groups
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            group.push(value);
        }
    }
    groups
}

pub fn each(items: &[Value], visitor: Visitor<'_>) {
    for (i, item) in items.iter().enumerate() {
        if !visitor(i, item) {
            break;
        }
    }
}

pub fn reversed(items: &[Value]) -> Vec<Value> {
    items.iter().rev().cloned().collect()
}

pub fn shuffled(items: &[Value], rng: &mut dyn RngCore) -> Vec<Value> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// `count` distinct items in sampled order
pub fn random(
    items: &[Value],
    count: usize,
    rng: &mut dyn RngCore,
) -> CollectionResult<Vec<Value>> {
    if count > items.len() {
        return Err(CollectionError::invalid_argument(
            "random",
            format!("requested {count} items but only {} available", items.len()),
        ));
    }
    Ok(index::sample(rng, items.len(), count)
        .into_iter()
        .map(|i| items[i].clone())
        .collect())
}

pub fn unique(items: &[Value]) -> Vec<Value> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(canonical_key(item)))
        .cloned()
        .collect()
}

pub fn chunk(items: &[Value], size: usize) -> CollectionResult<Vec<Vec<Value>>> {
    if size == 0 {
        return Err(CollectionError::invalid_argument(
            "chunk",
            "chunk size must be positive",
        ));
    }
    Ok(items.chunks(size).map(<[Value]>::to_vec).collect())
}

/// At most `groups` rows; the first `len % groups` rows take one extra item
pub fn split(items: &[Value], groups: usize) -> CollectionResult<Vec<Vec<Value>>> {
    if groups == 0 {
        return Err(CollectionError::invalid_argument(
            "split",
            "group count must be positive",
        ));
    }
    let groups = groups.min(items.len());
    if groups == 0 {
        return Ok(Vec::new());
    }

    let base = items.len() / groups;
    let extra = items.len() % groups;
    let mut rows = Vec::with_capacity(groups);
    let mut start = 0;
    for group in 0..groups {
        let size = base + usize::from(group < extra);
        rows.push(items[start..start + size].to_vec());
        start += size;
    }
    Ok(rows)
}

/// Bounds of `length` items from `offset`, clamped to the slice
fn window(len: usize, offset: usize, length: Option<usize>) -> (usize, usize) {
    let start = offset.min(len);
    let end = length.map_or(len, |length| start.saturating_add(length).min(len));
    (start, end)
}

pub fn slice(items: &[Value], offset: usize, length: Option<usize>) -> Vec<Value> {
    let (start, end) = window(items.len(), offset, length);
    items[start..end].to_vec()
}

/// `(spliced, removed)`
pub fn splice(
    items: &[Value],
    offset: usize,
    length: Option<usize>,
    replacement: &[Value],
) -> (Vec<Value>, Vec<Value>) {
    let (start, end) = window(items.len(), offset, length);
    let mut spliced = Vec::with_capacity(items.len() - (end - start) + replacement.len());
    spliced.extend_from_slice(&items[..start]);
    spliced.extend_from_slice(replacement);
    spliced.extend_from_slice(&items[end..]);
    (spliced, items[start..end].to_vec())
}

pub fn take(items: &[Value], limit: isize) -> Vec<Value> {
    let count = limit.unsigned_abs().min(items.len());
    if limit >= 0 {
        items[..count].to_vec()
    } else {
        items[items.len() - count..].to_vec()
    }
}

pub fn for_page(items: &[Value], page: usize, per_page: usize) -> Vec<Value> {
    let start = page.max(1).saturating_sub(1).saturating_mul(per_page);
    items.iter().skip(start).take(per_page).cloned().collect()
}

pub fn pad(items: &[Value], size: isize, fill: &Value) -> Vec<Value> {
    let target = size.unsigned_abs();
    if target <= items.len() {
        return items.to_vec();
    }
    let padding = std::iter::repeat_n(fill.clone(), target - items.len());
    if size < 0 {
        padding.chain(items.iter().cloned()).collect()
    } else {
        items.iter().cloned().chain(padding).collect()
    }
}

pub fn nth(items: &[Value], step: usize, offset: usize) -> CollectionResult<Vec<Value>> {
    if step == 0 {
        return Err(CollectionError::invalid_argument("nth", "step must be positive"));
    }
    Ok(items.iter().skip(offset).step_by(step).cloned().collect())
}

pub fn contains(items: &[Value], value: &Value) -> bool {
    items.iter().any(|item| values_equal(item, value))
}

pub fn first(items: &[Value], predicate: Option<Predicate<'_>>) -> Option<Value> {
    match predicate {
        None => items.first().cloned(),
        Some(predicate) => items
            .iter()
            .enumerate()
            .find(|(i, item)| predicate(*i, item))
            .map(|(_, item)| item.clone()),
    }
}

pub fn last(items: &[Value], predicate: Option<Predicate<'_>>) -> Option<Value> {
    match predicate {
        None => items.last().cloned(),
        Some(predicate) => items
            .iter()
            .enumerate()
            .rev()
            .find(|(i, item)| predicate(*i, item))
            .map(|(_, item)| item.clone()),
    }
}

pub fn every(items: &[Value], predicate: Predicate<'_>) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(i, item)| predicate(i, item))
}

pub fn count_by(items: &[Value], mapper: Option<Mapper<'_>>) -> Vec<(Value, usize)> {
    match mapper {
        None => tally(items),
        Some(mapper) => tally(&map(items, mapper)),
    }
}

pub fn reduce(items: &[Value], reducer: Reducer<'_>, initial: Value) -> Value {
    items.iter().fold(initial, |acc, item| reducer(acc, item))
}

pub fn pushed(items: &[Value], item: Value) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend_from_slice(items);
    out.push(item);
    out
}

pub fn prepended(items: &[Value], item: Value) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.push(item);
    out.extend_from_slice(items);
    out
}

/// `(rest, removed)` with the last item removed
pub fn popped(items: &[Value]) -> (Vec<Value>, Option<Value>) {
    match items.split_last() {
        Some((last, rest)) => (rest.to_vec(), Some(last.clone())),
        None => (Vec::new(), None),
    }
}

/// `(rest, removed)` with the first item removed
pub fn shifted(items: &[Value]) -> (Vec<Value>, Option<Value>) {
    match items.split_first() {
        Some((first, rest)) => (rest.to_vec(), Some(first.clone())),
        None => (Vec::new(), None),
    }
}
